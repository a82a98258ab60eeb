//! Recovery lifecycle tests
