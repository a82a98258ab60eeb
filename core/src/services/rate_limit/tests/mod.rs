//! Rate limiter tests

mod service_tests;
