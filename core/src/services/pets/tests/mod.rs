//! Pet catalog service tests
