//! Tests for the account repository mock
