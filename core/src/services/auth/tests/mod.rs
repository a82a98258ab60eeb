//! Tests for the authentication flows

#[cfg(test)]
mod login_tests;
