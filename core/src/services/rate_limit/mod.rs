//! Sliding-window rate limiting over the cache store
//!
//! Tracks attempt timestamps per identifier and answers whether another
//! attempt is allowed right now. Checking and recording are separate
//! operations so callers decide which outcomes count against the window.

mod service;

#[cfg(test)]
mod tests;

pub use service::{
    code_verification_identifier, login_email_identifier, login_ip_identifier,
    recovery_request_identifier, registration_identifier, RateLimitDecision, RateLimiter,
};
