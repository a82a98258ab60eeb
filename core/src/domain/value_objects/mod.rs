//! Value objects representing immutable domain concepts.

pub mod outcome;

// Re-export commonly used types
pub use outcome::{Outcome, OutcomeStatus, RedirectTarget, SessionGrant};
