//! Password recovery state machine
//!
//! Holds the emailed code, the browser token and the verified flag in the
//! cache store, keyed per account. The service owns the lifecycle:
//! [`issue`](RecoveryService::issue) opens a recovery,
//! [`verify_code`](RecoveryService::verify_code) marks it verified and
//! [`consume`](RecoveryService::consume) closes it.

mod service;

#[cfg(test)]
mod tests;

pub use service::{CodeCheck, IssuedRecovery, RecoveryService};
