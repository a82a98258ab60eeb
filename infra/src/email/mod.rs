//! Email delivery implementations
//!
//! HTTP transactional mail client implementing the core Notifier port.

pub mod mailer;

// Re-export commonly used types
pub use mailer::HttpMailer;
