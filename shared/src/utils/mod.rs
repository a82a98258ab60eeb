//! Common utility functions

pub mod birth_date;
pub mod document;
pub mod email;
pub mod password;
pub mod phone;

// Re-export commonly used utilities
pub use birth_date::*;
pub use document::*;
pub use email::*;
pub use password::*;
pub use phone::*;
