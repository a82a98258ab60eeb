//! DNS lookups for the email deliverability probe

pub mod resolver;

// Re-export commonly used types
pub use resolver::HickoryDnsResolver;
