//! Business services containing domain logic and use cases.

pub mod auth;
pub mod cache;
pub mod pets;
pub mod rate_limit;
pub mod recovery;

// Re-export commonly used types
pub use auth::{
    AuthFlowConfig, AuthFlowService, CodeSubmission, DnsResolver, LoginRequest,
    NewPasswordSubmission, NoOpDnsResolver, Notifier, PasswordResetRequest,
    RegisterIndividualRequest, RegisterOrganizationRequest,
};
pub use cache::{CacheStore, MemoryCacheStore};
pub use pets::PetService;
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use recovery::{CodeCheck, IssuedRecovery, RecoveryService};
