//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod account_repository_impl;
pub mod pet_repository_impl;
pub mod profile_repository_impl;

// Re-export the MySQL implementations
pub use account_repository_impl::MySqlAccountRepository;
pub use pet_repository_impl::MySqlPetRepository;
pub use profile_repository_impl::MySqlProfileRepository;
