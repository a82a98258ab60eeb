//! Domain entities representing core business objects.

pub mod account;
pub mod pet;
pub mod profile;
pub mod recovery;

// Re-export commonly used types
pub use account::Account;
pub use pet::{Pet, PetSex, PetSize, PetSpecies};
pub use profile::{IndividualProfile, OrganizationProfile, Profile};
pub use recovery::{code_key, token_key, verified_key};
