pub mod account;
pub mod pet;
pub mod profile;

pub use account::AccountRepository;
pub use pet::PetRepository;
pub use profile::ProfileRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use pet::MockPetRepository;
#[cfg(test)]
pub use profile::MockProfileRepository;
