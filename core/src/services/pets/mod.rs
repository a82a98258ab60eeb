//! Pet catalog service
//!
//! Form-level validation and parsing for pet listings plus the catalog
//! queries the adopter pages read.

mod service;

#[cfg(test)]
mod tests;

pub use service::{NewPetRequest, PetService};
