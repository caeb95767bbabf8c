//! Address autocomplete for the funnel's first step.

pub mod autocomplete;
pub mod loader;

pub use autocomplete::{address_router, AddressSuggestions, PlacesClient, PlacesError};
pub use loader::CapabilityLoader;
