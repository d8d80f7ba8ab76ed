//! Domain services

pub mod contract_terms;
pub mod filters;

pub use contract_terms::{can_lease, standard_lease, standard_sale};
pub use filters::VehicleFilter;
