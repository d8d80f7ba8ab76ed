//! Domain models, services, and repository traits

pub mod model;
pub mod repository;
pub mod service;

pub use model::{Contract, LeaseContract, SaleContract, Vehicle};
pub use repository::{ContractList, Dealership};
