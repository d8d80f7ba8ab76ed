//! Domain model types

pub mod contract;
pub mod vehicle;

pub use contract::{Contract, LeaseContract, SaleContract};
pub use vehicle::Vehicle;

/// Separator between fields of every text row
pub const FIELD_SEPARATOR: char = '|';
