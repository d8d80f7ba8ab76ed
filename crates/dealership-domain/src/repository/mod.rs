//! Repository trait definitions for data persistence
//!
//! Every backend (in-memory, text file, SQLite) implements the same traits so
//! callers never care where the inventory lives.

use std::borrow::Cow;

use dealership_types::Result;

use crate::model::{Contract, Vehicle};

/// A car dealership: identity fields plus an inventory of vehicles
pub trait Dealership {
    /// Dealership name shown to customers
    fn display_name(&self) -> Result<String>;

    fn address(&self) -> Result<String>;

    fn phone(&self) -> Result<String>;

    /// Every vehicle in the inventory, in insertion order
    ///
    /// The view is read-only: backends holding vehicles in memory lend them,
    /// query-backed ones hand out a freshly loaded copy.
    fn all_vehicles(&self) -> Result<Cow<'_, [Vehicle]>>;

    /// Add a vehicle to the inventory
    fn add(&mut self, vehicle: Vehicle) -> Result<()>;

    /// Add several vehicles at once
    fn add_all(&mut self, vehicles: Vec<Vehicle>) -> Result<()>;

    /// Remove a vehicle from the inventory
    ///
    /// Returns `Ok(false)` when nothing matched; that is not an error.
    fn remove(&mut self, vehicle: &Vehicle) -> Result<bool>;

    /// Remove every vehicle from the inventory
    fn clear(&mut self) -> Result<()>;
}

/// A collection of recorded contracts
pub trait ContractList {
    fn add(&mut self, contract: Contract) -> Result<()>;

    /// Returns `Ok(false)` when the contract was not present
    fn remove(&mut self, contract: &Contract) -> Result<bool>;

    /// Every recorded contract
    fn contracts(&self) -> Result<Cow<'_, [Contract]>>;
}
