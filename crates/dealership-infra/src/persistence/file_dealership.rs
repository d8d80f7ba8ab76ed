//! Text-file decorator over another dealership
//!
//! Layout of the resource:
//!
//! ```text
//! name|address|phone
//! vin|year|make|model|type|color|odometer|price
//! ...
//! ```
//!
//! Additions are appended; removals and clears rewrite the whole resource.

use std::borrow::Cow;

use dealership_domain::model::FIELD_SEPARATOR;
use dealership_domain::{Dealership, Vehicle};
use dealership_types::{Error, Result};
use tracing::{debug, info, warn};

use super::resource::{append_rows, overwrite_lines, read_lines, TextResource};

const HEADER_FIELD_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
struct Identity {
    display_name: String,
    address: String,
    phone: String,
}

impl Identity {
    fn from_header(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != HEADER_FIELD_COUNT {
            return None;
        }
        Some(Self {
            display_name: fields[0].to_string(),
            address: fields[1].to_string(),
            phone: fields[2].to_string(),
        })
    }

    fn from_dealership(dealership: &impl Dealership) -> Result<Option<Self>> {
        let identity = Self {
            display_name: dealership.display_name()?,
            address: dealership.address()?,
            phone: dealership.phone()?,
        };
        let complete = !identity.display_name.is_empty()
            && !identity.address.is_empty()
            && !identity.phone.is_empty();
        Ok(complete.then_some(identity))
    }

    fn header(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.display_name,
            self.address,
            self.phone,
            sep = FIELD_SEPARATOR
        )
    }
}

/// Dealership persisted to a text resource
///
/// Owns the wrapped dealership; every mutation goes to the wrapped value
/// first and is then mirrored to the resource.
pub struct FileBackedDealership<D: Dealership, R: TextResource> {
    wrapped: D,
    resource: R,
    identity: Identity,
}

impl<D: Dealership, R: TextResource> FileBackedDealership<D, R> {
    /// Load the resource into `wrapped`
    ///
    /// When the resource has no usable header, the wrapped dealership's
    /// identity is used instead, its vehicles are kept, and the resource is
    /// rewritten. Rows that do not decode are dropped and also trigger a
    /// rewrite.
    pub fn open(mut wrapped: D, resource: R) -> Result<Self> {
        let lines = read_lines(&resource)?;
        let mut rows = lines.iter();

        let (identity, synthesized) = match rows.next().and_then(|h| Identity::from_header(h)) {
            Some(identity) => (identity, false),
            None => match Identity::from_dealership(&wrapped)? {
                Some(identity) => {
                    warn!(
                        "No usable header in {}, using dealership \"{}\"",
                        resource.describe(),
                        identity.display_name
                    );
                    (identity, true)
                }
                None => return Err(Error::BadHeader(resource.describe())),
            },
        };

        let mut dropped = 0usize;
        let vehicles: Vec<Vehicle> = rows
            .filter_map(|line| {
                let vehicle = Vehicle::from_csv(line);
                if vehicle.is_none() {
                    warn!("Dropping unreadable vehicle row: {line}");
                    dropped += 1;
                }
                vehicle
            })
            .collect();

        if !synthesized {
            wrapped.clear()?;
        }
        if !vehicles.is_empty() {
            wrapped.add_all(vehicles)?;
        }

        let dealership = Self {
            wrapped,
            resource,
            identity,
        };

        if synthesized || dropped > 0 {
            dealership.rewrite()?;
        }

        info!(
            "Opened dealership \"{}\" from {}",
            dealership.identity.display_name,
            dealership.resource.describe()
        );
        Ok(dealership)
    }

    pub fn wrapped(&self) -> &D {
        &self.wrapped
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    fn rewrite(&self) -> Result<()> {
        let vehicles = self.wrapped.all_vehicles()?;
        debug!(
            "Rewriting {} with {} vehicles",
            self.resource.describe(),
            vehicles.len()
        );
        let lines = std::iter::once(self.identity.header()).chain(vehicles.iter().map(Vehicle::to_csv));
        overwrite_lines(&self.resource, lines)?;
        Ok(())
    }
}

impl<D: Dealership, R: TextResource> Dealership for FileBackedDealership<D, R> {
    fn display_name(&self) -> Result<String> {
        Ok(self.identity.display_name.clone())
    }

    fn address(&self) -> Result<String> {
        Ok(self.identity.address.clone())
    }

    fn phone(&self) -> Result<String> {
        Ok(self.identity.phone.clone())
    }

    fn all_vehicles(&self) -> Result<Cow<'_, [Vehicle]>> {
        self.wrapped.all_vehicles()
    }

    fn add(&mut self, vehicle: Vehicle) -> Result<()> {
        let row = vehicle.to_csv();
        self.wrapped.add(vehicle)?;
        append_rows(&self.resource, [row])?;
        Ok(())
    }

    fn add_all(&mut self, vehicles: Vec<Vehicle>) -> Result<()> {
        let rows: Vec<String> = vehicles.iter().map(Vehicle::to_csv).collect();
        self.wrapped.add_all(vehicles)?;
        append_rows(&self.resource, rows)?;
        Ok(())
    }

    fn remove(&mut self, vehicle: &Vehicle) -> Result<bool> {
        let removed = self.wrapped.remove(vehicle)?;
        if removed {
            self.rewrite()?;
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        self.wrapped.clear()?;
        self.rewrite()
    }
}
