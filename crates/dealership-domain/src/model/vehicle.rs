//! Vehicle record and its text row codec

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FIELD_SEPARATOR;

/// Number of fields in an encoded vehicle row
pub const VEHICLE_FIELD_COUNT: usize = 8;

/// A vehicle in a dealership's inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Vehicle identification number, the de-facto unique key
    pub vin: u32,
    /// Model year
    pub year: i32,
    pub make: String,
    pub model: String,
    /// Body type (e.g. "SUV", "Truck")
    pub vehicle_type: String,
    pub color: String,
    /// Odometer reading in miles
    pub odometer: u32,
    pub price: f64,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vin: u32,
        year: i32,
        make: impl Into<String>,
        model: impl Into<String>,
        vehicle_type: impl Into<String>,
        color: impl Into<String>,
        odometer: u32,
        price: f64,
    ) -> Self {
        Self {
            vin,
            year,
            make: make.into(),
            model: model.into(),
            vehicle_type: vehicle_type.into(),
            color: color.into(),
            odometer,
            price,
        }
    }

    /// Encode as `vin|year|make|model|type|color|odometer|price`
    ///
    /// The price is always written with two fractional digits.
    pub fn to_csv(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|{}|{:.2}",
            self.vin,
            self.year,
            self.make,
            self.model,
            self.vehicle_type,
            self.color,
            self.odometer,
            self.price
        )
    }

    /// Decode a row produced by [`Vehicle::to_csv`]
    ///
    /// Returns `None` for rows with the wrong number of fields or with
    /// unparsable numeric fields, so batches can simply skip them.
    pub fn from_csv(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != VEHICLE_FIELD_COUNT {
            return None;
        }

        let vin = fields[0].parse().ok()?;
        let year = fields[1].parse().ok()?;
        let odometer = fields[6].parse().ok()?;
        let price = fields[7].parse().ok()?;

        Some(Self {
            vin,
            year,
            make: fields[2].to_string(),
            model: fields[3].to_string(),
            vehicle_type: fields[4].to_string(),
            color: fields[5].to_string(),
            odometer,
            price,
        })
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${:.2} - {} - {} {} {} {} ({}), {}mi",
            self.price,
            self.vin,
            self.color,
            self.year,
            self.make,
            self.model,
            self.vehicle_type,
            self.odometer
        )
    }
}
