//! Standard terms applied when the dealership writes a contract

use chrono::{Datelike, NaiveDate};

use crate::model::{LeaseContract, SaleContract, Vehicle};

pub const STANDARD_SALES_TAX: f64 = 0.05;
pub const STANDARD_RECORDING_FEE: f64 = 100.0;

/// Vehicles priced below this pay the lower processing fee
pub const PROCESSING_FEE_THRESHOLD: f64 = 10_000.0;
pub const PROCESSING_FEE_LOW: f64 = 295.0;
pub const PROCESSING_FEE_HIGH: f64 = 495.0;

pub const LEASE_RESIDUAL_RATE: f64 = 0.5;
pub const LEASE_FEE_RATE: f64 = 0.07;

/// Vehicles more than this many model years old cannot be leased
pub const MAX_LEASE_AGE_YEARS: i32 = 3;

pub fn processing_fee(price: f64) -> f64 {
    if price < PROCESSING_FEE_THRESHOLD {
        PROCESSING_FEE_LOW
    } else {
        PROCESSING_FEE_HIGH
    }
}

/// Sale contract with the standard tax and fees
pub fn standard_sale(
    vehicle: Vehicle,
    customer_name: impl Into<String>,
    email: impl Into<String>,
    date: NaiveDate,
    financed: bool,
) -> SaleContract {
    SaleContract {
        processing_fee: processing_fee(vehicle.price),
        vehicle_sold: vehicle,
        date,
        customer_name: customer_name.into(),
        email: email.into(),
        sales_tax: STANDARD_SALES_TAX,
        recording_fee: STANDARD_RECORDING_FEE,
        financed,
    }
}

/// Lease contract valuing the vehicle at half its price at lease end
pub fn standard_lease(
    vehicle: Vehicle,
    customer_name: impl Into<String>,
    email: impl Into<String>,
    date: NaiveDate,
) -> LeaseContract {
    LeaseContract {
        expected_ending_value: vehicle.price * LEASE_RESIDUAL_RATE,
        lease_fee: vehicle.price * LEASE_FEE_RATE,
        vehicle_sold: vehicle,
        date,
        customer_name: customer_name.into(),
        email: email.into(),
    }
}

pub fn can_lease(vehicle: &Vehicle, today: NaiveDate) -> bool {
    vehicle.year + MAX_LEASE_AGE_YEARS >= today.year()
}
