//! Sale and lease contracts
//!
//! A contract is a closed sum of [`SaleContract`] and [`LeaseContract`]. Prices,
//! monthly payments and term lengths are always derived from the stored fields.
//!
//! Text rows start with a `SALE` or `LEASE` tag:
//!
//! ```text
//! SALE|date|customer|email|<8 vehicle fields>|salesTax|recordingFee|processingFee|financed
//! LEASE|date|customer|email|<8 vehicle fields>|expectedEndingValue|leaseFee
//! ```

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dealership_types::FormatError;

use super::vehicle::VEHICLE_FIELD_COUNT;
use super::{Vehicle, FIELD_SEPARATOR};

const SALE_TAG: &str = "SALE";
const LEASE_TAG: &str = "LEASE";

/// Tag + date + customer name + email
const COMMON_FIELD_COUNT: usize = 4;
const SALE_FIELD_COUNT: usize = COMMON_FIELD_COUNT + VEHICLE_FIELD_COUNT + 4;
const LEASE_FIELD_COUNT: usize = COMMON_FIELD_COUNT + VEHICLE_FIELD_COUNT + 2;

/// Totals above this get the lower financing rate and the longer term
const FINANCING_THRESHOLD: f64 = 10_000.0;
const FINANCING_RATE_HIGH_TOTAL: f64 = 0.0425;
const FINANCING_RATE_LOW_TOTAL: f64 = 0.0525;
const FINANCING_TERM_HIGH_TOTAL: u32 = 48;
const FINANCING_TERM_LOW_TOTAL: u32 = 24;

const LEASE_MONTHLY_RATE: f64 = 0.04;
const LEASE_TERM_MONTHS: u32 = 36;

/// Contract for a sold vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleContract {
    pub vehicle_sold: Vehicle,
    pub date: NaiveDate,
    pub customer_name: String,
    pub email: String,
    /// Sales tax as a fraction of the vehicle price
    pub sales_tax: f64,
    pub recording_fee: f64,
    pub processing_fee: f64,
    pub financed: bool,
}

impl SaleContract {
    pub fn total_price(&self) -> f64 {
        self.vehicle_sold.price * (1.0 + self.sales_tax) + self.recording_fee + self.processing_fee
    }

    pub fn monthly_payment(&self) -> f64 {
        if !self.financed {
            return 0.0;
        }
        let total = self.total_price();
        if total > FINANCING_THRESHOLD {
            total * FINANCING_RATE_HIGH_TOTAL
        } else {
            total * FINANCING_RATE_LOW_TOTAL
        }
    }

    /// Term length in months, zero when paid outright
    pub fn payment_length(&self) -> u32 {
        if !self.financed {
            return 0;
        }
        if self.total_price() > FINANCING_THRESHOLD {
            FINANCING_TERM_HIGH_TOTAL
        } else {
            FINANCING_TERM_LOW_TOTAL
        }
    }
}

/// Contract for a leased vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseContract {
    pub vehicle_sold: Vehicle,
    pub date: NaiveDate,
    pub customer_name: String,
    pub email: String,
    pub expected_ending_value: f64,
    pub lease_fee: f64,
}

impl LeaseContract {
    pub fn total_price(&self) -> f64 {
        self.vehicle_sold.price + self.lease_fee
    }

    pub fn monthly_payment(&self) -> f64 {
        self.total_price() * LEASE_MONTHLY_RATE
    }

    pub fn payment_length(&self) -> u32 {
        LEASE_TERM_MONTHS
    }
}

/// A recorded sale or lease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Contract {
    Sale(SaleContract),
    Lease(LeaseContract),
}

impl From<SaleContract> for Contract {
    fn from(sale: SaleContract) -> Self {
        Contract::Sale(sale)
    }
}

impl From<LeaseContract> for Contract {
    fn from(lease: LeaseContract) -> Self {
        Contract::Lease(lease)
    }
}

impl Contract {
    pub fn vehicle_sold(&self) -> &Vehicle {
        match self {
            Contract::Sale(sale) => &sale.vehicle_sold,
            Contract::Lease(lease) => &lease.vehicle_sold,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Contract::Sale(sale) => sale.date,
            Contract::Lease(lease) => lease.date,
        }
    }

    pub fn customer_name(&self) -> &str {
        match self {
            Contract::Sale(sale) => &sale.customer_name,
            Contract::Lease(lease) => &lease.customer_name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Contract::Sale(sale) => &sale.email,
            Contract::Lease(lease) => &lease.email,
        }
    }

    pub fn total_price(&self) -> f64 {
        match self {
            Contract::Sale(sale) => sale.total_price(),
            Contract::Lease(lease) => lease.total_price(),
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        match self {
            Contract::Sale(sale) => sale.monthly_payment(),
            Contract::Lease(lease) => lease.monthly_payment(),
        }
    }

    pub fn payment_length(&self) -> u32 {
        match self {
            Contract::Sale(sale) => sale.payment_length(),
            Contract::Lease(lease) => lease.payment_length(),
        }
    }

    /// Leading tag of the text row
    pub fn tag(&self) -> &'static str {
        match self {
            Contract::Sale(_) => SALE_TAG,
            Contract::Lease(_) => LEASE_TAG,
        }
    }

    pub fn to_csv(&self) -> String {
        match self {
            Contract::Sale(sale) => format!(
                "{}|{}|{}|{}|{}|{}|{}|{}|{}",
                SALE_TAG,
                sale.date,
                sale.customer_name,
                sale.email,
                sale.vehicle_sold.to_csv(),
                sale.sales_tax,
                sale.recording_fee,
                sale.processing_fee,
                sale.financed
            ),
            Contract::Lease(lease) => format!(
                "{}|{}|{}|{}|{}|{}|{}",
                LEASE_TAG,
                lease.date,
                lease.customer_name,
                lease.email,
                lease.vehicle_sold.to_csv(),
                lease.expected_ending_value,
                lease.lease_fee
            ),
        }
    }

    /// Decode a row produced by [`Contract::to_csv`]
    ///
    /// Unlike vehicle rows, a malformed contract row is an error.
    pub fn from_csv(line: &str) -> Result<Self, FormatError> {
        if line.is_empty() {
            return Err(FormatError::Empty);
        }
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

        match fields[0] {
            SALE_TAG => {
                check_field_count("sale", SALE_FIELD_COUNT, fields.len())?;
                let vehicle_end = COMMON_FIELD_COUNT + VEHICLE_FIELD_COUNT;
                Ok(Contract::Sale(SaleContract {
                    date: parse_field("date", fields[1])?,
                    customer_name: fields[2].to_string(),
                    email: fields[3].to_string(),
                    vehicle_sold: parse_vehicle(&fields[COMMON_FIELD_COUNT..vehicle_end])?,
                    sales_tax: parse_field("sales tax", fields[vehicle_end])?,
                    recording_fee: parse_field("recording fee", fields[vehicle_end + 1])?,
                    processing_fee: parse_field("processing fee", fields[vehicle_end + 2])?,
                    financed: parse_field("financed flag", fields[vehicle_end + 3])?,
                }))
            }
            LEASE_TAG => {
                check_field_count("lease", LEASE_FIELD_COUNT, fields.len())?;
                let vehicle_end = COMMON_FIELD_COUNT + VEHICLE_FIELD_COUNT;
                Ok(Contract::Lease(LeaseContract {
                    date: parse_field("date", fields[1])?,
                    customer_name: fields[2].to_string(),
                    email: fields[3].to_string(),
                    vehicle_sold: parse_vehicle(&fields[COMMON_FIELD_COUNT..vehicle_end])?,
                    expected_ending_value: parse_field(
                        "expected ending value",
                        fields[vehicle_end],
                    )?,
                    lease_fee: parse_field("lease fee", fields[vehicle_end + 1])?,
                }))
            }
            other => Err(FormatError::UnknownTag(other.to_string())),
        }
    }
}

fn check_field_count(kind: &'static str, expected: usize, got: usize) -> Result<(), FormatError> {
    if expected == got {
        Ok(())
    } else {
        Err(FormatError::FieldCount {
            kind,
            expected,
            got,
        })
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, FormatError> {
    value.parse().map_err(|_| FormatError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn parse_vehicle(fields: &[&str]) -> Result<Vehicle, FormatError> {
    let row = fields.join("|");
    Vehicle::from_csv(&row).ok_or(FormatError::InvalidField {
        field: "vehicle",
        value: row,
    })
}
