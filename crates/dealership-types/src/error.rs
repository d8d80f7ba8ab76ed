//! Error types for the dealership inventory

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Malformed contract rows
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Empty contract row")]
    Empty,

    #[error("Unknown contract tag \"{0}\"")]
    UnknownTag(String),

    #[error("Bad number of fields for a {kind} contract (expected {expected}, got {got})")]
    FieldCount {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Invalid {field}: \"{value}\"")]
    InvalidField { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Contract format error: {0}")]
    Format(#[from] FormatError),

    #[error("Bad file header when reading {0}")]
    BadHeader(String),

    #[error("Dealership {0} not found")]
    DealershipNotFound(i64),

    #[error("No vehicle with VIN {0} in the inventory")]
    VehicleNotFound(u32),

    #[error("Vehicle {vin} from {year} is too old to lease")]
    NotLeasable { vin: u32, year: i32 },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;
