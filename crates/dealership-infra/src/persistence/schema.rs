//! SQLite schema bootstrap
//!
//! Tables are created when missing. There is no migration support: an
//! existing database with a different layout is used as-is.

use std::path::Path;

use dealership_types::Result;
use rusqlite::Connection;
use tracing::info;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS dealerships (
    dealership_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    address       TEXT NOT NULL,
    phone         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS vehicles (
    vin          INTEGER PRIMARY KEY,
    year         INTEGER NOT NULL,
    make         TEXT NOT NULL,
    model        TEXT NOT NULL,
    vehicle_type TEXT NOT NULL,
    color        TEXT NOT NULL,
    odometer     INTEGER NOT NULL,
    price        REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS inventory (
    dealership_id INTEGER NOT NULL REFERENCES dealerships (dealership_id),
    vin           INTEGER NOT NULL REFERENCES vehicles (vin)
);

CREATE TABLE IF NOT EXISTS sales_contracts (
    contract_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    vin            INTEGER NOT NULL REFERENCES vehicles (vin),
    sale_date      TEXT NOT NULL,
    customer_name  TEXT NOT NULL,
    email          TEXT NOT NULL,
    sales_tax      REAL NOT NULL,
    recording_fee  REAL NOT NULL,
    processing_fee REAL NOT NULL,
    financed       INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS lease_contracts (
    contract_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    vin                   INTEGER NOT NULL REFERENCES vehicles (vin),
    lease_date            TEXT NOT NULL,
    customer_name         TEXT NOT NULL,
    email                 TEXT NOT NULL,
    expected_ending_value REAL NOT NULL,
    lease_fee             REAL NOT NULL,
    payment_length        INTEGER NOT NULL
);
";

/// Open (or create) a database file and make sure every table exists
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    info!("Opened database {}", path.display());
    Ok(conn)
}

/// Fresh in-memory database with every table created
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
