//! SQLite-backed dealership
//!
//! Nothing is cached: every read runs a query, every mutation commits its
//! own transaction.

use std::borrow::Cow;
use std::rc::Rc;

use dealership_domain::{Dealership, Vehicle};
use dealership_types::{Error, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::sqlite_contract_list::SqliteContractList;

pub(super) const VEHICLE_COLUMNS: &str =
    "v.vin, v.year, v.make, v.model, v.vehicle_type, v.color, v.odometer, v.price";

/// Build a vehicle from the eight `VEHICLE_COLUMNS` starting at `start`
pub(super) fn vehicle_from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        vin: row.get(start)?,
        year: row.get(start + 1)?,
        make: row.get(start + 2)?,
        model: row.get(start + 3)?,
        vehicle_type: row.get(start + 4)?,
        color: row.get(start + 5)?,
        odometer: row.get(start + 6)?,
        price: row.get(start + 7)?,
    })
}

pub(super) fn insert_vehicle(conn: &Connection, vehicle: &Vehicle, if_missing: bool) -> rusqlite::Result<usize> {
    let verb = if if_missing { "INSERT OR IGNORE" } else { "INSERT" };
    conn.execute(
        &format!(
            "{verb} INTO vehicles (vin, year, make, model, vehicle_type, color, odometer, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        ),
        params![
            vehicle.vin,
            vehicle.year,
            vehicle.make,
            vehicle.model,
            vehicle.vehicle_type,
            vehicle.color,
            vehicle.odometer,
            vehicle.price
        ],
    )
}

/// Dealership row plus its inventory in a SQLite database
pub struct SqliteDealership {
    conn: Rc<Connection>,
    id: i64,
}

impl SqliteDealership {
    /// Insert a new dealership row and return its id
    pub fn register(conn: &Connection, name: &str, address: &str, phone: &str) -> Result<i64> {
        conn.execute(
            "INSERT INTO dealerships (name, address, phone) VALUES (?1, ?2, ?3)",
            params![name, address, phone],
        )?;
        let id = conn.last_insert_rowid();
        info!("Registered dealership \"{name}\" with id {id}");
        Ok(id)
    }

    pub fn open(conn: Rc<Connection>, id: i64) -> Result<Self> {
        let exists: Option<i64> = conn
            .query_row(
                "SELECT dealership_id FROM dealerships WHERE dealership_id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(Error::DealershipNotFound(id));
        }
        debug!("Opened dealership {id}");
        Ok(Self { conn, id })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Contract list stored in the same database
    pub fn contract_list(&self) -> SqliteContractList {
        SqliteContractList::new(Rc::clone(&self.conn))
    }

    fn identity_field(&self, column: &str) -> Result<String> {
        self.conn
            .query_row(
                &format!("SELECT {column} FROM dealerships WHERE dealership_id = ?1"),
                [self.id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(Error::DealershipNotFound(self.id))
    }

    fn insert_into_inventory(&self, vehicle: &Vehicle) -> rusqlite::Result<()> {
        insert_vehicle(&self.conn, vehicle, false)?;
        self.conn.execute(
            "INSERT INTO inventory (dealership_id, vin) VALUES (?1, ?2)",
            params![self.id, vehicle.vin],
        )?;
        Ok(())
    }
}

impl Dealership for SqliteDealership {
    fn display_name(&self) -> Result<String> {
        self.identity_field("name")
    }

    fn address(&self) -> Result<String> {
        self.identity_field("address")
    }

    fn phone(&self) -> Result<String> {
        self.identity_field("phone")
    }

    fn all_vehicles(&self) -> Result<Cow<'_, [Vehicle]>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {VEHICLE_COLUMNS}
             FROM inventory i JOIN vehicles v ON v.vin = i.vin
             WHERE i.dealership_id = ?1
             ORDER BY i.rowid"
        ))?;
        let vehicles = stmt
            .query_map([self.id], |row| vehicle_from_row(row, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Cow::Owned(vehicles))
    }

    fn add(&mut self, vehicle: Vehicle) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.insert_into_inventory(&vehicle)?;
        tx.commit()?;
        debug!("Added vehicle {} to dealership {}", vehicle.vin, self.id);
        Ok(())
    }

    fn add_all(&mut self, vehicles: Vec<Vehicle>) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for vehicle in &vehicles {
            self.insert_into_inventory(vehicle)?;
        }
        tx.commit()?;
        debug!("Added {} vehicles to dealership {}", vehicles.len(), self.id);
        Ok(())
    }

    /// Delete every row referencing the vehicle's VIN
    fn remove(&mut self, vehicle: &Vehicle) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0;
        for table in ["lease_contracts", "sales_contracts", "inventory", "vehicles"] {
            deleted += tx.execute(&format!("DELETE FROM {table} WHERE vin = ?1"), [vehicle.vin])?;
        }

        if deleted == 0 {
            return Ok(false);
        }
        tx.commit()?;
        debug!("Removed vehicle {} ({deleted} rows)", vehicle.vin);
        Ok(true)
    }

    fn clear(&mut self) -> Result<()> {
        Err(Error::Unsupported(
            "clearing a database-backed dealership".to_string(),
        ))
    }
}
