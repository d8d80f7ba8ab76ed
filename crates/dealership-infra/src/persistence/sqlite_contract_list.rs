//! SQLite-backed contract list

use std::borrow::Cow;
use std::rc::Rc;

use dealership_domain::{Contract, ContractList, LeaseContract, SaleContract};
use dealership_types::Result;
use rusqlite::{params, Connection};
use tracing::debug;

use super::sqlite_dealership::{insert_vehicle, vehicle_from_row, VEHICLE_COLUMNS};

/// Sale and lease contracts stored in their own tables
///
/// Contracts are keyed by VIN: removing one deletes every contract of the
/// same kind for that vehicle.
pub struct SqliteContractList {
    conn: Rc<Connection>,
}

impl SqliteContractList {
    pub fn new(conn: Rc<Connection>) -> Self {
        Self { conn }
    }

    fn sales(&self) -> Result<Vec<Contract>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT s.sale_date, s.customer_name, s.email, s.sales_tax, s.recording_fee,
                    s.processing_fee, s.financed, {VEHICLE_COLUMNS}
             FROM sales_contracts s JOIN vehicles v ON v.vin = s.vin
             ORDER BY s.contract_id"
        ))?;
        let sales = stmt
            .query_map([], |row| {
                Ok(Contract::Sale(SaleContract {
                    date: row.get(0)?,
                    customer_name: row.get(1)?,
                    email: row.get(2)?,
                    sales_tax: row.get(3)?,
                    recording_fee: row.get(4)?,
                    processing_fee: row.get(5)?,
                    financed: row.get(6)?,
                    vehicle_sold: vehicle_from_row(row, 7)?,
                }))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sales)
    }

    fn leases(&self) -> Result<Vec<Contract>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT l.lease_date, l.customer_name, l.email, l.expected_ending_value, l.lease_fee,
                    {VEHICLE_COLUMNS}
             FROM lease_contracts l JOIN vehicles v ON v.vin = l.vin
             ORDER BY l.contract_id"
        ))?;
        let leases = stmt
            .query_map([], |row| {
                Ok(Contract::Lease(LeaseContract {
                    date: row.get(0)?,
                    customer_name: row.get(1)?,
                    email: row.get(2)?,
                    expected_ending_value: row.get(3)?,
                    lease_fee: row.get(4)?,
                    vehicle_sold: vehicle_from_row(row, 5)?,
                }))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(leases)
    }
}

impl ContractList for SqliteContractList {
    fn add(&mut self, contract: Contract) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        insert_vehicle(&tx, contract.vehicle_sold(), true)?;
        match &contract {
            Contract::Sale(sale) => tx.execute(
                "INSERT INTO sales_contracts
                     (vin, sale_date, customer_name, email, sales_tax, recording_fee, processing_fee, financed)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    sale.vehicle_sold.vin,
                    sale.date,
                    sale.customer_name,
                    sale.email,
                    sale.sales_tax,
                    sale.recording_fee,
                    sale.processing_fee,
                    sale.financed
                ],
            )?,
            Contract::Lease(lease) => tx.execute(
                "INSERT INTO lease_contracts
                     (vin, lease_date, customer_name, email, expected_ending_value, lease_fee, payment_length)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    lease.vehicle_sold.vin,
                    lease.date,
                    lease.customer_name,
                    lease.email,
                    lease.expected_ending_value,
                    lease.lease_fee,
                    lease.payment_length()
                ],
            )?,
        };
        tx.commit()?;
        debug!("Recorded {} contract for vehicle {}", contract.tag(), contract.vehicle_sold().vin);
        Ok(())
    }

    fn remove(&mut self, contract: &Contract) -> Result<bool> {
        let table = match contract {
            Contract::Sale(_) => "sales_contracts",
            Contract::Lease(_) => "lease_contracts",
        };
        let tx = self.conn.unchecked_transaction()?;
        let deleted = tx.execute(
            &format!("DELETE FROM {table} WHERE vin = ?1"),
            [contract.vehicle_sold().vin],
        )?;
        if deleted == 0 {
            return Ok(false);
        }
        tx.commit()?;
        debug!("Removed {deleted} rows from {table}");
        Ok(true)
    }

    /// Sales first, then leases, each in insertion order
    fn contracts(&self) -> Result<Cow<'_, [Contract]>> {
        let mut contracts = self.sales()?;
        contracts.extend(self.leases()?);
        Ok(Cow::Owned(contracts))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use dealership_domain::service::{standard_lease, standard_sale};
    use dealership_domain::{Dealership, Vehicle};

    use super::*;
    use crate::persistence::schema::open_memory;
    use crate::persistence::SqliteDealership;

    fn vehicle(vin: u32) -> Vehicle {
        Vehicle::new(vin, 2023, "Kia", "Niro", "SUV", "Gray", 5000, 27000.0)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn setup() -> (SqliteDealership, SqliteContractList) {
        let conn = open_memory().unwrap();
        let id = SqliteDealership::register(&conn, "Lot", "Addr", "Phone").unwrap();
        let dealership = SqliteDealership::open(Rc::new(conn), id).unwrap();
        let contracts = dealership.contract_list();
        (dealership, contracts)
    }

    #[test]
    fn test_contracts_read_back_with_customer() {
        let (mut dealership, mut list) = setup();
        dealership.add_all(vec![vehicle(1), vehicle(2)]).unwrap();

        let lease: Contract = standard_lease(vehicle(2), "Ann", "ann@example.com", date()).into();
        let sale: Contract = standard_sale(vehicle(1), "Bob", "bob@example.com", date(), true).into();
        list.add(lease.clone()).unwrap();
        list.add(sale.clone()).unwrap();

        assert_eq!(&*list.contracts().unwrap(), &[sale, lease]);
    }

    #[test]
    fn test_contract_for_unlisted_vehicle_still_readable() {
        let (_dealership, mut list) = setup();
        let sale: Contract = standard_sale(vehicle(7), "Cy", "cy@example.com", date(), false).into();
        list.add(sale.clone()).unwrap();
        assert_eq!(&*list.contracts().unwrap(), &[sale]);
    }

    #[test]
    fn test_remove_by_kind_and_vin() {
        let (mut dealership, mut list) = setup();
        dealership.add(vehicle(1)).unwrap();
        let sale: Contract = standard_sale(vehicle(1), "Bob", "bob@example.com", date(), false).into();
        let lease: Contract = standard_lease(vehicle(1), "Bob", "bob@example.com", date()).into();
        list.add(sale.clone()).unwrap();

        assert!(!list.remove(&lease).unwrap());
        assert!(list.remove(&sale).unwrap());
        assert!(list.contracts().unwrap().is_empty());
    }

    #[test]
    fn test_removing_vehicle_drops_its_contracts() {
        let (mut dealership, mut list) = setup();
        dealership.add(vehicle(1)).unwrap();
        list.add(standard_lease(vehicle(1), "Ann", "ann@example.com", date()).into())
            .unwrap();

        assert!(dealership.remove(&vehicle(1)).unwrap());
        assert!(list.contracts().unwrap().is_empty());
    }
}
