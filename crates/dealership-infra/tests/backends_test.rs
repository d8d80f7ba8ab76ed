//! Integration tests for the persistence backends

use std::fs;
use std::rc::Rc;

use chrono::NaiveDate;
use dealership_domain::service::{filters, standard_lease, standard_sale};
use dealership_domain::{Contract, ContractList, Dealership, Vehicle};
use dealership_infra::persistence::{
    open_database, open_memory, FileBackedContractList, FileBackedDealership, FileResource,
    InMemoryDealership, SqliteDealership, LINE_ENDING,
};
use dealership_types::Error;
use tempfile::tempdir;

fn civic() -> Vehicle {
    Vehicle::new(10112, 1993, "Honda", "Civic", "SUV", "Red", 1_000_001, 1995.0)
}

fn prius() -> Vehicle {
    Vehicle::new(37846, 2021, "Toyota", "Prius", "Hatchback", "White", 6700, 20000.0)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

#[test]
fn test_file_dealership_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("inventory.csv");

    {
        let wrapped = InMemoryDealership::new("D & B Used Cars", "111 Old Benbrook Rd", "817-555-5555");
        let mut dealership = FileBackedDealership::open(wrapped, FileResource::new(&path)).unwrap();
        dealership.add(civic()).unwrap();
        dealership.add_all(vec![prius(), civic()]).unwrap();
        assert!(dealership.remove(&civic()).unwrap());
    }

    let expected = [
        "D & B Used Cars|111 Old Benbrook Rd|817-555-5555",
        "37846|2021|Toyota|Prius|Hatchback|White|6700|20000.00",
        "10112|1993|Honda|Civic|SUV|Red|1000001|1995.00",
    ]
    .join(LINE_ENDING);
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);

    let reopened =
        FileBackedDealership::open(InMemoryDealership::default(), FileResource::new(&path)).unwrap();
    assert_eq!(reopened.display_name().unwrap(), "D & B Used Cars");
    assert_eq!(&*reopened.all_vehicles().unwrap(), &[prius(), civic()]);
}

#[test]
fn test_file_dealership_without_identity_fails() {
    let dir = tempdir().unwrap();
    let result = FileBackedDealership::open(
        InMemoryDealership::default(),
        FileResource::new(dir.path().join("missing.csv")),
    );
    assert!(matches!(result, Err(Error::BadHeader(_))));
}

#[test]
fn test_file_contracts_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contracts.csv");
    let sale: Contract = standard_sale(prius(), "Dana Scully", "dana@example.com", date(), true).into();
    let lease: Contract = standard_lease(prius(), "Fox Mulder", "fox@example.com", date()).into();

    {
        let mut list = FileBackedContractList::open(FileResource::new(&path)).unwrap();
        list.add(sale.clone()).unwrap();
        list.add(lease.clone()).unwrap();
    }

    let reopened = FileBackedContractList::open(FileResource::new(&path)).unwrap();
    let contracts = reopened.contracts().unwrap();
    assert_eq!(&*contracts, &[sale, lease]);

    let Contract::Sale(sale) = &contracts[0] else {
        panic!("expected a sale");
    };
    assert!(sale.financed);
    assert!((sale.total_price() - 21595.0).abs() < 1e-9);
}

#[test]
fn test_availability_against_file_contracts() {
    let dir = tempdir().unwrap();
    let mut list = FileBackedContractList::open(FileResource::new(dir.path().join("c.csv"))).unwrap();
    list.add(standard_lease(prius(), "Ann", "ann@example.com", date()).into())
        .unwrap();

    let contracts = list.contracts().unwrap();
    let available = filters::available(&contracts);
    assert!(!available.matches(&prius()));
    assert!(available.matches(&civic()));
}

#[test]
fn test_sqlite_dealership_persists_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dealership.db");

    let id = {
        let conn = open_database(&path).unwrap();
        let id = SqliteDealership::register(&conn, "Lot", "Addr", "Phone").unwrap();
        let mut dealership = SqliteDealership::open(Rc::new(conn), id).unwrap();
        dealership.add_all(vec![civic(), prius()]).unwrap();
        dealership
            .contract_list()
            .add(standard_sale(prius(), "Bob", "bob@example.com", date(), false).into())
            .unwrap();
        id
    };

    let dealership = SqliteDealership::open(Rc::new(open_database(&path).unwrap()), id).unwrap();
    assert_eq!(&*dealership.all_vehicles().unwrap(), &[civic(), prius()]);

    let contracts = dealership.contract_list().contracts().unwrap().into_owned();
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0].customer_name(), "Bob");
    assert_eq!(contracts[0].email(), "bob@example.com");
}

#[test]
fn test_sqlite_clear_always_fails() {
    let conn = open_memory().unwrap();
    let id = SqliteDealership::register(&conn, "Lot", "Addr", "Phone").unwrap();
    let mut dealership = SqliteDealership::open(Rc::new(conn), id).unwrap();

    assert!(matches!(dealership.clear(), Err(Error::Unsupported(_))));
    dealership.add(civic()).unwrap();
    assert!(matches!(dealership.clear(), Err(Error::Unsupported(_))));
}

#[test]
fn test_dealerships_share_database_but_not_inventory() {
    let conn = Rc::new(open_memory().unwrap());
    let first = SqliteDealership::register(&conn, "First", "A", "1").unwrap();
    let second = SqliteDealership::register(&conn, "Second", "B", "2").unwrap();

    let mut a = SqliteDealership::open(Rc::clone(&conn), first).unwrap();
    let b = SqliteDealership::open(Rc::clone(&conn), second).unwrap();
    a.add(civic()).unwrap();

    assert_eq!(a.all_vehicles().unwrap().len(), 1);
    assert!(b.all_vehicles().unwrap().is_empty());
    assert_eq!(b.display_name().unwrap(), "Second");
}
