//! Inventory Service - search, stock, and contract use cases
//!
//! Search results only ever contain vehicles that no contract references.

use chrono::NaiveDate;
use dealership_domain::service::filters::{self, VehicleFilter};
use dealership_domain::service::{can_lease, standard_lease, standard_sale};
use dealership_domain::{Contract, ContractList, Dealership, Vehicle};
use dealership_types::{Error, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::repository::{open_session, Session};

/// Optional criteria for a vehicle search; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub color: Option<String>,
    pub min_odometer: Option<u32>,
    pub max_odometer: Option<u32>,
    pub vehicle_type: Option<String>,
    pub vin: Option<u32>,
}

impl SearchQuery {
    /// Combined filter for every criterion that is set
    pub fn to_filter(&self) -> VehicleFilter<'static> {
        let text = |value: &Option<String>, factory: fn(&str) -> VehicleFilter<'static>| {
            value.as_deref().filter(|s| !s.trim().is_empty()).map(factory)
        };

        filters::all_of(
            [
                self.min_price.map(filters::min_price),
                self.max_price.map(filters::max_price),
                text(&self.make, filters::make),
                text(&self.model, filters::model),
                self.min_year.map(filters::min_year),
                self.max_year.map(filters::max_year),
                text(&self.color, filters::color),
                self.min_odometer.map(filters::min_odometer),
                self.max_odometer.map(filters::max_odometer),
                text(&self.vehicle_type, filters::vehicle_type),
                self.vin.map(filters::vin),
            ]
            .into_iter()
            .flatten(),
        )
    }
}

/// Use cases over one dealership and its contract list
pub struct InventoryService {
    dealership: Box<dyn Dealership>,
    contracts: Box<dyn ContractList>,
}

impl InventoryService {
    pub fn new(dealership: Box<dyn Dealership>, contracts: Box<dyn ContractList>) -> Self {
        Self {
            dealership,
            contracts,
        }
    }

    /// Open the configured backend
    pub fn open(config: &Config) -> Result<Self> {
        let Session {
            dealership,
            contracts,
        } = open_session(config)?;
        info!("Using {} backend", config.backend);
        Ok(Self::new(dealership, contracts))
    }

    pub fn dealership(&self) -> &dyn Dealership {
        self.dealership.as_ref()
    }

    /// Available vehicles accepted by `filter`, in inventory order
    pub fn search(&self, filter: VehicleFilter<'_>) -> Result<Vec<Vehicle>> {
        let contracts = self.contracts.contracts()?;
        let filter = filter & filters::available(&contracts);
        let vehicles = self.dealership.all_vehicles()?;
        let found = filter.apply(&vehicles);
        debug!("Search matched {} of {} vehicles", found.len(), vehicles.len());
        Ok(found)
    }

    pub fn search_query(&self, query: &SearchQuery) -> Result<Vec<Vehicle>> {
        self.search(query.to_filter())
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<()> {
        info!("Adding vehicle {}", vehicle.vin);
        self.dealership.add(vehicle)
    }

    /// Remove each of `vehicles`, returning how many were actually removed
    pub fn remove_vehicles(&mut self, vehicles: &[Vehicle]) -> Result<usize> {
        let mut removed = 0;
        for vehicle in vehicles {
            if self.dealership.remove(vehicle)? {
                removed += 1;
            }
        }
        info!("Removed {removed} vehicles");
        Ok(removed)
    }

    /// First vehicle in the inventory with this VIN, contracted or not
    pub fn find_by_vin(&self, vin: u32) -> Result<Option<Vehicle>> {
        let vehicles = self.dealership.all_vehicles()?;
        Ok(vehicles.iter().find(|v| v.vin == vin).cloned())
    }

    /// Record a sale with the standard tax and fees
    pub fn sell(
        &mut self,
        vin: u32,
        customer_name: &str,
        email: &str,
        financed: bool,
        date: NaiveDate,
    ) -> Result<Contract> {
        let vehicle = self.find_by_vin(vin)?.ok_or(Error::VehicleNotFound(vin))?;
        let contract = Contract::from(standard_sale(vehicle, customer_name, email, date, financed));
        self.contracts.add(contract.clone())?;
        info!("Sold vehicle {vin} to {customer_name}");
        Ok(contract)
    }

    /// Record a lease with the standard terms; the vehicle must be recent
    /// enough on `date`
    pub fn lease(&mut self, vin: u32, customer_name: &str, email: &str, date: NaiveDate) -> Result<Contract> {
        let vehicle = self.find_by_vin(vin)?.ok_or(Error::VehicleNotFound(vin))?;
        if !can_lease(&vehicle, date) {
            return Err(Error::NotLeasable {
                vin,
                year: vehicle.year,
            });
        }
        let contract = Contract::from(standard_lease(vehicle, customer_name, email, date));
        self.contracts.add(contract.clone())?;
        info!("Leased vehicle {vin} to {customer_name}");
        Ok(contract)
    }

    pub fn contracts(&self) -> Result<Vec<Contract>> {
        Ok(self.contracts.contracts()?.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use dealership_infra::persistence::{InMemoryContractList, InMemoryDealership};

    use super::*;

    fn service() -> InventoryService {
        let mut dealership = InMemoryDealership::new("Lot", "Addr", "Phone");
        dealership
            .add_all(vec![
                Vehicle::new(1, 2023, "Toyota", "Corolla", "Sedan", "Silver", 9000, 21000.0),
                Vehicle::new(2, 2015, "Ford", "F-150", "Truck", "Black", 120000, 14000.0),
                Vehicle::new(3, 2021, "Toyota", "RAV4", "SUV", "Blue", 30000, 26000.0),
            ])
            .unwrap();
        InventoryService::new(Box::new(dealership), Box::new(InMemoryContractList::new()))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()
    }

    fn vins(vehicles: &[Vehicle]) -> Vec<u32> {
        vehicles.iter().map(|v| v.vin).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let service = service();
        assert_eq!(vins(&service.search_query(&SearchQuery::default()).unwrap()), vec![1, 2, 3]);
    }

    #[test]
    fn test_query_combines_criteria() {
        let service = service();
        let query = SearchQuery {
            make: Some("toyota".to_string()),
            max_price: Some(25000.0),
            ..SearchQuery::default()
        };
        assert_eq!(vins(&service.search_query(&query).unwrap()), vec![1]);
    }

    #[test]
    fn test_blank_text_criteria_ignored() {
        let service = service();
        let query = SearchQuery {
            color: Some("  ".to_string()),
            ..SearchQuery::default()
        };
        assert_eq!(service.search_query(&query).unwrap().len(), 3);
    }

    #[test]
    fn test_sold_vehicle_hidden_from_search() {
        let mut service = service();
        service.sell(1, "Ann", "ann@example.com", false, today()).unwrap();

        assert_eq!(vins(&service.search(filters::all()).unwrap()), vec![2, 3]);
        assert!(service.find_by_vin(1).unwrap().is_some());
    }

    #[test]
    fn test_sale_uses_standard_terms() {
        let mut service = service();
        let contract = service.sell(3, "Ann", "ann@example.com", true, today()).unwrap();

        let Contract::Sale(sale) = &contract else {
            panic!("expected a sale");
        };
        assert_eq!(sale.processing_fee, 495.0);
        assert_eq!(sale.sales_tax, 0.05);
        assert_eq!(service.contracts().unwrap(), vec![contract]);
    }

    #[test]
    fn test_unknown_vin_rejected() {
        let mut service = service();
        assert!(matches!(
            service.sell(99, "Ann", "ann@example.com", false, today()),
            Err(Error::VehicleNotFound(99))
        ));
        assert!(service.contracts().unwrap().is_empty());
    }

    #[test]
    fn test_old_vehicle_cannot_be_leased() {
        let mut service = service();
        assert!(matches!(
            service.lease(2, "Bo", "bo@example.com", today()),
            Err(Error::NotLeasable { vin: 2, year: 2015 })
        ));

        let lease = service.lease(3, "Bo", "bo@example.com", today()).unwrap();
        assert_eq!(lease.payment_length(), 36);
    }

    #[test]
    fn test_remove_vehicles_counts_removals() {
        let mut service = service();
        let found = service
            .search_query(&SearchQuery {
                make: Some("Toyota".to_string()),
                ..SearchQuery::default()
            })
            .unwrap();

        assert_eq!(service.remove_vehicles(&found).unwrap(), 2);
        assert_eq!(vins(&service.search(filters::all()).unwrap()), vec![2]);
    }
}
