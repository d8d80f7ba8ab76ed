//! In-memory backends

use std::borrow::Cow;

use dealership_domain::{Contract, ContractList, Dealership, Vehicle};
use dealership_types::Result;

/// Dealership whose inventory is a plain list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryDealership {
    display_name: String,
    address: String,
    phone: String,
    inventory: Vec<Vehicle>,
}

impl InMemoryDealership {
    pub fn new(
        display_name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            address: address.into(),
            phone: phone.into(),
            inventory: Vec::new(),
        }
    }
}

impl Dealership for InMemoryDealership {
    fn display_name(&self) -> Result<String> {
        Ok(self.display_name.clone())
    }

    fn address(&self) -> Result<String> {
        Ok(self.address.clone())
    }

    fn phone(&self) -> Result<String> {
        Ok(self.phone.clone())
    }

    fn all_vehicles(&self) -> Result<Cow<'_, [Vehicle]>> {
        Ok(Cow::Borrowed(&self.inventory))
    }

    fn add(&mut self, vehicle: Vehicle) -> Result<()> {
        self.inventory.push(vehicle);
        Ok(())
    }

    fn add_all(&mut self, vehicles: Vec<Vehicle>) -> Result<()> {
        self.inventory.extend(vehicles);
        Ok(())
    }

    /// Removes the first vehicle equal in every field
    fn remove(&mut self, vehicle: &Vehicle) -> Result<bool> {
        match self.inventory.iter().position(|v| v == vehicle) {
            Some(index) => {
                self.inventory.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.inventory.clear();
        Ok(())
    }
}

/// Contract list held in a plain list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryContractList {
    contracts: Vec<Contract>,
}

impl InMemoryContractList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl From<Vec<Contract>> for InMemoryContractList {
    fn from(contracts: Vec<Contract>) -> Self {
        Self { contracts }
    }
}

impl ContractList for InMemoryContractList {
    fn add(&mut self, contract: Contract) -> Result<()> {
        self.contracts.push(contract);
        Ok(())
    }

    fn remove(&mut self, contract: &Contract) -> Result<bool> {
        match self.contracts.iter().position(|c| c == contract) {
            Some(index) => {
                self.contracts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn contracts(&self) -> Result<Cow<'_, [Contract]>> {
        Ok(Cow::Borrowed(&self.contracts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dealership_domain::service::standard_lease;

    const DISPLAY_NAME: &str = "DISPLAY_NAME";
    const ADDRESS: &str = "ADDRESS";
    const PHONE: &str = "PHONE";

    fn dummy() -> Vehicle {
        Vehicle::new(0, 0, "", "", "", "", 0, 0.0)
    }

    fn dummy_2() -> Vehicle {
        Vehicle::new(10, 0, "", "", "", "", 0, 0.0)
    }

    fn dealership() -> InMemoryDealership {
        InMemoryDealership::new(DISPLAY_NAME, ADDRESS, PHONE)
    }

    #[test]
    fn test_identity_accessors() {
        let dealership = dealership();
        assert_eq!(dealership.display_name().unwrap(), DISPLAY_NAME);
        assert_eq!(dealership.address().unwrap(), ADDRESS);
        assert_eq!(dealership.phone().unwrap(), PHONE);
    }

    #[test]
    fn test_starts_empty() {
        let dealership = dealership();
        assert!(dealership.all_vehicles().unwrap().is_empty());
    }

    #[test]
    fn test_remove_from_empty_fails() {
        let mut dealership = dealership();
        assert!(!dealership.remove(&dummy()).unwrap());
        assert!(dealership.all_vehicles().unwrap().is_empty());
    }

    #[test]
    fn test_clear_empty() {
        let mut dealership = dealership();
        dealership.clear().unwrap();
        assert!(dealership.all_vehicles().unwrap().is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let mut dealership = dealership();
        dealership.add(dummy_2()).unwrap();
        let before = dealership.all_vehicles().unwrap().into_owned();

        dealership.add(dummy()).unwrap();
        assert!(dealership.remove(&dummy()).unwrap());

        assert_eq!(&*dealership.all_vehicles().unwrap(), before.as_slice());
    }

    #[test]
    fn test_add_all_keeps_duplicates() {
        let mut dealership = dealership();
        dealership.add_all(vec![dummy(), dummy(), dummy()]).unwrap();
        assert_eq!(dealership.all_vehicles().unwrap().len(), 3);
    }

    #[test]
    fn test_remove_takes_exactly_one_match() {
        let mut dealership = dealership();
        dealership.add_all(vec![dummy(), dummy(), dummy()]).unwrap();

        assert!(dealership.remove(&dummy()).unwrap());

        let all = dealership.all_vehicles().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|v| *v == dummy()));
    }

    #[test]
    fn test_remove_not_present() {
        let mut dealership = dealership();
        dealership.add(dummy()).unwrap();

        assert!(!dealership.remove(&dummy_2()).unwrap());
        assert_eq!(dealership.all_vehicles().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_matches_every_field() {
        let mut dealership = dealership();
        dealership.add(dummy()).unwrap();

        let mut repriced = dummy();
        repriced.price = 1.0;
        assert!(!dealership.remove(&repriced).unwrap());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut dealership = dealership();
        dealership.add_all(vec![dummy(), dummy_2()]).unwrap();
        dealership.clear().unwrap();
        assert!(dealership.all_vehicles().unwrap().is_empty());
    }

    #[test]
    fn test_contract_list_add_remove() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let contract = Contract::from(standard_lease(dummy_2(), "Ann", "ann@example.com", date));
        let mut list = InMemoryContractList::new();

        list.add(contract.clone()).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.remove(&contract).unwrap());
        assert!(!list.remove(&contract).unwrap());
        assert!(list.is_empty());
    }
}
