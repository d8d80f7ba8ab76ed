//! Predicates for filtering vehicles
//!
//! Each factory returns a [`VehicleFilter`]; filters combine with
//! [`VehicleFilter::and`] (or `&`) and are evaluated left to right, stopping at
//! the first predicate that rejects the vehicle.

use std::fmt;
use std::ops::BitAnd;

use crate::model::{Contract, Vehicle};

/// A composable predicate over vehicles
pub struct VehicleFilter<'a> {
    predicate: Box<dyn Fn(&Vehicle) -> bool + 'a>,
}

impl<'a> VehicleFilter<'a> {
    pub fn new(predicate: impl Fn(&Vehicle) -> bool + 'a) -> Self {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        (self.predicate)(vehicle)
    }

    /// Both this filter and `other` must accept the vehicle
    pub fn and(self, other: VehicleFilter<'a>) -> VehicleFilter<'a> {
        VehicleFilter::new(move |v| self.matches(v) && other.matches(v))
    }

    /// Vehicles from `vehicles` accepted by this filter, in order
    pub fn apply(&self, vehicles: &[Vehicle]) -> Vec<Vehicle> {
        vehicles.iter().filter(|v| self.matches(v)).cloned().collect()
    }
}

impl<'a> BitAnd for VehicleFilter<'a> {
    type Output = VehicleFilter<'a>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl fmt::Debug for VehicleFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VehicleFilter")
    }
}

/// Combine filters with logical AND; an empty set accepts everything
pub fn all_of<'a>(filters: impl IntoIterator<Item = VehicleFilter<'a>>) -> VehicleFilter<'a> {
    filters.into_iter().fold(all(), VehicleFilter::and)
}

pub fn min_price(min: f64) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.price >= min)
}

pub fn max_price(max: f64) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.price <= max)
}

/// Case-insensitive substring match on the make
pub fn make(make: &str) -> VehicleFilter<'static> {
    let needle = normalize(make);
    VehicleFilter::new(move |v| v.make.to_lowercase().contains(&needle))
}

/// Case-insensitive substring match on the model
pub fn model(model: &str) -> VehicleFilter<'static> {
    let needle = normalize(model);
    VehicleFilter::new(move |v| v.model.to_lowercase().contains(&needle))
}

pub fn min_year(min: i32) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.year >= min)
}

pub fn max_year(max: i32) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.year <= max)
}

/// Case-insensitive substring match on the color
pub fn color(color: &str) -> VehicleFilter<'static> {
    let needle = normalize(color);
    VehicleFilter::new(move |v| v.color.to_lowercase().contains(&needle))
}

pub fn min_odometer(min: u32) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.odometer >= min)
}

pub fn max_odometer(max: u32) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.odometer <= max)
}

/// Case-insensitive substring match on the body type
pub fn vehicle_type(vehicle_type: &str) -> VehicleFilter<'static> {
    let needle = normalize(vehicle_type);
    VehicleFilter::new(move |v| v.vehicle_type.to_lowercase().contains(&needle))
}

/// Exact VIN match
pub fn vin(vin: u32) -> VehicleFilter<'static> {
    VehicleFilter::new(move |v| v.vin == vin)
}

pub fn all() -> VehicleFilter<'static> {
    VehicleFilter::new(|_| true)
}

/// Vehicles not referenced by any contract
///
/// Scans the whole contract list on every call.
pub fn available(contracts: &[Contract]) -> VehicleFilter<'_> {
    VehicleFilter::new(move |v| contracts.iter().all(|c| c.vehicle_sold().vin != v.vin))
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeaseContract, SaleContract};
    use chrono::NaiveDate;
    use std::cell::Cell;

    fn inventory() -> Vec<Vehicle> {
        vec![
            Vehicle::new(10112, 1993, "Ford", "Explorer", "SUV", "Red", 525123, 995.0),
            Vehicle::new(37846, 2001, "Ford", "Ranger", "Truck", "Yellow", 172544, 1995.0),
            Vehicle::new(44901, 2012, "Honda", "Civic", "Sedan", "Gray", 103221, 6995.0),
            Vehicle::new(11111, 2016, "Hyundai", "Elantra", "Sedan", "Dark Red", 47234, 12995.0),
        ]
    }

    fn vins(vehicles: &[Vehicle]) -> Vec<u32> {
        vehicles.iter().map(|v| v.vin).collect()
    }

    fn lease_of(vehicle: Vehicle) -> Contract {
        Contract::Lease(LeaseContract {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            customer_name: "A".to_string(),
            email: "a@example.com".to_string(),
            expected_ending_value: vehicle.price / 2.0,
            lease_fee: vehicle.price * 0.07,
            vehicle_sold: vehicle,
        })
    }

    #[test]
    fn test_price_range() {
        let filter = min_price(1000.0) & max_price(7000.0);
        assert_eq!(vins(&filter.apply(&inventory())), vec![37846, 44901]);
    }

    #[test]
    fn test_text_filters_are_fuzzy() {
        assert_eq!(vins(&make("  FORD ").apply(&inventory())), vec![10112, 37846]);
        assert_eq!(vins(&model("an").apply(&inventory())), vec![37846, 11111]);
        assert_eq!(vins(&color("red").apply(&inventory())), vec![10112, 11111]);
        assert_eq!(vins(&vehicle_type("sedan").apply(&inventory())), vec![44901, 11111]);
    }

    #[test]
    fn test_blank_text_matches_everything() {
        assert_eq!(make("").apply(&inventory()).len(), 4);
    }

    #[test]
    fn test_year_and_odometer_ranges() {
        let by_year = min_year(2001) & max_year(2012);
        assert_eq!(vins(&by_year.apply(&inventory())), vec![37846, 44901]);

        let by_miles = min_odometer(100_000) & max_odometer(200_000);
        assert_eq!(vins(&by_miles.apply(&inventory())), vec![37846, 44901]);
    }

    #[test]
    fn test_vin_is_exact() {
        assert_eq!(vins(&vin(44901).apply(&inventory())), vec![44901]);
        assert!(vin(4490).apply(&inventory()).is_empty());
    }

    #[test]
    fn test_all_of_empty_accepts_everything() {
        assert_eq!(all_of(Vec::new()).apply(&inventory()).len(), 4);
    }

    #[test]
    fn test_composition_order_does_not_matter() {
        let a = all_of([make("ford"), max_price(1000.0)]);
        let b = all_of([max_price(1000.0), make("ford")]);
        assert_eq!(a.apply(&inventory()), b.apply(&inventory()));
    }

    #[test]
    fn test_and_short_circuits() {
        let calls = Cell::new(0);
        let counting = VehicleFilter::new(|_| {
            calls.set(calls.get() + 1);
            true
        });
        let filter = vin(10112) & counting;
        filter.apply(&inventory());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_available_without_contracts() {
        let contracts = Vec::new();
        assert_eq!(available(&contracts).apply(&inventory()).len(), 4);
    }

    #[test]
    fn test_available_excludes_contracted_vins() {
        let stock = inventory();
        let contracts = vec![
            lease_of(stock[1].clone()),
            Contract::Sale(SaleContract {
                vehicle_sold: stock[3].clone(),
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                customer_name: "B".to_string(),
                email: "b@example.com".to_string(),
                sales_tax: 0.05,
                recording_fee: 100.0,
                processing_fee: 495.0,
                financed: false,
            }),
        ];
        let filter = available(&contracts);
        assert!(filter.matches(&stock[0]));
        assert!(!filter.matches(&stock[1]));
        assert!(!filter.matches(&stock[3]));
        assert_eq!(vins(&filter.apply(&stock)), vec![10112, 44901]);
    }

    #[test]
    fn test_available_keys_on_vin_only() {
        let stock = inventory();
        let mut repainted = stock[0].clone();
        repainted.color = "Blue".to_string();
        let contracts = vec![lease_of(repainted)];
        assert!(!available(&contracts).matches(&stock[0]));
    }
}
