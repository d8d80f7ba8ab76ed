//! Output formatting module

use dealership_domain::{Contract, Vehicle};
use dealership_types::{OutputFormat, Result};
use serde::Serialize;

/// Contract plus its derived pricing, for JSON output
#[derive(Serialize)]
struct PricedContract<'a> {
    #[serde(flatten)]
    contract: &'a Contract,
    total_price: f64,
    monthly_payment: f64,
    payment_length: u32,
}

pub fn render_vehicles(output_format: OutputFormat, vehicles: &[Vehicle]) -> Result<String> {
    if output_format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(vehicles)?);
    }

    if vehicles.is_empty() {
        return Ok("No vehicles found".to_string());
    }

    let mut lines = vec![
        format!(
            "{:>8}  {:>4}  {:<12} {:<12} {:<10} {:<8} {:>9}  {:>10}",
            "VIN", "Year", "Make", "Model", "Type", "Color", "Odometer", "Price"
        ),
        "-".repeat(84),
    ];
    for v in vehicles {
        lines.push(format!(
            "{:>8}  {:>4}  {:<12} {:<12} {:<10} {:<8} {:>9}  {:>10.2}",
            v.vin, v.year, v.make, v.model, v.vehicle_type, v.color, v.odometer, v.price
        ));
    }
    lines.push(format!("{} vehicle(s)", vehicles.len()));
    Ok(lines.join("\n"))
}

pub fn render_contracts(output_format: OutputFormat, contracts: &[Contract]) -> Result<String> {
    if output_format == OutputFormat::Json {
        let priced: Vec<PricedContract<'_>> = contracts
            .iter()
            .map(|contract| PricedContract {
                contract,
                total_price: contract.total_price(),
                monthly_payment: contract.monthly_payment(),
                payment_length: contract.payment_length(),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&priced)?);
    }

    if contracts.is_empty() {
        return Ok("No contracts recorded".to_string());
    }

    let mut lines = Vec::new();
    for contract in contracts {
        lines.push(format!(
            "{} {}  {} <{}>",
            contract.tag(),
            contract.date(),
            contract.customer_name(),
            contract.email()
        ));
        lines.push(format!("  Vehicle:  {}", contract.vehicle_sold()));
        lines.push(format!("  Total:    ${:.2}", contract.total_price()));
        if contract.payment_length() > 0 {
            lines.push(format!(
                "  Payments: ${:.2} x {} months",
                contract.monthly_payment(),
                contract.payment_length()
            ));
        }
    }
    lines.push(format!("{} contract(s)", contracts.len()));
    Ok(lines.join("\n"))
}
