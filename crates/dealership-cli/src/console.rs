//! Interactive menu over an inventory service
//!
//! Generic over its input and output so scripted sessions can drive it.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use dealership_app::app::{InventoryService, SearchQuery};
use dealership_domain::service::can_lease;
use dealership_domain::service::filters::{self, VehicleFilter};
use dealership_domain::{Dealership, Vehicle};
use dealership_types::{Error, Result};

const MENU: &str = "\
--SEARCH--
0 - By everything
1 - By price
2 - By make/model
3 - By year
4 - By color
5 - By odometer
6 - By type
7 - Show all
--OTHER--
8 - Add vehicle
9 - Remove vehicle
10 - Sell/lease vehicle
99 - Exit
Choose an option: ";

const BAD_INPUT: &str = "Bad input, please try again.";

pub struct Console<'a, R: BufRead, W: Write> {
    service: &'a mut InventoryService,
    input: R,
    out: W,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(service: &'a mut InventoryService, input: R, out: W, today: NaiveDate) -> Self {
        Self {
            service,
            input,
            out,
            today,
        }
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        let name = self.service.dealership().display_name()?;
        writeln!(self.out, "Welcome to {name}!")?;

        match self.menu_loop() {
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => writeln!(self.out)?,
            other => other?,
        }

        writeln!(self.out, "Thanks for stopping by!")?;
        self.out.flush()?;
        Ok(())
    }

    fn menu_loop(&mut self) -> Result<()> {
        loop {
            write!(self.out, "{MENU}")?;
            let choice = self.line()?;
            match choice.as_str() {
                "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" => {
                    let filter = self.query_filter(&choice)?;
                    self.display_vehicles(filter)?;
                    self.read_key()?;
                }
                "8" => self.add_vehicle()?,
                "9" => self.remove_vehicles()?,
                "10" => self.process_contract()?,
                "99" => return Ok(()),
                other => writeln!(self.out, "Unknown option \"{other}\"! Please try again.")?,
            }
        }
    }

    fn query_filter(&mut self, choice: &str) -> Result<VehicleFilter<'static>> {
        let filter = match choice {
            "0" => self.query_everything()?.to_filter(),
            "1" => SearchQuery {
                min_price: self.query_optional_money("minimum")?,
                max_price: self.query_optional_money("maximum")?,
                ..SearchQuery::default()
            }
            .to_filter(),
            "2" => SearchQuery {
                make: Some(self.query_text("make", true)?),
                model: Some(self.query_text("model", true)?),
                ..SearchQuery::default()
            }
            .to_filter(),
            "3" => SearchQuery {
                min_year: self.query_optional_number("minimum year")?,
                max_year: self.query_optional_number("maximum year")?,
                ..SearchQuery::default()
            }
            .to_filter(),
            "4" => filters::color(&self.query_text("color", true)?),
            "5" => SearchQuery {
                min_odometer: self.query_optional_number("minimum reading")?,
                max_odometer: self.query_optional_number("maximum reading")?,
                ..SearchQuery::default()
            }
            .to_filter(),
            "6" => filters::vehicle_type(&self.query_text("type", true)?),
            _ => filters::all(),
        };
        Ok(filter)
    }

    /// Price, year, odometer and VIN match exactly; text fields match by
    /// case-insensitive substring. Blank answers are ignored.
    fn query_everything(&mut self) -> Result<SearchQuery> {
        let price = self.query_optional_money("vehicle's")?;
        let make = self.query_text("make", true)?;
        let model = self.query_text("model", true)?;
        let year = self.query_optional_number("year")?;
        let color = self.query_text("color", true)?;
        let odometer = self.query_optional_number("odometer reading")?;
        let vehicle_type = self.query_text("type", true)?;
        let vin = self.query_optional_number("VIN")?;

        Ok(SearchQuery {
            min_price: price,
            max_price: price,
            make: Some(make),
            model: Some(model),
            min_year: year,
            max_year: year,
            color: Some(color),
            min_odometer: odometer,
            max_odometer: odometer,
            vehicle_type: Some(vehicle_type),
            vin,
        })
    }

    fn display_vehicles(&mut self, filter: VehicleFilter<'_>) -> Result<()> {
        for vehicle in self.service.search(filter)? {
            writeln!(self.out, "{vehicle}")?;
        }
        Ok(())
    }

    fn add_vehicle(&mut self) -> Result<()> {
        let price = self.query_money("vehicle's")?;
        let make = self.query_text("make", false)?;
        let model = self.query_text("model", false)?;
        let year = self.query_number("year")?;
        let color = self.query_text("color", false)?;
        let odometer = self.query_number("odometer reading")?;
        let vehicle_type = self.query_text("type", false)?;
        let vin = self.query_number("VIN")?;

        let vehicle = Vehicle::new(vin, year, make, model, vehicle_type, color, odometer, price);
        self.service.add_vehicle(vehicle.clone())?;
        writeln!(self.out, "Successfully added the vehicle:\n{vehicle}")?;
        self.read_key()
    }

    fn remove_vehicles(&mut self) -> Result<()> {
        let filter = self.query_everything()?.to_filter();
        let found = self.service.search(filter)?;

        match found.as_slice() {
            [] => {
                writeln!(self.out, "Found no matching vehicles. Aborting...")?;
                return self.read_key();
            }
            [one] => write!(self.out, "Found one matching vehicle:\n{one}\nRemove it? [y/n] ")?,
            many => write!(
                self.out,
                "Found {} matching vehicles. Remove all of them? [y/n] ",
                many.len()
            )?,
        }

        if self.query_yes_no()? {
            let removed = self.service.remove_vehicles(&found)?;
            writeln!(self.out, "Removed {removed} vehicles.")?;
        } else {
            writeln!(self.out, "Nothing removed.")?;
        }
        self.read_key()
    }

    fn process_contract(&mut self) -> Result<()> {
        write!(self.out, "Is this a sale? [y/n] ")?;
        let sale = self.query_yes_no()?;

        let vehicle = loop {
            let vin: u32 = self.query_number("VIN")?;
            match self.service.find_by_vin(vin)? {
                None => writeln!(self.out, "Couldn't find that vehicle. Try again.")?,
                Some(v) if !sale && !can_lease(&v, self.today) => {
                    writeln!(self.out, "That vehicle is too old to lease. Try again.")?
                }
                Some(v) => break v,
            }
        };

        let name = self.query_text("customer's name", false)?;
        let email = self.query_text("customer's email address", false)?;

        if sale {
            write!(self.out, "Is this financed? [y/n] ")?;
            let financed = self.query_yes_no()?;
            self.service.sell(vehicle.vin, &name, &email, financed, self.today)?;
            let terms = if financed { "with financing" } else { "without financing" };
            writeln!(self.out, "Sold vehicle #{} to {name} at {email} {terms}.", vehicle.vin)?;
        } else {
            self.service.lease(vehicle.vin, &name, &email, self.today)?;
            writeln!(self.out, "Leased vehicle #{} to {name} at {email}.", vehicle.vin)?;
        }
        self.read_key()
    }

    fn line(&mut self) -> Result<String> {
        self.out.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf.trim().to_string())
    }

    fn read_key(&mut self) -> Result<()> {
        writeln!(self.out, "Press enter to continue...")?;
        self.line()?;
        Ok(())
    }

    fn query_yes_no(&mut self) -> Result<bool> {
        loop {
            let input = self.line()?.to_lowercase();
            match input.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => write!(self.out, "Unknown option \"{input}\". Try again: [y/n] ")?,
            }
        }
    }

    fn query_text(&mut self, which: &str, allow_empty: bool) -> Result<String> {
        loop {
            write!(self.out, "Enter the {which}: ")?;
            let input = self.line()?;
            if allow_empty || !input.is_empty() {
                return Ok(input);
            }
            writeln!(self.out, "{BAD_INPUT}")?;
        }
    }

    fn query_number<T: FromStr>(&mut self, which: &str) -> Result<T> {
        loop {
            if let Some(value) = self.query_optional_number(which)? {
                return Ok(value);
            }
            writeln!(self.out, "{BAD_INPUT}")?;
        }
    }

    /// Blank input is `None`; anything but plain digits re-prompts
    fn query_optional_number<T: FromStr>(&mut self, which: &str) -> Result<Option<T>> {
        loop {
            write!(self.out, "Enter the {which}: ")?;
            let input = self.line()?;
            if input.is_empty() {
                return Ok(None);
            }
            if let Some(value) = parse_number(&input) {
                return Ok(Some(value));
            }
            writeln!(self.out, "{BAD_INPUT}")?;
        }
    }

    fn query_money(&mut self, which: &str) -> Result<f64> {
        loop {
            if let Some(value) = self.query_optional_money(which)? {
                return Ok(value);
            }
            writeln!(self.out, "{BAD_INPUT}")?;
        }
    }

    fn query_optional_money(&mut self, which: &str) -> Result<Option<f64>> {
        loop {
            write!(self.out, "Enter the {which} price: ")?;
            let input = self.line()?;
            if input.is_empty() {
                return Ok(None);
            }
            if let Some(value) = parse_money(&input) {
                return Ok(Some(value));
            }
            writeln!(self.out, "{BAD_INPUT}")?;
        }
    }
}

fn parse_number<T: FromStr>(input: &str) -> Option<T> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

/// Digits with an optional leading `$` and at most two decimals
fn parse_money(input: &str) -> Option<f64> {
    let amount = input.strip_prefix('$').unwrap_or(input);
    let (whole, cents) = match amount.split_once('.') {
        Some((whole, cents)) => (whole, Some(cents)),
        None => (amount, None),
    };

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) {
        return None;
    }
    match cents {
        Some(c) if c.is_empty() || c.len() > 2 || !digits(c) => return None,
        None if whole.is_empty() => return None,
        _ => {}
    }
    amount.parse().ok()
}
