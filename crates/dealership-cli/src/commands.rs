//! Command handlers

use std::io;
use std::path::PathBuf;

use chrono::Local;
use dealership_app::app::{InventoryService, SearchQuery};
use dealership_app::config::Config;
use dealership_types::{BackendKind, OutputFormat, Result};

use crate::cli::{Cli, Commands, SearchArgs};
use crate::console::Console;
use crate::output::{render_contracts, render_vehicles};

pub fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => cmd_shell(&config),

        Commands::List(args) => cmd_list(&config, output_format, args),

        Commands::Contracts => cmd_contracts(&config, output_format),

        Commands::Config {
            show,
            set_backend,
            set_data_dir,
            set_dealership_id,
            set_name,
            set_address,
            set_phone,
            set_output,
            reset,
        } => cmd_config(ConfigUpdate {
            show,
            backend: set_backend,
            data_dir: set_data_dir,
            dealership_id: set_dealership_id,
            display_name: set_name,
            address: set_address,
            phone: set_phone,
            output_format: set_output,
            reset,
        }),
    }
}

fn cmd_shell(config: &Config) -> Result<()> {
    let mut service = InventoryService::open(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let today = Local::now().date_naive();

    Console::new(&mut service, stdin.lock(), stdout.lock(), today).run()
}

fn cmd_list(config: &Config, output_format: OutputFormat, args: SearchArgs) -> Result<()> {
    let service = InventoryService::open(config)?;
    let vehicles = service.search_query(&SearchQuery::from(args))?;
    println!("{}", render_vehicles(output_format, &vehicles)?);
    Ok(())
}

fn cmd_contracts(config: &Config, output_format: OutputFormat) -> Result<()> {
    let service = InventoryService::open(config)?;
    let contracts = service.contracts()?;
    println!("{}", render_contracts(output_format, &contracts)?);
    Ok(())
}

struct ConfigUpdate {
    show: bool,
    backend: Option<BackendKind>,
    data_dir: Option<PathBuf>,
    dealership_id: Option<i64>,
    display_name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    output_format: Option<OutputFormat>,
    reset: bool,
}

fn cmd_config(update: ConfigUpdate) -> Result<()> {
    if update.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(backend) = update.backend {
        config.backend = backend;
        modified = true;
    }

    if let Some(data_dir) = update.data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(id) = update.dealership_id {
        config.dealership_id = id;
        modified = true;
    }

    if let Some(name) = update.display_name {
        config.display_name = name;
        modified = true;
    }

    if let Some(address) = update.address {
        config.address = address;
        modified = true;
    }

    if let Some(phone) = update.phone {
        config.phone = phone;
        modified = true;
    }

    if let Some(output_format) = update.output_format {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if update.show || !modified {
        println!("{}", config);
    }

    Ok(())
}
