//! Configuration management for the dealership tool
//!
//! Config stored at: ~/.config/dealership/config.json

use std::path::{Path, PathBuf};

use dealership_types::{BackendKind, ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "dealership";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where inventory and contracts are stored (memory, file, sqlite)
    #[serde(default)]
    pub backend: BackendKind,

    /// Data directory override
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,

    #[serde(default = "default_contracts_file")]
    pub contracts_file: String,

    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Dealership row used by the sqlite backend
    #[serde(default = "default_dealership_id")]
    pub dealership_id: i64,

    /// Identity used when a store has none yet
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_phone")]
    pub phone: String,

    /// Default output format (table, json)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_inventory_file() -> String {
    "inventory.csv".to_string()
}

fn default_contracts_file() -> String {
    "contracts.csv".to_string()
}

fn default_database_file() -> String {
    "dealership.db".to_string()
}

fn default_dealership_id() -> i64 {
    1
}

fn default_display_name() -> String {
    "D & B Used Cars".to_string()
}

fn default_address() -> String {
    "111 Old Benbrook Rd".to_string()
}

fn default_phone() -> String {
    "817-555-5555".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_dir: None,
            inventory_file: default_inventory_file(),
            contracts_file: default_contracts_file(),
            database_file: default_database_file(),
            dealership_id: default_dealership_id(),
            display_name: default_display_name(),
            address: default_address(),
            phone: default_phone(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NotFound)?.join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory holding the inventory, contracts, and database files
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir().ok_or(ConfigError::NotFound)?.join(APP_DIR);
        Ok(data_dir)
    }

    pub fn inventory_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.inventory_file))
    }

    pub fn contracts_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.contracts_file))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.database_file))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dealership Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Backend:        {}", self.backend)?;
        writeln!(
            f,
            "Data dir:       {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Inventory file: {}", self.inventory_file)?;
        writeln!(f, "Contracts file: {}", self.contracts_file)?;
        writeln!(f, "Database file:  {}", self.database_file)?;
        writeln!(f, "Dealership id:  {}", self.dealership_id)?;
        writeln!(f, "Name:           {}", self.display_name)?;
        writeln!(f, "Address:        {}", self.address)?;
        writeln!(f, "Phone:          {}", self.phone)?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
