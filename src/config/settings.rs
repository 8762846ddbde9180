use clap::parser::ValueSource;
use clap::ArgMatches;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::modbus::types::RegisterKind;
use crate::utils::error::ModbusError;

/// Link settings plus read defaults. Values come from (lowest to highest
/// precedence): built-in defaults, an optional TOML file, explicit flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub serial_port: String,
    pub baud_rate: u32,
    pub unit_id: u8,
    pub register_type: RegisterKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial_port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            unit_id: 1,
            register_type: RegisterKind::Input,
        }
    }
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ModbusError> {
        let mut config = match matches.get_one::<String>("config") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        // Clap always supplies defaulted values, so only explicitly passed
        // flags may override what the config file said.
        if matches.value_source("port") == Some(ValueSource::CommandLine) {
            config.serial_port = matches.get_one::<String>("port").unwrap().clone();
        }
        if matches.value_source("baud") == Some(ValueSource::CommandLine) {
            config.baud_rate = *matches.get_one::<u32>("baud").unwrap();
        }
        if matches.value_source("unit") == Some(ValueSource::CommandLine) {
            config.unit_id = *matches.get_one::<u8>("unit").unwrap();
        }
        if matches.value_source("register-type") == Some(ValueSource::CommandLine) {
            config.register_type = matches
                .get_one::<String>("register-type")
                .unwrap()
                .parse()?;
        }

        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModbusError> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ModbusError::ConfigError(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        toml::from_str(&content)
            .map_err(|e| ModbusError::ConfigError(format!("Invalid config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ModbusError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ModbusError::ConfigError(format!("Create dir failed: {}", e)))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ModbusError::ConfigError(format!("Serialize failed: {}", e)))?;
        std::fs::write(&path, content).map_err(|e| {
            ModbusError::ConfigError(format!(
                "Failed to write {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }
}
