use crate::dates;
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One office the watchers should query.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfficeEntry {
    /// Office name as shown on the booking site (e.g. "Altunizade")
    pub name: String,
    /// Numeric exit/location id the site uses for the office
    pub exit_id: u32,
}

/// One phone number to notify, with its CallMeBot API key.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhoneEntry {
    pub number: String,
    pub api_key: String,
}

/// Watcher configuration with all values filled in.
///
/// Deserializable from a TOML file; every field has a concrete default so a
/// missing file or a partial file still yields a runnable configuration. The
/// parser rejects unknown keys to catch typos, and `validate` checks the date
/// fields up front so a bad cutoff fails at startup rather than mid-sweep.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatcherConfig {
    /// Offices registered with the finder at startup
    pub offices: Vec<OfficeEntry>,
    /// Phones registered with the notifier at startup
    pub phones: Vec<PhoneEntry>,
    /// Only dates strictly before this dd-mm-yyyy cutoff trigger an alert
    pub search_before: String,
    /// Last dd-mm-yyyy date the free-slot watchers sweep up to
    pub slot_search_until: String,
    /// Seconds between available-date sweeps
    pub date_poll_secs: u64,
    /// Seconds between free-slot sweeps
    pub slot_poll_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            offices: vec![
                OfficeEntry {
                    name: "Altunizade".to_string(),
                    exit_id: 8,
                },
                OfficeEntry {
                    name: "Gayrettepe".to_string(),
                    exit_id: 1,
                },
            ],
            phones: Vec::new(),
            search_before: "18-11-2023".to_string(),
            slot_search_until: "17-11-2023".to_string(),
            date_poll_secs: 60,
            slot_poll_secs: 30,
        }
    }
}

impl WatcherConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed or contains unknown
    /// keys, or if validation fails.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: WatcherConfig = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::from_toml_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Checks the date fields and poll intervals.
    pub fn validate(&self) -> AppResult<()> {
        dates::parse_day(&self.search_before)?;
        dates::parse_day(&self.slot_search_until)?;
        if self.date_poll_secs == 0 || self.slot_poll_secs == 0 {
            return Err(AppError::InvalidInput(
                "Poll interval must be greater than 0 seconds".into(),
            ));
        }
        Ok(())
    }
}
