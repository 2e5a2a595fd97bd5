use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use chrono::FixedOffset;

use crate::core::session::DEFAULT_GOAL_HOURS;
use crate::errors::{AppError, AppResult};
use crate::store::document::SessionDefaults;
use crate::utils::duration::hours_to_delta;
use crate::utils::path::expand_tilde;
use crate::utils::time::{REFERENCE_UTC_OFFSET_SECS, parse_offset};

/// Keys every configuration file is expected to carry.
pub const CONFIG_KEYS: [&str; 4] = [
    "store",
    "default_goal_hours",
    "utc_offset",
    "confirm_clock_out",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: String,
    /// Goal used until one is set with `goal`.
    #[serde(default = "default_goal_hours")]
    pub default_goal_hours: f64,
    /// Fixed reference timezone, e.g. "+02:00".
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default = "default_confirm_clock_out")]
    pub confirm_clock_out: bool,
    /// Log file verbosity; unset defers to `RUST_LOG`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

fn default_goal_hours() -> f64 {
    DEFAULT_GOAL_HOURS
}
fn default_utc_offset() -> String {
    let secs = REFERENCE_UTC_OFFSET_SECS;
    let sign = if secs < 0 { '-' } else { '+' };
    format!("{}{:02}:{:02}", sign, secs.abs() / 3600, (secs.abs() % 3600) / 60)
}
fn default_confirm_clock_out() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: Self::store_file().to_string_lossy().to_string(),
            default_goal_hours: default_goal_hours(),
            utc_offset: default_utc_offset(),
            confirm_clock_out: default_confirm_clock_out(),
            log_level: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rtimeclock")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtimeclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimeclock.conf")
    }

    /// Return the default path of the state document
    pub fn store_file() -> PathBuf {
        Self::config_dir().join("time_records.json")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            let cfg: Config = serde_yaml::from_str(&content)?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Keys from `CONFIG_KEYS` absent in the file on disk.
    pub fn missing_fields() -> AppResult<Vec<&'static str>> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(CONFIG_KEYS.to_vec());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let map = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration is not a YAML mapping".into()))?;

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    /// Initialize the configuration file; returns the state document path.
    pub fn init_all(custom_store: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // Store name: user provided or default
        let store_path = if let Some(name) = custom_store {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::store_file()
        };

        let config = Config {
            store: store_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
        }

        Ok(store_path)
    }

    pub fn store_path(&self) -> PathBuf {
        expand_tilde(&self.store)
    }

    /// The fixed reference timezone.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.utc_offset)
            .ok_or_else(|| AppError::Config(format!("invalid utc_offset '{}'", self.utc_offset)))
    }

    pub fn session_defaults(&self) -> AppResult<SessionDefaults> {
        let goal = hours_to_delta(self.default_goal_hours)
            .filter(|g| g.num_seconds() > 0)
            .ok_or_else(|| {
                AppError::Config(format!(
                    "invalid default_goal_hours {}",
                    self.default_goal_hours
                ))
            })?;

        Ok(SessionDefaults {
            goal,
            offset: self.offset()?,
        })
    }
}
