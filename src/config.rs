//! Configuration loading
//!
//! Engine configuration comes from a TOML file. Resolution order:
//! 1. Explicit path handed by the caller (highest priority)
//! 2. `CITYPULSE_CONFIG` environment variable
//! 3. Platform config directory (`<config dir>/citypulse/config.toml`)
//! 4. Compiled defaults (fallback)
//!
//! Every field has a default, so an empty file and a missing file are both
//! valid configurations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::report::Coordinates;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CITYPULSE_CONFIG";

/// Engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geolocation: GeolocationConfig,
    pub intake: IntakeConfig,
    pub map: MapConfig,
    pub staff: StaffConfig,
    pub events: EventsConfig,
}

/// Device position query options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    /// Request the high-accuracy positioning mode
    pub high_accuracy: bool,
    /// Upper bound on a single position query, in milliseconds
    pub timeout_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
        }
    }
}

impl GeolocationConfig {
    /// Query timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Intake form defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Urgency the form returns to after each submission
    pub default_urgency: u8,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self { default_urgency: 3 }
    }
}

/// Initial viewport for the map rendering surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 40.7128,
            center_lng: -74.0060,
            zoom: 12,
        }
    }
}

impl MapConfig {
    /// Viewport center as validated coordinates
    pub fn center(&self) -> Result<Coordinates> {
        Coordinates::new(self.center_lat, self.center_lng)
    }
}

/// Credential rules for the staff gate.
///
/// These configure the external gate's predicate; the engine itself only
/// consumes the boolean result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffConfig {
    /// Required email domain suffix, matched case-insensitively
    pub email_domain: String,
    /// Shared access code
    pub access_code: String,
}

impl Default for StaffConfig {
    fn default() -> Self {
        Self {
            email_domain: "@city.gov".to_string(),
            access_code: "admin123".to_string(),
        }
    }
}

/// Event bus sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Broadcast channel capacity before old events are dropped
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

impl Config {
    /// Load configuration from an explicit TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(e.to_string()))
    }

    /// Resolve configuration following the priority order in the module docs
    pub fn resolve(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            debug!(path = %path.display(), "loading config from explicit path");
            return Self::load(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            debug!(path = %path, "loading config from environment variable");
            return Self::load(Path::new(&path));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                debug!(path = %path.display(), "loading config from platform directory");
                return Self::load(&path);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }
}

/// Platform config file location (`<config dir>/citypulse/config.toml`)
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("citypulse").join("config.toml"))
}
