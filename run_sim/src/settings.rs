use std::path::Path;

use refract::{ConfigError, TraceConfig, Viewport};
use serde::{Deserialize, Serialize};

/// Everything a headless run can be tuned with.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimConfig {
    pub trace: TraceConfig,
    pub viewport: Viewport,
    /// Build a random scene from this seed instead of the reference one.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trace: TraceConfig::default(),
            viewport: Viewport::new(1000.0, 1000.0),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load the config at `path`, falling back to defaults on any error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trace.validate()?;
        let Viewport { width, height } = self.viewport;
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NotPositive {
                parameter: "viewport",
                value: width.min(height),
            })
        }
    }
}
