// ⚙️ Engine Config - Tunables loaded from TOML
//
// Every field has a default, so an empty file (or no file) is valid:
//
//   recent_window_days = 365
//   sensitive_keyword = "password"
//   report_suffix = "DarkWebBreaches"
//   workers = 0

use crate::error::{LeakError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A leak newer than this many days makes the identity High risk
    pub recent_window_days: i64,

    /// Any category containing this substring makes the identity High risk
    pub sensitive_keyword: String,

    /// Report file names are "{client}_{suffix}_{date}"
    pub report_suffix: String,

    /// Worker threads per client report (0 = rayon default)
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            recent_window_days: 365,
            sensitive_keyword: "password".to_string(),
            report_suffix: "DarkWebBreaches".to_string(),
            workers: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(text).map_err(|e| LeakError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.recent_window_days <= 0 || self.recent_window_days > 36_500 {
            return Err(LeakError::Config(format!(
                "recent_window_days must be between 1 and 36500, got {}",
                self.recent_window_days
            )));
        }
        if self.sensitive_keyword.trim().is_empty() {
            return Err(LeakError::Config("sensitive_keyword must not be empty".to_string()));
        }
        Ok(())
    }
}
