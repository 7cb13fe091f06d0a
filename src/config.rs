/// Campaign configuration, read from a RON file.
///
/// ```ron
/// (
///     today: "3.3206.8.12",
///     timeline: Some("timeline.ron"),
///     seed: Some(1917),
/// )
/// ```
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::reckoning::{DateTime, ReckoningError};

/// Environment variable naming the timeline file; wins over the config.
pub const TIMELINE_DATAFILE: &str = "TIMELINE_DATAFILE";

pub const DEFAULT_TODAY: &str = "3.3206.8.12";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid campaign date: {0}")]
    Reckoning(#[from] ReckoningError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelisarConfig {
    /// Numeric literal of the campaign's current day.
    pub today: String,
    pub timeline: Option<PathBuf>,
    /// Seed for name generation. Unseeded runs draw from entropy.
    pub seed: Option<u64>,
}

impl Default for TelisarConfig {
    fn default() -> Self {
        Self {
            today: DEFAULT_TODAY.to_string(),
            timeline: None,
            seed: None,
        }
    }
}

impl TelisarConfig {
    pub fn load(path: &Path) -> Result<TelisarConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse_ron(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse a config and check that `today` is a real date.
    pub fn parse_ron(input: &str) -> Result<TelisarConfig, ConfigError> {
        let config: TelisarConfig = ron::from_str(input)?;
        config.today()?;
        Ok(config)
    }

    pub fn today(&self) -> Result<DateTime, ConfigError> {
        Ok(DateTime::from_numeric(&self.today)?)
    }

    /// The timeline file: `TIMELINE_DATAFILE` if set, else the configured one.
    pub fn timeline_path(&self) -> Option<PathBuf> {
        std::env::var_os(TIMELINE_DATAFILE)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.timeline.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = TelisarConfig::parse_ron("()").unwrap();
        assert_eq!(config, TelisarConfig::default());
        assert_eq!(config.today().unwrap().numeric_date(), "3.3206.8.12");
    }

    #[test]
    fn parse_all_fields() {
        let config = TelisarConfig::parse_ron(
            r#"(today: "2.4839.7.22", timeline: Some("events.ron"), seed: Some(7))"#,
        )
        .unwrap();
        assert_eq!(config.today().unwrap().numeric_date(), "2.4839.7.22");
        assert_eq!(config.timeline, Some(PathBuf::from("events.ron")));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn invalid_today_is_rejected() {
        assert!(matches!(
            TelisarConfig::parse_ron(r#"(today: "1.1.1.46")"#),
            Err(ConfigError::Reckoning(ReckoningError::InvalidDay { .. }))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"(today: "1.1.9.5")"#).unwrap();
        let config = TelisarConfig::load(file.path()).unwrap();
        assert!(config.today().unwrap().season().is_festival());
    }
}
