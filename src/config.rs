//! TOML trigger configuration.
//!
//! ```toml
//! clock = "+02:00"          # utc (default), local, or a fixed offset
//!
//! [[trigger]]
//! name = "night-speedtest"
//! descriptor = "SpeedTest:ValidTimeRange=23:00-01:00;Delay=30"
//!
//! [[trigger]]
//! name = "hall-light"
//! descriptor = "Motion:Room=Hall;ExceptMode=Away|Vacation"
//! ```
//!
//! Descriptors are kept as [`TriggerEntry`] values and only parsed when first
//! queried, so a descriptor typo never makes loading fail.

use crate::clock::WallClock;
use crate::entry::TriggerEntry;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Errors that can occur while loading a trigger configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid trigger config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One named trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerSpec {
    pub name: String,
    #[serde(default)]
    pub descriptor: TriggerEntry,
}

/// A set of named triggers sharing one reference clock.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerConfig {
    /// Wall clock that descriptor `HH:mm` bounds are written in.
    #[serde(default, deserialize_with = "deserialize_clock")]
    pub clock: WallClock,
    #[serde(default, rename = "trigger")]
    pub triggers: Vec<TriggerSpec>,
}

impl TriggerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), triggers = config.triggers.len(), clock = %config.clock, "loaded trigger config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Look a trigger up by name.
    pub fn get(&self, name: &str) -> Option<&TriggerSpec> {
        self.triggers.iter().find(|t| t.name == name)
    }

    /// Triggers reacting to `event` that permit firing at `now` for `params`.
    pub fn firing<'a>(
        &'a self,
        event: &'a str,
        now: NaiveDateTime,
        params: &'a [(&'a str, Option<&'a str>)],
    ) -> impl Iterator<Item = &'a TriggerSpec> + 'a {
        self.triggers.iter().filter(move |t| {
            let rule = t.descriptor.rule();
            rule.event_name() == event && rule.permits(now, params)
        })
    }
}

fn deserialize_clock<'de, D>(deserializer: D) -> Result<WallClock, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate};
    use std::io::Write;

    const SAMPLE: &str = r#"
clock = "+02:00"

[[trigger]]
name = "night-speedtest"
descriptor = "SpeedTest:ValidTimeRange=23:00-01:00;Delay=30"

[[trigger]]
name = "hall-light"
descriptor = "Motion:Room=Hall;ExceptMode=Away|Vacation"

[[trigger]]
name = "any-motion"
descriptor = "Motion:ValidTimeRange=_-_"

[[trigger]]
name = "disabled"
"#;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_sample() {
        let config = TriggerConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.clock, WallClock::Offset(FixedOffset::east_opt(7200).unwrap()));
        assert_eq!(config.triggers.len(), 4);
        assert!(!config.triggers[0].descriptor.is_parsed());

        let speed = config.get("night-speedtest").unwrap();
        assert_eq!(speed.descriptor.rule().delay(), Some(std::time::Duration::from_secs(30)));
        assert!(config.get("disabled").unwrap().descriptor.rule().is_empty());
        assert!(config.get("missing").is_none());
    }

    #[test]
    fn defaults_to_utc_and_no_triggers() {
        let config = TriggerConfig::from_toml_str("").unwrap();
        assert_eq!(config.clock, WallClock::Utc);
        assert!(config.triggers.is_empty());
    }

    #[test]
    fn rejects_unknown_clock() {
        let err = TriggerConfig::from_toml_str(r#"clock = "mars""#).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
        assert!(err.to_string().contains("unknown clock 'mars'"));
    }

    #[test]
    fn firing_filters_by_event_window_and_params() {
        let config = TriggerConfig::from_toml_str(SAMPLE).unwrap();
        let names = |event: &str, now: NaiveDateTime, params: &[(&str, Option<&str>)]| -> Vec<String> {
            config.firing(event, now, params).map(|t| t.name.clone()).collect()
        };

        let nothing: &[(&str, Option<&str>)] = &[];
        assert_eq!(names("SpeedTest", at(0, 30), nothing), vec!["night-speedtest"]);
        assert!(names("SpeedTest", at(12, 0), nothing).is_empty());

        let home = [("Room", Some("Hall")), ("Mode", Some("Home"))];
        assert_eq!(names("Motion", at(12, 0), &home[..]), vec!["hall-light", "any-motion"]);

        let away = [("Room", Some("Hall")), ("Mode", Some("Away"))];
        assert_eq!(names("Motion", at(12, 0), &away[..]), vec!["any-motion"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = TriggerConfig::load(file.path()).unwrap();
        assert_eq!(config.triggers.len(), 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TriggerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
