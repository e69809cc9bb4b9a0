//! Run settings: loading, validation, and the values derived from them.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use pilates_types::{PilatesError, Result};
use serde::{Deserialize, Serialize};

use crate::transforms::expand_env;

/// Settings file read when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "settings.yaml";

/// Keys that must be present in every settings document, in check order.
pub const REQUIRED_SETTINGS: [&str; 6] = [
    "region",
    "start_year",
    "end_year",
    "step_delay_seconds",
    "output_directory",
    "output_run_name",
];

/// Immutable configuration for one mock run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub region: String,
    pub start_year: i32,
    /// Exclusive.
    pub end_year: i32,
    /// Read through [`RunConfig::step_delay`]; set through the builder.
    step_delay_seconds: f64,
    /// May reference environment variables as `$VAR` or `${VAR}`.
    pub output_directory: String,
    pub output_run_name: String,
    /// `step_delay_seconds`, checked and converted at construction.
    #[serde(skip)]
    step_delay: Duration,
    /// Every key of the source document rendered as text, in document order.
    #[serde(skip)]
    settings: Vec<(String, String)>,
}

impl RunConfig {
    /// Build a config in code. The delay defaults to zero and output goes to
    /// the current directory under the run name `run`.
    pub fn new(region: impl Into<String>, start_year: i32, end_year: i32) -> Self {
        let mut config = Self {
            region: region.into(),
            start_year,
            end_year,
            step_delay_seconds: 0.0,
            output_directory: ".".into(),
            output_run_name: "run".into(),
            step_delay: Duration::ZERO,
            settings: Vec::new(),
        };
        config.settings = config.required_settings();
        config
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self.step_delay_seconds = delay.as_secs_f64();
        self.settings = self.required_settings();
        self
    }

    pub fn with_output(mut self, directory: impl Into<String>, run_name: impl Into<String>) -> Self {
        self.output_directory = directory.into();
        self.output_run_name = run_name.into();
        self.settings = self.required_settings();
        self
    }

    /// Read and parse a YAML settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Parse a YAML settings document.
    ///
    /// Required keys are checked before any typed parsing so that an absent
    /// key is always reported as [`PilatesError::MissingSetting`]. Unknown
    /// keys are kept for the startup echo and otherwise ignored.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(source)?;
        let mapping = match document {
            serde_yaml::Value::Mapping(mapping) => mapping,
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            other => {
                return Err(PilatesError::InvalidSetting {
                    key: "<document>".into(),
                    message: format!("expected a mapping of settings, found {}", kind_of(&other)),
                })
            }
        };

        if let Some(key) = REQUIRED_SETTINGS
            .iter()
            .find(|key| !mapping.contains_key(*key))
        {
            return Err(PilatesError::MissingSetting {
                key: (*key).to_string(),
            });
        }

        let settings = mapping
            .iter()
            .map(|(k, v)| (render_value(k), render_value(v)))
            .collect();

        let mut config: RunConfig = serde_yaml::from_value(serde_yaml::Value::Mapping(mapping))?;
        config.step_delay = checked_delay(config.step_delay_seconds)?;
        config.settings = settings;
        Ok(config)
    }

    /// Simulation years, `start_year` inclusive to `end_year` exclusive.
    /// Empty when `end_year <= start_year`.
    pub fn sim_years(&self) -> Vec<i32> {
        (self.start_year..self.end_year).collect()
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    /// The delay as written in the settings, for log messages.
    pub fn step_delay_seconds(&self) -> f64 {
        self.step_delay_seconds
    }

    /// `{region}-{run_name}-{YYYYmmdd-HHMMSS}`.
    pub fn output_folder_name(&self, at: NaiveDateTime) -> String {
        format!(
            "{}-{}-{}",
            self.region,
            self.output_run_name,
            at.format("%Y%m%d-%H%M%S")
        )
    }

    /// The per-run output root with environment references expanded.
    pub fn base_output_at(&self, at: NaiveDateTime) -> PathBuf {
        PathBuf::from(expand_env(&self.output_directory)).join(self.output_folder_name(at))
    }

    /// All settings as `(key, value)` text pairs, for logging.
    pub fn settings(&self) -> &[(String, String)] {
        &self.settings
    }

    fn required_settings(&self) -> Vec<(String, String)> {
        vec![
            ("region".into(), self.region.clone()),
            ("start_year".into(), self.start_year.to_string()),
            ("end_year".into(), self.end_year.to_string()),
            ("step_delay_seconds".into(), self.step_delay_seconds.to_string()),
            ("output_directory".into(), self.output_directory.clone()),
            ("output_run_name".into(), self.output_run_name.clone()),
        ]
    }
}

/// Negative, non-finite and out-of-range delays are rejected rather than
/// silently replaced.
fn checked_delay(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| PilatesError::InvalidSetting {
        key: "step_delay_seconds".into(),
        message: format!("must be a non-negative number of seconds, got {seconds}"),
    })
}

fn render_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "None".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn kind_of(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
