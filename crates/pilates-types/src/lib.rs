//! Shared types and errors for the PILATES mock pipeline.
//!
//! This crate provides the foundational types used across the other crates:
//! - `PilatesError` — unified error taxonomy
//! - `Stage` — the four simulated workflow stages
//! - `StageScope` — the year (or years) a stage invocation covers

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Unified error type for the mock pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PilatesError {
    // === Configuration Errors ===
    #[error("Missing required setting '{key}'")]
    MissingSetting { key: String },

    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting { key: String, message: String },

    #[error("Settings parse error: {0}")]
    Settings(#[from] serde_yaml::Error),

    // === Filesystem Errors ===
    #[error("Failed to create folder '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write marker '{}': {source}", .path.display())]
    MarkerWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Generic ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PilatesError {
    /// Returns `true` for errors raised while loading settings, i.e. before
    /// any stage ran or any output was written.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PilatesError::MissingSetting { .. }
                | PilatesError::InvalidSetting { .. }
                | PilatesError::Settings(_)
        )
    }

    /// The filesystem path involved in the failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PilatesError::CreateDir { path, .. } | PilatesError::MarkerWrite { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}

/// A convenience alias for `Result<T, PilatesError>`.
pub type Result<T> = std::result::Result<T, PilatesError>;

// ---------------------------------------------------------------------------
// Stage — one phase of the simulated workflow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ActivitySim,
    UrbanSim,
    Beam,
    Postprocessing,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [
        Stage::ActivitySim,
        Stage::UrbanSim,
        Stage::Beam,
        Stage::Postprocessing,
    ];

    /// Name used in `Completed MOCK.WorkflowStage.<label>` log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::ActivitySim => "ActivitySim",
            Stage::UrbanSim => "Urbansim",
            Stage::Beam => "BEAM",
            Stage::Postprocessing => "postprocessing",
        }
    }

    /// Banner printed when the stage starts.
    pub fn banner(&self) -> &'static str {
        match self {
            Stage::ActivitySim => "MOCK: RUNNING ACTIVITYSIM",
            Stage::UrbanSim => "MOCK: RUNNING URBANSIM",
            Stage::Beam => "MOCK: RUNNING BEAM",
            Stage::Postprocessing => "MOCK: RUNNING POSTPROCESSING",
        }
    }

    /// Parse a lowercase stage name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Stage> {
        match name.to_ascii_lowercase().as_str() {
            "activitysim" => Some(Stage::ActivitySim),
            "urbansim" => Some(Stage::UrbanSim),
            "beam" => Some(Stage::Beam),
            "postprocessing" => Some(Stage::Postprocessing),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StageScope — which simulation year(s) an invocation covers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageScope {
    /// Per-year stages (ActivitySim, UrbanSim, BEAM).
    Year(i32),
    /// Postprocessing covers every simulated year at once.
    Years(Vec<i32>),
}

impl StageScope {
    /// The single year for a per-year invocation.
    pub fn year(&self) -> Option<i32> {
        match self {
            StageScope::Year(y) => Some(*y),
            StageScope::Years(_) => None,
        }
    }

    /// Every year covered by the invocation.
    pub fn years(&self) -> Vec<i32> {
        match self {
            StageScope::Year(y) => vec![*y],
            StageScope::Years(ys) => ys.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_missing_setting() {
        let err = PilatesError::MissingSetting {
            key: "region".into(),
        };
        assert_eq!(err.to_string(), "Missing required setting 'region'");
    }

    #[test]
    fn error_display_invalid_setting() {
        let err = PilatesError::InvalidSetting {
            key: "step_delay_seconds".into(),
            message: "must be non-negative".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'step_delay_seconds': must be non-negative"
        );
    }

    #[test]
    fn error_display_create_dir() {
        let err = PilatesError::CreateDir {
            path: PathBuf::from("/out/pilates"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to create folder '/out/pilates': denied");
        assert_eq!(err.path(), Some(std::path::Path::new("/out/pilates")));
    }

    #[test]
    fn error_display_marker_write() {
        let err = PilatesError::MarkerWrite {
            path: PathBuf::from("/out/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(err.to_string(), "Failed to write marker '/out/a.txt': disk full");
    }

    #[test]
    fn marker_write_exposes_io_source() {
        use std::error::Error as _;
        let err = PilatesError::MarkerWrite {
            path: PathBuf::from("/out/a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PilatesError = io_err.into();
        assert!(matches!(err, PilatesError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn from_yaml_error_is_config_error() {
        let yaml_err = serde_yaml::from_str::<i32>("not: [a number").unwrap_err();
        let err: PilatesError = yaml_err.into();
        assert!(matches!(err, PilatesError::Settings(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn filesystem_errors_are_not_config_errors() {
        let err = PilatesError::CreateDir {
            path: PathBuf::from("x"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "x"),
        };
        assert!(!err.is_config_error());
        assert!(PilatesError::MissingSetting { key: "x".into() }.is_config_error());
    }

    // --- Stage ---

    #[test]
    fn stage_labels_match_log_names() {
        let labels: Vec<_> = Stage::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["ActivitySim", "Urbansim", "BEAM", "postprocessing"]);
    }

    #[test]
    fn stage_banners() {
        assert_eq!(Stage::Beam.banner(), "MOCK: RUNNING BEAM");
        assert_eq!(
            Stage::Postprocessing.banner(),
            "MOCK: RUNNING POSTPROCESSING"
        );
    }

    #[test]
    fn stage_from_name_is_case_insensitive() {
        assert_eq!(Stage::from_name("BEAM"), Some(Stage::Beam));
        assert_eq!(Stage::from_name("urbansim"), Some(Stage::UrbanSim));
        assert_eq!(Stage::from_name("ActivitySim"), Some(Stage::ActivitySim));
        assert_eq!(Stage::from_name("matsim"), None);
    }

    #[test]
    fn stage_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_string(&Stage::ActivitySim).unwrap(),
            "\"activity_sim\""
        );
        assert_eq!(
            serde_json::to_string(&Stage::Postprocessing).unwrap(),
            "\"postprocessing\""
        );
    }

    // --- StageScope ---

    #[test]
    fn scope_year_accessors() {
        let scope = StageScope::Year(2077);
        assert_eq!(scope.year(), Some(2077));
        assert_eq!(scope.years(), vec![2077]);
    }

    #[test]
    fn scope_years_accessors() {
        let scope = StageScope::Years(vec![2077, 2078]);
        assert_eq!(scope.year(), None);
        assert_eq!(scope.years(), vec![2077, 2078]);

        let empty = StageScope::Years(Vec::new());
        assert!(empty.years().is_empty());
    }
}
