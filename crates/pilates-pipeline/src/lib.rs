//! Mock PILATES pipeline runner.
//!
//! Imitates the multi-year ActivitySim → UrbanSim → BEAM → postprocessing
//! workflow: every stage writes placeholder marker files into the output
//! layout the real models produce, then waits a configured delay.

pub mod config;
pub mod delay;
pub mod engine;
pub mod events;
pub mod manifest;
pub mod marker;
pub mod stage;
pub mod stages;
pub mod transforms;

pub use config::{RunConfig, DEFAULT_SETTINGS_FILE, REQUIRED_SETTINGS};
pub use delay::{Delay, NoDelay, RecordingDelay, TokioDelay};
pub use engine::{PipelineRunner, RunReport, StageInvocation};
pub use events::{EventEmitter, PipelineEvent};
pub use manifest::{manifest_paths, marker_count, MarkerSet, ITERATIONS};
pub use marker::{marker_record, write_manifest, write_markers};
pub use stage::{default_lineup, simulator_for, StageLineup, StageSimulator};
pub use stages::{ActivitySimStage, BeamStage, PostprocessingStage, UrbanSimStage};
pub use transforms::{expand_env, expand_variables};
