//! Stage simulator trait and the lineup the runner executes.

use pilates_types::{Stage, StageScope};

use crate::config::RunConfig;
use crate::manifest::MarkerSet;
use crate::stages::{ActivitySimStage, BeamStage, PostprocessingStage, UrbanSimStage};

// ---------------------------------------------------------------------------
// StageSimulator trait
// ---------------------------------------------------------------------------

/// One simulated workflow stage.
///
/// A simulator only describes its output. The runner writes the markers,
/// waits the configured delay and logs completion the same way for every
/// stage.
pub trait StageSimulator: Send + Sync {
    fn stage(&self) -> Stage;

    /// The marker sets written for `scope`, in write order.
    fn manifest(&self, scope: &StageScope, config: &RunConfig) -> Vec<MarkerSet>;
}

// ---------------------------------------------------------------------------
// StageLineup
// ---------------------------------------------------------------------------

/// The per-year stages, run in order for every year, and the final stage run
/// once over all years.
pub struct StageLineup {
    per_year: Vec<Box<dyn StageSimulator>>,
    finalizer: Box<dyn StageSimulator>,
}

impl StageLineup {
    /// A lineup with no per-year stages.
    pub fn new(finalizer: impl StageSimulator + 'static) -> Self {
        Self {
            per_year: Vec::new(),
            finalizer: Box::new(finalizer),
        }
    }

    /// Append a per-year stage after the ones already registered.
    pub fn then(mut self, simulator: impl StageSimulator + 'static) -> Self {
        self.per_year.push(Box::new(simulator));
        self
    }

    pub fn per_year(&self) -> &[Box<dyn StageSimulator>] {
        &self.per_year
    }

    pub fn finalizer(&self) -> &dyn StageSimulator {
        self.finalizer.as_ref()
    }
}

impl Default for StageLineup {
    fn default() -> Self {
        default_lineup()
    }
}

/// ActivitySim, UrbanSim and BEAM per year, then postprocessing.
pub fn default_lineup() -> StageLineup {
    StageLineup::new(PostprocessingStage)
        .then(ActivitySimStage)
        .then(UrbanSimStage)
        .then(BeamStage)
}

/// The built-in simulator for a stage.
pub fn simulator_for(stage: Stage) -> Box<dyn StageSimulator> {
    match stage {
        Stage::ActivitySim => Box::new(ActivitySimStage),
        Stage::UrbanSim => Box::new(UrbanSimStage),
        Stage::Beam => Box::new(BeamStage),
        Stage::Postprocessing => Box::new(PostprocessingStage),
    }
}
