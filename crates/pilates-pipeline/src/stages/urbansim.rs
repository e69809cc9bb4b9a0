//! UrbanSim result markers, one directory per year.

use pilates_types::{Stage, StageScope};

use crate::config::RunConfig;
use crate::manifest::MarkerSet;
use crate::stage::StageSimulator;

const RESULT_MARKERS: &[&str] = &[
    "urbansim-RESULTS.txt",
    "URBANSIM-results.txt",
    "URBANsim-results.txt",
    "urbanSIM-results.txt",
];

/// One set of result markers per year.
pub struct UrbanSimStage;

impl StageSimulator for UrbanSimStage {
    fn stage(&self) -> Stage {
        Stage::UrbanSim
    }

    fn manifest(&self, scope: &StageScope, _config: &RunConfig) -> Vec<MarkerSet> {
        scope
            .years()
            .into_iter()
            .map(|year| MarkerSet::new(format!("pilates/urbansim/output/year-{year}"), RESULT_MARKERS))
            .collect()
    }
}
