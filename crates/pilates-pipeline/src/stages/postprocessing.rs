//! Postprocessing markers, written once after the year loop.

use pilates_types::{Stage, StageScope};

use crate::config::RunConfig;
use crate::manifest::MarkerSet;
use crate::stage::StageSimulator;

const RESULT_MARKERS: &[&str] = &["a_post_process_result.txt"];
const MEP_MARKERS: &[&str] = &["plans.txt", "persons.txt", "jobs.txt", "households.txt"];

/// One global result marker plus an MEP set per simulated year.
pub struct PostprocessingStage;

impl StageSimulator for PostprocessingStage {
    fn stage(&self) -> Stage {
        Stage::Postprocessing
    }

    fn manifest(&self, scope: &StageScope, _config: &RunConfig) -> Vec<MarkerSet> {
        let mut sets = vec![MarkerSet::new("pilates/postprocessing/output", RESULT_MARKERS)];
        sets.extend(
            scope
                .years()
                .into_iter()
                .map(|year| MarkerSet::new(format!("pilates/postprocessing/MEP/{year}"), MEP_MARKERS)),
        );
        sets
    }
}
