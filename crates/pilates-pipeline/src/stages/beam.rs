//! BEAM markers under the region's output tree, one directory per iteration.

use pilates_types::{Stage, StageScope};

use crate::config::RunConfig;
use crate::manifest::{MarkerSet, ITERATIONS};
use crate::stage::StageSimulator;

const OUTPUT_MARKERS: &[&str] = &["beam_output_file_1.txt", "beam_output_file_2.txt"];
const ITERS_MARKERS: &[&str] = &[
    "beam_output_file_3.txt",
    "beam_output_FILE_3.txt",
    "BEAM_output_file_3.txt",
    "beam_output_file_4.txt",
];

/// Two output markers per iteration plus four under `ITERS/it.0`, nested
/// under the configured region.
pub struct BeamStage;

impl StageSimulator for BeamStage {
    fn stage(&self) -> Stage {
        Stage::Beam
    }

    fn manifest(&self, scope: &StageScope, config: &RunConfig) -> Vec<MarkerSet> {
        let mut sets = Vec::new();
        for year in scope.years() {
            for iteration in ITERATIONS {
                let base = format!(
                    "pilates/beam/beam_output/{}/year-{year}-iteration-{iteration}",
                    config.region
                );
                sets.push(MarkerSet::new(base.clone(), OUTPUT_MARKERS));
                sets.push(MarkerSet::new(format!("{base}/ITERS/it.0"), ITERS_MARKERS));
            }
        }
        sets
    }
}
