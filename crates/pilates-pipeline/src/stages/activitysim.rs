//! ActivitySim markers: shared inputs and outputs plus per-iteration results.

use pilates_types::{Stage, StageScope};

use crate::config::RunConfig;
use crate::manifest::{MarkerSet, ITERATIONS};
use crate::stage::StageSimulator;

const ROOT_MARKERS: &[&str] = &[
    "persons_in_root.txt",
    "households_in_root.txt",
    "skims_in_root.txt",
];
const DATA_MARKERS: &[&str] = &["persons.csv", "households.csv", "skims.csv", "SkimS.csv"];
const OUTPUT_MARKERS: &[&str] = &[
    "final_something.txt",
    "final_something_else.txt",
    "PIPEline.h5.txt",
    "pipeLINE.h5.txt",
];
const ITERATION_MARKERS: &[&str] = &[
    "final_something.txt",
    "final_something_else.txt",
    "plans.txt",
    "pLANs.txt",
    "persons.txt",
];

/// Root inputs, data and output markers, plus one output set per iteration.
pub struct ActivitySimStage;

impl StageSimulator for ActivitySimStage {
    fn stage(&self) -> Stage {
        Stage::ActivitySim
    }

    fn manifest(&self, scope: &StageScope, _config: &RunConfig) -> Vec<MarkerSet> {
        let mut sets = Vec::new();
        for year in scope.years() {
            sets.push(MarkerSet::new("pilates/activitysim", ROOT_MARKERS));
            sets.push(MarkerSet::new("pilates/activitysim/data", DATA_MARKERS));
            sets.push(MarkerSet::new("pilates/activitysim/output", OUTPUT_MARKERS));
            for iteration in ITERATIONS {
                sets.push(MarkerSet::new(
                    format!("pilates/activitysim/output/year-{year}-iteration-{iteration}"),
                    ITERATION_MARKERS,
                ));
            }
        }
        sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{manifest_paths, marker_count};

    #[test]
    fn manifest_for_one_year() {
        let config = RunConfig::new("sf-bay", 2077, 2078);
        let sets = ActivitySimStage.manifest(&StageScope::Year(2077), &config);

        let dirs: Vec<&str> = sets.iter().map(|s| s.dir.as_str()).collect();
        assert_eq!(
            dirs,
            vec![
                "pilates/activitysim",
                "pilates/activitysim/data",
                "pilates/activitysim/output",
                "pilates/activitysim/output/year-2077-iteration-1",
                "pilates/activitysim/output/year-2077-iteration-2",
                "pilates/activitysim/output/year-2077-iteration-3",
                "pilates/activitysim/output/year-2077-iteration-4",
            ]
        );
        assert_eq!(marker_count(&sets), 3 + 4 + 4 + 4 * 5);
    }

    #[test]
    fn mixed_case_names_are_preserved() {
        let config = RunConfig::new("sf-bay", 2077, 2078);
        let paths = manifest_paths(&ActivitySimStage.manifest(&StageScope::Year(2077), &config));
        assert!(paths.contains(&"pilates/activitysim/data/SkimS.csv".to_string()));
        assert!(paths.contains(&"pilates/activitysim/output/PIPEline.h5.txt".to_string()));
        assert!(paths.contains(
            &"pilates/activitysim/output/year-2077-iteration-3/pLANs.txt".to_string()
        ));
    }

    #[test]
    fn manifest_is_deterministic() {
        let config = RunConfig::new("sf-bay", 2077, 2078);
        let scope = StageScope::Year(2077);
        assert_eq!(
            ActivitySimStage.manifest(&scope, &config),
            ActivitySimStage.manifest(&scope, &config)
        );
    }
}
