//! Marker manifests: which placeholder files a stage writes, and where.

use serde::Serialize;

/// Iteration numbers used by the ActivitySim and BEAM output layouts.
pub const ITERATIONS: [u32; 4] = [1, 2, 3, 4];

/// A directory relative to the output root plus the marker files written in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSet {
    pub dir: String,
    pub files: Vec<&'static str>,
}

impl MarkerSet {
    pub fn new(dir: impl Into<String>, files: &[&'static str]) -> Self {
        Self {
            dir: dir.into(),
            files: files.to_vec(),
        }
    }

    /// Relative `dir/file` paths, in write order.
    pub fn paths(&self) -> impl Iterator<Item = String> + '_ {
        self.files.iter().map(move |f| format!("{}/{}", self.dir, f))
    }
}

/// Flatten a manifest into its relative file paths.
pub fn manifest_paths(sets: &[MarkerSet]) -> Vec<String> {
    sets.iter().flat_map(MarkerSet::paths).collect()
}

/// Total number of marker writes a manifest performs.
pub fn marker_count(sets: &[MarkerSet]) -> usize {
    sets.iter().map(|s| s.files.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_dir_and_file() {
        let set = MarkerSet::new("pilates/urbansim/output/year-2077", &["a.txt", "b.txt"]);
        let paths: Vec<_> = set.paths().collect();
        assert_eq!(
            paths,
            vec![
                "pilates/urbansim/output/year-2077/a.txt",
                "pilates/urbansim/output/year-2077/b.txt"
            ]
        );
    }

    #[test]
    fn manifest_helpers_cover_every_set() {
        let sets = vec![
            MarkerSet::new("x", &["1", "2"]),
            MarkerSet::new("y", &["3"]),
        ];
        assert_eq!(manifest_paths(&sets), vec!["x/1", "x/2", "y/3"]);
        assert_eq!(marker_count(&sets), 3);
        assert_eq!(marker_count(&[]), 0);
    }

    #[test]
    fn marker_set_serializes_dir_and_files() {
        let set = MarkerSet::new("pilates/postprocessing/output", &["a_post_process_result.txt"]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["dir"], "pilates/postprocessing/output");
        assert_eq!(json["files"][0], "a_post_process_result.txt");
    }
}
