use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

fn default_cap() -> usize {
    10_000
}

/// runtime configuration, read once at startup from a JSON file.
/// a missing or malformed file refuses to run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// directory holding per-rating stats tries
    pub stats_dir: PathBuf,
    /// path to the opening catalog
    pub openings: PathBuf,
    /// target rating band
    pub rating: u32,
    /// how many half-moves deep the stats tries were built
    pub depth: usize,
    /// ceiling on |W|! x |B|! interleavings examined per opening
    #[serde(default = "default_cap")]
    pub max_permutations: usize,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("malformed config file {}", path))
    }

    /// stats tries are stored one file per rating band
    pub fn stats_path(&self) -> PathBuf {
        self.stats_dir
            .join(format!("{}-depth{}.json", self.rating, self.depth))
    }
}
