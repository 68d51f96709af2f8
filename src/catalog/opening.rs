use crate::Count;
use crate::Probability;
use crate::chess::Line;
use serde::Deserialize;
use serde::Serialize;
use shakmaty::Color;
use std::collections::BTreeMap;

/// main-line sentinel for structural catalog entries that are not
/// real openings (section headers, dividers)
pub const SYSTEM: &str = "[SYSTEM]";
/// stats sentinel for openings whose aggregated stats are by
/// definition identical to their main-line stats
pub const USE_MAIN: &str = "[USE MAIN]";

/// computed summary for one rating band, written back to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: Count,
    pub white_rate: Probability,
    pub black_rate: Probability,
    pub draw_rate: Probability,
    pub prevalence: Probability,
    /// expected games until the position arises (0 when never)
    pub prevalence_games: Count,
    pub attainability: Probability,
    /// expected games until the opening is attained (0 when never)
    pub attainability_games: Count,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_try: Option<String>,
}

/// aggregated stats block: either per-rating summaries or a marker
/// deferring to the main-line block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stats {
    Marker(String),
    Rated(BTreeMap<String, Summary>),
}

impl Stats {
    pub fn use_main() -> Self {
        Self::Marker(USE_MAIN.to_string())
    }
}

/// one catalog entry: the canonical main line, its curated
/// transpositions, and computed per-rating summaries
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Opening {
    pub main: String,
    /// overrides color derivation when `main` is abbreviated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_real: Option<String>,
    /// None until transposition search has run for this opening
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpositions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_main: Option<BTreeMap<String, Summary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

impl Opening {
    pub fn is_system(&self) -> bool {
        self.main == SYSTEM
    }

    pub fn line(&self) -> Line {
        Line::parse(&self.main)
    }

    /// whose opening this is, derived from main-line parity
    pub fn color(&self) -> Color {
        match &self.main_real {
            Some(real) => Line::parse(real).color(),
            None => self.line().color(),
        }
    }

    /// curated transpositions as parsed lines
    pub fn transposed(&self) -> Vec<Line> {
        self.transpositions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|text| Line::parse(text))
            .collect()
    }

    /// main line first, then every transposition
    pub fn lines(&self) -> Vec<Line> {
        std::iter::once(self.line())
            .chain(self.transposed())
            .collect()
    }
}
