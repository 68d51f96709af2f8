use crate::Count;
use crate::Probability;
use crate::chess::Line;
use anyhow::Context;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// aggregate tallies at one trie node: raw game counts plus the
/// rates derived by the sampling pipeline. `move_rate` is this
/// node's total over its parent's total and is absent at the root.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub total: Count,
    pub white: Count,
    pub black: Count,
    pub draw: Count,
    #[serde(default)]
    pub white_rate: Probability,
    #[serde(default)]
    pub black_rate: Probability,
    #[serde(default)]
    pub draw_rate: Probability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_rate: Option<Probability>,
}

/// one rating band of the move-frequency trie. read-only input,
/// produced by the out-of-scope sampling pipeline: every node is a
/// `stats` tally plus children keyed by SAN token.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Trie {
    pub stats: Tally,
    #[serde(flatten)]
    children: HashMap<String, Trie>,
}

impl Trie {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read stats file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("malformed stats file {}", path.display()))
    }

    pub fn child(&self, token: &str) -> Option<&Trie> {
        self.children.get(token)
    }

    /// walk a whole line from this node, None at the first unseen ply
    pub fn descend(&self, line: &Line) -> Option<&Trie> {
        line.tokens()
            .iter()
            .try_fold(self, |node, token| node.child(token))
    }

    /// observed frequency of the ply leading into this node.
    /// only meaningful below the root; a missing rate on a non-root
    /// node reads as unattainable.
    pub fn probability(&self) -> Probability {
        self.stats.move_rate.unwrap_or(0.)
    }
}
