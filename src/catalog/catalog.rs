use super::Opening;
use crate::console::Approve;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

/// the opening catalog: name -> record. loaded whole, mutated in
/// memory, and persisted only as a confirmed whole-document write.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    path: PathBuf,
    openings: BTreeMap<String, Opening>,
}

impl Catalog {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read catalog {}", path.display()))?;
        let openings = serde_json::from_str(&text)
            .with_context(|| format!("malformed catalog {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            openings,
        })
    }

    /// asking for an unknown opening is a caller error, not sparse data
    pub fn get(&self, name: &str) -> anyhow::Result<&Opening> {
        self.openings
            .get(name)
            .with_context(|| format!("opening {:?} not in catalog", name))
    }

    pub fn get_mut(&mut self, name: &str) -> anyhow::Result<&mut Opening> {
        self.openings
            .get_mut(name)
            .with_context(|| format!("opening {:?} not in catalog", name))
    }

    pub fn names(&self) -> Vec<String> {
        self.openings.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Opening)> {
        self.openings.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Opening)> {
        self.openings.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.openings.len()
    }
    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// confirmation-gated whole-document write. returns whether the
    /// catalog was actually persisted.
    pub fn save(&self, approve: &mut dyn Approve) -> anyhow::Result<bool> {
        if !approve.confirm(&format!("Update {}?", self.path.display())) {
            return Ok(false);
        }
        let text = serde_json::to_string_pretty(&self.openings)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("cannot write catalog {}", self.path.display()))?;
        log::info!("wrote catalog {}", self.path.display());
        Ok(true)
    }

    #[cfg(test)]
    pub fn from_openings(openings: BTreeMap<String, Opening>) -> Self {
        Self {
            path: PathBuf::new(),
            openings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_opening_fails_loudly() {
        let catalog = Catalog::default();
        assert!(catalog.get("Ruy Lopez").is_err());
    }

    #[test]
    fn declined_save_writes_nothing() {
        let catalog = Catalog::default();
        let saved = catalog.save(&mut crate::console::Always(false)).unwrap();
        assert!(!saved);
    }
}
