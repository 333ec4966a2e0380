use std::collections::BTreeMap;

use crate::{
    composition::model::Composition,
    foundation::error::{FramelineError, FramelineResult},
};

/// The set of compositions a driver can pick from, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Project {
    compositions: BTreeMap<String, Composition>, // stable keys
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a composition; ids must be unique.
    pub fn register(&mut self, comp: Composition) -> FramelineResult<()> {
        let id = comp.id().to_string();
        if self.compositions.contains_key(&id) {
            return Err(FramelineError::invalid_composition(format!(
                "duplicate composition id '{id}'"
            )));
        }
        tracing::debug!(composition = %id, "registered composition");
        self.compositions.insert(id, comp);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Composition> {
        self.compositions.get(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.compositions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.compositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compositions.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
