//! Session-lifetime state: the displayed catalog and the selected model.
//!
//! Views receive a [`SessionContext`] explicitly instead of reaching for
//! globals. Both slots are written from the single command loop, so no
//! locking is involved.

use crate::catalog::{self, visible_models, ModelDescriptor};

#[derive(Debug, Clone)]
pub struct SessionContext {
    selected: Option<ModelDescriptor>,
    catalog: Vec<ModelDescriptor>,
    default: ModelDescriptor,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// Empty context whose default is the built-in reliable model.
    pub fn new() -> Self {
        Self::with_default(catalog::default_model())
    }

    pub fn with_default(default: ModelDescriptor) -> Self {
        Self {
            selected: None,
            catalog: Vec::new(),
            default,
        }
    }

    /// The selected model, initialised to the default on first use.
    pub fn selected(&mut self) -> &ModelDescriptor {
        self.selected.get_or_insert_with(|| self.default.clone())
    }

    /// Replaces the selection. No validation against the catalog.
    pub fn select(&mut self, model: ModelDescriptor) {
        self.selected = Some(model);
    }

    /// Selects a model by id.
    ///
    /// Uses the catalog entry when there is one; otherwise selects an
    /// unlisted descriptor and returns `false`, since such a model is
    /// displayable but not known to work.
    pub fn select_id(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(model) => {
                let model = model.clone();
                self.select(model);
                true
            }
            None => {
                self.select(ModelDescriptor::unlisted(id));
                false
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&ModelDescriptor> {
        self.catalog.iter().find(|m| m.id == id)
    }

    pub fn catalog(&self) -> &[ModelDescriptor] {
        &self.catalog
    }

    /// Installs a freshly fetched catalog.
    ///
    /// A selection that is not among the free models of the new catalog is
    /// reset to the default. Returns `true` when that happened.
    pub fn set_catalog(&mut self, catalog: Vec<ModelDescriptor>) -> bool {
        self.catalog = catalog;
        let Some(ref current) = self.selected else {
            return false;
        };
        let listed = visible_models(&self.catalog, None, true)
            .iter()
            .any(|m| m.id == current.id);
        if listed {
            // Pick up the fresh descriptor for the same id.
            let fresh = self.find(&current.id).cloned();
            self.selected = fresh;
            false
        } else {
            tracing::warn!(model = %current.id, "selected model no longer listed, resetting to default");
            self.selected = Some(
                self.find(&self.default.id)
                    .cloned()
                    .unwrap_or_else(|| self.default.clone()),
            );
            true
        }
    }

    /// Whether the selection appears in the current catalog.
    pub fn is_selection_listed(&self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|s| self.catalog.iter().any(|m| m.id == s.id))
    }
}
