//! Read-only phase catalog
//!
//! Loaded once at startup and passed around by reference.

use crate::error::CatalogError;
use crate::phase::{PhaseId, ViewKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.toml");

/// Static definition of one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    pub id: PhaseId,
    pub title: String,
    pub description: String,
    pub template: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    phase: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    view: ViewKind,
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    template: String,
}

/// Immutable map from phase identifier to its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseCatalog {
    phases: IndexMap<PhaseId, PhaseConfig>,
}

impl PhaseCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let mut phases = IndexMap::with_capacity(file.phase.len());

        for entry in file.phase {
            let id = PhaseId::parse_in(entry.view, &entry.id).map_err(|e| {
                CatalogError::UnknownPhase { phase: e.0 }
            })?;
            if entry.title.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    phase: id.legacy_str(),
                    field: "title",
                });
            }
            if entry.template.trim().is_empty() {
                return Err(CatalogError::EmptyField {
                    phase: id.legacy_str(),
                    field: "template",
                });
            }
            let config = PhaseConfig {
                id,
                title: entry.title,
                description: entry.description,
                template: entry.template,
            };
            if phases.insert(id, config).is_some() {
                return Err(CatalogError::DuplicatePhase {
                    phase: id.legacy_str(),
                });
            }
        }

        tracing::debug!(phases = phases.len(), "loaded phase catalog");
        Ok(Self { phases })
    }

    pub fn get(&self, id: PhaseId) -> Option<&PhaseConfig> {
        self.phases.get(&id)
    }

    /// Like [`get`](Self::get), but a missing phase is an error.
    pub fn require(&self, id: PhaseId) -> Result<&PhaseConfig, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::UnknownPhase {
            phase: id.legacy_str(),
        })
    }

    /// Phases of a view in catalog order.
    pub fn phases_for(&self, view: ViewKind) -> impl Iterator<Item = &PhaseConfig> {
        self.phases.values().filter(move |p| p.id.belongs_to(view))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseConfig> {
        self.phases.values()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
