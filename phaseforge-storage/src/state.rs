//! Persisted form state
//!
//! Two document shapes exist. The current one keeps a state per view; the
//! legacy one held a single frontend phase map keyed by id string.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use phaseforge_core::{BuilderConfig, GlobalInputs, InputScope, PhaseId, StorageError, ViewKind};
use serde::{Deserialize, Serialize};

/// User edits to one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: PhaseId,
    pub title: String,
    pub template: String,
    #[serde(default)]
    pub overrides_enabled: bool,
    #[serde(default)]
    pub inputs: InputScope,
    #[serde(default)]
    pub last_output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub phases: Vec<Phase>,
    pub current_phase_id: PhaseId,
    pub last_modified: DateTime<Utc>,
}

impl ViewState {
    pub fn new(view: ViewKind) -> Self {
        Self {
            phases: Vec::new(),
            current_phase_id: view.default_phase(),
            last_modified: Utc::now(),
        }
    }

    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Views {
    pub frontend: ViewState,
    pub backend: ViewState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderState {
    pub current_view: ViewKind,
    pub views: Views,
    pub global_inputs: GlobalInputs,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self::new(&BuilderConfig::default())
    }
}

impl BuilderState {
    /// Fresh state: frontend view selected, both views on their first phase.
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            current_view: ViewKind::Frontend,
            views: Views {
                frontend: ViewState::new(ViewKind::Frontend),
                backend: ViewState::new(ViewKind::Backend),
            },
            global_inputs: GlobalInputs::from_config(config),
        }
    }

    pub fn view(&self, kind: ViewKind) -> &ViewState {
        match kind {
            ViewKind::Frontend => &self.views.frontend,
            ViewKind::Backend => &self.views.backend,
        }
    }

    pub fn view_mut(&mut self, kind: ViewKind) -> &mut ViewState {
        match kind {
            ViewKind::Frontend => &mut self.views.frontend,
            ViewKind::Backend => &mut self.views.backend,
        }
    }

    pub fn current(&self) -> &ViewState {
        self.view(self.current_view)
    }

    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.view(id.view()).phase(id)
    }

    /// Insert or replace a phase in the view it belongs to.
    pub fn upsert_phase(&mut self, phase: Phase) {
        let view = self.view_mut(phase.id.view());
        match view.phases.iter_mut().find(|p| p.id == phase.id) {
            Some(existing) => *existing = phase,
            None => view.phases.push(phase),
        }
        view.touch();
    }

    /// Select a phase, switching to its view.
    pub fn select_phase(&mut self, id: PhaseId) {
        self.current_view = id.view();
        let view = self.view_mut(id.view());
        view.current_phase_id = id;
        view.touch();
    }

    /// Every phase id must belong to the view that holds it.
    pub fn validate(&self) -> Result<(), StorageError> {
        for kind in ViewKind::all() {
            let view = self.view(kind);
            if !view.current_phase_id.belongs_to(kind) {
                return Err(StorageError::InvalidState {
                    key: format!("views.{}", kind.display_name().to_lowercase()),
                    reason: format!("current phase {} belongs to another view", view.current_phase_id),
                });
            }
            for (i, phase) in view.phases.iter().enumerate() {
                if !phase.id.belongs_to(kind) {
                    return Err(StorageError::InvalidState {
                        key: format!("views.{}", kind.display_name().to_lowercase()),
                        reason: format!("phase {} belongs to another view", phase.id),
                    });
                }
                if view.phases[..i].iter().any(|p| p.id == phase.id) {
                    return Err(StorageError::InvalidState {
                        key: format!("views.{}", kind.display_name().to_lowercase()),
                        reason: format!("phase {} stored twice", phase.id),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Phase entry of the legacy document. Ids are bare strings there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyPhase {
    pub id: String,
    pub title: String,
    pub template: String,
    pub overrides_enabled: bool,
    pub inputs: InputScope,
    pub last_output: String,
}

impl Default for LegacyPhase {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            template: String::new(),
            overrides_enabled: false,
            inputs: InputScope::new(),
            last_output: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBuilderState {
    #[serde(default)]
    pub phases: IndexMap<String, LegacyPhase>,
    #[serde(default)]
    pub global_inputs: GlobalInputs,
    #[serde(default)]
    pub current_phase_id: String,
}

impl LegacyBuilderState {
    /// Convert to the per-view shape.
    ///
    /// Phases whose id no longer parses are dropped. An unusable current
    /// phase falls back to the first frontend phase.
    pub fn migrate(self, config: &BuilderConfig) -> BuilderState {
        let mut state = BuilderState::new(config);
        state.global_inputs = self.global_inputs;

        for (key, legacy) in self.phases {
            let raw_id = if legacy.id.is_empty() { key } else { legacy.id };
            let id = match PhaseId::from_legacy_str(&raw_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(phase = %raw_id, error = %e, "dropping legacy phase");
                    continue;
                }
            };
            state.upsert_phase(Phase {
                id,
                title: legacy.title,
                template: legacy.template,
                overrides_enabled: legacy.overrides_enabled,
                inputs: legacy.inputs,
                last_output: legacy.last_output,
            });
        }

        match PhaseId::from_legacy_str(&self.current_phase_id) {
            Ok(id) if id.belongs_to(ViewKind::Frontend) => {
                state.views.frontend.current_phase_id = id;
            }
            _ => {
                tracing::warn!(
                    current = %self.current_phase_id,
                    "legacy current phase unusable, using default"
                );
            }
        }

        state
    }
}

// =============================================================================
// TESTS
// =============================================================================
