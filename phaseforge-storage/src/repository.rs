//! Load and save of the form state
//!
//! Loading never fails on bad data: a document that does not parse or does
//! not validate is logged and replaced by a fresh state. Store failures are
//! returned.

use crate::state::{BuilderState, LegacyBuilderState};
use crate::store::KeyValueStore;
use phaseforge_core::{BuilderConfig, StorageError};

/// Form state persisted under the configured keys of a [`KeyValueStore`].
pub struct StateRepository<S: KeyValueStore> {
    store: S,
    config: BuilderConfig,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S, config: BuilderConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Current document, else a migrated legacy document, else a fresh state.
    ///
    /// A migrated legacy document is written under the current key and the
    /// legacy key is removed.
    pub fn load(&self) -> Result<BuilderState, StorageError> {
        if let Some(raw) = self.store.get(&self.config.storage_key)? {
            return Ok(self.decode_current(&raw));
        }

        if let Some(raw) = self.store.get(&self.config.legacy_storage_key)? {
            match serde_json::from_str::<LegacyBuilderState>(&raw) {
                Ok(legacy) => {
                    let state = legacy.migrate(&self.config);
                    self.save(&state)?;
                    self.store.remove(&self.config.legacy_storage_key)?;
                    tracing::info!(
                        from = %self.config.legacy_storage_key,
                        to = %self.config.storage_key,
                        "migrated legacy form state"
                    );
                    return Ok(state);
                }
                Err(e) => {
                    tracing::warn!(
                        key = %self.config.legacy_storage_key,
                        error = %e,
                        "legacy form state unreadable, ignoring"
                    );
                }
            }
        }

        Ok(BuilderState::new(&self.config))
    }

    fn decode_current(&self, raw: &str) -> BuilderState {
        let key = &self.config.storage_key;
        let state = match serde_json::from_str::<BuilderState>(raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored form state unreadable, using defaults");
                return BuilderState::new(&self.config);
            }
        };
        match state.validate() {
            Ok(()) => state,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored form state invalid, using defaults");
                BuilderState::new(&self.config)
            }
        }
    }

    pub fn save(&self, state: &BuilderState) -> Result<(), StorageError> {
        state.validate()?;
        let key = &self.config.storage_key;
        let json = serde_json::to_string(state).map_err(|e| StorageError::Serialization {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.store.set(key, &json)?;
        tracing::debug!(key = %key, bytes = json.len(), "saved form state");
        Ok(())
    }

    /// Drop both documents. The next load starts fresh.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.store.remove(&self.config.storage_key)?;
        self.store.remove(&self.config.legacy_storage_key)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use crate::store::{FileStore, MemoryStore};
    use phaseforge_core::{
        BackendPhase, FrontendPhase, InputScope, PhaseId, ViewKind, DEFAULT_LEGACY_STORAGE_KEY,
        DEFAULT_STORAGE_KEY,
    };
    use proptest::prelude::*;

    fn repo() -> StateRepository<MemoryStore> {
        StateRepository::new(MemoryStore::new(), BuilderConfig::default())
    }

    fn edited_phase(id: PhaseId, value: &str) -> Phase {
        let mut inputs = InputScope::new();
        inputs.insert("API_ENDPOINT".to_string(), value.to_string());
        Phase {
            id,
            title: "Edited".to_string(),
            template: "[API_ENDPOINT]".to_string(),
            overrides_enabled: true,
            inputs,
            last_output: value.to_string(),
        }
    }

    #[test]
    fn test_empty_store_gives_default() {
        let state = repo().load().unwrap();
        assert_eq!(state.current_view, ViewKind::Frontend);
        assert_eq!(state.global_inputs, BuilderState::default().global_inputs);
        assert!(state.views.frontend.phases.is_empty());
        assert_eq!(state.views.backend.current_phase_id, ViewKind::Backend.default_phase());
    }

    #[test]
    fn test_save_then_load() {
        let repo = repo();
        let mut state = BuilderState::default();
        state.global_inputs.project_name = "Acme".to_string();
        state.upsert_phase(edited_phase(PhaseId::Backend(BackendPhase::ApiDesign), "/v1"));
        state.select_phase(PhaseId::Backend(BackendPhase::ApiDesign));
        repo.save(&state).unwrap();

        assert_eq!(repo.load().unwrap(), state);
    }

    #[test]
    fn test_save_rejects_invalid_state() {
        let repo = repo();
        let mut state = BuilderState::default();
        state.views.frontend.current_phase_id = PhaseId::Backend(BackendPhase::DataModel);
        assert!(matches!(repo.save(&state), Err(StorageError::InvalidState { .. })));
        assert!(repo.store().is_empty().unwrap());
    }

    #[test]
    fn test_corrupt_document_falls_back() {
        let repo = repo();
        repo.store().set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let state = repo.load().unwrap();
        assert_eq!(state.current_view, ViewKind::Frontend);
        assert!(state.views.backend.phases.is_empty());
    }

    #[test]
    fn test_cross_view_document_falls_back() {
        let repo = repo();
        let mut state = BuilderState::default();
        state.views.frontend.phases.push(edited_phase(PhaseId::Backend(BackendPhase::DataModel), "x"));
        let json = serde_json::to_string(&state).unwrap();
        repo.store().set(DEFAULT_STORAGE_KEY, &json).unwrap();

        let loaded = repo.load().unwrap();
        assert!(loaded.views.frontend.phases.is_empty());
    }

    #[test]
    fn test_legacy_document_is_migrated_once() {
        let repo = repo();
        let legacy = r#"{
            "phases": {"3": {"id": "3", "title": "Impl", "template": "[X]", "inputs": {"X": "y"}}},
            "globalInputs": {"projectName": "Acme"},
            "currentPhaseId": "3"
        }"#;
        repo.store().set(DEFAULT_LEGACY_STORAGE_KEY, legacy).unwrap();

        let state = repo.load().unwrap();
        let id = PhaseId::Frontend(FrontendPhase::Implementation);
        assert_eq!(state.views.frontend.current_phase_id, id);
        assert_eq!(state.phase(id).map(|p| p.inputs["X"].as_str()), Some("y"));
        assert_eq!(state.global_inputs.project_name, "Acme");

        assert_eq!(repo.store().get(DEFAULT_LEGACY_STORAGE_KEY).unwrap(), None);
        assert!(repo.store().get(DEFAULT_STORAGE_KEY).unwrap().is_some());
        assert_eq!(repo.load().unwrap(), state);
    }

    #[test]
    fn test_current_document_wins_over_legacy() {
        let repo = repo();
        let mut state = BuilderState::default();
        state.global_inputs.project_name = "Current".to_string();
        repo.save(&state).unwrap();
        repo.store()
            .set(DEFAULT_LEGACY_STORAGE_KEY, r#"{"globalInputs": {"projectName": "Old"}}"#)
            .unwrap();

        assert_eq!(repo.load().unwrap().global_inputs.project_name, "Current");
        assert!(repo.store().get(DEFAULT_LEGACY_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_unreadable_legacy_is_left_alone() {
        let repo = repo();
        repo.store().set(DEFAULT_LEGACY_STORAGE_KEY, "[]").unwrap();
        let state = repo.load().unwrap();
        assert!(state.views.frontend.phases.is_empty());
        assert_eq!(repo.store().get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_reset_clears_both_keys() {
        let repo = repo();
        repo.save(&BuilderState::default()).unwrap();
        repo.store().set(DEFAULT_LEGACY_STORAGE_KEY, "{}").unwrap();
        repo.reset().unwrap();
        assert!(repo.store().is_empty().unwrap());
    }

    #[test]
    fn test_custom_keys() {
        let config = BuilderConfig {
            storage_key: "forge:state".to_string(),
            ..BuilderConfig::default()
        };
        let repo = StateRepository::new(MemoryStore::new(), config);
        repo.save(&BuilderState::default()).unwrap();
        assert!(repo.store().get("forge:state").unwrap().is_some());
        assert_eq!(repo.store().get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = StateRepository::new(FileStore::new(dir.path()), BuilderConfig::default());
        let mut state = BuilderState::default();
        state.upsert_phase(edited_phase(PhaseId::Frontend(FrontendPhase::Rfc), "/v2"));
        repo.save(&state).unwrap();

        assert!(dir.path().join("phaseBuilder_v2.json").exists());
        let reopened = StateRepository::new(FileStore::new(dir.path()), BuilderConfig::default());
        assert_eq!(reopened.load().unwrap(), state);
    }

    fn arb_phase_id() -> impl Strategy<Value = PhaseId> {
        let ids: Vec<PhaseId> = ViewKind::all()
            .into_iter()
            .flat_map(|v| v.phase_ids())
            .collect();
        prop::sample::select(ids)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_saved_state_loads_back(
            ids in prop::collection::vec(arb_phase_id(), 0..8),
            value in "[a-z/]{0,12}",
            selected in arb_phase_id(),
        ) {
            let repo = repo();
            let mut state = BuilderState::default();
            for id in ids {
                state.upsert_phase(edited_phase(id, &value));
            }
            state.select_phase(selected);
            prop_assert!(state.validate().is_ok());

            repo.save(&state).unwrap();
            prop_assert_eq!(repo.load().unwrap(), state);
        }
    }
}
