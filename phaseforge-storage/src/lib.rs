//! PhaseForge Storage - Persisted Form State
//!
//! Keeps the per-view phase edits and global inputs between sessions.
//! Documents written by older versions are migrated on first load.

pub mod repository;
pub mod state;
pub mod store;

pub use repository::StateRepository;
pub use state::{BuilderState, LegacyBuilderState, LegacyPhase, Phase, ViewState, Views};
pub use store::{FileStore, KeyValueStore, MemoryStore};
