//! PhaseForge Core - Value Types
//!
//! Scopes, phase identifiers, the phase catalog, configuration and the error
//! taxonomy. Every other crate in the workspace depends on this one.
//! Nothing here parses templates.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod phase;
pub mod scope;

pub use catalog::{PhaseCatalog, PhaseConfig};
pub use commands::{
    command_for, CommandKind, PackageManager, PackageManagerCommands, PackageManagerParseError,
};
pub use config::{BuilderConfig, DEFAULT_LEGACY_STORAGE_KEY, DEFAULT_STORAGE_KEY};
pub use error::{
    CatalogError, ConfigError, ForgeError, ForgeResult, StorageError, TokenParseError,
};
pub use phase::{BackendPhase, FrontendPhase, PhaseId, PhaseIdParseError, ViewKind};
pub use scope::{
    is_blank, GlobalInputs, InputScope, TokenKind, DATE_ISO, FEATURE_NAME, FEATURE_SLUG,
    LEGACY_GLOBAL_TOKENS, OWNER, PROJECT_NAME, REPO_URL, REQUIRED_GLOBAL_TOKENS, REQUIREMENTS,
    STACK,
};
