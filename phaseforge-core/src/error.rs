//! Error types for PhaseForge operations

use thiserror::Error;

/// Hard failure raised against a template.
///
/// `parse_tokens` never raises this. The checked parser does, carrying the
/// template, the character offset and the offending text in the fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TokenParseError {
    pub message: String,
    pub template: String,
    pub position: Option<usize>,
    pub token: Option<String>,
}

impl TokenParseError {
    pub fn new(message: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            template: template.into(),
            position: None,
            token: None,
        }
    }

    /// Attach the character offset the failure refers to.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the token text the failure refers to.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Phase catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown phase: {phase}")]
    UnknownPhase { phase: String },

    #[error("Phase defined more than once: {phase}")]
    DuplicatePhase { phase: String },

    #[error("Phase {phase} has an empty {field}")]
    EmptyField { phase: String, field: &'static str },

    #[error("Failed to parse catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Persisted state errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization failed for key {key}: {reason}")]
    Serialization { key: String, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("IO error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid stored state under {key}: {reason}")]
    InvalidState { key: String, reason: String },
}

/// Master error type for all PhaseForge errors.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Token parse error: {0}")]
    TokenParse(#[from] TokenParseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for PhaseForge operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

// =============================================================================
// TESTS
// =============================================================================
