//! Input scopes and the global input record

use crate::commands::PackageManagerCommands;
use crate::config::BuilderConfig;
use crate::PackageManager;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat, insertion-ordered mapping from token name to value.
///
/// Two scopes exist: global (project-wide) and phase (one phase only).
pub type InputScope = IndexMap<String, String>;

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const FEATURE_NAME: &str = "FEATURE_NAME";
pub const FEATURE_SLUG: &str = "FEATURE_SLUG";
pub const REQUIREMENTS: &str = "REQUIREMENTS";
pub const OWNER: &str = "OWNER";
pub const REPO_URL: &str = "REPO_URL";
pub const STACK: &str = "STACK";
pub const DATE_ISO: &str = "DATE_ISO";

/// Token names every global scope provides.
pub const REQUIRED_GLOBAL_TOKENS: [&str; 4] = [PROJECT_NAME, FEATURE_NAME, FEATURE_SLUG, REQUIREMENTS];

/// Optional global token names kept for older templates.
pub const LEGACY_GLOBAL_TOKENS: [&str; 4] = [OWNER, REPO_URL, STACK, DATE_ISO];

/// Blank means absent, empty, or whitespace only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Which scope, if any, owns a token name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Key of the global scope
    Global,
    /// Key of the phase scope only
    Phase,
    /// Well-formed name with no current source
    Custom,
    /// Malformed name with no current source
    Unknown,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Global => "global",
            TokenKind::Phase => "phase",
            TokenKind::Custom => "custom",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Project-wide values shared by every phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalInputs {
    pub project_name: String,
    pub feature_name: String,
    pub feature_slug: String,
    pub requirements: String,
    pub package_manager: PackageManager,
    pub is_monorepo: bool,

    // Legacy fields, only present in older saved state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_iso: Option<String>,
}

impl Default for GlobalInputs {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            feature_name: String::new(),
            feature_slug: String::new(),
            requirements: String::new(),
            package_manager: PackageManager::default(),
            is_monorepo: true,
            owner: None,
            repo_url: None,
            stack: None,
            date_iso: None,
        }
    }
}

impl GlobalInputs {
    /// Empty inputs using the configured package manager defaults.
    pub fn from_config(config: &BuilderConfig) -> Self {
        Self {
            package_manager: config.default_package_manager,
            is_monorepo: config.default_monorepo,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> PackageManagerCommands {
        PackageManagerCommands::generate(self.package_manager, self.is_monorepo)
    }

    /// Build the global scope under its fixed token names.
    ///
    /// Order: the four required names, the `PKG_*` command tokens, then any
    /// legacy names that are set (when the config keeps them).
    pub fn to_scope(&self, config: &BuilderConfig) -> InputScope {
        let mut scope = InputScope::new();
        scope.insert(PROJECT_NAME.to_string(), self.project_name.clone());
        scope.insert(FEATURE_NAME.to_string(), self.feature_name.clone());
        scope.insert(FEATURE_SLUG.to_string(), self.feature_slug.clone());
        scope.insert(REQUIREMENTS.to_string(), self.requirements.clone());

        for (token, command) in self.commands().token_pairs() {
            scope.insert(token.to_string(), command.to_string());
        }

        if config.include_legacy_fields {
            let legacy = [
                (OWNER, &self.owner),
                (REPO_URL, &self.repo_url),
                (STACK, &self.stack),
                (DATE_ISO, &self.date_iso),
            ];
            for (token, value) in legacy {
                if let Some(value) = value {
                    scope.insert(token.to_string(), value.clone());
                }
            }
        }

        scope
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> GlobalInputs {
        GlobalInputs {
            project_name: "Acme".to_string(),
            feature_name: "Login".to_string(),
            feature_slug: "login".to_string(),
            requirements: "Users can sign in".to_string(),
            ..GlobalInputs::default()
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some(" \t\n")));
        assert!(!is_blank(Some("x")));
    }

    #[test]
    fn test_to_scope_order_without_legacy() {
        let scope = filled().to_scope(&BuilderConfig::default());
        let keys: Vec<&str> = scope.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "PROJECT_NAME",
                "FEATURE_NAME",
                "FEATURE_SLUG",
                "REQUIREMENTS",
                "PKG_LINT",
                "PKG_TYPECHECK",
                "PKG_TEST",
                "PKG_BUILD"
            ]
        );
        assert_eq!(scope["PKG_LINT"], "pnpm -w lint");
    }

    #[test]
    fn test_to_scope_includes_set_legacy_fields() {
        let inputs = GlobalInputs {
            owner: Some("Jane".to_string()),
            date_iso: Some("2024-01-01".to_string()),
            ..filled()
        };
        let scope = inputs.to_scope(&BuilderConfig::default());
        assert_eq!(scope.get(OWNER).map(String::as_str), Some("Jane"));
        assert_eq!(scope.get(DATE_ISO).map(String::as_str), Some("2024-01-01"));
        assert!(!scope.contains_key(STACK));
        assert!(!scope.contains_key(REPO_URL));
    }

    #[test]
    fn test_to_scope_drops_legacy_when_disabled() {
        let inputs = GlobalInputs {
            owner: Some("Jane".to_string()),
            ..filled()
        };
        let config = BuilderConfig {
            include_legacy_fields: false,
            ..BuilderConfig::default()
        };
        assert!(!inputs.to_scope(&config).contains_key(OWNER));
    }

    #[test]
    fn test_global_inputs_deserialize_legacy_shape() {
        let json = r#"{"projectName":"Acme","featureName":"F","featureSlug":"f","owner":"o","stack":"Vue","dateIso":"2024-01-01"}"#;
        let inputs: GlobalInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.project_name, "Acme");
        assert_eq!(inputs.requirements, "");
        assert_eq!(inputs.package_manager, PackageManager::Pnpm);
        assert!(inputs.is_monorepo);
        assert_eq!(inputs.stack.as_deref(), Some("Vue"));
    }

    #[test]
    fn test_token_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TokenKind::Custom).unwrap(), "\"custom\"");
        assert_eq!(TokenKind::Unknown.to_string(), "unknown");
    }
}
