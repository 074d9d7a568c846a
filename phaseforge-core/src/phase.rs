//! Phase identifiers and views
//!
//! A phase belongs to exactly one view. The view is carried in the type
//! rather than encoded in the identifier string; the string form only
//! exists at the storage boundary for older saved state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which workflow a phase belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    #[default]
    Frontend,
    Backend,
}

impl ViewKind {
    pub fn all() -> [ViewKind; 2] {
        [ViewKind::Frontend, ViewKind::Backend]
    }

    pub fn default_phase(&self) -> PhaseId {
        match self {
            ViewKind::Frontend => PhaseId::Frontend(FrontendPhase::RepoConstraints),
            ViewKind::Backend => PhaseId::Backend(BackendPhase::ApiDesign),
        }
    }

    /// Phases of this view in workflow order.
    pub fn phase_ids(&self) -> Vec<PhaseId> {
        match self {
            ViewKind::Frontend => FrontendPhase::all().into_iter().map(PhaseId::Frontend).collect(),
            ViewKind::Backend => BackendPhase::all().into_iter().map(PhaseId::Backend).collect(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ViewKind::Frontend => "Frontend",
            ViewKind::Backend => "Backend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FrontendPhase {
    #[serde(rename = "0")]
    RepoConstraints,
    #[serde(rename = "1")]
    Planning,
    #[serde(rename = "2")]
    Prd,
    #[serde(rename = "2.5")]
    Rfc,
    #[serde(rename = "3")]
    Implementation,
    #[serde(rename = "4")]
    Verification,
    #[serde(rename = "5")]
    FixReport,
    #[serde(rename = "6")]
    FixChecks,
}

impl FrontendPhase {
    pub fn all() -> [FrontendPhase; 8] {
        [
            FrontendPhase::RepoConstraints,
            FrontendPhase::Planning,
            FrontendPhase::Prd,
            FrontendPhase::Rfc,
            FrontendPhase::Implementation,
            FrontendPhase::Verification,
            FrontendPhase::FixReport,
            FrontendPhase::FixChecks,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrontendPhase::RepoConstraints => "0",
            FrontendPhase::Planning => "1",
            FrontendPhase::Prd => "2",
            FrontendPhase::Rfc => "2.5",
            FrontendPhase::Implementation => "3",
            FrontendPhase::Verification => "4",
            FrontendPhase::FixReport => "5",
            FrontendPhase::FixChecks => "6",
        }
    }

    fn from_number(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BackendPhase {
    #[serde(rename = "0")]
    ApiDesign,
    #[serde(rename = "1")]
    DataModel,
    #[serde(rename = "2")]
    ServiceArchitecture,
    #[serde(rename = "3")]
    SystemArchitecture,
}

impl BackendPhase {
    pub fn all() -> [BackendPhase; 4] {
        [
            BackendPhase::ApiDesign,
            BackendPhase::DataModel,
            BackendPhase::ServiceArchitecture,
            BackendPhase::SystemArchitecture,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendPhase::ApiDesign => "0",
            BackendPhase::DataModel => "1",
            BackendPhase::ServiceArchitecture => "2",
            BackendPhase::SystemArchitecture => "3",
        }
    }

    fn from_number(s: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.as_str() == s)
    }
}

/// Phase identifier, tagged by view.
///
/// Serialized as `{"kind": "frontend", "id": "2.5"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum PhaseId {
    Frontend(FrontendPhase),
    Backend(BackendPhase),
}

impl PhaseId {
    pub fn view(&self) -> ViewKind {
        match self {
            PhaseId::Frontend(_) => ViewKind::Frontend,
            PhaseId::Backend(_) => ViewKind::Backend,
        }
    }

    pub fn belongs_to(&self, view: ViewKind) -> bool {
        self.view() == view
    }

    /// String form used by older saved state (`"2.5"`, `"backend-1"`).
    pub fn legacy_str(&self) -> String {
        match self {
            PhaseId::Frontend(p) => p.as_str().to_string(),
            PhaseId::Backend(p) => format!("backend-{}", p.as_str()),
        }
    }

    /// Parse the per-view number (`"2.5"`, `"1"`) within a known view.
    pub fn parse_in(view: ViewKind, number: &str) -> Result<Self, PhaseIdParseError> {
        let parsed = match view {
            ViewKind::Frontend => FrontendPhase::from_number(number).map(PhaseId::Frontend),
            ViewKind::Backend => BackendPhase::from_number(number).map(PhaseId::Backend),
        };
        parsed.ok_or_else(|| PhaseIdParseError(format!("{}/{}", view.display_name(), number)))
    }

    pub fn from_legacy_str(s: &str) -> Result<Self, PhaseIdParseError> {
        let parsed = match s.strip_prefix("backend-") {
            Some(rest) => BackendPhase::from_number(rest).map(PhaseId::Backend),
            None => FrontendPhase::from_number(s).map(PhaseId::Frontend),
        };
        parsed.ok_or_else(|| PhaseIdParseError(s.to_string()))
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.legacy_str())
    }
}

impl FromStr for PhaseId {
    type Err = PhaseIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_legacy_str(s)
    }
}

/// Error when parsing an invalid phase identifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseIdParseError(pub String);

impl fmt::Display for PhaseIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid phase id: {}", self.0)
    }
}

impl std::error::Error for PhaseIdParseError {}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let id = PhaseId::Frontend(FrontendPhase::Rfc);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#"{"kind":"frontend","id":"2.5"}"#);

        let back: PhaseId = serde_json::from_str(r#"{"kind":"backend","id":"3"}"#).unwrap();
        assert_eq!(back, PhaseId::Backend(BackendPhase::SystemArchitecture));
    }

    #[test]
    fn test_legacy_str_round_trip() {
        for view in ViewKind::all() {
            for id in view.phase_ids() {
                assert_eq!(PhaseId::from_legacy_str(&id.legacy_str()), Ok(id));
            }
        }
    }

    #[test]
    fn test_legacy_str_rejects_unknown() {
        assert!(PhaseId::from_legacy_str("7").is_err());
        assert!(PhaseId::from_legacy_str("backend-4").is_err());
        assert!(PhaseId::from_legacy_str("backend-2.5").is_err());
        assert!(PhaseId::from_legacy_str("").is_err());
    }

    #[test]
    fn test_parse_in_view() {
        assert_eq!(
            PhaseId::parse_in(ViewKind::Backend, "2"),
            Ok(PhaseId::Backend(BackendPhase::ServiceArchitecture))
        );
        assert_eq!(
            PhaseId::parse_in(ViewKind::Frontend, "2"),
            Ok(PhaseId::Frontend(FrontendPhase::Prd))
        );
        assert!(PhaseId::parse_in(ViewKind::Backend, "2.5").is_err());
    }

    #[test]
    fn test_view_membership() {
        let backend = PhaseId::Backend(BackendPhase::DataModel);
        assert!(backend.belongs_to(ViewKind::Backend));
        assert!(!backend.belongs_to(ViewKind::Frontend));
        assert_eq!(ViewKind::Frontend.phase_ids().len(), 8);
        assert_eq!(ViewKind::Backend.phase_ids().len(), 4);
    }

    #[test]
    fn test_default_phases() {
        assert_eq!(ViewKind::Frontend.default_phase().legacy_str(), "0");
        assert_eq!(ViewKind::Backend.default_phase().legacy_str(), "backend-0");
        assert_eq!(ViewKind::Backend.display_name(), "Backend");
    }
}
