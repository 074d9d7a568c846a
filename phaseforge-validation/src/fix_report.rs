//! Fix-report form
//!
//! The fix-report phase has a structured form instead of free phase inputs.
//! Its fields are checked against a fixed rule table and then flattened into
//! the token scope the fix-report template expects.

use crate::types::{ValidationError, ValidationErrorKind, ValidationState};
use once_cell::sync::Lazy;
use phaseforge_core::InputScope;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugSeverity {
    Blocker,
    Critical,
    Major,
    #[default]
    Minor,
    Trivial,
}

impl BugSeverity {
    pub fn all() -> [BugSeverity; 5] {
        [
            BugSeverity::Blocker,
            BugSeverity::Critical,
            BugSeverity::Major,
            BugSeverity::Minor,
            BugSeverity::Trivial,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BugSeverity::Blocker => "blocker",
            BugSeverity::Critical => "critical",
            BugSeverity::Major => "major",
            BugSeverity::Minor => "minor",
            BugSeverity::Trivial => "trivial",
        }
    }
}

impl fmt::Display for BugSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BugSeverity {
    type Err = BugSeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| BugSeverityParseError(s.to_string()))
    }
}

/// Error when parsing an invalid severity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugSeverityParseError(pub String);

impl fmt::Display for BugSeverityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid bug severity: {}", self.0)
    }
}

impl std::error::Error for BugSeverityParseError {}

/// One field of the fix-report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FixReportField {
    BugTitle,
    CommitSha,
    BrowserOs,
    UrlRoute,
    Severity,
    PrdFile,
    FeatureName,
    PrdGoalsRelevant,
    PrdNongoalsRelevant,
    PrdFrIds,
    PrdTypesStable,
    RfcFile,
    RfcAllowlistPaths,
    RfcZeroInfraSummary,
    RfcOptionalAdjustments,
    ReproSteps,
    ExpectedBehavior,
    ActualBehavior,
    SuspectedRootCause,
}

impl FixReportField {
    pub fn all() -> [FixReportField; 19] {
        use FixReportField::*;
        [
            BugTitle,
            CommitSha,
            BrowserOs,
            UrlRoute,
            Severity,
            PrdFile,
            FeatureName,
            PrdGoalsRelevant,
            PrdNongoalsRelevant,
            PrdFrIds,
            PrdTypesStable,
            RfcFile,
            RfcAllowlistPaths,
            RfcZeroInfraSummary,
            RfcOptionalAdjustments,
            ReproSteps,
            ExpectedBehavior,
            ActualBehavior,
            SuspectedRootCause,
        ]
    }

    /// Form field name, as reported in validation errors.
    pub fn as_str(&self) -> &'static str {
        use FixReportField::*;
        match self {
            BugTitle => "bugTitle",
            CommitSha => "commitSha",
            BrowserOs => "browserOs",
            UrlRoute => "urlRoute",
            Severity => "severity",
            PrdFile => "prdFile",
            FeatureName => "featureName",
            PrdGoalsRelevant => "prdGoalsRelevant",
            PrdNongoalsRelevant => "prdNongoalsRelevant",
            PrdFrIds => "prdFrIds",
            PrdTypesStable => "prdTypesStable",
            RfcFile => "rfcFile",
            RfcAllowlistPaths => "rfcAllowlistPaths",
            RfcZeroInfraSummary => "rfcZeroInfraSummary",
            RfcOptionalAdjustments => "rfcOptionalAdjustments",
            ReproSteps => "reproSteps",
            ExpectedBehavior => "expectedBehavior",
            ActualBehavior => "actualBehavior",
            SuspectedRootCause => "suspectedRootCause",
        }
    }

    /// Template token fed by this field.
    pub fn token(&self) -> &'static str {
        use FixReportField::*;
        match self {
            BugTitle => "BUG_TITLE",
            CommitSha => "COMMIT_SHA",
            BrowserOs => "BROWSER_OS",
            UrlRoute => "URL_ROUTE",
            Severity => "SEVERITY",
            PrdFile => "PRD_FILE",
            FeatureName => "FEATURE_NAME",
            PrdGoalsRelevant => "PRD_GOALS_RELEVANT",
            PrdNongoalsRelevant => "PRD_NONGOALS_RELEVANT",
            PrdFrIds => "PRD_FR_IDS",
            PrdTypesStable => "PRD_TYPES_STABLE",
            RfcFile => "RFC_FILE",
            RfcAllowlistPaths => "RFC_ALLOWLIST_PATHS",
            RfcZeroInfraSummary => "RFC_ZERO_INFRA_SUMMARY",
            RfcOptionalAdjustments => "RFC_OPTIONAL_ADJUSTMENTS",
            ReproSteps => "REPRO_STEPS",
            ExpectedBehavior => "EXPECTED_BEHAVIOR",
            ActualBehavior => "ACTUAL_BEHAVIOR",
            SuspectedRootCause => "SUSPECTED_ROOT_CAUSE",
        }
    }
}

impl fmt::Display for FixReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixReportInputs {
    pub bug_title: String,
    pub commit_sha: String,
    pub browser_os: String,
    pub url_route: String,
    pub severity: BugSeverity,
    pub prd_file: String,
    pub feature_name: String,
    pub prd_goals_relevant: String,
    pub prd_nongoals_relevant: String,
    pub prd_fr_ids: String,
    pub prd_types_stable: String,
    pub rfc_file: String,
    pub rfc_allowlist_paths: String,
    pub rfc_zero_infra_summary: String,
    pub rfc_optional_adjustments: String,
    /// One step per line
    pub repro_steps: String,
    pub expected_behavior: String,
    pub actual_behavior: String,
    pub suspected_root_cause: String,
}

impl FixReportInputs {
    /// Current value of a field as form text.
    pub fn value(&self, field: FixReportField) -> &str {
        use FixReportField::*;
        match field {
            BugTitle => &self.bug_title,
            CommitSha => &self.commit_sha,
            BrowserOs => &self.browser_os,
            UrlRoute => &self.url_route,
            Severity => self.severity.as_str(),
            PrdFile => &self.prd_file,
            FeatureName => &self.feature_name,
            PrdGoalsRelevant => &self.prd_goals_relevant,
            PrdNongoalsRelevant => &self.prd_nongoals_relevant,
            PrdFrIds => &self.prd_fr_ids,
            PrdTypesStable => &self.prd_types_stable,
            RfcFile => &self.rfc_file,
            RfcAllowlistPaths => &self.rfc_allowlist_paths,
            RfcZeroInfraSummary => &self.rfc_zero_infra_summary,
            RfcOptionalAdjustments => &self.rfc_optional_adjustments,
            ReproSteps => &self.repro_steps,
            ExpectedBehavior => &self.expected_behavior,
            ActualBehavior => &self.actual_behavior,
            SuspectedRootCause => &self.suspected_root_cause,
        }
    }

    /// Set a field from form text.
    ///
    /// Only the severity can be rejected; its value is left unchanged then.
    pub fn update(&mut self, field: FixReportField, value: &str) -> Result<(), ValidationError> {
        use FixReportField::*;
        let slot = match field {
            Severity => {
                self.severity = value.parse().map_err(|_| {
                    ValidationError::new(
                        field.as_str(),
                        field.token(),
                        "Severity must be one of: blocker, critical, major, minor, trivial",
                        ValidationErrorKind::Format,
                    )
                })?;
                return Ok(());
            }
            BugTitle => &mut self.bug_title,
            CommitSha => &mut self.commit_sha,
            BrowserOs => &mut self.browser_os,
            UrlRoute => &mut self.url_route,
            PrdFile => &mut self.prd_file,
            FeatureName => &mut self.feature_name,
            PrdGoalsRelevant => &mut self.prd_goals_relevant,
            PrdNongoalsRelevant => &mut self.prd_nongoals_relevant,
            PrdFrIds => &mut self.prd_fr_ids,
            PrdTypesStable => &mut self.prd_types_stable,
            RfcFile => &mut self.rfc_file,
            RfcAllowlistPaths => &mut self.rfc_allowlist_paths,
            RfcZeroInfraSummary => &mut self.rfc_zero_infra_summary,
            RfcOptionalAdjustments => &mut self.rfc_optional_adjustments,
            ReproSteps => &mut self.repro_steps,
            ExpectedBehavior => &mut self.expected_behavior,
            ActualBehavior => &mut self.actual_behavior,
            SuspectedRootCause => &mut self.suspected_root_cause,
        };
        *slot = value.to_string();
        Ok(())
    }

    /// Reproduction step `n` (1-based), or empty when there are fewer lines.
    pub fn repro_step(&self, n: usize) -> &str {
        n.checked_sub(1)
            .and_then(|i| self.repro_steps.split('\n').nth(i))
            .unwrap_or("")
    }

    /// Flatten the form into the fix-report template's tokens.
    pub fn to_token_scope(&self) -> InputScope {
        let mut scope = InputScope::new();
        for field in FixReportField::all() {
            scope.insert(field.token().to_string(), self.value(field).to_string());
        }
        for (n, token) in STEP_TOKENS.iter().enumerate() {
            scope.insert(token.to_string(), self.repro_step(n + 1).to_string());
        }
        scope
    }
}

/// Tokens fed by the first three repro step lines.
pub const STEP_TOKENS: [&str; 3] = ["STEP_ONE", "STEP_TWO", "STEP_THREE"];

/// Check applied to one field.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FixReportField,
    pub required: bool,
    pub pattern: Option<Regex>,
    pub message: &'static str,
}

fn rule(field: FixReportField, required: bool, message: &'static str) -> FieldRule {
    FieldRule {
        field,
        required,
        pattern: None,
        message,
    }
}

fn pattern_rule(field: FixReportField, required: bool, pattern: &str, message: &'static str) -> FieldRule {
    FieldRule {
        field,
        required,
        pattern: Some(Regex::new(pattern).expect("Invalid fix report rule regex")),
        message,
    }
}

static FIX_REPORT_RULES: Lazy<Vec<FieldRule>> = Lazy::new(|| {
    use FixReportField::*;
    vec![
        rule(BugTitle, true, "Bug title is required"),
        rule(CommitSha, false, "Commit SHA or branch is required"),
        rule(BrowserOs, false, "Browser/OS environment is required"),
        pattern_rule(UrlRoute, false, r"^https?://.+", "URL must be a valid HTTP/HTTPS URL"),
        rule(Severity, true, "Severity level is required"),
        pattern_rule(
            PrdFile,
            true,
            r"^PRD_[a-zA-Z0-9_]+\.md$",
            "PRD file must follow format: PRD_[feature_slug].md",
        ),
        rule(FeatureName, true, "Feature name is required"),
        rule(PrdGoalsRelevant, false, "Relevant PRD goals are required"),
        rule(PrdNongoalsRelevant, false, "Relevant PRD non-goals are required"),
        rule(PrdFrIds, false, "Impacted functional requirements are required"),
        rule(PrdTypesStable, false, "Stable public types are required"),
        pattern_rule(
            RfcFile,
            true,
            r"^RFC_[a-zA-Z0-9_]+\.md$",
            "RFC file must follow format: RFC_[feature_slug].md",
        ),
        rule(RfcAllowlistPaths, false, "RFC allowlist paths are required"),
        rule(RfcZeroInfraSummary, false, "Zero-infra-change plan is required"),
        rule(ReproSteps, true, "Reproduction steps are required"),
        rule(ExpectedBehavior, true, "Expected behavior is required"),
        rule(ActualBehavior, true, "Actual behavior is required"),
    ]
});

pub fn fix_report_rules() -> &'static [FieldRule] {
    &FIX_REPORT_RULES
}

/// Check one field against its rule. At most one error per field:
/// required first, then the pattern, then URL parsing for the route.
pub fn validate_fix_report_field(field: FixReportField, value: &str) -> Option<ValidationError> {
    let rule = fix_report_rules().iter().find(|r| r.field == field)?;
    let error = |kind| ValidationError::new(field.as_str(), field.token(), rule.message, kind);

    if value.trim().is_empty() {
        return rule.required.then(|| error(ValidationErrorKind::Required));
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Some(error(ValidationErrorKind::Format));
        }
    }

    if field == FixReportField::UrlRoute && !is_http_url(value) {
        return Some(error(ValidationErrorKind::Format));
    }

    None
}

pub fn validate_fix_report(inputs: &FixReportInputs) -> ValidationState {
    let errors: Vec<ValidationError> = FixReportField::all()
        .into_iter()
        .filter_map(|field| validate_fix_report_field(field, inputs.value(field)))
        .collect();

    tracing::debug!(errors = errors.len(), "validated fix report");
    ValidationState::from_parts(errors, Vec::new())
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

// =============================================================================
// TESTS
// =============================================================================
