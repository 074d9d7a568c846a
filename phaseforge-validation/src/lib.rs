//! PhaseForge Validation
//!
//! Turns token analysis into error and warning records keyed by form field.
//! Validation never fails: an empty template or a template without tokens
//! is always valid.

pub mod engine;
pub mod fix_report;
pub mod session;
pub mod types;

pub use engine::{
    get_validation_rules, validate_all_inputs, validate_all_inputs_with, validate_global_inputs,
    validate_input_field, validate_phase_inputs,
};
pub use fix_report::{
    fix_report_rules, validate_fix_report, validate_fix_report_field, BugSeverity,
    BugSeverityParseError, FieldRule, FixReportField, FixReportInputs, STEP_TOKENS,
};
pub use session::ValidationSession;
pub use types::{
    field_name_for_token, phase_field_name, token_for_field_name, ValidationError,
    ValidationErrorKind, ValidationRule, ValidationState, ValidationWarning, ValidationWarningKind,
};
