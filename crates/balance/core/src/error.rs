//! Error types for balance-core.
//!
//! Only malformed *inputs* produce errors here. Missing reference data is not
//! an error: it is carried as `Option` and rendered as a placeholder, and
//! schema violations are reported by the auditor rather than raised.

use crate::category::Category;

/// Errors raised while assembling the classification table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    /// The same unit name appears in more than one roster slot.
    #[error("unit '{name}' is classified twice ({first} in section '{first_section}', {second} in section '{second_section}')")]
    DuplicateUnit {
        name: String,
        first: Category,
        first_section: String,
        second: Category,
        second_section: String,
    },

    /// A section key is reused; separator markers would collide.
    #[error("roster section key '{0}' is used more than once")]
    DuplicateSection(String),

    /// A category name could not be parsed.
    #[error("unknown unit category '{0}'")]
    UnknownCategory(String),
}

impl ClassificationError {
    /// Returns a static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateUnit { .. } => "CLASSIFICATION_DUPLICATE_UNIT",
            Self::DuplicateSection(_) => "CLASSIFICATION_DUPLICATE_SECTION",
            Self::UnknownCategory(_) => "CLASSIFICATION_UNKNOWN_CATEGORY",
        }
    }
}
