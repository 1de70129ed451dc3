use std::fmt;

use super::error::{Error, ErrorDetails, ErrorKind};
use super::outcome::{Failure, Outcome};

/// Several independent failures reported together as one `Validation` error.
///
/// Children keep the order in which the checks that produced them ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<Error>,
}

impl ValidationError {
    pub const CODE: &'static str = "Validation.General";
    pub const DESCRIPTION: &'static str = "One or more validation errors occurred.";

    /// # Panics
    ///
    /// Panics when `errors` is empty: a composite with no children would be
    /// indistinguishable from success.
    pub fn new(errors: Vec<Error>) -> Self {
        assert!(
            !errors.is_empty(),
            "a validation error needs at least one child error"
        );
        Self { errors }
    }

    /// Collects the errors of every failed outcome, in order.
    ///
    /// Composite children are flattened so the result is always one level
    /// deep. The outcomes share one payload type; checks with different
    /// payloads go through [`ValidationError::from_failures`] with each
    /// outcome's [`Outcome::error`]. Callers must check that at least one
    /// outcome failed first; see [`validate_all`] for the checked form.
    ///
    /// # Panics
    ///
    /// Panics when none of the outcomes failed.
    pub fn from_outcomes<'a, T: 'a>(outcomes: impl IntoIterator<Item = &'a Outcome<T>>) -> Self {
        Self::from_failures(outcomes.into_iter().map(Outcome::error))
    }

    /// Same as [`ValidationError::from_outcomes`], over failures taken from
    /// outcomes of any payload type. The none sentinel reported by successful
    /// outcomes is skipped.
    ///
    /// # Panics
    ///
    /// Panics when every failure is the none sentinel.
    pub fn from_failures<'a>(failures: impl IntoIterator<Item = &'a Failure>) -> Self {
        let errors = failures
            .into_iter()
            .filter(|failure| !failure.is_none())
            .flat_map(|failure| failure.errors().iter().cloned())
            .collect();
        Self::new(errors)
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }
}

impl ErrorDetails for ValidationError {
    fn code(&self) -> &str {
        Self::CODE
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (", Self::CODE, Self::DESCRIPTION)?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(error.code())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for ValidationError {}

/// Runs through already-evaluated checks and merges every failure.
///
/// Returns `success(())` when all checks passed, otherwise a single
/// [`ValidationError`] holding each failed check's error.
pub fn validate_all(checks: &[Outcome<()>]) -> Outcome<()> {
    if checks.iter().any(Outcome::is_failure) {
        Outcome::failure(ValidationError::from_outcomes(checks))
    } else {
        Outcome::success(())
    }
}
