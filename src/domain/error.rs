use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// Semantic category of a failure, independent of its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Reserved for [`Error::NONE`]; never carried by a failed outcome.
    None,
    Failure,
    Validation,
    NotFound,
    Conflict,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::None,
        ErrorKind::Failure,
        ErrorKind::Validation,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
    ];
}

/// Read access shared by single and composite errors.
pub trait ErrorDetails {
    fn code(&self) -> &str;
    fn description(&self) -> &str;
    fn kind(&self) -> ErrorKind;
}

/// A single structured failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct Error {
    #[schema(value_type = String, example = "Quote.NotFound")]
    code: Cow<'static, str>,
    #[schema(value_type = String)]
    description: Cow<'static, str>,
    #[serde(skip)]
    kind: ErrorKind,
}

impl Error {
    /// The "no error" sentinel reported by successful outcomes.
    pub const NONE: Error = Error {
        code: Cow::Borrowed(""),
        description: Cow::Borrowed(""),
        kind: ErrorKind::None,
    };

    pub fn new(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        kind: ErrorKind,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn failure(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Failure)
    }

    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Validation)
    }

    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::NotFound)
    }

    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(code, description, ErrorKind::Conflict)
    }

    pub fn is_none(&self) -> bool {
        self.kind == ErrorKind::None
    }
}

impl ErrorDetails for Error {
    fn code(&self) -> &str {
        &self.code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_constructors_set_kind() {
        assert_eq!(Error::failure("a", "b").kind(), ErrorKind::Failure);
        assert_eq!(Error::validation("a", "b").kind(), ErrorKind::Validation);
        assert_eq!(Error::not_found("a", "b").kind(), ErrorKind::NotFound);
        assert_eq!(Error::conflict("a", "b").kind(), ErrorKind::Conflict);
    }

    #[test]
    fn equality_is_by_value() {
        let owned = Error::not_found(String::from("Quote.NotFound"), format!("missing {}", 1));
        let borrowed = Error::new("Quote.NotFound", "missing 1", ErrorKind::NotFound);
        assert_eq!(owned, borrowed);
    }

    #[test]
    fn kind_participates_in_equality() {
        assert_ne!(Error::not_found("X", "y"), Error::conflict("X", "y"));
    }

    #[test]
    fn sentinel_is_none() {
        assert!(Error::NONE.is_none());
        assert_eq!(Error::NONE.code(), "");
        assert!(!Error::failure("X", "y").is_none());
    }

    #[test]
    fn display_shows_code_and_description() {
        let err = Error::conflict("Quote.Duplicate", "already there");
        assert_eq!(err.to_string(), "Quote.Duplicate: already there");
    }
}
