use std::fmt;
use std::slice;

use super::error::{Error, ErrorDetails, ErrorKind};
use super::validation::ValidationError;

static NO_FAILURE: Failure = Failure::Error(Error::NONE);

/// The error carried by a failed [`Outcome`]: one error or a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Error(Error),
    Validation(ValidationError),
}

impl Failure {
    /// Individual errors behind this failure. A single error yields itself.
    pub fn errors(&self) -> &[Error] {
        match self {
            Failure::Error(error) => slice::from_ref(error),
            Failure::Validation(composite) => composite.errors(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind() == ErrorKind::None
    }
}

impl ErrorDetails for Failure {
    fn code(&self) -> &str {
        match self {
            Failure::Error(error) => error.code(),
            Failure::Validation(composite) => composite.code(),
        }
    }

    fn description(&self) -> &str {
        match self {
            Failure::Error(error) => error.description(),
            Failure::Validation(composite) => composite.description(),
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Failure::Error(error) => error.kind(),
            Failure::Validation(composite) => composite.kind(),
        }
    }
}

impl From<Error> for Failure {
    fn from(error: Error) -> Self {
        Failure::Error(error)
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Failure::Validation(error)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Error(error) => fmt::Display::fmt(error, f),
            Failure::Validation(composite) => fmt::Display::fmt(composite, f),
        }
    }
}

impl std::error::Error for Failure {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State<T> {
    Success(T),
    Failure(Failure),
}

/// Terminal state of an operation that can fail for expected, domain reasons.
///
/// Fixed at construction: either a success carrying `T` or a failure carrying
/// a non-sentinel [`Failure`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    state: State<T>,
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self {
            state: State::Success(value),
        }
    }

    /// # Panics
    ///
    /// Panics if `error` is the [`Error::NONE`] sentinel.
    pub fn failure(error: impl Into<Failure>) -> Self {
        let error = error.into();
        assert!(
            !error.is_none(),
            "invalid operation: a failed outcome cannot carry the none error"
        );
        Self {
            state: State::Failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// # Panics
    ///
    /// Panics if the outcome failed.
    pub fn value(&self) -> &T {
        match &self.state {
            State::Success(value) => value,
            State::Failure(error) => invalid_value_access(error),
        }
    }

    /// # Panics
    ///
    /// Panics if the outcome failed.
    pub fn into_value(self) -> T {
        match self.state {
            State::Success(value) => value,
            State::Failure(error) => invalid_value_access(&error),
        }
    }

    /// The failure, or the none sentinel for a successful outcome.
    pub fn error(&self) -> &Failure {
        match &self.state {
            State::Success(_) => &NO_FAILURE,
            State::Failure(error) => error,
        }
    }

    /// Calls exactly one continuation. `on_failure` receives the whole outcome
    /// so it can look at the error's kind and code.
    pub fn match_with<R>(
        self,
        on_success: impl FnOnce(T) -> R,
        on_failure: impl FnOnce(Outcome<T>) -> R,
    ) -> R {
        match self.state {
            State::Success(value) => on_success(value),
            failed @ State::Failure(_) => on_failure(Outcome { state: failed }),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self.state {
            State::Success(value) => Outcome::success(f(value)),
            State::Failure(error) => Outcome {
                state: State::Failure(error),
            },
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self.state {
            State::Success(value) => f(value),
            State::Failure(error) => Outcome {
                state: State::Failure(error),
            },
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self.state {
            State::Success(value) => Ok(value),
            State::Failure(error) => Err(error),
        }
    }
}

fn invalid_value_access(error: &Failure) -> ! {
    panic!(
        "invalid operation: the value of a failed outcome cannot be accessed ({})",
        error.code()
    )
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use uuid::Uuid;

    use super::*;

    fn not_found() -> Error {
        Error::not_found("Quote.NotFound", "The quote with the Id = 42 was not found.")
    }

    #[test]
    fn success_exposes_value_and_none_error() {
        let outcome = Outcome::success(7);

        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(*outcome.value(), 7);
        assert!(outcome.error().is_none());
        assert_eq!(outcome.into_value(), 7);
    }

    #[test]
    fn failure_exposes_error() {
        let outcome: Outcome<i32> = Outcome::failure(not_found());

        assert!(outcome.is_failure());
        assert!(!outcome.is_success());
        assert_eq!(outcome.error(), &Failure::Error(not_found()));
        assert_eq!(outcome.error().kind(), ErrorKind::NotFound);
    }

    #[test]
    #[should_panic(expected = "cannot be accessed")]
    fn value_of_failed_outcome_panics() {
        let outcome: Outcome<i32> = Outcome::failure(not_found());
        let _ = outcome.value();
    }

    #[test]
    #[should_panic(expected = "cannot be accessed")]
    fn into_value_of_failed_outcome_panics() {
        let outcome: Outcome<String> = Outcome::failure(Error::conflict("X", "y"));
        let _ = outcome.into_value();
    }

    #[test]
    #[should_panic(expected = "cannot carry the none error")]
    fn failure_with_sentinel_panics() {
        let _: Outcome<()> = Outcome::failure(Error::NONE);
    }

    #[test]
    fn every_failed_kind_refuses_value_access() {
        for kind in ErrorKind::ALL.into_iter().filter(|k| *k != ErrorKind::None) {
            let outcome: Outcome<u8> = Outcome::failure(Error::new("C", "d", kind));
            let result = std::panic::catch_unwind(|| *outcome.value());
            assert!(result.is_err(), "{kind:?} outcome handed out a value");
        }
    }

    #[test]
    fn randomized_states_hold_their_invariants() {
        for _ in 0..100 {
            let value = Uuid::new_v4().to_string();
            let success = Outcome::success(value.clone());
            assert!(success.is_success() && !success.is_failure());
            assert_eq!(success.value(), &value);

            let error = Error::conflict(value.clone(), Uuid::new_v4().to_string());
            let failed: Outcome<String> = Outcome::failure(error.clone());
            assert!(failed.is_failure() && !failed.is_success());
            assert_eq!(failed.error(), &Failure::Error(error));
        }
    }

    #[test]
    fn match_with_runs_exactly_one_branch() {
        let successes = Cell::new(0);
        let failures = Cell::new(0);
        let mut expected_successes = 0;

        for _ in 0..256 {
            let bytes = *Uuid::new_v4().as_bytes();
            let outcome = if bytes[0] % 2 == 0 {
                expected_successes += 1;
                Outcome::success(bytes[1])
            } else {
                Outcome::failure(Error::failure("Random.Failure", format!("{}", bytes[1])))
            };
            let was_success = outcome.is_success();

            let branch = outcome.match_with(
                |_| {
                    successes.set(successes.get() + 1);
                    true
                },
                |failed| {
                    assert!(failed.is_failure());
                    failures.set(failures.get() + 1);
                    false
                },
            );

            assert_eq!(branch, was_success);
        }

        assert_eq!(successes.get(), expected_successes);
        assert_eq!(successes.get() + failures.get(), 256);
    }

    #[test]
    fn match_with_hands_failure_the_whole_outcome() {
        let outcome: Outcome<i32> = Outcome::failure(not_found());

        let code = outcome.match_with(|_| String::new(), |failed| failed.error().code().to_owned());

        assert_eq!(code, "Quote.NotFound");
    }

    #[test]
    fn map_and_and_then_keep_failures() {
        let failed: Outcome<i32> = Outcome::failure(not_found());
        let mapped = failed.map(|v| v + 1);
        assert_eq!(mapped.error().code(), "Quote.NotFound");

        let chained = Outcome::success(1).and_then(|v| Outcome::success(v * 10));
        assert_eq!(chained.into_value(), 10);
    }

    #[test]
    fn into_result_converts_both_states() {
        assert_eq!(Outcome::success("x").into_result(), Ok("x"));
        let failed: Outcome<()> = Outcome::failure(not_found());
        assert_eq!(failed.into_result(), Err(Failure::Error(not_found())));
    }

    #[test]
    fn composite_failure_reports_children() {
        let composite = ValidationError::new(vec![
            Error::validation("A", "a"),
            Error::validation("B", "b"),
        ]);
        let outcome: Outcome<()> = Outcome::failure(composite);

        assert_eq!(outcome.error().kind(), ErrorKind::Validation);
        assert_eq!(outcome.error().errors().len(), 2);
    }
}
