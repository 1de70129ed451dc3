use chrono::{DateTime, Utc};

use super::error::Error;
use super::outcome::Outcome;

pub const AUTHOR_MAX_LENGTH: usize = 100;
pub const CONTENT_MAX_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct QuotePage {
    pub items: Vec<Quote>,
    pub total: i64,
}

/// Catalogue of every error the quote operations can report.
pub struct QuoteErrors;

impl QuoteErrors {
    pub fn not_found(id: i32) -> Error {
        Error::not_found(
            "Quote.NotFound",
            format!("The quote with the Id = {id} was not found."),
        )
    }

    pub fn author_required() -> Error {
        Error::validation("Quote.AuthorRequired", "The author is required.")
    }

    pub fn author_too_long() -> Error {
        Error::validation(
            "Quote.AuthorTooLong",
            format!("The author must be at most {AUTHOR_MAX_LENGTH} characters long."),
        )
    }

    pub fn content_required() -> Error {
        Error::validation("Quote.ContentRequired", "The content is required.")
    }

    pub fn content_too_long() -> Error {
        Error::validation(
            "Quote.ContentTooLong",
            format!("The content must be at most {CONTENT_MAX_LENGTH} characters long."),
        )
    }

    pub fn duplicate() -> Error {
        Error::conflict(
            "Quote.Duplicate",
            "A quote with the same author and content already exists.",
        )
    }

    pub fn invalid_page() -> Error {
        Error::validation(
            "Quote.InvalidPage",
            "The page must be at least 1 and the limit between 1 and 100.",
        )
    }
}

pub fn check_author(author: &str) -> Outcome<()> {
    check_text(author, AUTHOR_MAX_LENGTH, QuoteErrors::author_required, QuoteErrors::author_too_long)
}

pub fn check_content(content: &str) -> Outcome<()> {
    check_text(
        content,
        CONTENT_MAX_LENGTH,
        QuoteErrors::content_required,
        QuoteErrors::content_too_long,
    )
}

/// Runs every field check on a candidate quote, without stopping at the first.
pub fn quote_checks(author: &str, content: &str) -> [Outcome<()>; 2] {
    [check_author(author), check_content(content)]
}

/// Number of rows before `page`, or `None` when it does not fit in an `i64`.
pub fn page_offset(page: i64, limit: i64) -> Option<i64> {
    page.checked_sub(1)?
        .checked_mul(limit)
        .filter(|offset| *offset >= 0)
}

/// Pages start at 1 and limits lie in 1..=100. A page whose offset
/// overflows is rejected as well.
pub fn check_page(page: i64, limit: i64) -> Outcome<()> {
    if page < 1 || !(1..=100).contains(&limit) || page_offset(page, limit).is_none() {
        Outcome::failure(QuoteErrors::invalid_page())
    } else {
        Outcome::success(())
    }
}

fn check_text(
    value: &str,
    max_length: usize,
    required: fn() -> Error,
    too_long: fn() -> Error,
) -> Outcome<()> {
    if value.trim().is_empty() {
        Outcome::failure(required())
    } else if value.chars().count() > max_length {
        Outcome::failure(too_long())
    } else {
        Outcome::success(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{ErrorDetails, ErrorKind};
    use crate::domain::validation::validate_all;

    #[test]
    fn not_found_message_names_the_id() {
        let err = QuoteErrors::not_found(42);
        assert_eq!(err.code(), "Quote.NotFound");
        assert_eq!(err.description(), "The quote with the Id = 42 was not found.");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn blank_fields_fail_both_checks() {
        let outcome = validate_all(&quote_checks("", "   "));

        let codes: Vec<&str> = outcome.error().errors().iter().map(|e| e.code()).collect();
        assert_eq!(codes, ["Quote.AuthorRequired", "Quote.ContentRequired"]);
    }

    #[test]
    fn valid_fields_pass() {
        assert!(validate_all(&quote_checks("Socrates", "I drank what?")).is_success());
    }

    #[test]
    fn length_limits_count_characters() {
        assert!(check_author(&"é".repeat(AUTHOR_MAX_LENGTH)).is_success());
        let too_long = check_author(&"a".repeat(AUTHOR_MAX_LENGTH + 1));
        assert_eq!(too_long.error().code(), "Quote.AuthorTooLong");
        let too_long = check_content(&"a".repeat(CONTENT_MAX_LENGTH + 1));
        assert_eq!(too_long.error().code(), "Quote.ContentTooLong");
    }

    #[test]
    fn page_bounds() {
        assert!(check_page(1, 20).is_success());
        assert!(check_page(3, 100).is_success());
        assert!(check_page(0, 20).is_failure());
        assert!(check_page(1, 0).is_failure());
        assert!(check_page(1, 101).is_failure());
    }

    #[test]
    fn huge_pages_are_rejected_only_when_the_offset_overflows() {
        assert_eq!(page_offset(3, 20), Some(40));
        assert_eq!(page_offset(i64::MAX, 100), None);
        assert_eq!(page_offset(i64::MAX, 1), Some(i64::MAX - 1));

        let outcome = check_page(i64::MAX, 100);
        assert_eq!(outcome.error().code(), "Quote.InvalidPage");
        assert!(check_page(i64::MAX / 100, 100).is_success());
        assert!(check_page(i64::MAX, 1).is_success());
    }
}
