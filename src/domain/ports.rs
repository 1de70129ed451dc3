use thiserror::Error;

use super::error::Error as DomainError;
use super::quote::{NewQuote, Quote, QuotePage};

/// Storage faults. These are not domain failures; the boundary reports them
/// as generic failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for DomainError {
    fn from(e: RepositoryError) -> Self {
        log::error!("quote storage failed: {e}");
        DomainError::failure("Quote.Storage", "The quote store could not complete the request.")
    }
}

pub trait QuoteRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: i32) -> Result<Option<Quote>, RepositoryError>;

    /// An existing quote with exactly this author and content, other than `except`.
    fn find_duplicate(
        &self,
        author: &str,
        content: &str,
        except: Option<i32>,
    ) -> Result<Option<Quote>, RepositoryError>;

    /// Newest first.
    fn list(&self, page: i64, limit: i64) -> Result<QuotePage, RepositoryError>;

    fn add(&self, quote: NewQuote) -> Result<Quote, RepositoryError>;

    /// Persists the mutated quote. `Ok(None)` if it no longer exists.
    fn save(&self, quote: Quote) -> Result<Option<Quote>, RepositoryError>;

    /// `Ok(false)` if there was nothing to remove.
    fn remove(&self, id: i32) -> Result<bool, RepositoryError>;
}
