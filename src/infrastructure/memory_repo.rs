use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::domain::ports::{QuoteRepository, RepositoryError};
use crate::domain::quote::{page_offset, NewQuote, Quote, QuotePage};

#[derive(Default)]
struct Store {
    last_id: i32,
    quotes: BTreeMap<i32, Quote>,
}

/// Process-local quote store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryQuoteRepository {
    store: Mutex<Store>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("quote store lock poisoned".to_string()))
    }
}

impl QuoteRepository for InMemoryQuoteRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<Quote>, RepositoryError> {
        Ok(self.lock()?.quotes.get(&id).cloned())
    }

    fn find_duplicate(
        &self,
        author: &str,
        content: &str,
        except: Option<i32>,
    ) -> Result<Option<Quote>, RepositoryError> {
        let store = self.lock()?;
        Ok(store
            .quotes
            .values()
            .find(|q| q.author == author && q.content == content && Some(q.id) != except)
            .cloned())
    }

    fn list(&self, page: i64, limit: i64) -> Result<QuotePage, RepositoryError> {
        let store = self.lock()?;
        let skip = page_offset(page, limit)
            .and_then(|offset| usize::try_from(offset).ok())
            .unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);

        // Ids are handed out in insertion order, so descending id is newest first.
        let items = store.quotes.values().rev().skip(skip).take(take).cloned().collect();

        Ok(QuotePage {
            items,
            total: store.quotes.len() as i64,
        })
    }

    fn add(&self, quote: NewQuote) -> Result<Quote, RepositoryError> {
        let mut store = self.lock()?;
        store.last_id += 1;
        let quote = Quote {
            id: store.last_id,
            author: quote.author,
            content: quote.content,
            created_at: Utc::now(),
        };
        store.quotes.insert(quote.id, quote.clone());
        Ok(quote)
    }

    fn save(&self, quote: Quote) -> Result<Option<Quote>, RepositoryError> {
        let mut store = self.lock()?;
        let Some(stored) = store.quotes.get_mut(&quote.id) else {
            return Ok(None);
        };
        stored.author = quote.author;
        stored.content = quote.content;
        Ok(Some(stored.clone()))
    }

    fn remove(&self, id: i32) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.quotes.remove(&id).is_some())
    }
}
