use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::ports::{QuoteRepository, RepositoryError};
use crate::domain::quote::{page_offset, NewQuote, Quote, QuotePage};
use crate::schema::quotes;

use super::models::{NewQuoteRow, QuoteRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for RepositoryError {
    fn from(e: diesel::result::Error) -> Self {
        RepositoryError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for RepositoryError {
    fn from(e: r2d2::Error) -> Self {
        RepositoryError::Unavailable(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselQuoteRepository {
    pool: DbPool,
}

impl DieselQuoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl QuoteRepository for DieselQuoteRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<Quote>, RepositoryError> {
        let mut conn = self.pool.get()?;

        let row: Option<QuoteRow> = quotes::table
            .find(id)
            .select(QuoteRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Quote::from))
    }

    fn find_duplicate(
        &self,
        author: &str,
        content: &str,
        except: Option<i32>,
    ) -> Result<Option<Quote>, RepositoryError> {
        let mut conn = self.pool.get()?;

        let mut query = quotes::table
            .filter(quotes::author.eq(author))
            .filter(quotes::content.eq(content))
            .select(QuoteRow::as_select())
            .into_boxed();
        if let Some(id) = except {
            query = query.filter(quotes::id.ne(id));
        }

        let row: Option<QuoteRow> = query.first(&mut conn).optional()?;

        Ok(row.map(Quote::from))
    }

    fn list(&self, page: i64, limit: i64) -> Result<QuotePage, RepositoryError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit).unwrap_or(i64::MAX);
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let total: i64 = quotes::table.count().get_result(conn)?;

            let rows: Vec<QuoteRow> = quotes::table
                .select(QuoteRow::as_select())
                .order((quotes::created_at.desc(), quotes::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(QuotePage {
                items: rows.into_iter().map(Quote::from).collect(),
                total,
            })
        })
    }

    fn add(&self, quote: NewQuote) -> Result<Quote, RepositoryError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row: QuoteRow = diesel::insert_into(quotes::table)
                .values(&NewQuoteRow {
                    author: &quote.author,
                    content: &quote.content,
                })
                .returning(QuoteRow::as_returning())
                .get_result(conn)?;

            Ok(row.into())
        })
    }

    fn save(&self, quote: Quote) -> Result<Option<Quote>, RepositoryError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row: Option<QuoteRow> = diesel::update(quotes::table.find(quote.id))
                .set((
                    quotes::author.eq(&quote.author),
                    quotes::content.eq(&quote.content),
                ))
                .returning(QuoteRow::as_returning())
                .get_result(conn)
                .optional()?;

            Ok(row.map(Quote::from))
        })
    }

    fn remove(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(quotes::table.find(id)).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
