use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::quote::Quote;
use crate::schema::quotes;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = quotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuoteRow {
    pub id: i32,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = quotes)]
pub struct NewQuoteRow<'a> {
    pub author: &'a str,
    pub content: &'a str,
}

impl From<QuoteRow> for Quote {
    fn from(row: QuoteRow) -> Self {
        Quote {
            id: row.id,
            author: row.author,
            content: row.content,
            created_at: row.created_at,
        }
    }
}
