use std::sync::Arc;

use crate::domain::ports::QuoteRepository;
use crate::domain::quote::{
    check_author, check_content, check_page, NewQuote, Quote, QuoteErrors, QuotePage,
};
use crate::domain::{Error, Outcome};

use super::mediator::{Mediator, Request, RequestHandler};

// ── Queries ──────────────────────────────────────────────────────────────────

pub struct GetQuoteQuery {
    pub id: i32,
}

impl Request for GetQuoteQuery {
    type Response = Quote;
}

pub struct ListQuotesQuery {
    pub page: i64,
    pub limit: i64,
}

impl Request for ListQuotesQuery {
    type Response = QuotePage;
}

// ── Commands ─────────────────────────────────────────────────────────────────

pub struct CreateQuoteCommand {
    pub author: String,
    pub content: String,
}

impl Request for CreateQuoteCommand {
    /// Identifier assigned by the store.
    type Response = i32;
}

pub struct UpdateQuoteCommand {
    pub id: i32,
    pub author: String,
    pub content: String,
}

impl Request for UpdateQuoteCommand {
    type Response = ();
}

pub struct DeleteQuoteCommand {
    pub id: i32,
}

impl Request for DeleteQuoteCommand {
    type Response = ();
}

// ── Handlers ─────────────────────────────────────────────────────────────────

pub struct GetQuoteHandler {
    repo: Arc<dyn QuoteRepository>,
}

impl RequestHandler<GetQuoteQuery> for GetQuoteHandler {
    fn handle(&self, query: GetQuoteQuery) -> Outcome<Quote> {
        match self.repo.find_by_id(query.id) {
            Ok(Some(quote)) => Outcome::success(quote),
            Ok(None) => Outcome::failure(QuoteErrors::not_found(query.id)),
            Err(e) => Outcome::failure(Error::from(e)),
        }
    }
}

pub struct ListQuotesHandler {
    repo: Arc<dyn QuoteRepository>,
}

impl RequestHandler<ListQuotesQuery> for ListQuotesHandler {
    fn handle(&self, query: ListQuotesQuery) -> Outcome<QuotePage> {
        match self.repo.list(query.page, query.limit) {
            Ok(page) => Outcome::success(page),
            Err(e) => Outcome::failure(Error::from(e)),
        }
    }
}

pub struct CreateQuoteHandler {
    repo: Arc<dyn QuoteRepository>,
}

impl RequestHandler<CreateQuoteCommand> for CreateQuoteHandler {
    fn handle(&self, command: CreateQuoteCommand) -> Outcome<i32> {
        match self.repo.find_duplicate(&command.author, &command.content, None) {
            Ok(Some(_)) => return Outcome::failure(QuoteErrors::duplicate()),
            Ok(None) => {}
            Err(e) => return Outcome::failure(Error::from(e)),
        }

        let added = self.repo.add(NewQuote {
            author: command.author,
            content: command.content,
        });
        match added {
            Ok(quote) => {
                log::info!("created quote {}", quote.id);
                Outcome::success(quote.id)
            }
            Err(e) => Outcome::failure(Error::from(e)),
        }
    }
}

pub struct UpdateQuoteHandler {
    repo: Arc<dyn QuoteRepository>,
}

impl RequestHandler<UpdateQuoteCommand> for UpdateQuoteHandler {
    fn handle(&self, command: UpdateQuoteCommand) -> Outcome<()> {
        let existing = match self.repo.find_by_id(command.id) {
            Ok(Some(quote)) => quote,
            Ok(None) => return Outcome::failure(QuoteErrors::not_found(command.id)),
            Err(e) => return Outcome::failure(Error::from(e)),
        };

        match self
            .repo
            .find_duplicate(&command.author, &command.content, Some(command.id))
        {
            Ok(Some(_)) => return Outcome::failure(QuoteErrors::duplicate()),
            Ok(None) => {}
            Err(e) => return Outcome::failure(Error::from(e)),
        }

        let updated = Quote {
            author: command.author,
            content: command.content,
            ..existing
        };
        match self.repo.save(updated) {
            Ok(Some(_)) => Outcome::success(()),
            Ok(None) => Outcome::failure(QuoteErrors::not_found(command.id)),
            Err(e) => Outcome::failure(Error::from(e)),
        }
    }
}

pub struct DeleteQuoteHandler {
    repo: Arc<dyn QuoteRepository>,
}

impl RequestHandler<DeleteQuoteCommand> for DeleteQuoteHandler {
    fn handle(&self, command: DeleteQuoteCommand) -> Outcome<()> {
        match self.repo.remove(command.id) {
            Ok(true) => Outcome::success(()),
            Ok(false) => Outcome::failure(QuoteErrors::not_found(command.id)),
            Err(e) => Outcome::failure(Error::from(e)),
        }
    }
}

/// Wires every quote request to its handler and validators.
pub fn build_mediator(repo: Arc<dyn QuoteRepository>) -> Mediator {
    Mediator::builder()
        .handler::<GetQuoteQuery>(GetQuoteHandler {
            repo: Arc::clone(&repo),
        })
        .handler::<ListQuotesQuery>(ListQuotesHandler {
            repo: Arc::clone(&repo),
        })
        .validator::<ListQuotesQuery>(|q| check_page(q.page, q.limit))
        .handler::<CreateQuoteCommand>(CreateQuoteHandler {
            repo: Arc::clone(&repo),
        })
        .validator::<CreateQuoteCommand>(|c| check_author(&c.author))
        .validator::<CreateQuoteCommand>(|c| check_content(&c.content))
        .handler::<UpdateQuoteCommand>(UpdateQuoteHandler {
            repo: Arc::clone(&repo),
        })
        .validator::<UpdateQuoteCommand>(|c| check_author(&c.author))
        .validator::<UpdateQuoteCommand>(|c| check_content(&c.content))
        .handler::<DeleteQuoteCommand>(DeleteQuoteHandler { repo })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorDetails, ErrorKind, Failure};
    use crate::infrastructure::InMemoryQuoteRepository;

    fn setup() -> (Arc<dyn QuoteRepository>, Mediator) {
        let repo: Arc<dyn QuoteRepository> = Arc::new(InMemoryQuoteRepository::new());
        let mediator = build_mediator(Arc::clone(&repo));
        (repo, mediator)
    }

    fn create(mediator: &Mediator, author: &str, content: &str) -> Outcome<i32> {
        mediator.send(CreateQuoteCommand {
            author: author.to_string(),
            content: content.to_string(),
        })
    }

    #[test]
    fn get_missing_quote_is_not_found() {
        let (_, mediator) = setup();

        let outcome = mediator.send(GetQuoteQuery { id: 42 });

        assert_eq!(
            outcome.error(),
            &Failure::Error(Error::not_found(
                "Quote.NotFound",
                "The quote with the Id = 42 was not found."
            ))
        );
    }

    #[test]
    fn create_valid_quote_returns_assigned_id() {
        let (repo, mediator) = setup();

        let id = create(&mediator, "Socrates", "I drank what?").into_value();

        let stored = repo.find_by_id(id).unwrap().expect("quote persisted");
        assert_eq!(stored.author, "Socrates");
        assert_eq!(stored.content, "I drank what?");
    }

    #[test]
    fn create_with_empty_fields_reports_both() {
        let (repo, mediator) = setup();

        let outcome = create(&mediator, "", "");

        assert_eq!(outcome.error().kind(), ErrorKind::Validation);
        let codes: Vec<&str> = outcome.error().errors().iter().map(|e| e.code()).collect();
        assert_eq!(codes, ["Quote.AuthorRequired", "Quote.ContentRequired"]);
        assert_eq!(repo.list(1, 10).unwrap().total, 0);
    }

    #[test]
    fn create_duplicate_conflicts() {
        let (_, mediator) = setup();
        assert!(create(&mediator, "Socrates", "I drank what?").is_success());

        let outcome = create(&mediator, "Socrates", "I drank what?");

        assert_eq!(outcome.error().kind(), ErrorKind::Conflict);
        assert_eq!(outcome.error().code(), "Quote.Duplicate");
    }

    #[test]
    fn update_changes_stored_quote() {
        let (repo, mediator) = setup();
        let id = create(&mediator, "Socrates", "I drank what?").into_value();

        let outcome = mediator.send(UpdateQuoteCommand {
            id,
            author: "Socrates".into(),
            content: "Know thyself.".into(),
        });

        assert!(outcome.is_success());
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().content, "Know thyself.");
    }

    #[test]
    fn update_validates_before_looking_up() {
        let (_, mediator) = setup();

        let outcome = mediator.send(UpdateQuoteCommand {
            id: 7,
            author: " ".into(),
            content: "fine".into(),
        });

        assert_eq!(outcome.error().kind(), ErrorKind::Validation);
        assert_eq!(outcome.error().errors()[0].code(), "Quote.AuthorRequired");
    }

    #[test]
    fn update_missing_quote_is_not_found() {
        let (_, mediator) = setup();

        let outcome = mediator.send(UpdateQuoteCommand {
            id: 7,
            author: "A".into(),
            content: "B".into(),
        });

        assert_eq!(outcome.error().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn update_into_existing_quote_conflicts() {
        let (_, mediator) = setup();
        create(&mediator, "A", "a").into_value();
        let id = create(&mediator, "B", "b").into_value();

        let outcome = mediator.send(UpdateQuoteCommand {
            id,
            author: "A".into(),
            content: "a".into(),
        });

        assert_eq!(outcome.error().code(), "Quote.Duplicate");
    }

    #[test]
    fn delete_then_delete_again() {
        let (_, mediator) = setup();
        let id = create(&mediator, "A", "a").into_value();

        assert!(mediator.send(DeleteQuoteCommand { id }).is_success());
        let again = mediator.send(DeleteQuoteCommand { id });
        assert_eq!(again.error().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn list_rejects_bad_paging() {
        let (_, mediator) = setup();

        let outcome = mediator.send(ListQuotesQuery { page: 0, limit: 10 });

        assert_eq!(outcome.error().errors()[0].code(), "Quote.InvalidPage");
    }

    #[test]
    fn list_returns_page() {
        let (_, mediator) = setup();
        create(&mediator, "A", "a").into_value();
        create(&mediator, "B", "b").into_value();

        let page = mediator.send(ListQuotesQuery { page: 1, limit: 1 }).into_value();

        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].author, "B");
    }
}
