use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::domain::{Error, Outcome, ValidationError};

/// A command or query that can be sent through the [`Mediator`].
pub trait Request: Send + 'static {
    type Response: 'static;
}

pub trait RequestHandler<R: Request>: Send + Sync + 'static {
    fn handle(&self, request: R) -> Outcome<R::Response>;
}

type Check<R> = Box<dyn Fn(&R) -> Outcome<()> + Send + Sync>;

struct Registration<R: Request> {
    handler: Option<Box<dyn RequestHandler<R>>>,
    validators: Vec<Check<R>>,
}

impl<R: Request> Registration<R> {
    fn empty() -> Self {
        Self {
            handler: None,
            validators: Vec::new(),
        }
    }
}

type Registry = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// Collects handlers and validators per request type. Built once at startup.
#[derive(Default)]
pub struct MediatorBuilder {
    registrations: Registry,
}

impl MediatorBuilder {
    /// Binds the handler for `R`, replacing any earlier one.
    pub fn handler<R: Request>(mut self, handler: impl RequestHandler<R>) -> Self {
        let registration = self.registration::<R>();
        if registration.handler.is_some() {
            log::warn!("replacing the handler registered for {}", type_name::<R>());
        }
        registration.handler = Some(Box::new(handler));
        self
    }

    /// Adds a check run on every `R` before its handler. Checks run in the
    /// order they were added.
    pub fn validator<R: Request>(
        mut self,
        check: impl Fn(&R) -> Outcome<()> + Send + Sync + 'static,
    ) -> Self {
        self.registration::<R>().validators.push(Box::new(check));
        self
    }

    pub fn build(self) -> Mediator {
        Mediator {
            registrations: self.registrations,
        }
    }

    fn registration<R: Request>(&mut self) -> &mut Registration<R> {
        let slot = self
            .registrations
            .entry(TypeId::of::<R>())
            .or_insert_with(|| Box::new(Registration::<R>::empty()) as Box<dyn Any + Send + Sync>);
        match slot.downcast_mut::<Registration<R>>() {
            Some(registration) => registration,
            None => unreachable!("registrations are keyed by their own request type"),
        }
    }
}

/// Dispatches each request to the one handler registered for its type.
pub struct Mediator {
    registrations: Registry,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::default()
    }

    /// Runs every validator registered for `R`; if any failed, returns their
    /// errors merged into one [`ValidationError`] without calling the handler.
    pub fn send<R: Request>(&self, request: R) -> Outcome<R::Response> {
        let Some(registration) = self
            .registrations
            .get(&TypeId::of::<R>())
            .and_then(|slot| slot.downcast_ref::<Registration<R>>())
        else {
            return handler_missing::<R>();
        };
        let Some(handler) = &registration.handler else {
            return handler_missing::<R>();
        };

        let checks: Vec<Outcome<()>> = registration
            .validators
            .iter()
            .map(|check| check(&request))
            .collect();
        if checks.iter().any(Outcome::is_failure) {
            log::debug!("{} rejected by validation", type_name::<R>());
            return Outcome::failure(ValidationError::from_outcomes(&checks));
        }

        log::debug!("dispatching {}", type_name::<R>());
        handler.handle(request)
    }
}

fn handler_missing<R: Request>() -> Outcome<R::Response> {
    log::error!("no handler registered for {}", type_name::<R>());
    Outcome::failure(Error::failure(
        "Mediator.HandlerMissing",
        "No handler is registered for this request.",
    ))
}
