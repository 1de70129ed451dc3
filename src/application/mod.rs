pub mod mediator;
pub mod quotes;

pub use mediator::{Mediator, MediatorBuilder, Request, RequestHandler};
pub use quotes::build_mediator;
