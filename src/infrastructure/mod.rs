pub mod memory_repo;
pub mod models;
pub mod quote_repo;

pub use memory_repo::InMemoryQuoteRepository;
pub use quote_repo::DieselQuoteRepository;
