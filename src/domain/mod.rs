pub mod error;
pub mod outcome;
pub mod ports;
pub mod quote;
pub mod validation;

pub use error::{Error, ErrorDetails, ErrorKind};
pub use outcome::{Failure, Outcome};
pub use validation::{validate_all, ValidationError};
