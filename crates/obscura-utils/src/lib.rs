pub mod env;
pub mod error;
pub mod serial;
pub mod types;

pub use self::error::{Error, ErrorCategory, Result};
