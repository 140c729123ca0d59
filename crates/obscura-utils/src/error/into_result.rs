// Instead of copying error_stack's ResultExt, we can control which
// category the error should start with.
use core::result::Result as StdResult;
use error_stack::Context;

use crate::{Error, ErrorCategory, Result};

pub trait IntoTypedError {
    type Ok;
    type Error: Context;

    /// Turns into [`Error`] with [`ErrorCategory::Unknown`] as its category.
    fn into_typed_error(self) -> Result<Self::Ok, Self::Error>;
}

impl<T, C: Context> IntoTypedError for StdResult<T, C> {
    type Ok = T;
    type Error = C;

    #[track_caller]
    fn into_typed_error(self) -> Result<T, C> {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(Error::context(ErrorCategory::Unknown, error)),
        }
    }
}

pub trait OptionExt {
    type Some;

    /// Turns [`None`] into [`Error`] with the given context.
    fn ok_or_context<C: Context>(self, category: ErrorCategory, context: C)
        -> Result<Self::Some, C>;
}

impl<T> OptionExt for Option<T> {
    type Some = T;

    #[track_caller]
    fn ok_or_context<C: Context>(self, category: ErrorCategory, context: C) -> Result<T, C> {
        match self {
            Some(value) => Ok(value),
            None => Err(Error::context(category, context)),
        }
    }
}
