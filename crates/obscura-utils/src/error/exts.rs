use error_stack::Context;
use std::fmt;

use super::{Error, ErrorCategory, Result};

pub use super::into_result::*;

/// Implements shared functions for [`Result`](std::result::Result) where
/// its error type is a typed [`Error`].
pub trait ResultExt {
    type Ok;
    type Context;

    fn anonymize_error(self) -> Result<Self::Ok>;

    fn attach<A>(self, attachment: A) -> Result<Self::Ok, Self::Context>
    where
        A: Send + Sync + 'static;

    fn attach_printable<A>(self, attachment: A) -> Result<Self::Ok, Self::Context>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static;

    fn attach_printable_lazy<A, F>(self, attachment: F) -> Result<Self::Ok, Self::Context>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> A;

    fn category(self, category: ErrorCategory) -> Result<Self::Ok, Self::Context>;

    fn change_context<P>(self, context: P) -> Result<Self::Ok, P>
    where
        P: Context;

    fn change_context_lazy<P, F>(self, context: F) -> Result<Self::Ok, P>
    where
        P: Context,
        F: FnOnce() -> P;
}

impl<T, C> ResultExt for Result<T, C>
where
    C: Context,
{
    type Ok = T;
    type Context = C;

    #[track_caller]
    fn anonymize_error(self) -> Result<T> {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.anonymize()),
        }
    }

    #[track_caller]
    fn attach<A>(self, attachment: A) -> Result<T, C>
    where
        A: Send + Sync + 'static,
    {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.attach(attachment)),
        }
    }

    #[track_caller]
    fn attach_printable<A>(self, attachment: A) -> Result<T, C>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.attach_printable(attachment)),
        }
    }

    #[track_caller]
    fn attach_printable_lazy<A, F>(self, attachment: F) -> Result<T, C>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> A,
    {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.attach_printable(attachment())),
        }
    }

    #[track_caller]
    fn category(self, category: ErrorCategory) -> Result<T, C> {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.category(category)),
        }
    }

    #[track_caller]
    fn change_context<P>(self, context: P) -> Result<T, P>
    where
        P: Context,
    {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.change_context(context)),
        }
    }

    #[track_caller]
    fn change_context_lazy<P, F>(self, context: F) -> Result<T, P>
    where
        P: Context,
        F: FnOnce() -> P,
    {
        match self {
            Ok(okay) => Ok(okay),
            Err(error) => Err(error.change_context(context())),
        }
    }
}

/// Implements shared functions for every [`Error`] regardless
/// of its context type.
pub trait ErrorExt {
    /// Whether the frame stack has an attachment or a context of type `A`.
    #[must_use]
    fn attaches<A>(&self) -> bool
    where
        A: Send + Sync + 'static;

    #[must_use]
    fn attach<A>(self, attachment: A) -> Self
    where
        A: Send + Sync + 'static;

    #[must_use]
    fn attach_printable<A>(self, attachment: A) -> Self
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static;

    #[must_use]
    fn category(self, category: ErrorCategory) -> Self;

    #[must_use]
    fn change_context<N>(self, context: N) -> Error<N>
    where
        N: Context;

    fn downcast_ref<R>(&self) -> Option<&R>
    where
        R: Send + Sync + 'static;

    #[must_use]
    fn get_category(&self) -> &ErrorCategory;
}

impl<C: Context> ErrorExt for Error<C> {
    fn attaches<A>(&self) -> bool
    where
        A: Send + Sync + 'static,
    {
        self.report.contains::<A>()
    }

    #[track_caller]
    fn attach<A>(mut self, attachment: A) -> Self
    where
        A: Send + Sync + 'static,
    {
        self.report = self.report.attach(attachment);
        self
    }

    #[track_caller]
    fn attach_printable<A>(mut self, attachment: A) -> Self
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.report = self.report.attach_printable(attachment);
        self
    }

    #[track_caller]
    fn category(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    #[track_caller]
    fn change_context<N>(self, context: N) -> Error<N>
    where
        N: Context,
    {
        Error {
            category: self.category,
            report: self.report.change_context(context),
            trace: self.trace,
        }
    }

    fn downcast_ref<R>(&self) -> Option<&R>
    where
        R: Send + Sync + 'static,
    {
        self.report.downcast_ref::<R>()
    }

    fn get_category(&self) -> &ErrorCategory {
        &self.category
    }
}
