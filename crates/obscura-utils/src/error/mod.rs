use error_stack::Report;
use std::fmt;
use thiserror::Error as ThisError;
use tracing_error::SpanTrace;

mod category;
mod into_result;

pub mod exts;
pub mod tags;

pub use self::category::*;
pub use ::error_stack::Context;

pub type Result<T, C = AnonymizedError> = std::result::Result<T, Error<C>>;

/// Context used for [`Error`] to indicate that the actual context
/// of the error is no longer relevant to the caller.
#[derive(Debug, ThisError)]
#[error("an error occurred")]
pub struct AnonymizedError;

#[must_use]
pub struct Error<C = AnonymizedError> {
    pub(crate) category: ErrorCategory,
    pub(crate) report: Report<C>,
    trace: SpanTrace,
}

impl<C: Context> Error<C> {
    #[track_caller]
    pub fn context(category: ErrorCategory, context: C) -> Self {
        Self {
            category,
            report: Report::new(context),
            trace: SpanTrace::capture(),
        }
    }

    #[track_caller]
    pub fn report(category: ErrorCategory, report: Report<C>) -> Self {
        Self {
            category,
            report,
            trace: SpanTrace::capture(),
        }
    }

    /// Conceals the current context of the error behind [`AnonymizedError`]
    /// while keeping its category and the entire frame stack.
    #[track_caller]
    pub fn anonymize(self) -> Error {
        Error {
            category: self.category,
            report: self.report.change_context(AnonymizedError),
            trace: self.trace,
        }
    }

    /// The context at the top of the frame stack.
    #[must_use]
    pub fn current_context(&self) -> &C {
        self.report.current_context()
    }
}

impl Error {
    /// Wrapper of [`Report::install_debug_hook`].
    pub fn install_hook<T: Send + Sync + 'static>(
        hook: impl Fn(&T, &mut error_stack::fmt::HookContext<T>) + Send + Sync + 'static,
    ) {
        Report::install_debug_hook::<T>(hook);
    }

    /// Installs hooks from all tags in [`obscura_utils`](crate) and sets up
    /// preferences from [`error_stack`] tailored for Obscura.
    pub fn init() {
        use self::tags::Suggestion;
        use error_stack::fmt::{Charset, ColorMode};

        Report::set_charset(Charset::Ascii);
        Report::set_color_mode(ColorMode::None);

        Suggestion::install_hook();
    }
}

impl<C> fmt::Debug for Error<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("category", &self.category)
            .field("report", &self.report)
            .field("trace", &self.trace)
            .finish()
    }
}

impl<C> fmt::Display for Error<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.category, f)?;
        writeln!(f, ": {:?}", self.report)?;
        fmt::Display::fmt(&self.trace, f)
    }
}
