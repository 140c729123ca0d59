use std::borrow::Cow;
use std::fmt;

/// A hint shown under the error report telling the user
/// what they can do to fix it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion(Cow<'static, str>);

impl Suggestion {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self(Cow::Borrowed(message))
    }

    #[must_use]
    pub fn owned(message: impl fmt::Display) -> Self {
        Self(Cow::Owned(message.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn install_hook() {
        crate::Error::install_hook::<Self>(|this, ctx| {
            ctx.push_body(format!("suggestion: {this}"));
        });
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
