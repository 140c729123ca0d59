use strum_macros::Display;

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Display)]
#[must_use]
#[non_exhaustive]
pub enum ErrorCategory {
    /// The applicant or reviewer can fix this on their own, such as
    /// filling out a missing field or signing in again.
    #[strum(to_string = "User error")]
    User,
    #[default]
    #[strum(to_string = "Error occurred")]
    Unknown,
}

impl ErrorCategory {
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::User)
    }
}
