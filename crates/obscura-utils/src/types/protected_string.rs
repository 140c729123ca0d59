use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};
use zeroize::Zeroize;

/// A string that never shows up in logs and is wiped from memory
/// once dropped. Used for session access tokens.
pub struct ProtectedString(Box<str>);

impl ProtectedString {
    #[must_use]
    pub fn new<T: AsRef<str>>(value: T) -> Self {
        Self(Box::from(value.as_ref()))
    }

    /// Exposes the value of the string
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProtectedString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl From<&str> for ProtectedString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Clone for ProtectedString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl Debug for ProtectedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

impl Display for ProtectedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<redacted>")
    }
}

impl Drop for ProtectedString {
    fn drop(&mut self) {
        let data: &mut str = &mut self.0;
        data.zeroize();
    }
}

impl Hash for ProtectedString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialEq for ProtectedString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ProtectedString {}

impl PartialEq<str> for ProtectedString {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ProtectedString {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl<'de> Deserialize<'de> for ProtectedString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl Serialize for ProtectedString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.expose())
    }
}
