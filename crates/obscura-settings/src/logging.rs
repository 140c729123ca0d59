use doku::Document;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Debug, Document, Deserialize, Serialize, TypedBuilder)]
#[serde(default)]
pub struct Logging {
    /// How logs are printed to stderr. Command output always
    /// goes to stdout so logs never get in the way.
    ///
    /// Available styles:
    /// - `compact` - one line per event
    /// - `pretty` - multi-line events with their span context
    /// - `json` - one JSON object per event, for log collectors
    ///
    /// The default value is `compact` if not set.
    #[builder(default = LoggingStyle::Compact)]
    #[doku(as = "String", example = "compact")]
    pub style: LoggingStyle,

    /// Filter directives deciding which events get logged, such as
    /// `obscura_recruitment=debug`. `RUST_LOG` takes precedence when set.
    ///
    /// Directive syntax:
    /// https://docs.rs/tracing-subscriber/0.3.18/tracing_subscriber/filter/struct.EnvFilter.html
    ///
    /// Only `info` and above are logged if left blank.
    #[builder(default)]
    #[doku(example = "info")]
    pub targets: String,
}

impl Logging {
    #[must_use]
    pub fn style(&self) -> LoggingStyle {
        self.style
    }

    #[must_use]
    pub fn targets(&self) -> &str {
        &self.targets
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggingStyle {
    #[default]
    Compact,
    Pretty,
    JSON,
}

impl Default for Logging {
    fn default() -> Self {
        Self::builder().build()
    }
}
