use obscura_settings::{Logging, LoggingStyle};
use obscura_utils::error::tags::Suggestion;
use obscura_utils::{error::exts::*, Result};
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, Layer};

const DIRECTIVES_SUGGESTION: &str = "Read the syntax guide for filter directives at:\nhttps://docs.rs/tracing-subscriber/0.3.18/tracing_subscriber/filter/struct.EnvFilter.html#directives";

pub fn init(settings: &Logging) -> Result<()> {
    // Some of our dependencies still emit through `log`.
    tracing_log::LogTracer::init()
        .into_typed_error()
        .attach_printable("could not initialize log tracer")
        .anonymize_error()?;

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse(settings.targets())
        .into_typed_error()
        .attach_printable("could not parse log targets")
        .attach(Suggestion::new(DIRECTIVES_SUGGESTION))
        .anonymize_error()?;

    // Logs go to stderr so they never mix with command output.
    let log_layer = match settings.style() {
        LoggingStyle::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .without_time()
            .boxed(),
        LoggingStyle::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .without_time()
            .boxed(),
        LoggingStyle::JSON => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    }
    .with_filter(env_filter);

    let subscriber = tracing_subscriber::Registry::default()
        .with(log_layer)
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .into_typed_error()
        .attach_printable("unable to setup tracing")
        .anonymize_error()?;

    Ok(())
}
