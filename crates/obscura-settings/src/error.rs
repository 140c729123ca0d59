use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not load Obscura settings")]
pub struct SettingsLoadError;
