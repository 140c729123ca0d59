use error_stack::Context;
use std::str::FromStr;
use thiserror::Error;

use crate::error::exts::{ErrorExt, IntoTypedError, ResultExt};
use crate::{Error, ErrorCategory, Result};

#[derive(Debug, Error)]
#[error("Could not load environment variable")]
pub struct LoadEnvError;

/// Loads variables from `.env` file if there is one. Missing `.env`
/// files are ignored.
pub fn init() {
    dotenvy::dotenv().ok();
}

#[track_caller]
pub fn var(key: &'static str) -> Result<String, LoadEnvError> {
    match var_opt(key)? {
        Some(value) => Ok(value),
        None => Err(Error::context(ErrorCategory::Unknown, LoadEnvError))
            .attach_printable(format!("{key:?} variable is required to run Obscura")),
    }
}

#[track_caller]
pub fn var_opt(key: &'static str) -> Result<Option<String>, LoadEnvError> {
    use std::env::VarError;
    match dotenvy::var(key) {
        Ok(n) => Ok(Some(n)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(dotenvy::Error::EnvVar(VarError::NotUnicode(..))) => {
            Err(Error::context(ErrorCategory::Unknown, LoadEnvError))
                .attach_printable(format!("{key:?} variable must contain valid UTF-8 text"))
        }
        Err(other) => Err(Error::context(ErrorCategory::Unknown, LoadEnvError)
            .attach_printable(format!("could not read {key:?} variable: {other}"))),
    }
}

#[track_caller]
pub fn var_opt_parsed<T: FromStr>(key: &'static str) -> Result<Option<T>, LoadEnvError>
where
    T::Err: Context,
{
    let Some(value) = var_opt(key)? else {
        return Ok(None);
    };
    value
        .parse()
        .map(Some)
        .into_typed_error()
        .change_context(LoadEnvError)
        .attach_printable_lazy(|| format!("could not parse value of {key:?} variable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn should_return_none_if_missing() {
        let value = var_opt("OBSCURA_TEST_SURELY_MISSING_VARIABLE").unwrap();
        assert!(value.is_none());
        assert!(var("OBSCURA_TEST_SURELY_MISSING_VARIABLE").is_err());
    }

    #[test]
    fn should_parse_present_vars() {
        std::env::set_var("OBSCURA_TEST_SETTINGS_PATH", "obscura.toml");
        let value = var_opt_parsed::<PathBuf>("OBSCURA_TEST_SETTINGS_PATH").unwrap();
        assert_eq!(value, Some(PathBuf::from("obscura.toml")));
    }
}
