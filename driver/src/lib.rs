use crate::error::DriverError;

pub mod database;
pub mod error;

/// Reads `key` from the environment or a `.env` file. An unset variable yields `None`.
pub fn optional_env(key: &'static str) -> Result<Option<String>, DriverError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(DriverError::Env { key, error }),
    }
}
