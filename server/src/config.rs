use std::net::SocketAddr;
use std::path::PathBuf;

use driver::database::DatabaseConfig;
use driver::error::{ConvertError, DriverError};
use driver::optional_env;
use error_stack::ResultExt;
use kernel::KernelError;

static BOOKSHELF_BIND: &str = "BOOKSHELF_BIND";
static BOOKSHELF_LOG_DIR: &str = "BOOKSHELF_LOG_DIR";

const DEFAULT_BIND: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_LOG_DIR: &str = "./logs/";

/// Process-wide settings, read once in `main` and handed to whoever needs them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub log_dir: PathBuf,
    /// `None` serves from the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_lookup(optional_env)
    }

    fn from_lookup<F>(lookup: F) -> error_stack::Result<Self, KernelError>
    where
        F: Fn(&'static str) -> Result<Option<String>, DriverError>,
    {
        let bind = match lookup(BOOKSHELF_BIND).convert_error()? {
            None => SocketAddr::from(DEFAULT_BIND),
            Some(value) => parse_bind(&value)?,
        };
        let log_dir = lookup(BOOKSHELF_LOG_DIR)
            .convert_error()?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
        let database = DatabaseConfig::from_lookup(&lookup)
            .convert_error()
            .attach_printable("Invalid database configuration")?;
        Ok(Self {
            bind,
            log_dir,
            database,
        })
    }
}

fn parse_bind(value: &str) -> error_stack::Result<SocketAddr, KernelError> {
    value
        .parse::<SocketAddr>()
        .change_context(KernelError::Internal)
        .attach_printable_lazy(|| format!("{BOOKSHELF_BIND} is not a socket address: {value:?}"))
}
