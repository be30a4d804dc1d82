use error_stack::Report;
use sqlx::error::ErrorKind;

use kernel::KernelError;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read {key}: {error}")]
    Env {
        key: &'static str,
        error: dotenvy::Error,
    },
    #[error("invalid value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(sqlx_report)
    }
}

impl<T> ConvertError for Result<T, DriverError> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| Report::from(error).change_context(KernelError::Internal))
    }
}

fn sqlx_report(error: sqlx::Error) -> Report<KernelError> {
    let context = match &error {
        sqlx::Error::PoolTimedOut => KernelError::Timeout,
        sqlx::Error::Database(database)
            if matches!(database.kind(), ErrorKind::ForeignKeyViolation) =>
        {
            KernelError::Validation
        }
        _ => KernelError::Internal,
    };
    Report::from(error).change_context(context)
}
