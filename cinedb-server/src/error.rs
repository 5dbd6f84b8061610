//! Error types for cinedb-server

use thiserror::Error;

use crate::db::DbError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Failures that stop the server from starting or running.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for ServerError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(DbError::from(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: ServerError = io_err.into();

        assert!(matches!(err, ServerError::Io(_)));
        assert!(err.to_string().contains("port taken"));
    }

    #[test]
    fn sqlx_error_wraps_as_database() {
        let err: ServerError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ServerError::Database(_)));
    }
}
