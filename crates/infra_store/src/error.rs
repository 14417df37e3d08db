//! Store error mapping

use core_kernel::PortError;
use thiserror::Error;

/// Errors raised inside the storage adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl StoreError {
    /// Maps adapter failures onto the domain's port taxonomy.
    ///
    /// Pool and connection failures are transient (the caller may retry);
    /// anything else is an internal fault.
    pub fn into_port_error(self) -> PortError {
        match self {
            StoreError::Database(e) => match &e {
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    PortError::Connection {
                        message: e.to_string(),
                        source: Some(Box::new(e)),
                    }
                }
                sqlx::Error::RowNotFound => {
                    PortError::internal("query expected a row that was not there")
                }
                _ => PortError::Internal {
                    message: e.to_string(),
                    source: Some(Box::new(e)),
                },
            },
            StoreError::CorruptRow(message) => PortError::internal(message),
        }
    }
}

impl From<StoreError> for PortError {
    fn from(err: StoreError) -> Self {
        err.into_port_error()
    }
}

/// Shorthand used by the postgres adapter
pub(crate) fn db_err(e: sqlx::Error) -> PortError {
    StoreError::Database(e).into_port_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_transient() {
        let err: PortError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(err.is_transient());
    }

    #[test]
    fn test_corrupt_row_is_internal() {
        let err: PortError = StoreError::CorruptRow("bad enum".to_string()).into();
        assert!(!err.is_transient());
        assert!(!err.is_not_found());
    }
}
