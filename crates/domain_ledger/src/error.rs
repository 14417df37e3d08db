//! Ledger domain errors

use thiserror::Error;

use core_kernel::{CustomerId, Money, PortError};

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The payment amount is malformed or out of range
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The payment exceeds what is owed; over-payment is rejected outright
    #[error("Payment of {amount} exceeds outstanding balance of {outstanding}")]
    ExceedsOutstanding { amount: Money, outstanding: Money },

    /// A payment was submitted but nothing is owed
    #[error("No outstanding balance for {0}")]
    NoOutstandingBalance(String),

    /// The referenced customer or supplier does not exist
    #[error("{entity_type} not found: {id}")]
    EntityNotFound { entity_type: &'static str, id: String },

    /// The cached aggregate disagrees with the recomputed value
    #[error("Integrity mismatch for customer {customer_id}: stored {stored}, computed {computed}")]
    IntegrityMismatch {
        customer_id: CustomerId,
        stored: Money,
        computed: Money,
    },

    /// The backing store failed; transient failures are the caller's to retry
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl LedgerError {
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        LedgerError::InvalidAmount(message.into())
    }

    /// Maps a store lookup failure, turning NotFound into the domain's
    /// EntityNotFound so the API can answer 404 instead of 500
    pub fn from_lookup(entity_type: &'static str, id: impl ToString, err: PortError) -> Self {
        if err.is_not_found() {
            LedgerError::EntityNotFound {
                entity_type,
                id: id.to_string(),
            }
        } else {
            LedgerError::Store(err)
        }
    }
}
