//! Transaction DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::Money;
use domain_ledger::{EntityType, Transaction, TransactionFilter, TransactionType};

#[derive(Debug, Deserialize, Default)]
pub struct TransactionQuery {
    pub entity_id: Option<Uuid>,
    pub entity_type: Option<EntityType>,
    pub limit: Option<u32>,
}

impl From<TransactionQuery> for TransactionFilter {
    fn from(query: TransactionQuery) -> Self {
        TransactionFilter {
            entity_id: query.entity_id,
            entity_type: query.entity_type,
            limit: query.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub entity_id: Uuid,
    pub entity_type: EntityType,
    pub txn_type: TransactionType,
    pub amount: Money,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id.into(),
            entity_id: transaction.entity_id,
            entity_type: transaction.entity_type,
            txn_type: transaction.txn_type,
            amount: transaction.amount,
            description: transaction.description,
            created_at: transaction.created_at,
        }
    }
}
