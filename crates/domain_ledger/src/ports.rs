//! Ledger domain port
//!
//! The store trait the domain needs from its persistence collaborator.
//! Adapters (PostgreSQL, in-memory) implement it; the `apply_*` methods are
//! the atomicity seams — everything inside one call is persisted together or
//! not at all, so a partial allocation can never land without its paired
//! transaction record and updated aggregate.

use async_trait::async_trait;
use uuid::Uuid;

use core_kernel::{CustomerId, DomainPort, OrderId, PortError, SupplierId};

use crate::adjustment::{DebtAdjustment, LedgerEntry};
use crate::allocation::{CustomerAllocation, SupplierAllocation};
use crate::customer::Customer;
use crate::order::Order;
use crate::supplier::Supplier;
use crate::transaction::{EntityType, Transaction};

/// Filter for transaction listings
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only transactions referencing this entity
    pub entity_id: Option<Uuid>,
    /// Only transactions on this side of the counter
    pub entity_type: Option<EntityType>,
    /// Cap the number of rows returned (newest first)
    pub limit: Option<u32>,
}

impl TransactionFilter {
    pub fn for_entity(entity_id: Uuid) -> Self {
        Self {
            entity_id: Some(entity_id),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Storage port for the ledger domain
#[async_trait]
pub trait LedgerStore: DomainPort {
    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, PortError>;

    async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, PortError>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, PortError>;

    async fn get_order(&self, id: OrderId) -> Result<Order, PortError>;

    async fn orders_for_customer(&self, id: CustomerId) -> Result<Vec<Order>, PortError>;

    async fn adjustments_for_customer(&self, id: CustomerId)
        -> Result<Vec<DebtAdjustment>, PortError>;

    /// Ledger entries in creation order
    async fn ledger_entries_for_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<LedgerEntry>, PortError>;

    async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, PortError>;

    // ------------------------------------------------------------------
    // Writes; each call is atomic
    // ------------------------------------------------------------------

    async fn insert_customer(&self, customer: Customer) -> Result<(), PortError>;

    async fn insert_supplier(
        &self,
        supplier: Supplier,
        opening_transaction: Option<Transaction>,
    ) -> Result<(), PortError>;

    /// Persists a new order together with the recomputed customer aggregate
    /// and, for hotel customers, the mirrored ledger entry
    async fn apply_order(
        &self,
        order: Order,
        customer: Customer,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError>;

    /// Persists an allocation: mutated orders, customer aggregate, the
    /// payment transaction, and the optional ledger entry — all or nothing
    async fn apply_customer_allocation(
        &self,
        allocation: &CustomerAllocation,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError>;

    /// Persists a supplier settlement: new debt plus its transaction
    async fn apply_supplier_allocation(
        &self,
        allocation: &SupplierAllocation,
    ) -> Result<(), PortError>;

    /// Persists a purchase: increased supplier debt plus its transaction
    async fn apply_purchase(
        &self,
        supplier: Supplier,
        transaction: Transaction,
    ) -> Result<(), PortError>;

    /// Persists a manual adjustment with the corrected aggregate, its
    /// transaction, and the optional ledger entry
    async fn apply_adjustment(
        &self,
        adjustment: DebtAdjustment,
        customer: Customer,
        transaction: Transaction,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError>;

    /// Records a standalone expense transaction
    async fn insert_transaction(&self, transaction: Transaction) -> Result<(), PortError>;

    /// Overwrites the cached customer aggregate (integrity repair)
    async fn save_customer(&self, customer: Customer) -> Result<(), PortError>;
}
