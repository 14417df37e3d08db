//! Trading Ledger Domain
//!
//! This crate implements the payment allocation and ledger rules for the
//! trade ledger: applying customer payments against outstanding orders
//! (oldest debt first), flat supplier debt settlement, immutable transaction
//! records, running-account ledgers for hotel customers, and the integrity
//! checker that detects and repairs aggregate drift.
//!
//! The domain owns no I/O. Storage is reached through the [`ports::LedgerStore`]
//! trait, and [`services::PaymentService`] serializes mutations per entity id
//! so two concurrent payments can never interleave on the same customer.

pub mod adjustment;
pub mod allocation;
pub mod customer;
pub mod error;
pub mod integrity;
pub mod order;
pub mod ports;
pub mod services;
pub mod supplier;
pub mod transaction;

pub use adjustment::{
    rebuild_running_balances, replay, running_balances_consistent, DebtAdjustment, LedgerEntry,
    LedgerEntryKind,
};
pub use allocation::{
    allocate_customer_payment, allocate_supplier_payment, AllocatorConfig, CustomerAllocation,
    SupplierAllocation,
};
pub use customer::{Customer, CustomerType};
pub use error::LedgerError;
pub use integrity::{check_customer, IntegrityReport, RepairAction};
pub use order::{Order, OrderItem, PaymentStatus};
pub use ports::{LedgerStore, TransactionFilter};
pub use services::{EntityLocks, PaymentService};
pub use supplier::Supplier;
pub use transaction::{EntityType, Transaction, TransactionType};
