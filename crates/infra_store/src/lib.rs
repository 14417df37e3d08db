//! Storage adapters for the trade ledger
//!
//! Two implementations of [`domain_ledger::LedgerStore`]:
//!
//! - [`PgStore`]: PostgreSQL via SQLx. Every `apply_*` call runs inside one
//!   database transaction, so an allocation's orders, aggregate, and audit
//!   record land together or not at all.
//! - [`MemoryStore`]: an in-memory adapter behind a single `RwLock`, used by
//!   the API test suite and local development.

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations};
pub use postgres::PgStore;
