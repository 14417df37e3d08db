//! In-memory service wiring for integration tests

use std::sync::Arc;

use domain_ledger::{AllocatorConfig, PaymentService};
use infra_store::MemoryStore;

/// A payment service over a fresh in-memory store, plus a handle to the
/// store for direct inspection or corruption in integrity tests
pub fn memory_service() -> (Arc<MemoryStore>, PaymentService) {
    let store = Arc::new(MemoryStore::new());
    let service = PaymentService::new(store.clone(), AllocatorConfig::default());
    (store, service)
}
