//! Core Kernel - Foundational types for the trade ledger
//!
//! This crate provides the building blocks used across all domain modules:
//!
//! - **Money**: cent-precise monetary values backed by `rust_decimal`
//! - **Identifiers**: strongly-typed UUID wrappers for domain entities
//! - **Ports**: error and marker types for the ports-and-adapters seams

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{
    AdjustmentId, CustomerId, LedgerEntryId, OrderId, SupplierId, TransactionId,
};
pub use money::{Money, MoneyError};
pub use ports::{DomainPort, PortError};
