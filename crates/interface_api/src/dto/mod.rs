//! Request/response data transfer objects

pub mod customer;
pub mod order;
pub mod payment;
pub mod supplier;
pub mod transaction;
