//! Request handlers

pub mod admin;
pub mod customer;
pub mod health;
pub mod order;
pub mod supplier;
pub mod transaction;
