//! Integration tests for typed identifiers

use core_kernel::{CustomerId, OrderId, SupplierId, TransactionId};
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_prefixes_are_distinct() {
    assert_eq!(CustomerId::prefix(), "CUS");
    assert_eq!(SupplierId::prefix(), "SUP");
    assert_eq!(OrderId::prefix(), "ORD");
    assert_eq!(TransactionId::prefix(), "TXN");
}

#[test]
fn test_display_and_parse_round_trip() {
    let id = CustomerId::new();
    let rendered = id.to_string();
    assert!(rendered.starts_with("CUS-"));
    assert_eq!(CustomerId::from_str(&rendered).unwrap(), id);
}

#[test]
fn test_uuid_conversions() {
    let uuid = Uuid::new_v4();
    let id = OrderId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
    assert_eq!(id.as_uuid(), &uuid);
}

#[test]
fn test_invalid_string_is_rejected() {
    assert!(CustomerId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_serde_is_transparent() {
    let id = TransactionId::new_v7();
    let json = serde_json::to_string(&id).unwrap();
    let back: TransactionId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
    // serialized form is the bare uuid, without prefix
    assert!(!json.contains("TXN"));
}
