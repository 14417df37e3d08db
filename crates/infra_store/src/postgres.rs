//! PostgreSQL adapter
//!
//! Implements [`LedgerStore`] over SQLx. Runtime-checked queries keep the
//! build independent of a live database; the schema lives under
//! `migrations/`. Every `apply_*` method runs inside a single database
//! transaction so an allocation's orders, aggregate, audit record, and
//! ledger entry land together or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool, QueryBuilder};
use uuid::Uuid;

use core_kernel::{
    AdjustmentId, CustomerId, DomainPort, LedgerEntryId, Money, OrderId, PortError, SupplierId,
    TransactionId,
};
use domain_ledger::{
    Customer, CustomerAllocation, CustomerType, DebtAdjustment, EntityType, LedgerEntry,
    LedgerEntryKind, LedgerStore, Order, OrderItem, PaymentStatus, Supplier, SupplierAllocation,
    Transaction, TransactionFilter, TransactionType,
};

use crate::error::{db_err, StoreError};

/// SQLx-backed store
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DomainPort for PgStore {}

// ----------------------------------------------------------------------
// Enum <-> column text
// ----------------------------------------------------------------------

fn customer_type_str(t: CustomerType) -> &'static str {
    match t {
        CustomerType::Retail => "retail",
        CustomerType::Hotel => "hotel",
    }
}

fn parse_customer_type(s: &str) -> Result<CustomerType, StoreError> {
    match s {
        "retail" => Ok(CustomerType::Retail),
        "hotel" => Ok(CustomerType::Hotel),
        other => Err(StoreError::CorruptRow(format!(
            "unknown customer_type {other:?}"
        ))),
    }
}

fn payment_status_str(s: PaymentStatus) -> &'static str {
    match s {
        PaymentStatus::Pending => "pending",
        PaymentStatus::PartiallyPaid => "partially_paid",
        PaymentStatus::Paid => "paid",
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, StoreError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "partially_paid" => Ok(PaymentStatus::PartiallyPaid),
        "paid" => Ok(PaymentStatus::Paid),
        other => Err(StoreError::CorruptRow(format!(
            "unknown payment_status {other:?}"
        ))),
    }
}

fn entity_type_str(t: EntityType) -> &'static str {
    match t {
        EntityType::Customer => "customer",
        EntityType::Supplier => "supplier",
    }
}

fn parse_entity_type(s: &str) -> Result<EntityType, StoreError> {
    match s {
        "customer" => Ok(EntityType::Customer),
        "supplier" => Ok(EntityType::Supplier),
        other => Err(StoreError::CorruptRow(format!(
            "unknown entity_type {other:?}"
        ))),
    }
}

fn txn_type_str(t: TransactionType) -> &'static str {
    match t {
        TransactionType::CustomerPayment => "customer_payment",
        TransactionType::SupplierPayment => "supplier_payment",
        TransactionType::Purchase => "purchase",
        TransactionType::Expense => "expense",
        TransactionType::InitialDebt => "initial_debt",
        TransactionType::StockAdjustment => "stock_adjustment",
    }
}

fn parse_txn_type(s: &str) -> Result<TransactionType, StoreError> {
    match s {
        "customer_payment" => Ok(TransactionType::CustomerPayment),
        "supplier_payment" => Ok(TransactionType::SupplierPayment),
        "purchase" => Ok(TransactionType::Purchase),
        "expense" => Ok(TransactionType::Expense),
        "initial_debt" => Ok(TransactionType::InitialDebt),
        "stock_adjustment" => Ok(TransactionType::StockAdjustment),
        other => Err(StoreError::CorruptRow(format!(
            "unknown txn_type {other:?}"
        ))),
    }
}

fn ledger_kind_str(k: LedgerEntryKind) -> &'static str {
    match k {
        LedgerEntryKind::Order => "order",
        LedgerEntryKind::Payment => "payment",
        LedgerEntryKind::Adjustment => "adjustment",
    }
}

fn parse_ledger_kind(s: &str) -> Result<LedgerEntryKind, StoreError> {
    match s {
        "order" => Ok(LedgerEntryKind::Order),
        "payment" => Ok(LedgerEntryKind::Payment),
        "adjustment" => Ok(LedgerEntryKind::Adjustment),
        other => Err(StoreError::CorruptRow(format!(
            "unknown ledger entry kind {other:?}"
        ))),
    }
}

// ----------------------------------------------------------------------
// Row types
// ----------------------------------------------------------------------

#[derive(FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    customer_type: String,
    pending_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_domain(self) -> Result<Customer, StoreError> {
        Ok(Customer {
            id: CustomerId::from_uuid(self.id),
            name: self.name,
            phone: self.phone,
            customer_type: parse_customer_type(&self.customer_type)?,
            pending_amount: Money::new(self.pending_amount),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    debt: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SupplierRow {
    fn into_domain(self) -> Supplier {
        Supplier {
            id: SupplierId::from_uuid(self.id),
            name: self.name,
            phone: self.phone,
            debt: Money::new(self.debt),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    items: Json<Vec<OrderItem>>,
    total_amount: Decimal,
    paid_amount: Decimal,
    payment_status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, StoreError> {
        Ok(Order {
            id: OrderId::from_uuid(self.id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            items: self.items.0,
            total_amount: Money::new(self.total_amount),
            paid_amount: Money::new(self.paid_amount),
            payment_status: parse_payment_status(&self.payment_status)?,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct TransactionRow {
    id: Uuid,
    entity_id: Uuid,
    entity_type: String,
    txn_type: String,
    amount: Decimal,
    description: String,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> Result<Transaction, StoreError> {
        Ok(Transaction {
            id: TransactionId::from_uuid(self.id),
            entity_id: self.entity_id,
            entity_type: parse_entity_type(&self.entity_type)?,
            txn_type: parse_txn_type(&self.txn_type)?,
            amount: Money::new(self.amount),
            description: self.description,
            created_at: self.created_at,
        })
    }
}

#[derive(FromRow)]
struct AdjustmentRow {
    id: Uuid,
    customer_id: Uuid,
    amount: Decimal,
    reason: String,
    created_at: DateTime<Utc>,
}

impl AdjustmentRow {
    fn into_domain(self) -> DebtAdjustment {
        DebtAdjustment {
            id: AdjustmentId::from_uuid(self.id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            amount: Money::new(self.amount),
            reason: self.reason,
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct LedgerEntryRow {
    id: Uuid,
    customer_id: Uuid,
    kind: String,
    amount: Decimal,
    description: String,
    running_balance: Decimal,
    created_at: DateTime<Utc>,
}

impl LedgerEntryRow {
    fn into_domain(self) -> Result<LedgerEntry, StoreError> {
        Ok(LedgerEntry {
            id: LedgerEntryId::from_uuid(self.id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            kind: parse_ledger_kind(&self.kind)?,
            amount: Money::new(self.amount),
            description: self.description,
            running_balance: Money::new(self.running_balance),
            created_at: self.created_at,
        })
    }
}

// ----------------------------------------------------------------------
// Statement helpers shared between the pool and open transactions
// ----------------------------------------------------------------------

async fn exec_insert_customer(conn: &mut PgConnection, customer: &Customer) -> Result<(), PortError> {
    sqlx::query(
        "INSERT INTO customers (id, name, phone, customer_type, pending_amount, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::from(customer.id))
    .bind(&customer.name)
    .bind(&customer.phone)
    .bind(customer_type_str(customer.customer_type))
    .bind(customer.pending_amount.amount())
    .bind(customer.created_at)
    .bind(customer.updated_at)
    .execute(conn)
    .await
    .map_err(db_err)?;
    Ok(())
}

async fn exec_update_customer(conn: &mut PgConnection, customer: &Customer) -> Result<(), PortError> {
    let result = sqlx::query(
        "UPDATE customers
         SET name = $2, phone = $3, customer_type = $4, pending_amount = $5, updated_at = $6
         WHERE id = $1",
    )
    .bind(Uuid::from(customer.id))
    .bind(&customer.name)
    .bind(&customer.phone)
    .bind(customer_type_str(customer.customer_type))
    .bind(customer.pending_amount.amount())
    .bind(customer.updated_at)
    .execute(conn)
    .await
    .map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(PortError::not_found("Customer", customer.id));
    }
    Ok(())
}

async fn exec_update_supplier(conn: &mut PgConnection, supplier: &Supplier) -> Result<(), PortError> {
    let result = sqlx::query(
        "UPDATE suppliers
         SET name = $2, phone = $3, debt = $4, updated_at = $5
         WHERE id = $1",
    )
    .bind(Uuid::from(supplier.id))
    .bind(&supplier.name)
    .bind(&supplier.phone)
    .bind(supplier.debt.amount())
    .bind(supplier.updated_at)
    .execute(conn)
    .await
    .map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(PortError::not_found("Supplier", supplier.id));
    }
    Ok(())
}

async fn exec_update_order_payment(conn: &mut PgConnection, order: &Order) -> Result<(), PortError> {
    let result = sqlx::query(
        "UPDATE orders
         SET paid_amount = $2, payment_status = $3, updated_at = $4
         WHERE id = $1",
    )
    .bind(Uuid::from(order.id))
    .bind(order.paid_amount.amount())
    .bind(payment_status_str(order.payment_status))
    .bind(order.updated_at)
    .execute(conn)
    .await
    .map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(PortError::not_found("Order", order.id));
    }
    Ok(())
}

async fn exec_insert_transaction(
    conn: &mut PgConnection,
    transaction: &Transaction,
) -> Result<(), PortError> {
    sqlx::query(
        "INSERT INTO transactions (id, entity_id, entity_type, txn_type, amount, description, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::from(transaction.id))
    .bind(transaction.entity_id)
    .bind(entity_type_str(transaction.entity_type))
    .bind(txn_type_str(transaction.txn_type))
    .bind(transaction.amount.amount())
    .bind(&transaction.description)
    .bind(transaction.created_at)
    .execute(conn)
    .await
    .map_err(db_err)?;
    Ok(())
}

async fn exec_insert_ledger_entry(
    conn: &mut PgConnection,
    entry: &LedgerEntry,
) -> Result<(), PortError> {
    sqlx::query(
        "INSERT INTO ledger_entries (id, customer_id, kind, amount, description, running_balance, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(Uuid::from(entry.id))
    .bind(Uuid::from(entry.customer_id))
    .bind(ledger_kind_str(entry.kind))
    .bind(entry.amount.amount())
    .bind(&entry.description)
    .bind(entry.running_balance.amount())
    .bind(entry.created_at)
    .execute(conn)
    .await
    .map_err(db_err)?;
    Ok(())
}

#[async_trait]
impl LedgerStore for PgStore {
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, phone, customer_type, pending_amount, created_at, updated_at
             FROM customers WHERE id = $1",
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or_else(|| PortError::not_found("Customer", id))?;

        Ok(row.into_domain()?)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, PortError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, phone, customer_type, pending_amount, created_at, updated_at
             FROM customers ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(PortError::from))
            .collect()
    }

    async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, PortError> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, phone, debt, created_at, updated_at
             FROM suppliers WHERE id = $1",
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or_else(|| PortError::not_found("Supplier", id))?;

        Ok(row.into_domain())
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, PortError> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, phone, debt, created_at, updated_at
             FROM suppliers ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(SupplierRow::into_domain).collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, PortError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, items, total_amount, paid_amount, payment_status, notes, created_at, updated_at
             FROM orders WHERE id = $1",
        )
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?
        .ok_or_else(|| PortError::not_found("Order", id))?;

        Ok(row.into_domain()?)
    }

    async fn orders_for_customer(&self, id: CustomerId) -> Result<Vec<Order>, PortError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, items, total_amount, paid_amount, payment_status, notes, created_at, updated_at
             FROM orders WHERE customer_id = $1 ORDER BY created_at, id",
        )
        .bind(Uuid::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(PortError::from))
            .collect()
    }

    async fn adjustments_for_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<DebtAdjustment>, PortError> {
        let rows = sqlx::query_as::<_, AdjustmentRow>(
            "SELECT id, customer_id, amount, reason, created_at
             FROM debt_adjustments WHERE customer_id = $1 ORDER BY created_at, id",
        )
        .bind(Uuid::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(AdjustmentRow::into_domain).collect())
    }

    async fn ledger_entries_for_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<LedgerEntry>, PortError> {
        let rows = sqlx::query_as::<_, LedgerEntryRow>(
            "SELECT id, customer_id, kind, amount, description, running_balance, created_at
             FROM ledger_entries WHERE customer_id = $1 ORDER BY created_at, id",
        )
        .bind(Uuid::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(PortError::from))
            .collect()
    }

    async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, PortError> {
        let mut query = QueryBuilder::new(
            "SELECT id, entity_id, entity_type, txn_type, amount, description, created_at
             FROM transactions WHERE 1 = 1",
        );
        if let Some(entity_id) = filter.entity_id {
            query.push(" AND entity_id = ").push_bind(entity_id);
        }
        if let Some(entity_type) = filter.entity_type {
            query
                .push(" AND entity_type = ")
                .push_bind(entity_type_str(entity_type));
        }
        query.push(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = query
            .build_query_as::<TransactionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(PortError::from))
            .collect()
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), PortError> {
        let mut conn = self.pool.acquire().await.map_err(db_err)?;
        exec_insert_customer(&mut conn, &customer).await
    }

    async fn insert_supplier(
        &self,
        supplier: Supplier,
        opening_transaction: Option<Transaction>,
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO suppliers (id, name, phone, debt, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::from(supplier.id))
        .bind(&supplier.name)
        .bind(&supplier.phone)
        .bind(supplier.debt.amount())
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        if let Some(transaction) = opening_transaction {
            exec_insert_transaction(&mut tx, &transaction).await?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn apply_order(
        &self,
        order: Order,
        customer: Customer,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO orders (id, customer_id, items, total_amount, paid_amount, payment_status, notes, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(Uuid::from(order.id))
        .bind(Uuid::from(order.customer_id))
        .bind(Json(&order.items))
        .bind(order.total_amount.amount())
        .bind(order.paid_amount.amount())
        .bind(payment_status_str(order.payment_status))
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        exec_update_customer(&mut tx, &customer).await?;

        if let Some(entry) = ledger_entry {
            exec_insert_ledger_entry(&mut tx, &entry).await?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn apply_customer_allocation(
        &self,
        allocation: &CustomerAllocation,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let result = sqlx::query(
            "UPDATE customers SET pending_amount = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(Uuid::from(allocation.customer_id))
        .bind(allocation.pending_amount.amount())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Customer", allocation.customer_id));
        }

        for order in &allocation.touched_orders {
            exec_update_order_payment(&mut tx, order).await?;
        }
        exec_insert_transaction(&mut tx, &allocation.transaction).await?;
        if let Some(entry) = ledger_entry {
            exec_insert_ledger_entry(&mut tx, &entry).await?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn apply_supplier_allocation(
        &self,
        allocation: &SupplierAllocation,
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let result = sqlx::query("UPDATE suppliers SET debt = $2, updated_at = $3 WHERE id = $1")
            .bind(Uuid::from(allocation.supplier_id))
            .bind(allocation.debt.amount())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(PortError::not_found("Supplier", allocation.supplier_id));
        }

        exec_insert_transaction(&mut tx, &allocation.transaction).await?;

        tx.commit().await.map_err(db_err)
    }

    async fn apply_purchase(
        &self,
        supplier: Supplier,
        transaction: Transaction,
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        exec_update_supplier(&mut tx, &supplier).await?;
        exec_insert_transaction(&mut tx, &transaction).await?;

        tx.commit().await.map_err(db_err)
    }

    async fn apply_adjustment(
        &self,
        adjustment: DebtAdjustment,
        customer: Customer,
        transaction: Transaction,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO debt_adjustments (id, customer_id, amount, reason, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::from(adjustment.id))
        .bind(Uuid::from(adjustment.customer_id))
        .bind(adjustment.amount.amount())
        .bind(&adjustment.reason)
        .bind(adjustment.created_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        exec_update_customer(&mut tx, &customer).await?;
        exec_insert_transaction(&mut tx, &transaction).await?;
        if let Some(entry) = ledger_entry {
            exec_insert_ledger_entry(&mut tx, &entry).await?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<(), PortError> {
        let mut conn = self.pool.acquire().await.map_err(db_err)?;
        exec_insert_transaction(&mut conn, &transaction).await
    }

    async fn save_customer(&self, customer: Customer) -> Result<(), PortError> {
        let mut conn = self.pool.acquire().await.map_err(db_err)?;
        exec_update_customer(&mut conn, &customer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_columns_round_trip() {
        for t in [CustomerType::Retail, CustomerType::Hotel] {
            assert_eq!(parse_customer_type(customer_type_str(t)).unwrap(), t);
        }
        for s in [
            PaymentStatus::Pending,
            PaymentStatus::PartiallyPaid,
            PaymentStatus::Paid,
        ] {
            assert_eq!(parse_payment_status(payment_status_str(s)).unwrap(), s);
        }
        for t in [
            TransactionType::CustomerPayment,
            TransactionType::SupplierPayment,
            TransactionType::Purchase,
            TransactionType::Expense,
            TransactionType::InitialDebt,
            TransactionType::StockAdjustment,
        ] {
            assert_eq!(parse_txn_type(txn_type_str(t)).unwrap(), t);
        }
        for k in [
            LedgerEntryKind::Order,
            LedgerEntryKind::Payment,
            LedgerEntryKind::Adjustment,
        ] {
            assert_eq!(parse_ledger_kind(ledger_kind_str(k)).unwrap(), k);
        }
    }

    #[test]
    fn test_unknown_enum_text_is_corrupt_row() {
        assert!(parse_customer_type("wholesale").is_err());
        assert!(parse_txn_type("refund").is_err());
    }
}
