//! Application service for payment and ledger operations
//!
//! `PaymentService` brackets every mutation with a per-entity lock so that
//! two concurrent payments against the same customer cannot both read the
//! same stale order set (the classic read-modify-write race). Entities are
//! independent: allocations against different customers or suppliers run in
//! parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use core_kernel::{CustomerId, Money, OrderId, SupplierId};

use crate::adjustment::{DebtAdjustment, LedgerEntry, LedgerEntryKind};
use crate::allocation::{
    allocate_customer_payment, allocate_supplier_payment, AllocatorConfig, CustomerAllocation,
    SupplierAllocation,
};
use crate::customer::{Customer, CustomerType};
use crate::error::LedgerError;
use crate::integrity::{check_customer, repair_customer, IntegrityReport};
use crate::order::{Order, OrderItem};
use crate::ports::{LedgerStore, TransactionFilter};
use crate::supplier::Supplier;
use crate::transaction::Transaction;

/// Registry of per-entity async mutexes
///
/// Guarantees at-most-one in-flight mutation per entity id. The registry
/// itself is guarded by a short-lived std mutex; the per-entity locks are
/// tokio mutexes held across store await points.
///
/// Entries are never evicted: the map grows with the set of distinct
/// entity ids ever locked, one `Arc<Mutex<()>>` per id.
#[derive(Default)]
pub struct EntityLocks {
    inner: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for an entity, creating it on first use
    pub fn lock_for(&self, entity_id: Uuid) -> Arc<AsyncMutex<()>> {
        let mut map = self.inner.lock().expect("entity lock registry poisoned");
        map.entry(entity_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

/// Orchestrates allocation, adjustments, and integrity repair over a store
pub struct PaymentService {
    store: Arc<dyn LedgerStore>,
    config: AllocatorConfig,
    locks: EntityLocks,
}

impl PaymentService {
    pub fn new(store: Arc<dyn LedgerStore>, config: AllocatorConfig) -> Self {
        Self {
            store,
            config,
            locks: EntityLocks::new(),
        }
    }

    // ------------------------------------------------------------------
    // Entity creation
    // ------------------------------------------------------------------

    pub async fn create_customer(
        &self,
        name: String,
        phone: Option<String>,
        customer_type: CustomerType,
    ) -> Result<Customer, LedgerError> {
        let mut customer = Customer::new(name, customer_type);
        if let Some(phone) = phone {
            customer = customer.with_phone(phone);
        }
        self.store.insert_customer(customer.clone()).await?;
        tracing::info!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    /// Creates a supplier; a positive opening debt is booked as an
    /// `initial_debt` transaction
    pub async fn create_supplier(
        &self,
        name: String,
        phone: Option<String>,
        opening_debt: Decimal,
    ) -> Result<Supplier, LedgerError> {
        let opening_debt = Money::parse_exact(opening_debt)
            .map_err(|e| LedgerError::invalid_amount(e.to_string()))?;
        if opening_debt.is_negative() {
            return Err(LedgerError::invalid_amount(
                "opening debt cannot be negative",
            ));
        }

        let mut supplier = Supplier::new(name, opening_debt);
        if let Some(phone) = phone {
            supplier = supplier.with_phone(phone);
        }

        let opening_transaction = opening_debt
            .is_positive()
            .then(|| Transaction::initial_debt(supplier.id, opening_debt));

        self.store
            .insert_supplier(supplier.clone(), opening_transaction)
            .await?;
        tracing::info!(supplier_id = %supplier.id, debt = %supplier.debt, "Created supplier");
        Ok(supplier)
    }

    /// Creates an order and recomputes the customer aggregate under the
    /// customer's lock; hotel orders are mirrored into the ledger
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        items: Vec<OrderItem>,
        notes: Option<String>,
    ) -> Result<Order, LedgerError> {
        if items.is_empty() {
            return Err(LedgerError::invalid_amount("order has no items"));
        }
        // A non-positive line would net against the customer's real debt
        // during allocation while never receiving a payment itself
        for item in &items {
            if item.quantity <= Decimal::ZERO {
                return Err(LedgerError::invalid_amount(format!(
                    "item quantity must be positive, got {}",
                    item.quantity
                )));
            }
            if !item.rate.is_positive() {
                return Err(LedgerError::invalid_amount(format!(
                    "item rate must be positive, got {}",
                    item.rate
                )));
            }
        }

        let entity_lock = self.locks.lock_for(customer_id.into());
        let _guard = entity_lock.lock().await;

        let mut customer = self.load_customer(customer_id).await?;
        let orders = self.store.orders_for_customer(customer_id).await?;
        let adjustments = self.store.adjustments_for_customer(customer_id).await?;

        let mut order = Order::new(customer_id, items);
        if let Some(notes) = notes {
            order = order.with_notes(notes);
        }

        let order_balance: Money =
            orders.iter().map(Order::outstanding).sum::<Money>() + order.outstanding();
        let adjustment_total: Money = adjustments.iter().map(|a| a.amount).sum();
        customer.set_pending(order_balance + adjustment_total);

        let ledger_entry = if customer.is_hotel() {
            let balance = self.current_ledger_balance(customer_id).await?;
            Some(LedgerEntry::next(
                balance,
                customer_id,
                LedgerEntryKind::Order,
                order.total_amount,
                format!("Order {} for {}", order.id, order.total_amount),
            ))
        } else {
            None
        };

        self.store
            .apply_order(order.clone(), customer, ledger_entry)
            .await?;
        tracing::info!(order_id = %order.id, customer_id = %customer_id, total = %order.total_amount, "Created order");
        Ok(order)
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Applies a customer payment FIFO across outstanding orders
    pub async fn record_customer_payment(
        &self,
        customer_id: CustomerId,
        amount: Decimal,
    ) -> Result<CustomerAllocation, LedgerError> {
        let entity_lock = self.locks.lock_for(customer_id.into());
        let _guard = entity_lock.lock().await;

        let customer = self.load_customer(customer_id).await?;
        let orders = self.store.orders_for_customer(customer_id).await?;
        let adjustments = self.store.adjustments_for_customer(customer_id).await?;

        let allocation =
            allocate_customer_payment(&self.config, &customer, &orders, &adjustments, amount)?;

        let ledger_entry = if customer.is_hotel() {
            let balance = self.current_ledger_balance(customer_id).await?;
            Some(LedgerEntry::next(
                balance,
                customer_id,
                LedgerEntryKind::Payment,
                -allocation.applied,
                format!("Payment of {}", allocation.applied),
            ))
        } else {
            None
        };

        self.store
            .apply_customer_allocation(&allocation, ledger_entry)
            .await?;

        tracing::info!(
            customer_id = %customer_id,
            applied = %allocation.applied,
            pending = %allocation.pending_amount,
            "Recorded customer payment"
        );
        Ok(allocation)
    }

    /// Settles supplier debt by a flat amount
    pub async fn record_supplier_payment(
        &self,
        supplier_id: SupplierId,
        amount: Decimal,
    ) -> Result<SupplierAllocation, LedgerError> {
        let entity_lock = self.locks.lock_for(supplier_id.into());
        let _guard = entity_lock.lock().await;

        let supplier = self.load_supplier(supplier_id).await?;
        let allocation = allocate_supplier_payment(&self.config, &supplier, amount)?;
        self.store.apply_supplier_allocation(&allocation).await?;

        tracing::info!(
            supplier_id = %supplier_id,
            applied = %allocation.applied,
            debt = %allocation.debt,
            "Recorded supplier payment"
        );
        Ok(allocation)
    }

    /// Books a stock purchase on supplier credit
    pub async fn record_purchase(
        &self,
        supplier_id: SupplierId,
        amount: Decimal,
        description: String,
    ) -> Result<Transaction, LedgerError> {
        let amount = self.parse_positive(amount)?;

        let entity_lock = self.locks.lock_for(supplier_id.into());
        let _guard = entity_lock.lock().await;

        let mut supplier = self.load_supplier(supplier_id).await?;
        supplier.increase_debt(amount);
        let transaction = Transaction::purchase(supplier_id, amount, description);

        self.store
            .apply_purchase(supplier, transaction.clone())
            .await?;
        tracing::info!(supplier_id = %supplier_id, amount = %amount, "Recorded purchase");
        Ok(transaction)
    }

    /// Records a standalone shop expense
    pub async fn record_expense(
        &self,
        supplier_id: SupplierId,
        amount: Decimal,
        description: String,
    ) -> Result<Transaction, LedgerError> {
        let amount = self.parse_positive(amount)?;

        // Expenses do not touch the debt; existence check only
        self.load_supplier(supplier_id).await?;

        let transaction = Transaction::expense(supplier_id, amount, description);
        self.store.insert_transaction(transaction.clone()).await?;
        Ok(transaction)
    }

    /// Applies a signed manual correction to a customer's running account
    pub async fn record_adjustment(
        &self,
        customer_id: CustomerId,
        amount: Decimal,
        reason: String,
    ) -> Result<DebtAdjustment, LedgerError> {
        let amount = Money::parse_exact(amount)
            .map_err(|e| LedgerError::invalid_amount(e.to_string()))?;
        if amount.is_zero() {
            return Err(LedgerError::invalid_amount("adjustment amount cannot be zero"));
        }
        if amount.abs() > self.config.max_payment {
            return Err(LedgerError::invalid_amount(format!(
                "adjustment amount {amount} exceeds the maximum of {}",
                self.config.max_payment
            )));
        }

        let entity_lock = self.locks.lock_for(customer_id.into());
        let _guard = entity_lock.lock().await;

        let mut customer = self.load_customer(customer_id).await?;
        let orders = self.store.orders_for_customer(customer_id).await?;
        let adjustments = self.store.adjustments_for_customer(customer_id).await?;

        let adjustment = DebtAdjustment::new(customer_id, amount, reason.clone());

        let order_balance: Money = orders.iter().map(Order::outstanding).sum();
        let adjustment_total: Money =
            adjustments.iter().map(|a| a.amount).sum::<Money>() + amount;
        customer.set_pending(order_balance + adjustment_total);

        let transaction = Transaction::adjustment(customer_id, amount, reason.clone());
        let ledger_entry = if customer.is_hotel() {
            let balance = self.current_ledger_balance(customer_id).await?;
            Some(LedgerEntry::next(
                balance,
                customer_id,
                LedgerEntryKind::Adjustment,
                amount,
                reason,
            ))
        } else {
            None
        };

        self.store
            .apply_adjustment(adjustment.clone(), customer, transaction, ledger_entry)
            .await?;
        tracing::info!(customer_id = %customer_id, amount = %amount, "Recorded adjustment");
        Ok(adjustment)
    }

    // ------------------------------------------------------------------
    // Integrity
    // ------------------------------------------------------------------

    /// Recomputes the customer aggregate and optionally repairs the cache.
    /// Runs under the customer's lock so the snapshot is consistent.
    pub async fn check_customer_integrity(
        &self,
        customer_id: CustomerId,
        repair: bool,
    ) -> Result<IntegrityReport, LedgerError> {
        let entity_lock = self.locks.lock_for(customer_id.into());
        let _guard = entity_lock.lock().await;

        let mut customer = self.load_customer(customer_id).await?;
        let orders = self.store.orders_for_customer(customer_id).await?;
        let adjustments = self.store.adjustments_for_customer(customer_id).await?;
        let entries = if customer.is_hotel() {
            Some(self.store.ledger_entries_for_customer(customer_id).await?)
        } else {
            None
        };

        let report = if repair {
            let report =
                repair_customer(&mut customer, &orders, &adjustments, entries.as_deref());
            if !report.repairs.is_empty() {
                self.store.save_customer(customer).await?;
            }
            report
        } else {
            check_customer(&customer, &orders, &adjustments, entries.as_deref())
        };

        Ok(report)
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub async fn customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.load_customer(id).await
    }

    pub async fn customers(&self) -> Result<Vec<Customer>, LedgerError> {
        Ok(self.store.list_customers().await?)
    }

    pub async fn supplier(&self, id: SupplierId) -> Result<Supplier, LedgerError> {
        self.load_supplier(id).await
    }

    pub async fn suppliers(&self) -> Result<Vec<Supplier>, LedgerError> {
        Ok(self.store.list_suppliers().await?)
    }

    pub async fn order(&self, id: OrderId) -> Result<Order, LedgerError> {
        self.store
            .get_order(id)
            .await
            .map_err(|e| LedgerError::from_lookup("Order", id, e))
    }

    pub async fn orders_for_customer(&self, id: CustomerId) -> Result<Vec<Order>, LedgerError> {
        self.load_customer(id).await?;
        Ok(self.store.orders_for_customer(id).await?)
    }

    pub async fn ledger_for_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<LedgerEntry>, LedgerError> {
        self.load_customer(id).await?;
        Ok(self.store.ledger_entries_for_customer(id).await?)
    }

    pub async fn transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.store.list_transactions(filter).await?)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    async fn load_customer(&self, id: CustomerId) -> Result<Customer, LedgerError> {
        self.store
            .get_customer(id)
            .await
            .map_err(|e| LedgerError::from_lookup("Customer", id, e))
    }

    async fn load_supplier(&self, id: SupplierId) -> Result<Supplier, LedgerError> {
        self.store
            .get_supplier(id)
            .await
            .map_err(|e| LedgerError::from_lookup("Supplier", id, e))
    }

    async fn current_ledger_balance(&self, id: CustomerId) -> Result<Money, LedgerError> {
        let entries = self.store.ledger_entries_for_customer(id).await?;
        Ok(entries
            .last()
            .map(|e| e.running_balance)
            .unwrap_or_else(Money::zero))
    }

    fn parse_positive(&self, amount: Decimal) -> Result<Money, LedgerError> {
        let amount = Money::parse_exact(amount)
            .map_err(|e| LedgerError::invalid_amount(e.to_string()))?;
        if !amount.is_positive() {
            return Err(LedgerError::invalid_amount(format!(
                "amount must be positive, got {amount}"
            )));
        }
        if amount > self.config.max_payment {
            return Err(LedgerError::invalid_amount(format!(
                "amount {amount} exceeds the maximum of {}",
                self.config.max_payment
            )));
        }
        Ok(amount)
    }
}
