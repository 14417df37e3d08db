//! In-memory store adapter
//!
//! Backs the API test suite and local development. A single `RwLock` over
//! the whole state makes every `apply_*` call trivially atomic: the write
//! guard is held for the duration of the multi-collection update.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{CustomerId, DomainPort, OrderId, PortError, SupplierId};
use domain_ledger::{
    Customer, CustomerAllocation, DebtAdjustment, LedgerEntry, LedgerStore, Order, Supplier,
    SupplierAllocation, Transaction, TransactionFilter,
};

#[derive(Default)]
struct State {
    customers: HashMap<CustomerId, Customer>,
    suppliers: HashMap<SupplierId, Supplier>,
    orders: HashMap<OrderId, Order>,
    transactions: Vec<Transaction>,
    adjustments: HashMap<CustomerId, Vec<DebtAdjustment>>,
    ledger: HashMap<CustomerId, Vec<LedgerEntry>>,
}

/// In-memory implementation of [`LedgerStore`]
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for MemoryStore {}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
        let state = self.state.read().await;
        state
            .customers
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Customer", id))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, PortError> {
        let state = self.state.read().await;
        let mut customers: Vec<Customer> = state.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(customers)
    }

    async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, PortError> {
        let state = self.state.read().await;
        state
            .suppliers
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Supplier", id))
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, PortError> {
        let state = self.state.read().await;
        let mut suppliers: Vec<Supplier> = state.suppliers.values().cloned().collect();
        suppliers.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(suppliers)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, PortError> {
        let state = self.state.read().await;
        state
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Order", id))
    }

    async fn orders_for_customer(&self, id: CustomerId) -> Result<Vec<Order>, PortError> {
        let state = self.state.read().await;
        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|o| o.customer_id == id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    async fn adjustments_for_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<DebtAdjustment>, PortError> {
        let state = self.state.read().await;
        Ok(state.adjustments.get(&id).cloned().unwrap_or_default())
    }

    async fn ledger_entries_for_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<LedgerEntry>, PortError> {
        let state = self.state.read().await;
        Ok(state.ledger.get(&id).cloned().unwrap_or_default())
    }

    async fn list_transactions(
        &self,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, PortError> {
        let state = self.state.read().await;
        let mut transactions: Vec<Transaction> = state
            .transactions
            .iter()
            .filter(|t| filter.entity_id.map_or(true, |id| t.entity_id == id))
            .filter(|t| filter.entity_type.map_or(true, |et| t.entity_type == et))
            .cloned()
            .collect();
        // Newest first
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = filter.limit {
            transactions.truncate(limit as usize);
        }
        Ok(transactions)
    }

    async fn insert_customer(&self, customer: Customer) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if state.customers.contains_key(&customer.id) {
            return Err(PortError::conflict(format!(
                "customer {} already exists",
                customer.id
            )));
        }
        state.customers.insert(customer.id, customer);
        Ok(())
    }

    async fn insert_supplier(
        &self,
        supplier: Supplier,
        opening_transaction: Option<Transaction>,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if state.suppliers.contains_key(&supplier.id) {
            return Err(PortError::conflict(format!(
                "supplier {} already exists",
                supplier.id
            )));
        }
        state.suppliers.insert(supplier.id, supplier);
        if let Some(txn) = opening_transaction {
            state.transactions.push(txn);
        }
        Ok(())
    }

    async fn apply_order(
        &self,
        order: Order,
        customer: Customer,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if !state.customers.contains_key(&customer.id) {
            return Err(PortError::not_found("Customer", customer.id));
        }
        state.orders.insert(order.id, order);
        if let Some(entry) = ledger_entry {
            state.ledger.entry(customer.id).or_default().push(entry);
        }
        state.customers.insert(customer.id, customer);
        Ok(())
    }

    async fn apply_customer_allocation(
        &self,
        allocation: &CustomerAllocation,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let customer = state
            .customers
            .get_mut(&allocation.customer_id)
            .ok_or_else(|| PortError::not_found("Customer", allocation.customer_id))?;
        customer.set_pending(allocation.pending_amount);

        for order in &allocation.touched_orders {
            state.orders.insert(order.id, order.clone());
        }
        state.transactions.push(allocation.transaction.clone());
        if let Some(entry) = ledger_entry {
            state
                .ledger
                .entry(allocation.customer_id)
                .or_default()
                .push(entry);
        }
        Ok(())
    }

    async fn apply_supplier_allocation(
        &self,
        allocation: &SupplierAllocation,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let supplier = state
            .suppliers
            .get_mut(&allocation.supplier_id)
            .ok_or_else(|| PortError::not_found("Supplier", allocation.supplier_id))?;
        supplier.debt = allocation.debt;
        supplier.updated_at = chrono::Utc::now();
        state.transactions.push(allocation.transaction.clone());
        Ok(())
    }

    async fn apply_purchase(
        &self,
        supplier: Supplier,
        transaction: Transaction,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if !state.suppliers.contains_key(&supplier.id) {
            return Err(PortError::not_found("Supplier", supplier.id));
        }
        state.suppliers.insert(supplier.id, supplier);
        state.transactions.push(transaction);
        Ok(())
    }

    async fn apply_adjustment(
        &self,
        adjustment: DebtAdjustment,
        customer: Customer,
        transaction: Transaction,
        ledger_entry: Option<LedgerEntry>,
    ) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if !state.customers.contains_key(&customer.id) {
            return Err(PortError::not_found("Customer", customer.id));
        }
        state
            .adjustments
            .entry(customer.id)
            .or_default()
            .push(adjustment);
        state.transactions.push(transaction);
        if let Some(entry) = ledger_entry {
            state.ledger.entry(customer.id).or_default().push(entry);
        }
        state.customers.insert(customer.id, customer);
        Ok(())
    }

    async fn insert_transaction(&self, transaction: Transaction) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        state.transactions.push(transaction);
        Ok(())
    }

    async fn save_customer(&self, customer: Customer) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        if !state.customers.contains_key(&customer.id) {
            return Err(PortError::not_found("Customer", customer.id));
        }
        state.customers.insert(customer.id, customer);
        Ok(())
    }
}
