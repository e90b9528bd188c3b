//! Shared test utilities for `FinBuddy`.
//!
//! In-memory fakes for the gateway, suggestion, and settings ports, plus
//! helper constructors for test entities with sensible defaults.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use crate::errors::{Error, Result};
use crate::gateway::{EntityGateway, SettingsStore, SuggestionClient};
use crate::models::{
    Category, CategorySuggestion, Loan, LoanInput, Transaction, TransactionInput,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Fixed date used for test entities.
pub fn test_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
}

/// Creates a test category without a description.
pub fn test_category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: None,
    }
}

/// Creates a test transaction without a resolved category.
pub fn test_transaction(
    id: i64,
    amount: f64,
    description: &str,
    category_id: Option<i64>,
) -> Transaction {
    Transaction {
        id,
        amount,
        description: description.to_string(),
        category_id,
        category: None,
        date: test_date(),
    }
}

/// Creates a test transaction carrying the resolved category object, as
/// the gateway returns it.
pub fn transaction_in_category(id: i64, amount: f64, category: Option<&Category>) -> Transaction {
    Transaction {
        id,
        amount,
        description: "Test transaction".to_string(),
        category_id: category.map(|c| c.id),
        category: category.cloned(),
        date: test_date(),
    }
}

/// Creates a test loan with an open end date.
pub fn test_loan(id: i64, name: &str, amount: f64) -> Loan {
    Loan {
        id,
        name: name.to_string(),
        amount,
        start_date: test_date(),
        end_date: None,
        description: None,
    }
}

/// Shorthand for a category suggestion.
pub fn suggestion(category_id: i64, category_name: &str) -> CategorySuggestion {
    CategorySuggestion {
        category_id,
        category_name: category_name.to_string(),
    }
}

/// In-memory entity gateway. Behaves like the remote store: creates
/// assign fresh ids and resolve the nested category from the seeded
/// category list. Reads and writes can be made to fail independently.
#[derive(Default)]
pub struct MemoryGateway {
    transactions: Mutex<Vec<Transaction>>,
    categories: Mutex<Vec<Category>>,
    loans: Mutex<Vec<Loan>>,
    next_id: AtomicI64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_calls: AtomicUsize,
}

impl MemoryGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Self::default()
        }
    }

    /// Seeds a category.
    pub fn seed_category(&self, category: Category) {
        self.categories.lock().unwrap().push(category);
    }

    /// Seeds a transaction, resolving its category from the seeded list.
    pub fn seed_transaction(&self, mut transaction: Transaction) {
        transaction.category = self.resolve_category(transaction.category_id);
        self.transactions.lock().unwrap().push(transaction);
    }

    /// Seeds a loan.
    pub fn seed_loan(&self, loan: Loan) {
        self.loans.lock().unwrap().push(loan);
    }

    /// Drops all transactions.
    pub fn clear_transactions(&self) {
        self.transactions.lock().unwrap().clear();
    }

    /// Drops all loans.
    pub fn clear_loans(&self) {
        self.loans.lock().unwrap().clear();
    }

    /// Makes list calls fail.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes create/update/delete calls fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of attempted mutations, including failed ones.
    pub fn write_call_count(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn resolve_category(&self, category_id: Option<i64>) -> Option<Category> {
        let categories = self.categories.lock().unwrap();
        category_id.and_then(|id| categories.iter().find(|c| c.id == id).cloned())
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Gateway("remote unavailable".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Gateway("remote unavailable".to_string()));
        }
        Ok(())
    }

    fn fresh_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityGateway for MemoryGateway {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.check_read()?;
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.check_read()?;
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        self.check_read()?;
        Ok(self.loans.lock().unwrap().clone())
    }

    async fn create_transaction(&self, input: &TransactionInput) -> Result<Transaction> {
        self.check_write()?;
        let transaction = Transaction {
            id: self.fresh_id(),
            amount: input.amount,
            description: input.description.clone(),
            category_id: input.category_id,
            category: self.resolve_category(input.category_id),
            date: input.date,
        };
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    async fn update_transaction(&self, id: i64, input: &TransactionInput) -> Result<Transaction> {
        self.check_write()?;
        let category = self.resolve_category(input.category_id);
        let mut transactions = self.transactions.lock().unwrap();
        let transaction = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::Gateway("Transaction not found".to_string()))?;
        transaction.amount = input.amount;
        transaction.description = input.description.clone();
        transaction.category_id = input.category_id;
        transaction.category = category;
        transaction.date = input.date;
        Ok(transaction.clone())
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.check_write()?;
        self.transactions.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn create_loan(&self, input: &LoanInput) -> Result<Loan> {
        self.check_write()?;
        let loan = Loan {
            id: self.fresh_id(),
            name: input.name.clone(),
            amount: input.amount,
            start_date: input.start_date,
            end_date: input.end_date,
            description: input.description.clone(),
        };
        self.loans.lock().unwrap().push(loan.clone());
        Ok(loan)
    }

    async fn update_loan(&self, id: i64, input: &LoanInput) -> Result<Loan> {
        self.check_write()?;
        let mut loans = self.loans.lock().unwrap();
        let loan = loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| Error::Gateway("Loan not found".to_string()))?;
        loan.name = input.name.clone();
        loan.amount = input.amount;
        loan.start_date = input.start_date;
        loan.end_date = input.end_date;
        loan.description = input.description.clone();
        Ok(loan.clone())
    }

    async fn delete_loan(&self, id: i64) -> Result<()> {
        self.check_write()?;
        self.loans.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }
}

/// Scripted suggestion client. Optionally gated on a [`Semaphore`] so
/// tests can hold lookups in flight and release them at a chosen point
/// (`add_permits` releases one lookup per permit).
#[derive(Default)]
pub struct ScriptedSuggestions {
    by_description: Mutex<HashMap<String, CategorySuggestion>>,
    gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl ScriptedSuggestions {
    /// Creates a client that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client whose every lookup waits for one permit on `gate`.
    pub fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Scripts a suggestion for an exact description.
    pub fn script(&self, description: &str, suggested: CategorySuggestion) {
        self.by_description
            .lock()
            .unwrap()
            .insert(description.to_string(), suggested);
    }

    /// Number of lookups issued.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SuggestionClient for ScriptedSuggestions {
    async fn suggest(&self, description: &str) -> Result<Option<CategorySuggestion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        Ok(self.by_description.lock().unwrap().get(description).cloned())
    }
}

/// In-memory settings store with a failure switch.
#[derive(Default)]
pub struct MemorySettingsStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent writes fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SettingsStore for MemorySettingsStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Config("settings storage unavailable".to_string()));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
