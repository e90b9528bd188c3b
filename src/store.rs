//! In-memory entity snapshot.
//!
//! The store is the authoritative client-side view of the user's
//! transactions, categories, and loans. It is never mutated locally:
//! every change goes through the gateway and the affected collection is
//! then re-fetched wholesale, so the snapshot only ever reflects
//! confirmed remote state.

use crate::errors::Result;
use crate::gateway::EntityGateway;
use crate::models::{Category, Loan, Transaction};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Snapshot of all entities for the current user session.
#[derive(Debug, Default)]
pub struct EntityStore {
    /// Transactions, in gateway order (newest first)
    pub transactions: Vec<Transaction>,
    /// Categories, fetched once per session start
    pub categories: Vec<Category>,
    /// Loans, in gateway order
    pub loans: Vec<Loan>,
}

/// Shared handle to the entity store.
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Creates an empty shared store.
#[must_use]
pub fn new_shared_store() -> SharedStore {
    Arc::new(RwLock::new(EntityStore::default()))
}

/// Refreshes every collection from the gateway. Used at session start;
/// this is the only place categories are fetched.
pub async fn refresh_all(gateway: &dyn EntityGateway, store: &SharedStore) -> Result<()> {
    let transactions = gateway.list_transactions().await?;
    let categories = gateway.list_categories().await?;
    let loans = gateway.list_loans().await?;
    let mut writer = store.write().await;
    writer.transactions = transactions;
    writer.categories = categories;
    writer.loans = loans;
    info!(
        "Entity store refreshed: {} transactions, {} categories, {} loans.",
        writer.transactions.len(),
        writer.categories.len(),
        writer.loans.len()
    );
    Ok(())
}

/// Re-fetches transactions after a transaction mutation.
pub async fn refresh_transactions(gateway: &dyn EntityGateway, store: &SharedStore) -> Result<()> {
    let transactions = gateway.list_transactions().await?;
    let mut writer = store.write().await;
    writer.transactions = transactions;
    info!(
        "Transactions refreshed with {} items.",
        writer.transactions.len()
    );
    Ok(())
}

/// Re-fetches loans after a loan mutation.
pub async fn refresh_loans(gateway: &dyn EntityGateway, store: &SharedStore) -> Result<()> {
    let loans = gateway.list_loans().await?;
    let mut writer = store.write().await;
    writer.loans = loans;
    info!("Loans refreshed with {} items.", writer.loans.len());
    Ok(())
}
