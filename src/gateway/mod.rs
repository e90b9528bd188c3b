//! Ports to the external collaborators: the remote entity gateway, the
//! category suggestion lookup, and the key-value settings storage.
//!
//! The core depends only on these traits, so storage and transport can be
//! swapped without touching the aggregation engine or the edit sessions.
//! The in-memory fakes used by the tests live in `crate::test_utils`.

/// HTTP adapter for the entity gateway and suggestion lookup
pub mod http;
/// TOML-file adapter for the settings store
pub mod settings_file;

pub use http::HttpGateway;
pub use settings_file::FileSettingsStore;

use crate::errors::Result;
use crate::models::{
    Category, CategorySuggestion, Loan, LoanInput, Transaction, TransactionInput,
};
use async_trait::async_trait;

/// Remote store of transactions, categories, and loans. All calls resolve
/// to either a success payload or a failure; there are no partial or batch
/// semantics.
#[async_trait]
pub trait EntityGateway: Send + Sync {
    /// Lists all transactions for the current user.
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;
    /// Lists all categories.
    async fn list_categories(&self) -> Result<Vec<Category>>;
    /// Lists all loans for the current user.
    async fn list_loans(&self) -> Result<Vec<Loan>>;

    /// Creates a transaction, returning the stored entity.
    async fn create_transaction(&self, input: &TransactionInput) -> Result<Transaction>;
    /// Updates an existing transaction, returning the stored entity.
    async fn update_transaction(&self, id: i64, input: &TransactionInput) -> Result<Transaction>;
    /// Deletes a transaction.
    async fn delete_transaction(&self, id: i64) -> Result<()>;

    /// Creates a loan, returning the stored entity.
    async fn create_loan(&self, input: &LoanInput) -> Result<Loan>;
    /// Updates an existing loan, returning the stored entity.
    async fn update_loan(&self, id: i64, input: &LoanInput) -> Result<Loan>;
    /// Deletes a loan.
    async fn delete_loan(&self, id: i64) -> Result<()>;
}

/// Text-to-category lookup. Only consulted for descriptions longer than
/// two characters; `None` means the service has no suggestion.
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    /// Suggests a category for a transaction description.
    async fn suggest(&self, description: &str) -> Result<Option<CategorySuggestion>>;
}

/// Key-value persistence for the manual income figures. Modeled after
/// browser local storage: plain strings under well-known keys.
pub trait SettingsStore: Send + Sync {
    /// Reads a stored value, `None` when the key has never been written.
    fn read(&self, key: &str) -> Option<String>;
    /// Writes a value. Callers treat failures as non-fatal.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
