//! Domain entities mirrored from the remote gateway, plus the payload
//! types sent back to it on create/update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A spending/income category. Fetched once per session start and treated
/// as immutable by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Gateway-assigned identifier
    pub id: i64,
    /// Display name; also drives the income classification policy
    pub name: String,
    /// Optional free-text description (present on the wire, unused here)
    #[serde(default)]
    pub description: Option<String>,
}

/// A single recorded transaction. The gateway returns the nested category
/// object alongside the raw `category_id`, and the aggregation engine
/// reads the nested form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Gateway-assigned identifier
    pub id: i64,
    /// Transaction amount (non-negative by convention; not enforced)
    pub amount: f64,
    /// Free-text description; drives category suggestions
    pub description: String,
    /// Referenced category id, if any
    #[serde(default)]
    pub category_id: Option<i64>,
    /// The referenced category, resolved by the gateway
    #[serde(default)]
    pub category: Option<Category>,
    /// When the transaction occurred
    pub date: DateTime<Utc>,
}

/// A recurring loan payment. The amount is a fixed monthly installment
/// (EMI) and always counts as an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Gateway-assigned identifier
    pub id: i64,
    /// Display name of the loan
    pub name: String,
    /// Fixed monthly installment
    pub amount: f64,
    /// First installment date
    pub start_date: DateTime<Utc>,
    /// Optional final installment date
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating or updating a transaction. Create and update share
/// the same shape on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionInput {
    /// Transaction amount
    pub amount: f64,
    /// Free-text description
    pub description: String,
    /// Referenced category id, if any
    pub category_id: Option<i64>,
    /// When the transaction occurred
    pub date: DateTime<Utc>,
}

/// Payload for creating or updating a loan.
#[derive(Debug, Clone, Serialize)]
pub struct LoanInput {
    /// Display name of the loan
    pub name: String,
    /// Fixed monthly installment
    pub amount: f64,
    /// First installment date
    pub start_date: DateTime<Utc>,
    /// Optional final installment date
    pub end_date: Option<DateTime<Utc>>,
    /// Optional free-text description
    pub description: Option<String>,
}

/// A category suggested by the remote lookup for a transaction description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySuggestion {
    /// Suggested category id
    pub category_id: i64,
    /// Suggested category display name
    pub category_name: String,
}

/// The two manually entered income figures. Persisted across sessions via
/// the settings store; everything else about them is process-local.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IncomeSettings {
    /// Salary-like income entered by the user
    pub active_income: f64,
    /// Passive income entered by the user
    pub passive_income: f64,
}
