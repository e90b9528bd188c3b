//! Financial aggregation engine.
//!
//! Pure derivation of dashboard figures from the current entity snapshot
//! and the manual income settings. No side effects, no failure modes:
//! empty inputs yield all-zero metrics, and identical inputs always yield
//! identical output. Recomputed fresh on every read, never persisted.

use crate::models::{Category, IncomeSettings, Loan, Transaction};

/// Breakdown label for transactions without a category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";
/// Breakdown label for the synthetic loan installment entry.
pub const LOANS_EMI_LABEL: &str = "Loans/EMI";

/// Classification policy: a category counts as income when its name
/// contains the substring "income", case-insensitively. Evaluated on
/// every aggregation pass, never cached, so a rename takes effect
/// immediately.
#[must_use]
pub fn is_income_category(category: &Category) -> bool {
    category.name.to_lowercase().contains("income")
}

fn is_income_transaction(transaction: &Transaction) -> bool {
    // Uncategorized transactions are expenses.
    transaction.category.as_ref().is_some_and(is_income_category)
}

/// One slice of the expense-by-category breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    /// Category name, `"Uncategorized"`, or `"Loans/EMI"`
    pub label: String,
    /// Summed expense amount for this label
    pub amount: f64,
}

/// Aggregate financial figures derived from the entity snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedMetrics {
    /// Income contributed by transactions in income categories
    pub other_income: f64,
    /// Expenses contributed by non-income transactions
    pub expenses_from_transactions: f64,
    /// Sum of all loan installments
    pub total_emi: f64,
    /// `expenses_from_transactions + total_emi`
    pub total_expenses: f64,
    /// `active_income + passive_income + other_income`
    pub total_income: f64,
    /// `total_income - total_expenses`; may be negative
    pub net: f64,
    /// Share of income spent, clamped to 0..=100; 0 when income is 0
    pub spent_percent: f64,
    /// Expenses grouped by label, in first-seen order, with the loan
    /// entry appended last when present
    pub category_breakdown: Vec<BreakdownEntry>,
}

/// Computes all derived metrics from the given snapshot.
///
/// Every transaction contributes to exactly one of other income or
/// transaction expenses, based solely on its category's classification.
/// Breakdown labels keep the order in which they first appear in the
/// transaction list; that ordering is part of the contract.
#[must_use]
pub fn compute_metrics(
    transactions: &[Transaction],
    loans: &[Loan],
    settings: &IncomeSettings,
) -> DerivedMetrics {
    let mut other_income = 0.0;
    let mut expenses_from_transactions = 0.0;
    let mut category_breakdown: Vec<BreakdownEntry> = Vec::new();

    for transaction in transactions {
        if is_income_transaction(transaction) {
            other_income += transaction.amount;
            continue;
        }
        expenses_from_transactions += transaction.amount;
        let label = transaction
            .category
            .as_ref()
            .map_or(UNCATEGORIZED_LABEL, |c| c.name.as_str());
        match category_breakdown.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.amount += transaction.amount,
            None => category_breakdown.push(BreakdownEntry {
                label: label.to_string(),
                amount: transaction.amount,
            }),
        }
    }

    let total_emi: f64 = loans.iter().map(|loan| loan.amount).sum();
    if total_emi > 0.0 {
        category_breakdown.push(BreakdownEntry {
            label: LOANS_EMI_LABEL.to_string(),
            amount: total_emi,
        });
    }

    let total_expenses = expenses_from_transactions + total_emi;
    let total_income = settings.active_income + settings.passive_income + other_income;
    let net = total_income - total_expenses;
    let spent_percent = if total_income > 0.0 {
        (total_expenses / total_income * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    DerivedMetrics {
        other_income,
        expenses_from_transactions,
        total_emi,
        total_expenses,
        total_income,
        net,
        spent_percent,
        category_breakdown,
    }
}
