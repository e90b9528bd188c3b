//! Record edit session state machine.
//!
//! One session per record kind coordinates create-vs-update intent, the
//! form draft, and the asynchronous category suggestion lookup. The
//! machine is pure and synchronous; the async plumbing lives in
//! [`crate::core::service`].
//!
//! Staleness is a first-class mechanism here, not a timing accident: the
//! session carries a version counter that bumps on every transition that
//! invalidates in-flight lookups (open, cancel, finish, suggestion
//! cleared, new lookup issued). A lookup result is applied only when its
//! [`SuggestionTicket`] still matches the current version, so a slow reply
//! can never overwrite the draft of a session it was not requested for.

use crate::errors::{Error, Result};
use crate::models::{CategorySuggestion, Loan, LoanInput, Transaction, TransactionInput};
use chrono::{Local, NaiveDate, NaiveTime};

/// Whether the session will create a new record or update an existing one.
/// Keeping the mode separate from the draft lets both intents share one
/// validation and submit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Submit will create a new record
    Create,
    /// Submit will update the record with this id
    Update(i64),
}

/// Identity tag for one suggestion lookup. Obtained when the lookup is
/// issued and checked when its result arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket {
    version: u64,
}

/// What happened to a delivered suggestion result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// The session still matched the ticket; draft and suggestion updated
    Applied,
    /// The session moved on since the lookup was issued; result dropped
    Stale,
}

/// Session state: either nothing is being edited, or one draft is open.
#[derive(Debug)]
pub enum SessionState<D> {
    /// No record is being edited
    Idle,
    /// A draft is open for editing
    Composing {
        /// Create or update intent
        mode: Mode,
        /// Optimistic form state
        draft: D,
        /// The currently displayed category suggestion, if any
        suggestion: Option<CategorySuggestion>,
    },
}

/// Edit session for one record kind, generic over its draft type.
#[derive(Debug)]
pub struct EditSession<D> {
    state: SessionState<D>,
    version: u64,
}

impl<D> Default for EditSession<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> EditSession<D> {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            version: 0,
        }
    }

    /// Current state, for rendering.
    #[must_use]
    pub fn state(&self) -> &SessionState<D> {
        &self.state
    }

    /// True while a draft is open.
    #[must_use]
    pub fn is_composing(&self) -> bool {
        matches!(self.state, SessionState::Composing { .. })
    }

    /// The open session's intent, if any.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        match &self.state {
            SessionState::Composing { mode, .. } => Some(*mode),
            SessionState::Idle => None,
        }
    }

    /// The open draft, if any.
    #[must_use]
    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            SessionState::Composing { draft, .. } => Some(draft),
            SessionState::Idle => None,
        }
    }

    /// The currently displayed suggestion, if any.
    #[must_use]
    pub fn suggestion(&self) -> Option<&CategorySuggestion> {
        match &self.state {
            SessionState::Composing { suggestion, .. } => suggestion.as_ref(),
            SessionState::Idle => None,
        }
    }

    /// Opens a create session, replacing whatever was open before.
    pub fn open_create(&mut self, draft: D) {
        self.version += 1;
        self.state = SessionState::Composing {
            mode: Mode::Create,
            draft,
            suggestion: None,
        };
    }

    /// Opens an update session for the record with `target_id`.
    pub fn open_update(&mut self, target_id: i64, draft: D) {
        self.version += 1;
        self.state = SessionState::Composing {
            mode: Mode::Update(target_id),
            draft,
            suggestion: None,
        };
    }

    /// Discards the draft and returns to idle. In-flight lookups become
    /// stale; their results will be ignored on arrival.
    pub fn cancel(&mut self) {
        self.version += 1;
        self.state = SessionState::Idle;
    }

    /// Closes the session after a successful submit.
    pub fn finish(&mut self) {
        self.version += 1;
        self.state = SessionState::Idle;
    }

    /// Mutates the open draft. Returns `None` when the session is idle.
    pub fn update_draft<R>(&mut self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        match &mut self.state {
            SessionState::Composing { draft, .. } => Some(f(draft)),
            SessionState::Idle => None,
        }
    }

    /// Registers a new suggestion lookup, superseding any earlier one.
    /// Returns `None` when the session is idle.
    pub fn issue_ticket(&mut self) -> Option<SuggestionTicket> {
        if !self.is_composing() {
            return None;
        }
        self.version += 1;
        Some(SuggestionTicket {
            version: self.version,
        })
    }

    /// Drops the displayed suggestion and invalidates pending lookups.
    pub fn clear_suggestion(&mut self) {
        self.version += 1;
        if let SessionState::Composing { suggestion, .. } = &mut self.state {
            *suggestion = None;
        }
    }

    /// Delivers an empty lookup result: the service had no suggestion for
    /// the current description, so the displayed one (if any) goes away.
    /// Same freshness rule as [`Self::apply_suggestion`].
    pub fn dismiss_suggestion(&mut self, ticket: SuggestionTicket) -> SuggestionOutcome {
        if ticket.version != self.version {
            return SuggestionOutcome::Stale;
        }
        match &mut self.state {
            SessionState::Composing { suggestion, .. } => {
                *suggestion = None;
                SuggestionOutcome::Applied
            }
            SessionState::Idle => SuggestionOutcome::Stale,
        }
    }

    /// Delivers a lookup result. Applied only when `ticket` still matches
    /// the session's current version; `set_category` then copies the
    /// suggested category into the draft.
    pub fn apply_suggestion(
        &mut self,
        ticket: SuggestionTicket,
        suggested: CategorySuggestion,
        set_category: impl FnOnce(&mut D, &CategorySuggestion),
    ) -> SuggestionOutcome {
        if ticket.version != self.version {
            return SuggestionOutcome::Stale;
        }
        match &mut self.state {
            SessionState::Composing {
                draft, suggestion, ..
            } => {
                set_category(draft, &suggested);
                *suggestion = Some(suggested);
                SuggestionOutcome::Applied
            }
            SessionState::Idle => SuggestionOutcome::Stale,
        }
    }
}

fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidAmount {
            input: input.to_string(),
        })
}

fn midnight_utc(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Form state for a transaction being created or edited. The amount is
/// kept as the raw form text and only parsed at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Raw amount text from the form
    pub amount: String,
    /// Free-text description
    pub description: String,
    /// Selected category, manual or suggested
    pub category_id: Option<i64>,
    /// Transaction date, defaulting to today
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Empty draft dated today.
    #[must_use]
    pub fn new() -> Self {
        Self {
            amount: String::new(),
            description: String::new(),
            category_id: None,
            date: Local::now().date_naive(),
        }
    }

    /// Draft pre-filled from an existing transaction.
    #[must_use]
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            amount: transaction.amount.to_string(),
            description: transaction.description.clone(),
            category_id: transaction.category_id,
            date: transaction.date.date_naive(),
        }
    }

    /// Validates the draft into a gateway payload. The only local
    /// validation is that the amount parses; everything else is the
    /// gateway's concern.
    pub fn to_input(&self) -> Result<TransactionInput> {
        Ok(TransactionInput {
            amount: parse_amount(&self.amount)?,
            description: self.description.clone(),
            category_id: self.category_id,
            date: midnight_utc(self.date),
        })
    }
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Form state for a loan being created or edited. Loans carry no category
/// and never receive suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanDraft {
    /// Display name of the loan
    pub name: String,
    /// Raw installment amount text from the form
    pub amount: String,
    /// First installment date, defaulting to today
    pub start_date: NaiveDate,
    /// Optional final installment date
    pub end_date: Option<NaiveDate>,
    /// Free-text description; empty submits as absent
    pub description: String,
}

impl LoanDraft {
    /// Empty draft starting today.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            start_date: Local::now().date_naive(),
            end_date: None,
            description: String::new(),
        }
    }

    /// Draft pre-filled from an existing loan.
    #[must_use]
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            name: loan.name.clone(),
            amount: loan.amount.to_string(),
            start_date: loan.start_date.date_naive(),
            end_date: loan.end_date.map(|d| d.date_naive()),
            description: loan.description.clone().unwrap_or_default(),
        }
    }

    /// Validates the draft into a gateway payload.
    pub fn to_input(&self) -> Result<LoanInput> {
        Ok(LoanInput {
            name: self.name.clone(),
            amount: parse_amount(&self.amount)?,
            start_date: midnight_utc(self.start_date),
            end_date: self.end_date.map(midnight_utc),
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
        })
    }
}

impl Default for LoanDraft {
    fn default() -> Self {
        Self::new()
    }
}
