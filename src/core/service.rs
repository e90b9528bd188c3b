//! Async edit-session coordinators.
//!
//! These bind the pure session machine to the gateway, the suggestion
//! client, and the entity store. All shared state sits behind tokio locks
//! only because the spawned suggestion task must re-enter the session to
//! deliver its result; everything else runs on the single logical event
//! thread.

use crate::core::session::{
    EditSession, LoanDraft, Mode, SuggestionOutcome, SuggestionTicket, TransactionDraft,
};
use crate::errors::{Error, Result};
use crate::gateway::{EntityGateway, SuggestionClient};
use crate::models::{CategorySuggestion, Loan, Transaction};
use crate::store::{self, SharedStore};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Suggestions are only worth asking for once the description exceeds two
/// characters.
fn wants_suggestion(description: &str) -> bool {
    description.chars().count() > 2
}

fn set_draft_category(draft: &mut TransactionDraft, suggested: &CategorySuggestion) {
    draft.category_id = Some(suggested.category_id);
}

/// Edit-session coordinator for transactions, with background category
/// suggestions.
pub struct TransactionSessions {
    gateway: Arc<dyn EntityGateway>,
    suggester: Arc<dyn SuggestionClient>,
    store: SharedStore,
    session: Arc<Mutex<EditSession<TransactionDraft>>>,
}

impl TransactionSessions {
    /// Creates an idle coordinator over the given collaborators.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn EntityGateway>,
        suggester: Arc<dyn SuggestionClient>,
        store: SharedStore,
    ) -> Self {
        Self {
            gateway,
            suggester,
            store,
            session: Arc::new(Mutex::new(EditSession::new())),
        }
    }

    /// True while a draft is open.
    pub async fn is_composing(&self) -> bool {
        self.session.lock().await.is_composing()
    }

    /// Snapshot of the open draft, for rendering.
    pub async fn draft(&self) -> Option<TransactionDraft> {
        self.session.lock().await.draft().cloned()
    }

    /// Snapshot of the displayed suggestion, for rendering.
    pub async fn suggestion(&self) -> Option<CategorySuggestion> {
        self.session.lock().await.suggestion().cloned()
    }

    /// The open session's intent, if any.
    pub async fn mode(&self) -> Option<Mode> {
        self.session.lock().await.mode()
    }

    /// Opens a create session with an empty draft dated today.
    pub async fn open_create(&self) {
        self.session.lock().await.open_create(TransactionDraft::new());
    }

    /// Opens an update session pre-filled from `transaction`. When the
    /// existing description is long enough, a suggestion lookup starts
    /// immediately; the returned handle is the background task (tests
    /// await it, callers normally drop it).
    pub async fn open_edit(&self, transaction: &Transaction) -> Option<JoinHandle<()>> {
        let mut session = self.session.lock().await;
        session.open_update(
            transaction.id,
            TransactionDraft::from_transaction(transaction),
        );
        if !wants_suggestion(&transaction.description) {
            return None;
        }
        let ticket = session.issue_ticket()?;
        drop(session);
        Some(self.spawn_lookup(ticket, transaction.description.clone()))
    }

    /// Updates the draft description. Long enough descriptions issue a
    /// fresh lookup that supersedes any earlier one; short ones clear the
    /// displayed suggestion and invalidate whatever is still in flight.
    pub async fn edit_description(&self, text: &str) -> Option<JoinHandle<()>> {
        let mut session = self.session.lock().await;
        session.update_draft(|draft| draft.description = text.to_string())?;
        if wants_suggestion(text) {
            let ticket = session.issue_ticket()?;
            drop(session);
            Some(self.spawn_lookup(ticket, text.to_string()))
        } else {
            session.clear_suggestion();
            None
        }
    }

    /// Updates the raw amount text. Parsed only at submit.
    pub async fn edit_amount(&self, text: &str) {
        self.session
            .lock()
            .await
            .update_draft(|draft| draft.amount = text.to_string());
    }

    /// Selects a category manually. Does not disturb in-flight lookups.
    pub async fn edit_category(&self, category_id: Option<i64>) {
        self.session
            .lock()
            .await
            .update_draft(|draft| draft.category_id = category_id);
    }

    /// Updates the transaction date.
    pub async fn edit_date(&self, date: NaiveDate) {
        self.session
            .lock()
            .await
            .update_draft(|draft| draft.date = date);
    }

    /// Validates and submits the open draft, creating or updating per the
    /// session mode. On success the session closes and the store is
    /// refreshed; on failure the draft stays open and untouched.
    pub async fn submit(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        let (mode, draft) = match (session.mode(), session.draft()) {
            (Some(mode), Some(draft)) => (mode, draft.clone()),
            _ => return Err(Error::NoSession),
        };
        let input = draft.to_input()?;
        match mode {
            Mode::Create => {
                self.gateway.create_transaction(&input).await?;
            }
            Mode::Update(id) => {
                self.gateway.update_transaction(id, &input).await?;
            }
        }
        session.finish();
        drop(session);
        store::refresh_transactions(self.gateway.as_ref(), &self.store).await
    }

    /// Discards the draft. In-flight lookup results will be ignored.
    pub async fn cancel(&self) {
        self.session.lock().await.cancel();
    }

    /// Deletes a transaction outright. No session state is involved; the
    /// caller is responsible for having confirmed with the user.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.gateway.delete_transaction(id).await?;
        store::refresh_transactions(self.gateway.as_ref(), &self.store).await
    }

    fn spawn_lookup(&self, ticket: SuggestionTicket, description: String) -> JoinHandle<()> {
        let suggester = Arc::clone(&self.suggester);
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            match suggester.suggest(&description).await {
                Ok(Some(suggested)) => {
                    let mut session = session.lock().await;
                    let outcome = session.apply_suggestion(ticket, suggested, set_draft_category);
                    if outcome == SuggestionOutcome::Stale {
                        trace!(
                            "Discarding stale category suggestion for {:?}",
                            description
                        );
                    }
                }
                Ok(None) => {
                    let mut session = session.lock().await;
                    if session.dismiss_suggestion(ticket) == SuggestionOutcome::Stale {
                        trace!("Discarding stale empty suggestion for {:?}", description);
                    }
                }
                Err(e) => {
                    // The lookup is best-effort; a failed request just
                    // leaves the draft as the user typed it.
                    warn!("Category suggestion lookup failed: {}", e);
                }
            }
        })
    }
}

/// Edit-session coordinator for loans. Same machine as transactions, but
/// loans carry no category and never receive suggestions.
pub struct LoanSessions {
    gateway: Arc<dyn EntityGateway>,
    store: SharedStore,
    session: Mutex<EditSession<LoanDraft>>,
}

impl LoanSessions {
    /// Creates an idle coordinator over the given collaborators.
    #[must_use]
    pub fn new(gateway: Arc<dyn EntityGateway>, store: SharedStore) -> Self {
        Self {
            gateway,
            store,
            session: Mutex::new(EditSession::new()),
        }
    }

    /// True while a draft is open.
    pub async fn is_composing(&self) -> bool {
        self.session.lock().await.is_composing()
    }

    /// Snapshot of the open draft, for rendering.
    pub async fn draft(&self) -> Option<LoanDraft> {
        self.session.lock().await.draft().cloned()
    }

    /// The open session's intent, if any.
    pub async fn mode(&self) -> Option<Mode> {
        self.session.lock().await.mode()
    }

    /// Opens a create session with an empty draft starting today.
    pub async fn open_create(&self) {
        self.session.lock().await.open_create(LoanDraft::new());
    }

    /// Opens an update session pre-filled from `loan`.
    pub async fn open_edit(&self, loan: &Loan) {
        self.session
            .lock()
            .await
            .open_update(loan.id, LoanDraft::from_loan(loan));
    }

    /// Mutates the open draft through `f`. Returns `None` when idle.
    pub async fn edit<R>(&self, f: impl FnOnce(&mut LoanDraft) -> R) -> Option<R> {
        self.session.lock().await.update_draft(f)
    }

    /// Validates and submits the open draft. Same contract as the
    /// transaction submit: failure leaves the draft open and untouched.
    pub async fn submit(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        let (mode, draft) = match (session.mode(), session.draft()) {
            (Some(mode), Some(draft)) => (mode, draft.clone()),
            _ => return Err(Error::NoSession),
        };
        let input = draft.to_input()?;
        match mode {
            Mode::Create => {
                self.gateway.create_loan(&input).await?;
            }
            Mode::Update(id) => {
                self.gateway.update_loan(id, &input).await?;
            }
        }
        session.finish();
        drop(session);
        store::refresh_loans(self.gateway.as_ref(), &self.store).await
    }

    /// Discards the draft.
    pub async fn cancel(&self) {
        self.session.lock().await.cancel();
    }

    /// Deletes a loan outright, after caller-side confirmation.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.gateway.delete_loan(id).await?;
        store::refresh_loans(self.gateway.as_ref(), &self.store).await
    }
}
