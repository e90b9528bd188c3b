//! Reqwest-backed gateway adapter for the FinBuddy REST API.
//!
//! Implements both the entity gateway and the suggestion client against the
//! remote endpoints (`/transactions/`, `/loans/`, `/categories/`,
//! `/suggest-category/`). Authentication is an opaque bearer token handed
//! in at construction; the core never inspects it.

use crate::errors::{Error, Result};
use crate::gateway::{EntityGateway, SuggestionClient};
use crate::models::{
    Category, CategorySuggestion, Loan, LoanInput, Transaction, TransactionInput,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// HTTP adapter over the remote FinBuddy API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

/// Wire shape of the suggestion endpoint. Both fields are null when the
/// service has no suggestion.
#[derive(Debug, Deserialize)]
struct SuggestResponse {
    suggested_category_id: Option<i64>,
    suggested_category_name: Option<String>,
}

impl HttpGateway {
    /// Creates a gateway against `base_url`, optionally authenticating
    /// every request with `bearer_token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, bearer_token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            bearer_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let response = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        body: &impl serde::Serialize,
    ) -> Result<T> {
        let response = self
            .authorize(request)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl EntityGateway for HttpGateway {
    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("/transactions/").await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_json("/categories/").await
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        self.get_json("/loans/").await
    }

    async fn create_transaction(&self, input: &TransactionInput) -> Result<Transaction> {
        debug!("POST /transactions/");
        self.send_json(self.client.post(self.url("/transactions/")), input)
            .await
    }

    async fn update_transaction(&self, id: i64, input: &TransactionInput) -> Result<Transaction> {
        debug!("PUT /transactions/{}", id);
        self.send_json(self.client.put(self.url(&format!("/transactions/{id}"))), input)
            .await
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        debug!("DELETE /transactions/{}", id);
        self.authorize(self.client.delete(self.url(&format!("/transactions/{id}"))))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn create_loan(&self, input: &LoanInput) -> Result<Loan> {
        debug!("POST /loans/");
        self.send_json(self.client.post(self.url("/loans/")), input)
            .await
    }

    async fn update_loan(&self, id: i64, input: &LoanInput) -> Result<Loan> {
        debug!("PUT /loans/{}", id);
        self.send_json(self.client.put(self.url(&format!("/loans/{id}"))), input)
            .await
    }

    async fn delete_loan(&self, id: i64) -> Result<()> {
        debug!("DELETE /loans/{}", id);
        self.authorize(self.client.delete(self.url(&format!("/loans/{id}"))))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl SuggestionClient for HttpGateway {
    async fn suggest(&self, description: &str) -> Result<Option<CategorySuggestion>> {
        debug!("GET /suggest-category/ for {:?}", description);
        let response = self
            .authorize(
                self.client
                    .get(self.url("/suggest-category/"))
                    .query(&[("description", description)]),
            )
            .send()
            .await?
            .error_for_status()?;
        let body: SuggestResponse = response.json().await?;
        match (body.suggested_category_id, body.suggested_category_name) {
            (Some(category_id), Some(category_name)) => Ok(Some(CategorySuggestion {
                category_id,
                category_name,
            })),
            _ => Ok(None),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        // Collapse transport and status errors into the gateway taxonomy;
        // the session layer only distinguishes success from failure.
        Error::Gateway(value.to_string())
    }
}
