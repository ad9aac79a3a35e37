//! HTTP client for communicating with the form store
//!
//! Every endpoint answers with a JSON envelope `{success, error?, ...}`.
//! Connection failures and unparsable bodies map to
//! [`RepositoryError::Transport`]; `success: false` maps to
//! [`RepositoryError::Logical`].

use super::traits::FormRepository;
use super::wire::{
    CategoriesBody, CreateFormRequest, CreatedBody, DeleteFormRequest, EmptyBody, Envelope,
    FormDetailsBody, FormsBody,
};
use super::{RepositoryError, RepositoryResult};
use crate::config::TuiConfig;
use crate::state::{Category, FormDetails, FormId, FormSummary, NewForm};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the form store API
pub struct HttpFormRepository {
    client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl HttpFormRepository {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Create a client from the resolved TUI configuration
    pub fn from_config(config: &TuiConfig) -> RepositoryResult<Self> {
        Self::new(config.api_base_url(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, script: &str) -> String {
        format!("{}/{}", self.base_url, script)
    }

    /// Decode a response body into an envelope, treating non-JSON as a transport failure
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> RepositoryResult<Envelope<T>> {
        let status = response.status();
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::Transport(format!("invalid response (HTTP {status}): {e}"))
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        script: &str,
        query: &[(&str, String)],
    ) -> RepositoryResult<Envelope<T>> {
        tracing::debug!("GET {script}");
        let response = self
            .client
            .get(self.endpoint(script))
            .query(query)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        script: &str,
        body: &B,
    ) -> RepositoryResult<Envelope<T>> {
        tracing::debug!("POST {script}");
        let response = self
            .client
            .post(self.endpoint(script))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl FormRepository for HttpFormRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let body: CategoriesBody = self.get("get_categories.php", &[]).await?.into_result()?;
        Ok(body.categories.into_iter().map(Category::from).collect())
    }

    async fn list_forms(&self) -> RepositoryResult<Vec<FormSummary>> {
        let body: FormsBody = match self.get("get_forms.php", &[]).await?.into_result() {
            Ok(body) => body,
            Err(RepositoryError::Logical { .. }) => {
                return Err(RepositoryError::logical("Failed to load forms"));
            }
            Err(e) => return Err(e),
        };
        Ok(body.forms.into_iter().map(FormSummary::from).collect())
    }

    async fn get_form_details(&self, form_id: FormId) -> RepositoryResult<FormDetails> {
        let body: FormDetailsBody = self
            .get("get_form_details.php", &[("id", form_id.to_string())])
            .await?
            .into_result_or("Failed to load form")?;
        body.form
            .map(FormDetails::from)
            .ok_or_else(|| RepositoryError::logical("Form not found"))
    }

    async fn create_form(&self, form: &NewForm) -> RepositoryResult<FormId> {
        let request = CreateFormRequest::from(form);
        let body: CreatedBody = self.post("save_form.php", &request).await?.into_result()?;
        let form_id = body
            .form_id
            .ok_or_else(|| RepositoryError::Transport("response is missing form_id".to_string()))?;
        tracing::info!("Created form {form_id} with {} question(s)", form.questions.len());
        Ok(form_id)
    }

    async fn delete_form(&self, form_id: FormId) -> RepositoryResult<()> {
        let _: EmptyBody = self
            .post("delete_form.php", &DeleteFormRequest { form_id })
            .await?
            .into_result()?;
        tracing::info!("Deleted form {form_id}");
        Ok(())
    }
}
