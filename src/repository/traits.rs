//! Trait abstraction for the form store to enable mocking in tests

use super::RepositoryResult;
use crate::state::{Category, FormDetails, FormId, FormSummary, NewForm};
use async_trait::async_trait;

/// Operations offered by the remote form store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// List all categories
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;

    /// List all stored forms
    async fn list_forms(&self) -> RepositoryResult<Vec<FormSummary>>;

    /// Fetch one form with its questions
    async fn get_form_details(&self, form_id: FormId) -> RepositoryResult<FormDetails>;

    /// Store a new form, returning its identifier
    async fn create_form(&self, form: &NewForm) -> RepositoryResult<FormId>;

    /// Delete a stored form
    async fn delete_form(&self, form_id: FormId) -> RepositoryResult<()>;
}
