//! Stored-form listing with category filter and delete confirmation

use crate::repository::{FormRepository, RepositoryError, RepositoryResult};
use crate::state::{Category, CategoryId, FormId, FormSummary};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category filter for the form list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    pub fn matches(&self, form: &FormSummary) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => form.category_id == *id,
        }
    }

    /// Step through All and then each loaded category in order
    pub fn cycle(&self, categories: &[Category], forward: bool) -> Self {
        // Slot 0 is All, slot n is categories[n - 1]
        let slots = categories.len() + 1;
        let current = match self {
            Self::All => 0,
            Self::Category(id) => categories
                .iter()
                .position(|c| c.id == *id)
                .map(|p| p + 1)
                .unwrap_or(0),
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        match next {
            0 => Self::All,
            n => Self::Category(categories[n - 1].id),
        }
    }

    /// Display name, resolved against the loaded categories
    pub fn label(&self, categories: &[Category]) -> String {
        match self {
            Self::All => "All Categories".to_string(),
            Self::Category(id) => categories
                .iter()
                .find(|c| c.id == *id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("Category {id}")),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(id) => write!(f, "{id}"),
        }
    }
}

/// Filter text that is neither `all` nor an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid category filter: {0:?}")]
pub struct FilterParseError(pub String);

impl FromStr for CategoryFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<CategoryId>()
            .map(Self::Category)
            .map_err(|_| FilterParseError(s.to_string()))
    }
}

/// Proof that the user accepted the delete prompt
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    form_id: FormId,
}

impl DeleteConfirmation {
    pub fn form_id(&self) -> FormId {
        self.form_id
    }
}

/// Delete prompt awaiting an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub form_id: FormId,
    pub title: String,
    /// Cursor on the confirm button (false = cancel)
    pub confirm_selected: bool,
}

impl PendingDelete {
    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"?\n\nThis will permanently delete the form and all its responses. This action cannot be undone.",
            self.title
        )
    }

    pub fn toggle(&mut self) {
        self.confirm_selected = !self.confirm_selected;
    }

    /// The only way to obtain a [`DeleteConfirmation`]
    pub fn confirm(self) -> DeleteConfirmation {
        DeleteConfirmation {
            form_id: self.form_id,
        }
    }
}

/// Listing page model
#[derive(Debug, Default)]
pub struct BrowseState {
    forms: Vec<FormSummary>,
    categories: Vec<Category>,
    filter: CategoryFilter,
    loading: bool,
    load_error: Option<String>,
    selected_index: usize,
    pending_delete: Option<PendingDelete>,
}

impl BrowseState {
    pub fn forms(&self) -> &[FormSummary] {
        &self.forms
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    // --- Loading ---

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Record a forms response; a failure keeps the previous rows
    pub fn apply_forms(&mut self, result: RepositoryResult<Vec<FormSummary>>) {
        self.loading = false;
        match result {
            Ok(forms) => {
                self.forms = forms;
                self.load_error = None;
                self.clamp_selection();
            }
            Err(e) => {
                tracing::warn!("Loading forms failed: {e}");
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Record a categories response; a failure leaves no categories
    pub fn apply_categories(&mut self, result: RepositoryResult<Vec<Category>>) {
        match result {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                tracing::warn!("Loading categories failed: {e}");
                self.categories.clear();
            }
        }
    }

    pub async fn load_forms(&mut self, repository: &dyn FormRepository) {
        self.begin_loading();
        let result = repository.list_forms().await;
        self.apply_forms(result);
    }

    pub async fn load_categories(&mut self, repository: &dyn FormRepository) {
        let result = repository.list_categories().await;
        self.apply_categories(result);
    }

    /// Fetch forms and categories concurrently
    pub async fn refresh(&mut self, repository: &dyn FormRepository) {
        self.begin_loading();
        let (forms, categories) =
            tokio::join!(repository.list_forms(), repository.list_categories());
        self.apply_forms(forms);
        self.apply_categories(categories);
    }

    // --- Filtering ---

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.selected_index = 0;
    }

    /// Parse `all` or a category id; bad input leaves the filter unchanged
    pub fn set_category_filter_str(&mut self, value: &str) -> Result<(), FilterParseError> {
        let filter = value.parse()?;
        self.set_category_filter(filter);
        Ok(())
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let next = self.filter.cycle(&self.categories, forward);
        self.set_category_filter(next);
    }

    pub fn visible_forms(&self) -> Vec<&FormSummary> {
        self.forms.iter().filter(|f| self.filter.matches(f)).collect()
    }

    /// "Showing all N form(s)" or "Showing X of N form(s)"
    pub fn summary_line(&self) -> String {
        match self.filter {
            CategoryFilter::All => format!("Showing all {} form(s)", self.forms.len()),
            CategoryFilter::Category(_) => format!(
                "Showing {} of {} form(s)",
                self.visible_forms().len(),
                self.forms.len()
            ),
        }
    }

    // --- Selection ---

    pub fn selected_form(&self) -> Option<&FormSummary> {
        self.visible_forms().get(self.selected_index).copied()
    }

    pub fn move_selection_down(&mut self) {
        let max = self.visible_forms().len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_forms().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // --- Deleting ---

    /// Open the delete prompt for the selected form
    pub fn request_delete(&mut self) -> Option<&PendingDelete> {
        let pending = self.selected_form().map(|form| PendingDelete {
            form_id: form.id,
            title: form.title.clone(),
            confirm_selected: false,
        })?;
        self.pending_delete = Some(pending);
        self.pending_delete.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn pending_delete_mut(&mut self) -> Option<&mut PendingDelete> {
        self.pending_delete.as_mut()
    }

    /// Close the prompt, handing back its contents
    pub fn take_pending_delete(&mut self) -> Option<PendingDelete> {
        self.pending_delete.take()
    }

    /// Delete a confirmed form and reload the list on success
    pub async fn delete_form(
        &mut self,
        repository: &dyn FormRepository,
        confirmation: DeleteConfirmation,
    ) -> Result<(), RepositoryError> {
        let form_id = confirmation.form_id();
        repository.delete_form(form_id).await?;
        self.load_forms(repository).await;
        Ok(())
    }
}
