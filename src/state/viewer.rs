//! Detail page model for a single stored form

use crate::repository::{FormRepository, RepositoryResult};
use crate::state::{FormDetails, FormId};

/// Ticket for one detail fetch; only the latest ticket is honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub form_id: FormId,
    generation: u64,
}

/// What the detail page shows while a form is being fetched or after
#[derive(Debug, Default)]
pub struct FormViewState {
    form_id: Option<FormId>,
    generation: u64,
    loading: bool,
    error: Option<String>,
    form: Option<FormDetails>,
    pub scroll_offset: usize,
}

impl FormViewState {
    pub fn form_id(&self) -> Option<FormId> {
        self.form_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> Option<&FormDetails> {
        self.form.as_ref()
    }

    /// Forget the previous form and start loading `form_id`
    pub fn begin(&mut self, form_id: FormId) -> DetailRequest {
        self.generation += 1;
        self.form_id = Some(form_id);
        self.loading = true;
        self.error = None;
        self.form = None;
        self.scroll_offset = 0;
        DetailRequest {
            form_id,
            generation: self.generation,
        }
    }

    /// Apply a fetch result; returns false when the response is stale
    pub fn complete(&mut self, request: DetailRequest, result: RepositoryResult<FormDetails>) -> bool {
        if request.generation != self.generation || Some(request.form_id) != self.form_id {
            tracing::warn!(
                "Discarding stale details response for form {}",
                request.form_id
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(form) => {
                self.form = Some(form);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.form = None;
            }
        }
        true
    }

    /// Fetch and apply details for `form_id`
    pub async fn load(&mut self, repository: &dyn FormRepository, form_id: FormId) -> bool {
        let request = self.begin(form_id);
        let result = repository.get_form_details(form_id).await;
        self.complete(request, result)
    }

    /// Drop everything when leaving the page; in-flight tickets become stale
    pub fn clear(&mut self) {
        self.generation += 1;
        self.form_id = None;
        self.loading = false;
        self.error = None;
        self.form = None;
        self.scroll_offset = 0;
    }

    /// Scroll one line, keeping the last of `line_count` lines on screen
    pub fn scroll_down(&mut self, line_count: usize) {
        if self.scroll_offset + 1 < line_count {
            self.scroll_offset += 1;
        } else {
            self.scroll_offset = line_count.saturating_sub(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockFormRepository, RepositoryError};

    fn details(id: FormId, title: &str) -> FormDetails {
        FormDetails {
            id,
            title: title.to_string(),
            description: String::new(),
            category_name: "Internal".to_string(),
            created_at: None,
            questions: Vec::new(),
        }
    }

    #[test]
    fn test_begin_resets_previous_form() {
        let mut view = FormViewState::default();
        let req = view.begin(1);
        view.complete(req, Ok(details(1, "First")));
        view.scroll_down(10);

        view.begin(2);
        assert!(view.is_loading());
        assert!(view.form().is_none());
        assert_eq!(view.scroll_offset, 0);
        assert_eq!(view.form_id(), Some(2));
    }

    #[test]
    fn test_scroll_down_stops_at_last_line() {
        let mut view = FormViewState::default();
        for _ in 0..10 {
            view.scroll_down(4);
        }
        assert_eq!(view.scroll_offset, 3);

        view.scroll_up();
        assert_eq!(view.scroll_offset, 2);

        // Content shrank after a reload
        view.scroll_down(1);
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut view = FormViewState::default();
        let old = view.begin(1);
        let new = view.begin(2);

        assert!(!view.complete(old, Ok(details(1, "Old"))));
        assert!(view.form().is_none());
        assert!(view.is_loading());

        assert!(view.complete(new, Ok(details(2, "New"))));
        assert_eq!(view.form().map(|f| f.title.as_str()), Some("New"));
    }

    #[test]
    fn test_response_after_clear_discarded() {
        let mut view = FormViewState::default();
        let req = view.begin(1);
        view.clear();
        assert!(!view.complete(req, Ok(details(1, "Late"))));
        assert!(view.form().is_none());
    }

    #[test]
    fn test_refetch_same_id_ignores_older_ticket() {
        let mut view = FormViewState::default();
        let first = view.begin(1);
        let second = view.begin(1);
        assert!(!view.complete(first, Ok(details(1, "Old"))));
        assert!(view.complete(second, Ok(details(1, "Fresh"))));
    }

    #[test]
    fn test_error_recorded() {
        let mut view = FormViewState::default();
        let req = view.begin(5);
        view.complete(req, Err(RepositoryError::logical("Form not found")));
        assert_eq!(view.error(), Some("Form not found"));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_load_fetches_by_id() {
        let mut repo = MockFormRepository::new();
        repo.expect_get_form_details()
            .withf(|id| *id == 3)
            .times(1)
            .returning(|id| Ok(details(id, "Onboarding")));

        let mut view = FormViewState::default();
        assert!(view.load(&repo, 3).await);
        assert_eq!(view.form().map(|f| f.id), Some(3));
    }
}
