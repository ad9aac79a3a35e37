//! Top-level application state

use super::browse::BrowseState;
use super::forms::FormDraft;
use super::navigation::{transition, NavEvent, NavigationError, Page};
use super::viewer::FormViewState;
use crate::state::CategoryId;
use std::collections::VecDeque;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Navigation
    page: Page,

    // Pages
    pub draft: FormDraft,
    pub browse: BrowseState,
    pub viewer: FormViewState,

    // Modal errors, oldest first
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(default_category_id: CategoryId) -> Self {
        Self {
            page: Page::List,
            draft: FormDraft::new(default_category_id),
            browse: BrowseState::default(),
            viewer: FormViewState::default(),
            errors: VecDeque::new(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Move to the next page and clean up what the old page leaves behind
    pub fn navigate(&mut self, event: NavEvent) -> Result<Page, NavigationError> {
        let next = transition(self.page, event)?;
        match self.page {
            Page::Create if next != Page::Create => self.draft.reset(),
            Page::View(_) => self.viewer.clear(),
            _ => {}
        }
        tracing::debug!("Navigating {} -> {}", self.page, next);
        self.page = next;
        Ok(next)
    }

    // --- Error queue ---

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1)
    }
}
