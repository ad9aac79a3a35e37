//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::COPY_MODIFIER;
use crate::repository::{form_payload_json, FormRepository, HttpFormRepository, RepositoryError};
use crate::state::{AppState, DraftField, FormField, NavEvent, Page, SaveError};
use crate::ui::detail_line_count;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Form store client
    repository: Box<dyn FormRepository>,
    /// Whether the app should quit
    quit: bool,
    /// Status bar feedback, cleared on the next key press
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App talking to the configured form store
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let repository = HttpFormRepository::from_config(config)?;
        tracing::info!("Using form store at {}", repository.base_url());
        Ok(Self::with_repository(config, Box::new(repository)))
    }

    pub fn with_repository(config: &TuiConfig, repository: Box<dyn FormRepository>) -> Self {
        Self {
            state: AppState::new(config.default_category_id()),
            repository,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message);
    }

    /// Load forms and categories for the list page
    pub async fn refresh(&mut self) {
        self.state.browse.refresh(self.repository.as_ref()).await;
    }

    /// Move between pages and load what the new page needs
    pub async fn navigate(&mut self, event: NavEvent) {
        let page = match self.state.navigate(event) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("{e}");
                return;
            }
        };
        match page {
            Page::List => self.refresh().await,
            Page::View(form_id) => {
                self.state
                    .viewer
                    .load(self.repository.as_ref(), form_id)
                    .await;
            }
            Page::Create => {
                if self.state.browse.categories().is_empty() {
                    self.state
                        .browse
                        .load_categories(self.repository.as_ref())
                        .await;
                }
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.browse.pending_delete().is_some() {
            self.handle_delete_dialog_key(key).await;
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.page() {
            Page::List => self.handle_list_key(key).await,
            Page::Create => self.handle_create_key(key).await,
            Page::View(_) => self.handle_view_key(key).await,
        }
        Ok(())
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.state.browse.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.browse.move_selection_down(),
            KeyCode::Enter => {
                if let Some(form_id) = self.state.browse.selected_form().map(|f| f.id) {
                    self.navigate(NavEvent::SelectView(form_id)).await;
                }
            }
            KeyCode::Char('c') | KeyCode::Char('n') | KeyCode::Tab => {
                self.navigate(NavEvent::SelectCreate).await;
            }
            KeyCode::Char('r') => self.navigate(NavEvent::SelectList).await,
            KeyCode::Char('f') | KeyCode::Right => self.state.browse.cycle_filter(true),
            KeyCode::Char('F') | KeyCode::Left => self.state.browse.cycle_filter(false),
            KeyCode::Char('a') => self.apply_filter_text("all"),
            KeyCode::Char(c) if c.is_ascii_digit() => self.apply_filter_text(&c.to_string()),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.state.browse.request_delete();
            }
            _ => {}
        }
    }

    fn apply_filter_text(&mut self, value: &str) {
        if let Err(e) = self.state.browse.set_category_filter_str(value) {
            self.push_error(e.to_string());
        }
    }

    async fn handle_view_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                self.navigate(NavEvent::Back).await;
            }
            KeyCode::Char('l') => self.navigate(NavEvent::SelectList).await,
            KeyCode::Char('c') | KeyCode::Tab => self.navigate(NavEvent::SelectCreate).await,
            KeyCode::Up | KeyCode::Char('k') => self.state.viewer.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => {
                let line_count = self.state.viewer.form().map_or(0, detail_line_count);
                self.state.viewer.scroll_down(line_count);
            }
            KeyCode::Char('r') => {
                if let Page::View(form_id) = self.state.page() {
                    self.state
                        .viewer
                        .load(self.repository.as_ref(), form_id)
                        .await;
                }
            }
            _ => {}
        }
    }

    async fn handle_create_key(&mut self, key: KeyEvent) {
        // Keyboard shortcuts (work from any field)
        match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.save_draft().await;
                return;
            }
            KeyCode::Char('y') if key.modifiers.contains(COPY_MODIFIER) => {
                self.copy_draft_json();
                return;
            }
            KeyCode::Esc => {
                self.navigate(NavEvent::Back).await;
                return;
            }
            KeyCode::Tab => {
                self.state.draft.next_field();
                return;
            }
            KeyCode::BackTab => {
                self.state.draft.prev_field();
                return;
            }
            _ => {}
        }

        let draft = &mut self.state.draft;
        match draft.active_field() {
            DraftField::Title | DraftField::Description => match key.code {
                KeyCode::Enter if draft.active_field() == DraftField::Title => draft.next_field(),
                KeyCode::Enter => draft.description.push_char('\n'),
                _ => Self::edit_text(draft.active_text_field_mut(), key),
            },
            DraftField::Category => match key.code {
                KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                    draft.cycle_category(self.state.browse.categories(), true)
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    draft.cycle_category(self.state.browse.categories(), false)
                }
                KeyCode::Enter => draft.next_field(),
                _ => {}
            },
            DraftField::QuestionText => match key.code {
                KeyCode::Enter => {
                    if let Err(e) = draft.submit_question() {
                        self.state.push_error(e.to_string());
                    }
                }
                _ => Self::edit_text(draft.active_text_field_mut(), key),
            },
            DraftField::QuestionType => match key.code {
                KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => {
                    let next = draft.question_type().next();
                    draft.set_question_type(next);
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    let prev = draft.question_type().prev();
                    draft.set_question_type(prev);
                }
                KeyCode::Enter => draft.next_field(),
                _ => {}
            },
            DraftField::OptionInput => match key.code {
                KeyCode::Enter => {
                    if let Err(e) = draft.submit_option_input() {
                        self.state.push_error(e.to_string());
                    }
                }
                _ => Self::edit_text(draft.active_text_field_mut(), key),
            },
            DraftField::StagedOptions => match key.code {
                KeyCode::Up | KeyCode::Char('k') => draft.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => draft.move_selection(true),
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
                    draft.remove_selected_option();
                }
                _ => {}
            },
            DraftField::Questions => match key.code {
                KeyCode::Up | KeyCode::Char('k') => draft.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => draft.move_selection(true),
                KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
                    draft.delete_selected_question();
                }
                _ => {}
            },
        }
    }

    fn edit_text(field: Option<&mut FormField>, key: KeyEvent) {
        let Some(field) = field else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                field.push_char(c)
            }
            KeyCode::Backspace => field.pop_char(),
            _ => {}
        }
    }

    async fn handle_delete_dialog_key(&mut self, key: KeyEvent) {
        let confirmed = match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Tab
            | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                if let Some(pending) = self.state.browse.pending_delete_mut() {
                    pending.toggle();
                }
                return;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            KeyCode::Enter => self
                .state
                .browse
                .pending_delete()
                .map(|p| p.confirm_selected)
                .unwrap_or(false),
            _ => return,
        };

        let Some(pending) = self.state.browse.take_pending_delete() else {
            return;
        };
        if !confirmed {
            return;
        }

        let title = pending.title.clone();
        let confirmation = pending.confirm();
        match self
            .state
            .browse
            .delete_form(self.repository.as_ref(), confirmation)
            .await
        {
            Ok(()) => {
                self.status_message = Some(format!("Form \"{title}\" deleted successfully!"));
            }
            Err(e) => self.push_error(failure_message("Error deleting form", &e)),
        }
    }

    /// Validate and submit the draft; the page stays on Create either way
    async fn save_draft(&mut self) {
        match self.state.draft.save(self.repository.as_ref()).await {
            Ok(form_id) => {
                self.status_message =
                    Some(format!("Form saved successfully! Form ID: {form_id}"));
            }
            Err(SaveError::Validation(e)) => self.push_error(e.to_string()),
            Err(SaveError::Repository(e)) => {
                self.push_error(failure_message("Error saving form", &e))
            }
            Err(SaveError::InProgress) => {
                self.status_message = Some(SaveError::InProgress.to_string());
            }
        }
    }

    /// Put the draft's submission body on the system clipboard
    fn copy_draft_json(&mut self) {
        let json = form_payload_json(&self.state.draft.to_new_form());
        match copy_to_clipboard(&json) {
            Ok(()) => {
                self.status_message = Some(format!("Copied {} chars of form JSON", json.len()))
            }
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {e}");
                self.push_error(format!("Could not copy to clipboard: {e}"));
            }
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// User-facing text for a failed save or delete
fn failure_message(action: &str, err: &RepositoryError) -> String {
    match err {
        RepositoryError::Transport(detail) => format!("Failed to connect to server: {detail}"),
        RepositoryError::Logical { .. } => format!("{action}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockFormRepository;
    use crate::state::{Category, CategoryFilter, FormDetails, FormSummary, QuestionType};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn summary(id: i64, title: &str) -> FormSummary {
        FormSummary {
            id,
            title: title.to_string(),
            description: String::new(),
            category_id: 1,
            category_name: "Internal".to_string(),
            question_count: 2,
            created_at: None,
        }
    }

    fn details(id: i64) -> FormDetails {
        FormDetails {
            id,
            title: "Survey".to_string(),
            description: String::new(),
            category_name: "Internal".to_string(),
            created_at: None,
            questions: Vec::new(),
        }
    }

    /// Mock that answers list calls with two forms and one category
    fn listing_repo() -> MockFormRepository {
        let mut repo = MockFormRepository::new();
        repo.expect_list_forms()
            .returning(|| Ok(vec![summary(1, "Alpha"), summary(2, "Beta")]));
        repo.expect_list_categories().returning(|| {
            Ok(vec![Category {
                id: 1,
                name: "Internal".to_string(),
            }])
        });
        repo
    }

    fn app_with(repo: MockFormRepository) -> App {
        App::with_repository(&TuiConfig::default(), Box::new(repo))
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_enter_opens_selected_form() {
            let mut repo = listing_repo();
            repo.expect_get_form_details()
                .withf(|id| *id == 2)
                .times(1)
                .returning(|id| Ok(details(id)));
            let mut app = app_with(repo);
            app.refresh().await;

            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(app.state.page(), Page::View(2));
            assert_eq!(app.state.viewer.form().map(|f| f.id), Some(2));
        }

        #[tokio::test]
        async fn test_back_from_view_reloads_list() {
            let mut repo = MockFormRepository::new();
            repo.expect_list_forms()
                .times(2)
                .returning(|| Ok(vec![summary(1, "Alpha")]));
            repo.expect_list_categories().returning(|| Ok(Vec::new()));
            repo.expect_get_form_details()
                .returning(|id| Ok(details(id)));
            let mut app = app_with(repo);
            app.refresh().await;

            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.page(), Page::List);
        }

        #[tokio::test]
        async fn test_q_quits_from_list_only() {
            let mut app = app_with(listing_repo());
            app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(!app.should_quit());
            assert_eq!(app.state.draft.title.as_text(), "q");

            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_digit_filters_by_category_id() {
            let mut app = app_with(listing_repo());
            app.refresh().await;

            app.handle_key(key(KeyCode::Char('2'))).await.unwrap();
            assert_eq!(app.state.browse.filter(), CategoryFilter::Category(2));
            assert!(app.state.browse.visible_forms().is_empty());

            app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
            assert_eq!(app.state.browse.visible_forms().len(), 2);

            app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
            assert_eq!(app.state.browse.filter(), CategoryFilter::All);
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_view_scroll_stops_at_last_line() {
            let mut repo = listing_repo();
            repo.expect_get_form_details()
                .returning(|id| Ok(details(id)));
            let mut app = app_with(repo);
            app.refresh().await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            let line_count = app.state.viewer.form().map_or(0, detail_line_count);
            assert!(line_count > 1);
            for _ in 0..line_count + 5 {
                app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
            }
            assert_eq!(app.state.viewer.scroll_offset, line_count - 1);
        }

        #[tokio::test]
        async fn test_enter_on_empty_list_stays() {
            let mut repo = MockFormRepository::new();
            repo.expect_get_form_details().never();
            let mut app = app_with(repo);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.page(), Page::List);
        }
    }

    mod builder {
        use super::*;
        use pretty_assertions::assert_eq;

        async fn app_on_create() -> App {
            let mut repo = listing_repo();
            repo.expect_create_form().returning(|_| Ok(42));
            let mut app = app_with(repo);
            app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
            app
        }

        #[tokio::test]
        async fn test_compose_and_save() {
            let mut app = app_on_create().await;
            type_text(&mut app, "Feedback").await;
            app.state.draft.set_active_field(DraftField::QuestionText);
            type_text(&mut app, "Name?").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.draft.questions().len(), 1);

            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.page(), Page::Create);
            assert_eq!(
                app.status_message.as_deref(),
                Some("Form saved successfully! Form ID: 42")
            );
            assert!(app.state.draft.questions().is_empty());
            assert_eq!(app.state.draft.title.as_text(), "");
        }

        #[tokio::test]
        async fn test_save_without_title_shows_error() {
            let mut app = app_on_create().await;
            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(app.state.current_error(), Some("Please enter a form title"));

            // Error dialog swallows keys until dismissed
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.state.draft.title.as_text(), "");
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_choice_question_needs_options() {
            let mut app = app_on_create().await;
            app.state.draft.set_active_field(DraftField::QuestionType);
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(app.state.draft.question_type(), QuestionType::MultipleChoice);

            app.state.draft.set_active_field(DraftField::QuestionText);
            type_text(&mut app, "Pick").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(
                app.state.current_error(),
                Some("Please add at least one option for this question type")
            );
            app.handle_key(key(KeyCode::Esc)).await.unwrap();

            app.state.draft.set_active_field(DraftField::OptionInput);
            type_text(&mut app, "Yes").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.draft.staged_options(), ["Yes"]);

            app.state.draft.set_active_field(DraftField::QuestionText);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.draft.questions()[0].options(), ["Yes"]);
        }

        #[tokio::test]
        async fn test_store_failure_keeps_draft() {
            let mut repo = listing_repo();
            repo.expect_create_form()
                .returning(|_| Err(RepositoryError::logical("Database error")));
            let mut app = app_with(repo);
            app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
            type_text(&mut app, "Feedback").await;
            app.state
                .draft
                .add_question("Name?", QuestionType::Text)
                .unwrap();

            app.handle_key(ctrl('s')).await.unwrap();
            assert_eq!(
                app.state.current_error(),
                Some("Error saving form: Database error")
            );
            assert_eq!(app.state.draft.title.as_text(), "Feedback");
            assert_eq!(app.state.draft.questions().len(), 1);
        }

        #[tokio::test]
        async fn test_category_cycles_through_loaded_categories() {
            let mut repo = MockFormRepository::new();
            repo.expect_list_categories().returning(|| {
                Ok(vec![
                    Category {
                        id: 1,
                        name: "Internal".to_string(),
                    },
                    Category {
                        id: 2,
                        name: "External".to_string(),
                    },
                ])
            });
            let mut app = app_with(repo);
            app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
            app.state.draft.set_active_field(DraftField::Category);
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(app.state.draft.category_id(), 2);
        }
    }

    mod deleting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_cancel_keeps_forms() {
            let mut repo = listing_repo();
            repo.expect_delete_form().never();
            let mut app = app_with(repo);
            app.refresh().await;

            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            assert!(app.state.browse.pending_delete().is_some());
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.state.browse.pending_delete().is_none());
            assert_eq!(app.state.browse.forms().len(), 2);
        }

        #[tokio::test]
        async fn test_enter_defaults_to_cancel() {
            let mut repo = listing_repo();
            repo.expect_delete_form().never();
            let mut app = app_with(repo);
            app.refresh().await;

            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.browse.pending_delete().is_none());
        }

        #[tokio::test]
        async fn test_confirm_deletes_and_reports() {
            let mut repo = listing_repo();
            repo.expect_delete_form()
                .withf(|id| *id == 1)
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(repo);
            app.refresh().await;

            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
            assert_eq!(
                app.status_message.as_deref(),
                Some("Form \"Alpha\" deleted successfully!")
            );
        }

        #[tokio::test]
        async fn test_transport_failure_reported_as_connection_error() {
            let mut repo = listing_repo();
            repo.expect_delete_form()
                .returning(|_| Err(RepositoryError::Transport("refused".to_string())));
            let mut app = app_with(repo);
            app.refresh().await;

            app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(
                app.state.current_error(),
                Some("Failed to connect to server: refused")
            );
            assert_eq!(app.state.browse.forms().len(), 2);
        }
    }

    #[test]
    fn test_failure_message() {
        assert_eq!(
            failure_message("Error deleting form", &RepositoryError::logical("gone")),
            "Error deleting form: gone"
        );
        assert_eq!(
            failure_message(
                "Error saving form",
                &RepositoryError::Transport("timed out".to_string())
            ),
            "Failed to connect to server: timed out"
        );
    }
}
