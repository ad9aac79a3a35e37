//! In-progress form owned by the Create page
//!
//! Every operation either succeeds and updates the draft, or returns an
//! error and leaves the draft exactly as it was.

use super::field::FormField;
use super::validation::{
    validate_form_for_save, validate_option, validate_question_for_add, ValidationError,
};
use crate::repository::{FormRepository, RepositoryError};
use crate::state::{
    Category, CategoryId, FormId, NewForm, Question, QuestionId, QuestionKind, QuestionType,
};
use thiserror::Error;

/// Why a save did not go through
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("A save is already in progress")]
    InProgress,
}

/// Focusable parts of the builder screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Description,
    Category,
    QuestionText,
    QuestionType,
    OptionInput,
    StagedOptions,
    Questions,
}

impl DraftField {
    const ORDER: [DraftField; 8] = [
        DraftField::Title,
        DraftField::Description,
        DraftField::Category,
        DraftField::QuestionText,
        DraftField::QuestionType,
        DraftField::OptionInput,
        DraftField::StagedOptions,
        DraftField::Questions,
    ];

    /// Fields that only exist while a choice type is selected
    pub fn is_option_field(&self) -> bool {
        matches!(self, DraftField::OptionInput | DraftField::StagedOptions)
    }

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// The questionnaire under construction plus the staging area for the
/// question being composed
#[derive(Debug, Clone)]
pub struct FormDraft {
    pub title: FormField,
    pub description: FormField,
    category_id: CategoryId,
    default_category_id: CategoryId,
    questions: Vec<Question>,

    pub question_text: FormField,
    question_type: QuestionType,
    pub option_input: FormField,
    staged_options: Vec<String>,

    /// Never reused within the lifetime of this draft
    next_question_id: u64,

    active_field: DraftField,
    selected_option: usize,
    selected_question: usize,
    save_in_flight: bool,
}

impl FormDraft {
    pub fn new(default_category_id: CategoryId) -> Self {
        Self {
            title: FormField::text("title", "Form Title", false),
            description: FormField::text("description", "Form Description", true),
            category_id: default_category_id,
            default_category_id,
            questions: Vec::new(),
            question_text: FormField::text("question_text", "Question Text", false),
            question_type: QuestionType::Text,
            option_input: FormField::text("option", "New Option", false),
            staged_options: Vec::new(),
            next_question_id: 1,
            active_field: DraftField::Title,
            selected_option: 0,
            selected_question: 0,
            save_in_flight: false,
        }
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn staged_options(&self) -> &[String] {
        &self.staged_options
    }

    #[cfg(test)]
    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    // --- Staged options ---

    /// Stage an option for the question being composed and clear the option input
    pub fn add_option(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        let text = text.into();
        validate_option(&text)?;
        self.staged_options.push(text);
        self.option_input.clear();
        Ok(())
    }

    /// Stage whatever is typed in the option input
    pub fn submit_option_input(&mut self) -> Result<(), ValidationError> {
        let text = self.option_input.as_text().to_string();
        self.add_option(text)
    }

    /// Remove the staged option at `index`; out of range removes nothing
    pub fn remove_option(&mut self, index: usize) -> Option<String> {
        if index >= self.staged_options.len() {
            return None;
        }
        let removed = self.staged_options.remove(index);
        self.selected_option = clamp_index(self.selected_option, self.staged_options.len());
        Some(removed)
    }

    /// Remove the staged option under the cursor
    pub fn remove_selected_option(&mut self) -> Option<String> {
        self.remove_option(self.selected_option)
    }

    /// Switching type always discards staged options
    pub fn set_question_type(&mut self, question_type: QuestionType) {
        self.question_type = question_type;
        self.staged_options.clear();
        self.selected_option = 0;
        if !question_type.takes_options() && self.active_field.is_option_field() {
            self.active_field = DraftField::QuestionType;
        }
    }

    // --- Questions ---

    /// Append a question built from `text`, `question_type`, and the staged options,
    /// then reset the question inputs
    pub fn add_question(
        &mut self,
        text: impl Into<String>,
        question_type: QuestionType,
    ) -> Result<QuestionId, ValidationError> {
        let text = text.into();
        validate_question_for_add(&text, question_type, &self.staged_options)?;

        let id = QuestionId(self.next_question_id);
        self.next_question_id += 1;

        let options = if question_type.takes_options() {
            self.staged_options.clone()
        } else {
            Vec::new()
        };
        self.questions.push(Question {
            id,
            text,
            kind: QuestionKind::new(question_type, options),
        });
        self.reset_question_inputs();
        Ok(id)
    }

    /// Add the question described by the question inputs
    pub fn submit_question(&mut self) -> Result<QuestionId, ValidationError> {
        let text = self.question_text.as_text().to_string();
        let id = self.add_question(text, self.question_type)?;
        self.active_field = DraftField::QuestionText;
        Ok(id)
    }

    /// Remove the question with `id`; unknown ids are ignored
    pub fn delete_question(&mut self, id: QuestionId) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != id);
        self.selected_question = clamp_index(self.selected_question, self.questions.len());
        self.questions.len() != before
    }

    /// Remove the question under the cursor
    pub fn delete_selected_question(&mut self) -> bool {
        match self.questions.get(self.selected_question) {
            Some(q) => {
                let id = q.id;
                self.delete_question(id)
            }
            None => false,
        }
    }

    // --- Category ---

    #[cfg(test)]
    pub fn set_category(&mut self, category_id: CategoryId) {
        self.category_id = category_id;
    }

    /// Move to the next (or previous) loaded category
    pub fn cycle_category(&mut self, categories: &[Category], forward: bool) {
        if categories.is_empty() {
            return;
        }
        let next = match categories.iter().position(|c| c.id == self.category_id) {
            Some(pos) if forward => (pos + 1) % categories.len(),
            Some(0) => categories.len() - 1,
            Some(pos) => pos - 1,
            None => 0,
        };
        self.category_id = categories[next].id;
    }

    // --- Saving ---

    /// Snapshot of the draft as it would be submitted
    pub fn to_new_form(&self) -> NewForm {
        NewForm {
            title: self.title.as_text().to_string(),
            description: self.description.as_text().to_string(),
            category_id: self.category_id,
            questions: self.questions.clone(),
        }
    }

    /// Validate and mark a submission as in flight
    pub fn begin_save(&mut self) -> Result<NewForm, SaveError> {
        if self.save_in_flight {
            return Err(SaveError::InProgress);
        }
        validate_form_for_save(self.title.as_text(), &self.questions)?;
        self.save_in_flight = true;
        Ok(self.to_new_form())
    }

    /// Release the in-flight guard; a successful result resets the draft
    pub fn finish_save(
        &mut self,
        result: Result<FormId, RepositoryError>,
    ) -> Result<FormId, SaveError> {
        self.save_in_flight = false;
        let form_id = result?;
        self.reset();
        Ok(form_id)
    }

    /// Validate, submit to the store, and reset on success
    pub async fn save(&mut self, repository: &dyn FormRepository) -> Result<FormId, SaveError> {
        let form = self.begin_save()?;
        let result = repository.create_form(&form).await;
        if let Err(e) = &result {
            tracing::warn!("Saving form failed: {e}");
        }
        self.finish_save(result)
    }

    /// Back to a blank draft; the question id counter keeps counting
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.category_id = self.default_category_id;
        self.questions.clear();
        self.selected_question = 0;
        self.reset_question_inputs();
        self.active_field = DraftField::Title;
    }

    fn reset_question_inputs(&mut self) {
        self.question_text.clear();
        self.question_type = QuestionType::Text;
        self.option_input.clear();
        self.staged_options.clear();
        self.selected_option = 0;
        if self.active_field.is_option_field() {
            self.active_field = DraftField::QuestionText;
        }
    }

    // --- Focus and input ---

    pub fn active_field(&self) -> DraftField {
        self.active_field
    }

    #[cfg(test)]
    pub fn set_active_field(&mut self, field: DraftField) {
        if field.is_option_field() && !self.question_type.takes_options() {
            return;
        }
        self.active_field = field;
    }

    pub fn next_field(&mut self) {
        self.step_field(1);
    }

    pub fn prev_field(&mut self) {
        self.step_field(DraftField::ORDER.len() - 1);
    }

    fn step_field(&mut self, step: usize) {
        let count = DraftField::ORDER.len();
        let mut pos = self.active_field.position();
        loop {
            pos = (pos + step) % count;
            let candidate = DraftField::ORDER[pos];
            if !candidate.is_option_field() || self.question_type.takes_options() {
                self.active_field = candidate;
                return;
            }
        }
    }

    /// Text field that receives typed characters, if the focus is on one
    pub fn active_text_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field {
            DraftField::Title => Some(&mut self.title),
            DraftField::Description => Some(&mut self.description),
            DraftField::QuestionText => Some(&mut self.question_text),
            DraftField::OptionInput => Some(&mut self.option_input),
            _ => None,
        }
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn selected_question(&self) -> usize {
        self.selected_question
    }

    /// Move the cursor of the focused list
    pub fn move_selection(&mut self, down: bool) {
        let (index, len) = match self.active_field {
            DraftField::StagedOptions => (&mut self.selected_option, self.staged_options.len()),
            DraftField::Questions => (&mut self.selected_question, self.questions.len()),
            _ => return,
        };
        if down {
            if len > 0 && *index < len - 1 {
                *index += 1;
            }
        } else {
            *index = index.saturating_sub(1);
        }
    }
}

/// Keep a cursor inside a list that may have shrunk
fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}
