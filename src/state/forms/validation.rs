//! Pure validation rules for options, questions, and whole forms

use crate::state::{Question, QuestionType};
use thiserror::Error;

/// Local validation failures; these never reach the form store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a form title")]
    EmptyTitle,

    #[error("Please add at least one question")]
    NoQuestions,

    #[error("Please enter a question")]
    EmptyQuestionText,

    #[error("Please add at least one option for this question type")]
    MissingOptions,

    #[error("Please enter an option")]
    EmptyOption,
}

/// An option must contain something besides whitespace
pub fn validate_option(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyOption);
    }
    Ok(())
}

/// Question text is checked before the option requirement
pub fn validate_question_for_add(
    text: &str,
    question_type: QuestionType,
    staged_options: &[String],
) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyQuestionText);
    }
    if question_type.takes_options() && staged_options.is_empty() {
        return Err(ValidationError::MissingOptions);
    }
    Ok(())
}

/// Title is checked before the question count
pub fn validate_form_for_save(title: &str, questions: &[Question]) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{QuestionId, QuestionKind};

    fn question() -> Question {
        Question {
            id: QuestionId(1),
            text: "Name?".to_string(),
            kind: QuestionKind::Text,
        }
    }

    mod options {
        use super::*;

        #[test]
        fn test_blank_option_rejected() {
            assert_eq!(validate_option(""), Err(ValidationError::EmptyOption));
            assert_eq!(validate_option(" \t "), Err(ValidationError::EmptyOption));
        }

        #[test]
        fn test_option_with_text_accepted() {
            assert_eq!(validate_option(" Yes "), Ok(()));
        }
    }

    mod questions {
        use super::*;

        #[test]
        fn test_blank_text_rejected_for_every_type() {
            let staged = vec!["a".to_string()];
            for ty in [
                QuestionType::Text,
                QuestionType::MultipleChoice,
                QuestionType::Checkbox,
            ] {
                assert_eq!(
                    validate_question_for_add("  ", ty, &staged),
                    Err(ValidationError::EmptyQuestionText)
                );
            }
        }

        #[test]
        fn test_choice_types_need_options() {
            for ty in [QuestionType::MultipleChoice, QuestionType::Checkbox] {
                assert_eq!(
                    validate_question_for_add("Pick one", ty, &[]),
                    Err(ValidationError::MissingOptions)
                );
                assert_eq!(
                    validate_question_for_add("Pick one", ty, &["a".to_string()]),
                    Ok(())
                );
            }
        }

        #[test]
        fn test_text_type_needs_no_options() {
            assert_eq!(
                validate_question_for_add("Name?", QuestionType::Text, &[]),
                Ok(())
            );
        }

        #[test]
        fn test_text_checked_before_options() {
            assert_eq!(
                validate_question_for_add("", QuestionType::Checkbox, &[]),
                Err(ValidationError::EmptyQuestionText)
            );
        }
    }

    mod forms {
        use super::*;

        #[test]
        fn test_blank_title_rejected_regardless_of_questions() {
            assert_eq!(
                validate_form_for_save(" ", &[]),
                Err(ValidationError::EmptyTitle)
            );
            assert_eq!(
                validate_form_for_save(" ", &[question()]),
                Err(ValidationError::EmptyTitle)
            );
        }

        #[test]
        fn test_no_questions_rejected() {
            assert_eq!(
                validate_form_for_save("Survey", &[]),
                Err(ValidationError::NoQuestions)
            );
        }

        #[test]
        fn test_valid_form_accepted() {
            assert_eq!(validate_form_for_save("Survey", &[question()]), Ok(()));
        }

        #[test]
        fn test_error_messages() {
            assert_eq!(
                ValidationError::EmptyTitle.to_string(),
                "Please enter a form title"
            );
            assert_eq!(
                ValidationError::MissingOptions.to_string(),
                "Please add at least one option for this question type"
            );
        }
    }
}
