//! Domain types shared by the draft, browse, and viewer models

use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored form
pub type FormId = i64;

/// Identifier of a category
pub type CategoryId = i64;

/// Identifier of a question within a single draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Form category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Question type as picked in the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionType {
    #[default]
    Text,
    MultipleChoice,
    Checkbox,
}

impl QuestionType {
    pub fn next(&self) -> Self {
        match self {
            Self::Text => Self::MultipleChoice,
            Self::MultipleChoice => Self::Checkbox,
            Self::Checkbox => Self::Text,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Text => Self::Checkbox,
            Self::MultipleChoice => Self::Text,
            Self::Checkbox => Self::MultipleChoice,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text Input",
            Self::MultipleChoice => "Multiple Choice",
            Self::Checkbox => "Checkbox",
        }
    }

    /// Name used by the form store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::MultipleChoice => "multiple_choice",
            Self::Checkbox => "checkbox",
        }
    }

    /// Choice types need at least one option
    pub fn takes_options(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "multiple_choice" => Ok(Self::MultipleChoice),
            "checkbox" => Ok(Self::Checkbox),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Question body; a text question cannot carry options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Text,
    MultipleChoice { options: Vec<String> },
    Checkbox { options: Vec<String> },
}

impl QuestionKind {
    /// Build the kind for `question_type`, dropping options for text questions
    pub fn new(question_type: QuestionType, options: Vec<String>) -> Self {
        match question_type {
            QuestionType::Text => Self::Text,
            QuestionType::MultipleChoice => Self::MultipleChoice { options },
            QuestionType::Checkbox => Self::Checkbox { options },
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Text => QuestionType::Text,
            Self::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Self::Checkbox { .. } => QuestionType::Checkbox,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            Self::Text => &[],
            Self::MultipleChoice { options } | Self::Checkbox { options } => options,
        }
    }
}

/// A question in the draft form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    pub fn options(&self) -> &[String] {
        self.kind.options()
    }
}

/// Payload handed to the repository when saving a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewForm {
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub questions: Vec<Question>,
}

/// Stored form as shown in the listing
#[derive(Debug, Clone, PartialEq)]
pub struct FormSummary {
    pub id: FormId,
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub question_count: u32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Question of a stored form
#[derive(Debug, Clone, PartialEq)]
pub struct StoredQuestion {
    pub id: i64,
    pub text: String,
    /// Type name as reported by the store
    pub question_type: String,
    pub options: Vec<String>,
}

/// Full stored form as shown in the detail page
#[derive(Debug, Clone, PartialEq)]
pub struct FormDetails {
    pub id: FormId,
    pub title: String,
    pub description: String,
    pub category_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub questions: Vec<StoredQuestion>,
}

/// Parse a store timestamp (RFC 3339 or `YYYY-MM-DD HH:MM:SS`)
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
