//! JSON shapes exchanged with the form store

use super::{RepositoryError, RepositoryResult};
use crate::state::{
    parse_timestamp, Category, FormDetails, FormId, FormSummary, NewForm, StoredQuestion,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback message when the store rejects a request without saying why
const UNKNOWN_ERROR: &str = "Unknown error";

/// `{success, error?, ...body}` wrapper used by every endpoint
#[derive(Debug, Deserialize)]
pub(super) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    /// Split into the body or a logical error
    pub fn into_result(self) -> RepositoryResult<T> {
        self.into_result_or(UNKNOWN_ERROR)
    }

    /// Like [`Envelope::into_result`], with `fallback` used when the store gives no message
    pub fn into_result_or(self, fallback: &str) -> RepositoryResult<T> {
        if self.success {
            Ok(self.body)
        } else {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            Err(RepositoryError::Logical { message })
        }
    }
}

/// Integer that the store may encode as a number or as a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientInt {
    Number(i64),
    Text(String),
}

impl LenientInt {
    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            LenientInt::Number(n) => Ok(n),
            LenientInt::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected integer, got {s:?}"))),
        }
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    LenientInt::deserialize(deserializer)?.into_i64()
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_i64(deserializer)?;
    u32::try_from(value).map_err(|_| serde::de::Error::custom("count out of range"))
}

fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LenientInt>::deserialize(deserializer)?
        .map(LenientInt::into_i64)
        .transpose()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryWire {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub name: String,
}

impl From<CategoryWire> for Category {
    fn from(c: CategoryWire) -> Self {
        Category {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CategoriesBody {
    #[serde(default)]
    pub categories: Vec<CategoryWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FormSummaryWire {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub category_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category_name: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub question_count: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl From<FormSummaryWire> for FormSummary {
    fn from(f: FormSummaryWire) -> Self {
        FormSummary {
            id: f.id,
            title: f.title,
            description: f.description,
            category_id: f.category_id,
            category_name: f.category_name,
            question_count: f.question_count,
            created_at: parse_timestamp(&f.created_at),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FormsBody {
    #[serde(default)]
    pub forms: Vec<FormSummaryWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoredQuestionWire {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FormDetailsWire {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default)]
    pub questions: Vec<StoredQuestionWire>,
}

impl From<FormDetailsWire> for FormDetails {
    fn from(f: FormDetailsWire) -> Self {
        FormDetails {
            id: f.id,
            title: f.title,
            description: f.description,
            category_name: f.category_name,
            created_at: parse_timestamp(&f.created_at),
            questions: f
                .questions
                .into_iter()
                .map(|q| StoredQuestion {
                    id: q.id,
                    text: q.question_text,
                    question_type: q.question_type,
                    options: q.options.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FormDetailsBody {
    #[serde(default)]
    pub form: Option<FormDetailsWire>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CreatedBody {
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub form_id: Option<FormId>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct EmptyBody {}

#[derive(Debug, Serialize)]
pub(super) struct QuestionWire<'a> {
    pub id: u64,
    pub text: &'a str,
    #[serde(rename = "type")]
    pub question_type: &'static str,
    pub options: &'a [String],
}

/// Body of `save_form.php`
#[derive(Debug, Serialize)]
pub(super) struct CreateFormRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub category_id: i64,
    pub questions: Vec<QuestionWire<'a>>,
}

impl<'a> From<&'a NewForm> for CreateFormRequest<'a> {
    fn from(form: &'a NewForm) -> Self {
        CreateFormRequest {
            title: &form.title,
            description: &form.description,
            category_id: form.category_id,
            questions: form
                .questions
                .iter()
                .map(|q| QuestionWire {
                    id: q.id.0,
                    text: &q.text,
                    question_type: q.question_type().as_str(),
                    options: q.options(),
                })
                .collect(),
        }
    }
}

/// Pretty-printed `save_form.php` body for a draft
pub fn form_payload_json(form: &NewForm) -> String {
    serde_json::to_string_pretty(&CreateFormRequest::from(form)).unwrap_or_default()
}

/// Body of `delete_form.php`
#[derive(Debug, Serialize)]
pub(super) struct DeleteFormRequest {
    pub form_id: FormId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Question, QuestionId, QuestionKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_envelope_success_yields_body() {
        let env: Envelope<FormsBody> = serde_json::from_value(json!({
            "success": true,
            "forms": []
        }))
        .unwrap();
        assert!(env.into_result().unwrap().forms.is_empty());
    }

    #[test]
    fn test_envelope_failure_uses_server_message() {
        let env: Envelope<EmptyBody> = serde_json::from_value(json!({
            "success": false,
            "error": "Form not found"
        }))
        .unwrap();
        assert_eq!(
            env.into_result().unwrap_err(),
            RepositoryError::logical("Form not found")
        );
    }

    #[test]
    fn test_envelope_failure_without_message() {
        let env: Envelope<CategoriesBody> =
            serde_json::from_value(json!({ "success": false })).unwrap();
        assert_eq!(
            env.into_result().unwrap_err(),
            RepositoryError::logical("Unknown error")
        );
    }

    #[test]
    fn test_envelope_fallback_only_replaces_blank_message() {
        let blank: Envelope<EmptyBody> =
            serde_json::from_value(json!({ "success": false, "error": "  " })).unwrap();
        assert_eq!(
            blank.into_result_or("Failed to load form").unwrap_err(),
            RepositoryError::logical("Failed to load form")
        );

        let given: Envelope<EmptyBody> =
            serde_json::from_value(json!({ "success": false, "error": "Form not found" }))
                .unwrap();
        assert_eq!(
            given.into_result_or("Failed to load form").unwrap_err(),
            RepositoryError::logical("Form not found")
        );
    }

    #[test]
    fn test_summary_accepts_string_integers() {
        let wire: FormSummaryWire = serde_json::from_value(json!({
            "id": "7",
            "title": "Survey",
            "description": null,
            "category_id": "2",
            "category_name": "External",
            "question_count": "3",
            "created_at": "2024-01-02 10:00:00"
        }))
        .unwrap();
        let summary = FormSummary::from(wire);
        assert_eq!(summary.id, 7);
        assert_eq!(summary.category_id, 2);
        assert_eq!(summary.question_count, 3);
        assert_eq!(summary.description, "");
        assert!(summary.created_at.is_some());
    }

    #[test]
    fn test_summary_rejects_non_numeric_category() {
        let result: Result<FormSummaryWire, _> = serde_json::from_value(json!({
            "id": 1,
            "title": "Survey",
            "category_id": "two",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_details_null_options_become_empty() {
        let wire: FormDetailsWire = serde_json::from_value(json!({
            "id": 3,
            "title": "Onboarding",
            "description": "",
            "category_name": "Internal",
            "created_at": "2024-01-02 10:00:00",
            "questions": [
                {"id": 1, "question_text": "Name?", "question_type": "text", "options": null},
                {"id": "2", "question_text": "Team?", "question_type": "multiple_choice", "options": ["A", "B"]}
            ]
        }))
        .unwrap();
        let details = FormDetails::from(wire);
        assert_eq!(details.questions.len(), 2);
        assert!(details.questions[0].options.is_empty());
        assert_eq!(details.questions[1].id, 2);
        assert_eq!(details.questions[1].options, vec!["A", "B"]);
    }

    #[test]
    fn test_create_request_shape() {
        let form = NewForm {
            title: "Feedback".to_string(),
            description: "Quarterly".to_string(),
            category_id: 2,
            questions: vec![
                Question {
                    id: QuestionId(1),
                    text: "Name?".to_string(),
                    kind: QuestionKind::Text,
                },
                Question {
                    id: QuestionId(2),
                    text: "Rating?".to_string(),
                    kind: QuestionKind::MultipleChoice {
                        options: vec!["Good".to_string(), "Bad".to_string()],
                    },
                },
            ],
        };
        let body = serde_json::to_value(CreateFormRequest::from(&form)).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Feedback",
                "description": "Quarterly",
                "category_id": 2,
                "questions": [
                    {"id": 1, "text": "Name?", "type": "text", "options": []},
                    {"id": 2, "text": "Rating?", "type": "multiple_choice", "options": ["Good", "Bad"]}
                ]
            })
        );
    }

    #[test]
    fn test_payload_json_is_pretty() {
        let form = NewForm {
            title: "T".to_string(),
            description: String::new(),
            category_id: 1,
            questions: Vec::new(),
        };
        let text = form_payload_json(&form);
        assert!(text.contains("\n"));
        assert!(text.contains("\"category_id\": 1"));
    }

    #[test]
    fn test_created_body_form_id() {
        let env: Envelope<CreatedBody> =
            serde_json::from_value(json!({ "success": true, "form_id": "12" })).unwrap();
        assert_eq!(env.into_result().unwrap().form_id, Some(12));
    }
}
