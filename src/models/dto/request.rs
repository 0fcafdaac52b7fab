use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{AnswerChoice, Complexity, ExamContext, ExplanationLength, Role};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExplainRequest {
    #[validate(length(max = 4000))]
    #[serde(default)]
    pub concept: String,
}

/// Partial update of the sidebar selections; absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    pub exam_context: Option<ExamContext>,

    #[validate(length(min = 1, max = 60))]
    pub analogy_theme: Option<String>,

    pub complexity: Option<Complexity>,
    pub length: Option<ExplanationLength>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetCredentialRequest {
    #[validate(length(min = 1, max = 512))]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAnswerRequest {
    pub choice: AnswerChoice,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTopicRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_settings_accepts_partial_payload() {
        let request: UpdateSettingsRequest =
            serde_json::from_str(r#"{"exam_context":"SSC","role":"Professor"}"#)
                .expect("partial payload parses");

        assert_eq!(request.exam_context, Some(ExamContext::Ssc));
        assert_eq!(request.role, Some(Role::Professor));
        assert!(request.analogy_theme.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_settings_rejects_empty_theme() {
        let request = UpdateSettingsRequest {
            analogy_theme: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn submit_answer_parses_lowercase_letter() {
        let request: SubmitAnswerRequest =
            serde_json::from_str(r#"{"choice":"c"}"#).expect("choice parses");
        assert_eq!(request.choice, AnswerChoice::C);

        assert!(serde_json::from_str::<SubmitAnswerRequest>(r#"{"choice":"E"}"#).is_err());
    }

    #[test]
    fn explain_request_defaults_missing_concept_to_empty() {
        let request: ExplainRequest = serde_json::from_str("{}").expect("empty body parses");
        assert_eq!(request.concept, "");
    }

    #[test]
    fn credential_must_not_be_empty() {
        let request = SetCredentialRequest {
            api_key: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
