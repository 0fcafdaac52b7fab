use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOutcome, ExplanationRequest, ExplanationResult, SessionState},
        dto::{ExplainRequest, QuizDto, SessionDto, SetCredentialRequest, SubmitAnswerRequest},
    },
    repositories::SessionRepository,
    services::{
        model_service::{select_model, TextGenerator},
        prompt_builder::{build_explanation_prompt, build_quiz_prompt},
        quiz_parser::parse_quiz_reply,
        session_service::find_session,
    },
};

/// The explanation/quiz pipeline. Each call holds its session's lock until
/// the model replies, so a session never runs two actions at once.
pub struct TutorService {
    sessions: Arc<dyn SessionRepository>,
    generator: Arc<dyn TextGenerator>,
    config: Arc<Config>,
}

impl TutorService {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        generator: Arc<dyn TextGenerator>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            sessions,
            generator,
            config,
        }
    }

    fn credential_for(&self, session: &SessionState) -> AppResult<SecretString> {
        session
            .credential
            .clone()
            .or_else(|| self.config.api_key.clone())
            .ok_or_else(AppError::missing_credential)
    }

    async fn resolve_model(&self, session: &mut SessionState, api_key: &str) -> String {
        if let Some(model) = &session.selected_model {
            return model.clone();
        }

        let selection = select_model(
            self.generator.as_ref(),
            api_key,
            &self.config.preferred_model,
            &self.config.fallback_model,
        )
        .await;
        if selection.settled {
            log::info!("Session {} will use model {}", session.id, selection.model);
            session.selected_model = Some(selection.model.clone());
        }
        selection.model
    }

    /// Stores a per-session credential and selects the model it will use.
    pub async fn set_credential(
        &self,
        id: &Uuid,
        request: SetCredentialRequest,
    ) -> AppResult<SessionDto> {
        request.validate()?;
        let api_key = request.api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::ValidationError("API key cannot be blank".to_string()));
        }

        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;
        session.set_credential(SecretString::from(api_key.to_string()));
        self.resolve_model(&mut session, api_key).await;
        session.touch();

        Ok(SessionDto::from_state(&session, self.config.has_api_key()))
    }

    pub async fn request_explanation(
        &self,
        id: &Uuid,
        request: ExplainRequest,
    ) -> AppResult<ExplanationResult> {
        request.validate()?;

        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;

        let settings = &session.settings;
        let explanation_request = ExplanationRequest::new(
            &request.concept,
            settings.exam_context,
            &settings.analogy_theme,
            settings.complexity,
            settings.length,
        )?;
        let credential = self.credential_for(&session)?;
        let api_key = credential.expose_secret();
        let model = self.resolve_model(&mut session, api_key).await;

        log::info!(
            "Generating explanation of '{}' for session {}",
            explanation_request.concept(),
            session.id
        );
        let prompt = build_explanation_prompt(&explanation_request);
        let body = self
            .generator
            .generate(api_key, &model, &prompt)
            .await
            .map_err(|e| {
                log::warn!("Explanation failed for session {}: {}", session.id, e);
                AppError::from(e)
            })?;

        let result = ExplanationResult::new(body);
        session.install_explanation(result.clone());
        session.touch();
        Ok(result)
    }

    pub async fn request_quiz(&self, id: &Uuid) -> AppResult<QuizDto> {
        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;

        let explanation = session
            .explanation
            .as_ref()
            .map(|e| e.body.clone())
            .ok_or_else(|| {
                AppError::Conflict("Generate an explanation before requesting a quiz".to_string())
            })?;
        let credential = self.credential_for(&session)?;
        let api_key = credential.expose_secret();
        let model = self.resolve_model(&mut session, api_key).await;

        log::info!("Generating quiz for session {}", session.id);
        let reply = self
            .generator
            .generate(api_key, &model, &build_quiz_prompt(&explanation))
            .await
            .map_err(|e| {
                log::warn!("Quiz generation failed for session {}: {}", session.id, e);
                AppError::from(e)
            })?;

        let record = parse_quiz_reply(&reply);
        if !record.is_well_formed {
            log::warn!(
                "Quiz reply for session {} carried no answer letter; defaulting to {}",
                session.id,
                record.correct_choice
            );
        }

        session.touch();
        Ok(QuizDto::from(session.install_quiz(record)))
    }

    pub async fn submit_answer(
        &self,
        id: &Uuid,
        request: SubmitAnswerRequest,
    ) -> AppResult<AnswerOutcome> {
        let handle = find_session(self.sessions.as_ref(), id).await?;
        let mut session = handle.lock().await;

        let outcome = session
            .submit_answer(request.choice)
            .ok_or_else(|| AppError::Conflict("There is no quiz to answer".to_string()))?;

        if outcome.already_answered {
            log::debug!("Ignoring repeat answer for session {}", session.id);
        } else {
            log::info!(
                "Session {} answered {} (correct: {}), score {}/{}",
                session.id,
                outcome.submitted_choice,
                outcome.is_correct,
                session.score.correct_count,
                session.score.attempts_count
            );
        }
        session.touch();
        Ok(outcome)
    }
}
