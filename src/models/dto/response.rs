use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    tutoring::ANALOGY_THEME_PRESETS, AnswerChoice, Complexity, ExamContext, ExplanationLength,
    ExplanationResult, LiveQuiz, QuizState, Role, ScoreState, SessionState, Syllabus,
    SyllabusItem, SyllabusProgress, TutorSettings,
};

#[derive(Debug, Clone, Serialize)]
pub struct SyllabusDto {
    pub items: Vec<SyllabusItem>,
    pub progress: SyllabusProgress,
}

impl From<&Syllabus> for SyllabusDto {
    fn from(syllabus: &Syllabus) -> Self {
        SyllabusDto {
            items: syllabus.items().to_vec(),
            progress: syllabus.progress(),
        }
    }
}

/// Read-only rendering of the live quiz. The answer and its rationale stay
/// hidden until the quiz has been answered.
#[derive(Debug, Clone, Serialize)]
pub struct QuizDto {
    pub prompt_text: String,
    pub is_well_formed: bool,
    pub answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_choice: Option<AnswerChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_choice: Option<AnswerChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl From<&LiveQuiz> for QuizDto {
    fn from(quiz: &LiveQuiz) -> Self {
        let (submitted_choice, is_correct) = match quiz.state {
            QuizState::AwaitingAnswer => (None, None),
            QuizState::Answered { choice, is_correct } => (Some(choice), Some(is_correct)),
        };
        let answered = quiz.is_answered();

        QuizDto {
            prompt_text: quiz.record.prompt_text.clone(),
            is_well_formed: quiz.record.is_well_formed,
            answered,
            submitted_choice,
            is_correct,
            correct_choice: answered.then_some(quiz.record.correct_choice),
            explanation: answered.then(|| quiz.record.explanation.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDto {
    pub session_id: Uuid,
    pub settings: TutorSettings,
    pub syllabus: SyllabusDto,
    pub score: ScoreState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<ExplanationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizDto>,
    pub credential_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionDto {
    /// `env_credential` tells whether a server-wide key backs sessions that
    /// have not entered their own.
    pub fn from_state(session: &SessionState, env_credential: bool) -> Self {
        SessionDto {
            session_id: session.id,
            settings: session.settings.clone(),
            syllabus: SyllabusDto::from(&session.syllabus),
            score: session.score,
            explanation: session.explanation.clone(),
            quiz: session.quiz.as_ref().map(QuizDto::from),
            credential_configured: env_credential || session.credential.is_some(),
            model: session.selected_model.clone(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsDto {
    pub exam_contexts: Vec<ExamContext>,
    pub analogy_themes: Vec<&'static str>,
    pub complexities: Vec<Complexity>,
    pub lengths: Vec<ExplanationLength>,
    pub roles: Vec<Role>,
}

impl Default for OptionsDto {
    fn default() -> Self {
        OptionsDto {
            exam_contexts: ExamContext::ALL.to_vec(),
            analogy_themes: ANALOGY_THEME_PRESETS.to_vec(),
            complexities: Complexity::ALL.to_vec(),
            lengths: ExplanationLength::ALL.to_vec(),
            roles: vec![Role::Student, Role::Professor],
        }
    }
}
