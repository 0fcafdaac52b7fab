use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    quiz_record::{AnswerChoice, AnswerOutcome, LiveQuiz, QuizRecord},
    score::ScoreState,
    syllabus::Syllabus,
    tutoring::{
        Complexity, ExamContext, ExplanationLength, ExplanationResult, Role,
        DEFAULT_ANALOGY_THEME,
    },
};

/// Sidebar selections that shape every explanation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TutorSettings {
    pub exam_context: ExamContext,
    pub analogy_theme: String,
    pub complexity: Complexity,
    pub length: ExplanationLength,
    pub role: Role,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            exam_context: ExamContext::default(),
            analogy_theme: DEFAULT_ANALOGY_THEME.to_string(),
            complexity: Complexity::default(),
            length: ExplanationLength::default(),
            role: Role::default(),
        }
    }
}

/// Everything one learner's session holds. Owned by exactly one session
/// handle and never shared between sessions.
#[derive(Debug)]
pub struct SessionState {
    pub id: Uuid,
    pub settings: TutorSettings,
    pub syllabus: Syllabus,
    pub score: ScoreState,
    pub explanation: Option<ExplanationResult>,
    pub quiz: Option<LiveQuiz>,
    pub credential: Option<SecretString>,
    pub selected_model: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new() -> Self {
        let now = Utc::now();
        let settings = TutorSettings::default();
        Self {
            id: Uuid::new_v4(),
            syllabus: Syllabus::for_exam(settings.exam_context),
            settings,
            score: ScoreState::default(),
            explanation: None,
            quiz: None,
            credential: None,
            selected_model: None,
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }

    /// Switches exam context. A different exam replaces the syllabus with
    /// that exam's defaults; returns whether anything changed.
    pub fn select_exam(&mut self, exam: ExamContext) -> bool {
        if self.settings.exam_context == exam {
            return false;
        }
        self.settings.exam_context = exam;
        self.syllabus = Syllabus::for_exam(exam);
        true
    }

    /// A session-entered credential replaces any earlier one and forces a
    /// fresh model selection.
    pub fn set_credential(&mut self, credential: SecretString) {
        self.credential = Some(credential);
        self.selected_model = None;
    }

    /// Stores a new explanation and drops the quiz built from the old one.
    pub fn install_explanation(&mut self, explanation: ExplanationResult) {
        self.explanation = Some(explanation);
        self.quiz = None;
    }

    /// Replaces any previous quiz, answered or not.
    pub fn install_quiz(&mut self, record: QuizRecord) -> &LiveQuiz {
        self.quiz.insert(LiveQuiz::new(record))
    }

    pub fn submit_answer(&mut self, choice: AnswerChoice) -> Option<AnswerOutcome> {
        let quiz = self.quiz.as_mut()?;
        Some(quiz.submit(choice, &mut self.score))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz_record::QuizState;

    fn record(correct_choice: AnswerChoice) -> QuizRecord {
        QuizRecord {
            prompt_text: "Question: ?\n".to_string(),
            correct_choice,
            explanation: "Because.".to_string(),
            is_well_formed: true,
        }
    }

    #[test]
    fn new_session_starts_on_upsc_with_its_syllabus() {
        let session = SessionState::new();

        assert_eq!(session.settings.exam_context, ExamContext::Upsc);
        assert_eq!(session.settings.analogy_theme, "Cricket");
        assert_eq!(session.syllabus, Syllabus::for_exam(ExamContext::Upsc));
        assert_eq!(session.score, ScoreState::default());
        assert!(session.explanation.is_none());
        assert!(session.quiz.is_none());
        assert!(session.credential.is_none());
    }

    #[test]
    fn selecting_a_new_exam_resets_syllabus() {
        let mut session = SessionState::new();
        session.syllabus.toggle(0);
        session.syllabus.add("Extra");

        assert!(session.select_exam(ExamContext::Ssc));
        assert_eq!(session.syllabus, Syllabus::for_exam(ExamContext::Ssc));
    }

    #[test]
    fn selecting_the_current_exam_keeps_syllabus() {
        let mut session = SessionState::new();
        session.syllabus.toggle(0);

        assert!(!session.select_exam(ExamContext::Upsc));
        assert!(session.syllabus.items()[0].completed);
    }

    #[test]
    fn new_explanation_clears_quiz() {
        let mut session = SessionState::new();
        session.install_explanation(ExplanationResult::new("first".to_string()));
        session.install_quiz(record(AnswerChoice::B));

        session.install_explanation(ExplanationResult::new("second".to_string()));

        assert_eq!(
            session.explanation.as_ref().map(|e| e.body.as_str()),
            Some("second")
        );
        assert!(session.quiz.is_none());
    }

    #[test]
    fn new_quiz_replaces_answered_quiz() {
        let mut session = SessionState::new();
        session.install_quiz(record(AnswerChoice::B));
        session.submit_answer(AnswerChoice::B);

        session.install_quiz(record(AnswerChoice::C));

        let quiz = session.quiz.as_ref().expect("quiz installed");
        assert_eq!(quiz.state, QuizState::AwaitingAnswer);
        assert_eq!(quiz.record.correct_choice, AnswerChoice::C);
        assert_eq!(session.score.attempts_count, 1);
    }

    #[test]
    fn submit_without_quiz_returns_none() {
        let mut session = SessionState::new();
        assert!(session.submit_answer(AnswerChoice::A).is_none());
        assert_eq!(session.score.attempts_count, 0);
    }

    #[test]
    fn setting_credential_clears_selected_model() {
        let mut session = SessionState::new();
        session.selected_model = Some("gemini-pro".to_string());

        session.set_credential(SecretString::from("key".to_string()));

        assert!(session.credential.is_some());
        assert!(session.selected_model.is_none());
    }
}
