pub mod quiz_record;
pub mod score;
pub mod session;
pub mod syllabus;
pub mod tutoring;

pub use quiz_record::{AnswerChoice, AnswerOutcome, LiveQuiz, QuizRecord, QuizState};
pub use score::ScoreState;
pub use session::{SessionState, TutorSettings};
pub use syllabus::{Syllabus, SyllabusItem, SyllabusProgress};
pub use tutoring::{
    Complexity, ExamContext, ExplanationLength, ExplanationRequest, ExplanationResult, Role,
};
