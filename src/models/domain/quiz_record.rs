use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::domain::score::ScoreState;

/// One of the four option letters of a multiple-choice question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum AnswerChoice {
    #[default]
    A,
    B,
    C,
    D,
}

impl AnswerChoice {
    pub const ALL: [AnswerChoice; 4] = [
        AnswerChoice::A,
        AnswerChoice::B,
        AnswerChoice::C,
        AnswerChoice::D,
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(AnswerChoice::A),
            'B' => Some(AnswerChoice::B),
            'C' => Some(AnswerChoice::C),
            'D' => Some(AnswerChoice::D),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            AnswerChoice::A => 'A',
            AnswerChoice::B => 'B',
            AnswerChoice::C => 'C',
            AnswerChoice::D => 'D',
        }
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for AnswerChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => AnswerChoice::from_letter(letter)
                .ok_or_else(|| format!("'{}' is not one of A, B, C or D", trimmed)),
            _ => Err(format!("'{}' is not one of A, B, C or D", trimmed)),
        }
    }
}

impl TryFrom<String> for AnswerChoice {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AnswerChoice> for String {
    fn from(choice: AnswerChoice) -> Self {
        choice.to_string()
    }
}

/// A multiple-choice question derived from one model reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizRecord {
    /// Question stem and options: the reply text before the first answer marker.
    pub prompt_text: String,
    pub correct_choice: AnswerChoice,
    pub explanation: String,
    /// False when `correct_choice` is the fallback rather than a letter the
    /// model actually gave.
    pub is_well_formed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizState {
    AwaitingAnswer,
    Answered {
        choice: AnswerChoice,
        is_correct: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub submitted_choice: AnswerChoice,
    pub is_correct: bool,
    pub correct_choice: AnswerChoice,
    pub explanation: String,
    /// Set when the quiz had already been answered and nothing was scored.
    pub already_answered: bool,
}

/// The quiz currently shown to a session, with its answer state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiveQuiz {
    pub record: QuizRecord,
    pub state: QuizState,
}

impl LiveQuiz {
    pub fn new(record: QuizRecord) -> Self {
        Self {
            record,
            state: QuizState::AwaitingAnswer,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.state, QuizState::Answered { .. })
    }

    /// Scores the first submission only. Later submissions report the
    /// first outcome and leave `score` untouched.
    pub fn submit(&mut self, choice: AnswerChoice, score: &mut ScoreState) -> AnswerOutcome {
        match self.state {
            QuizState::Answered {
                choice: first_choice,
                is_correct,
            } => self.outcome(first_choice, is_correct, true),
            QuizState::AwaitingAnswer => {
                let is_correct = choice == self.record.correct_choice;
                score.record(is_correct);
                self.state = QuizState::Answered { choice, is_correct };
                self.outcome(choice, is_correct, false)
            }
        }
    }

    fn outcome(&self, choice: AnswerChoice, is_correct: bool, already_answered: bool) -> AnswerOutcome {
        AnswerOutcome {
            submitted_choice: choice,
            is_correct,
            correct_choice: self.record.correct_choice,
            explanation: self.record.explanation.clone(),
            already_answered,
        }
    }
}
