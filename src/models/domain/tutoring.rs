use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const ANALOGY_THEME_PRESETS: [&str; 5] = ["Minecraft", "Cricket", "Marvel", "Cooking", "K-Pop"];
pub const DEFAULT_ANALOGY_THEME: &str = "Cricket";

/// Target curriculum that frames the explanation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ExamContext {
    School,
    #[serde(rename = "SSC")]
    Ssc,
    #[default]
    #[serde(rename = "UPSC")]
    Upsc,
    General,
}

impl ExamContext {
    pub const ALL: [ExamContext; 4] = [
        ExamContext::School,
        ExamContext::Ssc,
        ExamContext::Upsc,
        ExamContext::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExamContext::School => "School",
            ExamContext::Ssc => "SSC",
            ExamContext::Upsc => "UPSC",
            ExamContext::General => "General",
        }
    }
}

impl fmt::Display for ExamContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Complexity {
    Basic,
    #[default]
    Intermediate,
    Advanced,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [
        Complexity::Basic,
        Complexity::Intermediate,
        Complexity::Advanced,
    ];
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Complexity::Basic => "Basic",
            Complexity::Intermediate => "Intermediate",
            Complexity::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ExplanationLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ExplanationLength {
    pub const ALL: [ExplanationLength; 3] = [
        ExplanationLength::Short,
        ExplanationLength::Medium,
        ExplanationLength::Long,
    ];
}

impl fmt::Display for ExplanationLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExplanationLength::Short => "Short",
            ExplanationLength::Medium => "Medium",
            ExplanationLength::Long => "Long",
        };
        f.write_str(label)
    }
}

/// Who is looking at the session. Professors curate the syllabus,
/// students tick items off and take quizzes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Role {
    #[default]
    Student,
    Professor,
}

/// Inputs for a single explanation call. Only constructible with a
/// non-blank concept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplanationRequest {
    concept: String,
    exam_context: ExamContext,
    analogy_theme: String,
    complexity: Complexity,
    length: ExplanationLength,
}

impl ExplanationRequest {
    pub fn new(
        concept: &str,
        exam_context: ExamContext,
        analogy_theme: &str,
        complexity: Complexity,
        length: ExplanationLength,
    ) -> AppResult<Self> {
        let concept = concept.trim();
        if concept.is_empty() {
            return Err(AppError::ValidationError(
                "Enter a concept to explain".to_string(),
            ));
        }

        Ok(Self {
            concept: concept.to_string(),
            exam_context,
            analogy_theme: analogy_theme.trim().to_string(),
            complexity,
            length,
        })
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn exam_context(&self) -> ExamContext {
        self.exam_context
    }

    pub fn analogy_theme(&self) -> &str {
        &self.analogy_theme
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn length(&self) -> ExplanationLength {
        self.length
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExplanationResult {
    pub body: String,
    pub generated_at: DateTime<Utc>,
}

impl ExplanationResult {
    pub fn new(body: String) -> Self {
        Self {
            body,
            generated_at: Utc::now(),
        }
    }
}
