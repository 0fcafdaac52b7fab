use crate::models::domain::tutoring::ExamContext;

pub const SCHOOL_SYLLABUS: [&str; 3] = [
    "Photosynthesis (Bio)",
    "Newton's Laws (Physics)",
    "Algebra Basics (Math)",
];

pub const SSC_SYLLABUS: [&str; 3] = [
    "Number System",
    "Reasoning Analogies",
    "General Awareness",
];

pub const UPSC_SYLLABUS: [&str; 3] = [
    "Indian Polity (Articles)",
    "Modern History (1857 Revolt)",
    "Geography (Monsoons)",
];

pub const GENERAL_SYLLABUS: [&str; 3] = [
    "Artificial Intelligence",
    "Climate Change",
    "Blockchain",
];

pub fn default_topics(exam: ExamContext) -> &'static [&'static str] {
    match exam {
        ExamContext::School => &SCHOOL_SYLLABUS,
        ExamContext::Ssc => &SSC_SYLLABUS,
        ExamContext::Upsc => &UPSC_SYLLABUS,
        ExamContext::General => &GENERAL_SYLLABUS,
    }
}
