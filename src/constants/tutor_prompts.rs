/// Closing instruction for every explanation prompt.
pub const EXPLANATION_STRUCTURE: &str =
    "Structure: a two-sentence summary followed by a detailed explanation.";

/// Field layout the quiz reply parser depends on. Keep the markers in sync
/// with `services::quiz_parser`.
pub const QUIZ_FORMAT: &str = "Strict Format:
Question: [Text]
A) [Option]
B) [Option]
C) [Option]
D) [Option]
Answer: [A/B/C/D]
Explanation: [Reason]";

pub const ANSWER_MARKER: &str = "Answer:";
pub const EXPLANATION_MARKER: &str = "Explanation:";
