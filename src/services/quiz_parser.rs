//! Best-effort extraction of a [`QuizRecord`] from a free-text model reply.
//!
//! The parser never fails. Missing fields fall back to an empty explanation
//! and answer `A`, and `is_well_formed` records whether the model actually
//! supplied an answer letter.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::tutor_prompts::{ANSWER_MARKER, EXPLANATION_MARKER};
use crate::models::domain::{AnswerChoice, QuizRecord};

// Applied to the text right after the first answer marker.
static ANSWER_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([a-d])\b").expect("ANSWER_LETTER is a valid regex pattern")
});

pub fn parse_quiz_reply(reply: &str) -> QuizRecord {
    let (prompt_text, after_marker) = match reply.find(ANSWER_MARKER) {
        Some(pos) => (&reply[..pos], Some(&reply[pos + ANSWER_MARKER.len()..])),
        None => (reply, None),
    };

    let extracted = after_marker.and_then(extract_answer_letter);

    let explanation = reply
        .rfind(EXPLANATION_MARKER)
        .map(|pos| reply[pos + EXPLANATION_MARKER.len()..].trim().to_string())
        .unwrap_or_default();

    QuizRecord {
        prompt_text: prompt_text.to_string(),
        correct_choice: extracted.unwrap_or_default(),
        explanation,
        is_well_formed: extracted.is_some(),
    }
}

fn extract_answer_letter(text: &str) -> Option<AnswerChoice> {
    ANSWER_LETTER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerChoice::from_letter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let reply = "Question: What is 2+2?\nA) 3\nB) 4\nC) 5\nD) 6\nAnswer: B\nExplanation: Basic arithmetic.";

        let record = parse_quiz_reply(reply);

        assert_eq!(record.correct_choice, AnswerChoice::B);
        assert_eq!(record.explanation, "Basic arithmetic.");
        assert!(record.is_well_formed);
        assert_eq!(
            record.prompt_text,
            "Question: What is 2+2?\nA) 3\nB) 4\nC) 5\nD) 6\n"
        );
    }

    #[test]
    fn unstructured_reply_falls_back_to_defaults() {
        let reply = "Some rambling text with no structure.";

        let record = parse_quiz_reply(reply);

        assert_eq!(record.correct_choice, AnswerChoice::A);
        assert_eq!(record.explanation, "");
        assert!(!record.is_well_formed);
        assert_eq!(record.prompt_text, reply);
    }

    #[test]
    fn answer_letter_ignores_case_and_whitespace() {
        for (reply, expected) in [
            ("Q\nAnswer: c", AnswerChoice::C),
            ("Q\nAnswer:d\n", AnswerChoice::D),
            ("Q\nAnswer:   \n  B)\nExplanation: x", AnswerChoice::B),
            ("Q\nAnswer:\tA.", AnswerChoice::A),
        ] {
            let record = parse_quiz_reply(reply);
            assert_eq!(record.correct_choice, expected, "reply {reply:?}");
            assert!(record.is_well_formed, "reply {reply:?}");
        }
    }

    #[test]
    fn marker_without_valid_letter_is_not_well_formed() {
        for reply in ["Q\nAnswer: E", "Q\nAnswer: Banana", "Q\nAnswer:", "Q\nAnswer: see above"] {
            let record = parse_quiz_reply(reply);
            assert_eq!(record.correct_choice, AnswerChoice::A, "reply {reply:?}");
            assert!(!record.is_well_formed, "reply {reply:?}");
            assert_eq!(record.prompt_text, "Q\n");
        }
    }

    #[test]
    fn prompt_text_stops_at_first_answer_marker() {
        let reply = "Stem\nA) x\nAnswer: C\nrecap\nAnswer: D\nExplanation: why";

        let record = parse_quiz_reply(reply);

        assert_eq!(record.prompt_text, "Stem\nA) x\n");
        assert!(!record.prompt_text.contains(ANSWER_MARKER));
        assert_eq!(record.correct_choice, AnswerChoice::C);
    }

    #[test]
    fn explanation_uses_last_marker() {
        let reply = "Explanation: ignore me\nQuestion?\nAnswer: A\nExplanation: first\nExplanation: final one ";

        let record = parse_quiz_reply(reply);

        assert_eq!(record.explanation, "final one");
    }

    #[test]
    fn explanation_without_answer_marker_is_still_extracted() {
        let record = parse_quiz_reply("Question?\nExplanation: because");

        assert_eq!(record.explanation, "because");
        assert!(!record.is_well_formed);
        assert_eq!(record.prompt_text, "Question?\nExplanation: because");
    }

    #[test]
    fn lowercase_marker_is_not_an_answer_marker() {
        let record = parse_quiz_reply("Question?\nanswer: B");

        assert_eq!(record.correct_choice, AnswerChoice::A);
        assert!(!record.is_well_formed);
        assert_eq!(record.prompt_text, "Question?\nanswer: B");
    }

    #[test]
    fn empty_reply_yields_empty_record() {
        let record = parse_quiz_reply("");

        assert_eq!(record.prompt_text, "");
        assert_eq!(record.explanation, "");
        assert_eq!(record.correct_choice, AnswerChoice::A);
        assert!(!record.is_well_formed);
    }
}
