use crate::constants::tutor_prompts::{EXPLANATION_STRUCTURE, QUIZ_FORMAT};
use crate::models::domain::ExplanationRequest;

pub fn build_explanation_prompt(request: &ExplanationRequest) -> String {
    format!(
        "Act as an expert educator for {exam}.\n\
         Explain: \"{concept}\" using the analogy of \"{theme}\".\n\
         Level: {level}. Length: {length}.\n\
         {structure}",
        exam = request.exam_context(),
        concept = request.concept(),
        theme = request.analogy_theme(),
        level = request.complexity(),
        length = request.length(),
        structure = EXPLANATION_STRUCTURE,
    )
}

pub fn build_quiz_prompt(explanation: &str) -> String {
    format!(
        "Based on this text: \"{explanation}\"\n\
         Generate 1 Multiple Choice Question.\n\
         {format}",
        explanation = explanation,
        format = QUIZ_FORMAT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Complexity, ExamContext, ExplanationLength};

    #[test]
    fn explanation_prompt_interpolates_every_field() {
        let request = ExplanationRequest::new(
            "Photosynthesis",
            ExamContext::Ssc,
            "Minecraft",
            Complexity::Advanced,
            ExplanationLength::Long,
        )
        .expect("valid request");

        let prompt = build_explanation_prompt(&request);

        assert_eq!(
            prompt,
            "Act as an expert educator for SSC.\n\
             Explain: \"Photosynthesis\" using the analogy of \"Minecraft\".\n\
             Level: Advanced. Length: Long.\n\
             Structure: a two-sentence summary followed by a detailed explanation."
        );
    }

    #[test]
    fn explanation_prompt_is_deterministic() {
        let request = ExplanationRequest::new(
            "Monsoons",
            ExamContext::Upsc,
            "Cricket",
            Complexity::Basic,
            ExplanationLength::Short,
        )
        .expect("valid request");

        assert_eq!(
            build_explanation_prompt(&request),
            build_explanation_prompt(&request)
        );
    }

    #[test]
    fn quiz_prompt_embeds_explanation_and_layout() {
        let prompt = build_quiz_prompt("Plants cook sunlight like a furnace.");

        assert!(prompt.starts_with("Based on this text: \"Plants cook sunlight like a furnace.\"\n"));
        assert!(prompt.contains("Generate 1 Multiple Choice Question."));
        for line in [
            "Question: [Text]",
            "A) [Option]",
            "B) [Option]",
            "C) [Option]",
            "D) [Option]",
            "Answer: [A/B/C/D]",
            "Explanation: [Reason]",
        ] {
            assert!(prompt.contains(line), "missing layout line {line}");
        }
    }
}
