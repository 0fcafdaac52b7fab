pub mod syllabi;
pub mod tutor_prompts;
