//! Prompt Builder — serializes the conversation into a rubric-driven
//! instruction plus the schema-derived format directive.
//!
//! `build_prompt` is a pure function of the record and the selected rubric:
//! identical records yield identical prompts.

use crate::schema;
use crate::transcript::InterviewRecord;

/// System framing for the evaluation call. Enforces JSON-only output.
pub const EVALUATION_SYSTEM: &str = "You are an experienced technical interviewer \
    writing a structured evaluation of a recorded interview. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Named rubric wording variants. The evaluation dimensions are identical;
/// only the level of instruction detail differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricStyle {
    Detailed,
    Concise,
}

impl RubricStyle {
    pub fn text(self) -> &'static str {
        match self {
            RubricStyle::Detailed => DETAILED_RUBRIC,
            RubricStyle::Concise => CONCISE_RUBRIC,
        }
    }
}

const DETAILED_RUBRIC: &str = "\
Analyze the interview transcript above and generate a detailed evaluation report.
Score the candidate's overall performance out of 10.
Provide concise and structured responses for the following dimensions:
1. Overall Summary (a narrative view of the whole interview)
2. Technical Evaluation (assess technical knowledge, problem-solving, relevant skills)
3. Non-Technical Evaluation (evaluate communication, teamwork, adaptability)
4. Strengths & Areas for Improvement (highlight key strengths, identify gaps, suggest improvements)
5. Final Evaluation (summarize suitability for the role)
6. Next Steps (recommend follow-up actions)";

const CONCISE_RUBRIC: &str = "\
Evaluate the interview transcript above. Score overall performance out of 10
and write short narratives for: overall summary, technical evaluation,
non-technical evaluation, strengths and areas for improvement, final
evaluation, and next steps.";

/// Assembles the full prompt: labeled Q/A blocks in original order, the
/// rubric, then the format directive derived from the evaluation schema.
pub fn build_prompt(record: &InterviewRecord, rubric: RubricStyle) -> String {
    let mut transcript = String::new();
    for entry in &record.conversation {
        transcript.push_str("Q: ");
        transcript.push_str(&entry.question);
        transcript.push_str("\nA: ");
        transcript.push_str(&entry.answer);
        transcript.push_str("\n\n");
    }

    format!(
        "Interview Transcript:\n{transcript}{rubric}\n\n{directive}",
        rubric = rubric.text(),
        directive = schema::format_directive(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::ConversationEntry;

    fn record() -> InterviewRecord {
        InterviewRecord {
            email: "a@x.com".to_string(),
            name: "Alice".to_string(),
            role: "Engineer".to_string(),
            date: "2024-01-01".to_string(),
            conversation: vec![
                ConversationEntry {
                    question: "What is ownership?".to_string(),
                    answer: "Each value has a single owner.".to_string(),
                },
                ConversationEntry {
                    question: "What is borrowing?".to_string(),
                    answer: "References without taking ownership.".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_build_prompt_is_idempotent() {
        let r = record();
        assert_eq!(
            build_prompt(&r, RubricStyle::Detailed),
            build_prompt(&r, RubricStyle::Detailed)
        );
    }

    #[test]
    fn test_entries_appear_labeled_and_in_order() {
        let prompt = build_prompt(&record(), RubricStyle::Detailed);
        let first = prompt.find("Q: What is ownership?").unwrap();
        let second = prompt.find("Q: What is borrowing?").unwrap();
        assert!(first < second);
        assert!(prompt.contains("A: Each value has a single owner."));
    }

    #[test]
    fn test_blocks_separated_by_blank_lines() {
        let prompt = build_prompt(&record(), RubricStyle::Detailed);
        assert!(prompt.contains("ownership.\n\nQ: What is borrowing?"));
    }

    #[test]
    fn test_prompt_ends_with_schema_directive() {
        let prompt = build_prompt(&record(), RubricStyle::Concise);
        for field in crate::schema::EVALUATION_FIELDS {
            assert!(prompt.contains(field.key), "directive missing {}", field.key);
        }
        // Directive comes after the rubric
        let rubric_pos = prompt.find("out of 10").unwrap();
        let directive_pos = prompt.find("single JSON object").unwrap();
        assert!(rubric_pos < directive_pos);
    }

    #[test]
    fn test_rubric_styles_differ_but_share_dimensions() {
        let detailed = build_prompt(&record(), RubricStyle::Detailed);
        let concise = build_prompt(&record(), RubricStyle::Concise);
        assert_ne!(detailed, concise);
        for prompt in [&detailed, &concise] {
            assert!(prompt.to_lowercase().contains("technical evaluation"));
            assert!(prompt.to_lowercase().contains("next steps"));
        }
    }
}
