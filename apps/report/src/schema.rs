//! The evaluation schema — the single source of truth shared by the Prompt
//! Builder, the Response Parser, and the Report Renderer.
//!
//! `EVALUATION_FIELDS` declares every field's JSON key, report heading, and
//! kind. The prompt's format directive is rendered from this table, the
//! parser validates against it, and the renderer orders sections by it, so
//! what is requested, what is accepted, and what is printed cannot drift.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

/// How a schema field is typed in the JSON payload and treated in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric score from 0 to 10. Rendered as a labeled line, not a section.
    Score,
    /// Free-text narrative. Rendered as a heading followed by body text.
    Narrative,
}

/// One declared field of the evaluation payload.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key the model must emit and the parser requires.
    pub key: &'static str,
    /// Section heading used in the rendered report.
    pub heading: &'static str,
    pub kind: FieldKind,
}

/// Declared field order is rendering order.
pub const EVALUATION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "performance_score",
        heading: "Performance Score",
        kind: FieldKind::Score,
    },
    FieldSpec {
        key: "overall_summary",
        heading: "Overall Summary",
        kind: FieldKind::Narrative,
    },
    FieldSpec {
        key: "technical_evaluation",
        heading: "Technical Evaluation",
        kind: FieldKind::Narrative,
    },
    FieldSpec {
        key: "non_technical_evaluation",
        heading: "Non-Technical Evaluation",
        kind: FieldKind::Narrative,
    },
    FieldSpec {
        key: "strengths_areas_for_improvement",
        heading: "Strengths & Areas for Improvement",
        kind: FieldKind::Narrative,
    },
    FieldSpec {
        key: "final_evaluation",
        heading: "Final Evaluation",
        kind: FieldKind::Narrative,
    },
    FieldSpec {
        key: "next_steps",
        heading: "Next Steps",
        kind: FieldKind::Narrative,
    },
];

/// The model's structured judgment. Produced once per run by the Response
/// Parser, consumed only by the Report Renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub performance_score: f64,
    pub overall_summary: String,
    pub technical_evaluation: String,
    pub non_technical_evaluation: String,
    pub strengths_areas_for_improvement: String,
    pub final_evaluation: String,
    pub next_steps: String,
}

impl EvaluationResult {
    /// Narrative sections as `(heading, body)` pairs in declared field order.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        EVALUATION_FIELDS
            .iter()
            .filter(|f| f.kind == FieldKind::Narrative)
            .filter_map(|f| self.narrative(f.key).map(|body| (f.heading, body)))
            .collect()
    }

    fn narrative(&self, key: &str) -> Option<&str> {
        match key {
            "overall_summary" => Some(&self.overall_summary),
            "technical_evaluation" => Some(&self.technical_evaluation),
            "non_technical_evaluation" => Some(&self.non_technical_evaluation),
            "strengths_areas_for_improvement" => Some(&self.strengths_areas_for_improvement),
            "final_evaluation" => Some(&self.final_evaluation),
            "next_steps" => Some(&self.next_steps),
            _ => None,
        }
    }
}

/// Renders the machine-readable format directive appended to every prompt.
///
/// Generated mechanically from `EVALUATION_FIELDS`: adding a field to the
/// table changes the directive without touching this function.
pub fn format_directive() -> String {
    let mut out = String::from(
        "Respond with a single JSON object and nothing else. \
         Do not wrap the object in markdown code fences. \
         The object must contain exactly these fields:\n",
    );
    for field in EVALUATION_FIELDS {
        let ty = match field.kind {
            FieldKind::Score => "a number from 0 to 10",
            FieldKind::Narrative => "a string",
        };
        let _ = writeln!(out, "- \"{}\": {} ({})", field.key, ty, field.heading);
    }
    out
}

/// Fixture used across module tests.
#[cfg(test)]
pub fn sample_evaluation() -> EvaluationResult {
    EvaluationResult {
        performance_score: 8.0,
        overall_summary: "Strong candidate with solid fundamentals.".to_string(),
        technical_evaluation: "Good grasp of systems concepts.".to_string(),
        non_technical_evaluation: "Clear communicator.".to_string(),
        strengths_areas_for_improvement: "Strong debugging; improve estimation.".to_string(),
        final_evaluation: "Suitable for the role.".to_string(),
        next_steps: "Proceed to onsite.".to_string(),
    }
}
