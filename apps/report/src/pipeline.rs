//! Pipeline — the linear stage sequence behind every run:
//! Load → Build Prompt → Request → Parse → Render. No branching, no
//! looping, no retry between stages; the first failure aborts the
//! remaining stages. In particular, a transcript that fails validation
//! aborts before any network call.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::ReportError;
use crate::llm::Evaluator;
use crate::prompt::{self, RubricStyle};
use crate::render::{self, LayoutStyle, PageConfig};
use crate::transcript::InterviewRecord;
use crate::{parse, schema};

/// Per-run rendering and prompting choices, resolved from configuration.
pub struct ReportOptions {
    pub rubric: RubricStyle,
    pub layout: LayoutStyle,
    pub output_dir: PathBuf,
    pub page: PageConfig,
}

impl ReportOptions {
    pub fn new(rubric: RubricStyle, layout: LayoutStyle, output_dir: &Path) -> Self {
        ReportOptions {
            rubric,
            layout,
            output_dir: output_dir.to_path_buf(),
            page: PageConfig::a4(),
        }
    }
}

/// Loads and validates the transcript at `path`, then runs the evaluation.
/// Validation failures return before the evaluator is ever consulted.
pub async fn load_and_run(
    path: &Path,
    evaluator: &dyn Evaluator,
    options: &ReportOptions,
) -> Result<PathBuf, ReportError> {
    let record = InterviewRecord::load(path)?;
    info!(
        candidate = %record.name,
        entries = record.conversation.len(),
        "transcript loaded"
    );
    run(&record, evaluator, options).await
}

/// Runs one evaluation end to end and returns the path of the written
/// report. The evaluator is a trait object so tests can stub the service.
pub async fn run(
    record: &InterviewRecord,
    evaluator: &dyn Evaluator,
    options: &ReportOptions,
) -> Result<PathBuf, ReportError> {
    let prompt = prompt::build_prompt(record, options.rubric);
    debug!(chars = prompt.len(), "prompt assembled");

    let raw = evaluator.evaluate(&prompt).await?;
    debug!(chars = raw.len(), "raw response received");

    let evaluation: schema::EvaluationResult = parse::parse_evaluation(&raw)?;
    info!(sections = evaluation.sections().len(), "evaluation parsed");

    let document = render::compose(record, &evaluation, options.layout);
    let path = options.output_dir.join(render::report_filename(&record.name));
    render::write_pdf(&document, &path, &options.page)?;

    info!("report saved as {}", path.display());
    Ok(path)
}
