use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an analysis pass. Per-value problems (bad ratings,
/// empty comments) are recovered during cleaning and never surface here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("required column '{column}' is missing from the review table")]
    MissingColumn { column: &'static str },

    #[error("failed to open review table {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed review table: {0}")]
    Csv(#[from] csv::Error),
}
