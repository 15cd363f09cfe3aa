use thiserror::Error;

pub type Result<T, E = VizError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VizError {
    /// A dataset id that does not resolve within the algorithm's available datasets.
    #[error("algorithm '{algorithm_id}' has no dataset '{dataset_id}'")]
    DanglingReference {
        algorithm_id: String,
        dataset_id: String,
    },

    #[error("duplicate algorithm id '{id}'")]
    DuplicateAlgorithm { id: String },

    #[error("algorithm '{algorithm_id}' lists dataset '{dataset_id}' more than once")]
    DuplicateDataset {
        algorithm_id: String,
        dataset_id: String,
    },

    #[error("algorithm '{algorithm_id}': dataset '{dataset_id}' is invalid ({reason})")]
    InvalidDataset {
        algorithm_id: String,
        dataset_id: String,
        reason: &'static str,
    },

    #[error("algorithm '{algorithm_id}' has no datasets")]
    NoDatasets { algorithm_id: String },

    #[error("algorithm '{algorithm_id}': epoch count must be >= 1")]
    InvalidEpochs { algorithm_id: String },

    #[error("algorithm '{algorithm_id}': {epochs} epochs exceeds max_epochs {max_epochs}")]
    EpochsOutOfRange {
        algorithm_id: String,
        epochs: u32,
        max_epochs: u32,
    },

    #[error("epoch count {epochs} is not one of the offered choices {choices:?}")]
    UnsupportedEpochCount { epochs: u32, choices: Vec<u32> },

    #[error("algorithm '{algorithm_id}': iterations out of sync ({detail})")]
    IterationsOutOfSync {
        algorithm_id: String,
        detail: String,
    },

    #[error("algorithm '{algorithm_id}': epoch {epoch} has a different metric set than epoch 1")]
    InconsistentMetrics { algorithm_id: String, epoch: u32 },

    #[error("unknown {dimension} filter '{value}'")]
    UnknownFilter {
        dimension: &'static str,
        value: String,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VizError {
    pub fn dangling(algorithm_id: &str, dataset_id: &str) -> Self {
        VizError::DanglingReference {
            algorithm_id: algorithm_id.to_string(),
            dataset_id: dataset_id.to_string(),
        }
    }
}
