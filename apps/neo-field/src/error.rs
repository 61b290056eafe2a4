//! Load and record error types.

/// Dataset-level failures. Any of these ends the session in the Error phase.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The host could not fetch a dataset.
    #[error("failed to fetch {dataset}: {message}")]
    Fetch { dataset: String, message: String },

    /// A dataset was fetched but is not valid JSON of the expected shape.
    #[error("failed to parse {dataset}: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration document was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Why a single record was skipped. Never fatal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    Missing(&'static str),

    #[error("invalid `{field}`: {value}")]
    Invalid { field: &'static str, value: String },
}
