use thiserror::Error;

pub type ModfeedResult<T> = Result<T, ModfeedError>;

#[derive(Error, Debug)]
pub enum ModfeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Release error: {0}")]
    Release(String),

    #[error("Repack error: {0}")]
    Repack(String),

    /// One or more repositories failed during an update run.
    /// Should exit with code 1.
    #[error("{0} repositories failed to update")]
    UpdateFailed(usize),
}
