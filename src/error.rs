/// Errors raised while saving or loading statistics.
///
/// Computing statistics never fails; empty rosters and empty event
/// collections simply produce zeros.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// The persisted team could not be encoded or decoded.
    #[error("invalid team json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
