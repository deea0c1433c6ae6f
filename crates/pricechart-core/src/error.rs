// File: crates/pricechart-core/src/error.rs
// Summary: Error type for the parsing and configuration boundaries.

use thiserror::Error;

/// Errors raised while reading options or input documents.
///
/// The render pipeline itself never fails: malformed samples are dropped and an
/// empty window renders as an empty model.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("unknown render mode: {0}")]
    UnknownMode(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
