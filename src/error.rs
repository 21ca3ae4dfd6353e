//! Error taxonomy for drill rendering.
//!
//! Configuration and data errors are fatal and surface before (or instead of)
//! a saved document. Geometry errors are local: the field view recovers from
//! them by skipping the offending decoration.

/// Degenerate vector math encountered while building a decoration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("cannot normalize a zero-length vector ({x}, {y})")]
    ZeroLength { x: f64, y: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum DrillError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("bad rank data for {rank:?}: {reason}")]
    Data { rank: String, reason: String },

    #[error(
        "command listing for move {move_index} overflows the page \
         (lowest baseline {lowest_baseline:.1}pt, bottom margin {bottom_margin:.1}pt)"
    )]
    LayoutOverflow {
        move_index: usize,
        lowest_baseline: f64,
        bottom_margin: f64,
    },

    #[error("page {0} does not belong to this document")]
    UnknownPage(usize),

    #[error("move {0} is not part of this drill")]
    UnknownMove(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to persist document: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DrillError>;

impl DrillError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        DrillError::Configuration(msg.into())
    }

    pub(crate) fn data(rank: &str, reason: impl Into<String>) -> Self {
        DrillError::Data {
            rank: rank.to_string(),
            reason: reason.into(),
        }
    }
}
