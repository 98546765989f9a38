use thiserror::Error;

use crate::analysis::UploadError;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("peak #{position} points at sample {index}, outside a signal of {len} samples")]
    PeakOutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },
    #[error("peak indices must be strictly increasing: peak #{position} is {index} after {previous}")]
    PeaksNotIncreasing {
        position: usize,
        previous: usize,
        index: usize,
    },
    /// Logical error reported by the analysis service; shown to the user verbatim.
    #[error("{0}")]
    Server(String),
    #[error("failed to read analysis response: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed analysis response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render snapshot: {0}")]
    Plot(String),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ViewerError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ViewerError::Plot(format!("{value:?}"))
    }
}

impl From<image::ImageError> for ViewerError {
    fn from(value: image::ImageError) -> Self {
        ViewerError::Plot(value.to_string())
    }
}
