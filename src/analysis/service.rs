use std::path::PathBuf;

use log::info;

use crate::analysis::files::RecordSelection;
use crate::analysis::response::{load_response_file, AnalysisResponse};
use crate::viewer::ViewerError;

/// Something that turns a validated record selection into an analysis response.
pub trait AnalysisService {
    fn analyze(&mut self, selection: &RecordSelection) -> Result<AnalysisResponse, ViewerError>;
}

/// Serves responses the analysis service already produced, stored as `<base>.json`.
///
/// Looks next to the record files unless a fixed directory is configured.
#[derive(Clone, Debug, Default)]
pub struct ReplayService {
    root: Option<PathBuf>,
}

impl ReplayService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn response_path(&self, selection: &RecordSelection) -> PathBuf {
        let dir = self
            .root
            .clone()
            .unwrap_or_else(|| selection.directory());
        dir.join(format!("{}.json", selection.base_name))
    }
}

impl AnalysisService for ReplayService {
    fn analyze(&mut self, selection: &RecordSelection) -> Result<AnalysisResponse, ViewerError> {
        let path = self.response_path(selection);
        info!(
            "replaying analysis for {} ({} annotations) from {}",
            selection.base_name,
            if selection.has_annotations() { "with" } else { "without" },
            path.display()
        );
        load_response_file(&path)
    }
}

#[cfg(test)]
pub struct ManualService {
    queue: std::collections::VecDeque<Result<AnalysisResponse, ViewerError>>,
}

#[cfg(test)]
impl ManualService {
    pub fn new(responses: impl IntoIterator<Item = Result<AnalysisResponse, ViewerError>>) -> Self {
        Self {
            queue: responses.into_iter().collect(),
        }
    }
}

#[cfg(test)]
impl AnalysisService for ManualService {
    fn analyze(&mut self, _selection: &RecordSelection) -> Result<AnalysisResponse, ViewerError> {
        self.queue
            .pop_front()
            .unwrap_or_else(|| Err(ViewerError::Server("no response queued".into())))
    }
}
