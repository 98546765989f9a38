// src/analysis/mod.rs
// Boundary with the external analysis service: record file checks, response parsing, replay.
pub mod files;
pub mod response;
pub mod service;

pub use files::{parse_path_list, validate_record_files, UploadError};
pub use response::{load_response_file, AnalysisResponse};
pub use service::{AnalysisService, ReplayService};
