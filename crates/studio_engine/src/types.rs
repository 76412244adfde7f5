use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Status value of a JSON action the service accepted.
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Uploaded,
    Processed,
}

impl Section {
    /// First path segment of the per-file delete endpoint.
    pub fn delete_route(self) -> &'static str {
        match self {
            Section::Uploaded => "delete_uploaded",
            Section::Processed => "delete_processed",
        }
    }
}

/// Body of `/select_video`, `/stop_video` and `/delete_all_uploads`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ActionReply {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Body of `/get_status`. The status is an open string owned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusReport {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub filename: String,
    pub section: Section,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageListing {
    pub videos: Vec<String>,
    pub files: Vec<ListedFile>,
    pub processing_active: bool,
    pub status_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SelectVideo(Result<ActionReply, ServiceError>),
    StopVideo(Result<ActionReply, ServiceError>),
    DeleteFile {
        filename: String,
        section: Section,
        result: Result<(), ServiceError>,
    },
    DeleteAllUploads(Result<ActionReply, ServiceError>),
    Status(Result<StatusReport, ServiceError>),
    PageLoaded(Result<PageListing, ServiceError>),
    Downloaded {
        filename: String,
        result: Result<PathBuf, ServiceError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    /// The body was not the JSON (or HTML) the endpoint is expected to return.
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
