use crate::{ConfirmRequest, PageListing, Section};

/// How the processing service answered a JSON action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `{"status": "success"}`.
    Success,
    /// Any other status, with the optional server-supplied message.
    Rejected { message: Option<String> },
    /// Network failure or a body that was not the expected JSON.
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The session started; load the listing and begin polling.
    PageOpened,
    /// A page load finished.
    PageLoaded(PageListing),
    /// A page load could not reach the service.
    PageLoadFailed,
    /// User changed the video selection (empty string means none).
    SelectionChanged(String),
    /// User clicked Start.
    StartClicked,
    StartReplied(Reply),
    /// User clicked Stop.
    StopClicked,
    StopReplied(Reply),
    /// User clicked the delete control of one listed file.
    DeleteClicked { filename: String, section: Section },
    /// User clicked "delete all uploads".
    DeleteAllUploadsClicked,
    /// User answered a confirmation prompt.
    ConfirmationAnswered {
        request: ConfirmRequest,
        accepted: bool,
    },
    /// Single-file deletion finished. Only `Reply::Unreachable` is a failure.
    DeleteReplied(Reply),
    DeleteAllUploadsReplied(Reply),
    /// Background poll reported the service status.
    StatusPolled(String),
    /// Background poll failed; already logged by the engine.
    StatusPollFailed,
    /// User asked to download a processed file.
    DownloadClicked { filename: String },
    /// Download ended: the saved path, or why nothing was saved.
    DownloadFinished {
        filename: String,
        result: Result<String, DownloadFailure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Why a processed file could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadFailure {
    /// The service has no such file.
    NotFound,
    /// Anything else; `reason` is shown to the user as is.
    Failed { reason: String },
}
