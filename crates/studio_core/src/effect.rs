use crate::Section;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the page listing; also how a deletion "reloads the page".
    LoadPage,
    /// Begin the one-second status poll. Emitted at most once per state lifetime.
    StartStatusPoll,
    SelectVideo { video: String },
    StopVideo,
    /// Ask the user a yes/no question; the answer comes back as
    /// `Msg::ConfirmationAnswered` carrying the same request.
    Confirm {
        prompt: String,
        request: ConfirmRequest,
    },
    DeleteFile { filename: String, section: Section },
    DeleteAllUploads,
    DownloadProcessed { filename: String },
    Alert { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmRequest {
    DeleteFile { filename: String, section: Section },
    DeleteAllUploads,
}
