use url::Url;

use crate::view_model::AppViewModel;
use crate::Texts;

/// Client-side view of the processing job: which of Start/Stop is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    Running,
}

/// Which listing a file belongs to; decides the delete endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Uploaded,
    Processed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub filename: String,
    pub section: Section,
}

/// What a page load reports about the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageListing {
    /// Videos offered for selection.
    pub videos: Vec<String>,
    /// Deletable files of both sections, in page order.
    pub files: Vec<FileEntry>,
    /// The page rendered with Stop enabled.
    pub processing_active: bool,
    pub status_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    control: ControlState,
    selection: Option<String>,
    status_text: String,
    default_stream: Url,
    stream_resets: u64,
    videos: Vec<String>,
    files: Vec<FileEntry>,
    last_download: Option<String>,
    polling: bool,
    texts: Texts,
    dirty: bool,
}

impl AppState {
    /// Fresh controller: `Idle`, nothing selected, Start disabled.
    pub fn new(default_stream: Url) -> Self {
        Self {
            control: ControlState::Idle,
            selection: None,
            status_text: String::new(),
            default_stream,
            stream_resets: 0,
            videos: Vec::new(),
            files: Vec::new(),
            last_download: None,
            polling: false,
            texts: Texts::default(),
            dirty: false,
        }
    }

    pub fn with_texts(mut self, texts: Texts) -> Self {
        self.texts = texts;
        self
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    pub fn control(&self) -> ControlState {
        self.control
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn start_enabled(&self) -> bool {
        self.control == ControlState::Idle && self.selection.is_some()
    }

    pub fn stop_enabled(&self) -> bool {
        self.control == ControlState::Running
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            control: self.control,
            start_enabled: self.start_enabled(),
            stop_enabled: self.stop_enabled(),
            selection: self.selection.clone(),
            status_text: self.status_text.clone(),
            stream_src: self.default_stream.to_string(),
            stream_resets: self.stream_resets,
            videos: self.videos.clone(),
            files: self.files.clone(),
            last_download: self.last_download.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_selection(&mut self, raw: String) {
        let selection = if raw.is_empty() { None } else { Some(raw) };
        if self.selection != selection {
            self.selection = selection;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_control(&mut self, control: ControlState) {
        if self.control != control {
            self.control = control;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status_text(&mut self, text: String) {
        if self.status_text != text {
            self.status_text = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn reset_stream(&mut self) {
        self.stream_resets += 1;
        self.mark_dirty();
    }

    /// Rebuilds the page-owned state the way a browser reload would.
    pub(crate) fn apply_listing(&mut self, listing: PageListing) {
        self.selection = None;
        self.control = if listing.processing_active {
            ControlState::Running
        } else {
            ControlState::Idle
        };
        if let Some(text) = listing.status_text {
            self.status_text = text;
        }
        self.videos = listing.videos;
        self.files = listing.files;
        self.stream_resets += 1;
        self.mark_dirty();
    }

    pub(crate) fn set_last_download(&mut self, path: String) {
        self.last_download = Some(path);
        self.mark_dirty();
    }

    /// Flags the poll as started; false if it already was.
    pub(crate) fn begin_polling(&mut self) -> bool {
        !std::mem::replace(&mut self.polling, true)
    }
}
