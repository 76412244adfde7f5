use crate::{ControlState, FileEntry};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub control: ControlState,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub selection: Option<String>,
    pub status_text: String,
    /// Live feed the display element points at.
    pub stream_src: String,
    /// Bumped every time the display element is pointed back at `stream_src`.
    pub stream_resets: u64,
    pub videos: Vec<String>,
    pub files: Vec<FileEntry>,
    pub last_download: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn files_in(&self, section: crate::Section) -> impl Iterator<Item = &FileEntry> {
        self.files.iter().filter(move |entry| entry.section == section)
    }
}
