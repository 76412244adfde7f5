//! Studio core: pure controller state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod texts;
mod update;
mod view_model;

pub use effect::{ConfirmRequest, Effect};
pub use msg::{DownloadFailure, Msg, Reply};
pub use state::{AppState, ControlState, FileEntry, PageListing, Section};
pub use texts::{Texts, COMPLETED_STATUS, SAVING_STATUS};
pub use update::update;
pub use view_model::AppViewModel;
