//! Studio engine: HTTP client for the processing service and effect execution.
mod decode;
mod engine;
mod listing;
mod persist;
mod service;
mod types;

pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engine::{ChannelEventSink, EngineCommand, EngineConfig, EngineHandle, EventSink};
pub use listing::parse_listing;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use service::{ProcessingService, ReqwestProcessingService, ServiceSettings};
pub use types::{
    ActionReply, EngineEvent, FailureKind, ListedFile, PageListing, Section, ServiceError,
    StatusReport,
};
