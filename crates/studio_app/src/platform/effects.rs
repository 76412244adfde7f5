use std::sync::mpsc;

use studio_core::{
    ConfirmRequest, DownloadFailure, Effect, FileEntry, Msg, PageListing, Reply, Section,
};
use studio_engine::{
    ActionReply, EngineCommand, EngineEvent, EngineHandle, EventSink, FailureKind, ServiceError,
};
use studio_logging::{studio_info, studio_warn};

use super::app::Inbound;

/// Where an effect is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Engine(EngineCommand),
    StartStatusPoll,
    Alert(String),
    Confirm {
        prompt: String,
        request: ConfirmRequest,
    },
}

pub fn route(effect: Effect) -> Routed {
    match effect {
        Effect::LoadPage => Routed::Engine(EngineCommand::LoadPage),
        Effect::StartStatusPoll => Routed::StartStatusPoll,
        Effect::SelectVideo { video } => Routed::Engine(EngineCommand::SelectVideo { video }),
        Effect::StopVideo => Routed::Engine(EngineCommand::StopVideo),
        Effect::Confirm { prompt, request } => Routed::Confirm { prompt, request },
        Effect::DeleteFile { filename, section } => Routed::Engine(EngineCommand::DeleteFile {
            filename,
            section: to_engine_section(section),
        }),
        Effect::DeleteAllUploads => Routed::Engine(EngineCommand::DeleteAllUploads),
        Effect::DownloadProcessed { filename } => {
            Routed::Engine(EngineCommand::DownloadProcessed { filename })
        }
        Effect::Alert { message } => Routed::Alert(message),
    }
}

/// The engine side of effect execution, so the session can run without one.
pub trait EngineCommands {
    fn submit(&self, command: EngineCommand);
    fn start_status_poll(&self);
}

impl EngineCommands for EngineHandle {
    fn submit(&self, command: EngineCommand) {
        EngineHandle::submit(self, command);
    }

    fn start_status_poll(&self) {
        EngineHandle::start_status_poll(self);
    }
}

/// Feeds engine events into the dispatch loop as controller messages.
pub struct MsgSink {
    tx: mpsc::Sender<Inbound>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<Inbound>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) -> bool {
        self.tx.send(Inbound::Msg(map_event(event))).is_ok()
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SelectVideo(result) => Msg::StartReplied(to_reply(result)),
        EngineEvent::StopVideo(result) => Msg::StopReplied(to_reply(result)),
        EngineEvent::DeleteFile {
            filename,
            section,
            result,
        } => Msg::DeleteReplied(match result {
            Ok(()) => {
                studio_info!("Delete of {:?} file {} answered", section, filename);
                Reply::Success
            }
            Err(err) => {
                studio_warn!("Delete of {:?} file {} failed: {}", section, filename, err);
                Reply::Unreachable
            }
        }),
        EngineEvent::DeleteAllUploads(result) => Msg::DeleteAllUploadsReplied(to_reply(result)),
        EngineEvent::Status(Ok(report)) => Msg::StatusPolled(report.status),
        EngineEvent::Status(Err(_)) => Msg::StatusPollFailed,
        EngineEvent::PageLoaded(Ok(listing)) => Msg::PageLoaded(PageListing {
            videos: listing.videos,
            files: listing
                .files
                .into_iter()
                .map(|file| FileEntry {
                    filename: file.filename,
                    section: to_core_section(file.section),
                })
                .collect(),
            processing_active: listing.processing_active,
            status_text: listing.status_text,
        }),
        EngineEvent::PageLoaded(Err(_)) => Msg::PageLoadFailed,
        EngineEvent::Downloaded { filename, result } => Msg::DownloadFinished {
            filename,
            result: result
                .map(|path| path.display().to_string())
                .map_err(to_download_failure),
        },
    }
}

fn to_reply(result: Result<ActionReply, ServiceError>) -> Reply {
    match result {
        Ok(reply) if reply.is_success() => Reply::Success,
        Ok(reply) => Reply::Rejected {
            message: reply.message,
        },
        Err(_) => Reply::Unreachable,
    }
}

fn to_download_failure(err: ServiceError) -> DownloadFailure {
    match err.kind {
        FailureKind::HttpStatus(404) => DownloadFailure::NotFound,
        _ => DownloadFailure::Failed {
            reason: err.to_string(),
        },
    }
}

fn to_engine_section(section: Section) -> studio_engine::Section {
    match section {
        Section::Uploaded => studio_engine::Section::Uploaded,
        Section::Processed => studio_engine::Section::Processed,
    }
}

fn to_core_section(section: studio_engine::Section) -> Section {
    match section {
        studio_engine::Section::Uploaded => Section::Uploaded,
        studio_engine::Section::Processed => Section::Processed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use studio_engine::{ListedFile, StatusReport};

    fn network_error() -> ServiceError {
        ServiceError {
            kind: FailureKind::Network,
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn delete_effect_keeps_its_section() {
        assert_eq!(
            route(Effect::DeleteFile {
                filename: "out.mp4".to_string(),
                section: Section::Processed,
            }),
            Routed::Engine(EngineCommand::DeleteFile {
                filename: "out.mp4".to_string(),
                section: studio_engine::Section::Processed,
            })
        );
    }

    #[test]
    fn replies_split_into_success_rejection_and_unreachable() {
        let ok = ActionReply {
            status: "success".to_string(),
            message: None,
        };
        let rejected = ActionReply {
            status: "error".to_string(),
            message: Some("Vidéo non trouvée".to_string()),
        };

        assert_eq!(
            map_event(EngineEvent::SelectVideo(Ok(ok))),
            Msg::StartReplied(Reply::Success)
        );
        assert_eq!(
            map_event(EngineEvent::SelectVideo(Ok(rejected))),
            Msg::StartReplied(Reply::Rejected {
                message: Some("Vidéo non trouvée".to_string())
            })
        );
        assert_eq!(
            map_event(EngineEvent::StopVideo(Err(network_error()))),
            Msg::StopReplied(Reply::Unreachable)
        );
    }

    #[test]
    fn status_and_listing_events_become_messages() {
        assert_eq!(
            map_event(EngineEvent::Status(Ok(StatusReport {
                status: "saving".to_string()
            }))),
            Msg::StatusPolled("saving".to_string())
        );
        assert_eq!(
            map_event(EngineEvent::Status(Err(network_error()))),
            Msg::StatusPollFailed
        );

        let listing = studio_engine::PageListing {
            videos: vec!["clip1.mp4".to_string()],
            files: vec![ListedFile {
                filename: "clip1.mp4".to_string(),
                section: studio_engine::Section::Uploaded,
            }],
            processing_active: false,
            status_text: None,
        };
        match map_event(EngineEvent::PageLoaded(Ok(listing))) {
            Msg::PageLoaded(page) => {
                assert_eq!(page.files[0].section, Section::Uploaded);
                assert_eq!(page.videos, vec!["clip1.mp4"]);
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn download_errors_keep_their_cause() {
        let missing = ServiceError {
            kind: FailureKind::HttpStatus(404),
            message: "404 Not Found".to_string(),
        };
        let too_large = ServiceError {
            kind: FailureKind::TooLarge {
                max_bytes: 10,
                actual: Some(20),
            },
            message: "content-length over limit".to_string(),
        };

        assert_eq!(
            map_event(EngineEvent::Downloaded {
                filename: "gone.mp4".to_string(),
                result: Err(missing),
            }),
            Msg::DownloadFinished {
                filename: "gone.mp4".to_string(),
                result: Err(DownloadFailure::NotFound),
            }
        );
        assert_eq!(
            map_event(EngineEvent::Downloaded {
                filename: "huge.mp4".to_string(),
                result: Err(too_large),
            }),
            Msg::DownloadFinished {
                filename: "huge.mp4".to_string(),
                result: Err(DownloadFailure::Failed {
                    reason: "response too large (max 10, actual Some(20)): content-length over limit"
                        .to_string(),
                }),
            }
        );
        assert_eq!(
            map_event(EngineEvent::Downloaded {
                filename: "out.mp4".to_string(),
                result: Ok(PathBuf::from("downloads").join("out.mp4")),
            }),
            Msg::DownloadFinished {
                filename: "out.mp4".to_string(),
                result: Ok(PathBuf::from("downloads").join("out.mp4").display().to_string()),
            }
        );
    }

    #[test]
    fn delete_outcome_ignores_the_http_answer_but_not_transport_failure() {
        let answered = EngineEvent::DeleteFile {
            filename: "out.mp4".to_string(),
            section: studio_engine::Section::Processed,
            result: Ok(()),
        };
        let failed = EngineEvent::DeleteFile {
            filename: "out.mp4".to_string(),
            section: studio_engine::Section::Processed,
            result: Err(network_error()),
        };

        assert_eq!(map_event(answered), Msg::DeleteReplied(Reply::Success));
        assert_eq!(map_event(failed), Msg::DeleteReplied(Reply::Unreachable));
    }
}
