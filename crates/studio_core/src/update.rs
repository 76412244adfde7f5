use crate::{
    AppState, ConfirmRequest, ControlState, DownloadFailure, Effect, Msg, Reply, COMPLETED_STATUS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageOpened => {
            let mut effects = vec![Effect::LoadPage];
            if state.begin_polling() {
                effects.push(Effect::StartStatusPoll);
            }
            effects
        }
        Msg::PageLoaded(listing) => {
            state.apply_listing(listing);
            Vec::new()
        }
        Msg::PageLoadFailed => alert(state.texts().page_unavailable.clone()),
        Msg::SelectionChanged(raw) => {
            state.set_selection(raw);
            Vec::new()
        }
        Msg::StartClicked => match state.selection() {
            Some(video) if state.start_enabled() => vec![Effect::SelectVideo {
                video: video.to_string(),
            }],
            _ => Vec::new(),
        },
        Msg::StartReplied(reply) => match reply {
            Reply::Success => {
                state.set_control(ControlState::Running);
                let text = state.texts().status_line(&state.texts().starting);
                state.set_status_text(text);
                Vec::new()
            }
            Reply::Rejected { message } => {
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| state.texts().start_failed.clone());
                alert(message)
            }
            Reply::Unreachable => alert(state.texts().generic_failure.clone()),
        },
        Msg::StopClicked => {
            if state.stop_enabled() {
                vec![Effect::StopVideo]
            } else {
                Vec::new()
            }
        }
        Msg::StopReplied(reply) => match reply {
            Reply::Success => {
                state.set_control(ControlState::Idle);
                let text = state.texts().status_line(&state.texts().stopped);
                state.set_status_text(text);
                state.reset_stream();
                Vec::new()
            }
            Reply::Rejected { .. } => alert(state.texts().stop_failed.clone()),
            Reply::Unreachable => alert(state.texts().generic_failure.clone()),
        },
        Msg::DeleteClicked { filename, section } => vec![Effect::Confirm {
            prompt: state.texts().delete_file_prompt(&filename),
            request: ConfirmRequest::DeleteFile { filename, section },
        }],
        Msg::DeleteAllUploadsClicked => vec![Effect::Confirm {
            prompt: state.texts().confirm_delete_all.clone(),
            request: ConfirmRequest::DeleteAllUploads,
        }],
        Msg::ConfirmationAnswered { request, accepted } => {
            if !accepted {
                return (state, Vec::new());
            }
            match request {
                ConfirmRequest::DeleteFile { filename, section } => {
                    vec![Effect::DeleteFile { filename, section }]
                }
                ConfirmRequest::DeleteAllUploads => vec![Effect::DeleteAllUploads],
            }
        }
        Msg::DeleteReplied(reply) => match reply {
            Reply::Success | Reply::Rejected { .. } => vec![Effect::LoadPage],
            Reply::Unreachable => alert(state.texts().delete_file_failed.clone()),
        },
        Msg::DeleteAllUploadsReplied(reply) => match reply {
            Reply::Success => vec![Effect::LoadPage],
            Reply::Rejected { .. } => alert(state.texts().delete_all_failed.clone()),
            Reply::Unreachable => alert(state.texts().delete_all_unreachable.clone()),
        },
        Msg::StatusPolled(status) => {
            let text = state.texts().polled_status_line(&status);
            state.set_status_text(text);
            if status == COMPLETED_STATUS {
                state.set_control(ControlState::Idle);
            }
            Vec::new()
        }
        Msg::StatusPollFailed => Vec::new(),
        Msg::DownloadClicked { filename } => vec![Effect::DownloadProcessed { filename }],
        Msg::DownloadFinished { filename, result } => match result {
            Ok(path) => {
                state.set_last_download(path);
                Vec::new()
            }
            Err(DownloadFailure::NotFound) => {
                alert(format!("{}: {}", state.texts().download_failed, filename))
            }
            Err(DownloadFailure::Failed { reason }) => alert(format!(
                "{}: {} ({})",
                state.texts().download_error,
                filename,
                reason
            )),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn alert(message: String) -> Vec<Effect> {
    vec![Effect::Alert { message }]
}
