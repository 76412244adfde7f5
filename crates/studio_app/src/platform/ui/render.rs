use studio_core::{AppViewModel, ControlState, Section};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(if view.status_text.is_empty() {
        "Status: -".to_string()
    } else {
        view.status_text.clone()
    });

    let state_label = match view.control {
        ControlState::Idle => "idle",
        ControlState::Running => "running",
    };
    lines.push(format!(
        "[{state_label}] selection: {} | start: {} | stop: {}",
        view.selection.as_deref().unwrap_or("-"),
        enabled_label(view.start_enabled),
        enabled_label(view.stop_enabled),
    ));

    lines.push(format!(
        "Live feed: {} (reset {}x)",
        view.stream_src, view.stream_resets
    ));

    if !view.videos.is_empty() {
        lines.push(format!("Videos: {}", view.videos.join(", ")));
    }
    for (label, section) in [
        ("Uploaded", Section::Uploaded),
        ("Processed", Section::Processed),
    ] {
        let names: Vec<&str> = view
            .files_in(section)
            .map(|entry| entry.filename.as_str())
            .collect();
        if !names.is_empty() {
            lines.push(format!("{label}: {}", names.join(", ")));
        }
    }

    if let Some(path) = &view.last_download {
        lines.push(format!("Downloaded: {path}"));
    }

    lines
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use studio_core::FileEntry;

    #[test]
    fn running_view_renders_controls_and_files() {
        let view = AppViewModel {
            control: ControlState::Running,
            start_enabled: false,
            stop_enabled: true,
            selection: Some("clip1.mp4".to_string()),
            status_text: "Statut: Démarrage du traitement...".to_string(),
            stream_src: "http://127.0.0.1:5000/video_feed".to_string(),
            stream_resets: 1,
            videos: vec!["clip1.mp4".to_string()],
            files: vec![
                FileEntry {
                    filename: "clip1.mp4".to_string(),
                    section: Section::Uploaded,
                },
                FileEntry {
                    filename: "processed_clip1.mp4".to_string(),
                    section: Section::Processed,
                },
            ],
            last_download: None,
            dirty: true,
        };

        assert_eq!(
            render(&view),
            vec![
                "Statut: Démarrage du traitement...",
                "[running] selection: clip1.mp4 | start: off | stop: on",
                "Live feed: http://127.0.0.1:5000/video_feed (reset 1x)",
                "Videos: clip1.mp4",
                "Uploaded: clip1.mp4",
                "Processed: processed_clip1.mp4",
            ]
        );
    }

    #[test]
    fn empty_view_still_shows_status_and_controls() {
        let lines = render(&AppViewModel::default());
        assert_eq!(lines[0], "Status: -");
        assert_eq!(lines[1], "[idle] selection: - | start: off | stop: off");
        assert_eq!(lines.len(), 3);
    }
}
