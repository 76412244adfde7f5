use studio_core::{AppViewModel, Msg, Section};

use super::constants::YES_ANSWERS;

/// One line typed at the prompt, understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
    Empty,
    /// Not understood; the text says why.
    Invalid(String),
}

pub fn parse_command(line: &str, view: &AppViewModel) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "select" => Command::Dispatch(Msg::SelectionChanged(rest.to_string())),
        "start" => Command::Dispatch(Msg::StartClicked),
        "stop" => Command::Dispatch(Msg::StopClicked),
        "delete" => parse_delete(rest, view),
        "delete-all" => Command::Dispatch(Msg::DeleteAllUploadsClicked),
        "download" if !rest.is_empty() => Command::Dispatch(Msg::DownloadClicked {
            filename: rest.to_string(),
        }),
        "download" => Command::Invalid("download needs a file name".to_string()),
        "reload" => Command::Dispatch(Msg::PageOpened),
        "show" | "status" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command {other:?}")),
    }
}

fn parse_delete(rest: &str, view: &AppViewModel) -> Command {
    let explicit = rest.split_once(char::is_whitespace).and_then(|(word, name)| {
        let section = match word.to_ascii_lowercase().as_str() {
            "uploaded" => Section::Uploaded,
            "processed" => Section::Processed,
            _ => return None,
        };
        Some((section, name.trim()))
    });

    let (section, filename) = match explicit {
        Some(found) => found,
        None if rest.is_empty() => {
            return Command::Invalid("delete needs a file name".to_string());
        }
        None => {
            let mut sections = view
                .files
                .iter()
                .filter(|entry| entry.filename == rest)
                .map(|entry| entry.section);
            match (sections.next(), sections.next()) {
                (Some(section), None) => (section, rest),
                (Some(_), Some(_)) => {
                    return Command::Invalid(format!(
                        "{rest:?} is listed in both sections; use delete uploaded|processed <file>"
                    ));
                }
                (None, _) => {
                    return Command::Invalid(format!(
                        "{rest:?} is not listed; use delete uploaded|processed <file>"
                    ));
                }
            }
        }
    };

    if filename.is_empty() {
        return Command::Invalid("delete needs a file name".to_string());
    }
    Command::Dispatch(Msg::DeleteClicked {
        filename: filename.to_string(),
        section,
    })
}

pub fn parse_answer(line: &str) -> bool {
    let answer = line.trim();
    YES_ANSWERS
        .iter()
        .any(|yes| yes.eq_ignore_ascii_case(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use studio_core::FileEntry;

    fn view_with_files() -> AppViewModel {
        AppViewModel {
            files: vec![
                FileEntry {
                    filename: "my clip.mp4".to_string(),
                    section: Section::Uploaded,
                },
                FileEntry {
                    filename: "out.mp4".to_string(),
                    section: Section::Processed,
                },
            ],
            ..AppViewModel::default()
        }
    }

    #[test]
    fn selection_keeps_spaces_and_can_clear() {
        let view = AppViewModel::default();
        assert_eq!(
            parse_command("select  my clip.mp4 ", &view),
            Command::Dispatch(Msg::SelectionChanged("my clip.mp4".to_string()))
        );
        assert_eq!(
            parse_command("select", &view),
            Command::Dispatch(Msg::SelectionChanged(String::new()))
        );
    }

    #[test]
    fn delete_with_explicit_section() {
        let view = AppViewModel::default();
        assert_eq!(
            parse_command("delete processed out.mp4", &view),
            Command::Dispatch(Msg::DeleteClicked {
                filename: "out.mp4".to_string(),
                section: Section::Processed,
            })
        );
        assert!(matches!(
            parse_command("delete uploaded", &view),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn delete_looks_up_section_from_listing() {
        let view = view_with_files();
        assert_eq!(
            parse_command("delete my clip.mp4", &view),
            Command::Dispatch(Msg::DeleteClicked {
                filename: "my clip.mp4".to_string(),
                section: Section::Uploaded,
            })
        );
        assert!(matches!(
            parse_command("delete unknown.mp4", &view),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn delete_refuses_a_name_listed_in_both_sections() {
        let mut view = view_with_files();
        view.files.push(FileEntry {
            filename: "out.mp4".to_string(),
            section: Section::Uploaded,
        });

        match parse_command("delete out.mp4", &view) {
            Command::Invalid(reason) => assert!(reason.contains("both sections"), "{reason}"),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(
            parse_command("delete uploaded out.mp4", &view),
            Command::Dispatch(Msg::DeleteClicked {
                filename: "out.mp4".to_string(),
                section: Section::Uploaded,
            })
        );
    }

    #[test]
    fn simple_words_map_to_messages() {
        let view = AppViewModel::default();
        assert_eq!(
            parse_command("START", &view),
            Command::Dispatch(Msg::StartClicked)
        );
        assert_eq!(parse_command("stop", &view), Command::Dispatch(Msg::StopClicked));
        assert_eq!(
            parse_command("delete-all", &view),
            Command::Dispatch(Msg::DeleteAllUploadsClicked)
        );
        assert_eq!(parse_command("reload", &view), Command::Dispatch(Msg::PageOpened));
        assert_eq!(parse_command("  ", &view), Command::Empty);
        assert_eq!(parse_command("quit", &view), Command::Quit);
        assert!(matches!(parse_command("launch", &view), Command::Invalid(_)));
    }

    #[test]
    fn only_explicit_yes_confirms() {
        for yes in ["o", "Oui", " y ", "YES"] {
            assert!(parse_answer(yes), "{yes}");
        }
        for no in ["", "n", "non", "maybe"] {
            assert!(!parse_answer(no), "{no}");
        }
    }
}
