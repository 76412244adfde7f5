pub const PROMPT: &str = "> ";
pub const ALERT_PREFIX: &str = "! ";
pub const CONFIRM_SUFFIX: &str = " [o/N]";

/// Answers accepted by a confirmation prompt, compared case-insensitively.
pub const YES_ANSWERS: [&str; 4] = ["o", "oui", "y", "yes"];

pub const HELP: &str = "\
commands:
  select <video>                  choose the video to process (no name clears it)
  start                           start processing the selected video
  stop                            stop processing
  delete [uploaded|processed] <file>
                                  delete one file (section required if ambiguous)
  delete-all                      delete every uploaded video
  download <file>                 download a processed video
  reload                          reload the listing
  show                            print the current state
  help                            this text
  quit                            leave";
