//! Parsing of terminal input lines.
//!
//! Plain text is a chat message (URL or question depending on the session
//! phase). Lines starting with `/` are commands; `exit` also quits.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use std::path::PathBuf;

pub const HELP_TEXT: &str = "\
Commands:
  /history          list previously processed websites
  /open <n>         resume conversation <n> from the last /history listing
  /new              start a new chat
  /content          show the extracted website text
  /download [dir]   save the extracted text to a file
  /help             show this help
  /quit             leave (also: exit)";

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Text to submit to the session.
    Message(String),
    History,
    /// 1-based index into the last history listing.
    Open(usize),
    NewChat,
    Content,
    Download(Option<PathBuf>),
    Help,
    Quit,
    /// Unrecognized or malformed command, with a hint for the user.
    Invalid(String),
}

/// Classify a raw input line.
#[must_use]
pub fn parse(line: &str) -> Input {
    let line = line.trim();
    if line.eq_ignore_ascii_case("exit") {
        return Input::Quit;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Message(line.to_owned());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("history", None) => Input::History,
        ("open", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Input::Open(n),
            _ => Input::Invalid(format!("not a history number: {n}")),
        },
        ("open", None) => Input::Invalid("usage: /open <n>".to_owned()),
        ("new", None) => Input::NewChat,
        ("content", None) => Input::Content,
        ("download", dir) => Input::Download(dir.map(PathBuf::from)),
        ("help", _) => Input::Help,
        ("quit" | "exit", _) => Input::Quit,
        _ => Input::Invalid(format!("unknown command: /{command} (try /help)")),
    }
}
