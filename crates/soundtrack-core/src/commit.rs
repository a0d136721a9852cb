//! Editing commit-message text. Nothing here touches the filesystem.

use crate::format::COMMIT_MARKER;

/// Git's `commit -v` cut line. Everything from it down is discarded.
pub const SCISSORS: &str = "# ------------------------ >8 ------------------------";

/// Whether the message has at least one line that is neither blank nor a
/// comment, looking only above the scissors line.
pub fn has_real_content(message: &str) -> bool {
    message
        .lines()
        .take_while(|line| line.trim_end() != SCISSORS)
        .any(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

/// Whether a non-comment line already carries a "Currently playing" note,
/// e.g. when the hook runs again for `git commit --amend`.
pub fn already_tagged(message: &str) -> bool {
    message
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .any(|line| line.contains(COMMIT_MARKER))
}

/// Append `line` to the message after a blank line.
///
/// Returns `None`, meaning "leave the message as it is", for messages with
/// no real content or that are already tagged. When the message carries a
/// scissors line the note goes right above it so git keeps it.
pub fn append_line(message: &str, line: &str) -> Option<String> {
    if !has_real_content(message) || already_tagged(message) {
        return None;
    }

    match scissors_offset(message) {
        Some(offset) => {
            let (head, tail) = message.split_at(offset);
            Some(format!("{}\n\n{line}\n\n{tail}", head.trim_end_matches('\n')))
        }
        None => Some(format!("{}\n\n{line}\n", message.trim_end_matches('\n'))),
    }
}

fn scissors_offset(message: &str) -> Option<usize> {
    let mut offset = 0;
    for line in message.split_inclusive('\n') {
        if line.trim_end() == SCISSORS {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
