//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

/// Asks `question` on stdout and reads one line from stdin.
///
/// Returns `true` only for an affirmative `y`/`Y` answer. Anything else,
/// an unreadable line, or end-of-input counts as a refusal.
pub fn confirm(question: &str) -> bool {
    print!("{} (y/N): ", question);
    let _ = io::stdout().flush();

    let stdin = io::stdin();
    confirm_from(&mut stdin.lock())
}

/// Reads the answer from any reader; split out so tests can drive it.
fn confirm_from(reader: &mut impl BufRead) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => false, // EOF: treat as refusal.
        Ok(_) => line.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}
