//! Operator key-press prompts.

use std::io::{self, BufRead};

use console::Term;

/// Print `message` (if any) and block until a key is pressed.
///
/// Without a terminal (piped stdin) this waits for a line instead, and
/// returns straight away at end of input.
pub fn wait_for_key(term: &Term, message: Option<&str>) -> io::Result<()> {
    if let Some(message) = message {
        term.write_line(message)?;
    }

    if term.is_term() {
        term.read_key()?;
        Ok(())
    } else {
        wait_for_line(&mut io::stdin().lock())
    }
}

/// Consume one line of `input`; end of input counts as a key press
pub fn wait_for_line<R: BufRead>(input: &mut R) -> io::Result<()> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
