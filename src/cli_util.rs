use std::io::{self, Write};
use crate::BrainfuckError;

/// Pretty-print a [`BrainfuckError`] with caret positioning.
/// If `program` is `Some("bf")`, prefix messages with "bf: ...".
pub fn print_error(program: Option<&str>, code: &str, err: &BrainfuckError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    let msg = match err {
        BrainfuckError::UnmatchedBracket { kind, .. } => {
            prefix_program(&format!("Parse error: unmatched bracket {kind}"))
        }
        BrainfuckError::NegativeTapeIndex { .. } => {
            prefix_program("Runtime error: tape does not have negative indices")
        }
        BrainfuckError::UnexpectedEof { .. } => {
            prefix_program("Runtime error: input ended while waiting for a character")
        }
        BrainfuckError::Io { source, .. } => prefix_program(&format!("I/O error: {source}")),
    };
    print_error_with_context(&msg, code, err.position());
}

/// Print a concise error with instruction index and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    eprintln!("{}", render_error_with_context(prefix, code, pos));
    let _ = io::stderr().flush();
}

fn render_error_with_context(prefix: &str, code: &str, pos: usize) -> String {
    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    // Newlines would break the caret alignment.
    let slice: String = code[start_byte..end_byte]
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let caret_offset_chars = pos.saturating_sub(start_char);
    let underline = format!("{}^", " ".repeat(caret_offset_chars));

    format!("{prefix} at instruction {pos}\n  {slice}\n  {underline}")
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}
