use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

/// Printed to the diagnostics stream whenever `,` receives a line that is not
/// exactly one character in the 0..=255 range.
pub const INVALID_INPUT_MESSAGE: &str = "Error: Expected only one ascii character as input. Try again.";

/// The interpreter's view of the outside world.
///
/// - `input` supplies one line per `,` request.
/// - `output` receives the characters produced by `.`.
/// - `diagnostics` receives the retry prompt for rejected input lines.
pub struct Host<R, W, E> {
    pub input: R,
    pub output: W,
    pub diagnostics: E,
}

impl Host<StdinLock<'static>, Stdout, Stderr> {
    /// Process stdin, stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> Host<R, W, E> {
    pub fn new(input: R, output: W, diagnostics: E) -> Self {
        Self { input, output, diagnostics }
    }

    /// Write the character whose code point is `value` and flush, so output
    /// interleaves character by character with anything else on the stream.
    pub fn write_cell(&mut self, value: u8) -> io::Result<()> {
        let mut buf = [0u8; 4];
        let encoded = char::from(value).encode_utf8(&mut buf);
        self.output.write_all(encoded.as_bytes())?;
        self.output.flush()
    }

    /// Block until the input yields a line holding exactly one character with
    /// a code point in 0..=255, prompting again after every rejected line.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn read_cell(&mut self) -> io::Result<Option<u8>> {
        // Pending program output must be visible before we block.
        self.output.flush()?;

        let mut line: Vec<u8> = Vec::new();
        loop {
            line.clear();
            if self.input.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            // Undecodable bytes are just another rejected line.
            if let Some(value) = std::str::from_utf8(&line).ok().and_then(single_latin1_char) {
                return Ok(Some(value));
            }
            writeln!(self.diagnostics, "{INVALID_INPUT_MESSAGE}")?;
            self.diagnostics.flush()?;
        }
    }
}

/// The code point of `line` if, minus its line terminator, it is one
/// character no greater than U+00FF.
fn single_latin1_char(line: &str) -> Option<u8> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut chars = line.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    u8::try_from(u32::from(c)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(input: &str) -> Host<&[u8], Vec<u8>, Vec<u8>> {
        Host::new(input.as_bytes(), Vec::new(), Vec::new())
    }

    #[test]
    fn accepts_one_character_per_line() {
        let mut h = host("A\r\nb\n");
        assert_eq!(h.read_cell().unwrap(), Some(b'A'));
        assert_eq!(h.read_cell().unwrap(), Some(b'b'));
        assert_eq!(h.read_cell().unwrap(), None);
        assert!(h.diagnostics.is_empty());
    }

    #[test]
    fn last_line_without_terminator_is_accepted() {
        let mut h = host("Z");
        assert_eq!(h.read_cell().unwrap(), Some(b'Z'));
    }

    #[test]
    fn rejects_empty_long_and_wide_lines_then_retries() {
        // empty line, two characters, code point above 255, then a valid one
        let mut h = host("\nab\n\u{0100}\né\n");
        assert_eq!(h.read_cell().unwrap(), Some(0xE9));
        let diag = String::from_utf8(h.diagnostics).unwrap();
        assert_eq!(diag.matches(INVALID_INPUT_MESSAGE).count(), 3);
    }

    #[test]
    fn invalid_utf8_line_is_rejected_and_retried() {
        let mut h = Host::new(&b"\xe9\nA\n"[..], Vec::new(), Vec::new());
        assert_eq!(h.read_cell().unwrap(), Some(b'A'));
        let diag = String::from_utf8(h.diagnostics).unwrap();
        assert_eq!(diag.matches(INVALID_INPUT_MESSAGE).count(), 1);
    }

    #[test]
    fn a_lone_space_is_a_character() {
        let mut h = host(" \n");
        assert_eq!(h.read_cell().unwrap(), Some(b' '));
    }

    #[test]
    fn cells_above_ascii_are_written_as_utf8() {
        let mut h = host("");
        h.write_cell(b'@').unwrap();
        h.write_cell(0xE9).unwrap();
        assert_eq!(String::from_utf8(h.output).unwrap(), "@é");
    }
}
