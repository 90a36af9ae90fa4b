use std::fmt;

/// Errors that can occur while resolving or interpreting Brainfuck code.
///
/// Every variant carries the character position (not byte offset) of the
/// instruction that failed, so callers can point at it in the source.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckError {
    /// Loops were not balanced; raised before any instruction runs.
    #[error("Unmatched bracket {kind} at instruction {position}")]
    UnmatchedBracket { position: usize, kind: UnmatchedBracketKind },

    /// `<` was executed while the cell pointer was already at cell 0.
    #[error("Tape does not have negative indices (instruction {position})")]
    NegativeTapeIndex { position: usize },

    /// `,` asked for a character but the input stream was closed.
    #[error("Unexpected end of input at instruction {position}")]
    UnexpectedEof { position: usize },

    /// Reading input or writing output failed.
    #[error("I/O error at instruction {position}: {source}")]
    Io {
        position: usize,
        #[source]
        source: std::io::Error,
    },
}

impl BrainfuckError {
    /// Position of the instruction the error refers to.
    pub fn position(&self) -> usize {
        match self {
            BrainfuckError::UnmatchedBracket { position, .. }
            | BrainfuckError::NegativeTapeIndex { position }
            | BrainfuckError::UnexpectedEof { position }
            | BrainfuckError::Io { position, .. } => *position,
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrainfuckError>;
