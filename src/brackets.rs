use crate::error::{BrainfuckError, Result, UnmatchedBracketKind};

/// Precomputed matching bracket positions for O(1) loop jumps.
///
/// `targets[i]` holds the matching index for a `[` or `]` at index `i`;
/// every other position is `None`. Positions are character indices into
/// the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
}

impl JumpTable {
    /// Scan `program` once and pair up its loop brackets.
    ///
    /// A `]` with no open loop fails at that `]`. Any `[` still open at the
    /// end fails at the first (outermost) of them.
    pub fn resolve(program: &[char]) -> Result<Self> {
        let mut targets: Vec<Option<usize>> = vec![None; program.len()];
        let mut stack: Vec<usize> = Vec::new();

        for (i, &c) in program.iter().enumerate() {
            match c {
                '[' => stack.push(i),
                ']' => {
                    let Some(open_index) = stack.pop() else {
                        return Err(BrainfuckError::UnmatchedBracket {
                            position: i,
                            kind: UnmatchedBracketKind::Close,
                        });
                    };
                    targets[open_index] = Some(i);
                    targets[i] = Some(open_index);
                }
                _ => {}
            }
        }

        if let Some(&unmatched_open) = stack.first() {
            return Err(BrainfuckError::UnmatchedBracket {
                position: unmatched_open,
                kind: UnmatchedBracketKind::Open,
            });
        }

        Ok(Self { targets })
    }

    /// Matching bracket for the bracket at `position`.
    #[inline]
    pub fn target(&self, position: usize) -> Option<usize> {
        self.targets.get(position).copied().flatten()
    }

    /// Length of the program this table was built for.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// `(position, target)` pairs for every bracket, in program order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|j| (i, j)))
    }
}
