/// The eight Brainfuck instructions. Any other character is a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// `.`
    Output,
    /// `,`
    Input,
}

impl Instruction {
    /// Decode a source character, returning `None` for inert characters.
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '>' => Instruction::MoveRight,
            '<' => Instruction::MoveLeft,
            '[' => Instruction::LoopStart,
            ']' => Instruction::LoopEnd,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
            Instruction::Output => '.',
            Instruction::Input => ',',
        }
    }
}
