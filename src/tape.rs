/// Byte-cell memory that starts with a single zero cell and grows to the
/// right on demand. Index 0 is a hard left edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self { cells: vec![0], pointer: 0 }
    }

    #[inline]
    pub fn get(&self) -> u8 {
        self.cells[self.pointer]
    }

    #[inline]
    pub fn set(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    #[inline]
    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    #[inline]
    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    /// Move one cell right, appending a zero cell when stepping past the end.
    #[inline]
    pub fn move_right(&mut self) {
        self.pointer += 1;
        if self.pointer >= self.cells.len() {
            self.cells.push(0);
        }
    }

    /// Move one cell left. Returns `false` (and stays put) at cell 0.
    #[inline]
    pub fn move_left(&mut self) -> bool {
        if self.pointer == 0 {
            return false;
        }
        self.pointer -= 1;
        true
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Never true: a tape always has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_zero_cell() {
        let tape = Tape::new();
        assert_eq!(tape.cells(), &[0]);
        assert_eq!(tape.pointer(), 0);
    }

    #[test]
    fn wraps_in_both_directions() {
        let mut tape = Tape::new();
        tape.decrement();
        assert_eq!(tape.get(), 255);
        tape.increment();
        assert_eq!(tape.get(), 0);
    }

    #[test]
    fn grows_only_when_stepping_past_the_end() {
        let mut tape = Tape::new();
        tape.move_right();
        tape.move_right();
        assert_eq!(tape.len(), 3);
        assert!(tape.move_left());
        tape.move_right();
        assert_eq!(tape.len(), 3);
        assert_eq!(tape.pointer(), 2);
    }

    #[test]
    fn refuses_to_move_left_of_zero() {
        let mut tape = Tape::new();
        tape.move_right();
        assert!(tape.move_left());
        assert!(!tape.move_left());
        assert_eq!(tape.pointer(), 0);
        assert_eq!(tape.len(), 2);
    }
}
