use std::collections::VecDeque;

/// A byte tape that grows by one zero cell whenever the cursor walks off
/// either end.
///
/// Cells live in a ring buffer so growth at the low end is O(1) and never
/// shifts existing data. Cell arithmetic wraps modulo 256.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<u8>,
    cursor: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// A single zero cell with the cursor on it.
    pub fn new() -> Self {
        let mut cells = VecDeque::with_capacity(64);
        cells.push_back(0);
        Self { cells, cursor: 0 }
    }

    #[inline(always)]
    pub fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor == self.cells.len() {
            self.cells.push_back(0);
        }
    }

    /// At the low end a fresh zero cell becomes index 0 and the cursor
    /// lands on it.
    #[inline(always)]
    pub fn retreat(&mut self) {
        if self.cursor == 0 {
            self.cells.push_front(0);
        } else {
            self.cursor -= 1;
        }
    }

    #[inline(always)]
    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    #[inline(always)]
    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    #[inline(always)]
    pub fn read(&self) -> u8 {
        self.cells[self.cursor]
    }

    #[inline(always)]
    pub fn write(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a tape has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells from the low end to the high end.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().copied()
    }
}
