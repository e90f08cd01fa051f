use super::board::Board;

/// An in-progress traversal: an ordered, duplicate-free list of cell
/// indices where each cell is adjacent to its predecessor.
///
/// Cells are never re-checked for duplicates here; `Board::adjacent`
/// excludes the cells already on the path before a caller can push one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<usize>,
}

impl Path {
    pub fn new() -> Path {
        Path { cells: Vec::new() }
    }

    pub fn start_at(index: usize) -> Path {
        Path { cells: vec![index] }
    }

    pub fn push(&mut self, index: usize) {
        self.cells.push(index);
    }

    /// Removes the most recent cell. The backtracking primitive.
    pub fn pop(&mut self) -> Option<usize> {
        self.cells.pop()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    pub fn last(&self) -> Option<usize> {
        self.cells.last().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// The word spelled by this path on the given board.
    pub fn word(&self, board: &Board) -> String {
        self.cells.iter().map(|&index| board.letter(index)).collect()
    }
}
