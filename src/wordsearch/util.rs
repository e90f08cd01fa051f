/// Location of a cell on an `n x n` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Recovers the coordinates of a row-major cell index.
    pub fn from_index(index: usize, size: usize) -> Position {
        Position {
            row: index / size,
            col: index % size,
        }
    }

    /// Converts the row/col to a 1d index
    pub fn as_index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Returns the in-bounds king-move neighbors of this position.
    ///
    /// The scan order is fixed: row offset -1, 0, +1 outermost, column
    /// offset innermost, center skipped. Searches try neighbors in exactly
    /// this order, so the first path found for a word is stable across
    /// calls.
    pub fn neighbors(&self, size: usize) -> Vec<Position> {
        let mut result = Vec::with_capacity(8);
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let row = self.row as isize + dr;
                let col = self.col as isize + dc;
                if row >= 0 && row < size as isize && col >= 0 && col < size as isize {
                    result.push(Position {
                        row: row as usize,
                        col: col as usize,
                    });
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn test_index_round_trip() {
        for index in 0..16 {
            let pos = Position::from_index(index, 4);
            assert_eq!(pos.as_index(4), index);
        }
        assert_eq!(Position::from_index(0, 4), Position { row: 0, col: 0 });
        assert_eq!(Position::from_index(7, 4), Position { row: 1, col: 3 });
    }

    #[test]
    fn test_corner_neighbors() {
        let corner = Position { row: 0, col: 0 };
        assert_eq!(
            corner.neighbors(4),
            vec![
                Position { row: 0, col: 1 },
                Position { row: 1, col: 0 },
                Position { row: 1, col: 1 },
            ]
        );
    }

    #[test]
    fn test_interior_neighbor_order() {
        let center = Position { row: 1, col: 1 };
        let expected: Vec<Position> = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ]
        .iter()
        .map(|&(row, col)| Position { row, col })
        .collect();
        assert_eq!(center.neighbors(3), expected);
    }

    #[test]
    fn test_single_cell_board_has_no_neighbors() {
        assert!(Position { row: 0, col: 0 }.neighbors(1).is_empty());
    }
}
