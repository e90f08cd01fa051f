use std::fmt;
use std::fs::File;
use std::io::Read;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::path::Path;
use super::util::Position;

/// Letter dice of the classic 4x4 game, one die per cell.
const DICE: [&str; 16] = [
    "AAEEGN", "ELRTTY", "AOOTTW", "ABBJOO", "EHRTVW", "CIMOTU", "DISTTY", "EIOSST", "DELRVY",
    "ACHOPS", "HIMNQU", "EEINSU", "EEGHNW", "AFFKPS", "HLNNRZ", "DEILRX",
];

/// Row-major letters of the board the engine starts out with.
const DEFAULT_LETTERS: [char; 16] = [
    'E', 'E', 'C', 'A', //
    'A', 'L', 'E', 'P', //
    'H', 'N', 'B', 'O', //
    'Q', 'T', 'T', 'Y',
];

/// A square grid of uppercase letters, immutable once constructed.
///
/// Serializes as the flat row-major letter array that [`Board::new`]
/// accepts, so deserialized boards go through the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Board {
    /// Row-major cell letters
    letters: Vec<char>,
    /// Side length
    size: usize,
}

impl Board {
    /// Builds a board from a flat row-major sequence of single-character
    /// cells. The sequence length must be a perfect square; letters are
    /// folded to uppercase.
    pub fn new<S: AsRef<str>>(letters: &[S]) -> Result<Board, EngineError> {
        let size = (letters.len() as f64).sqrt() as usize;
        if letters.is_empty() || size * size != letters.len() {
            return Err(EngineError::invalid_argument(
                "board letters must form a non-empty square array",
            ));
        }
        let mut cells = Vec::with_capacity(letters.len());
        for entry in letters {
            let mut chars = entry.as_ref().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => cells.push(c.to_ascii_uppercase()),
                _ => {
                    return Err(EngineError::invalid_argument(format!(
                        "board cells must hold exactly one character, got {:?}",
                        entry.as_ref()
                    )))
                }
            }
        }
        Ok(Board {
            letters: cells,
            size,
        })
    }

    /// Reads a board from a JSON file holding a flat array of
    /// single-character strings.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Board, EngineError> {
        let mut data = String::new();
        File::open(path.as_ref())?.read_to_string(&mut data)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Rolls the sixteen classic dice into a random 4x4 board.
    pub fn shuffled<R: Rng>(rng: &mut R) -> Board {
        let mut dice = DICE;
        dice.shuffle(rng);
        let letters = dice
            .iter()
            .map(|die| {
                let face = rng.gen_range(0..die.len());
                die.as_bytes()[face] as char
            })
            .collect();
        Board { letters, size: 4 }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.letters.len()
    }

    pub fn letter(&self, index: usize) -> char {
        self.letters[index]
    }

    /// Indices adjacent to `index` (diagonals included), in the fixed scan
    /// order of [`Position::neighbors`], skipping any cell already on the
    /// excluding path.
    pub fn adjacent(&self, index: usize, excluding: &Path) -> Vec<usize> {
        Position::from_index(index, self.size)
            .neighbors(self.size)
            .into_iter()
            .map(|pos| pos.as_index(self.size))
            .filter(|&candidate| !excluding.contains(candidate))
            .collect()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = EngineError;

    fn try_from(letters: Vec<String>) -> Result<Board, EngineError> {
        Board::new(&letters)
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Vec<String> {
        board.letters.iter().map(|letter| letter.to_string()).collect()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board {
            letters: DEFAULT_LETTERS.to_vec(),
            size: 4,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "| ")?;
            for col in 0..self.size {
                write!(f, "{} ", self.letters[row * self.size + col])?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
