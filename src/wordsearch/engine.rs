use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use super::board::Board;
use super::error::EngineError;
use super::lexicon::Lexicon;
use super::path::Path;

/// The word-search engine: one board, one lexicon, and the searches over
/// them.
///
/// Setup (`set_board`, `load_lexicon`) takes `&mut self`; every query takes
/// `&self` and mutates nothing, so concurrent queries against a configured
/// engine are safe and the borrow checker rules out reconfiguring while a
/// query is in flight.
pub struct WordSearchEngine {
    board: Board,
    lexicon: Option<Lexicon>,
}

impl WordSearchEngine {
    /// An engine with the built-in 4x4 board and no lexicon. Queries fail
    /// with [`EngineError::NotInitialized`] until a lexicon is loaded.
    pub fn new() -> WordSearchEngine {
        WordSearchEngine {
            board: Board::default(),
            lexicon: None,
        }
    }

    pub fn with_board(board: Board) -> WordSearchEngine {
        WordSearchEngine {
            board,
            lexicon: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the board with a new one built from a flat row-major letter
    /// sequence. Any previously enumerated words are stale after this.
    pub fn set_board<S: AsRef<str>>(&mut self, letters: &[S]) -> Result<(), EngineError> {
        self.board = Board::new(letters)?;
        Ok(())
    }

    pub fn load_lexicon(&mut self, lexicon: Lexicon) {
        self.lexicon = Some(lexicon);
    }

    fn lexicon(&self) -> Result<&Lexicon, EngineError> {
        self.lexicon.as_ref().ok_or(EngineError::NotInitialized)
    }

    /// Enumerates every lexicon word of at least `min_length` letters that
    /// some path on the board spells, as a sorted, duplicate-free set.
    ///
    /// Each starting cell is searched independently, so the per-start loop
    /// runs on the rayon pool; the result is a set and does not depend on
    /// the order starts complete.
    pub fn all_scorable_words(&self, min_length: usize) -> Result<BTreeSet<String>, EngineError> {
        if min_length < 1 {
            return Err(EngineError::invalid_argument(
                "minimum word length must be at least 1",
            ));
        }
        let lexicon = self.lexicon()?;
        let found = (0..self.board.cell_count())
            .into_par_iter()
            .map(|start| {
                let mut found = BTreeSet::new();
                let mut path = Path::start_at(start);
                let mut word = String::from(self.board.letter(start));
                self.search_from(lexicon, &mut path, &mut word, min_length, &mut found);
                found
            })
            .reduce(BTreeSet::new, |mut acc, part| {
                acc.extend(part);
                acc
            });
        debug!(words = found.len(), min_length, "board enumerated");
        Ok(found)
    }

    /// Backtracking DFS from the tail of `path`. Records `word` when it is
    /// a long-enough lexicon word, and extends to unvisited neighbors only
    /// while `word` still prefixes something in the lexicon.
    fn search_from(
        &self,
        lexicon: &Lexicon,
        path: &mut Path,
        word: &mut String,
        min_length: usize,
        found: &mut BTreeSet<String>,
    ) {
        if word.chars().count() >= min_length && lexicon.contains(word) {
            found.insert(word.clone());
        }
        if !lexicon.has_prefix(word) {
            return;
        }
        let Some(last) = path.last() else {
            return;
        };
        for next in self.board.adjacent(last, path) {
            path.push(next);
            word.push(self.board.letter(next));
            self.search_from(lexicon, path, word, min_length, found);
            word.pop();
            path.pop();
        }
    }

    /// Finds one path spelling `word` on the board, or `None` if no path
    /// exists. Starts are tried in index order and only at cells matching
    /// the first letter; neighbors follow the fixed scan order of
    /// [`super::util::Position::neighbors`], so repeated calls return the
    /// identical path.
    pub fn path_for(&self, word: &str) -> Result<Option<Path>, EngineError> {
        self.lexicon()?;
        let target: Vec<char> = word.to_uppercase().chars().collect();
        let Some(&first) = target.first() else {
            return Ok(None);
        };
        for start in 0..self.board.cell_count() {
            if self.board.letter(start) != first {
                continue;
            }
            let mut path = Path::start_at(start);
            if self.extend_to_target(&target, &mut path) {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    fn extend_to_target(&self, target: &[char], path: &mut Path) -> bool {
        if path.len() == target.len() {
            return true;
        }
        let Some(last) = path.last() else {
            return false;
        };
        for next in self.board.adjacent(last, path) {
            if self.board.letter(next) != target[path.len()] {
                continue;
            }
            path.push(next);
            if self.extend_to_target(target, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    /// Scores a candidate word set: each word of at least `min_length`
    /// letters that is in the lexicon and on the board contributes
    /// `length - min_length + 1` points.
    pub fn score_words(
        &self,
        words: &BTreeSet<String>,
        min_length: usize,
    ) -> Result<i32, EngineError> {
        if min_length < 1 {
            return Err(EngineError::invalid_argument(
                "minimum word length must be at least 1",
            ));
        }
        let lexicon = self.lexicon()?;
        // fold case up front so candidates differing only in case collapse
        // to one scored word
        let unique: BTreeSet<String> = words.iter().map(|word| word.to_uppercase()).collect();
        let mut score = 0;
        for word in &unique {
            let length = word.chars().count();
            if length < min_length || !lexicon.contains(word) {
                continue;
            }
            if self.path_for(word)?.is_some() {
                score += (length - min_length + 1) as i32;
            }
        }
        Ok(score)
    }

    pub fn is_valid_word(&self, word: &str) -> Result<bool, EngineError> {
        Ok(self.lexicon()?.contains(word))
    }

    pub fn is_valid_prefix(&self, prefix: &str) -> Result<bool, EngineError> {
        Ok(self.lexicon()?.has_prefix(prefix))
    }
}

impl Default for WordSearchEngine {
    fn default() -> WordSearchEngine {
        WordSearchEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::WordSearchEngine;
    use crate::wordsearch::board::Board;
    use crate::wordsearch::error::EngineError;
    use crate::wordsearch::lexicon::Lexicon;
    use crate::wordsearch::path::Path;
    use crate::wordsearch::util::Position;

    /// On the default board (E E C A / A L E P / H N B O / Q T T Y):
    /// EEL, LEAN, CAP and BEN are reachable; PHONE, TOT and NAB are in the
    /// lexicon but no path spells them.
    fn fixture_engine() -> WordSearchEngine {
        let mut engine = WordSearchEngine::new();
        let lexicon =
            Lexicon::from_words(["EEL", "LEAN", "CAP", "BEN", "PHONE", "TOT", "NAB"]).unwrap();
        engine.load_lexicon(lexicon);
        engine
    }

    fn words(entries: &[&str]) -> BTreeSet<String> {
        entries.iter().map(|word| word.to_string()).collect()
    }

    fn assert_connected(path: &Path, board: &Board) {
        let mut seen = BTreeSet::new();
        for &cell in path.cells() {
            assert!(seen.insert(cell), "cell {} repeats in path", cell);
        }
        for pair in path.cells().windows(2) {
            let a = Position::from_index(pair[0], board.size());
            let b = Position::from_index(pair[1], board.size());
            assert!(
                a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1,
                "cells {} and {} are not adjacent",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_queries_require_lexicon() {
        let engine = WordSearchEngine::new();
        assert!(matches!(
            engine.all_scorable_words(3),
            Err(EngineError::NotInitialized)
        ));
        assert!(matches!(
            engine.path_for("EEL"),
            Err(EngineError::NotInitialized)
        ));
        assert!(matches!(
            engine.score_words(&words(&["EEL"]), 3),
            Err(EngineError::NotInitialized)
        ));
        assert!(matches!(
            engine.is_valid_word("EEL"),
            Err(EngineError::NotInitialized)
        ));
        assert!(matches!(
            engine.is_valid_prefix("EE"),
            Err(EngineError::NotInitialized)
        ));
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let engine = fixture_engine();
        assert!(matches!(
            engine.all_scorable_words(0),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.score_words(&words(&["EEL"]), 0),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_all_scorable_words() {
        let engine = fixture_engine();
        let found = engine.all_scorable_words(3).unwrap();
        assert_eq!(found, words(&["BEN", "CAP", "EEL", "LEAN"]));
    }

    #[test]
    fn test_found_words_are_sound() {
        let engine = fixture_engine();
        for word in engine.all_scorable_words(3).unwrap() {
            assert!(word.chars().count() >= 3);
            assert!(engine.is_valid_word(&word).unwrap());
            let path = engine.path_for(&word).unwrap().expect("word must be locatable");
            assert_eq!(path.word(engine.board()), word);
            assert_connected(&path, engine.board());
        }
    }

    #[test]
    fn test_unfound_lexicon_words_have_no_path() {
        let engine = fixture_engine();
        let found = engine.all_scorable_words(3).unwrap();
        for word in ["PHONE", "TOT", "NAB"] {
            assert!(!found.contains(word));
            assert!(engine.path_for(word).unwrap().is_none());
        }
    }

    #[test]
    fn test_enumeration_is_idempotent() {
        let engine = fixture_engine();
        let first = engine.all_scorable_words(3).unwrap();
        let second = engine.all_scorable_words(3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_locate_eel() {
        let engine = fixture_engine();
        let path = engine.path_for("EEL").unwrap().expect("EEL is on the board");
        assert_eq!(path.len(), 3);
        assert_eq!(path.word(engine.board()), "EEL");
        assert_connected(&path, engine.board());
    }

    #[test]
    fn test_locate_misses() {
        let engine = fixture_engine();
        assert!(engine.path_for("ZZZZ").unwrap().is_none());
        assert!(engine.path_for("").unwrap().is_none());
    }

    #[test]
    fn test_locate_is_deterministic() {
        let engine = fixture_engine();
        let first = engine.path_for("LEAN").unwrap();
        let second = engine.path_for("LEAN").unwrap();
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_locate_folds_case() {
        let engine = fixture_engine();
        assert!(engine.path_for("eel").unwrap().is_some());
        assert!(engine.is_valid_word("lean").unwrap());
    }

    #[test]
    fn test_score_words() {
        let engine = fixture_engine();
        // LEAN scores 4-3+1 = 2; PHONE is a word but off the board; EE is
        // too short; GLORP is not a word.
        let candidates = words(&["LEAN", "PHONE", "EE", "GLORP"]);
        assert_eq!(engine.score_words(&candidates, 3).unwrap(), 2);
        let found = engine.all_scorable_words(3).unwrap();
        assert_eq!(engine.score_words(&found, 3).unwrap(), 5);
    }

    #[test]
    fn test_case_variants_score_once() {
        let engine = fixture_engine();
        let candidates = words(&["EEL", "Eel", "eel"]);
        assert_eq!(engine.score_words(&candidates, 3).unwrap(), 1);
    }

    #[test]
    fn test_five_letter_word_scores_three_at_min_three() {
        // S T A / X X R / X E X spells STARE along one path
        let mut engine = WordSearchEngine::new();
        engine
            .set_board(&["S", "T", "A", "X", "X", "R", "X", "E", "X"])
            .unwrap();
        engine.load_lexicon(Lexicon::from_words(["STARE"]).unwrap());
        assert_eq!(engine.score_words(&words(&["STARE"]), 3).unwrap(), 3);
        assert_eq!(
            engine.all_scorable_words(3).unwrap(),
            words(&["STARE"])
        );
    }

    #[test]
    fn test_single_cell_board() {
        let mut engine = WordSearchEngine::with_board(Board::new(&["A"]).unwrap());
        engine.load_lexicon(Lexicon::from_words(["A", "AB"]).unwrap());
        assert_eq!(engine.all_scorable_words(1).unwrap(), words(&["A"]));
        assert!(engine.all_scorable_words(2).unwrap().is_empty());
    }

    #[test]
    fn test_empty_lexicon_yields_empty_set() {
        let mut engine = WordSearchEngine::new();
        engine.load_lexicon(Lexicon::from_words(Vec::<String>::new()).unwrap());
        assert!(engine.all_scorable_words(3).unwrap().is_empty());
        assert!(!engine.is_valid_word("EEL").unwrap());
    }

    #[test]
    fn test_set_board_rejects_bad_input() {
        let mut engine = fixture_engine();
        assert!(matches!(
            engine.set_board(&["A", "B", "C"]),
            Err(EngineError::InvalidArgument(_))
        ));
        // board untouched after the failed replacement
        assert_eq!(engine.board().letter(0), 'E');
    }

    #[test]
    fn test_cells_cannot_repeat_within_a_word() {
        // PIP needs the single P twice
        let mut engine = WordSearchEngine::with_board(Board::new(&["P", "I", "X", "X"]).unwrap());
        engine.load_lexicon(Lexicon::from_words(["PIP", "PI"]).unwrap());
        assert!(engine.path_for("PIP").unwrap().is_none());
        assert_eq!(engine.all_scorable_words(2).unwrap(), words(&["PI"]));
    }
}
