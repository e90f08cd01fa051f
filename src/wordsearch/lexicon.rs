use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};

use fst::automaton::Str;
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use tracing::debug;

use super::error::EngineError;

/// The dictionary of valid words, stored uppercase in a finite-state set.
///
/// Membership and prefix queries fold their input to uppercase, so lookups
/// are case-insensitive. The set is read-only after construction.
pub struct Lexicon {
    set: Set<Vec<u8>>,
    len: usize,
}

impl Lexicon {
    /// Builds a lexicon from an iterator of words. Duplicates collapse and
    /// ordering is irrelevant.
    pub fn from_words<I, S>(words: I) -> Result<Lexicon, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_uppercase())
            .collect();
        Lexicon::from_sorted(unique)
    }

    /// Reads a word list, taking the first whitespace-delimited token of
    /// each line as a word.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Lexicon, EngineError> {
        let mut unique = BTreeSet::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(token) = line.split_whitespace().next() {
                unique.insert(token.to_uppercase());
            }
        }
        Lexicon::from_sorted(unique)
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Lexicon, EngineError> {
        let file = File::open(path.as_ref())?;
        Lexicon::from_reader(BufReader::new(file))
    }

    fn from_sorted(unique: BTreeSet<String>) -> Result<Lexicon, EngineError> {
        let len = unique.len();
        let mut builder = SetBuilder::memory();
        builder.extend_iter(unique.iter().map(|word| word.as_bytes()))?;
        let set = builder.into_set();
        debug!(words = len, "lexicon built");
        Ok(Lexicon { set, len })
    }

    /// Exact membership, case-insensitive.
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.to_uppercase().as_bytes())
    }

    /// True iff some word in the set begins with `prefix`. This is the
    /// pruning query of the board search; a branch whose partial word has
    /// no extension in the set is abandoned immediately.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.to_uppercase();
        let automaton = Str::new(&prefix).starts_with();
        self.set.search(automaton).into_stream().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon").field("len", &self.len).finish()
    }
}
