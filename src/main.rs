use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::wordsearch::{Board, Lexicon, WordSearchEngine};

mod wordsearch;

/// Finds and scores every dictionary word reachable on a letter grid.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Word list file, one word per line.
    wordlist: PathBuf,
    /// Shortest word worth any points.
    #[arg(long, default_value_t = 3)]
    min_length: usize,
    /// Board letters in row-major order, e.g. "E,E,C,A,..."; the length
    /// must be a perfect square. Defaults to the built-in 4x4 board.
    #[arg(long, value_delimiter = ',')]
    letters: Option<Vec<String>>,
    /// JSON file holding a flat array of board letters.
    #[arg(long, conflicts_with = "letters")]
    board_file: Option<PathBuf>,
    /// Roll the sixteen classic dice instead of using a fixed board.
    #[arg(long, conflicts_with_all = ["letters", "board_file"])]
    random: bool,
    /// Report the path for one word instead of enumerating everything.
    #[arg(long)]
    find: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut engine = if let Some(path) = &args.board_file {
        WordSearchEngine::with_board(Board::from_file(path)?)
    } else if args.random {
        WordSearchEngine::with_board(Board::shuffled(&mut rand::thread_rng()))
    } else {
        WordSearchEngine::new()
    };
    if let Some(letters) = &args.letters {
        engine.set_board(letters)?;
    }

    let lexicon = Lexicon::from_file(&args.wordlist)
        .with_context(|| format!("failed to load word list {}", args.wordlist.display()))?;
    info!(words = lexicon.len(), "lexicon loaded");
    engine.load_lexicon(lexicon);

    print!("{}", engine.board());

    if let Some(word) = &args.find {
        let upper = word.to_uppercase();
        if let Some(path) = engine.path_for(word)? {
            println!("{}: cells {:?}", path.word(engine.board()), path.cells());
        } else if engine.is_valid_word(word)? {
            println!("{}: valid word, but not on this board", upper);
        } else if engine.is_valid_prefix(word)? {
            println!("{}: not a word, though some dictionary word starts with it", upper);
        } else {
            println!("{}: not in the dictionary", upper);
        }
        return Ok(());
    }

    let found = engine.all_scorable_words(args.min_length)?;
    for word in &found {
        println!("{}", word);
    }
    let score = engine.score_words(&found, args.min_length)?;
    println!("{} words, {} points", found.len(), score);
    Ok(())
}
