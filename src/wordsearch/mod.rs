pub mod board;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod path;
pub mod util;

pub use self::board::Board;
pub use self::engine::WordSearchEngine;
pub use self::error::EngineError;
pub use self::lexicon::Lexicon;
pub use self::path::Path;
