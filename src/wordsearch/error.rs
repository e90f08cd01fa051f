use thiserror::Error;

/// Failure conditions surfaced by the engine.
///
/// Bad input (non-square boards, multi-character cells, a zero minimum word
/// length, unreadable or malformed setup files) is an invalid argument.
/// Querying before a lexicon has been loaded is reported separately so
/// callers can tell "bad input" from "engine not ready". Nothing is
/// recovered internally; every condition reaches the caller before any
/// partial result is produced.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no lexicon loaded")]
    NotInitialized,
}

impl EngineError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> EngineError {
        EngineError::InvalidArgument(msg.into())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> EngineError {
        EngineError::invalid_argument(format!("unreadable source: {}", err))
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> EngineError {
        EngineError::invalid_argument(format!("malformed board file: {}", err))
    }
}

impl From<fst::Error> for EngineError {
    fn from(err: fst::Error) -> EngineError {
        EngineError::invalid_argument(format!("failed to build lexicon: {}", err))
    }
}
