//! Failures at the edges of a vox session: config and routine files,
//! terminal I/O.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong outside the engine. Commands and ticks are
/// infallible, so nothing here comes from a running countdown.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a routine or config file, or writing one with `config --init`
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A `.json` routine file that doesn't parse, or `list --json` output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML routine or config file that doesn't parse
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config values out of range, e.g. a zero tick length
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty routine, duplicate ids, zero repetitions or zero durations
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Bad CLI input such as a position past the end of the routine
    #[error("{0}")]
    Other(String),
}
