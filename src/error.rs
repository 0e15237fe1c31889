//! Errors raised while configuring, building or decoding a maze

use thiserror::Error;

use crate::Point;

/// Reasons why a maze could not be produced
///
/// Every variant names the offending field and what was expected, so that
/// the message alone is enough to fix the configuration.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: missing '=' in `{content}`")]
    MissingSeparator { line: usize, content: String },

    #[error("line {line}: empty key or value in `{content}`")]
    EmptyKeyOrValue { line: usize, content: String },

    #[error("invalid variable in config file: `{0}`")]
    UnknownKey(String),

    #[error("`{key}` must be a non-negative integer, got `{value}`")]
    InvalidInteger { key: &'static str, value: String },

    #[error("`{key}` must be two integers as `x,y`, got `{value}`")]
    InvalidPoint { key: &'static str, value: String },

    #[error("maze size {width}x{height} too small, minimum size is {min_width}x{min_height}")]
    TooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },

    #[error("maze size {width}x{height} too large, at most {max_cells} cells are allowed")]
    TooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },

    #[error("{name} point ({x},{y}) out of bounds for a {width}x{height} maze")]
    OutOfBounds {
        name: &'static str,
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("entry and exit points must be different")]
    SameEntryExit,

    #[error("unsupported generation algorithm `{0}`, expected `dfs`")]
    UnsupportedAlgorithm(String),

    #[error(
        "maze {width}x{height} is too small to place the {pattern_width}x{pattern_height} blocked pattern"
    )]
    MaskTooLarge {
        width: usize,
        height: usize,
        pattern_width: usize,
        pattern_height: usize,
    },

    #[error("{name} point {point} lies on a blocked cell")]
    BlockedEndpoint { name: &'static str, point: Point },

    #[error("line {line}: {reason}")]
    InvalidEncoding { line: usize, reason: String },
}
