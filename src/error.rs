//! error types for the simulation and its collaborators.

use std::io;

use thiserror::Error;

use crate::Pos;

/// errors raised while reading or writing a pattern file.
#[derive(Debug, Error)]
pub enum PatternError {
    /// a character that is neither an alive nor a dead cell.
    #[error("unknown cell {ch:?} at line {line}, column {column}")]
    UnknownCell {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        ch: char,
    },

    /// an `!origin` line that does not hold two integers.
    #[error("malformed origin directive at line {line}: {text:?}")]
    BadOrigin { line: usize, text: String },

    /// a cell whose offset from the origin leaves the coordinate range.
    #[error("cell at line {line}, column {column} is out of the coordinate range")]
    OutOfRange { line: usize, column: usize },

    #[error("pattern file i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// errors that terminate a run.
#[derive(Debug, Error)]
pub enum SimError {
    /// a live cell sits on the edge of the `i32` range, so its neighbors cannot be named.
    #[error("coordinate out of range near {0:?}")]
    CoordinateOutOfRange(Pos),

    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// terminal or file output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// command line or recorder configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}
