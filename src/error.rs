//! Errors that callers are expected to handle
//!
//! Out-of-range coordinates are not in here: those are bugs in the caller and
//! panic where they are detected.

use std::io;

use super::{Letter, Square};

/// Why a play submitted from outside the generator is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenPlay {
    #[error("{0} is not a letter")]
    InvalidLetter(char),

    #[error("the move leaves the board at {0}")]
    OffBoard(Square),

    #[error("{played} does not match {existing} already on {square}")]
    Conflict {
        square: Square,
        existing: Letter,
        played: char,
    },

    #[error("the move places no tile")]
    NoTilesPlaced,

    #[error("the word continues onto the tile at {0}")]
    IncompleteWord(Square),

    #[error("the rack does not hold {0}")]
    MissingTiles(String),

    #[error("the first move must cover the centre square")]
    MissesCentre,

    #[error("the move does not touch any tile on the board")]
    Disconnected,

    #[error("{0} is not in the dictionary")]
    UnknownWord(String),

    #[error("an exchange needs at least one tile")]
    EmptyExchange,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RackError {
    #[error("a rack holds at most {max} tiles, got {got}")]
    TooManyTiles { max: usize, got: usize },

    #[error("{0:?} is neither a letter nor a blank (* or ?)")]
    InvalidTile(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("the board has {max} rows, got {got}")]
    TooManyRows { max: usize, got: usize },

    #[error("row {row} is longer than {max} squares")]
    RowTooLong { row: usize, max: usize },

    #[error("{ch:?} at row {row}, column {col} is neither a letter nor empty (. _ or space)")]
    InvalidSquare { ch: char, row: usize, col: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected `<coordinate> <word>`, got {0:?}")]
    Malformed(String),

    #[error("invalid coordinate {0:?}")]
    Coordinate(String),

    #[error("invalid word {0:?}")]
    Word(String),

    #[error("invalid tile {0:?}")]
    Tile(char),
}

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid automaton data: {0}")]
    Fst(#[from] fst::Error),
}
