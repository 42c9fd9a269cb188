//! Which letters fit on an empty square given the word across it
use std::collections::HashMap;

use super::letter_set::LetterSet;
use crate::{Board, Direction, Letter, Square, WordAutomaton};

/// The letters that can go on `square` without spelling a non-word along `dir`
///
/// With no tile next to `square` along `dir` no word is formed and every
/// letter is allowed.
pub fn cross_check(board: &Board, dictionary: &WordAutomaton, square: Square, dir: Direction) -> LetterSet {
    let prefix = board.tiles_before(square, dir);
    let suffix = board.tiles_after(square, dir);

    if prefix.is_empty() && suffix.is_empty() {
        return LetterSet::ALPHABET;
    }

    let node = match dictionary.transition_letters(dictionary.root(), prefix.iter().map(|t| t.letter())) {
        Some(node) => node,
        None => return LetterSet::empty(),
    };

    Letter::alphabet()
        .filter(|&letter| {
            dictionary
                .transition(node, letter)
                .and_then(|mid| dictionary.transition_letters(mid, suffix.iter().map(|t| t.letter())))
                .map_or(false, |end| dictionary.is_accepting(end))
        })
        .collect()
}

/// Cross checks computed on demand and kept for one generation pass
///
/// Tied to one board state; build a new one whenever the board changes.
pub struct CrossCheckCache<'a> {
    board: &'a Board,
    dictionary: &'a WordAutomaton,
    computed: HashMap<(Square, Direction), LetterSet>,
}

impl<'a> CrossCheckCache<'a> {
    pub fn new(board: &'a Board, dictionary: &'a WordAutomaton) -> Self {
        Self { board, dictionary, computed: HashMap::new() }
    }

    pub fn allowed_letters(&mut self, square: Square, dir: Direction) -> LetterSet {
        let (board, dictionary) = (self.board, self.dictionary);
        *self
            .computed
            .entry((square, dir))
            .or_insert_with(|| cross_check(board, dictionary, square, dir))
    }

    /// Number of squares computed so far
    pub fn len(&self) -> usize {
        self.computed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.computed.is_empty()
    }
}
