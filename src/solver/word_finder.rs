//! Anchor based backtracking search for every legal placement
//!
//! From each anchor, and in each direction, a word is grown in two phases: a
//! left part made of rack tiles (or the tiles already lying before the
//! anchor), then an extension through the anchor that follows the board,
//! the rack and the cross checks. The dictionary automaton is walked along the
//! way, so dead prefixes are cut as soon as they appear.

use std::collections::HashSet;

use super::cross_check::CrossCheckCache;
use super::{Generation, SearchLimits};
use crate::dictionary::Node;
use crate::{Board, Direction, Letter, Move, Rack, Square, WordAutomaton};

/// Squares a new word has to go through, row by row
///
/// The centre on an empty board, otherwise every empty square touching a tile.
pub fn anchors(board: &Board) -> Vec<Square> {
    if board.is_empty() {
        return vec![board.centre()];
    }
    board.all_squares().filter(|&square| is_anchor(board, square)).collect()
}

fn is_anchor(board: &Board, square: Square) -> bool {
    board.tile(square).is_none() && board.touches_tile(square)
}

pub(crate) struct WordFinder<'a, 'l> {
    board: &'a Board,
    dictionary: &'a WordAutomaton,
    cross_checks: CrossCheckCache<'a>,
    limits: &'a SearchLimits<'l>,
    anchor: Square,
    dir: Direction,
    /// The word being built, lowercase for blanks
    word: String,
    found: HashSet<Move>,
    moves: Vec<Move>,
    truncated: bool,
}

impl<'a, 'l> WordFinder<'a, 'l> {
    pub fn new(board: &'a Board, dictionary: &'a WordAutomaton, limits: &'a SearchLimits<'l>) -> Self {
        Self {
            board,
            dictionary,
            cross_checks: CrossCheckCache::new(board, dictionary),
            limits,
            anchor: board.centre(),
            dir: Direction::Horizontal,
            word: String::new(),
            found: HashSet::new(),
            moves: vec![],
            truncated: false,
        }
    }

    pub fn run(mut self, rack: Rack) -> Generation {
        let anchors = anchors(self.board);
        if !rack.is_empty() {
            'search: for &anchor in &anchors {
                for &dir in &Direction::ALL {
                    if self.truncated {
                        break 'search;
                    }
                    self.from_anchor(anchor, dir, rack);
                }
            }
        }
        log::debug!(
            "{} anchors, {} cross checks, {} moves for rack {}{}",
            anchors.len(),
            self.cross_checks.len(),
            self.moves.len(),
            rack,
            if self.truncated { " (truncated)" } else { "" },
        );
        Generation { moves: self.moves, truncated: self.truncated }
    }

    fn from_anchor(&mut self, anchor: Square, dir: Direction, rack: Rack) {
        self.anchor = anchor;
        self.dir = dir;
        self.word.clear();

        if self.board.tile(self.board.neighbour(anchor, dir, -1)).is_some() {
            // the left part is already on the board
            let prefix = self.board.tiles_before(anchor, dir);
            let node = self.dictionary.transition_letters(
                self.dictionary.root(),
                prefix.iter().map(|tile| tile.letter()),
            );
            if let Some(node) = node {
                self.word.extend(prefix.iter().map(|tile| tile.letter().as_char()));
                self.extend_right(rack, node, anchor);
            }
        } else {
            let limit = self.left_limit();
            self.left_part(rack, self.dictionary.root(), limit);
        }
    }

    /// Free squares before the anchor, up to the previous anchor or the edge
    ///
    /// None of them touches a tile, so any letter may go there.
    fn left_limit(&self) -> usize {
        let mut limit = 0;
        let mut head = self.board.neighbour(self.anchor, self.dir, -1);
        while !self.board.is_border(head) && !is_anchor(self.board, head) {
            limit += 1;
            head = self.board.neighbour(head, self.dir, -1);
        }
        limit
    }

    fn left_part(&mut self, rack: Rack, node: Node, limit: usize) {
        if self.out_of_budget() {
            return;
        }
        self.extend_right(rack, node, self.anchor);
        if limit == 0 {
            return;
        }
        for letter in Letter::alphabet() {
            let next = match self.dictionary.transition(node, letter) {
                Some(next) => next,
                None => continue,
            };
            if let Some(rest) = rack.remove(letter) {
                self.with_letter(letter.as_char(), |this| this.left_part(rest, next, limit - 1));
            }
            if let Some(rest) = rack.remove_blank() {
                self.with_letter(letter.as_blank_char(), |this| this.left_part(rest, next, limit - 1));
            }
        }
    }

    fn extend_right(&mut self, rack: Rack, node: Node, square: Square) {
        if self.out_of_budget() {
            return;
        }
        let tile = self.board.tile(square);

        // past the anchor means at least one tile was placed
        if tile.is_none() && square != self.anchor && self.dictionary.is_accepting(node) {
            self.record(square);
        }
        if self.board.is_border(square) {
            return;
        }

        let next_square = self.board.neighbour(square, self.dir, 1);
        match tile {
            Some(tile) => {
                let letter = tile.letter();
                if let Some(next) = self.dictionary.transition(node, letter) {
                    self.with_letter(letter.as_char(), |this| this.extend_right(rack, next, next_square));
                }
            }
            None => {
                if rack.is_empty() {
                    return;
                }
                let allowed = self.cross_checks.allowed_letters(square, self.dir.perp());
                for letter in allowed.iter() {
                    let next = match self.dictionary.transition(node, letter) {
                        Some(next) => next,
                        None => continue,
                    };
                    if let Some(rest) = rack.remove(letter) {
                        self.with_letter(letter.as_char(), |this| this.extend_right(rest, next, next_square));
                    }
                    if let Some(rest) = rack.remove_blank() {
                        self.with_letter(letter.as_blank_char(), |this| {
                            this.extend_right(rest, next, next_square)
                        });
                    }
                }
            }
        }
    }

    /// Runs `f` with `c` appended to the word, and takes it off again after
    fn with_letter(&mut self, c: char, f: impl FnOnce(&mut Self)) {
        self.word.push(c);
        f(self);
        self.word.pop();
    }

    /// Records the current word as ending just before `end`
    fn record(&mut self, end: Square) {
        let start = self.board.neighbour(end, self.dir, -(self.word.len() as isize));
        let found = Move::new(start, self.dir, self.word.clone());
        if self.found.insert(found.clone()) {
            self.moves.push(found);
        }
    }

    fn out_of_budget(&mut self) -> bool {
        if !self.truncated && self.limits.exceeded() {
            log::debug!("search limit hit after {} moves", self.moves.len());
            self.truncated = true;
        }
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_rules::PlainBonus;
    use crate::solver::generate;

    fn moves_of(board: &Board, rack: &str, words: &[&str]) -> Vec<String> {
        let dictionary = WordAutomaton::build(words.iter().copied());
        generate(board, &rack.parse().unwrap(), &dictionary)
            .iter()
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn anchors_on_empty_and_filled_boards() {
        let empty = Board::new(5, &PlainBonus);
        assert_eq!(anchors(&empty), vec![Square::new(3, 3)]);

        let board = Board::from_rows("\n\n..A", 5, &PlainBonus).unwrap();
        assert_eq!(
            anchors(&board),
            vec![Square::new(3, 2), Square::new(2, 3), Square::new(4, 3), Square::new(3, 4)],
        );
    }

    #[test]
    fn left_limit_stops_at_previous_anchor() {
        let board = Board::from_rows("A......", 7, &PlainBonus).unwrap();
        let dictionary = WordAutomaton::build(vec!["AB"]);
        let limits = SearchLimits::default();
        let mut finder = WordFinder::new(&board, &dictionary, &limits);

        // (2, 1) is an anchor, so only (3, 1) to (5, 1) are free before (6, 1)
        finder.anchor = Square::new(6, 1);
        finder.dir = Direction::Horizontal;
        assert_eq!(finder.left_limit(), 3);

        finder.anchor = Square::new(1, 2);
        assert_eq!(finder.left_limit(), 0);
    }

    #[test]
    fn empty_board_goes_through_centre() {
        let board = Board::new(5, &PlainBonus);
        let mut found = moves_of(&board, "AT", &["AT", "TA"]);
        found.sort();
        assert_eq!(
            found,
            vec!["3B AT", "3B TA", "3C AT", "3C TA", "C2 AT", "C2 TA", "C3 AT", "C3 TA"],
        );
    }

    #[test]
    fn extends_tiles_on_the_board() {
        let board = Board::from_rows("\n\n.CAT.", 5, &PlainBonus).unwrap();
        let found = moves_of(&board, "S", &["CAT", "CATS", "SCAT"]);
        assert_eq!(found, vec!["3A SCAT", "3B CATS"]);
    }

    #[test]
    fn plays_through_and_around_tiles() {
        let board = Board::from_rows("\n\n..A..", 5, &PlainBonus).unwrap();
        let mut found = moves_of(&board, "BT", &["BAT", "TAB", "AT"]);
        found.sort();
        assert_eq!(
            found,
            vec!["3B BAT", "3B TAB", "3C AT", "C2 BAT", "C2 TAB", "C3 AT"],
        );
    }

    #[test]
    fn cross_words_must_be_valid() {
        // whatever goes on C2 sits on top of the T and has to make ?T
        let board = Board::from_rows("\n...\n..T", 3, &PlainBonus).unwrap();
        let found = moves_of(&board, "AO", &["AT", "OA", "AO"]);
        assert!(found.contains(&"2B OA".to_string()));
        assert!(!found.contains(&"2B AO".to_string()));
    }

    #[test]
    fn blanks_are_tried_as_well_as_letters() {
        let board = Board::new(3, &PlainBonus);
        let found = moves_of(&board, "A*", &["AA"]);
        assert_eq!(
            found,
            vec!["2B Aa", "2B aA", "2A Aa", "2A aA", "B2 Aa", "B2 aA", "B1 Aa", "B1 aA"],
        );
    }

    #[test]
    fn empty_rack_finds_nothing() {
        let board = Board::from_rows("\n\n.CAT.", 5, &PlainBonus).unwrap();
        assert!(moves_of(&board, "", &["CAT", "CATS"]).is_empty());
    }
}
