
use std::collections::HashMap;

use super::{Letter, Square, Tile};

/// Rules that infuence the score
pub struct ScoreRules<Scoring: LetterScoring> {
    pub scoring: Scoring,
    /// The amount of bonus points in case of bingo (all seven tiles of the rack are played)
    pub extra_bonus: u32,
}

impl<Scoring: LetterScoring> ScoreRules<Scoring> {
    pub fn new(scoring: Scoring) -> Self {
        Self { scoring, extra_bonus: 50 }
    }
}

impl Default for ScoreRules<EnglishScrabbleScoring> {
    fn default() -> Self {
        Self::new(EnglishScrabbleScoring)
    }
}

/// Face value of the letters
pub trait LetterScoring: Sync {
    fn letter_value(&self, letter: Letter) -> u32;

    /// Blanks are worth nothing whatever letter they show
    fn score_for(&self, tile: &Tile) -> u32 {
        match tile {
            Tile::Blank(_) => 0,
            Tile::Letter(l) => self.letter_value(*l),
        }
    }
}

impl<S: LetterScoring + ?Sized> LetterScoring for Box<S> {
    fn letter_value(&self, letter: Letter) -> u32 {
        (**self).letter_value(letter)
    }
}

/// Premium squares, asked once per square when a board is built
pub trait BoardBonus {
    fn bonus_at(&self, square: Square, size: usize) -> Bonus;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Bonus {
    pub letter: u32,
    pub word: u32,
}

impl Bonus {
    pub const NONE: Bonus = Bonus { letter: 1, word: 1 };
}

pub struct EnglishScrabbleScoring;
impl LetterScoring for EnglishScrabbleScoring {
    fn letter_value(&self, letter: Letter) -> u32 {
        match letter.byte() {
            b'A' | b'E' | b'I' | b'L' | b'N' | b'O' | b'R' | b'S' | b'T' | b'U' => 1,
            b'D' | b'G' => 2,
            b'B' | b'C' | b'M' | b'P' => 3,
            b'F' | b'H' | b'V' | b'W' | b'Y' => 4,
            b'K' => 5,
            b'J' | b'X' => 8,
            b'Q' | b'Z' => 10,
            _ => unreachable!("Letter is always A-Z"),
        }
    }
}

/// Letter values given one by one, e.g. from a config file
///
/// Letters missing from the map are worth nothing.
pub struct MapLetterScoring {
    values: [u32; 26],
}

impl MapLetterScoring {
    pub fn new(map: &HashMap<char, u32>) -> Self {
        let mut values = [0; 26];
        for (&c, &points) in map {
            match Letter::new(c) {
                Some(letter) => values[letter.index()] = points,
                None => log::warn!("ignoring score for {:?}, not a letter", c),
            }
        }
        for letter in Letter::alphabet() {
            if !map.contains_key(&letter.as_char()) && !map.contains_key(&letter.as_blank_char()) {
                log::warn!("no score given for {}, counting it as 0", letter);
            }
        }
        Self { values }
    }
}

impl LetterScoring for MapLetterScoring {
    fn letter_value(&self, letter: Letter) -> u32 {
        self.values[letter.index()]
    }
}

/// The standard premium squares, laid out for the 15x15 board
///
/// Other sizes get the same pattern folded around their own centre.
pub struct ScrabbleBonus;
impl BoardBonus for ScrabbleBonus {
    fn bonus_at(&self, square: Square, size: usize) -> Bonus {
        let centre = (size + 1) / 2;

        fn fold_half(a: usize, centre: usize) -> usize {
            if a >= centre {
                a - centre
            } else {
                centre - a
            }
        }

        // use the fact the bonus are symetrical from center
        let row = fold_half(square.y, centre);
        let col = fold_half(square.x, centre);

        match (row, col) {
            | (7, 0) | (0, 7)
            | (7, 7) => Bonus { letter: 1, word: 3 },

            | (1, 1)
            | (4, 0) | (0, 4)
            | (5, 1) | (1, 5)
            | (7, 4) | (4, 7) => Bonus { letter: 2, word: 1 },

            | (2, 2)
            | (6, 2) | (2, 6) => Bonus { letter: 3, word: 1 },

            (row, col) if row == col && row < 7 => Bonus { letter: 1, word: 2 },

            _ => Bonus::NONE,
        }
    }
}

/// No premium squares at all
pub struct PlainBonus;
impl BoardBonus for PlainBonus {
    fn bonus_at(&self, _square: Square, _size: usize) -> Bonus {
        Bonus::NONE
    }
}

#[test]
fn standard_layout() {
    let bonus = |x, y| ScrabbleBonus.bonus_at(Square::new(x, y), 15);

    assert_eq!(bonus(8, 8), Bonus { letter: 1, word: 2 });
    for &(x, y) in &[(1, 1), (8, 1), (15, 1), (1, 8), (15, 15)] {
        assert_eq!(bonus(x, y), Bonus { letter: 1, word: 3 });
    }
    for &(x, y) in &[(2, 2), (5, 5), (14, 14), (11, 5)] {
        assert_eq!(bonus(x, y), Bonus { letter: 1, word: 2 });
    }
    for &(x, y) in &[(6, 2), (2, 6), (6, 6), (10, 10), (14, 10)] {
        assert_eq!(bonus(x, y), Bonus { letter: 3, word: 1 });
    }
    for &(x, y) in &[(4, 1), (1, 4), (7, 7), (9, 9), (7, 3), (12, 8), (4, 8)] {
        assert_eq!(bonus(x, y), Bonus { letter: 2, word: 1 });
    }
    assert_eq!(bonus(8, 7), Bonus::NONE);
    assert_eq!(bonus(2, 1), Bonus::NONE);
}

#[test]
fn english_values() {
    let value = |c| EnglishScrabbleScoring.letter_value(Letter::new(c).unwrap());
    assert_eq!(value('C'), 3);
    assert_eq!(value('A'), 1);
    assert_eq!(value('T'), 1);
    assert_eq!(value('Q'), 10);
    assert_eq!(value('X'), 8);
    assert_eq!(value('Y'), 4);

    let blank = Tile::Blank(Letter::new('Z').unwrap());
    assert_eq!(EnglishScrabbleScoring.score_for(&blank), 0);
}

#[test]
fn values_from_map() {
    let mut map = HashMap::new();
    map.insert('a', 2);
    map.insert('Z', 7);
    map.insert('!', 100);
    let scoring = MapLetterScoring::new(&map);
    assert_eq!(scoring.letter_value(Letter::new('A').unwrap()), 2);
    assert_eq!(scoring.letter_value(Letter::new('Z').unwrap()), 7);
    assert_eq!(scoring.letter_value(Letter::new('B').unwrap()), 0);
}
