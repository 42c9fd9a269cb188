
pub mod board;
pub mod dictionary;
pub mod error;
pub mod rack;
pub mod score_rules;
pub mod solver;

use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE: usize = 15;

/// Number of tiles on a full rack, playing all of them is a bingo
pub const RACK_SIZE: usize = 7;

/// Shortest word kept in the dictionary used for move search
pub const MIN_WORD_LEN: usize = 2;

pub use board::{Board, Cell};
pub use dictionary::{WordAutomaton, WordList};
pub use error::{BoardError, DictionaryError, ForbiddenPlay, NotationError, RackError};
pub use rack::Rack;
pub use score_rules::{BoardBonus, Bonus, LetterScoring, ScoreRules};
pub use solver::score::MoveMetaInformation;

/// An uppercase letter `A` to `Z`
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Accepts a letter in either case
    pub fn new(c: char) -> Option<Letter> {
        if c.is_ascii_alphabetic() {
            Some(Letter(c.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    pub fn from_index(i: usize) -> Letter {
        assert!(i < 26, "letter index out of range: {}", i);
        Letter(b'A' + i as u8)
    }

    /// Position in the alphabet, `A` is 0
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// The lowercase form used to mark a blank showing this letter
    pub fn as_blank_char(self) -> char {
        self.0.to_ascii_lowercase() as char
    }

    /// `A` to `Z`, in order
    pub fn alphabet() -> impl Iterator<Item = Letter> {
        (b'A'..=b'Z').map(Letter)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A tile lying on the board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tile {
    Letter(Letter),
    /// A blank, showing the letter it was assigned when played. Scores zero.
    Blank(Letter),
}

impl Tile {
    /// Uppercase is a regular tile, lowercase a blank
    pub fn from_char(c: char) -> Option<Tile> {
        let letter = Letter::new(c)?;
        if c.is_ascii_lowercase() {
            Some(Tile::Blank(letter))
        } else {
            Some(Tile::Letter(letter))
        }
    }

    pub fn letter(self) -> Letter {
        match self {
            Tile::Letter(l) | Tile::Blank(l) => l,
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Tile::Blank(_))
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Letter(l) => l.as_char(),
            Tile::Blank(l) => l.as_blank_char(),
        }
    }

    /// The rack tile spent to put this tile on the board
    pub fn rack_tile(self) -> RackTile {
        match self {
            Tile::Letter(l) => RackTile::Letter(l),
            Tile::Blank(_) => RackTile::Blank,
        }
    }
}

/// A tile sitting on a rack
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RackTile {
    Letter(Letter),
    Blank,
}

impl RackTile {
    /// `*` and `?` are blanks, letters are accepted in either case
    pub fn from_char(c: char) -> Option<RackTile> {
        match c {
            '*' | '?' => Some(RackTile::Blank),
            c => Letter::new(c).map(RackTile::Letter),
        }
    }
}

impl fmt::Display for RackTile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RackTile::Letter(l) => write!(f, "{}", l),
            RackTile::Blank => write!(f, "*"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Both directions, in the order the search visits them
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    pub fn perp(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// Coordinates of a board cell, 1-based
///
/// `0` and `size + 1` address the border ring around the board, which never
/// holds a tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    /// Column, grows left to right
    pub x: usize,
    /// Row, grows top to bottom
    pub y: usize,
}

impl Square {
    pub fn new(x: usize, y: usize) -> Self {
        Square { x, y }
    }
}

impl std::ops::Index<Direction> for Square {
    type Output = usize;
    /// The coordinate that changes in that direction
    fn index(&self, dir: Direction) -> &Self::Output {
        match dir {
            Direction::Vertical => &self.y,
            Direction::Horizontal => &self.x,
        }
    }
}

impl std::ops::IndexMut<Direction> for Square {
    /// The coordinate that changes in that direction
    fn index_mut(&mut self, dir: Direction) -> &mut Self::Output {
        match dir {
            Direction::Vertical => &mut self.y,
            Direction::Horizontal => &mut self.x,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.x), self.y)
    }
}

fn column_letter(x: usize) -> char {
    if (1..=26).contains(&x) {
        (b'A' + (x - 1) as u8) as char
    } else {
        '?'
    }
}

/// A candidate placement of a word on the board
///
/// `letters` spells the whole word from `start` along `direction`, including
/// letters already on the board that the word passes through. A lowercase
/// letter is a blank played as that letter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub start: Square,
    pub direction: Direction,
    pub letters: String,
}

impl Move {
    pub fn new(start: Square, direction: Direction, letters: impl Into<String>) -> Self {
        Move { start, direction, letters: letters.into() }
    }

    pub fn len(&self) -> usize {
        self.letters.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The squares covered by the word, first to last
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        let (start, dir) = (self.start, self.direction);
        (0..self.len()).map(move |i| {
            let mut square = start;
            square[dir] += i;
            square
        })
    }

    /// The word in uppercase, without blank marking
    pub fn word(&self) -> String {
        self.letters.to_ascii_uppercase()
    }
}

/// `8H WORD` for a horizontal move (row then column), `H8 WORD` for a vertical one
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Square { x, y } = self.start;
        match self.direction {
            Direction::Horizontal => write!(f, "{}{} {}", y, column_letter(x), self.letters),
            Direction::Vertical => write!(f, "{}{} {}", column_letter(x), y, self.letters),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (coord, letters) = match (parts.next(), parts.next(), parts.next()) {
            (Some(coord), Some(letters), None) => (coord, letters),
            _ => return Err(NotationError::Malformed(s.to_owned())),
        };

        let bad_coord = || NotationError::Coordinate(coord.to_owned());
        let first = coord.chars().next().ok_or_else(bad_coord)?;
        let (col, row, direction) = if first.is_ascii_digit() {
            let split = coord.find(|c: char| !c.is_ascii_digit()).ok_or_else(bad_coord)?;
            (&coord[split..], &coord[..split], Direction::Horizontal)
        } else if first.is_ascii_alphabetic() {
            (&coord[..1], &coord[1..], Direction::Vertical)
        } else {
            return Err(bad_coord());
        };

        let mut col_chars = col.chars();
        let x = match (col_chars.next(), col_chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                (c.to_ascii_uppercase() as u8 - b'A') as usize + 1
            }
            _ => return Err(bad_coord()),
        };
        let y: usize = row.parse().map_err(|_| bad_coord())?;
        if y == 0 {
            return Err(bad_coord());
        }

        if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(NotationError::Word(letters.to_owned()));
        }

        Ok(Move::new(Square::new(x, y), direction, letters))
    }
}

/// Something a player can do on their turn
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    PlayTiles(Move),
    /// Swap these rack tiles for new ones from the bag
    Exchange(Vec<RackTile>),
    Pass,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::PlayTiles(mov) => write!(f, "{}", mov),
            Action::Exchange(tiles) => {
                write!(f, "exchange ")?;
                for tile in tiles {
                    write!(f, "{}", tile)?;
                }
                Ok(())
            }
            Action::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for Action {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("pass") {
            return Ok(Action::Pass);
        }
        let mut parts = trimmed.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(keyword), Some(tiles), None) if keyword.eq_ignore_ascii_case("exchange") => {
                tiles
                    .chars()
                    .map(|c| RackTile::from_char(c).ok_or(NotationError::Tile(c)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Action::Exchange)
            }
            _ => trimmed.parse().map(Action::PlayTiles),
        }
    }
}

#[test]
fn move_notation() {
    let across = Move::new(Square::new(8, 8), Direction::Horizontal, "CAt");
    let down = Move::new(Square::new(3, 12), Direction::Vertical, "DOG");

    assert_eq!(across.to_string(), "8H CAt");
    assert_eq!(down.to_string(), "C12 DOG");

    assert_eq!("8H CAt".parse::<Move>(), Ok(across));
    assert_eq!("c12 DOG".parse::<Move>(), Ok(down));

    assert_eq!(
        "8H".parse::<Move>(),
        Err(NotationError::Malformed("8H".to_owned())),
    );
    assert_eq!(
        "88 CAT".parse::<Move>(),
        Err(NotationError::Coordinate("88".to_owned())),
    );
    assert_eq!(
        "H0 CAT".parse::<Move>(),
        Err(NotationError::Coordinate("H0".to_owned())),
    );
    assert_eq!(
        "H8 C-T".parse::<Move>(),
        Err(NotationError::Word("C-T".to_owned())),
    );
}

#[test]
fn move_squares() {
    let down = Move::new(Square::new(3, 12), Direction::Vertical, "DOG");
    assert_eq!(
        down.squares().collect::<Vec<_>>(),
        vec![Square::new(3, 12), Square::new(3, 13), Square::new(3, 14)],
    );
    assert_eq!(down.len(), 3);
    assert_eq!(Move::new(Square::new(1, 1), Direction::Horizontal, "aXe").word(), "AXE");
}

#[test]
fn action_notation() {
    assert_eq!("PASS".parse::<Action>(), Ok(Action::Pass));
    assert_eq!(
        "exchange QV*".parse::<Action>(),
        Ok(Action::Exchange(vec![
            RackTile::Letter(Letter::new('Q').unwrap()),
            RackTile::Letter(Letter::new('V').unwrap()),
            RackTile::Blank,
        ])),
    );
    assert_eq!(
        "exchange Q-".parse::<Action>(),
        Err(NotationError::Tile('-')),
    );

    let play: Action = "H8 CAT".parse().unwrap();
    assert_eq!(play, Action::PlayTiles(Move::new(Square::new(8, 8), Direction::Vertical, "CAT")));
    assert_eq!(play.to_string(), "H8 CAT");
    assert_eq!(Action::Exchange(vec![RackTile::Blank]).to_string(), "exchange *");
}

#[test]
fn tiles() {
    let blank = Tile::from_char('e').unwrap();
    assert_eq!(blank, Tile::Blank(Letter::new('E').unwrap()));
    assert!(blank.is_blank());
    assert_eq!(blank.to_char(), 'e');
    assert_eq!(blank.rack_tile(), RackTile::Blank);
    assert_eq!(Tile::from_char('E').unwrap().rack_tile(), RackTile::Letter(Letter::new('E').unwrap()));
    assert_eq!(Tile::from_char('1'), None);
    assert_eq!(Letter::alphabet().count(), 26);
    assert_eq!(Letter::from_index(25).as_char(), 'Z');
}
