//! The grid: premium squares, placed tiles, and moving around

use std::fmt;

use super::score_rules::{BoardBonus, ScrabbleBonus};
use super::{BoardError, Bonus, Direction, Square, Tile, BOARD_SIZE};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Only counts for the move that fills the cell
    pub bonus: Bonus,
    pub tile: Option<Tile>,
}

/// A square board of side `size`, wrapped in a one cell border ring
///
/// Cells are addressed by 1-based [`Square`]s; the ring (`0` and `size + 1`
/// on either axis) never holds a tile, so walks along a line always stop on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major, `(size + 2)^2` cells including the ring
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: usize, bonuses: &impl BoardBonus) -> Self {
        assert!(size > 0, "a board needs at least one square");
        let side = size + 2;
        let mut cells = vec![Cell { bonus: Bonus::NONE, tile: None }; side * side];
        for y in 1..=size {
            for x in 1..=size {
                cells[y * side + x].bonus = bonuses.bonus_at(Square::new(x, y), size);
            }
        }
        Self { size, cells }
    }

    /// An empty 15x15 board with the standard premium squares
    pub fn standard() -> Self {
        Self::new(BOARD_SIZE, &ScrabbleBonus)
    }

    /// Reads a board written one row per line
    ///
    /// `.`, `_` and space are empty squares, uppercase letters are tiles and
    /// lowercase letters are blanks showing that letter. Missing rows and
    /// short rows are left empty.
    pub fn from_rows(text: &str, size: usize, bonuses: &impl BoardBonus) -> Result<Self, BoardError> {
        let mut board = Self::new(size, bonuses);
        let rows: Vec<&str> = text.lines().collect();
        if rows.len() > size {
            return Err(BoardError::TooManyRows { max: size, got: rows.len() });
        }
        for (y, row) in rows.into_iter().enumerate() {
            let row = row.trim_end_matches('\r');
            if row.chars().count() > size {
                return Err(BoardError::RowTooLong { row: y + 1, max: size });
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '.' | '_' | ' ' => {}
                    ch => match Tile::from_char(ch) {
                        Some(tile) => board.set(Square::new(x + 1, y + 1), tile),
                        None => {
                            return Err(BoardError::InvalidSquare { ch, row: y + 1, col: x + 1 })
                        }
                    },
                }
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, square: Square) -> usize {
        let limit = self.size + 1;
        assert!(
            square.x <= limit && square.y <= limit,
            "square {:?} is outside a board of size {}",
            square,
            self.size,
        );
        square.y * (self.size + 2) + square.x
    }

    /// The square at column `x`, row `y`; `0` and `size + 1` are the border
    pub fn get(&self, x: usize, y: usize) -> Square {
        let square = Square::new(x, y);
        self.index(square);
        square
    }

    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[self.index(square)]
    }

    pub fn tile(&self, square: Square) -> Option<Tile> {
        self.cell(square).tile
    }

    pub fn bonus(&self, square: Square) -> Bonus {
        self.cell(square).bonus
    }

    /// Puts a tile on the board
    pub fn set(&mut self, square: Square, tile: Tile) {
        assert!(!self.is_border(square), "cannot put a tile on the border at {:?}", square);
        let i = self.index(square);
        self.cells[i].tile = Some(tile);
    }

    /// True iff no tile has been placed yet
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.tile.is_none())
    }

    pub fn centre(&self) -> Square {
        let c = (self.size + 1) / 2;
        Square::new(c, c)
    }

    pub fn is_border(&self, square: Square) -> bool {
        let limit = self.size + 1;
        square.x == 0 || square.y == 0 || square.x == limit || square.y == limit
    }

    /// The square `delta` steps along `dir`, if it is on the board or its border
    pub fn try_neighbour(&self, square: Square, dir: Direction, delta: isize) -> Option<Square> {
        let mut next = square;
        let coord = square[dir] as isize + delta;
        if coord < 0 || coord > (self.size + 1) as isize || square[dir.perp()] > self.size + 1 {
            return None;
        }
        next[dir] = coord as usize;
        Some(next)
    }

    /// The square `delta` steps along `dir`, possibly on the border
    ///
    /// Panics when stepping past the border.
    pub fn neighbour(&self, square: Square, dir: Direction, delta: isize) -> Square {
        self.try_neighbour(square, dir, delta).unwrap_or_else(|| {
            panic!("{} steps {:?} from {:?} leaves the board", delta, dir, square)
        })
    }

    /// Whether one of the four squares around `square` holds a tile
    pub fn touches_tile(&self, square: Square) -> bool {
        Direction::ALL.iter().any(|&dir| {
            [-1, 1].iter().any(|&delta| {
                self.try_neighbour(square, dir, delta)
                    .map_or(false, |n| self.tile(n).is_some())
            })
        })
    }

    /// The playable squares, row by row
    pub fn all_squares(&self) -> impl Iterator<Item = Square> {
        let size = self.size;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| Square::new(x, y)))
    }

    /// The tiles right before `square` along `dir`, in reading order
    pub fn tiles_before(&self, square: Square, dir: Direction) -> Vec<Tile> {
        let mut tiles = self.run(square, dir, -1);
        tiles.reverse();
        tiles
    }

    /// The tiles right after `square` along `dir`, in reading order
    pub fn tiles_after(&self, square: Square, dir: Direction) -> Vec<Tile> {
        self.run(square, dir, 1)
    }

    fn run(&self, square: Square, dir: Direction, step: isize) -> Vec<Tile> {
        let mut tiles = vec![];
        let mut head = square;
        loop {
            head = self.neighbour(head, dir, step);
            match self.tile(head) {
                Some(tile) => tiles.push(tile),
                // the border is always empty
                None => break,
            }
        }
        tiles
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for x in 1..=self.size {
            write!(f, "{}", super::column_letter(x))?;
        }
        writeln!(f)?;
        for y in 1..=self.size {
            write!(f, "{:>2} ", y)?;
            for x in 1..=self.size {
                match self.tile(Square::new(x, y)) {
                    Some(tile) => write!(f, "{}", tile.to_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_rules::PlainBonus;
    use crate::Letter;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    #[test]
    fn navigation() {
        let board = Board::standard();
        let corner = board.get(1, 1);

        assert!(board.is_empty());
        assert_eq!(board.centre(), Square::new(8, 8));
        assert_eq!(board.bonus(board.centre()), Bonus { letter: 1, word: 2 });

        assert!(board.is_border(board.neighbour(corner, Direction::Horizontal, -1)));
        assert!(board.is_border(board.neighbour(corner, Direction::Vertical, -1)));
        assert!(!board.is_border(corner));
        assert!(board.is_border(board.get(16, 4)));
        assert_eq!(board.neighbour(corner, Direction::Vertical, 3), Square::new(1, 4));
        assert_eq!(board.try_neighbour(corner, Direction::Horizontal, -2), None);
        assert_eq!(board.try_neighbour(board.get(15, 3), Direction::Horizontal, 2), None);
    }

    #[test]
    #[should_panic]
    fn outside_the_border_panics() {
        Board::standard().get(17, 1);
    }

    #[test]
    #[should_panic]
    fn stepping_past_the_border_panics() {
        let board = Board::standard();
        board.neighbour(board.get(0, 5), Direction::Horizontal, -1);
    }

    #[test]
    fn squares_are_row_major() {
        let board = Board::new(3, &PlainBonus);
        let squares: Vec<_> = board.all_squares().map(|s| (s.x, s.y)).collect();
        assert_eq!(
            squares,
            vec![(1, 1), (2, 1), (3, 1), (1, 2), (2, 2), (3, 2), (1, 3), (2, 3), (3, 3)],
        );
    }

    #[test]
    fn parse_and_display() {
        let board = Board::from_rows("...\n.Ca\n_ T", 3, &PlainBonus).unwrap();
        assert!(!board.is_empty());
        assert_eq!(board.tile(Square::new(2, 2)), Some(Tile::Letter(letter('C'))));
        assert_eq!(board.tile(Square::new(3, 2)), Some(Tile::Blank(letter('A'))));
        assert_eq!(board.tile(Square::new(3, 3)), Some(Tile::Letter(letter('T'))));
        assert_eq!(board.tile(Square::new(2, 3)), None);
        assert_eq!(board.to_string(), "   ABC\n 1 ...\n 2 .Ca\n 3 ..T\n");

        assert_eq!(
            Board::from_rows("..\n..\n..\n..", 3, &PlainBonus),
            Err(BoardError::TooManyRows { max: 3, got: 4 }),
        );
        assert_eq!(
            Board::from_rows("....", 3, &PlainBonus),
            Err(BoardError::RowTooLong { row: 1, max: 3 }),
        );
        assert_eq!(
            Board::from_rows("\n.3", 3, &PlainBonus),
            Err(BoardError::InvalidSquare { ch: '3', row: 2, col: 2 }),
        );
    }

    #[test]
    fn runs_of_tiles() {
        let board = Board::from_rows(".....\nAB.CD\n.....", 5, &PlainBonus).unwrap();
        let gap = Square::new(3, 2);
        let word = |tiles: Vec<Tile>| tiles.into_iter().map(|t| t.to_char()).collect::<String>();

        assert_eq!(word(board.tiles_before(gap, Direction::Horizontal)), "AB");
        assert_eq!(word(board.tiles_after(gap, Direction::Horizontal)), "CD");
        assert_eq!(word(board.tiles_before(gap, Direction::Vertical)), "");
        assert!(board.touches_tile(gap));
        assert!(board.touches_tile(Square::new(1, 1)));
        assert!(!board.touches_tile(Square::new(3, 1)));
        assert!(!board.touches_tile(Square::new(3, 3)));
    }
}
