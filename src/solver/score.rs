use crate::score_rules::{LetterScoring, ScoreRules};
use crate::{Board, ForbiddenPlay, Letter, Move, RackTile, Square, Tile, RACK_SIZE};

/// What a move does once laid on a given board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveMetaInformation {
    /// Squares the move fills, and what goes on them
    pub placed: Vec<(Square, Tile)>,
    /// Tiles taken from the rack, blanks included
    pub rack_tiles: Vec<RackTile>,
    /// The word along the move, uppercase
    pub main_word: String,
    /// Perpendicular words of two letters or more made by the new tiles, uppercase
    pub cross_words: Vec<String>,
    pub score: u32,
    /// All [`RACK_SIZE`] tiles were played
    pub is_bingo: bool,
}

/// Compute the score of a single move
///
/// Premium squares only count under the tiles the move places. Each new tile
/// also scores the perpendicular word it forms, if any. A lone tile written
/// along the direction where it makes no word only scores its cross word.
///
/// Letters of the move that disagree with tiles already on the board make it
/// a forbidden play. Over an occupied square only the letter counts: its case
/// is ignored and the tile lying there is what gets scored.
pub fn score(
    board: &Board,
    play: &Move,
    score_rules: &ScoreRules<impl LetterScoring>,
) -> Result<MoveMetaInformation, ForbiddenPlay> {
    let scoring = &score_rules.scoring;
    let dir = play.direction;

    if play.is_empty() {
        return Err(ForbiddenPlay::NoTilesPlaced);
    }
    if board.is_border(play.start) || play.start.x > board.size() || play.start.y > board.size() {
        return Err(ForbiddenPlay::OffBoard(play.start));
    }

    let mut placed = vec![];
    let mut cross_words = vec![];
    let mut main_word = String::with_capacity(play.letters.len());

    let mut word_score = 0;
    let mut word_multiplier = 1;
    let mut perp_score = 0;

    let mut square = play.start;
    for (i, c) in play.letters.chars().enumerate() {
        if i > 0 {
            square = match board.try_neighbour(square, dir, 1) {
                Some(next) if !board.is_border(next) => next,
                _ => {
                    let mut off = square;
                    off[dir] += 1;
                    return Err(ForbiddenPlay::OffBoard(off));
                }
            };
        }
        let letter = Letter::new(c).ok_or(ForbiddenPlay::InvalidLetter(c))?;
        main_word.push(letter.as_char());

        match board.tile(square) {
            Some(existing) => {
                if existing.letter() != letter {
                    return Err(ForbiddenPlay::Conflict {
                        square,
                        existing: existing.letter(),
                        played: c,
                    });
                }
                word_score += scoring.score_for(&existing);
            }
            None => {
                let tile = if c.is_ascii_lowercase() { Tile::Blank(letter) } else { Tile::Letter(letter) };
                let bonus = board.bonus(square);
                let letter_score = scoring.score_for(&tile) * bonus.letter;

                word_score += letter_score;
                word_multiplier *= bonus.word;

                let before = board.tiles_before(square, dir.perp());
                let after = board.tiles_after(square, dir.perp());
                if !before.is_empty() || !after.is_empty() {
                    let local_score: u32 = before.iter().chain(&after).map(|t| scoring.score_for(t)).sum();
                    perp_score += (local_score + letter_score) * bonus.word;

                    let cross_word = before
                        .iter()
                        .map(|t| t.letter().as_char())
                        .chain(std::iter::once(letter.as_char()))
                        .chain(after.iter().map(|t| t.letter().as_char()))
                        .collect();
                    cross_words.push(cross_word);
                }

                placed.push((square, tile));
            }
        }
    }

    let main_score = if main_word.len() == 1 && !cross_words.is_empty() { 0 } else { word_score * word_multiplier };
    let is_bingo = placed.len() == RACK_SIZE;
    let score = main_score + perp_score + if is_bingo { score_rules.extra_bonus } else { 0 };

    Ok(MoveMetaInformation {
        rack_tiles: placed.iter().map(|(_, tile)| tile.rack_tile()).collect(),
        placed,
        main_word,
        cross_words,
        score,
        is_bingo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_rules::{EnglishScrabbleScoring, PlainBonus};
    use crate::Direction;

    fn rules() -> ScoreRules<EnglishScrabbleScoring> {
        ScoreRules::default()
    }

    fn play(notation: &str) -> Move {
        notation.parse().unwrap()
    }

    #[test]
    fn first_move_on_the_centre() {
        let board = Board::standard();
        let meta = score(&board, &play("8H CAT"), &rules()).unwrap();

        assert_eq!(meta.score, (3 + 1 + 1) * 2);
        assert_eq!(meta.main_word, "CAT");
        assert!(meta.cross_words.is_empty());
        assert_eq!(meta.placed.len(), 3);
        assert!(!meta.is_bingo);
    }

    #[test]
    fn blanks_score_nothing_even_on_premium_squares() {
        let board = Board::standard();
        // the blank lands on the double letter of I7, A on a plain I8
        let meta = score(&board, &play("I7 zA"), &rules()).unwrap();
        assert_eq!(meta.score, 1);
        assert_eq!(meta.rack_tiles, vec![RackTile::Blank, RackTile::Letter(Letter::new('A').unwrap())]);
        assert_eq!(meta.placed[0].1, Tile::Blank(Letter::new('Z').unwrap()));
    }

    #[test]
    fn premiums_only_under_new_tiles() {
        let mut board = Board::standard();
        for (x, c) in (8..).zip("CAT".chars()) {
            board.set(Square::new(x, 8), Tile::from_char(c).unwrap());
        }
        // CATS: S on K8, a plain square; the double word under C is used up
        let meta = score(&board, &play("8H CATS"), &rules()).unwrap();
        assert_eq!(meta.score, 3 + 1 + 1 + 1);
        assert_eq!(meta.placed, vec![(Square::new(11, 8), Tile::from_char('S').unwrap())]);
        assert_eq!(meta.rack_tiles.len(), 1);
    }

    #[test]
    fn cross_words_add_up() {
        let board = Board::from_rows("\n.CAT\n", 5, &PlainBonus).unwrap();
        let rules = rules();
        // AT right under the AT of CAT
        let meta = score(&board, &Move::new(Square::new(3, 3), Direction::Horizontal, "AT"), &rules).unwrap();
        assert_eq!(meta.main_word, "AT");
        assert_eq!(meta.cross_words, vec!["AA", "TT"]);
        // AT (2) + AA (2) + TT (2)
        assert_eq!(meta.score, 6);
    }

    #[test]
    fn cross_word_takes_the_word_multiplier() {
        let mut board = Board::standard();
        board.set(Square::new(1, 2), Tile::from_char('X').unwrap());
        // A on A1 (triple word) under X makes AX down, and AT across
        let meta = score(&board, &play("1A AT"), &rules()).unwrap();
        assert_eq!(meta.cross_words, vec!["AX"]);
        // AT: (1 + 1) * 3 = 6; AX: (1 + 8) * 3 = 27
        assert_eq!(meta.score, 33);
    }

    #[test]
    fn bingo_bonus() {
        let board = Board::new(15, &PlainBonus);
        let meta = score(&board, &play("8B RETAINS"), &rules()).unwrap();
        assert!(meta.is_bingo);
        assert_eq!(meta.score, 7 + 50);

        let rules = ScoreRules { scoring: EnglishScrabbleScoring, extra_bonus: 35 };
        assert_eq!(score(&board, &play("8B RETAINS"), &rules).unwrap().score, 7 + 35);
    }

    #[test]
    fn conflicts_are_forbidden() {
        let board = Board::from_rows("\n.CAT\n", 5, &PlainBonus).unwrap();

        assert_eq!(
            score(&board, &Move::new(Square::new(2, 2), Direction::Horizontal, "COTS"), &rules()),
            Err(ForbiddenPlay::Conflict {
                square: Square::new(3, 2),
                existing: Letter::new('A').unwrap(),
                played: 'O',
            }),
        );
        // matching is case-insensitive
        assert!(score(&board, &Move::new(Square::new(2, 2), Direction::Horizontal, "cats"), &rules()).is_ok());
    }

    #[test]
    fn leaving_the_board_is_forbidden() {
        let board = Board::new(5, &PlainBonus);
        assert_eq!(
            score(&board, &Move::new(Square::new(4, 1), Direction::Horizontal, "CAT"), &rules()),
            Err(ForbiddenPlay::OffBoard(Square::new(6, 1))),
        );
        assert_eq!(
            score(&board, &Move::new(Square::new(9, 1), Direction::Vertical, "AT"), &rules()),
            Err(ForbiddenPlay::OffBoard(Square::new(9, 1))),
        );
        assert_eq!(
            score(&board, &Move::new(Square::new(1, 1), Direction::Vertical, "A1"), &rules()),
            Err(ForbiddenPlay::InvalidLetter('1')),
        );
    }

    #[test]
    fn lone_tile_scores_its_cross_word_once() {
        let board = Board::from_rows("\n.CAT\n", 5, &PlainBonus).unwrap();
        // S after the T of CAT, written as a one letter word down the column
        let meta = score(&board, &Move::new(Square::new(5, 2), Direction::Vertical, "S"), &rules()).unwrap();
        assert_eq!(meta.cross_words, vec!["CATS"]);
        assert_eq!(meta.score, 3 + 1 + 1 + 1);

        // alone on an empty board, the letter is the word
        let empty = Board::new(5, &PlainBonus);
        let meta = score(&empty, &Move::new(Square::new(3, 3), Direction::Vertical, "Q"), &rules()).unwrap();
        assert_eq!(meta.score, 10);
    }

    #[test]
    fn case_over_placed_tiles_does_not_matter() {
        let board = Board::from_rows("\n.CAT\n", 5, &PlainBonus).unwrap();
        let upper = score(&board, &Move::new(Square::new(1, 2), Direction::Horizontal, "SCAT"), &rules()).unwrap();
        let lower = score(&board, &Move::new(Square::new(1, 2), Direction::Horizontal, "Scat"), &rules()).unwrap();
        assert_eq!(upper, lower);
        assert_eq!(lower.main_word, "SCAT");
        assert_eq!(lower.placed, vec![(Square::new(1, 2), Tile::from_char('S').unwrap())]);
        assert_eq!(lower.score, 6);
    }

    #[test]
    fn scoring_is_pure() {
        let board = Board::from_rows("\n.CAT\n", 5, &PlainBonus).unwrap();
        let mov = Move::new(Square::new(3, 3), Direction::Horizontal, "AT");
        assert_eq!(score(&board, &mov, &rules()), score(&board, &mov, &rules()));
    }
}
