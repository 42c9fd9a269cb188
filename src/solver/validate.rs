//! Checking moves that come from outside the generator, such as a player's input

use super::score::{score, MoveMetaInformation};
use crate::score_rules::{LetterScoring, ScoreRules};
use crate::{Action, Board, ForbiddenPlay, Move, Rack, RackTile, WordAutomaton};

/// Checks that `play` is legal for `rack` on `board`, and scores it
///
/// A single tile only needs to make a word in one direction: its main word is
/// not looked up when it is one letter long and a cross word exists.
pub fn validate_play(
    board: &Board,
    rack: &Rack,
    dictionary: &WordAutomaton,
    play: &Move,
    score_rules: &ScoreRules<impl LetterScoring>,
) -> Result<MoveMetaInformation, ForbiddenPlay> {
    let meta = score(board, play, score_rules)?;
    if meta.placed.is_empty() {
        return Err(ForbiddenPlay::NoTilesPlaced);
    }

    let dir = play.direction;
    let before = board.neighbour(play.start, dir, -1);
    if board.tile(before).is_some() {
        return Err(ForbiddenPlay::IncompleteWord(before));
    }
    let after = board.neighbour(play.start, dir, play.len() as isize);
    if board.tile(after).is_some() {
        return Err(ForbiddenPlay::IncompleteWord(after));
    }

    rack.take_all(&meta.rack_tiles).map_err(|missing| ForbiddenPlay::MissingTiles(tiles_to_string(&missing)))?;

    if board.is_empty() {
        if !play.squares().any(|square| square == board.centre()) {
            return Err(ForbiddenPlay::MissesCentre);
        }
    } else {
        let through_tiles = meta.placed.len() < play.len();
        if !through_tiles && !meta.placed.iter().any(|&(square, _)| board.touches_tile(square)) {
            return Err(ForbiddenPlay::Disconnected);
        }
    }

    let main_word_counts = meta.main_word.len() > 1 || meta.cross_words.is_empty();
    if main_word_counts && !dictionary.contains(&meta.main_word) {
        return Err(ForbiddenPlay::UnknownWord(meta.main_word));
    }
    if let Some(word) = meta.cross_words.iter().find(|word| !dictionary.contains(word)) {
        return Err(ForbiddenPlay::UnknownWord(word.clone()));
    }

    Ok(meta)
}

/// Checks any turn a player may take
///
/// Only tile plays have a score; exchanges and passes give `None`.
pub fn validate_action(
    board: &Board,
    rack: &Rack,
    dictionary: &WordAutomaton,
    action: &Action,
    score_rules: &ScoreRules<impl LetterScoring>,
) -> Result<Option<MoveMetaInformation>, ForbiddenPlay> {
    match action {
        Action::PlayTiles(play) => validate_play(board, rack, dictionary, play, score_rules).map(Some),
        Action::Exchange(tiles) if tiles.is_empty() => Err(ForbiddenPlay::EmptyExchange),
        Action::Exchange(tiles) => match rack.take_all(tiles) {
            Ok(_) => Ok(None),
            Err(missing) => Err(ForbiddenPlay::MissingTiles(tiles_to_string(&missing))),
        },
        Action::Pass => Ok(None),
    }
}

fn tiles_to_string(tiles: &[RackTile]) -> String {
    tiles.iter().map(|tile| tile.to_string()).collect()
}
