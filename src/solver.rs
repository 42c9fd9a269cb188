pub mod cross_check;
pub mod letter_set;
pub mod score;
pub mod validate;
pub mod word_finder;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::score_rules::{LetterScoring, ScoreRules};
use super::{Board, Move, Rack, WordAutomaton};
use score::MoveMetaInformation;
use word_finder::WordFinder;

/// When to give up on a search before it is complete
///
/// Checked before every step of the search; moves found until then are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits<'c> {
    pub deadline: Option<Instant>,
    pub cancel: Option<&'c AtomicBool>,
}

impl<'c> SearchLimits<'c> {
    pub fn with_deadline(deadline: Instant) -> Self {
        Self { deadline: Some(deadline), cancel: None }
    }

    pub fn with_time_limit(limit: Duration) -> Self {
        Self::with_deadline(Instant::now() + limit)
    }

    /// Stops once `flag` is set, from any thread
    pub fn cancelled_by(flag: &'c AtomicBool) -> Self {
        Self { deadline: None, cancel: Some(flag) }
    }

    pub fn exceeded(&self) -> bool {
        self.cancel.map_or(false, |flag| flag.load(Ordering::Relaxed))
            || self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }
}

/// The moves found by one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    /// Distinct moves, in the order they were found
    pub moves: Vec<Move>,
    /// The search was stopped by its limits, more moves may exist
    pub truncated: bool,
}

/// Every legal move for `rack` on `board`
///
/// Each move places at least one tile from the rack, touches the tiles
/// already there (or covers the centre on an empty board), and only forms
/// words of `dictionary`. The rack itself is left untouched.
pub fn generate(board: &Board, rack: &Rack, dictionary: &WordAutomaton) -> Vec<Move> {
    generate_with(board, rack, dictionary, &SearchLimits::default()).moves
}

pub fn generate_with(board: &Board, rack: &Rack, dictionary: &WordAutomaton, limits: &SearchLimits) -> Generation {
    WordFinder::new(board, dictionary, limits).run(*rack)
}

#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Best score first; moves with the same score keep their generation order
    pub moves: Vec<(Move, MoveMetaInformation)>,
    pub truncated: bool,
}

impl Evaluation {
    pub fn best(&self) -> Option<&(Move, MoveMetaInformation)> {
        self.moves.first()
    }
}

/// Evaluate all the moves that can be played on the board, with their score
pub fn evaluate(
    board: &Board,
    rack: &Rack,
    dictionary: &WordAutomaton,
    score_rules: &ScoreRules<impl LetterScoring>,
    limits: &SearchLimits,
) -> Evaluation {
    let start = Instant::now();
    let Generation { moves, truncated } = generate_with(board, rack, dictionary, limits);
    log::info!(
        "{} moves generated in {:?}{}",
        moves.len(),
        start.elapsed(),
        if truncated { ", search stopped early" } else { "" },
    );

    let start = Instant::now();
    let mut scored: Vec<_> = moves
        .into_par_iter()
        .filter_map(|mov| match score::score(board, &mov, score_rules) {
            Ok(meta) => Some((mov, meta)),
            Err(e) => {
                log::error!("generated move {} cannot be scored: {}", mov, e);
                None
            }
        })
        .collect();
    // stable, so equal scores stay in generation order
    scored.par_sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
    log::info!("scores evaluated in {:?}", start.elapsed());

    Evaluation { moves: scored, truncated }
}

/// [`evaluate`] for several racks against the same board, in parallel
pub fn evaluate_racks(
    board: &Board,
    racks: &[Rack],
    dictionary: &WordAutomaton,
    score_rules: &ScoreRules<impl LetterScoring>,
) -> Vec<Evaluation> {
    racks
        .par_iter()
        .map(|rack| evaluate(board, rack, dictionary, score_rules, &SearchLimits::default()))
        .collect()
}
