use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use scrabble_movegen::dictionary::cache::FileDictionaryCache;
use scrabble_movegen::score_rules::{EnglishScrabbleScoring, MapLetterScoring, ScrabbleBonus};
use scrabble_movegen::solver::validate::validate_action;
use scrabble_movegen::solver::{evaluate, SearchLimits};
use scrabble_movegen::{
    Action, Board, LetterScoring, MoveMetaInformation, Rack, ScoreRules, WordAutomaton, WordList, BOARD_SIZE,
};

/// Either given inline, or as `{ file = "..." }`
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum FileOrString {
    File { file: PathBuf },
    String(String),
}

impl FileOrString {
    pub fn read_to_string(self) -> std::io::Result<String> {
        match self {
            Self::String(s) => Ok(s),
            Self::File { file } => std::fs::read_to_string(file),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct Settings {
    /// The dictionary of words that are allowed to be played.
    ///
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    dictionary: PathBuf,

    /// The board as a string or the file containing it (more info in `Opt`)
    board: FileOrString,

    /// The rack as a string or the file containing it (more info in `Opt`)
    rack: FileOrString,

    /// The number of top result shown, not present means all results are shown
    n_shown: Option<usize>,

    /// Replaces the english letter values
    letter_score: Option<HashMap<char, u32>>,

    #[serde(default = "fifty")]
    extra_bonus: u32,

    /// Only used when the dictionary is a word list
    #[serde(default = "two")]
    min_word_len: usize,

    /// Where word lists are cached once compiled
    cache_dir: Option<PathBuf>,

    /// Stop searching after this long and show what was found so far
    time_limit_ms: Option<u64>,

    #[serde(default)]
    show_each_score: bool,

    /// A move to check, rather than listing all of them
    check: Option<String>,
}

fn fifty() -> u32 {
    50
}

fn two() -> usize {
    2
}

#[derive(Debug, StructOpt)]
#[structopt(name = "scrabble_one", about = "Evaluate possible moves for a scrabble board")]
struct Opt {
    /// The config file, if not present, looks for `scrabble-config`
    #[structopt(short = "c", long = "config")]
    config: Option<String>,

    /// The dictionary of words that are allowed to be played.
    ///
    /// Either a `.txt` file with one word per line, or a `.fst` file generated with `make_fst`
    #[structopt(short = "d", long = "dictionary")]
    dict: Option<String>,

    /// The board, where one line in the file corresponds to one row of the board.
    /// Dots, spaces and underscores are empty squares, lowercase letters are blanks
    #[structopt(short = "b", long = "board")]
    board_file: Option<String>,

    /// The rack, a string of the letters it holds, where stars are blanks
    #[structopt(short = "r", long = "rack")]
    rack_string: Option<String>,

    /// The number of top result shown, not present means all results are shown
    #[structopt(short = "n", long = "number-shown")]
    n_shown: Option<usize>,

    /// Check this move (`8H WORD`, `H8 WORD`), `exchange TILES` or `pass` instead
    #[structopt(long = "check")]
    check: Option<String>,

    #[structopt(long = "cache-dir")]
    cache_dir: Option<String>,

    #[structopt(long = "time-limit-ms")]
    time_limit_ms: Option<u64>,
}

fn load_config(opt: Opt) -> Result<Settings, config::ConfigError> {
    let mut s = config::Config::new();

    match opt.config {
        Some(f) => s.merge(config::File::with_name(&f))?,
        None => s.merge(config::File::with_name("scrabble-config").required(false))?,
    };

    s.merge(config::Environment::with_prefix("SCRABBLE"))?;

    if let Some(d) = opt.dict {
        s.set("dictionary", d)?;
    }
    if let Some(b) = opt.board_file {
        s.set("board.file", b)?;
    }
    if let Some(r) = opt.rack_string {
        s.set("rack", r)?;
    }
    if let Some(n) = opt.n_shown {
        s.set::<i64>("n_shown", n.try_into().unwrap())?;
    }
    if let Some(c) = opt.check {
        s.set("check", c)?;
    }
    if let Some(d) = opt.cache_dir {
        s.set("cache_dir", d)?;
    }
    if let Some(t) = opt.time_limit_ms {
        s.set::<i64>("time_limit_ms", t.try_into().unwrap())?;
    }

    s.try_into()
}

fn load_dictionary(path: PathBuf, min_word_len: usize, cache_dir: Option<PathBuf>) -> WordAutomaton {
    match path.extension().and_then(|s| s.to_str()) {
        Some("fst") => {
            let start = Instant::now();
            let data = std::fs::read(path).expect("reading the words fst file");
            let dictionary = WordAutomaton::from_bytes(data).expect("converting fst file in set");
            log::info!("dictionary loaded in {:?}", start.elapsed());
            dictionary
        }
        Some("txt") => {
            let start = Instant::now();
            let file = BufReader::new(File::open(path).expect("opening the words list file"));
            let words = file.lines().map(|l| l.expect("reading line from word list"));
            let list = WordList::new(words, min_word_len);
            log::info!("{} words loaded in {:?}", list.len(), start.elapsed());

            match cache_dir {
                Some(dir) => WordAutomaton::load_or_build(&list, &FileDictionaryCache::new(dir)),
                None => WordAutomaton::from_word_list(&list),
            }
        }
        _ => {
            panic!("dictionary file is neither .txt of .fst")
        }
    }
}

fn main() {
    simple_logger::SimpleLogger::from_env().init().unwrap();

    let opt = Opt::from_args();

    let conf = load_config(opt).expect("config");

    let board = conf.board.read_to_string().expect("read board");
    let rack = conf.rack.read_to_string().expect("read rack");

    let start = Instant::now();
    let board = Board::from_rows(&board, BOARD_SIZE, &ScrabbleBonus).expect("parse board");
    let rack: Rack = rack.parse().expect("parse rack");
    log::info!("board info loaded in {:?}", start.elapsed());

    let dictionary = load_dictionary(conf.dictionary, conf.min_word_len, conf.cache_dir);

    let scoring: Box<dyn LetterScoring> = match &conf.letter_score {
        Some(map) => Box::new(MapLetterScoring::new(map)),
        None => Box::new(EnglishScrabbleScoring),
    };
    let score_rules = ScoreRules { scoring, extra_bonus: conf.extra_bonus };

    if let Some(check) = conf.check {
        let action: Action = check.parse().expect("parse the move to check");
        match validate_action(&board, &rack, &dictionary, &action, &score_rules) {
            Ok(Some(meta)) => println!("{:>3}: {:<23} {}", meta.score, action.to_string(), words(&meta)),
            Ok(None) => println!("{} is allowed", action),
            Err(e) => {
                println!("{} is not allowed: {}", action, e);
                std::process::exit(1);
            }
        }
        return;
    }

    let limits = match conf.time_limit_ms {
        Some(ms) => SearchLimits::with_time_limit(Duration::from_millis(ms)),
        None => SearchLimits::default(),
    };

    let start = Instant::now();
    let evaluation = evaluate(&board, &rack, &dictionary, &score_rules, &limits);
    log::info!("scores evaluated in {:?} ({} possible moves)", start.elapsed(), evaluation.moves.len());
    if evaluation.truncated {
        log::warn!("time limit reached, some moves may be missing");
    }

    let n_shown = conf.n_shown.unwrap_or(evaluation.moves.len());
    let mut last_score = None;
    for (mov, meta) in evaluation.moves.iter().take(n_shown) {
        if !conf.show_each_score && last_score == Some(meta.score) {
            print!("{:>3}  ", " ")
        } else {
            last_score = Some(meta.score);
            print!("{:>3}: ", meta.score)
        }
        println!("{:<23} {}", mov.to_string(), words(meta));
    }
}

/// The main word, then the cross words
fn words(meta: &MoveMetaInformation) -> String {
    std::iter::once(meta.main_word.as_str())
        .chain(meta.cross_words.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
