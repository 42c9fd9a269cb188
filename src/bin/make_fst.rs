use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Instant;

use structopt::StructOpt;

use scrabble_movegen::dictionary::cache::{DictionaryCache, FileDictionaryCache};
use scrabble_movegen::{WordAutomaton, WordList};

#[derive(Debug, StructOpt)]
#[structopt(name = "make_fst", about = "Create a fst file from a word list, this can be useful for faster loading")]
struct Opt {
    /// The input list. One word per line
    #[structopt(short = "i", long = "input-list", parse(from_os_str))]
    list_file: PathBuf,

    /// The output for in which store the compressed dictionary
    #[structopt(short = "o", long = "output-fst", parse(from_os_str))]
    fst_file: PathBuf,

    /// Also store the dictionary in this cache directory, as `scrabble_one` looks it up
    #[structopt(long = "cache-dir", parse(from_os_str))]
    cache_dir: Option<PathBuf>,

    /// Words shorter than this are left out
    #[structopt(long = "min-word-len", default_value = "2")]
    min_word_len: usize,
}

fn main() {
    simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Info).init().unwrap();

    let Opt { list_file, fst_file, cache_dir, min_word_len } = Opt::from_args();

    let start = Instant::now();
    let file = BufReader::new(File::open(list_file).expect("opening the words list file"));
    let words = file.lines().map(|l| l.expect("reading line from word list")).collect::<Vec<_>>();
    log::info!("{} words loaded in {:?}", words.len(), start.elapsed());

    let start = Instant::now();
    let list = WordList::new(words, min_word_len);
    log::info!(
        "{} words of {} letters or more kept and sorted in {:?}",
        list.len(),
        list.min_len(),
        start.elapsed()
    );

    let dictionary = WordAutomaton::from_word_list(&list);

    let start = Instant::now();
    let mut wtr = File::create(fst_file).expect("create the words fst file");
    wtr.write_all(dictionary.as_bytes()).expect("writing the words fst file");
    log::info!("dictionary written in {:?}", start.elapsed());

    if let Some(dir) = cache_dir {
        FileDictionaryCache::new(dir)
            .store(&list.hash(), &dictionary)
            .expect("storing the dictionary in the cache");
    }
}
