//! The dictionary as a minimised word automaton
//!
//! Words live in an `fst::Set`, whose builder merges shared suffixes as the
//! sorted words stream in. Nodes are addressed by their offset in the set's
//! byte buffer, so a [`Node`] is a plain `Copy` index.

pub mod cache;

use std::fmt;
use std::time::Instant;

use fst::raw::CompiledAddr;
use sha2::{Digest, Sha256};

use super::{DictionaryError, Letter, MIN_WORD_LEN};
use cache::DictionaryCache;

/// Words ready to be turned into an automaton: uppercase, `A-Z` only, at
/// least `min_len` long, sorted and deduplicated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
    min_len: usize,
}

impl WordList {
    pub fn new<I, S>(words: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // the empty word is never playable
        let min_len = min_len.max(1);
        let mut skipped = 0;
        let mut words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                    skipped += 1;
                    return None;
                }
                if word.len() < min_len {
                    return None;
                }
                Some(word.to_ascii_uppercase())
            })
            .collect::<Vec<_>>();
        if skipped > 0 {
            log::warn!("skipped {} words with characters outside A-Z", skipped);
        }
        words.sort_unstable();
        words.dedup();
        Self { words, min_len }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Identifies the word set, used as the key for cached automata
    pub fn hash(&self) -> DictionaryHash {
        let mut hasher = Sha256::new();
        hasher.update((self.min_len as u64).to_le_bytes());
        for word in &self.words {
            hasher.update(word.as_bytes());
            hasher.update(b"\n");
        }
        let mut digest = [0; 32];
        digest.copy_from_slice(&hasher.finalize());
        DictionaryHash(digest)
    }
}

/// SHA-256 of a normalised [`WordList`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DictionaryHash(pub [u8; 32]);

impl fmt::Display for DictionaryHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A state of the [`WordAutomaton`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Node(CompiledAddr);

/// The dictionary, immutable once built and safe to share between threads
pub struct WordAutomaton {
    set: fst::Set<Vec<u8>>,
}

impl WordAutomaton {
    /// Builds from raw words, leaving out anything shorter than [`MIN_WORD_LEN`]
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_word_list(&WordList::new(words, MIN_WORD_LEN))
    }

    pub fn from_word_list(list: &WordList) -> Self {
        let start = Instant::now();
        let set = fst::Set::from_iter(list.words()).expect("word list is sorted and deduplicated");
        log::info!("word automaton of {} words built in {:?}", set.len(), start.elapsed());
        Self { set }
    }

    /// Returns the cached automaton for `list`, building and caching it on a miss
    pub fn load_or_build(list: &WordList, cache: &dyn DictionaryCache) -> Self {
        let hash = list.hash();
        let start = Instant::now();
        if let Some(automaton) = cache.load(&hash) {
            log::info!("dictionary {} loaded from cache in {:?}", hash, start.elapsed());
            return automaton;
        }
        let automaton = Self::from_word_list(list);
        if let Err(e) = cache.store(&hash, &automaton) {
            log::warn!("could not cache dictionary {}: {}", hash, e);
        }
        automaton
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DictionaryError> {
        Ok(Self { set: fst::Set::new(bytes)? })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.set.as_fst().as_bytes()
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn root(&self) -> Node {
        Node(self.set.as_fst().root().addr())
    }

    pub fn transition(&self, node: Node, letter: Letter) -> Option<Node> {
        let state = self.set.as_fst().node(node.0);
        state.find_input(letter.byte()).map(|i| Node(state.transition_addr(i)))
    }

    pub fn transition_letters(
        &self,
        node: Node,
        letters: impl IntoIterator<Item = Letter>,
    ) -> Option<Node> {
        letters.into_iter().try_fold(node, |n, l| self.transition(n, l))
    }

    /// Follows each character in turn, case-insensitively
    pub fn transition_str(&self, node: Node, s: &str) -> Option<Node> {
        s.chars().try_fold(node, |n, c| self.transition(n, Letter::new(c)?))
    }

    pub fn is_accepting(&self, node: Node) -> bool {
        self.set.as_fst().node(node.0).is_final()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.transition_str(self.root(), word)
            .map_or(false, |node| self.is_accepting(node))
    }
}

impl fmt::Debug for WordAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WordAutomaton({} words, {} bytes)", self.len(), self.as_bytes().len())
    }
}

#[cfg(test)]
mod tests {
    use super::cache::{DictionaryCache, MemoryDictionaryCache};
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    #[test]
    fn membership() {
        let dict = WordAutomaton::build(vec!["cat", "CATS", "at", "a", "dog", "do-g", "  ox "]);

        assert_eq!(dict.len(), 5);
        for word in &["CAT", "CATS", "AT", "DOG", "OX", "cat"] {
            assert!(dict.contains(word), "{}", word);
        }
        // single letters never make it into the automaton
        assert!(!dict.contains("A"));
        assert!(!dict.contains("CA"));
        assert!(!dict.contains("CATSS"));
        assert!(!dict.contains(""));
        assert!(!dict.contains("C4T"));
    }

    #[test]
    fn transitions() {
        let dict = WordAutomaton::build(vec!["CAT", "CATS", "CAR"]);
        let root = dict.root();

        let ca = dict.transition_str(root, "CA").unwrap();
        assert!(!dict.is_accepting(ca));
        let cat = dict.transition(ca, letter('T')).unwrap();
        assert!(dict.is_accepting(cat));
        assert_eq!(dict.transition_letters(root, vec![letter('C'), letter('A'), letter('T')]), Some(cat));
        assert_eq!(dict.transition(ca, letter('B')), None);
        assert_eq!(dict.transition_str(root, ""), Some(root));

        let cats = dict.transition(cat, letter('S')).unwrap();
        assert!(dict.is_accepting(cats));
        assert_eq!(dict.transition(cats, letter('S')), None);
    }

    #[test]
    fn empty_dictionary_accepts_nothing() {
        let dict = WordAutomaton::build(Vec::<String>::new());
        assert!(dict.is_empty());
        assert!(!dict.is_accepting(dict.root()));
        assert!(Letter::alphabet().all(|l| dict.transition(dict.root(), l).is_none()));
    }

    #[test]
    fn single_letters_when_asked_for() {
        let dict = WordAutomaton::from_word_list(&WordList::new(vec!["A", "AT"], 1));
        assert!(dict.contains("A"));
        assert!(dict.contains("AT"));
    }

    #[test]
    fn word_list_hash() {
        let a = WordList::new(vec!["cat", "dog", "DOG"], 2);
        let b = WordList::new(vec!["DOG", "CAT"], 2);
        let c = WordList::new(vec!["DOG", "CAT"], 3);
        let d = WordList::new(vec!["DOG", "CAT", "COW"], 2);

        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
        assert_ne!(a.hash(), d.hash());
        assert_eq!(a.hash().to_string().len(), 64);
    }

    #[test]
    fn bytes_reload() {
        let dict = WordAutomaton::build(vec!["QI", "ZA"]);
        let again = WordAutomaton::from_bytes(dict.as_bytes().to_vec()).unwrap();
        assert!(again.contains("QI"));
        assert!(again.contains("ZA"));
        assert_eq!(again.len(), 2);

        assert!(WordAutomaton::from_bytes(b"garbage".to_vec()).is_err());
    }

    #[test]
    fn load_or_build_prefers_the_cache() {
        let cache = MemoryDictionaryCache::new();
        let list = WordList::new(vec!["CAT"], 2);

        let built = WordAutomaton::load_or_build(&list, &cache);
        assert!(built.contains("CAT"));
        assert_eq!(cache.len(), 1);

        // anything stored under the hash wins over rebuilding
        let other = WordAutomaton::build(vec!["DOG"]);
        cache.store(&list.hash(), &other).unwrap();
        let loaded = WordAutomaton::load_or_build(&list, &cache);
        assert!(loaded.contains("DOG"));
        assert!(!loaded.contains("CAT"));
    }
}
