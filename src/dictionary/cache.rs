//! Built automata kept around between runs, keyed by the hash of their word list

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use dashmap::DashMap;
use tempfile::NamedTempFile;

use super::{DictionaryHash, WordAutomaton};
use crate::DictionaryError;

pub trait DictionaryCache: Sync {
    fn load(&self, hash: &DictionaryHash) -> Option<WordAutomaton>;
    fn store(&self, hash: &DictionaryHash, automaton: &WordAutomaton) -> Result<(), DictionaryError>;
}

/// One `<hash>.fst` file per dictionary in a directory
pub struct FileDictionaryCache {
    dir: PathBuf,
}

impl FileDictionaryCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, hash: &DictionaryHash) -> PathBuf {
        self.dir.join(format!("{}.fst", hash))
    }
}

impl DictionaryCache for FileDictionaryCache {
    /// Unreadable or corrupt files count as a miss
    fn load(&self, hash: &DictionaryHash) -> Option<WordAutomaton> {
        let path = self.path(hash);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("reading cached dictionary {:?}: {}", path, e);
                return None;
            }
        };
        match WordAutomaton::from_bytes(bytes) {
            Ok(automaton) => Some(automaton),
            Err(e) => {
                log::warn!("ignoring corrupt cached dictionary {:?}: {}", path, e);
                None
            }
        }
    }

    fn store(&self, hash: &DictionaryHash, automaton: &WordAutomaton) -> Result<(), DictionaryError> {
        fs::create_dir_all(&self.dir)?;
        // each writer fills its own temporary file, then moves it into place whole
        let mut partial = NamedTempFile::new_in(&self.dir)?;
        partial.write_all(automaton.as_bytes())?;
        partial.persist(self.path(hash)).map_err(|e| e.error)?;
        log::debug!("cached dictionary {} in {:?}", hash, self.dir);
        Ok(())
    }
}

/// Keeps serialised automata in memory, shareable between threads
#[derive(Default)]
pub struct MemoryDictionaryCache {
    entries: DashMap<DictionaryHash, Vec<u8>>,
}

impl MemoryDictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DictionaryCache for MemoryDictionaryCache {
    fn load(&self, hash: &DictionaryHash) -> Option<WordAutomaton> {
        let bytes = self.entries.get(hash)?;
        WordAutomaton::from_bytes(bytes.value().clone()).ok()
    }

    fn store(&self, hash: &DictionaryHash, automaton: &WordAutomaton) -> Result<(), DictionaryError> {
        self.entries.insert(*hash, automaton.as_bytes().to_vec());
        Ok(())
    }
}
