use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use super::{parse_word_list, DictionaryError, LoaderState, WordLists, WordStore, LETTER_COUNTS};
use crate::models::Difficulty;

/// Thread-safe word store backed by plain-text lists in one directory.
///
/// Expects `words_<n>.txt` (vocabulary) and `words_<n>_<difficulty>.txt`
/// (target pools) for every supported length `n`.
pub struct FileWordStore {
    root_path: PathBuf,
    inner: RwLock<Inner>,
    load_guard: Mutex<()>,
}

#[derive(Default)]
struct Inner {
    state: LoaderState,
    lists: WordLists,
}

impl FileWordStore {
    /// Build a store reading from `root_path`. Nothing is read until `load`.
    pub fn new(root_path: impl Into<PathBuf>) -> Self {
        Self {
            root_path: root_path.into(),
            inner: RwLock::new(Inner::default()),
            load_guard: Mutex::new(()),
        }
    }

    /// Directory the lists are read from.
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Current load state.
    pub fn state(&self) -> LoaderState {
        self.inner.read().state.clone()
    }

    fn with_lists<T>(
        &self,
        lookup: impl FnOnce(&WordLists) -> Result<T, DictionaryError>,
    ) -> Result<T, DictionaryError> {
        let inner = self.inner.read();
        if inner.state != LoaderState::Ready {
            return Err(DictionaryError::NotLoaded);
        }
        lookup(&inner.lists)
    }
}

impl WordStore for FileWordStore {
    fn is_ready(&self) -> bool {
        self.inner.read().state == LoaderState::Ready
    }

    fn load(&self) -> Result<(), DictionaryError> {
        let _guard = self.load_guard.lock();

        {
            let mut inner = self.inner.write();
            if inner.state == LoaderState::Ready {
                return Ok(());
            }
            inner.state = LoaderState::Loading;
        }

        info!("loading word lists from {}", self.root_path.display());
        match read_lists(&self.root_path) {
            Ok(lists) => {
                info!(words = lists.vocabulary_len(), "Dictionary ready");
                let mut inner = self.inner.write();
                inner.lists = lists;
                inner.state = LoaderState::Ready;
                Ok(())
            }
            Err(err) => {
                error!(%err, "Dictionary load failed");
                self.inner.write().state = LoaderState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    fn contains(&self, word: &str) -> bool {
        let inner = self.inner.read();
        if inner.state != LoaderState::Ready {
            warn!("dictionary lookup before load");
            return false;
        }
        inner.lists.contains(word)
    }

    fn random_word(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
    ) -> Result<String, DictionaryError> {
        self.with_lists(|lists| lists.random_word(letter_count, difficulty))
    }

    fn word_of_day(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
        date: NaiveDate,
    ) -> Result<String, DictionaryError> {
        self.with_lists(|lists| lists.word_of_day(letter_count, difficulty, date))
    }

    fn word_count(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
    ) -> Result<usize, DictionaryError> {
        self.with_lists(|lists| lists.word_count(letter_count, difficulty))
    }
}

/// File holding every valid word of one length.
pub fn vocabulary_path(root: &Path, letter_count: usize) -> PathBuf {
    root.join(format!("words_{letter_count}.txt"))
}

/// File holding the target pool for one length and difficulty.
pub fn pool_path(root: &Path, letter_count: usize, difficulty: Difficulty) -> PathBuf {
    root.join(format!("words_{letter_count}_{}.txt", difficulty.as_str()))
}

fn read_lists(root: &Path) -> Result<WordLists, DictionaryError> {
    let mut lists = WordLists::new();

    for letter_count in LETTER_COUNTS {
        let words = read_word_file(&vocabulary_path(root, letter_count))?;
        let mismatched = words
            .iter()
            .filter(|word| word.chars().count() != letter_count)
            .count();
        if mismatched > 0 {
            warn!(
                letter_count,
                mismatched, "vocabulary file contains words of another length"
            );
        }
        debug!(letter_count, count = words.len(), "vocabulary loaded");
        lists.extend_vocabulary(words);

        for difficulty in Difficulty::ALL {
            let words = read_word_file(&pool_path(root, letter_count, difficulty))?;
            debug!(letter_count, %difficulty, count = words.len(), "pool loaded");
            lists.set_pool(letter_count, difficulty, words);
        }
    }

    Ok(lists)
}

fn read_word_file(path: &Path) -> Result<Vec<String>, DictionaryError> {
    let content = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_word_list(&content))
}
