use chrono::NaiveDate;

use super::{DictionaryError, WordLists, WordStore};
use crate::models::Difficulty;

/// Word store built from in-memory lists; ready from construction.
#[derive(Debug, Clone, Default)]
pub struct StaticWordStore {
    lists: WordLists,
}

impl StaticWordStore {
    /// Store whose vocabulary is `words` and whose pools are empty.
    pub fn new<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut lists = WordLists::new();
        lists.extend_vocabulary(words);
        Self { lists }
    }

    /// Wrap an index assembled elsewhere.
    pub fn from_lists(lists: WordLists) -> Self {
        Self { lists }
    }

    /// Set a target pool. Pool words are also accepted as guesses.
    pub fn with_pool<I, W>(mut self, letter_count: usize, difficulty: Difficulty, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .collect();
        self.lists.extend_vocabulary(&words);
        self.lists.set_pool(letter_count, difficulty, &words);
        self
    }
}

impl WordStore for StaticWordStore {
    fn is_ready(&self) -> bool {
        true
    }

    fn load(&self) -> Result<(), DictionaryError> {
        Ok(())
    }

    fn contains(&self, word: &str) -> bool {
        self.lists.contains(word)
    }

    fn random_word(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
    ) -> Result<String, DictionaryError> {
        self.lists.random_word(letter_count, difficulty)
    }

    fn word_of_day(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
        date: NaiveDate,
    ) -> Result<String, DictionaryError> {
        self.lists.word_of_day(letter_count, difficulty, date)
    }

    fn word_count(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
    ) -> Result<usize, DictionaryError> {
        self.lists.word_count(letter_count, difficulty)
    }
}
