//! Pure game rules: session creation, guess scoring and phase transitions.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::{
    dictionary::{DictionaryError, WordStore},
    models::{Difficulty, GamePhase, LetterResult, LetterState},
    session::{Attempt, Session},
};

/// Guesses allowed per session.
pub const MAX_ATTEMPTS: usize = 6;
/// Length of the per-turn countdown.
pub const TIMER_SECONDS: u32 = 8;
/// Points awarded for finding the word.
pub const POINTS_PER_WORD: u32 = 50;

/// Why a submission was refused. The message is shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    /// Guess length differs from the target's.
    #[error("Wrong length")]
    WrongLength,
    /// Guess is not a known word.
    #[error("Not in word list")]
    NotInDictionary,
    /// Guess does not start with the target's first letter.
    #[error("Wrong first letter")]
    WrongFirstLetter,
    /// Guess was already played this session.
    #[error("Already tried")]
    AlreadyTried,
    /// Session already ended.
    #[error("Game over")]
    GameOver,
}

/// Failure to create a session.
#[derive(Debug, Error)]
pub enum StartError {
    /// The dictionary could not supply a target.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    /// An explicit target word was empty.
    #[error("target word must not be empty")]
    EmptyTarget,
}

/// Stateless rule set over a word store.
pub struct RuleEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for RuleEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: WordStore> RuleEngine<S> {
    /// Build an engine that validates guesses against `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The store guesses are validated against.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Start a session on a random word from the pool.
    pub fn create(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
        timer_enabled: bool,
    ) -> Result<Session, StartError> {
        let word = self.store.random_word(letter_count, difficulty)?;
        self.create_with_word(&word, difficulty, timer_enabled)
    }

    /// Start a session on the word of the day for `date`.
    pub fn create_daily(
        &self,
        letter_count: usize,
        difficulty: Difficulty,
        date: NaiveDate,
        timer_enabled: bool,
    ) -> Result<Session, StartError> {
        let word = self.store.word_of_day(letter_count, difficulty, date)?;
        self.create_with_word(&word, difficulty, timer_enabled)
    }

    /// Start a session on an explicit word. Its length sets the letter count.
    pub fn create_with_word(
        &self,
        word: &str,
        difficulty: Difficulty,
        timer_enabled: bool,
    ) -> Result<Session, StartError> {
        let target_word = word.trim().to_uppercase();
        if target_word.is_empty() {
            return Err(StartError::EmptyTarget);
        }
        debug!(target = %target_word, %difficulty, timer_enabled, "session created");

        Ok(Session {
            letter_count: target_word.chars().count(),
            target_word,
            difficulty,
            max_attempts: MAX_ATTEMPTS,
            attempts: Vec::new(),
            current_input: String::new(),
            phase: GamePhase::Playing,
            score: 0,
            timer_enabled,
            timer_seconds: TIMER_SECONDS,
        })
    }

    /// Validate and score a guess, returning the next session snapshot.
    ///
    /// Checks run in a fixed order and stop at the first failure: game over,
    /// length, first letter, repeat, dictionary.
    pub fn submit(&self, session: &Session, candidate: &str) -> Result<Session, InvalidReason> {
        let guess = candidate.to_uppercase();

        if session.is_game_over() {
            return Err(InvalidReason::GameOver);
        }
        if guess.chars().count() != session.letter_count {
            return Err(InvalidReason::WrongLength);
        }
        if guess.chars().next() != session.target_word.chars().next() {
            return Err(InvalidReason::WrongFirstLetter);
        }
        if session.attempts.iter().any(|attempt| attempt.word == guess) {
            return Err(InvalidReason::AlreadyTried);
        }
        if !self.store.contains(&guess) {
            return Err(InvalidReason::NotInDictionary);
        }

        let results = evaluate(&guess, &session.target_word);
        let is_correct = guess == session.target_word;

        let mut next = session.clone();
        next.attempts.push(Attempt::new(guess, results, is_correct));
        next.current_input.clear();
        next.phase = if is_correct {
            GamePhase::Won
        } else if next.attempts.len() >= next.max_attempts {
            GamePhase::Lost
        } else {
            GamePhase::Playing
        };
        if is_correct {
            next.score += POINTS_PER_WORD;
        }
        Ok(next)
    }

    /// Replace the input buffer. Position 0 is always the target's first letter.
    pub fn update_input(&self, session: &Session, raw_input: &str) -> Session {
        if session.is_game_over() {
            return session.clone();
        }

        let first_letter = session.first_letter();
        let input = raw_input
            .to_uppercase()
            .chars()
            .take(session.letter_count)
            .enumerate()
            .map(|(index, letter)| if index == 0 { first_letter } else { letter })
            .collect();

        Session {
            current_input: input,
            ..session.clone()
        }
    }

    /// End a running session because its countdown ran out.
    pub fn handle_timeout(&self, session: &Session) -> Session {
        if session.is_game_over() {
            return session.clone();
        }
        Session {
            phase: GamePhase::Timeout,
            ..session.clone()
        }
    }
}

/// Score `guess` against `target` letter by letter.
///
/// Exact matches are claimed first; the remaining positions are marked
/// misplaced only while unclaimed copies of that letter remain in the target.
pub fn evaluate(guess: &str, target: &str) -> Vec<LetterResult> {
    let guess: Vec<char> = guess.chars().collect();
    let target: Vec<char> = target.chars().collect();

    let mut remaining: HashMap<char, usize> = HashMap::new();
    for letter in &target {
        *remaining.entry(*letter).or_default() += 1;
    }

    let mut states = vec![LetterState::Absent; guess.len()];

    for (index, letter) in guess.iter().enumerate() {
        if target.get(index) == Some(letter) {
            states[index] = LetterState::Correct;
            if let Some(count) = remaining.get_mut(letter) {
                *count -= 1;
            }
        }
    }

    for (index, letter) in guess.iter().enumerate() {
        if states[index] == LetterState::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(letter).filter(|count| **count > 0) {
            *count -= 1;
            states[index] = LetterState::Misplaced;
        }
    }

    guess
        .into_iter()
        .zip(states)
        .enumerate()
        .map(|(position, (letter, state))| LetterResult::new(letter, state, position))
        .collect()
}
