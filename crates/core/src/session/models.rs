#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, GamePhase, LetterResult, LetterState};

/// A validated, dictionary-confirmed guess together with its feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    pub word: String,
    pub results: Vec<LetterResult>,
    pub is_correct: bool,
}

impl Attempt {
    pub fn new(word: String, results: Vec<LetterResult>, is_correct: bool) -> Self {
        Self {
            word,
            results,
            is_correct,
        }
    }

    pub fn letter_count(&self) -> usize {
        self.word.chars().count()
    }
}

/// Aggregated state describing one game.
///
/// Sessions are replaced wholesale by the rule engine; a transform never
/// edits a snapshot that has already been handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub target_word: String,
    pub letter_count: usize,
    pub difficulty: Difficulty,
    pub max_attempts: usize,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    #[serde(default)]
    pub current_input: String,
    pub phase: GamePhase,
    #[serde(default)]
    pub score: u32,
    pub timer_enabled: bool,
    pub timer_seconds: u32,
}

impl Session {
    /// The letter every guess must start with. Always shown to the player.
    pub fn first_letter(&self) -> char {
        self.target_word.chars().next().unwrap_or_default()
    }

    pub fn attempts_remaining(&self) -> usize {
        self.max_attempts.saturating_sub(self.attempts.len())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Positions the player should not have to retype on the next guess.
    ///
    /// Position 0 always carries the target's first letter; every position
    /// scored correct in the most recent attempt is added on top.
    pub fn next_attempt_prefill(&self) -> BTreeMap<usize, char> {
        let mut prefill = BTreeMap::new();
        prefill.insert(0, self.first_letter());

        if let Some(last) = self.attempts.last() {
            for result in &last.results {
                if result.state == LetterState::Correct {
                    prefill.insert(result.position, result.letter);
                }
            }
        }

        prefill
    }

    /// Best known state of every letter guessed so far, across all attempts.
    pub fn keyboard_letter_states(&self) -> BTreeMap<char, LetterState> {
        let mut states: BTreeMap<char, LetterState> = BTreeMap::new();
        for result in self.attempts.iter().flat_map(|attempt| &attempt.results) {
            states
                .entry(result.letter)
                .and_modify(|known| *known = known.merge(result.state))
                .or_insert(result.state);
        }
        states
    }
}
