//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Word pool a target word is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Common words.
    #[default]
    Easy,
    /// Rarer words.
    Hard,
}

impl Difficulty {
    /// Every difficulty, in ordinal order.
    pub const ALL: [Difficulty; 2] = [Difficulty::Easy, Difficulty::Hard];

    /// Stable ordinal used by the word-of-the-day seed.
    pub fn ordinal(self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Hard => 1,
        }
    }

    /// Lowercase name used in word-list file names and configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a difficulty name is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown difficulty '{0}' (expected easy or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(value.to_string())),
        }
    }
}

/// Feedback for a single letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterState {
    /// Right letter, right position.
    Correct,
    /// Letter occurs in the target at another position.
    Misplaced,
    /// Letter does not occur (or every occurrence is already accounted for).
    Absent,
    /// Cell not filled yet.
    Empty,
}

impl LetterState {
    /// Merge priority when several attempts report on the same letter.
    pub fn priority(self) -> u8 {
        match self {
            LetterState::Correct => 3,
            LetterState::Misplaced => 2,
            LetterState::Absent => 1,
            LetterState::Empty => 0,
        }
    }

    /// Keep whichever of the two states carries more information.
    pub fn merge(self, other: LetterState) -> LetterState {
        if other.priority() > self.priority() {
            other
        } else {
            self
        }
    }
}

/// One scored position of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResult {
    /// Uppercase letter as guessed.
    pub letter: char,
    /// Feedback for the letter.
    pub state: LetterState,
    /// Zero-based index within the guess.
    pub position: usize,
}

impl LetterResult {
    /// Build a result for `letter` at `position`.
    pub fn new(letter: char, state: LetterState, position: usize) -> Self {
        Self {
            letter,
            state,
            position,
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not yet running.
    #[default]
    NotStarted,
    /// Accepting input.
    Playing,
    /// Target word found.
    Won,
    /// Every attempt used without finding the word.
    Lost,
    /// Countdown ran out.
    Timeout,
}

impl GamePhase {
    /// Terminal phases are absorbing.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost | GamePhase::Timeout)
    }
}
