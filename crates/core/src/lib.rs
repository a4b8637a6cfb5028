#![warn(clippy::all, missing_docs)]

//! Core domain logic for Lettrus, a timed word-guessing game.
//!
//! This crate hosts the session models, the rule engine that scores
//! guesses, the dictionary capability and its loaders, the session
//! controller with its turn countdown, and configuration handling used
//! by the terminal UI and any future frontends.

pub mod config;
pub mod controller;
pub mod dictionary;
pub mod engine;
pub mod models;
pub mod session;

pub use config::AppConfig;
pub use controller::{ControllerEvent, GameSnapshot, SessionController};
pub use dictionary::{
    DictionaryError, FileWordStore, LoaderState, StaticWordStore, WordLists, WordStore,
};
pub use engine::{evaluate, InvalidReason, RuleEngine, StartError};
pub use models::{Difficulty, GamePhase, LetterResult, LetterState};
pub use session::{Attempt, Session};
