//! Game session models.

mod models;

pub use models::{Attempt, Session};
