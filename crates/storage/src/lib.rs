#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use liftlog_domain::StorageError;
use strum::AsRefStr;

pub mod json_store;
pub mod memory;
pub mod model;

pub use json_store::JsonStore;
pub use memory::InMemoryBackend;

/// A string key-value store, e.g. the browser's local storage. Values are
/// whole JSON documents; partial updates are not supported.
pub trait Backend {
    fn get(&self, key: Key) -> Result<Option<String>, StorageError>;
    fn set(&self, key: Key, value: String) -> Result<(), StorageError>;
}

/// Keys are fixed so existing data written by earlier versions keeps loading.
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "routines")]
    Routines,
    #[strum(serialize = "workoutSessions")]
    WorkoutSessions,
    #[strum(serialize = "customExercises")]
    CustomExercises,
}
