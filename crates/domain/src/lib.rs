#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod active_session;
mod catalog;
mod error;
mod exercise;
mod name;
mod reorder;
mod routine;
mod service;
mod set;
mod workout_session;

pub use active_session::{
    ActiveSession, FinishOutcome, Previous, SessionExercise, SessionSet, SessionState, SetField,
    StartError, TemplateDiff,
};
pub use catalog::Catalog;
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Equipment, Exercise, ExerciseID, ExerciseRepository, MuscleGroup, Property,
    UnknownEquipmentError, UnknownMuscleGroupError,
};
pub use name::{Name, NameError, Notes, NotesError};
pub use reorder::{Move, ReorderController, move_item};
pub use routine::{
    Routine, RoutineExercise, RoutineID, RoutineRepository, RoutineVariant, VariantID,
};
pub use service::{Service, WorkoutStartError};
pub use set::{DEFAULT_REPS, DEFAULT_WEIGHT, Reps, RepsError, SetID, Weight, WeightError, WorkoutSet};
pub use workout_session::{
    PerformedExercise, WorkoutSession, WorkoutSessionID, WorkoutSessionRepository,
    most_recent_performance,
};
