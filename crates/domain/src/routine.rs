use derive_more::Deref;
use log::warn;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseID, Name, ReadError, UpdateError, WorkoutSet};

pub trait RoutineRepository {
    fn read_routines(&self) -> Result<Vec<Routine>, ReadError>;
    fn create_routine(
        &self,
        name: Name,
        variants: Vec<RoutineVariant>,
    ) -> Result<Routine, CreateError>;
    fn modify_routine(
        &self,
        id: RoutineID,
        name: Option<Name>,
        variants: Option<Vec<RoutineVariant>>,
    ) -> Result<Routine, UpdateError>;
    fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
    fn update_variant(
        &self,
        routine_id: RoutineID,
        variant_id: VariantID,
        exercises: Vec<RoutineExercise>,
    ) -> Result<Routine, UpdateError>;
    fn advance_rotation(&self, routine_id: RoutineID) -> Result<Routine, UpdateError>;
}

/// A reusable workout plan. Variants rotate round-robin: each started workout
/// uses the variant at `next_variant_index` and advances the index.
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: Name,
    pub variants: Vec<RoutineVariant>,
    pub next_variant_index: usize,
}

impl Routine {
    /// Index of the variant the next workout will use. An out-of-range stored
    /// index (a variant was deleted) falls back to 0.
    #[must_use]
    pub fn current_rotation(&self) -> usize {
        if self.next_variant_index < self.variants.len() {
            self.next_variant_index
        } else {
            warn!(
                "routine {} has no variant at index {}, falling back to the first variant",
                self.name, self.next_variant_index
            );
            0
        }
    }

    /// The variant the next workout will use, or `None` if the routine has no
    /// variants.
    #[must_use]
    pub fn next_variant(&self) -> Option<&RoutineVariant> {
        self.variants.get(self.current_rotation())
    }

    /// Moves the rotation to the following variant, wrapping around. Must be
    /// called only after a workout has actually been started.
    pub fn advance_rotation(&mut self) {
        if !self.variants.is_empty() {
            self.next_variant_index = (self.current_rotation() + 1) % self.variants.len();
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One concrete exercise/set plan within a routine, e.g. "A" or "Heavy Day".
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineVariant {
    pub id: VariantID,
    pub name: Name,
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VariantID(Uuid);

impl VariantID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for VariantID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for VariantID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// An exercise within a routine variant. A template only; set completion is
/// meaningless here and always false.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineExercise {
    pub exercise_id: ExerciseID,
    pub sets: Vec<WorkoutSet>,
}
