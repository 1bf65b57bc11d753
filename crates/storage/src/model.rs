//! Serialization models. Field names are fixed by the stored JSON format and
//! must not change; the domain types are free to evolve independently.

use chrono::{DateTime, Utc};
use liftlog_domain::{self as domain, Property};
use uuid::Uuid;

#[derive(thiserror::Error, Debug)]
pub enum ModelError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Notes(#[from] domain::NotesError),
    #[error(transparent)]
    MuscleGroup(#[from] domain::UnknownMuscleGroupError),
    #[error(transparent)]
    Equipment(#[from] domain::UnknownEquipmentError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub muscle_group: String,
    pub equipment: String,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            muscle_group: value.muscle_group.name().to_string(),
            equipment: value.equipment.name().to_string(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ModelError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: domain::MuscleGroup::try_from(value.muscle_group.as_str())?,
            equipment: domain::Equipment::try_from(value.equipment.as_str())?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub id: Uuid,
    pub weight: f32,
    pub reps: u32,
    /// Absent in routine templates written by earlier versions.
    #[serde(default)]
    pub is_completed: bool,
}

impl From<&domain::WorkoutSet> for Set {
    fn from(value: &domain::WorkoutSet) -> Self {
        Self {
            id: *value.id,
            weight: value.weight.into(),
            reps: value.reps.into(),
            is_completed: value.completed,
        }
    }
}

impl TryFrom<Set> for domain::WorkoutSet {
    type Error = ModelError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
            completed: value.is_completed,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub next_variant_index: usize,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Variant {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<RoutineExercise>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineExercise {
    pub exercise_id: Uuid,
    pub sets: Vec<Set>,
}

/// Routines written before variants existed carried their exercises directly.
/// Both layouts must keep loading.
#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StoredRoutine {
    Current(Routine),
    Legacy(LegacyRoutine),
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
pub struct LegacyRoutine {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<RoutineExercise>,
}

impl From<StoredRoutine> for Routine {
    fn from(value: StoredRoutine) -> Self {
        match value {
            StoredRoutine::Current(routine) => routine,
            // The routine id doubles as the variant id so repeated loads of
            // un-rewritten data yield the same result.
            StoredRoutine::Legacy(legacy) => Self {
                id: legacy.id,
                name: legacy.name,
                variants: vec![Variant {
                    id: legacy.id,
                    name: "A".to_string(),
                    exercises: legacy.exercises,
                }],
                next_variant_index: 0,
            },
        }
    }
}

impl From<&domain::Routine> for Routine {
    fn from(value: &domain::Routine) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            variants: value
                .variants
                .iter()
                .map(|v| Variant {
                    id: *v.id,
                    name: v.name.to_string(),
                    exercises: v.exercises.iter().map(RoutineExercise::from).collect(),
                })
                .collect(),
            next_variant_index: value.next_variant_index,
        }
    }
}

impl From<&domain::RoutineExercise> for RoutineExercise {
    fn from(value: &domain::RoutineExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Routine> for domain::Routine {
    type Error = ModelError;

    fn try_from(value: Routine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            variants: value
                .variants
                .into_iter()
                .map(|v| {
                    Ok(domain::RoutineVariant {
                        id: v.id.into(),
                        name: domain::Name::new(&v.name)?,
                        exercises: v
                            .exercises
                            .into_iter()
                            .map(domain::RoutineExercise::try_from)
                            .collect::<Result<Vec<_>, _>>()?,
                    })
                })
                .collect::<Result<Vec<_>, ModelError>>()?,
            next_variant_index: value.next_variant_index,
        })
    }
}

impl TryFrom<RoutineExercise> for domain::RoutineExercise {
    type Error = ModelError;

    fn try_from(value: RoutineExercise) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_id: value.exercise_id.into(),
            sets: value
                .sets
                .into_iter()
                .map(domain::WorkoutSet::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: Uuid,
    pub routine_id: Uuid,
    pub routine_name: String,
    pub variant_id: Uuid,
    pub variant_name: String,
    /// RFC 3339.
    pub date: String,
    pub exercises: Vec<PerformedExercise>,
    pub duration_seconds: u32,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformedExercise {
    pub exercise_id: Uuid,
    pub exercise_name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub notes: String,
    pub sets: Vec<Set>,
}

impl From<&domain::WorkoutSession> for WorkoutSession {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            id: *value.id,
            routine_id: *value.routine_id,
            routine_name: value.routine_name.to_string(),
            variant_id: *value.variant_id,
            variant_name: value.variant_name.to_string(),
            date: value.date.to_rfc3339(),
            exercises: value
                .exercises
                .iter()
                .map(|e| PerformedExercise {
                    exercise_id: *e.exercise_id,
                    exercise_name: e.exercise_name.to_string(),
                    muscle_group: e.muscle_group.name().to_string(),
                    notes: e.notes.to_string(),
                    sets: e.sets.iter().map(Set::from).collect(),
                })
                .collect(),
            duration_seconds: value.duration_seconds,
        }
    }
}

impl TryFrom<WorkoutSession> for domain::WorkoutSession {
    type Error = ModelError;

    fn try_from(value: WorkoutSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            routine_id: value.routine_id.into(),
            routine_name: domain::Name::new(&value.routine_name)?,
            variant_id: value.variant_id.into(),
            variant_name: domain::Name::new(&value.variant_name)?,
            date: DateTime::parse_from_rfc3339(&value.date)?.with_timezone(&Utc),
            exercises: value
                .exercises
                .into_iter()
                .map(|e| {
                    Ok(domain::PerformedExercise {
                        exercise_id: e.exercise_id.into(),
                        exercise_name: domain::Name::new(&e.exercise_name)?,
                        muscle_group: domain::MuscleGroup::try_from(e.muscle_group.as_str())?,
                        notes: domain::Notes::new(&e.notes)?,
                        sets: e
                            .sets
                            .into_iter()
                            .map(domain::WorkoutSet::try_from)
                            .collect::<Result<Vec<_>, _>>()?,
                    })
                })
                .collect::<Result<Vec<_>, ModelError>>()?,
            duration_seconds: value.duration_seconds,
        })
    }
}
