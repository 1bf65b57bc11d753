use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, ExerciseID, MuscleGroup, Name, Notes, ReadError, RoutineID, VariantID,
    WorkoutSet};

pub trait WorkoutSessionRepository {
    fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    fn append_workout_session(&self, session: WorkoutSession)
    -> Result<WorkoutSession, CreateError>;
}

/// A finalized, immutable record of a completed workout. Only exercises with
/// at least one completed set are recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub routine_id: RoutineID,
    pub routine_name: Name,
    pub variant_id: VariantID,
    pub variant_name: Name,
    pub date: DateTime<Utc>,
    pub exercises: Vec<PerformedExercise>,
    pub duration_seconds: u32,
}

impl WorkoutSession {
    #[must_use]
    pub fn exercises(&self) -> BTreeSet<ExerciseID> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSessionID(Uuid);

impl WorkoutSessionID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for WorkoutSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// What was actually done for one exercise. Name and muscle group are
/// snapshots so the record stays stable if the catalog entry changes later.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformedExercise {
    pub exercise_id: ExerciseID,
    pub exercise_name: Name,
    pub muscle_group: MuscleGroup,
    pub notes: Notes,
    pub sets: Vec<WorkoutSet>,
}

/// The most recent performance of an exercise, i.e. its record in the newest
/// session containing it.
#[must_use]
pub fn most_recent_performance(
    sessions: &[WorkoutSession],
    exercise_id: ExerciseID,
) -> Option<&PerformedExercise> {
    sessions
        .iter()
        .filter(|s| s.exercises().contains(&exercise_id))
        .max_by_key(|s| s.date)
        .and_then(|s| s.exercises.iter().find(|e| e.exercise_id == exercise_id))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use crate::{Reps, SetID, Weight};

    use super::*;

    fn performed_exercise(exercise_id: u128, weight: f32) -> PerformedExercise {
        PerformedExercise {
            exercise_id: exercise_id.into(),
            exercise_name: Name::new("X").unwrap(),
            muscle_group: MuscleGroup::Chest,
            notes: Notes::default(),
            sets: vec![WorkoutSet {
                id: SetID::from(1),
                weight: Weight::new(weight).unwrap(),
                reps: Reps::new(8).unwrap(),
                completed: true,
            }],
        }
    }

    fn session(id: u128, days_ago: i64, exercises: Vec<PerformedExercise>) -> WorkoutSession {
        WorkoutSession {
            id: id.into(),
            routine_id: 1.into(),
            routine_name: Name::new("Push Day").unwrap(),
            variant_id: 1.into(),
            variant_name: Name::new("A").unwrap(),
            date: Utc::now() - Duration::days(days_ago),
            exercises,
            duration_seconds: 3600,
        }
    }

    #[test]
    fn test_workout_session_exercises() {
        let session = session(
            1,
            0,
            vec![performed_exercise(1, 60.0), performed_exercise(2, 30.0)],
        );
        assert_eq!(session.exercises(), BTreeSet::from([1.into(), 2.into()]));
    }

    #[test]
    fn test_most_recent_performance_picks_newest_session() {
        let sessions = vec![
            session(1, 10, vec![performed_exercise(1, 50.0)]),
            session(2, 2, vec![performed_exercise(1, 60.0)]),
            session(3, 5, vec![performed_exercise(1, 55.0), performed_exercise(2, 30.0)]),
        ];
        assert_eq!(
            most_recent_performance(&sessions, 1.into()).map(|e| e.sets[0].weight),
            Some(Weight::new(60.0).unwrap())
        );
        assert_eq!(
            most_recent_performance(&sessions, 2.into()).map(|e| e.sets[0].weight),
            Some(Weight::new(30.0).unwrap())
        );
    }

    #[test]
    fn test_most_recent_performance_without_history() {
        let sessions = vec![session(1, 1, vec![performed_exercise(1, 50.0)])];
        assert_eq!(most_recent_performance(&sessions, 9.into()), None);
        assert_eq!(most_recent_performance(&[], 1.into()), None);
    }
}
