use chrono::Duration;
use liftlog_domain::{
    CreateError, DeleteError, Equipment, Exercise, ExerciseID, ExerciseRepository,
    MuscleGroup, Name, ReadError, Routine, RoutineExercise, RoutineID, RoutineRepository,
    RoutineVariant, StorageError, UpdateError, VariantID, WorkoutSession,
    WorkoutSessionRepository,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Backend, Key, model};

/// How long finished workouts are kept, relative to the newest one.
const RETENTION_DAYS: i64 = 365;

/// Repository implementation keeping each collection as one JSON document in
/// the backend. Every write replaces the whole document, so a failed write
/// leaves the stored state untouched.
pub struct JsonStore<B> {
    backend: B,
}

impl<B: Backend> JsonStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn read<T: DeserializeOwned>(&self, key: Key) -> Result<Vec<T>, ReadError> {
        match self.backend.get(key)? {
            Some(json) => {
                serde_json::from_str(&json).map_err(|err| ReadError::Other(Box::new(err)))
            }
            None => Ok(vec![]),
        }
    }

    fn write<T: Serialize>(&self, key: Key, values: &[T]) -> Result<(), StorageError> {
        let json = serde_json::to_string(values).map_err(|err| StorageError::Other(Box::new(err)))?;
        self.backend.set(key, json)
    }

    fn write_routines(&self, routines: &[Routine]) -> Result<(), StorageError> {
        self.write(
            Key::Routines,
            &routines.iter().map(model::Routine::from).collect::<Vec<_>>(),
        )
    }
}

impl<B: Backend> ExerciseRepository for JsonStore<B> {
    fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        self.read::<model::Exercise>(Key::CustomExercises)?
            .into_iter()
            .map(|e| Exercise::try_from(e).map_err(|err| ReadError::Other(Box::new(err))))
            .collect()
    }

    fn create_exercise(
        &self,
        name: Name,
        muscle_group: MuscleGroup,
        equipment: Equipment,
    ) -> Result<Exercise, CreateError> {
        let mut exercises = self.read_exercises()?;
        if exercises.iter().any(|e| e.name == name) {
            return Err(CreateError::Conflict);
        }
        let exercise = Exercise {
            id: ExerciseID::random(),
            name,
            muscle_group,
            equipment,
        };
        exercises.push(exercise.clone());
        self.write(
            Key::CustomExercises,
            &exercises.iter().map(model::Exercise::from).collect::<Vec<_>>(),
        )?;
        Ok(exercise)
    }
}

impl<B: Backend> RoutineRepository for JsonStore<B> {
    fn read_routines(&self) -> Result<Vec<Routine>, ReadError> {
        self.read::<model::StoredRoutine>(Key::Routines)?
            .into_iter()
            .map(|r| {
                Routine::try_from(model::Routine::from(r))
                    .map_err(|err| ReadError::Other(Box::new(err)))
            })
            .collect()
    }

    fn create_routine(
        &self,
        name: Name,
        variants: Vec<RoutineVariant>,
    ) -> Result<Routine, CreateError> {
        let mut routines = self.read_routines()?;
        let routine = Routine {
            id: RoutineID::random(),
            name,
            variants,
            next_variant_index: 0,
        };
        routines.push(routine.clone());
        self.write_routines(&routines)?;
        Ok(routine)
    }

    fn modify_routine(
        &self,
        id: RoutineID,
        name: Option<Name>,
        variants: Option<Vec<RoutineVariant>>,
    ) -> Result<Routine, UpdateError> {
        let mut routines = self.read_routines()?;
        let routine = routines
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(UpdateError::NotFound)?;
        if let Some(name) = name {
            routine.name = name;
        }
        if let Some(variants) = variants {
            routine.variants = variants;
        }
        let routine = routine.clone();
        self.write_routines(&routines)?;
        Ok(routine)
    }

    fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
        let mut routines = self.read_routines()?;
        let len = routines.len();
        routines.retain(|r| r.id != id);
        if routines.len() == len {
            return Err(DeleteError::NotFound);
        }
        self.write_routines(&routines)?;
        Ok(id)
    }

    fn update_variant(
        &self,
        routine_id: RoutineID,
        variant_id: VariantID,
        exercises: Vec<RoutineExercise>,
    ) -> Result<Routine, UpdateError> {
        let mut routines = self.read_routines()?;
        let routine = routines
            .iter_mut()
            .find(|r| r.id == routine_id)
            .ok_or(UpdateError::NotFound)?;
        let variant = routine
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or(UpdateError::NotFound)?;
        variant.exercises = exercises;
        let routine = routine.clone();
        self.write_routines(&routines)?;
        Ok(routine)
    }

    fn advance_rotation(&self, routine_id: RoutineID) -> Result<Routine, UpdateError> {
        let mut routines = self.read_routines()?;
        let routine = routines
            .iter_mut()
            .find(|r| r.id == routine_id)
            .ok_or(UpdateError::NotFound)?;
        routine.advance_rotation();
        let routine = routine.clone();
        self.write_routines(&routines)?;
        Ok(routine)
    }
}

impl<B: Backend> WorkoutSessionRepository for JsonStore<B> {
    fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
        self.read::<model::WorkoutSession>(Key::WorkoutSessions)?
            .into_iter()
            .map(|s| {
                WorkoutSession::try_from(s).map_err(|err| ReadError::Other(Box::new(err)))
            })
            .collect()
    }

    fn append_workout_session(
        &self,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError> {
        let mut sessions = self.read_workout_sessions()?;
        let cutoff = session.date - Duration::days(RETENTION_DAYS);
        sessions.push(session.clone());
        sessions.retain(|s| s.date >= cutoff);
        self.write(
            Key::WorkoutSessions,
            &sessions
                .iter()
                .map(model::WorkoutSession::from)
                .collect::<Vec<_>>(),
        )?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use crate::InMemoryBackend;

    use liftlog_domain::{Notes, PerformedExercise, Reps, SetID, Weight, WorkoutSessionID,
        WorkoutSet};

    use super::*;

    fn store() -> JsonStore<InMemoryBackend> {
        JsonStore::new(InMemoryBackend::new())
    }

    fn variant(id: u128, name: &str) -> RoutineVariant {
        RoutineVariant {
            id: id.into(),
            name: Name::new(name).unwrap(),
            exercises: vec![RoutineExercise {
                exercise_id: 1.into(),
                sets: vec![WorkoutSet {
                    id: SetID::from(1),
                    weight: Weight::new(60.0).unwrap(),
                    reps: Reps::new(8).unwrap(),
                    completed: false,
                }],
            }],
        }
    }

    fn session(date: DateTime<Utc>) -> WorkoutSession {
        WorkoutSession {
            id: WorkoutSessionID::random(),
            routine_id: 1.into(),
            routine_name: Name::new("Push Day").unwrap(),
            variant_id: 1.into(),
            variant_name: Name::new("A").unwrap(),
            date,
            exercises: vec![PerformedExercise {
                exercise_id: 1.into(),
                exercise_name: Name::new("Bench Press").unwrap(),
                muscle_group: MuscleGroup::Chest,
                notes: Notes::default(),
                sets: vec![WorkoutSet {
                    id: SetID::random(),
                    weight: Weight::new(60.0).unwrap(),
                    reps: Reps::new(8).unwrap(),
                    completed: true,
                }],
            }],
            duration_seconds: 1800,
        }
    }

    #[test]
    fn test_missing_keys_read_as_empty() {
        let store = store();
        assert_eq!(store.read_exercises().unwrap(), vec![]);
        assert_eq!(store.read_routines().unwrap(), vec![]);
        assert_eq!(store.read_workout_sessions().unwrap(), vec![]);
    }

    #[test]
    fn test_corrupted_document_is_an_error() {
        let backend = InMemoryBackend::new();
        backend.set(Key::Routines, "{not json".to_string()).unwrap();
        let store = JsonStore::new(backend);
        assert!(matches!(
            store.read_routines(),
            Err(ReadError::Other(_))
        ));
    }

    #[test]
    fn test_create_and_read_exercises() {
        let store = store();
        let exercise = store
            .create_exercise(
                Name::new("Cable Crossover").unwrap(),
                MuscleGroup::Chest,
                Equipment::Machine,
            )
            .unwrap();
        assert_eq!(store.read_exercises().unwrap(), vec![exercise]);
    }

    #[test]
    fn test_create_exercise_with_duplicate_name() {
        let store = store();
        let name = Name::new("Cable Crossover").unwrap();
        store
            .create_exercise(name.clone(), MuscleGroup::Chest, Equipment::Machine)
            .unwrap();
        assert!(matches!(
            store.create_exercise(name, MuscleGroup::Chest, Equipment::Machine),
            Err(CreateError::Conflict)
        ));
    }

    #[test]
    fn test_routine_crud() {
        let store = store();
        let routine = store
            .create_routine(
                Name::new("Push Day").unwrap(),
                vec![variant(1, "A"), variant(2, "B")],
            )
            .unwrap();
        assert_eq!(store.read_routines().unwrap(), vec![routine.clone()]);

        let renamed = store
            .modify_routine(routine.id, Some(Name::new("Push").unwrap()), None)
            .unwrap();
        assert_eq!(renamed.name.as_ref(), "Push");
        assert_eq!(renamed.variants, routine.variants);
        assert_eq!(store.read_routines().unwrap(), vec![renamed]);

        assert_eq!(store.delete_routine(routine.id).unwrap(), routine.id);
        assert_eq!(store.read_routines().unwrap(), vec![]);
        assert!(matches!(
            store.delete_routine(routine.id),
            Err(DeleteError::NotFound)
        ));
    }

    #[test]
    fn test_update_variant_persists_new_exercises() {
        let store = store();
        let routine = store
            .create_routine(Name::new("Push Day").unwrap(), vec![variant(1, "A")])
            .unwrap();
        let updated = store
            .update_variant(routine.id, 1.into(), vec![])
            .unwrap();
        assert_eq!(updated.variants[0].exercises, vec![]);
        assert_eq!(store.read_routines().unwrap(), vec![updated]);
        assert!(matches!(
            store.update_variant(routine.id, 9.into(), vec![]),
            Err(UpdateError::NotFound)
        ));
    }

    #[test]
    fn test_advance_rotation_persists() {
        let store = store();
        let routine = store
            .create_routine(
                Name::new("Push Day").unwrap(),
                vec![variant(1, "A"), variant(2, "B")],
            )
            .unwrap();
        assert_eq!(
            store.advance_rotation(routine.id).unwrap().next_variant_index,
            1
        );
        assert_eq!(store.read_routines().unwrap()[0].next_variant_index, 1);
        assert!(matches!(
            store.advance_rotation(RoutineID::random()),
            Err(UpdateError::NotFound)
        ));
    }

    #[test]
    fn test_legacy_routine_loads_as_single_variant() {
        let backend = InMemoryBackend::new();
        backend
            .set(
                Key::Routines,
                format!(
                    r#"[{{
                        "id": "{id}",
                        "name": "Push Day",
                        "exercises": [{{"exerciseId": "{id}", "sets": [
                            {{"id": "{id}", "weight": 60.0, "reps": 8}}
                        ]}}]
                    }}]"#,
                    id = Uuid::from_u128(1)
                ),
            )
            .unwrap();
        let store = JsonStore::new(backend);

        let routines = store.read_routines().unwrap();
        assert_eq!(routines.len(), 1);
        assert_eq!(routines[0].variants.len(), 1);
        assert_eq!(routines[0].variants[0].id, 1.into());
        assert_eq!(routines[0].variants[0].name.as_ref(), "A");
        assert_eq!(routines[0].next_variant_index, 0);
        assert!(!routines[0].variants[0].exercises[0].sets[0].completed);

        // Loading again yields the same result, including the minted ids.
        assert_eq!(store.read_routines().unwrap(), routines);
    }

    #[test]
    fn test_append_workout_session_round_trips() {
        let store = store();
        let session = session(Utc::now());
        store.append_workout_session(session.clone()).unwrap();
        assert_eq!(store.read_workout_sessions().unwrap(), vec![session]);
    }

    #[test]
    fn test_append_workout_session_prunes_old_sessions() {
        let store = store();
        let now = Utc::now();
        let old = session(now - Duration::days(400));
        let recent = session(now - Duration::days(300));
        store.append_workout_session(old).unwrap();
        store.append_workout_session(recent.clone()).unwrap();
        let new = session(now);
        store.append_workout_session(new.clone()).unwrap();
        assert_eq!(store.read_workout_sessions().unwrap(), vec![recent, new]);
    }
}
