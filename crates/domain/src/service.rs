use chrono::{DateTime, Utc};
use log::{debug, error};

use crate::{
    ActiveSession, Catalog, CreateError, DeleteError, Equipment, Exercise, ExerciseRepository,
    MuscleGroup, Name, ReadError, Routine, RoutineExercise, RoutineID, RoutineRepository,
    RoutineVariant, StartError, UpdateError, VariantID, WorkoutSession, WorkoutSessionRepository,
};

/// Application-facing API tying the repositories and the session engine
/// together. All storage access of the UI goes through here so failures are
/// logged in one place.
pub struct Service<R> {
    repository: R,
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

#[derive(thiserror::Error, Debug)]
pub enum WorkoutStartError {
    #[error("routine not found")]
    NotFound,
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Session(#[from] StartError),
}

impl<R> Service<R>
where
    R: ExerciseRepository + RoutineRepository + WorkoutSessionRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn get_catalog(&self) -> Result<Catalog, ReadError> {
        let custom = log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )?;
        Ok(Catalog::new(custom))
    }

    pub fn create_exercise(
        &self,
        name: Name,
        muscle_group: MuscleGroup,
        equipment: Equipment,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(name, muscle_group, equipment),
            CreateError,
            "create",
            "exercise"
        )
    }

    pub fn get_routines(&self) -> Result<Vec<Routine>, ReadError> {
        log_on_error!(self.repository.read_routines(), ReadError, "get", "routines")
    }

    pub fn create_routine(
        &self,
        name: Name,
        variants: Vec<RoutineVariant>,
    ) -> Result<Routine, CreateError> {
        log_on_error!(
            self.repository.create_routine(name, variants),
            CreateError,
            "create",
            "routine"
        )
    }

    pub fn modify_routine(
        &self,
        id: RoutineID,
        name: Option<Name>,
        variants: Option<Vec<RoutineVariant>>,
    ) -> Result<Routine, UpdateError> {
        log_on_error!(
            self.repository.modify_routine(id, name, variants),
            UpdateError,
            "modify",
            "routine"
        )
    }

    pub fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
        log_on_error!(
            self.repository.delete_routine(id),
            DeleteError,
            "delete",
            "routine"
        )
    }

    pub fn update_variant(
        &self,
        routine_id: RoutineID,
        variant_id: VariantID,
        exercises: Vec<RoutineExercise>,
    ) -> Result<Routine, UpdateError> {
        log_on_error!(
            self.repository.update_variant(routine_id, variant_id, exercises),
            UpdateError,
            "update",
            "variant"
        )
    }

    pub fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_workout_sessions(),
            ReadError,
            "get",
            "workout sessions"
        )
    }

    /// Starts a workout for the routine's current rotation variant and
    /// advances the rotation. A failure to persist the advanced rotation is
    /// logged but does not abort the already started workout.
    pub fn start_workout(
        &self,
        routine_id: RoutineID,
        started_at: DateTime<Utc>,
    ) -> Result<ActiveSession, WorkoutStartError> {
        let routine = self
            .get_routines()?
            .into_iter()
            .find(|r| r.id == routine_id)
            .ok_or(WorkoutStartError::NotFound)?;
        let catalog = self.get_catalog()?;
        let history = self.get_workout_sessions()?;
        let session = ActiveSession::start(&routine, &catalog, history, started_at)?;
        if let Err(err) = self.repository.advance_rotation(routine_id) {
            error!("failed to advance rotation of routine {}: {err}", routine.name);
        }
        Ok(session)
    }

    /// Finalizes a workout: appends the historical record (if any set was
    /// completed) and, when requested, writes the session structure back into
    /// the routine's variant.
    pub fn finish_workout(
        &self,
        session: &mut ActiveSession,
        finished_at: DateTime<Utc>,
        update_template: bool,
    ) -> Result<Option<WorkoutSession>, CreateError> {
        if update_template {
            let exercises = session.as_routine_exercises();
            if let Err(err) =
                self.repository
                    .update_variant(session.routine_id(), session.variant_id(), exercises)
            {
                error!("failed to update routine template: {err}");
            }
        }
        match session.finish(finished_at) {
            Some(record) => {
                let record = log_on_error!(
                    self.repository.append_workout_session(record),
                    CreateError,
                    "append",
                    "workout session"
                )?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
