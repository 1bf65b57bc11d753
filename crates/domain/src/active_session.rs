use chrono::{DateTime, Duration, Utc};
use log::warn;

use crate::{
    Catalog, DEFAULT_REPS, DEFAULT_WEIGHT, Exercise, ExerciseID, MuscleGroup, Name, Notes, Reps,
    Routine, RoutineExercise, RoutineID, VariantID, Weight, WorkoutSession, WorkoutSessionID,
    WorkoutSet, most_recent_performance, move_item,
};

/// The in-memory state of one workout attempt, from starting a routine's
/// current variant until the attempt is finished or abandoned. Owns the
/// transient performed-exercise list exclusively; dropping the value cancels
/// the workout without a trace.
#[derive(Debug)]
pub struct ActiveSession {
    routine_id: RoutineID,
    routine_name: Name,
    variant_id: VariantID,
    variant_name: Name,
    template: Vec<RoutineExercise>,
    exercises: Vec<SessionExercise>,
    history: Vec<WorkoutSession>,
    started_at: DateTime<Utc>,
    state: SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    /// The session structure diverged from the routine template and the user
    /// has been asked whether to keep the changes.
    ConfirmingChanges,
    Terminated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionExercise {
    pub exercise_id: ExerciseID,
    pub exercise_name: Name,
    pub muscle_group: MuscleGroup,
    pub notes: Notes,
    pub sets: Vec<SessionSet>,
}

impl SessionExercise {
    /// Builds the session entry for one template exercise. Set ids are taken
    /// from the template so structural comparison stays possible; values come
    /// from the last performance where it has a set at the same position.
    fn seed(
        template: &RoutineExercise,
        exercise: &Exercise,
        last: Option<&crate::PerformedExercise>,
    ) -> Self {
        Self {
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            muscle_group: exercise.muscle_group,
            notes: Notes::default(),
            sets: template
                .sets
                .iter()
                .enumerate()
                .map(|(i, t)| match last.and_then(|l| l.sets.get(i)) {
                    Some(p) => SessionSet {
                        set: WorkoutSet {
                            id: t.id,
                            weight: p.weight,
                            reps: p.reps,
                            completed: false,
                        },
                        previous: Some(Previous {
                            weight: p.weight,
                            reps: p.reps,
                        }),
                    },
                    None => SessionSet {
                        set: WorkoutSet {
                            id: t.id,
                            weight: t.weight,
                            reps: t.reps,
                            completed: false,
                        },
                        previous: None,
                    },
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSet {
    pub set: WorkoutSet,
    /// What was done for this set position last time, for display only.
    pub previous: Option<Previous>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Previous {
    pub weight: Weight,
    pub reps: Reps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Weight,
    Reps,
}

/// Which ways the session structure diverged from the routine template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateDiff {
    /// An exercise was performed that the template does not contain.
    pub added_exercises: bool,
    /// An exercise present in both has a different number of sets.
    pub changed_set_counts: bool,
    /// The sequence of exercise ids differs (order-sensitive; also true when
    /// an exercise was removed).
    pub changed_order: bool,
}

impl TemplateDiff {
    #[must_use]
    pub fn any(self) -> bool {
        self.added_exercises || self.changed_set_counts || self.changed_order
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    /// Nothing diverged from the template; finish directly.
    Ready,
    /// The user must decide whether to keep the structural changes.
    ConfirmationRequired(TemplateDiff),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StartError {
    #[error("the routine has no variants")]
    NoVariants,
    #[error("the selected variant has no exercises")]
    NoExercises,
}

impl ActiveSession {
    /// Starts a workout against the routine's current rotation variant,
    /// seeding each set from the most recent performance of its exercise
    /// where one exists, and from the template otherwise.
    pub fn start(
        routine: &Routine,
        catalog: &Catalog,
        history: Vec<WorkoutSession>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, StartError> {
        let Some(variant) = routine.next_variant() else {
            return Err(StartError::NoVariants);
        };
        if variant.exercises.is_empty() {
            return Err(StartError::NoExercises);
        }

        let exercises = variant
            .exercises
            .iter()
            .filter_map(|template| {
                let Some(exercise) = catalog.get(template.exercise_id) else {
                    warn!(
                        "variant {} refers to an exercise missing from the catalog, skipping it",
                        variant.name
                    );
                    return None;
                };
                Some(SessionExercise::seed(
                    template,
                    exercise,
                    most_recent_performance(&history, template.exercise_id),
                ))
            })
            .collect();

        Ok(Self {
            routine_id: routine.id,
            routine_name: routine.name.clone(),
            variant_id: variant.id,
            variant_name: variant.name.clone(),
            template: variant.exercises.clone(),
            exercises,
            history,
            started_at,
            state: SessionState::InProgress,
        })
    }

    #[must_use]
    pub fn routine_id(&self) -> RoutineID {
        self.routine_id
    }

    #[must_use]
    pub fn variant_id(&self) -> VariantID {
        self.variant_id
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn exercises(&self) -> &[SessionExercise] {
        &self.exercises
    }

    /// Time since the workout was started, for display.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.started_at
    }

    /// Appends a set copying the last set's values, or 0 kg / 0 reps if the
    /// exercise has no sets left.
    pub fn add_set(&mut self, exercise_index: usize) {
        if self.state != SessionState::InProgress {
            return;
        }
        let Some(exercise) = self.exercises.get_mut(exercise_index) else {
            return;
        };
        let (weight, reps) = exercise
            .sets
            .last()
            .map_or((Weight::default(), Reps::default()), |s| {
                (s.set.weight, s.set.reps)
            });
        exercise.sets.push(SessionSet {
            set: WorkoutSet::new(weight, reps),
            previous: None,
        });
    }

    /// Applies free-text input to a set. Completed sets are immutable until
    /// un-toggled. Unparsable input is coerced, not rejected.
    pub fn update_set(
        &mut self,
        exercise_index: usize,
        set_index: usize,
        field: SetField,
        input: &str,
    ) {
        if self.state != SessionState::InProgress {
            return;
        }
        let Some(session_set) = self
            .exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
        else {
            return;
        };
        if session_set.set.completed {
            return;
        }
        match field {
            SetField::Weight => session_set.set.weight = Weight::from_input(input),
            SetField::Reps => session_set.set.reps = Reps::from_input(input),
        }
    }

    pub fn toggle_completion(&mut self, exercise_index: usize, set_index: usize) {
        if self.state != SessionState::InProgress {
            return;
        }
        if let Some(session_set) = self
            .exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
        {
            session_set.set.completed = !session_set.set.completed;
        }
    }

    /// Replaces the exercise's notes. Text over the length limit is ignored.
    pub fn update_notes(&mut self, exercise_index: usize, text: &str) {
        if self.state != SessionState::InProgress {
            return;
        }
        if let (Some(exercise), Ok(notes)) =
            (self.exercises.get_mut(exercise_index), Notes::new(text))
        {
            exercise.notes = notes;
        }
    }

    /// Adds an exercise to the session, seeded from its most recent
    /// performance, or with a single default set if it was never performed.
    /// No-op if the exercise is already part of the session.
    pub fn add_exercise(&mut self, exercise: &Exercise) {
        if self.state != SessionState::InProgress
            || self.exercises.iter().any(|e| e.exercise_id == exercise.id)
        {
            return;
        }
        let sets = match most_recent_performance(&self.history, exercise.id) {
            Some(last) => last
                .sets
                .iter()
                .map(|s| SessionSet {
                    set: WorkoutSet::new(s.weight, s.reps),
                    previous: Some(Previous {
                        weight: s.weight,
                        reps: s.reps,
                    }),
                })
                .collect(),
            None => vec![SessionSet {
                set: WorkoutSet::new(DEFAULT_WEIGHT, DEFAULT_REPS),
                previous: None,
            }],
        };
        self.exercises.push(SessionExercise {
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            muscle_group: exercise.muscle_group,
            notes: Notes::default(),
            sets,
        });
    }

    /// Removes the exercise and all its sets. No confirmation at this layer.
    pub fn remove_exercise(&mut self, exercise_index: usize) {
        if self.state != SessionState::InProgress || exercise_index >= self.exercises.len() {
            return;
        }
        self.exercises.remove(exercise_index);
    }

    pub fn reorder_exercises(&mut self, from: usize, to: usize) {
        if self.state != SessionState::InProgress {
            return;
        }
        move_item(&mut self.exercises, from, to);
    }

    #[must_use]
    pub fn diff_against_template(&self) -> TemplateDiff {
        let template_ids = self
            .template
            .iter()
            .map(|e| e.exercise_id)
            .collect::<Vec<_>>();
        let current_ids = self
            .exercises
            .iter()
            .map(|e| e.exercise_id)
            .collect::<Vec<_>>();

        TemplateDiff {
            added_exercises: current_ids.iter().any(|id| !template_ids.contains(id)),
            changed_set_counts: self.exercises.iter().any(|e| {
                self.template
                    .iter()
                    .find(|t| t.exercise_id == e.exercise_id)
                    .is_some_and(|t| t.sets.len() != e.sets.len())
            }),
            changed_order: current_ids != template_ids,
        }
    }

    /// Checks whether the session can finish directly or the user must first
    /// decide what to do with structural changes to the routine.
    pub fn attempt_finish(&mut self) -> FinishOutcome {
        if self.state != SessionState::InProgress {
            return FinishOutcome::Ready;
        }
        let diff = self.diff_against_template();
        if diff.any() {
            self.state = SessionState::ConfirmingChanges;
            FinishOutcome::ConfirmationRequired(diff)
        } else {
            FinishOutcome::Ready
        }
    }

    /// Returns from the confirmation prompt to the running workout.
    pub fn resume(&mut self) {
        if self.state == SessionState::ConfirmingChanges {
            self.state = SessionState::InProgress;
        }
    }

    /// The current session structure as routine template exercises (set
    /// values without completion state), for persisting back into the
    /// routine's variant.
    #[must_use]
    pub fn as_routine_exercises(&self) -> Vec<RoutineExercise> {
        self.exercises
            .iter()
            .map(|e| RoutineExercise {
                exercise_id: e.exercise_id,
                sets: e
                    .sets
                    .iter()
                    .map(|s| WorkoutSet {
                        id: s.set.id,
                        weight: s.set.weight,
                        reps: s.set.reps,
                        completed: false,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Finalizes the workout: keeps only completed sets, drops exercises
    /// without any, and returns the historical record to append. Returns
    /// `None` if nothing was completed; an abandoned workout leaves no trace.
    /// The session is terminated either way.
    pub fn finish(&mut self, finished_at: DateTime<Utc>) -> Option<WorkoutSession> {
        if self.state == SessionState::Terminated {
            return None;
        }
        self.state = SessionState::Terminated;

        let exercises = self
            .exercises
            .drain(..)
            .map(|e| crate::PerformedExercise {
                exercise_id: e.exercise_id,
                exercise_name: e.exercise_name,
                muscle_group: e.muscle_group,
                notes: e.notes,
                sets: e
                    .sets
                    .into_iter()
                    .filter(|s| s.set.completed)
                    .map(|s| s.set)
                    .collect(),
            })
            .filter(|e| !e.sets.is_empty())
            .collect::<Vec<_>>();

        if exercises.is_empty() {
            return None;
        }

        Some(WorkoutSession {
            id: WorkoutSessionID::random(),
            routine_id: self.routine_id,
            routine_name: self.routine_name.clone(),
            variant_id: self.variant_id,
            variant_name: self.variant_name.clone(),
            date: finished_at,
            exercises,
            duration_seconds: u32::try_from((finished_at - self.started_at).num_seconds())
                .unwrap_or(0),
        })
    }
}
