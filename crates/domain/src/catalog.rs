use std::sync::LazyLock;

use crate::{Equipment, Exercise, ExerciseID, MuscleGroup, Name, Property};

struct BuiltinExercise {
    id: u128,
    name: &'static str,
    muscle_group: MuscleGroup,
    equipment: Equipment,
}

static BUILTIN_EXERCISES: LazyLock<Vec<Exercise>> = LazyLock::new(|| {
    BUILTINS
        .iter()
        .map(|b| Exercise {
            id: b.id.into(),
            name: Name::new(b.name).unwrap(),
            muscle_group: b.muscle_group,
            equipment: b.equipment,
        })
        .collect()
});

const BUILTINS: [BuiltinExercise; 23] = [
    BuiltinExercise {
        id: 1,
        name: "Bench Press",
        muscle_group: MuscleGroup::Chest,
        equipment: Equipment::Barbell,
    },
    BuiltinExercise {
        id: 2,
        name: "Incline Dumbbell Press",
        muscle_group: MuscleGroup::Chest,
        equipment: Equipment::Dumbbell,
    },
    BuiltinExercise {
        id: 3,
        name: "Dumbbell Flyes",
        muscle_group: MuscleGroup::Chest,
        equipment: Equipment::Dumbbell,
    },
    BuiltinExercise {
        id: 4,
        name: "Push-ups",
        muscle_group: MuscleGroup::Chest,
        equipment: Equipment::Bodyweight,
    },
    BuiltinExercise {
        id: 5,
        name: "Pull-ups",
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Bodyweight,
    },
    BuiltinExercise {
        id: 6,
        name: "Deadlift",
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Barbell,
    },
    BuiltinExercise {
        id: 7,
        name: "Bent Over Row",
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Barbell,
    },
    BuiltinExercise {
        id: 8,
        name: "Lat Pulldown",
        muscle_group: MuscleGroup::Back,
        equipment: Equipment::Machine,
    },
    BuiltinExercise {
        id: 9,
        name: "Squat",
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Barbell,
    },
    BuiltinExercise {
        id: 10,
        name: "Leg Press",
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Machine,
    },
    BuiltinExercise {
        id: 11,
        name: "Lunges",
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Dumbbell,
    },
    BuiltinExercise {
        id: 12,
        name: "Leg Curls",
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Machine,
    },
    BuiltinExercise {
        id: 13,
        name: "Leg Extensions",
        muscle_group: MuscleGroup::Legs,
        equipment: Equipment::Machine,
    },
    BuiltinExercise {
        id: 14,
        name: "Overhead Press",
        muscle_group: MuscleGroup::Shoulders,
        equipment: Equipment::Barbell,
    },
    BuiltinExercise {
        id: 15,
        name: "Lateral Raises",
        muscle_group: MuscleGroup::Shoulders,
        equipment: Equipment::Dumbbell,
    },
    BuiltinExercise {
        id: 16,
        name: "Face Pulls",
        muscle_group: MuscleGroup::Shoulders,
        equipment: Equipment::Machine,
    },
    BuiltinExercise {
        id: 17,
        name: "Bicep Curls",
        muscle_group: MuscleGroup::Biceps,
        equipment: Equipment::Dumbbell,
    },
    BuiltinExercise {
        id: 18,
        name: "Hammer Curls",
        muscle_group: MuscleGroup::Biceps,
        equipment: Equipment::Dumbbell,
    },
    BuiltinExercise {
        id: 19,
        name: "Tricep Dips",
        muscle_group: MuscleGroup::Triceps,
        equipment: Equipment::Bodyweight,
    },
    BuiltinExercise {
        id: 20,
        name: "Tricep Pushdowns",
        muscle_group: MuscleGroup::Triceps,
        equipment: Equipment::Machine,
    },
    BuiltinExercise {
        id: 21,
        name: "Crunches",
        muscle_group: MuscleGroup::Abs,
        equipment: Equipment::Bodyweight,
    },
    BuiltinExercise {
        id: 22,
        name: "Plank",
        muscle_group: MuscleGroup::Abs,
        equipment: Equipment::Bodyweight,
    },
    BuiltinExercise {
        id: 23,
        name: "Leg Raises",
        muscle_group: MuscleGroup::Abs,
        equipment: Equipment::Bodyweight,
    },
];

/// All exercises available for planning and logging: the built-in list merged
/// with the user-defined ones, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    #[must_use]
    pub fn new(custom: Vec<Exercise>) -> Self {
        let mut exercises = BUILTIN_EXERCISES.clone();
        exercises.extend(custom);
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        Self { exercises }
    }

    #[must_use]
    pub fn get(&self, id: ExerciseID) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    /// Exercises whose name or muscle group contains `query`
    /// (case-insensitive), restricted to `equipment` if given.
    #[must_use]
    pub fn search(&self, query: &str, equipment: Option<Equipment>) -> Vec<&Exercise> {
        let query = query.to_lowercase();
        self.exercises
            .iter()
            .filter(|e| {
                e.name.as_ref().to_lowercase().contains(&query)
                    || e.muscle_group.name().to_lowercase().contains(&query)
            })
            .filter(|e| equipment.is_none_or(|eq| e.equipment == eq))
            .collect()
    }
}
