use std::slice::Iter;

use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, Name, ReadError};

pub trait ExerciseRepository {
    fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    fn create_exercise(
        &self,
        name: Name,
        muscle_group: MuscleGroup,
        equipment: Equipment,
    ) -> Result<Exercise, CreateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Abs,
    Forearms,
    Calves,
    Glutes,
}

impl Property for MuscleGroup {
    fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 10] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Shoulders,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Abs,
            MuscleGroup::Forearms,
            MuscleGroup::Calves,
            MuscleGroup::Glutes,
        ];
        MUSCLE_GROUPS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::Glutes => "Glutes",
        }
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = UnknownMuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|m| m.name() == value)
            .copied()
            .ok_or_else(|| UnknownMuscleGroupError(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown muscle group: {0}")]
pub struct UnknownMuscleGroupError(String);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Kettlebell,
    Bodyweight,
    Other,
}

impl Property for Equipment {
    fn iter() -> Iter<'static, Equipment> {
        static EQUIPMENT: [Equipment; 6] = [
            Equipment::Barbell,
            Equipment::Dumbbell,
            Equipment::Machine,
            Equipment::Kettlebell,
            Equipment::Bodyweight,
            Equipment::Other,
        ];
        EQUIPMENT.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Machine => "Machine",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::Bodyweight => "Bodyweight",
            Equipment::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Equipment {
    type Error = UnknownEquipmentError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Equipment::iter()
            .find(|e| e.name() == value)
            .copied()
            .ok_or_else(|| UnknownEquipmentError(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Unknown equipment: {0}")]
pub struct UnknownEquipmentError(String);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_muscle_group_names_are_unique() {
        let names = MuscleGroup::iter().map(|m| m.name()).collect::<Vec<_>>();
        let mut deduplicated = names.clone();
        deduplicated.dedup();
        assert_eq!(names, deduplicated);
    }

    #[rstest]
    #[case("Chest", Ok(MuscleGroup::Chest))]
    #[case("Glutes", Ok(MuscleGroup::Glutes))]
    #[case("Neck", Err(UnknownMuscleGroupError("Neck".to_string())))]
    fn test_muscle_group_try_from(
        #[case] name: &str,
        #[case] expected: Result<MuscleGroup, UnknownMuscleGroupError>,
    ) {
        assert_eq!(MuscleGroup::try_from(name), expected);
    }

    #[rstest]
    #[case("Barbell", Ok(Equipment::Barbell))]
    #[case("Bodyweight", Ok(Equipment::Bodyweight))]
    #[case("Sled", Err(UnknownEquipmentError("Sled".to_string())))]
    fn test_equipment_try_from(
        #[case] name: &str,
        #[case] expected: Result<Equipment, UnknownEquipmentError>,
    ) {
        assert_eq!(Equipment::try_from(name), expected);
    }
}
