use derive_more::{Deref, Display, Into};
use uuid::Uuid;

/// Reps of a set added without a template set or previous performance to copy from.
pub const DEFAULT_REPS: Reps = Reps(10);
/// Weight of a set added without a template set or previous performance to copy from.
pub const DEFAULT_WEIGHT: Weight = Weight(20.0);

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Weight in kilograms, valid in the range 0 to 1000.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub const MIN: Weight = Weight(0.0);
    pub const MAX: Weight = Weight(1000.0);

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..=1000.0).contains(&value) {
            return Err(WeightError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn clamped(value: f32) -> Self {
        Self(value.clamp(0.0, 1000.0))
    }

    /// Interprets free-text input, substituting 0 for anything unparsable.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<f32>() {
            Ok(value) if value.is_finite() => Self::clamped(value),
            _ => Self::MIN,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0 to 1000 kg ({0} is not)")]
    OutOfRange(f32),
}

/// Repetitions of a set. Stored values may be 0 (not yet entered); values
/// entered by the user are kept in the range 1 to 50.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub const MIN: Reps = Reps(1);
    pub const MAX: Reps = Reps(50);

    pub fn new(value: u32) -> Result<Self, RepsError> {
        if value > 50 {
            return Err(RepsError::OutOfRange(value));
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn clamped(value: u32) -> Self {
        Self(value.clamp(1, 50))
    }

    /// Interprets free-text input, substituting 1 for anything unparsable.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        input.trim().parse::<u32>().map_or(Self::MIN, Self::clamped)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 50 ({0} > 50)")]
    OutOfRange(u32),
}

/// One set of an exercise. The id stays stable across edits so that template
/// and session structures can be compared.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub id: SetID,
    pub weight: Weight,
    pub reps: Reps,
    pub completed: bool,
}

impl WorkoutSet {
    #[must_use]
    pub fn new(weight: Weight, reps: Reps) -> Self {
        Self {
            id: SetID::random(),
            weight,
            reps,
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(62.5, Ok(Weight(62.5)))]
    #[case(1000.0, Ok(Weight(1000.0)))]
    #[case(-0.5, Err(WeightError::OutOfRange(-0.5)))]
    #[case(1000.5, Err(WeightError::OutOfRange(1000.5)))]
    fn test_weight_new(#[case] value: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(value), expected);
    }

    #[rstest]
    #[case("60", Weight(60.0))]
    #[case(" 62.5 ", Weight(62.5))]
    #[case("-10", Weight(0.0))]
    #[case("1200", Weight(1000.0))]
    #[case("abc", Weight(0.0))]
    #[case("", Weight(0.0))]
    #[case("NaN", Weight(0.0))]
    #[case("inf", Weight(0.0))]
    fn test_weight_from_input(#[case] input: &str, #[case] expected: Weight) {
        assert_eq!(Weight::from_input(input), expected);
    }

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(10, Ok(Reps(10)))]
    #[case(50, Ok(Reps(50)))]
    #[case(51, Err(RepsError::OutOfRange(51)))]
    fn test_reps_new(#[case] value: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(value), expected);
    }

    #[rstest]
    #[case("8", Reps(8))]
    #[case("0", Reps(1))]
    #[case("99", Reps(50))]
    #[case("7.5", Reps(1))]
    #[case("abc", Reps(1))]
    #[case("", Reps(1))]
    fn test_reps_from_input(#[case] input: &str, #[case] expected: Reps) {
        assert_eq!(Reps::from_input(input), expected);
    }

    #[test]
    fn test_workout_set_new() {
        let set = WorkoutSet::new(Weight::new(30.0).unwrap(), Reps::new(10).unwrap());
        assert_eq!(set.weight, Weight(30.0));
        assert_eq!(set.reps, Reps(10));
        assert!(!set.completed);
    }
}
