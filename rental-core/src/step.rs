//! Form step numbering.

use std::fmt;
use thiserror::Error;

/// Errors constructing a [`FormStep`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// Step number outside 1..=6.
    #[error("step {0} is out of range (1..=6)")]
    OutOfRange(u8),
}

/// One page of the multi-step form.
///
/// Steps 1-5 collect input and sync it to the lead backend; step 6 is the
/// terminal success page.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormStep(u8);

impl FormStep {
    /// Lowest step number.
    pub const FIRST: u8 = 1;
    /// Last step that submits data.
    pub const LAST_INPUT: u8 = 5;
    /// Terminal success step.
    pub const TERMINAL: u8 = 6;

    /// Create a step, rejecting numbers outside 1..=6.
    pub fn new(step: u8) -> Result<Self, StepError> {
        if (Self::FIRST..=Self::TERMINAL).contains(&step) {
            Ok(Self(step))
        } else {
            Err(StepError::OutOfRange(step))
        }
    }

    /// The ZIP code step.
    pub fn first() -> Self {
        Self(Self::FIRST)
    }

    /// The success step.
    pub fn terminal() -> Self {
        Self(Self::TERMINAL)
    }

    /// Numeric value (1..=6).
    pub fn number(&self) -> u8 {
        self.0
    }

    /// The following step, saturating at the terminal step.
    pub fn next(&self) -> Self {
        Self((self.0 + 1).min(Self::TERMINAL))
    }

    /// The preceding step, floored at the first step.
    pub fn previous(&self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::FIRST))
    }

    /// Whether this is the success step.
    pub fn is_terminal(&self) -> bool {
        self.0 == Self::TERMINAL
    }

    /// Whether this step submits data and carries location data back.
    pub fn is_final_input(&self) -> bool {
        self.0 == Self::LAST_INPUT
    }

    /// Iterate over the input steps 1..=5.
    pub fn input_steps() -> impl Iterator<Item = FormStep> {
        (Self::FIRST..=Self::LAST_INPUT).map(FormStep)
    }
}

impl Default for FormStep {
    fn default() -> Self {
        Self::first()
    }
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormStep({})", self.0)
    }
}

impl TryFrom<u8> for FormStep {
    type Error = StepError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_enforced() {
        assert!(FormStep::new(0).is_err());
        assert!(FormStep::new(7).is_err());
        assert_eq!(FormStep::new(6).unwrap(), FormStep::terminal());
    }

    #[test]
    fn next_saturates_at_terminal() {
        assert_eq!(FormStep::new(5).unwrap().next(), FormStep::terminal());
        assert_eq!(FormStep::terminal().next(), FormStep::terminal());
    }

    #[test]
    fn previous_floors_at_first() {
        assert_eq!(FormStep::first().previous(), FormStep::first());
        assert_eq!(FormStep::new(3).unwrap().previous().number(), 2);
    }

    #[test]
    fn input_steps_are_one_to_five() {
        let steps: Vec<u8> = FormStep::input_steps().map(|s| s.number()).collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }
}
