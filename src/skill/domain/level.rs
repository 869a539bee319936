//! Validated proficiency level.

use super::SkillDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Proficiency level from 1 (novice) to 5 (expert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct SkillLevel(u8);

impl SkillLevel {
    /// Lowest accepted level.
    pub const MIN: u8 = 1;
    /// Highest accepted level.
    pub const MAX: u8 = 5;

    /// Creates a validated level.
    ///
    /// # Errors
    ///
    /// Returns [`SkillDomainError::LevelOutOfRange`] unless
    /// `1 <= value <= 5`.
    pub fn new(value: i32) -> Result<Self, SkillDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|level| (Self::MIN..=Self::MAX).contains(level))
            .map(Self)
            .ok_or(SkillDomainError::LevelOutOfRange(value))
    }

    /// Returns the level as an integer.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for SkillLevel {
    type Error = SkillDomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SkillLevel> for i32 {
    fn from(level: SkillLevel) -> Self {
        Self::from(level.0)
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
