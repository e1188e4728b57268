//! Maps a representative loss score to a skill category.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Skill brackets in ascending order of the score cutoffs.
///
/// Note that `Professional` sits below `Expert` numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillCategory {
    Beginner,
    Intermediate,
    Professional,
    Expert,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Beginner,
        SkillCategory::Intermediate,
        SkillCategory::Professional,
        SkillCategory::Expert,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkillCategory::Beginner => "Beginner",
            SkillCategory::Intermediate => "Intermediate",
            SkillCategory::Professional => "Professional",
            SkillCategory::Expert => "Expert",
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown skill category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for SkillCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillCategory::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Upper bounds (exclusive) of the three lower brackets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub beginner: f64,
    pub intermediate: f64,
    pub professional: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            beginner: 0.20,
            intermediate: 0.40,
            professional: 0.70,
        }
    }
}

impl Thresholds {
    /// Half-open brackets: a score equal to a cutoff lands in the higher one.
    pub fn classify(&self, score: f64) -> SkillCategory {
        if score < self.beginner {
            SkillCategory::Beginner
        } else if score < self.intermediate {
            SkillCategory::Intermediate
        } else if score < self.professional {
            SkillCategory::Professional
        } else {
            SkillCategory::Expert
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let cutoffs = [self.beginner, self.intermediate, self.professional];
        if cutoffs.iter().any(|c| !c.is_finite()) {
            return Err("thresholds must be finite".to_string());
        }
        if !(self.beginner < self.intermediate && self.intermediate < self.professional) {
            return Err(format!(
                "thresholds must be strictly increasing, got {} / {} / {}",
                self.beginner, self.intermediate, self.professional
            ));
        }
        Ok(())
    }
}

/// Classifies with the default 0.20 / 0.40 / 0.70 cutoffs.
pub fn classify(score: f64) -> SkillCategory {
    Thresholds::default().classify(score)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod classifier_tests;
