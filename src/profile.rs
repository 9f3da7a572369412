//! User profile collected per plan request.
//!
//! A [`UserProfile`] is built from CLI flags or the interactive session,
//! fed to the prompt builders in [`crate::prompt`], and then dropped. It is
//! never written to disk.

use clap::ValueEnum;
use thiserror::Error;

use crate::constants::MAX_AGE;

/// Errors raised while building a profile from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("age must be between 1 and 120, got {0}")]
    InvalidAge(u32),
    #[error("unknown activity level '{0}'")]
    UnknownActivityLevel(String),
    #[error("unknown fitness goal '{0}'")]
    UnknownFitnessGoal(String),
}

/// How physically active the user is during a typical week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    Active,
    VeryActive,
    Athlete,
}

impl ActivityLevel {
    /// Label interpolated into prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentario",
            Self::LightlyActive => "leggermente_attivo",
            Self::Active => "attivo",
            Self::VeryActive => "molto_attivo",
            Self::Athlete => "atleta",
        }
    }

    /// Parses either the CLI name (`very_active`) or the Italian label.
    pub fn parse(s: &str) -> Result<Self, ProfileError> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::value_variants()
            .iter()
            .copied()
            .find(|v| {
                v.label() == needle
                    || v.to_possible_value()
                        .is_some_and(|p| p.get_name() == needle)
            })
            .ok_or_else(|| ProfileError::UnknownActivityLevel(s.to_string()))
    }
}

/// What the user wants to achieve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum FitnessGoal {
    GeneralFitness,
    WeightLoss,
    Strength,
}

impl FitnessGoal {
    /// Label interpolated into prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::GeneralFitness => "benessere_generale",
            Self::WeightLoss => "perdita_peso",
            Self::Strength => "forza",
        }
    }

    /// Parses either the CLI name (`weight_loss`) or the Italian label.
    pub fn parse(s: &str) -> Result<Self, ProfileError> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::value_variants()
            .iter()
            .copied()
            .find(|v| {
                v.label() == needle
                    || v.to_possible_value()
                        .is_some_and(|p| p.get_name() == needle)
            })
            .ok_or_else(|| ProfileError::UnknownFitnessGoal(s.to_string()))
    }
}

/// Insertion-ordered set of dietary restrictions.
///
/// Entries are trimmed; blanks and exact duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietaryRestrictions(Vec<String>);

impl DietaryRestrictions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a restriction. Returns `false` if it was blank or already present.
    pub fn add(&mut self, restriction: &str) -> bool {
        let trimmed = restriction.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.0.push(trimmed.to_string());
        true
    }

    pub fn remove(&mut self, restriction: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|r| r != restriction.trim());
        self.0.len() != before
    }

    /// Adds the restriction if absent, removes it otherwise.
    pub fn toggle(&mut self, restriction: &str) {
        if !self.remove(restriction) {
            self.add(restriction);
        }
    }

    pub fn contains(&self, restriction: &str) -> bool {
        self.0.iter().any(|r| r == restriction)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for DietaryRestrictions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for r in iter {
            set.add(r.as_ref());
        }
        set
    }
}

/// Inputs for a single plan request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub age: u32,
    pub activity_level: ActivityLevel,
    pub dietary_restrictions: DietaryRestrictions,
    pub fitness_goal: FitnessGoal,
}

impl UserProfile {
    /// Builds a profile, rejecting ages outside `1..=120`.
    pub fn new(
        age: u32,
        activity_level: ActivityLevel,
        dietary_restrictions: DietaryRestrictions,
        fitness_goal: FitnessGoal,
    ) -> Result<Self, ProfileError> {
        if age == 0 || age > MAX_AGE {
            return Err(ProfileError::InvalidAge(age));
        }
        Ok(Self {
            age,
            activity_level,
            dietary_restrictions,
            fitness_goal,
        })
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            age: crate::constants::DEFAULT_AGE,
            activity_level: ActivityLevel::Active,
            dietary_restrictions: DietaryRestrictions::new(),
            fitness_goal: FitnessGoal::GeneralFitness,
        }
    }
}
