//! Plan generation and download.
//!
//! Ties the prompt builders to the [`Completer`] and writes finished plans
//! to disk. A generated plan is plain text with markdown-style headings.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::ModelDescriptor;
use crate::completion::{Completer, Completion};
use crate::constants::{FITNESS_PLAN_FILENAME, NON_FREE_MODEL_MESSAGE, NUTRITION_PLAN_FILENAME};
use crate::profile::UserProfile;
use crate::provider::ProviderError;
use crate::prompt::{build_fitness_prompt, build_nutrition_prompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    Nutrition,
    Fitness,
}

impl PlanKind {
    /// Filename used when the user saves without naming a file.
    pub fn default_filename(self) -> &'static str {
        match self {
            Self::Nutrition => NUTRITION_PLAN_FILENAME,
            Self::Fitness => FITNESS_PLAN_FILENAME,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Nutrition => "Piano Nutrizionale",
            Self::Fitness => "Piano Fitness",
        }
    }
}

/// Refuses models that are not free; plans are only generated with free models.
pub fn ensure_free(model: &ModelDescriptor) -> Result<(), &'static str> {
    if model.free {
        Ok(())
    } else {
        Err(NON_FREE_MODEL_MESSAGE)
    }
}

/// Generates a nutrition plan. Errors are returned as-is; callers decide
/// what to show for them.
pub async fn generate_nutrition_plan<S: AsRef<str>>(
    completer: &Completer,
    model_id: &str,
    profile: &UserProfile,
    seasonal_foods: &[S],
) -> Result<Completion, ProviderError> {
    let prompt = build_nutrition_prompt(profile, seasonal_foods);
    completer.try_complete(model_id, &prompt).await
}

pub async fn generate_fitness_plan(
    completer: &Completer,
    model_id: &str,
    profile: &UserProfile,
) -> Result<Completion, ProviderError> {
    let prompt = build_fitness_prompt(profile);
    completer.try_complete(model_id, &prompt).await
}

/// Writes the plan to `path`, or to the kind's default filename in the
/// current directory. Returns the path written.
pub fn save(plan: &str, kind: PlanKind, path: Option<&Path>) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(kind.default_filename()));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    fs::write(&path, plan).with_context(|| format!("Failed to write plan to {:?}", path))?;
    Ok(path)
}
