//! Plan subcommands: resolve the model, build the profile, generate, show.

use anyhow::{bail, Result};
use colored::Colorize;

use super::ProfileArgs;
use crate::catalog::{self, ModelDescriptor};
use crate::completion::{self, Completer, Completion, CompletionSettings};
use crate::config::Config;
use crate::context::SessionContext;
use crate::foods::{self, Season};
use crate::plan::{self, PlanKind};
use crate::profile::{DietaryRestrictions, UserProfile};
use crate::provider::{Provider, ProviderError};
use crate::format;

/// Loads config, fetches the catalog and resolves the model to use.
///
/// Priority: `--model` flag > config `model` > built-in default.
async fn prepare(model: Option<&str>) -> Result<(Completer, ModelDescriptor)> {
    let config = Config::load()?;
    let provider = Provider::from_config(&config)?;

    let mut context = SessionContext::new();
    context.set_catalog(catalog::fetch_catalog(&provider).await);
    let id = model.unwrap_or(config.model.as_str());
    if !context.select_id(id) {
        eprintln!(
            "{} {} is not in the model catalog; it may not work",
            "warning:".yellow().bold(),
            id
        );
    }
    let selected = context.selected().clone();
    if let Err(msg) = plan::ensure_free(&selected) {
        bail!("{msg}");
    }

    let completer = Completer::new(provider, CompletionSettings::from_config(&config));
    Ok((completer, selected))
}

fn print_header(kind: PlanKind, model: &ModelDescriptor) {
    println!(
        "{} [model: {}]",
        kind.title().bold().cyan(),
        model.id.yellow()
    );
    println!("{}", "Generazione in corso...".dimmed());
    println!();
}

/// Shows the generated plan and saves it when asked. A failed generation
/// is reported as an error so nothing is written and the exit code is non-zero.
fn finish(
    result: Result<Completion, ProviderError>,
    kind: PlanKind,
    args: &ProfileArgs,
) -> Result<()> {
    let text = match result {
        Ok(c) => c.text,
        Err(e) => {
            tracing::debug!(error = %e, "plan generation failed");
            bail!("{}", completion::user_message(Err(e)));
        }
    };
    let plan_text = text.as_str();
    println!("{}", format::render_plan(plan_text));
    println!();
    if args.save || args.output.is_some() {
        let path = plan::save(plan_text, kind, args.output.as_deref())?;
        println!("{} {}", "Salvato in".green(), path.display());
    }
    Ok(())
}

pub(crate) async fn nutrition(
    args: ProfileArgs,
    restrictions: Vec<String>,
    season: Option<Season>,
    food_names: Vec<String>,
) -> Result<()> {
    let restrictions: DietaryRestrictions = restrictions.iter().collect();
    let profile = UserProfile::new(args.age, args.activity, restrictions, args.goal)?;
    let foods = if food_names.is_empty() {
        foods::food_names(season.unwrap_or_else(foods::current_season))
    } else {
        food_names
    };

    let (completer, model) = prepare(args.model.as_deref()).await?;
    print_header(PlanKind::Nutrition, &model);
    let result = plan::generate_nutrition_plan(&completer, &model.id, &profile, &foods).await;
    finish(result, PlanKind::Nutrition, &args)
}

pub(crate) async fn fitness(args: ProfileArgs) -> Result<()> {
    let profile = UserProfile::new(
        args.age,
        args.activity,
        DietaryRestrictions::new(),
        args.goal,
    )?;

    let (completer, model) = prepare(args.model.as_deref()).await?;
    print_header(PlanKind::Fitness, &model);
    let result = plan::generate_fitness_plan(&completer, &model.id, &profile).await;
    finish(result, PlanKind::Fitness, &args)
}
