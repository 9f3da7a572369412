//! Command-line interface definition and dispatch for benessere.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand is
//! routed to its handler; plan generation lives in the [`plans`] submodule.

pub(crate) mod foods;
mod plans;

use crate::{catalog, config, context::SessionContext, foods::Season, provider, session};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::foods::FoodCategory;
use crate::profile::{ActivityLevel, FitnessGoal};

/// Top-level CLI structure for benessere.
#[derive(Parser)]
#[command(
    name = "benessere",
    about = "Seasonal nutrition and home fitness plans from free AI models"
)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the benessere CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// List available models
    Models {
        /// Include models that are not free
        #[arg(long)]
        all: bool,
        /// Filter by model name or provider
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Browse seasonal foods
    Foods {
        /// Season to show (defaults to the current one)
        #[arg(short, long, value_enum)]
        season: Option<Season>,
        /// Only show one category
        #[arg(short, long, value_enum)]
        category: Option<FoodCategory>,
    },
    /// Generate a personalised nutrition plan
    Nutrition {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Dietary restriction (repeatable), e.g. -r Vegano -r "Senza Glutine"
        #[arg(short, long = "restriction")]
        restrictions: Vec<String>,
        /// Season whose foods go into the plan (defaults to the current one)
        #[arg(long, value_enum)]
        season: Option<Season>,
        /// Food to include instead of the seasonal list (repeatable)
        #[arg(long = "food")]
        foods: Vec<String>,
    },
    /// Generate a home workout plan
    Fitness {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Start an interactive session
    Session {
        /// Model to start with
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Profile and output flags shared by the plan commands.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Age in years
    #[arg(short, long, default_value_t = crate::constants::DEFAULT_AGE)]
    pub age: u32,
    /// Activity level
    #[arg(long, value_enum, default_value_t = ActivityLevel::Active)]
    pub activity: ActivityLevel,
    /// Fitness goal
    #[arg(short, long, value_enum, default_value_t = FitnessGoal::GeneralFitness)]
    pub goal: FitnessGoal,
    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,
    /// Save the plan to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Save the plan under its default filename
    #[arg(long, conflicts_with = "output")]
    pub save: bool,
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current config (API key redacted)
    Show,
    /// Print the config file path
    Path,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Models { all, search } => {
            let config = config::Config::load()?;
            let provider = provider::Provider::from_config(&config)?;
            let mut context = SessionContext::new();
            context.set_catalog(catalog::fetch_catalog(&provider).await);
            context.select_id(&config.model);
            let selected = context.selected().id.clone();
            catalog::print_catalog(context.catalog(), &selected, search.as_deref(), !all);
            Ok(())
        }
        Commands::Foods { season, category } => {
            foods::print_foods(season.unwrap_or_else(crate::foods::current_season), category);
            Ok(())
        }
        Commands::Nutrition {
            profile,
            restrictions,
            season,
            foods,
        } => plans::nutrition(profile, restrictions, season, foods).await,
        Commands::Fitness { profile } => plans::fitness(profile).await,
        Commands::Session { model } => {
            let config = config::Config::load()?;
            session::run_session(config, model).await
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let mut config = config::Config::load()?;
                    let path = config::Config::config_path()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    println!();
                    if let Some(ref mut entry) = config.provider.openrouter {
                        if entry.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
                            entry.api_key = Some("********".to_string());
                        }
                    }
                    let toml_str = toml::to_string_pretty(&config)?;
                    println!("{}", toml_str);
                }
                ConfigAction::Path => {
                    println!("{}", config::Config::config_path()?.display());
                }
            }
            Ok(())
        }
    }
}
