//! Interactive session REPL for benessere.
//!
//! Keeps a [`SessionContext`] (catalog + selected model), the user profile
//! and the last generated plan alive across commands, using [`rustyline`]
//! for line editing and history. Nothing is persisted except readline
//! history.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::catalog;
use crate::completion::{self, Completer, Completion, CompletionSettings};
use crate::config::Config;
use crate::context::SessionContext;
use crate::foods::{self, Season};
use crate::format;
use crate::plan::{self, PlanKind};
use crate::profile::{ActivityLevel, FitnessGoal, UserProfile};
use crate::provider::{Provider, ProviderError};

use commands::SlashCommand;

/// State held for the lifetime of one interactive session.
struct Session {
    provider: Provider,
    completer: Completer,
    context: SessionContext,
    profile: UserProfile,
    last_plan: Option<(PlanKind, String)>,
}

/// Runs the interactive session REPL.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "arrivederci."
/// - Readline history is persisted to `~/.cache/benessere/session_history.txt`
pub async fn run_session(config: Config, model: Option<String>) -> Result<()> {
    let provider = Provider::from_config(&config)?;
    let completer = Completer::new(provider.clone(), CompletionSettings::from_config(&config));

    let mut session = Session {
        provider,
        completer,
        context: SessionContext::new(),
        profile: UserProfile::default(),
        last_plan: None,
    };
    session.refresh().await;
    let start = model.unwrap_or_else(|| config.model.clone());
    session.select(&start);

    println!(
        "{} [model: {}] (/help for commands, Ctrl+D to exit)",
        "benessere".bold().cyan(),
        session.context.selected().id.yellow(),
    );
    println!();

    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()?.join(crate::constants::HISTORY_FILENAME);
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    loop {
        match rl.readline(&format!("{} ", ">".green().bold())) {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if !line.starts_with('/') {
                    println!("{} Commands start with '/'. Try /help.", "?".yellow());
                    continue;
                }
                match commands::parse(&line) {
                    Ok(command) => session.handle(command).await,
                    Err(usage) => eprintln!("{} {}", "error:".red().bold(), usage),
                }
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "arrivederci.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    // Save readline history
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}

impl Session {
    /// Refetches the catalog; a stale selection falls back to the default.
    async fn refresh(&mut self) {
        let catalog = catalog::fetch_catalog(&self.provider).await;
        if self.context.set_catalog(catalog) {
            println!(
                "{} selected model is no longer available, switched to {}",
                "note:".yellow().bold(),
                self.context.selected().id.yellow()
            );
        }
    }

    fn select(&mut self, id: &str) {
        if !self.context.select_id(id) {
            eprintln!(
                "{} {} is not in the model catalog; it may not work",
                "warning:".yellow().bold(),
                id
            );
        }
        let selected = self.context.selected();
        if !selected.free {
            eprintln!("{} {}", "warning:".yellow().bold(), crate::constants::NON_FREE_MODEL_MESSAGE);
        }
    }

    async fn handle(&mut self, command: SlashCommand) {
        match command {
            SlashCommand::Help => print_help(),
            SlashCommand::Models { all, query } => {
                let selected = self.context.selected().id.clone();
                catalog::print_catalog(self.context.catalog(), &selected, query.as_deref(), !all);
            }
            SlashCommand::Refresh => {
                self.refresh().await;
                println!("{} {} models", "loaded".dimmed(), self.context.catalog().len());
            }
            SlashCommand::ShowModel => {
                let listed = self.context.is_selection_listed();
                let model = self.context.selected();
                println!("{} ({})", model.id.yellow().bold(), model.provider);
                if !model.description.is_empty() {
                    println!("  {}", model.description.dimmed());
                }
                if !listed {
                    println!("  {}", "not in the current catalog".dimmed());
                }
            }
            SlashCommand::SelectModel(id) => {
                self.select(&id);
                println!("{} {}", "model:".dimmed(), self.context.selected().id.yellow());
            }
            SlashCommand::ShowProfile => self.print_profile(),
            SlashCommand::Age(value) => match value.parse::<u32>() {
                Ok(age) => match UserProfile::new(
                    age,
                    self.profile.activity_level,
                    self.profile.dietary_restrictions.clone(),
                    self.profile.fitness_goal,
                ) {
                    Ok(profile) => self.profile = profile,
                    Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
                },
                Err(_) => eprintln!("{} age must be a number", "error:".red().bold()),
            },
            SlashCommand::Activity(value) => match ActivityLevel::parse(&value) {
                Ok(level) => self.profile.activity_level = level,
                Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
            },
            SlashCommand::Goal(value) => match FitnessGoal::parse(&value) {
                Ok(goal) => self.profile.fitness_goal = goal,
                Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
            },
            SlashCommand::Restrict(value) => {
                self.profile.dietary_restrictions.toggle(&value);
                self.print_profile();
            }
            SlashCommand::Foods(season) => {
                crate::cli::foods::print_foods(season.unwrap_or_else(foods::current_season), None);
            }
            SlashCommand::Nutrition(season) => {
                let season: Season = season.unwrap_or_else(foods::current_season);
                self.generate(PlanKind::Nutrition, Some(season)).await;
            }
            SlashCommand::Fitness => self.generate(PlanKind::Fitness, None).await,
            SlashCommand::Save(path) => match self.last_plan {
                Some((kind, ref text)) => {
                    match plan::save(text, kind, path.as_deref().map(std::path::Path::new)) {
                        Ok(written) => println!("{} {}", "Salvato in".green(), written.display()),
                        Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
                    }
                }
                None => eprintln!("{}", "No plan to save yet.".dimmed()),
            },
            SlashCommand::New => {
                self.last_plan = None;
                println!("{}", "Plan discarded.".dimmed());
            }
            SlashCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
            }
        }
    }

    async fn generate(&mut self, kind: PlanKind, season: Option<Season>) {
        let model = self.context.selected().clone();
        if let Err(msg) = plan::ensure_free(&model) {
            eprintln!("{} {}", "error:".red().bold(), msg);
            return;
        }
        println!("{}", format!("Generazione con {}...", model.id).dimmed());

        let result = match kind {
            PlanKind::Nutrition => {
                let names = foods::food_names(season.unwrap_or_else(foods::current_season));
                plan::generate_nutrition_plan(&self.completer, &model.id, &self.profile, &names)
                    .await
            }
            PlanKind::Fitness => {
                plan::generate_fitness_plan(&self.completer, &model.id, &self.profile).await
            }
        };
        println!();
        match store_plan(&mut self.last_plan, kind, result) {
            Ok(text) => println!("{}", format::render_plan(text)),
            Err(message) => eprintln!("{} {}", "error:".red().bold(), message),
        }
    }

    fn print_profile(&self) {
        let p = &self.profile;
        let restrictions = if p.dietary_restrictions.is_empty() {
            crate::constants::NO_RESTRICTIONS.to_string()
        } else {
            p.dietary_restrictions.iter().collect::<Vec<_>>().join(", ")
        };
        println!("{} {}", "età:".dimmed(), p.age);
        println!("{} {}", "attività:".dimmed(), p.activity_level.label());
        println!("{} {}", "obiettivo:".dimmed(), p.fitness_goal.label());
        println!("{} {}", "restrizioni:".dimmed(), restrictions);
    }
}

/// Keeps a successful plan as the last plan and returns its text. A failure
/// leaves the previous plan in place and returns the message for the user.
fn store_plan(
    last_plan: &mut Option<(PlanKind, String)>,
    kind: PlanKind,
    result: Result<Completion, ProviderError>,
) -> Result<&str, String> {
    match result {
        Ok(c) => Ok(last_plan.insert((kind, c.text)).1.as_str()),
        Err(e) => Err(completion::user_message(Err(e))),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    let rows = [
        ("/models [query]", "list free models"),
        ("/all [query]", "list all models"),
        ("/refresh", "reload the model catalog"),
        ("/model [id]", "show or select the model"),
        ("/profile", "show the profile"),
        ("/age <years>", "set age"),
        ("/activity <level>", "sedentary, lightly_active, active, very_active, athlete"),
        ("/goal <goal>", "general_fitness, weight_loss, strength"),
        ("/restrict <text>", "toggle a dietary restriction"),
        ("/foods [season]", "show seasonal foods"),
        ("/nutrition [season]", "generate a nutrition plan"),
        ("/fitness", "generate a fitness plan"),
        ("/save [file]", "save the last plan"),
        ("/new", "discard the last plan"),
        ("Ctrl+D", "exit"),
    ];
    for (cmd, desc) in rows {
        println!("  {} - {}", cmd.cyan(), desc);
    }
    println!(
        "  {} {}",
        "presets:".dimmed(),
        crate::constants::COMMON_DIETARY_RESTRICTIONS.join(", ").dimmed()
    );
}
