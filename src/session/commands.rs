//! Slash command parsing for the interactive session.
//!
//! Parsing is separate from execution so it can be tested without a
//! terminal or a provider.

use crate::foods::Season;
use clap::ValueEnum;

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SlashCommand {
    Help,
    /// List models; `all` includes non-free ones.
    Models { all: bool, query: Option<String> },
    Refresh,
    ShowModel,
    SelectModel(String),
    ShowProfile,
    Age(String),
    Activity(String),
    Goal(String),
    Restrict(String),
    Foods(Option<Season>),
    Nutrition(Option<Season>),
    Fitness,
    Save(Option<String>),
    New,
    Unknown(String),
}

fn arg(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

fn season(rest: &str) -> Result<Option<Season>, String> {
    match arg(rest) {
        None => Ok(None),
        Some(s) => Season::from_str(&s, true)
            .map(Some)
            .map_err(|_| format!("unknown season '{s}' (spring, summer, fall, winter)")),
    }
}

/// Parses a line starting with `/`.
///
/// Returns `Err` with a usage message when a known command is missing its
/// argument or has an invalid one.
pub(crate) fn parse(line: &str) -> Result<SlashCommand, String> {
    let line = line.trim();
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let required = |usage: &str| arg(rest).ok_or_else(|| format!("usage: {usage}"));

    let command = match cmd {
        "/help" | "/?" => SlashCommand::Help,
        "/models" => SlashCommand::Models {
            all: false,
            query: arg(rest),
        },
        "/all" => SlashCommand::Models {
            all: true,
            query: arg(rest),
        },
        "/refresh" => SlashCommand::Refresh,
        "/model" => match arg(rest) {
            Some(id) => SlashCommand::SelectModel(id),
            None => SlashCommand::ShowModel,
        },
        "/profile" => SlashCommand::ShowProfile,
        "/age" => SlashCommand::Age(required("/age <years>")?),
        "/activity" => SlashCommand::Activity(required("/activity <level>")?),
        "/goal" => SlashCommand::Goal(required("/goal <goal>")?),
        "/restrict" => SlashCommand::Restrict(required("/restrict <restriction>")?),
        "/foods" => SlashCommand::Foods(season(rest)?),
        "/nutrition" => SlashCommand::Nutrition(season(rest)?),
        "/fitness" => SlashCommand::Fitness,
        "/save" => SlashCommand::Save(arg(rest)),
        "/new" => SlashCommand::New,
        other => SlashCommand::Unknown(other.to_string()),
    };
    Ok(command)
}
