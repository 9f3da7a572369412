//! Model listing for the terminal.
//!
//! Displays the selector view of the catalog with the current selection and
//! recommended models marked. Isolates display concerns from resolution.

use colored::Colorize;

use super::descriptor::ModelDescriptor;
use super::filter::visible_models;

/// Print the visible part of the catalog, marking `selected_id`.
pub fn print_catalog(
    catalog: &[ModelDescriptor],
    selected_id: &str,
    query: Option<&str>,
    free_only: bool,
) {
    let models = visible_models(catalog, query, free_only);
    let noun = models_noun(free_only);

    if models.is_empty() {
        println!("{}", format!("No {noun} found. Try again later.").dimmed());
        return;
    }

    for model in &models {
        let marker = if model.id == selected_id {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        let mut tags = Vec::new();
        if model.is_reliable() {
            tags.push("recommended".blue().to_string());
        }
        if model.free {
            tags.push("free".green().to_string());
        }
        println!(
            "{} {} {} {}",
            marker,
            model.id.bold(),
            format!("({})", model.provider).dimmed(),
            tags.join(" ")
        );
        if !model.description.is_empty() {
            println!("    {}", first_line(&model.description).dimmed());
        }
    }

    println!();
    println!("{}", format!("{} {noun} available", models.len()).dimmed());
}

fn models_noun(free_only: bool) -> &'static str {
    if free_only {
        "free models"
    } else {
        "models"
    }
}

/// First line of a description, capped for one-row display.
fn first_line(text: &str) -> String {
    const MAX: usize = 100;
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > MAX {
        let cut: String = line.chars().take(MAX).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}
