//! `benessere foods`: seasonal food cards for the terminal.

use colored::Colorize;

use crate::foods::{foods_for_season, FoodCategory, Season};

pub(crate) fn print_foods(season: Season, category: Option<FoodCategory>) {
    let foods = foods_for_season(season, category);
    println!(
        "{} {}",
        "Alimenti di stagione:".bold(),
        season.label().green().bold()
    );
    println!();

    if foods.is_empty() {
        println!("{}", "Nessun alimento trovato.".dimmed());
        return;
    }

    for food in foods {
        let n = &food.nutrition;
        println!(
            "{} {}",
            food.name.bold(),
            format!("({})", food.category.label()).dimmed()
        );
        println!(
            "    {} kcal · proteine {} g · carboidrati {} g · grassi {} g · fibre {} g",
            n.calories, n.protein, n.carbs, n.fat, n.fiber
        );
        for benefit in food.benefits {
            println!("    {} {}", "+".green(), benefit);
        }
    }
}
