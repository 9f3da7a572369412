//! Static table of seasonal foods.
//!
//! The nutrition command feeds the foods of the current season into the
//! prompt; `benessere foods` prints them. Nutrition values are per 100 g.

use chrono::Datelike;
use clap::ValueEnum;

use FoodCategory::{Fruits, Grains, Nuts, Proteins, Vegetables};
use Season::{Fall, Spring, Summer, Winter};

/// Meteorological season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn label(self) -> &'static str {
        match self {
            Self::Spring => "primavera",
            Self::Summer => "estate",
            Self::Fall => "autunno",
            Self::Winter => "inverno",
        }
    }

    /// Season for a calendar month (1 = January).
    ///
    /// Mar–May spring, Jun–Aug summer, Sep–Nov fall, Dec–Feb winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Fall,
            _ => Self::Winter,
        }
    }
}

/// Season for today's date in the local timezone.
pub fn current_season() -> Season {
    Season::from_month(chrono::Local::now().month())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FoodCategory {
    Fruits,
    Vegetables,
    Grains,
    Proteins,
    Dairy,
    Nuts,
}

impl FoodCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fruits => "frutta",
            Self::Vegetables => "verdura",
            Self::Grains => "cereali",
            Self::Proteins => "proteine",
            Self::Dairy => "latticini",
            Self::Nuts => "frutta secca",
        }
    }
}

/// Macronutrients per 100 g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
    pub fiber: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub name: &'static str,
    pub season: Season,
    pub category: FoodCategory,
    pub nutrition: Nutrition,
    pub benefits: &'static [&'static str],
}

const fn food(
    name: &'static str,
    season: Season,
    category: FoodCategory,
    (calories, protein, carbs, fat, fiber): (u32, f32, f32, f32, f32),
    benefits: &'static [&'static str],
) -> Food {
    Food {
        name,
        season,
        category,
        nutrition: Nutrition {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        },
        benefits,
    }
}

#[rustfmt::skip]
pub const SEASONAL_FOODS: &[Food] = &[
    food("Asparagi", Spring, Vegetables, (20, 2.2, 3.9, 0.1, 2.1),
        &["Supporta la salute digestiva", "Ricco di antiossidanti", "Proprietà anti-infiammatorie"]),
    food("Spinaci", Spring, Vegetables, (23, 2.9, 3.6, 0.4, 2.2),
        &["Migliora la salute degli occhi", "Riduce lo stress ossidativo", "Supporta la salute delle ossa"]),
    food("Fragole", Spring, Fruits, (32, 0.7, 7.7, 0.3, 2.0),
        &["Rafforza il sistema immunitario", "Promuove la salute del cuore", "Regola la glicemia"]),
    food("Piselli", Spring, Vegetables, (81, 5.4, 14.5, 0.4, 5.1),
        &["Supporta la salute digestiva", "Ottima fonte di proteine vegetali", "Nutrienti per la salute del cuore"]),
    food("Ravanelli", Spring, Vegetables, (16, 0.7, 3.4, 0.1, 1.6),
        &["Supporta la salute del fegato", "Aiuta la digestione", "Naturale detossificante"]),
    food("Pomodori", Summer, Vegetables, (18, 0.9, 3.9, 0.2, 1.2),
        &["Ricco di antiossidanti", "Benefico per il cuore", "Supporta la salute della pelle"]),
    food("Cetrioli", Summer, Vegetables, (15, 0.6, 3.6, 0.1, 0.5),
        &["Idratante", "Anti-infiammatorio", "Supporta la salute della pelle"]),
    food("Anguria", Summer, Fruits, (30, 0.6, 7.6, 0.2, 0.4),
        &["Idratante", "Anti-infiammatoria", "Ricca di antiossidanti"]),
    food("Mais", Summer, Vegetables, (86, 3.2, 19.0, 1.2, 2.7),
        &["Supporta la salute degli occhi", "Ricco di antiossidanti", "Buona fonte di fibre"]),
    food("Zucchine", Summer, Vegetables, (17, 1.2, 3.1, 0.3, 1.0),
        &["Nutrienti per il cuore", "Supporta la vista", "Aiuta il controllo del peso"]),
    food("Zucca", Fall, Vegetables, (26, 1.0, 6.5, 0.1, 0.5),
        &["Supporta la salute degli occhi", "Rafforza il sistema immunitario", "Ricca di antiossidanti"]),
    food("Mele", Fall, Fruits, (52, 0.3, 13.8, 0.2, 2.4),
        &["Benefiche per il cuore", "Supporta la salute digestiva", "Può ridurre il rischio di diabete"]),
    food("Cavoletti di Bruxelles", Fall, Vegetables, (43, 3.4, 8.9, 0.3, 3.8),
        &["Supporta la detossificazione", "Proprietà anti-infiammatorie", "Ricchi di antiossidanti"]),
    food("Patate Dolci", Fall, Vegetables, (86, 1.6, 20.1, 0.1, 3.0),
        &["Supporta la salute degli occhi", "Rafforza il sistema immunitario", "Ricche di antiossidanti"]),
    food("Cavolfiore", Fall, Vegetables, (25, 1.9, 5.0, 0.3, 2.0),
        &["Supporta la salute del cervello", "Proprietà anti-infiammatorie", "Supporta la detossificazione"]),
    food("Cavolo Riccio", Winter, Vegetables, (49, 4.3, 8.8, 0.9, 3.6),
        &["Supporta la salute delle ossa", "Ricco di antiossidanti", "Supporta la salute del cuore"]),
    food("Arance", Winter, Fruits, (47, 0.9, 11.8, 0.1, 2.4),
        &["Rafforza il sistema immunitario", "Supporta la salute della pelle", "Proprietà anti-infiammatorie"]),
    food("Quinoa", Winter, Grains, (120, 4.4, 21.3, 1.9, 2.8),
        &["Fonte completa di proteine", "Ricca di fibre", "Contiene antiossidanti benefici"]),
    food("Noci", Winter, Nuts, (654, 15.2, 13.7, 65.2, 6.7),
        &["Supporta la salute del cervello", "Grassi salutari per il cuore", "Proprietà antiossidanti"]),
    food("Salmone", Winter, Proteins, (206, 22.1, 0.0, 13.4, 0.0),
        &["Ricco di acidi grassi omega-3", "Proteine di alta qualità", "Supporta la salute del cuore"]),
];

/// Foods of a season, optionally narrowed to one category, in table order.
pub fn foods_for_season(season: Season, category: Option<FoodCategory>) -> Vec<&'static Food> {
    SEASONAL_FOODS
        .iter()
        .filter(|f| f.season == season)
        .filter(|f| category.map_or(true, |c| f.category == c))
        .collect()
}

/// Names of a season's foods, ready for the nutrition prompt.
pub fn food_names(season: Season) -> Vec<String> {
    foods_for_season(season, None)
        .into_iter()
        .map(|f| f.name.to_string())
        .collect()
}
