//! Prompt templates for plan generation.
//!
//! Both builders are pure: the same profile and foods always produce the
//! same bytes, so the templates can be checked without a provider.

use crate::constants::{NO_RESTRICTIONS, PLAN_DAYS};
use crate::profile::UserProfile;

/// Builds the prompt for a multi-day meal plan using the given foods.
pub fn build_nutrition_prompt<S: AsRef<str>>(profile: &UserProfile, foods: &[S]) -> String {
    let restrictions = if profile.dietary_restrictions.is_empty() {
        NO_RESTRICTIONS.to_string()
    } else {
        profile
            .dietary_restrictions
            .iter()
            .collect::<Vec<_>>()
            .join(", ")
    };
    let food_list = foods
        .iter()
        .map(|f| format!("- {}", f.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Genera un piano nutrizionale personalizzato basato su queste informazioni:
- Età: {age}
- Livello di Attività: {activity}
- Restrizioni Alimentari: {restrictions}
- Obiettivo Fitness: {goal}

Include questi alimenti stagionali nel piano:
{food_list}

Crea un piano alimentare di {days} giorni con colazione, pranzo e cena.
Includi una breve descrizione per ogni pasto.

Formatta la risposta usando:
# Piano Nutrizionale Personalizzato
## Giorno 1
### Colazione
### Pranzo
### Cena

(Ripeti per ogni giorno)
",
        age = profile.age,
        activity = profile.activity_level.label(),
        goal = profile.fitness_goal.label(),
        days = PLAN_DAYS,
    )
}

/// Builds the prompt for a multi-day, equipment-free home workout plan.
pub fn build_fitness_prompt(profile: &UserProfile) -> String {
    format!(
        "Crea un piano fitness da fare a casa basato su queste informazioni:
- Età: {age}
- Livello di Attività: {activity}
- Obiettivo Fitness: {goal}

Fornisci un piano di allenamento di {days} giorni che includa:
- Esercizi quotidiani (senza attrezzatura speciale)
- Serie e ripetizioni suggerite
- Una breve descrizione di come eseguire ogni esercizio correttamente

Formatta la risposta usando:
# Piano di Allenamento Personalizzato
## Giorno 1
### Riscaldamento
### Allenamento Principale
### Defaticamento

(Ripeti per ogni giorno)
",
        age = profile.age,
        activity = profile.activity_level.label(),
        goal = profile.fitness_goal.label(),
        days = PLAN_DAYS,
    )
}
