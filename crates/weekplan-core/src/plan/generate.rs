//! Plan generation: one random active recipe per selected day.

use tracing::{debug, warn};
use weekplan_db::models::{Day, Recipe};

use super::chooser::Chooser;
use super::types::{DayAssignment, PlannedRecipe, WeeklyPlan};
use crate::store::{RecipeFilter, RecipeStore};

/// Build a weekly plan for `selected_days`.
///
/// Walks all seven days in calendar order. Unselected days and days without
/// an active recipe are [`DayAssignment::Unassigned`]. For the rest, one
/// recipe is drawn from the day's active recipes with `chooser`.
///
/// A store failure only affects its own day, which becomes
/// [`DayAssignment::Unavailable`]; generation carries on with the next day.
pub async fn generate<S, C>(selected_days: &[Day], store: &S, chooser: &mut C) -> WeeklyPlan
where
    S: RecipeStore + ?Sized,
    C: Chooser + ?Sized,
{
    let mut plan = WeeklyPlan::default();

    for day in Day::ALL {
        let assignment = if !selected_days.contains(&day) {
            DayAssignment::Unassigned
        } else {
            match store.list_recipes(RecipeFilter::active_on(day)).await {
                Ok(candidates) => pick_for_day(day, &candidates, chooser),
                Err(e) => {
                    warn!(day = %day, error = %e, "could not load recipes, day marked unavailable");
                    DayAssignment::Unavailable {
                        reason: e.to_string(),
                    }
                }
            }
        };
        plan.set(day, assignment);
    }

    plan
}

/// Draw one recipe from `candidates`, skipping any that are inactive or
/// belong to another day.
pub fn pick_for_day<C>(day: Day, candidates: &[Recipe], chooser: &mut C) -> DayAssignment
where
    C: Chooser + ?Sized,
{
    let eligible: Vec<&Recipe> = candidates
        .iter()
        .filter(|recipe| recipe.active && recipe.day == day)
        .collect();

    if eligible.is_empty() {
        debug!(day = %day, "no active recipe");
        return DayAssignment::Unassigned;
    }

    let index = chooser.choose_index(eligible.len()) % eligible.len();
    let recipe = eligible[index];
    debug!(day = %day, recipe = %recipe.name, candidates = eligible.len(), "picked recipe");

    DayAssignment::Assigned(PlannedRecipe {
        id: recipe.id,
        name: recipe.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl Chooser for Fixed {
        fn choose_index(&mut self, _len: usize) -> usize {
            self.0
        }
    }

    fn recipe(id: i64, name: &str, day: Day, active: bool) -> Recipe {
        Recipe {
            id,
            name: name.to_owned(),
            day,
            active,
        }
    }

    #[test]
    fn empty_candidates_are_unassigned() {
        assert_eq!(
            pick_for_day(Day::Monday, &[], &mut Fixed(0)),
            DayAssignment::Unassigned
        );
    }

    #[test]
    fn inactive_and_foreign_day_recipes_are_never_picked() {
        let candidates = vec![
            recipe(1, "Salad", Day::Tuesday, false),
            recipe(2, "Soup", Day::Wednesday, true),
        ];
        assert_eq!(
            pick_for_day(Day::Tuesday, &candidates, &mut Fixed(0)),
            DayAssignment::Unassigned
        );
    }

    #[test]
    fn chooser_index_selects_among_eligible() {
        let candidates = vec![
            recipe(1, "Chili", Day::Friday, true),
            recipe(2, "Old Stew", Day::Friday, false),
            recipe(3, "Tacos", Day::Friday, true),
        ];
        let picked = pick_for_day(Day::Friday, &candidates, &mut Fixed(1));
        assert_eq!(
            picked,
            DayAssignment::Assigned(PlannedRecipe {
                id: 3,
                name: "Tacos".to_owned()
            })
        );
    }

    #[test]
    fn out_of_range_index_wraps() {
        let candidates = vec![
            recipe(1, "Chili", Day::Friday, true),
            recipe(3, "Tacos", Day::Friday, true),
        ];
        let picked = pick_for_day(Day::Friday, &candidates, &mut Fixed(5));
        assert_eq!(picked.recipe().map(|r| r.id), Some(3));
    }
}
