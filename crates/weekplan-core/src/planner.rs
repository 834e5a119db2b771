//! The planner controller: owns the store plus the current plan and
//! shopping list.

use weekplan_db::models::Day;

use crate::plan::{self, Chooser, WeeklyPlan};
use crate::shopping::{self, ShoppingList};
use crate::store::RecipeStore;

/// Holds the transient planning state for one session.
///
/// The plan and the shopping list are only ever replaced wholesale. A new
/// plan invalidates the shopping list until it is refreshed.
#[derive(Debug)]
pub struct MealPlanner<S> {
    store: S,
    plan: WeeklyPlan,
    shopping_list: ShoppingList,
}

impl<S: RecipeStore> MealPlanner<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            plan: WeeklyPlan::default(),
            shopping_list: ShoppingList::NothingPlanned,
        }
    }

    pub fn plan(&self) -> &WeeklyPlan {
        &self.plan
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping_list
    }

    /// Generate a fresh plan for `selected_days`, replacing the current one.
    pub async fn generate_plan<C>(&mut self, selected_days: &[Day], chooser: &mut C) -> &WeeklyPlan
    where
        C: Chooser + ?Sized,
    {
        self.plan = plan::generate(selected_days, &self.store, chooser).await;
        self.shopping_list = ShoppingList::NothingPlanned;
        &self.plan
    }

    /// Recompute the shopping list from the current plan.
    pub async fn refresh_shopping_list(&mut self) -> &ShoppingList {
        self.shopping_list = shopping::aggregate(&self.plan, &self.store).await;
        &self.shopping_list
    }
}
