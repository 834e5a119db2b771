//! The `RecipeStore` trait: the persistence seam used by the planner.
//!
//! The generator, the aggregator and the recipe book service only talk to
//! this trait. [`SqliteRecipeStore`] is the production implementation; tests
//! substitute in-memory stores.

mod sqlite;

pub use sqlite::SqliteRecipeStore;

use async_trait::async_trait;
use weekplan_db::models::{Day, NewRecipe, Recipe, RecipeId};

use crate::error::Result;

/// Which recipes [`RecipeStore::list_recipes`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Restrict to one day. `None` lists every day in calendar order.
    pub day: Option<Day>,
    /// Skip recipes whose active flag is off.
    pub active_only: bool,
}

impl RecipeFilter {
    /// Every recipe, all days.
    pub fn all() -> Self {
        Self::default()
    }

    /// Recipes eligible for the plan on `day`.
    pub fn active_on(day: Day) -> Self {
        Self {
            day: Some(day),
            active_only: true,
        }
    }
}

/// Storage for recipes, ingredients and their associations.
///
/// # Object Safety
///
/// The trait is object-safe, so callers may hold `&dyn RecipeStore` or
/// `Box<dyn RecipeStore>`.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Recipes matching `filter`. Within a day, recipes are ordered by name.
    async fn list_recipes(&self, filter: RecipeFilter) -> Result<Vec<Recipe>>;

    /// A single recipe, or `None` when the id is unknown.
    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>>;

    /// Insert a recipe (`id` is `None`) or update an existing one.
    ///
    /// Updating an unknown id fails with [`crate::RecipeError::NotFound`].
    async fn save_recipe(&self, id: Option<RecipeId>, recipe: &NewRecipe<'_>) -> Result<RecipeId>;

    /// Remove a recipe and its ingredient associations.
    async fn delete_recipe(&self, id: RecipeId) -> Result<()>;

    /// Turn eligibility for random selection on or off.
    async fn set_active(&self, id: RecipeId, active: bool) -> Result<()>;

    /// Clear the recipe's ingredient associations, upsert ingredients by
    /// name and recreate the associations.
    async fn replace_ingredients(&self, recipe_id: RecipeId, names: &[String]) -> Result<()>;

    /// Ingredient names linked to a recipe, in the order they were linked.
    async fn get_ingredients(&self, recipe_id: RecipeId) -> Result<Vec<String>>;

    /// Save a recipe and replace its ingredients.
    ///
    /// The default implementation composes [`Self::save_recipe`] and
    /// [`Self::replace_ingredients`]; stores that support transactions
    /// override it to make the pair atomic.
    async fn save_with_ingredients(
        &self,
        id: Option<RecipeId>,
        recipe: &NewRecipe<'_>,
        names: &[String],
    ) -> Result<RecipeId> {
        let recipe_id = self.save_recipe(id, recipe).await?;
        self.replace_ingredients(recipe_id, names).await?;
        Ok(recipe_id)
    }
}

// Compile-time assertion: RecipeStore must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn RecipeStore) {}
};
