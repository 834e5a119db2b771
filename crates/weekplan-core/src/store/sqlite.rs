//! SQLite-backed [`RecipeStore`].

use async_trait::async_trait;
use sqlx::SqlitePool;

use weekplan_db::models::{NewRecipe, Recipe, RecipeId};
use weekplan_db::queries::{ingredients as ingredient_queries, recipes as recipe_queries};

use super::{RecipeFilter, RecipeStore};
use crate::error::{RecipeError, Result};

/// [`RecipeStore`] over a SQLite connection pool.
///
/// Multi-statement writes (save with ingredients, delete) each run in a
/// single transaction.
#[derive(Debug, Clone)]
pub struct SqliteRecipeStore {
    pool: SqlitePool,
}

impl SqliteRecipeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn list_recipes(&self, filter: RecipeFilter) -> Result<Vec<Recipe>> {
        Ok(recipe_queries::list_recipes(&self.pool, filter.day, filter.active_only).await?)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
        Ok(recipe_queries::get_recipe(&self.pool, id).await?)
    }

    async fn save_recipe(&self, id: Option<RecipeId>, recipe: &NewRecipe<'_>) -> Result<RecipeId> {
        match id {
            None => Ok(recipe_queries::insert_recipe(&self.pool, recipe).await?),
            Some(id) => {
                if recipe_queries::update_recipe(&self.pool, id, recipe).await? {
                    Ok(id)
                } else {
                    Err(RecipeError::NotFound(id))
                }
            }
        }
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        if recipe_queries::delete_recipe(&self.pool, id).await? {
            Ok(())
        } else {
            Err(RecipeError::NotFound(id))
        }
    }

    async fn set_active(&self, id: RecipeId, active: bool) -> Result<()> {
        if recipe_queries::set_recipe_active(&self.pool, id, active).await? {
            Ok(())
        } else {
            Err(RecipeError::NotFound(id))
        }
    }

    async fn replace_ingredients(&self, recipe_id: RecipeId, names: &[String]) -> Result<()> {
        if recipe_queries::get_recipe(&self.pool, recipe_id)
            .await?
            .is_none()
        {
            return Err(RecipeError::NotFound(recipe_id));
        }
        Ok(ingredient_queries::replace_ingredients(&self.pool, recipe_id, names).await?)
    }

    async fn get_ingredients(&self, recipe_id: RecipeId) -> Result<Vec<String>> {
        Ok(ingredient_queries::get_ingredients(&self.pool, recipe_id).await?)
    }

    async fn save_with_ingredients(
        &self,
        id: Option<RecipeId>,
        recipe: &NewRecipe<'_>,
        names: &[String],
    ) -> Result<RecipeId> {
        // `None` only comes back for an unknown update target.
        recipe_queries::save_recipe_with_ingredients(&self.pool, id, recipe, names)
            .await?
            .ok_or_else(|| RecipeError::NotFound(id.unwrap_or_default()))
    }
}
