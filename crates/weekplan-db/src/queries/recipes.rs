//! Database query functions for the `recipes` table.

use anyhow::{Context, Result};
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{Day, NewRecipe, Recipe, RecipeId};
use crate::queries::ingredients;

/// Orders rows by calendar day rather than alphabetically by day name.
const ORDER_BY_DAY: &str = "CASE day \
     WHEN 'Monday' THEN 1 \
     WHEN 'Tuesday' THEN 2 \
     WHEN 'Wednesday' THEN 3 \
     WHEN 'Thursday' THEN 4 \
     WHEN 'Friday' THEN 5 \
     WHEN 'Saturday' THEN 6 \
     WHEN 'Sunday' THEN 7 \
     END";

/// Insert a new recipe row. Returns the store-assigned id.
pub async fn insert_recipe(pool: &SqlitePool, new: &NewRecipe<'_>) -> Result<RecipeId> {
    let mut conn = pool.acquire().await.context("failed to acquire connection")?;
    insert_recipe_on(&mut conn, new).await
}

async fn insert_recipe_on(conn: &mut SqliteConnection, new: &NewRecipe<'_>) -> Result<RecipeId> {
    let (id,): (RecipeId,) = sqlx::query_as(
        "INSERT INTO recipes (name, day, active) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(new.name)
    .bind(new.day)
    .bind(new.active)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("failed to insert recipe {:?}", new.name))?;

    Ok(id)
}

/// Update every column of an existing recipe.
///
/// Returns `false` when no recipe with that id exists.
pub async fn update_recipe(pool: &SqlitePool, id: RecipeId, new: &NewRecipe<'_>) -> Result<bool> {
    let mut conn = pool.acquire().await.context("failed to acquire connection")?;
    update_recipe_on(&mut conn, id, new).await
}

async fn update_recipe_on(
    conn: &mut SqliteConnection,
    id: RecipeId,
    new: &NewRecipe<'_>,
) -> Result<bool> {
    let result = sqlx::query("UPDATE recipes SET name = ?1, day = ?2, active = ?3 WHERE id = ?4")
        .bind(new.name)
        .bind(new.day)
        .bind(new.active)
        .bind(id)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("failed to update recipe {id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Insert (when `id` is `None`) or update a recipe and replace its
/// ingredient associations, all inside one transaction.
///
/// Returns `Ok(None)` when updating an id that does not exist; nothing is
/// written in that case.
pub async fn save_recipe_with_ingredients(
    pool: &SqlitePool,
    id: Option<RecipeId>,
    new: &NewRecipe<'_>,
    ingredient_names: &[String],
) -> Result<Option<RecipeId>> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let recipe_id = match id {
        Some(id) => {
            if !update_recipe_on(&mut *tx, id, new).await? {
                // Transaction rolls back on drop (no commit).
                return Ok(None);
            }
            id
        }
        None => insert_recipe_on(&mut *tx, new).await?,
    };

    ingredients::replace_ingredients_on(&mut *tx, recipe_id, ingredient_names).await?;

    tx.commit().await.context("failed to commit transaction")?;

    Ok(Some(recipe_id))
}

/// Fetch a recipe by its id.
pub async fn get_recipe(pool: &SqlitePool, id: RecipeId) -> Result<Option<Recipe>> {
    let recipe =
        sqlx::query_as::<_, Recipe>("SELECT id, name, day, active FROM recipes WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch recipe")?;

    Ok(recipe)
}

/// List recipes, optionally restricted to one day and/or to active recipes.
///
/// Rows are ordered by calendar day, then by name, so a single-day listing
/// is ordered by name.
pub async fn list_recipes(
    pool: &SqlitePool,
    day: Option<Day>,
    active_only: bool,
) -> Result<Vec<Recipe>> {
    let sql = format!(
        "SELECT id, name, day, active FROM recipes \
         WHERE (?1 IS NULL OR day = ?1) \
           AND (?2 = 0 OR active = 1) \
         ORDER BY {ORDER_BY_DAY}, name, id"
    );
    let recipes = sqlx::query_as::<_, Recipe>(&sql)
        .bind(day)
        .bind(active_only)
        .fetch_all(pool)
        .await
        .context("failed to list recipes")?;

    Ok(recipes)
}

/// Set the active flag of a recipe.
///
/// Returns `false` when no recipe with that id exists.
pub async fn set_recipe_active(pool: &SqlitePool, id: RecipeId, active: bool) -> Result<bool> {
    let result = sqlx::query("UPDATE recipes SET active = ?1 WHERE id = ?2")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await
        .with_context(|| format!("failed to update active flag of recipe {id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Delete a recipe and its ingredient associations in one transaction.
///
/// Ingredient rows themselves are kept. Returns `false` when no recipe with
/// that id exists.
pub async fn delete_recipe(pool: &SqlitePool, id: RecipeId) -> Result<bool> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    // Associations first: they reference the recipe row.
    sqlx::query("DELETE FROM ingredients_included WHERE recipe_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to delete ingredient links of recipe {id}"))?;

    let result = sqlx::query("DELETE FROM recipes WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to delete recipe {id}"))?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    tx.commit().await.context("failed to commit transaction")?;
    Ok(true)
}
