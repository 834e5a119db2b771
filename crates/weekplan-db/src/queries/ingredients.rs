//! Database query functions for the `ingredients` and
//! `ingredients_included` tables.

use std::collections::HashSet;

use anyhow::{Context, Result};
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::RecipeId;

/// Replace every ingredient association of a recipe in one transaction.
///
/// Prior links are cleared, ingredient rows are upserted by exact name, and
/// one link per name is recreated in the given order.
pub async fn replace_ingredients(
    pool: &SqlitePool,
    recipe_id: RecipeId,
    names: &[String],
) -> Result<()> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;
    replace_ingredients_on(&mut *tx, recipe_id, names).await?;
    tx.commit().await.context("failed to commit transaction")?;
    Ok(())
}

/// Same as [`replace_ingredients`] but on a caller-owned connection, so it
/// can take part in a wider transaction.
pub async fn replace_ingredients_on(
    conn: &mut SqliteConnection,
    recipe_id: RecipeId,
    names: &[String],
) -> Result<()> {
    sqlx::query("DELETE FROM ingredients_included WHERE recipe_id = ?1")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await
        .with_context(|| format!("failed to clear ingredient links of recipe {recipe_id}"))?;

    let mut linked = HashSet::new();
    for name in names {
        if !linked.insert(name.as_str()) {
            continue;
        }
        let ingredient_id = upsert_ingredient_on(&mut *conn, name).await?;
        sqlx::query("INSERT INTO ingredients_included (recipe_id, ingredient_id) VALUES (?1, ?2)")
            .bind(recipe_id)
            .bind(ingredient_id)
            .execute(&mut *conn)
            .await
            .with_context(|| {
                format!("failed to link ingredient {name:?} to recipe {recipe_id}")
            })?;
    }

    Ok(())
}

/// Return the id of the ingredient row with exactly this name, inserting it
/// when absent.
///
/// Looks the name up before inserting because tables created by older
/// versions carry no UNIQUE constraint; the lowest id wins on duplicates.
async fn upsert_ingredient_on(conn: &mut SqliteConnection, name: &str) -> Result<i64> {
    let existing: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM ingredients WHERE ingredient_name = ?1 ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await
    .with_context(|| format!("failed to look up ingredient {name:?}"))?;

    if let Some((id,)) = existing {
        return Ok(id);
    }

    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO ingredients (ingredient_name) VALUES (?1) RETURNING id")
            .bind(name)
            .fetch_one(&mut *conn)
            .await
            .with_context(|| format!("failed to insert ingredient {name:?}"))?;

    Ok(id)
}

/// Ingredient names linked to a recipe, in the order they were linked.
///
/// Nameless rows, which older schemas allowed, are skipped.
pub async fn get_ingredients(pool: &SqlitePool, recipe_id: RecipeId) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT i.ingredient_name \
         FROM ingredients i \
         JOIN ingredients_included ii ON i.id = ii.ingredient_id \
         WHERE ii.recipe_id = ?1 AND i.ingredient_name IS NOT NULL \
         ORDER BY ii.id",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .with_context(|| format!("failed to fetch ingredients of recipe {recipe_id}"))?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Number of ingredient rows, linked or not.
pub async fn count_ingredients(pool: &SqlitePool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM ingredients")
        .fetch_one(pool)
        .await
        .context("failed to count ingredients")?;

    Ok(count)
}
