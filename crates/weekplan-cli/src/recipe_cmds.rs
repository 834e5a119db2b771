//! CLI handlers for `weekplan recipe` subcommands.
//!
//! Implements:
//! - `weekplan recipe add`        -- create a recipe with its ingredients
//! - `weekplan recipe edit`       -- change some fields of a recipe
//! - `weekplan recipe show`       -- print one recipe and its ingredients
//! - `weekplan recipe list`       -- table of recipes, optionally filtered
//! - `weekplan recipe delete`     -- remove a recipe
//! - `weekplan recipe activate`   -- make a recipe eligible for planning
//! - `weekplan recipe deactivate` -- exclude a recipe from planning

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use weekplan_core::recipes::{self, RecipeDetail, RecipeDraft, parse_ingredient_list};
use weekplan_core::{RecipeFilter, SqliteRecipeStore};
use weekplan_db::models::{Day, Recipe, RecipeId};

use crate::RecipeCommands;

/// Dispatch a `RecipeCommands` variant to the appropriate handler.
pub async fn run_recipe_command(command: RecipeCommands, pool: &SqlitePool) -> Result<()> {
    let store = SqliteRecipeStore::new(pool.clone());
    match command {
        RecipeCommands::Add {
            name,
            day,
            inactive,
            ingredients,
        } => cmd_add(&store, name, day, !inactive, ingredients.as_deref()).await,
        RecipeCommands::Edit {
            id,
            name,
            day,
            active,
            ingredients,
        } => {
            let changes = EditParams {
                name,
                day,
                active,
                ingredients,
            };
            cmd_edit(&store, id, changes).await
        }
        RecipeCommands::Show { id } => cmd_show(&store, id).await,
        RecipeCommands::List { day, active_only } => cmd_list(&store, day, active_only).await,
        RecipeCommands::Delete { id } => {
            recipes::delete_recipe(&store, id)
                .await
                .with_context(|| format!("failed to delete recipe {id}"))?;
            println!("Recipe {id} deleted.");
            Ok(())
        }
        RecipeCommands::Activate { id } => cmd_set_active(&store, id, true).await,
        RecipeCommands::Deactivate { id } => cmd_set_active(&store, id, false).await,
    }
}

// -----------------------------------------------------------------------
// weekplan recipe add
// -----------------------------------------------------------------------

async fn cmd_add(
    store: &SqliteRecipeStore,
    name: String,
    day: Day,
    active: bool,
    ingredients: Option<&str>,
) -> Result<()> {
    let draft = RecipeDraft::new(name, day)
        .active(active)
        .ingredients(ingredients.map(parse_ingredient_list).unwrap_or_default());

    let id = recipes::save_recipe(store, None, &draft)
        .await
        .context("failed to add recipe")?;

    let detail = recipes::load_recipe(store, id).await?;
    println!("Recipe created:");
    print_detail(&detail);

    Ok(())
}

// -----------------------------------------------------------------------
// weekplan recipe edit
// -----------------------------------------------------------------------

/// Fields given on the command line; `None` keeps the stored value.
struct EditParams {
    name: Option<String>,
    day: Option<Day>,
    active: Option<bool>,
    ingredients: Option<String>,
}

/// Overlay `changes` on the stored recipe.
fn merge_edit(current: RecipeDetail, changes: EditParams) -> RecipeDraft {
    let ingredients = match changes.ingredients.as_deref() {
        Some(list) => parse_ingredient_list(list),
        None => current.ingredients,
    };
    RecipeDraft::new(
        changes.name.unwrap_or(current.recipe.name),
        changes.day.unwrap_or(current.recipe.day),
    )
    .active(changes.active.unwrap_or(current.recipe.active))
    .ingredients(ingredients)
}

async fn cmd_edit(store: &SqliteRecipeStore, id: RecipeId, changes: EditParams) -> Result<()> {
    let current = recipes::load_recipe(store, id)
        .await
        .with_context(|| format!("failed to load recipe {id}"))?;

    let draft = merge_edit(current, changes);
    recipes::save_recipe(store, Some(id), &draft)
        .await
        .with_context(|| format!("failed to update recipe {id}"))?;

    let detail = recipes::load_recipe(store, id).await?;
    println!("Recipe updated:");
    print_detail(&detail);

    Ok(())
}

// -----------------------------------------------------------------------
// weekplan recipe show / list
// -----------------------------------------------------------------------

async fn cmd_show(store: &SqliteRecipeStore, id: RecipeId) -> Result<()> {
    let detail = recipes::load_recipe(store, id)
        .await
        .with_context(|| format!("failed to load recipe {id}"))?;
    print_detail(&detail);
    Ok(())
}

fn print_detail(detail: &RecipeDetail) {
    println!("  ID:          {}", detail.recipe.id);
    println!("  Name:        {}", detail.recipe.name);
    println!("  Day:         {}", detail.recipe.day);
    println!("  Active:      {}", if detail.recipe.active { "yes" } else { "no" });
    if detail.ingredients.is_empty() {
        println!("  Ingredients: (none)");
    } else {
        println!("  Ingredients: {}", detail.ingredients.join(", "));
    }
}

async fn cmd_list(store: &SqliteRecipeStore, day: Option<Day>, active_only: bool) -> Result<()> {
    let list = recipes::list_recipes(store, RecipeFilter { day, active_only }).await?;

    if list.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }

    print!("{}", format_recipe_table(&list));
    Ok(())
}

fn format_recipe_table(list: &[Recipe]) -> String {
    let mut out = format!("{:<6} {:<10} {:<7} {}\n", "ID", "DAY", "ACTIVE", "NAME");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for recipe in list {
        out.push_str(&format!(
            "{:<6} {:<10} {:<7} {}\n",
            recipe.id,
            recipe.day,
            if recipe.active { "yes" } else { "no" },
            recipe.name
        ));
    }
    out
}

// -----------------------------------------------------------------------
// weekplan recipe activate / deactivate
// -----------------------------------------------------------------------

async fn cmd_set_active(store: &SqliteRecipeStore, id: RecipeId, active: bool) -> Result<()> {
    recipes::set_active(store, id, active)
        .await
        .with_context(|| format!("failed to update recipe {id}"))?;
    if active {
        println!("Recipe {id} activated.");
    } else {
        println!("Recipe {id} deactivated.");
    }
    Ok(())
}
