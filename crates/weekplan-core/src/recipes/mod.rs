//! Recipe book service layer.
//!
//! Validates user input and drives the [`RecipeStore`] for the recipe book
//! operations: save (insert or edit), load for editing, delete, toggle the
//! active flag, and filtered listing.

use serde::Serialize;
use weekplan_db::models::{Day, NewRecipe, Recipe, RecipeId};

use crate::error::{RecipeError, Result};
use crate::store::{RecipeFilter, RecipeStore};

/// Split a comma-separated ingredient list.
///
/// Entries are trimmed, empty entries dropped, and exact duplicates dropped
/// keeping the first occurrence. Case is preserved: `"Egg"` and `"egg"` are
/// different ingredients.
pub fn parse_ingredient_list(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !names.iter().any(|existing| existing == entry) {
            names.push(entry.to_owned());
        }
    }
    names
}

/// User input for a recipe, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub day: Day,
    pub active: bool,
    pub ingredients: Vec<String>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>, day: Day) -> Self {
        Self {
            name: name.into(),
            day,
            active: true,
            ingredients: Vec::new(),
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn ingredients<I, T>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Check the draft and return the trimmed recipe name.
    pub fn validate(&self) -> Result<&str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RecipeError::Validation(
                "recipe name must not be empty".to_owned(),
            ));
        }
        if let Some(blank) = self.ingredients.iter().find(|i| i.trim().is_empty()) {
            return Err(RecipeError::Validation(format!(
                "ingredient names must not be blank (got {blank:?})"
            )));
        }
        Ok(name)
    }
}

/// A recipe together with its ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<String>,
}

/// Validate `draft`, then insert it (`id` is `None`) or overwrite the
/// recipe `id`, replacing its ingredient associations.
///
/// Nothing is written when validation fails.
pub async fn save_recipe<S>(store: &S, id: Option<RecipeId>, draft: &RecipeDraft) -> Result<RecipeId>
where
    S: RecipeStore + ?Sized,
{
    let name = draft.validate()?;
    let ingredients: Vec<String> = draft
        .ingredients
        .iter()
        .map(|i| i.trim().to_owned())
        .collect();

    let new = NewRecipe {
        name,
        day: draft.day,
        active: draft.active,
    };
    store.save_with_ingredients(id, &new, &ingredients).await
}

/// Load a recipe and its ingredients, e.g. to edit it.
pub async fn load_recipe<S>(store: &S, id: RecipeId) -> Result<RecipeDetail>
where
    S: RecipeStore + ?Sized,
{
    let recipe = store
        .get_recipe(id)
        .await?
        .ok_or(RecipeError::NotFound(id))?;
    let ingredients = store.get_ingredients(id).await?;
    Ok(RecipeDetail {
        recipe,
        ingredients,
    })
}

/// Delete a recipe and its ingredient associations.
pub async fn delete_recipe<S>(store: &S, id: RecipeId) -> Result<()>
where
    S: RecipeStore + ?Sized,
{
    store.delete_recipe(id).await
}

/// Turn a recipe's eligibility for the weekly plan on or off.
pub async fn set_active<S>(store: &S, id: RecipeId, active: bool) -> Result<()>
where
    S: RecipeStore + ?Sized,
{
    store.set_active(id, active).await
}

/// List recipes for the recipe book, optionally filtered.
pub async fn list_recipes<S>(store: &S, filter: RecipeFilter) -> Result<Vec<Recipe>>
where
    S: RecipeStore + ?Sized,
{
    store.list_recipes(filter).await
}
