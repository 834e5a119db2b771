//! Shopping list aggregation.
//!
//! Collects the ingredients of every recipe in a [`WeeklyPlan`] into one
//! list keyed by ingredient name, each entry naming the recipes that need it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::plan::WeeklyPlan;
use crate::store::RecipeStore;

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub ingredient: String,
    /// Distinct recipe names using this ingredient, sorted.
    pub recipes: Vec<String>,
}

/// Result of aggregating a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "items", rename_all = "snake_case")]
pub enum ShoppingList {
    /// No plan has been generated yet.
    #[default]
    NothingPlanned,
    /// Ingredients sorted by name. May be empty when the planned recipes
    /// have no ingredients.
    Items(Vec<ShoppingItem>),
}

impl ShoppingList {
    /// The list entries; empty for [`ShoppingList::NothingPlanned`].
    pub fn items(&self) -> &[ShoppingItem] {
        match self {
            Self::NothingPlanned => &[],
            Self::Items(items) => items,
        }
    }
}

/// Accumulates ingredient → recipe-name sets.
///
/// Keys and names are compared byte-wise, so ordering is case-sensitive
/// (`"Zucchini"` sorts before `"apple"`).
#[derive(Debug, Default)]
pub struct ShoppingListBuilder {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ShoppingListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `recipe` uses each of `ingredients`.
    pub fn add<I, T>(&mut self, recipe: &str, ingredients: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for ingredient in ingredients {
            self.entries
                .entry(ingredient.into())
                .or_default()
                .insert(recipe.to_owned());
        }
    }

    pub fn finish(self) -> ShoppingList {
        ShoppingList::Items(
            self.entries
                .into_iter()
                .map(|(ingredient, recipes)| ShoppingItem {
                    ingredient,
                    recipes: recipes.into_iter().collect(),
                })
                .collect(),
        )
    }
}

/// Aggregate the ingredients of every recipe assigned in `plan`.
///
/// An empty plan yields [`ShoppingList::NothingPlanned`]. A recipe whose
/// ingredients cannot be loaded contributes nothing; the others are still
/// aggregated.
pub async fn aggregate<S>(plan: &WeeklyPlan, store: &S) -> ShoppingList
where
    S: RecipeStore + ?Sized,
{
    if plan.is_empty() {
        return ShoppingList::NothingPlanned;
    }

    let mut builder = ShoppingListBuilder::new();
    for (day, recipe) in plan.assigned() {
        match store.get_ingredients(recipe.id).await {
            Ok(ingredients) => builder.add(&recipe.name, ingredients),
            Err(e) => {
                warn!(
                    day = %day,
                    recipe = %recipe.name,
                    error = %e,
                    "could not load ingredients, recipe skipped"
                );
            }
        }
    }

    builder.finish()
}
