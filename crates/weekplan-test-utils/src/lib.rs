//! Shared test utilities for weekplan integration tests.
//!
//! Provides:
//! - temporary on-disk SQLite databases with migrations applied;
//! - [`MemoryRecipeStore`], an in-memory [`RecipeStore`] with failure
//!   injection;
//! - [`SequenceChooser`], a [`Chooser`] replaying fixed indices.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tempfile::TempDir;

use weekplan_core::plan::Chooser;
use weekplan_core::{RecipeError, RecipeFilter, RecipeStore, Result};
use weekplan_db::config::DbConfig;
use weekplan_db::models::{Day, NewRecipe, Recipe, RecipeId};
use weekplan_db::pool;

// -----------------------------------------------------------------------
// Temporary databases
// -----------------------------------------------------------------------

/// Create a temporary database file with migrations applied.
///
/// Returns `(pool, dir)`. The database lives inside `dir` and is removed
/// when `dir` is dropped, so keep it alive for the duration of the test.
pub async fn create_test_db() -> (SqlitePool, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = DbConfig::for_path(&dir.path().join("recipes.db"));

    let pool = pool::create_pool(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to open temp database: {e:#}"));

    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");

    (pool, dir)
}

// -----------------------------------------------------------------------
// In-memory store
// -----------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryState {
    next_id: RecipeId,
    recipes: Vec<Recipe>,
    /// (recipe_id, ingredient name) in link order.
    links: Vec<(RecipeId, String)>,
}

/// In-memory [`RecipeStore`] for tests.
///
/// Listing follows the SQLite store's ordering (calendar day, then name).
/// Failures can be injected per day (listing) and per recipe (ingredient
/// lookup).
#[derive(Debug, Default)]
pub struct MemoryRecipeStore {
    state: Mutex<MemoryState>,
    failing_days: Mutex<HashSet<Day>>,
    failing_ingredients: Mutex<HashSet<RecipeId>>,
}

impl MemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a recipe with its ingredients and return its id.
    pub fn add(&self, name: &str, day: Day, active: bool, ingredients: &[&str]) -> RecipeId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.recipes.push(Recipe {
            id,
            name: name.to_owned(),
            day,
            active,
        });
        for ingredient in ingredients {
            state.links.push((id, (*ingredient).to_owned()));
        }
        id
    }

    /// Make `list_recipes` fail whenever it is filtered to `day`.
    pub fn fail_listing_for(&self, day: Day) {
        self.failing_days.lock().unwrap().insert(day);
    }

    /// Make `get_ingredients` fail for `recipe_id`.
    pub fn fail_ingredients_for(&self, recipe_id: RecipeId) {
        self.failing_ingredients.lock().unwrap().insert(recipe_id);
    }

    fn exists(state: &MemoryState, id: RecipeId) -> bool {
        state.recipes.iter().any(|r| r.id == id)
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn list_recipes(&self, filter: RecipeFilter) -> Result<Vec<Recipe>> {
        if let Some(day) = filter.day {
            if self.failing_days.lock().unwrap().contains(&day) {
                return Err(RecipeError::StoreAccess(anyhow!(
                    "injected failure listing {day}"
                )));
            }
        }

        let state = self.state.lock().unwrap();
        let mut recipes: Vec<Recipe> = state
            .recipes
            .iter()
            .filter(|r| filter.day.is_none_or(|day| r.day == day))
            .filter(|r| !filter.active_only || r.active)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| (a.day, &a.name, a.id).cmp(&(b.day, &b.name, b.id)));
        Ok(recipes)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let state = self.state.lock().unwrap();
        Ok(state.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn save_recipe(&self, id: Option<RecipeId>, recipe: &NewRecipe<'_>) -> Result<RecipeId> {
        let mut state = self.state.lock().unwrap();
        match id {
            None => {
                state.next_id += 1;
                let id = state.next_id;
                state.recipes.push(Recipe {
                    id,
                    name: recipe.name.to_owned(),
                    day: recipe.day,
                    active: recipe.active,
                });
                Ok(id)
            }
            Some(id) => {
                let existing = state
                    .recipes
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or(RecipeError::NotFound(id))?;
                existing.name = recipe.name.to_owned();
                existing.day = recipe.day;
                existing.active = recipe.active;
                Ok(id)
            }
        }
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !Self::exists(&state, id) {
            return Err(RecipeError::NotFound(id));
        }
        state.links.retain(|(recipe_id, _)| *recipe_id != id);
        state.recipes.retain(|r| r.id != id);
        Ok(())
    }

    async fn set_active(&self, id: RecipeId, active: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let recipe = state
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RecipeError::NotFound(id))?;
        recipe.active = active;
        Ok(())
    }

    async fn replace_ingredients(&self, recipe_id: RecipeId, names: &[String]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !Self::exists(&state, recipe_id) {
            return Err(RecipeError::NotFound(recipe_id));
        }
        state.links.retain(|(id, _)| *id != recipe_id);
        for name in names {
            if !state.links.iter().any(|(id, n)| *id == recipe_id && n == name) {
                state.links.push((recipe_id, name.clone()));
            }
        }
        Ok(())
    }

    async fn get_ingredients(&self, recipe_id: RecipeId) -> Result<Vec<String>> {
        if self.failing_ingredients.lock().unwrap().contains(&recipe_id) {
            return Err(RecipeError::StoreAccess(anyhow!(
                "injected failure loading ingredients of recipe {recipe_id}"
            )));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .links
            .iter()
            .filter(|(id, _)| *id == recipe_id)
            .map(|(_, name)| name.clone())
            .collect())
    }
}

// -----------------------------------------------------------------------
// Deterministic chooser
// -----------------------------------------------------------------------

/// [`Chooser`] that replays a fixed sequence of indices and records the
/// candidate counts it was asked about.
///
/// Once the sequence is exhausted it keeps returning `0`.
#[derive(Debug, Default)]
pub struct SequenceChooser {
    picks: VecDeque<usize>,
    /// `len` argument of every call, in order.
    pub asked: Vec<usize>,
}

impl SequenceChooser {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Chooser for SequenceChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        self.asked.push(len);
        self.picks.pop_front().unwrap_or(0)
    }
}
