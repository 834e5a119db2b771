//! Weekly meal planning: the recipe store seam, the recipe book service,
//! the random plan generator and the shopping list aggregator.

pub mod error;
pub mod plan;
pub mod planner;
pub mod recipes;
pub mod shopping;
pub mod store;

pub use error::{RecipeError, Result};
pub use planner::MealPlanner;
pub use store::{RecipeFilter, RecipeStore, SqliteRecipeStore};
