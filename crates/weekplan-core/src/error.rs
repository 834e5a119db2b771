//! Error type shared by the recipe store and the services built on it.

use thiserror::Error;
use weekplan_db::models::RecipeId;

/// Errors surfaced by recipe book and planning operations.
///
/// Every variant aborts only the operation that produced it.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Input rejected before anything was written.
    #[error("invalid recipe: {0}")]
    Validation(String),

    /// The recipe id is not (or no longer) in the store.
    #[error("recipe {0} not found")]
    NotFound(RecipeId),

    /// Connection or query failure in the underlying store.
    #[error(transparent)]
    StoreAccess(#[from] anyhow::Error),
}

pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
