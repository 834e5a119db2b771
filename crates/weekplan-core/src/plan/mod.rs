//! Weekly plan: types, random source and generation.

pub mod chooser;
pub mod generate;
pub mod types;

pub use chooser::{Chooser, RngChooser};
pub use generate::{generate, pick_for_day};
pub use types::{DayAssignment, PlannedRecipe, WeeklyPlan};
