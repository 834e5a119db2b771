//! Weekly plan types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weekplan_db::models::{Day, RecipeId};

/// A recipe chosen for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRecipe {
    pub id: RecipeId,
    pub name: String,
}

/// What a day of the plan holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayAssignment {
    /// The day was not selected, or has no active recipe.
    Unassigned,
    /// One recipe drawn from the day's active recipes.
    Assigned(PlannedRecipe),
    /// The store could not be queried for this day.
    Unavailable { reason: String },
}

impl DayAssignment {
    /// The chosen recipe, if any. Unavailable days count as having none.
    pub fn recipe(&self) -> Option<&PlannedRecipe> {
        match self {
            Self::Assigned(recipe) => Some(recipe),
            Self::Unassigned | Self::Unavailable { .. } => None,
        }
    }
}

/// Day → assignment map produced by the plan generator.
///
/// A default-constructed plan is empty (nothing generated yet). A generated
/// plan holds an entry for each of the seven days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyPlan {
    days: BTreeMap<Day, DayAssignment>,
}

impl WeeklyPlan {
    /// A plan with every day unassigned.
    pub fn unassigned_week() -> Self {
        Self {
            days: Day::ALL
                .into_iter()
                .map(|day| (day, DayAssignment::Unassigned))
                .collect(),
        }
    }

    /// `true` when no plan has been generated.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn set(&mut self, day: Day, assignment: DayAssignment) {
        self.days.insert(day, assignment);
    }

    pub fn get(&self, day: Day) -> Option<&DayAssignment> {
        self.days.get(&day)
    }

    /// Days in calendar order with their assignment.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &DayAssignment)> {
        self.days.iter().map(|(day, assignment)| (*day, assignment))
    }

    /// Days that received a recipe, in calendar order.
    pub fn assigned(&self) -> impl Iterator<Item = (Day, &PlannedRecipe)> {
        self.iter()
            .filter_map(|(day, assignment)| assignment.recipe().map(|recipe| (day, recipe)))
    }
}
