//! `weekplan plan` command: generate a weekly plan and its shopping list.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use weekplan_core::plan::{Chooser, DayAssignment, RngChooser, WeeklyPlan};
use weekplan_core::shopping::ShoppingList;
use weekplan_core::{MealPlanner, SqliteRecipeStore};
use weekplan_db::models::Day;

use crate::OutputFormat;

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Days to fill; the rest of the week stays unassigned.
    pub days: Vec<Day>,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub shopping_list: bool,
}

/// JSON document printed by `--format json`.
#[derive(Serialize)]
struct PlanOutput<'a> {
    plan: &'a WeeklyPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    shopping_list: Option<&'a ShoppingList>,
}

/// Run the plan command.
pub async fn run_plan(pool: &SqlitePool, options: &PlanOptions) -> Result<()> {
    let mut chooser: Box<dyn Chooser> = match options.seed {
        Some(seed) => Box::new(RngChooser::seeded(seed)),
        None => Box::new(RngChooser::thread()),
    };

    let mut planner = MealPlanner::new(SqliteRecipeStore::new(pool.clone()));
    planner
        .generate_plan(&options.days, chooser.as_mut())
        .await;
    info!(
        selected = options.days.len(),
        assigned = planner.plan().assigned().count(),
        "plan generated"
    );

    if options.shopping_list {
        planner.refresh_shopping_list().await;
    }

    match options.format {
        OutputFormat::Text => {
            print!("{}", render_plan(planner.plan()));
            if options.shopping_list {
                println!();
                print!("{}", render_shopping_list(planner.shopping_list()));
            }
        }
        OutputFormat::Json => {
            let output = PlanOutput {
                plan: planner.plan(),
                shopping_list: options.shopping_list.then(|| planner.shopping_list()),
            };
            let json =
                serde_json::to_string_pretty(&output).context("failed to serialize plan")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// One line per day in calendar order.
pub fn render_plan(plan: &WeeklyPlan) -> String {
    let mut out = String::new();
    for day in Day::ALL {
        let _ = match plan.get(day) {
            Some(DayAssignment::Assigned(recipe)) => writeln!(out, "{day}: {}", recipe.name),
            Some(DayAssignment::Unavailable { reason }) => {
                writeln!(out, "{day}: (Unavailable: {reason})")
            }
            Some(DayAssignment::Unassigned) | None => writeln!(out, "{day}: (No recipe assigned)"),
        };
    }
    out
}

pub fn render_shopping_list(list: &ShoppingList) -> String {
    let mut out = String::new();
    match list {
        ShoppingList::NothingPlanned => {
            out.push_str("No recipes assigned to the weekly plan.\n");
        }
        ShoppingList::Items(items) => {
            out.push_str("Shopping List:\n\n");
            for item in items {
                let _ = writeln!(
                    out,
                    "- {} (Used in: {})",
                    item.ingredient,
                    item.recipes.join(", ")
                );
            }
        }
    }
    out
}
