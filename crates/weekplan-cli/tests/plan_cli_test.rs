//! Integration tests for the flow behind `weekplan db-init`, `weekplan recipe`
//! and `weekplan plan`.
//!
//! Each test works on a database file inside its own temporary directory,
//! opened through the same config and pool functions the binary uses.

use tempfile::TempDir;

use weekplan_core::plan::{DayAssignment, RngChooser};
use weekplan_core::recipes::{self, RecipeDraft, parse_ingredient_list};
use weekplan_core::shopping::ShoppingList;
use weekplan_core::{MealPlanner, RecipeFilter, SqliteRecipeStore};
use weekplan_db::config::DbConfig;
use weekplan_db::models::Day;
use weekplan_db::pool;

/// Same steps as `weekplan db-init`.
async fn db_init(dir: &TempDir) -> (sqlx::SqlitePool, DbConfig) {
    let config = DbConfig::for_path(&dir.path().join("recipes.db"));
    pool::ensure_database_exists(&config).await.unwrap();
    let db_pool = pool::create_pool(&config).await.unwrap();
    pool::run_migrations(&db_pool).await.unwrap();
    (db_pool, config)
}

#[tokio::test]
async fn db_init_on_fresh_directory_reports_empty_tables() {
    let dir = TempDir::new().unwrap();
    let (db_pool, config) = db_init(&dir).await;

    assert!(std::path::Path::new(config.database_path().unwrap()).exists());
    let counts = pool::table_counts(&db_pool).await.unwrap();
    assert_eq!(counts.len(), 3);
    assert!(counts.iter().all(|(_, rows)| *rows == 0));

    db_pool.close().await;
}

#[tokio::test]
async fn recipes_persist_across_pools() {
    let dir = TempDir::new().unwrap();
    let (db_pool, config) = db_init(&dir).await;

    let store = SqliteRecipeStore::new(db_pool.clone());
    let draft = RecipeDraft::new("Pancakes", Day::Monday)
        .ingredients(parse_ingredient_list("Egg, Flour, Milk"));
    let id = recipes::save_recipe(&store, None, &draft).await.unwrap();
    db_pool.close().await;

    // A second invocation opens a new pool on the same file.
    let reopened = pool::create_pool(&config).await.unwrap();
    pool::run_migrations(&reopened).await.unwrap();
    let store = SqliteRecipeStore::new(reopened.clone());

    let detail = recipes::load_recipe(&store, id).await.unwrap();
    assert_eq!(detail.recipe.name, "Pancakes");
    assert_eq!(detail.ingredients, vec!["Egg", "Flour", "Milk"]);

    reopened.close().await;
}

#[tokio::test]
async fn plan_for_selected_days_with_shopping_list() {
    let dir = TempDir::new().unwrap();
    let (db_pool, _config) = db_init(&dir).await;
    let store = SqliteRecipeStore::new(db_pool.clone());

    for (name, day, active, ingredients) in [
        ("Pancakes", Day::Monday, true, "Egg, Flour, Milk"),
        ("Salad", Day::Tuesday, false, "Lettuce, Tomato"),
        ("Omelette", Day::Wednesday, true, "Egg, Salt"),
    ] {
        let draft = RecipeDraft::new(name, day)
            .active(active)
            .ingredients(parse_ingredient_list(ingredients));
        recipes::save_recipe(&store, None, &draft).await.unwrap();
    }
    assert_eq!(
        recipes::list_recipes(&store, RecipeFilter::all())
            .await
            .unwrap()
            .len(),
        3
    );

    let mut planner = MealPlanner::new(store);
    planner
        .generate_plan(
            &[Day::Monday, Day::Tuesday, Day::Wednesday],
            &mut RngChooser::seeded(7),
        )
        .await;

    let plan = planner.plan();
    assert_eq!(plan.get(Day::Tuesday), Some(&DayAssignment::Unassigned));
    assert_eq!(plan.get(Day::Thursday), Some(&DayAssignment::Unassigned));
    let assigned: Vec<_> = plan.assigned().map(|(_, r)| r.name.as_str()).collect();
    assert_eq!(assigned, vec!["Pancakes", "Omelette"]);

    let list = planner.refresh_shopping_list().await;
    let ShoppingList::Items(items) = list else {
        panic!("expected items, got {list:?}");
    };
    let egg = items.iter().find(|i| i.ingredient == "Egg").unwrap();
    assert_eq!(egg.recipes, vec!["Omelette", "Pancakes"]);
    assert!(items.iter().all(|i| i.ingredient != "Lettuce"));

    db_pool.close().await;
}
