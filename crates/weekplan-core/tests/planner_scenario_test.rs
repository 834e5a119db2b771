//! End-to-end planner scenarios against a real SQLite database.

use weekplan_core::plan::{DayAssignment, RngChooser};
use weekplan_core::recipes::{RecipeDraft, save_recipe};
use weekplan_core::shopping::{ShoppingItem, ShoppingList};
use weekplan_core::{MealPlanner, SqliteRecipeStore};
use weekplan_db::models::Day;
use weekplan_test_utils::{SequenceChooser, create_test_db};

fn item(ingredient: &str, recipes: &[&str]) -> ShoppingItem {
    ShoppingItem {
        ingredient: ingredient.to_owned(),
        recipes: recipes.iter().map(|r| (*r).to_owned()).collect(),
    }
}

#[tokio::test]
async fn inactive_tuesday_leaves_only_monday_planned() {
    let (pool, _dir) = create_test_db().await;
    let store = SqliteRecipeStore::new(pool.clone());

    let pancakes = save_recipe(
        &store,
        None,
        &RecipeDraft::new("Pancakes", Day::Monday).ingredients(["Egg", "Flour", "Milk"]),
    )
    .await
    .unwrap();
    save_recipe(
        &store,
        None,
        &RecipeDraft::new("Salad", Day::Tuesday)
            .active(false)
            .ingredients(["Lettuce"]),
    )
    .await
    .unwrap();

    let mut planner = MealPlanner::new(store);
    assert!(planner.plan().is_empty());
    assert_eq!(planner.shopping_list(), &ShoppingList::NothingPlanned);

    let plan = planner
        .generate_plan(&[Day::Monday, Day::Tuesday], &mut RngChooser::thread())
        .await;
    assert_eq!(
        plan.get(Day::Monday).and_then(DayAssignment::recipe).map(|r| r.id),
        Some(pancakes)
    );
    assert_eq!(plan.get(Day::Tuesday), Some(&DayAssignment::Unassigned));
    assert_eq!(plan.assigned().count(), 1);

    let list = planner.refresh_shopping_list().await;
    assert_eq!(
        list,
        &ShoppingList::Items(vec![
            item("Egg", &["Pancakes"]),
            item("Flour", &["Pancakes"]),
            item("Milk", &["Pancakes"]),
        ])
    );

    pool.close().await;
}

#[tokio::test]
async fn regenerating_invalidates_the_shopping_list() {
    let (pool, _dir) = create_test_db().await;
    let store = SqliteRecipeStore::new(pool.clone());
    save_recipe(
        &store,
        None,
        &RecipeDraft::new("Omelette", Day::Wednesday).ingredients(["Egg", "Salt"]),
    )
    .await
    .unwrap();
    save_recipe(
        &store,
        None,
        &RecipeDraft::new("Fries", Day::Thursday).ingredients(["Potato", "Salt"]),
    )
    .await
    .unwrap();

    let mut planner = MealPlanner::new(store);
    planner
        .generate_plan(&[Day::Wednesday, Day::Thursday], &mut SequenceChooser::default())
        .await;
    let list = planner.refresh_shopping_list().await.clone();
    assert_eq!(
        list,
        ShoppingList::Items(vec![
            item("Egg", &["Omelette"]),
            item("Potato", &["Fries"]),
            item("Salt", &["Fries", "Omelette"]),
        ])
    );

    planner
        .generate_plan(&[Day::Sunday], &mut SequenceChooser::default())
        .await;
    assert_eq!(planner.shopping_list(), &ShoppingList::NothingPlanned);
    assert_eq!(planner.plan().assigned().count(), 0);

    // A generated plan with nothing assigned still yields a real, empty list.
    assert_eq!(
        planner.refresh_shopping_list().await,
        &ShoppingList::Items(vec![])
    );

    pool.close().await;
}

#[tokio::test]
async fn plan_serializes_with_day_names_and_status() {
    let (pool, _dir) = create_test_db().await;
    let store = SqliteRecipeStore::new(pool.clone());
    let id = save_recipe(&store, None, &RecipeDraft::new("Pancakes", Day::Monday))
        .await
        .unwrap();

    let mut planner = MealPlanner::new(store);
    planner
        .generate_plan(&[Day::Monday], &mut SequenceChooser::default())
        .await;

    let json = serde_json::to_value(planner.plan()).unwrap();
    assert_eq!(
        json["Monday"],
        serde_json::json!({ "status": "assigned", "id": id, "name": "Pancakes" })
    );
    assert_eq!(json["Sunday"], serde_json::json!({ "status": "unassigned" }));
    assert_eq!(json.as_object().unwrap().len(), 7);

    pool.close().await;
}
