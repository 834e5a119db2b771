//! Integration tests for shopping list aggregation.

use weekplan_core::plan::{DayAssignment, PlannedRecipe, WeeklyPlan};
use weekplan_core::shopping::{ShoppingItem, ShoppingList, aggregate};
use weekplan_db::models::{Day, RecipeId};
use weekplan_test_utils::MemoryRecipeStore;

fn plan_of(entries: &[(Day, RecipeId, &str)]) -> WeeklyPlan {
    let mut plan = WeeklyPlan::unassigned_week();
    for (day, id, name) in entries {
        plan.set(
            *day,
            DayAssignment::Assigned(PlannedRecipe {
                id: *id,
                name: (*name).to_owned(),
            }),
        );
    }
    plan
}

fn item(ingredient: &str, recipes: &[&str]) -> ShoppingItem {
    ShoppingItem {
        ingredient: ingredient.to_owned(),
        recipes: recipes.iter().map(|r| (*r).to_owned()).collect(),
    }
}

#[tokio::test]
async fn empty_plan_returns_sentinel() {
    let store = MemoryRecipeStore::new();
    store.add("Pancakes", Day::Monday, true, &["Egg"]);

    let list = aggregate(&WeeklyPlan::default(), &store).await;
    assert_eq!(list, ShoppingList::NothingPlanned);
}

#[tokio::test]
async fn recipes_without_ingredients_give_empty_but_valid_list() {
    let store = MemoryRecipeStore::new();
    let toast = store.add("Toast", Day::Monday, true, &[]);

    let list = aggregate(&plan_of(&[(Day::Monday, toast, "Toast")]), &store).await;
    assert_eq!(list, ShoppingList::Items(vec![]));

    let unassigned = aggregate(&WeeklyPlan::unassigned_week(), &store).await;
    assert_eq!(unassigned, ShoppingList::Items(vec![]));
    assert_ne!(unassigned, ShoppingList::NothingPlanned);
}

#[tokio::test]
async fn shared_ingredient_maps_to_both_recipes_sorted() {
    let store = MemoryRecipeStore::new();
    let omelette = store.add("Omelette", Day::Wednesday, true, &["Egg", "Salt"]);
    let fries = store.add("Fries", Day::Wednesday, true, &["Potato", "Salt"]);

    let list = aggregate(
        &plan_of(&[
            (Day::Wednesday, omelette, "Omelette"),
            (Day::Thursday, fries, "Fries"),
        ]),
        &store,
    )
    .await;

    assert_eq!(
        list,
        ShoppingList::Items(vec![
            item("Egg", &["Omelette"]),
            item("Potato", &["Fries"]),
            item("Salt", &["Fries", "Omelette"]),
        ])
    );
}

#[tokio::test]
async fn same_recipe_on_several_days_is_listed_once() {
    let store = MemoryRecipeStore::new();
    let pasta = store.add("Pasta", Day::Monday, true, &["Tomato", "Basil"]);

    let list = aggregate(
        &plan_of(&[
            (Day::Monday, pasta, "Pasta"),
            (Day::Friday, pasta, "Pasta"),
        ]),
        &store,
    )
    .await;

    assert_eq!(
        list,
        ShoppingList::Items(vec![item("Basil", &["Pasta"]), item("Tomato", &["Pasta"])])
    );
}

#[tokio::test]
async fn output_is_strictly_increasing_case_sensitive() {
    let store = MemoryRecipeStore::new();
    let a = store.add("b-recipe", Day::Monday, true, &["apple", "Zest", "Apple"]);
    let b = store.add("A-recipe", Day::Tuesday, true, &["apple", "banana"]);

    let list = aggregate(
        &plan_of(&[(Day::Monday, a, "b-recipe"), (Day::Tuesday, b, "A-recipe")]),
        &store,
    )
    .await;

    let items = list.items();
    let names: Vec<_> = items.iter().map(|i| i.ingredient.as_str()).collect();
    assert_eq!(names, vec!["Apple", "Zest", "apple", "banana"]);
    assert!(items.windows(2).all(|w| w[0].ingredient < w[1].ingredient));
    for entry in items {
        assert!(entry.recipes.windows(2).all(|w| w[0] < w[1]), "{entry:?}");
    }
    assert_eq!(items[2].recipes, vec!["A-recipe", "b-recipe"]);
}

#[tokio::test]
async fn failed_lookup_skips_only_that_recipe() {
    let store = MemoryRecipeStore::new();
    let pancakes = store.add("Pancakes", Day::Monday, true, &["Egg", "Flour"]);
    let soup = store.add("Soup", Day::Tuesday, true, &["Leek"]);
    store.fail_ingredients_for(soup);

    let mut plan = plan_of(&[(Day::Monday, pancakes, "Pancakes"), (Day::Tuesday, soup, "Soup")]);
    plan.set(
        Day::Wednesday,
        DayAssignment::Unavailable {
            reason: "locked".to_owned(),
        },
    );

    let list = aggregate(&plan, &store).await;
    assert_eq!(
        list,
        ShoppingList::Items(vec![item("Egg", &["Pancakes"]), item("Flour", &["Pancakes"])])
    );
}

#[tokio::test]
async fn shopping_list_serializes_with_status_tag() {
    let sentinel = serde_json::to_value(ShoppingList::NothingPlanned).unwrap();
    assert_eq!(sentinel, serde_json::json!({ "status": "nothing_planned" }));

    let items = serde_json::to_value(ShoppingList::Items(vec![item("Egg", &["Pancakes"])])).unwrap();
    assert_eq!(
        items,
        serde_json::json!({
            "status": "items",
            "items": [{ "ingredient": "Egg", "recipes": ["Pancakes"] }]
        })
    );
}
