use crate::core::models::NewExpense;
use crate::stores::ExpenseStore;
use chrono::Utc;
use std::collections::{HashMap, HashSet};

#[test]
fn test_totals_track_added_and_deleted_expenses() {
    let _ = env_logger::try_init();
    let mut store = ExpenseStore::new();
    assert_eq!(store.total_expenses(), 0.0);

    let dinner = store.add_expense(NewExpense::new("Dinner", 42.5, "food")).id;
    store.add_expense(NewExpense::new("Taxi", 17.25, "travel"));
    store.add_expense(NewExpense::new("Museum", 12.0, "fun"));
    assert_eq!(store.total_expenses(), 71.75);
    assert_eq!(store.expense_count(), 3);

    assert!(store.delete_expense(dinner));
    assert_eq!(store.total_expenses(), 29.25);
    assert_eq!(store.expense_count(), 2);
}

#[test]
fn test_expenses_by_category_sums_per_category() {
    let mut store = ExpenseStore::new();
    store.add_expense(NewExpense::new("Lunch", 10.0, "food"));
    store.add_expense(NewExpense::new("Snack", 5.0, "food"));
    store.add_expense(NewExpense::new("Bus", 7.0, "travel"));

    let expected = HashMap::from([("food".to_string(), 15.0), ("travel".to_string(), 7.0)]);
    assert_eq!(store.expenses_by_category(), expected);
}

#[test]
fn test_delete_expense_is_idempotent() {
    let mut store = ExpenseStore::new();
    let id = store.add_expense(NewExpense::new("Coffee", 3.0, "food")).id;
    store.add_expense(NewExpense::new("Tea", 2.0, "food"));

    assert!(store.delete_expense(id));
    let after_once = store.expenses().to_vec();
    assert!(!store.delete_expense(id));
    assert_eq!(store.expenses(), after_once.as_slice());
    assert_eq!(store.expense_count(), 1);
}

#[test]
fn test_clear_all_expenses_zeroes_aggregates() {
    let mut store = ExpenseStore::new();
    store.add_expense(NewExpense::new("Hotel", 120.0, "lodging"));
    store.add_expense(NewExpense::new("Fuel", 60.0, "travel"));

    store.clear_all_expenses();
    assert_eq!(store.expense_count(), 0);
    assert_eq!(store.total_expenses(), 0.0);
    assert!(store.expenses_by_category().is_empty());
}

#[test]
fn test_rapid_additions_get_distinct_ids_and_todays_date() {
    let mut store = ExpenseStore::new();
    for i in 0..500 {
        store.add_expense(NewExpense::new(format!("item {}", i), 1.0, "misc"));
    }

    let ids: HashSet<_> = store.expenses().iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 500);
    let today = Utc::now().date_naive();
    // Tolerate a run that straddles midnight.
    assert!(store.expenses().iter().all(|e| e.date == today || e.date.succ_opt() == Some(today)));
    assert_eq!(store.expenses()[0].description, "item 0");
}

#[test]
fn test_expense_date_serializes_as_iso_date() {
    let mut store = ExpenseStore::new();
    let expense = store.add_expense(NewExpense::new("Dinner", 20.0, "food")).clone();

    let value = serde_json::to_value(&expense).unwrap();
    assert_eq!(value["date"], expense.date.format("%Y-%m-%d").to_string());
}

#[test]
fn test_mutations_bump_revision() {
    let mut store = ExpenseStore::new();
    let rx = store.subscribe();
    let id = store.add_expense(NewExpense::new("Dinner", 20.0, "food")).id;
    assert_eq!(*rx.borrow(), 1);

    store.delete_expense(id);
    store.delete_expense(id);
    assert_eq!(store.revision(), 2);
}
