use crate::core::models::{Expense, NewExpense};
use crate::stores::Revision;
use chrono::Utc;
use log::debug;
use std::collections::HashMap;
use tokio::sync::watch;
use uuid::Uuid;

/// Client-side expense list. Nothing here is sent to the Gateway.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    revision: Revision,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }

    pub fn expenses_by_category(&self) -> HashMap<String, f64> {
        let mut categories: HashMap<String, f64> = HashMap::new();
        for expense in &self.expenses {
            *categories.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
        }
        categories
    }

    /// Appends an expense dated today (UTC) under a fresh id.
    pub fn add_expense(&mut self, expense: NewExpense) -> &Expense {
        let expense = Expense {
            id: Uuid::new_v4(),
            description: expense.description,
            amount: expense.amount,
            date: Utc::now().date_naive(),
            category: expense.category,
        };
        debug!("Adding expense {} ({}) to {}", expense.id, expense.amount, expense.category);
        self.expenses.push(expense);
        self.revision.bump();
        &self.expenses[self.expenses.len() - 1]
    }

    /// Returns whether an expense was removed.
    pub fn delete_expense(&mut self, id: Uuid) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;
        if removed {
            debug!("Deleted expense {}", id);
            self.revision.bump();
        }
        removed
    }

    pub fn clear_all_expenses(&mut self) {
        self.expenses.clear();
        self.revision.bump();
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        self.revision.current()
    }
}
