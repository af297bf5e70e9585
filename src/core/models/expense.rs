use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
}

/// Caller-supplied part of an expense; the store fills in id and date.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: String,
}

impl NewExpense {
    pub fn new(description: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        NewExpense {
            description: description.into(),
            amount,
            category: category.into(),
        }
    }
}
