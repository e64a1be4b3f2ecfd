//! The business rules for managing expenses: lookups that fail on missing
//! expenses, full-replacement updates and the per-category spending summary.

use std::{collections::BTreeMap, ops::RangeInclusive};

use time::Date;

use crate::{
    Error,
    models::{Category, Expense, ExpenseId, NewExpense},
    stores::ExpenseStore,
};

/// The total amount spent in each category.
///
/// Only categories with at least one expense have an entry.
pub type CategorySummary = BTreeMap<Category, f64>;

/// Creates, reads, updates and deletes expenses, and summarizes spending.
///
/// The service keeps no state of its own, every call reads from `store`.
#[derive(Debug, Clone)]
pub struct ExpenseService<S> {
    store: S,
}

impl<S> ExpenseService<S>
where
    S: ExpenseStore,
{
    /// Create a service backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store a new expense and return it with its assigned ID.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        self.store.create(expense)
    }

    /// Get every expense.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn list(&self) -> Result<Vec<Expense>, Error> {
        self.store.get_all()
    }

    /// Get the expense with `id`, or `None` if it does not exist.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn get_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, Error> {
        self.store.get(id)
    }

    /// Replace the description, amount, category and date of the expense with `id`.
    ///
    /// Every field is overwritten, nothing is carried over from the stored expense
    /// except its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no expense with `id`, otherwise any
    /// error from the store.
    pub fn update(&self, id: ExpenseId, fields: NewExpense) -> Result<Expense, Error> {
        let mut expense = self.store.get(id)?.ok_or(Error::NotFound(id))?;

        expense.overwrite(fields);

        self.store.update(&expense)
    }

    /// Permanently delete the expense with `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no expense with `id`, otherwise any
    /// error from the store.
    pub fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        if !self.store.exists(id)? {
            return Err(Error::NotFound(id));
        }

        self.store.delete(id)
    }

    /// Get the total amount spent per category across all expenses.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn summary_by_category(&self) -> Result<CategorySummary, Error> {
        let expenses = self.store.get_all()?;

        Ok(summarize_by_category(&expenses))
    }

    /// Get the expenses in `category`.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn list_by_category(&self, category: Category) -> Result<Vec<Expense>, Error> {
        self.store.get_by_category(category)
    }

    /// Get the expenses dated within `date_range` (inclusive).
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn list_in_date_range(&self, date_range: RangeInclusive<Date>) -> Result<Vec<Expense>, Error> {
        self.store.get_by_date_range(date_range)
    }
}

/// Sum the amounts of `expenses` per category.
pub fn summarize_by_category(expenses: &[Expense]) -> CategorySummary {
    expenses
        .iter()
        .fold(CategorySummary::new(), |mut summary, expense| {
            *summary.entry(expense.category).or_insert(0.0) += expense.amount;
            summary
        })
}
