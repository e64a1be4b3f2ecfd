//! Defines the expense store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{Category, Expense, ExpenseId, NewExpense},
};

/// Handles the persistence of expenses.
///
/// The store owns all durable state. Callers should not cache what they read
/// from it across requests.
pub trait ExpenseStore {
    /// Add a new expense to the store, assigning it an ID.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error>;

    /// Retrieve an expense by its ID, or `None` if there is no such expense.
    fn get(&self, id: ExpenseId) -> Result<Option<Expense>, Error>;

    /// Retrieve every expense in the store.
    fn get_all(&self) -> Result<Vec<Expense>, Error>;

    /// Retrieve the expenses in `category`.
    fn get_by_category(&self, category: Category) -> Result<Vec<Expense>, Error>;

    /// Retrieve the expenses with a date within `date_range` (inclusive).
    fn get_by_date_range(&self, date_range: RangeInclusive<Date>) -> Result<Vec<Expense>, Error>;

    /// Whether an expense with `id` exists.
    fn exists(&self, id: ExpenseId) -> Result<bool, Error>;

    /// Save the fields of an existing expense.
    ///
    /// Implementers should return [Error::NotFound] if the expense is no longer
    /// in the store rather than inserting it again.
    fn update(&self, expense: &Expense) -> Result<Expense, Error>;

    /// Remove the expense with `id` from the store.
    fn delete(&self, id: ExpenseId) -> Result<(), Error>;
}
