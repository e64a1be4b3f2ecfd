//! This file defines the type `Expense`, the core type of the application, and
//! `NewExpense`, the validated set of fields used to create or overwrite an expense.

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{Error, models::Category};

/// Alias for the integer type used for expense IDs in the database.
pub type ExpenseId = i64;

/// The earliest date an expense may have.
pub const EARLIEST_DATE: Date = date!(0000 - 01 - 01);

/// The latest date an expense may have.
///
/// Dates are stored as `YYYY-MM-DD` text, which only sorts in date order for
/// four digit, non-negative years.
pub const LATEST_DATE: Date = date!(9999 - 12 - 31);

/// The largest amount a single expense may have.
///
/// Keeps per-category totals finite for any number of expenses.
pub const MAX_AMOUNT: f64 = 1.0e12;

/// Money spent on something at some date.
///
/// Expenses are created through an [ExpenseStore](crate::stores::ExpenseStore),
/// which assigns the ID. To create one, build a [NewExpense] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the store.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// How much was spent. Always greater than zero.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
}

impl Expense {
    /// Overwrite every mutable field with `fields`, keeping the ID.
    pub fn overwrite(&mut self, fields: NewExpense) {
        self.description = fields.description;
        self.amount = fields.amount;
        self.category = fields.category;
        self.date = fields.date;
    }

    /// The fields of the expense without its ID.
    #[cfg(test)]
    pub fn to_new_expense(&self) -> NewExpense {
        NewExpense {
            description: self.description.clone(),
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// The fields of an expense that has not been stored yet.
///
/// A `NewExpense` always has a non-empty description and an amount greater
/// than zero, so anything built from it can be stored as is.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    description: String,
    amount: f64,
    category: Category,
    date: Date,
}

impl NewExpense {
    /// Create the fields for an expense.
    ///
    /// Leading and trailing whitespace is stripped from `description`.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if:
    /// - `description` is empty or only whitespace,
    /// - `amount` is zero, negative, NaN, infinite or greater than [MAX_AMOUNT],
    /// - `date` is outside [EARLIEST_DATE]..=[LATEST_DATE].
    pub fn new(description: &str, amount: f64, category: Category, date: Date) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            return Err(Error::InvalidInput(
                "description must not be empty".to_owned(),
            ));
        }

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "amount must be a number greater than zero, got {amount}"
            )));
        }

        if amount > MAX_AMOUNT {
            return Err(Error::InvalidInput(format!(
                "amount must be at most {MAX_AMOUNT}, got {amount}"
            )));
        }

        check_date(date)?;

        Ok(Self {
            description: description.to_owned(),
            amount,
            category,
            date,
        })
    }

    /// Create the fields for an expense without validation.
    ///
    /// The caller should ensure that the description is not empty and the amount
    /// is greater than zero. The database rejects non-positive amounts regardless.
    #[cfg(test)]
    pub fn new_unchecked(description: &str, amount: f64, category: Category, date: Date) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            category,
            date,
        }
    }

    /// What the money was spent on.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// How much was spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The category of the expense.
    pub fn category(&self) -> Category {
        self.category
    }

    /// When the money was spent.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Attach an ID to the fields, producing the stored form of the expense.
    pub fn with_id(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
        }
    }
}

/// Check that `date` can be stored and compared as `YYYY-MM-DD` text.
///
/// # Errors
/// Returns [Error::InvalidInput] if `date` is outside [EARLIEST_DATE]..=[LATEST_DATE].
pub fn check_date(date: Date) -> Result<Date, Error> {
    if (EARLIEST_DATE..=LATEST_DATE).contains(&date) {
        Ok(date)
    } else {
        Err(Error::InvalidInput(format!(
            "date must be between {EARLIEST_DATE} and {LATEST_DATE}, got {date}"
        )))
    }
}

#[cfg(test)]
mod new_expense_tests {
    use time::{Date, Month, macros::date};

    use crate::{Error, models::Category};

    use super::{EARLIEST_DATE, LATEST_DATE, MAX_AMOUNT, NewExpense};

    #[test]
    fn accepts_valid_fields() {
        let expense = NewExpense::new("Lunch", 50.0, Category::Food, date!(2025 - 03 - 14)).unwrap();

        assert_eq!(expense.description(), "Lunch");
        assert_eq!(expense.amount(), 50.0);
        assert_eq!(expense.category(), Category::Food);
        assert_eq!(expense.date(), date!(2025 - 03 - 14));
    }

    #[test]
    fn trims_description() {
        let expense =
            NewExpense::new("  Bus fare \n", 2.5, Category::Transport, date!(2025 - 03 - 14))
                .unwrap();

        assert_eq!(expense.description(), "Bus fare");
    }

    #[test]
    fn rejects_empty_description() {
        let result = NewExpense::new("", 10.0, Category::Food, date!(2025 - 03 - 14));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_whitespace_description() {
        let result = NewExpense::new("   ", 10.0, Category::Food, date!(2025 - 03 - 14));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_negative_amount() {
        let result = NewExpense::new("Invalid", -50.0, Category::Food, date!(2025 - 03 - 14));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_zero_amount() {
        let result = NewExpense::new("Free lunch", 0.0, Category::Food, date!(2025 - 03 - 14));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_finite_amount() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = NewExpense::new("Weird", amount, Category::Other, date!(2025 - 03 - 14));

            assert!(matches!(result, Err(Error::InvalidInput(_))), "{amount}");
        }
    }

    #[test]
    fn accepts_max_amount() {
        let result = NewExpense::new("House", MAX_AMOUNT, Category::Other, date!(2025 - 03 - 14));

        assert!(result.is_ok());
    }

    #[test]
    fn rejects_amount_over_max() {
        let result = NewExpense::new("Huge", 1.0e308, Category::Food, date!(2025 - 03 - 14));

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn accepts_dates_at_bounds() {
        for date in [EARLIEST_DATE, LATEST_DATE] {
            let result = NewExpense::new("Edge", 1.0, Category::Other, date);

            assert!(result.is_ok(), "{date}");
        }
    }

    #[test]
    fn rejects_dates_before_year_zero() {
        let ancient = Date::from_calendar_date(-1, Month::June, 1).unwrap();

        for date in [ancient, Date::MIN] {
            let result = NewExpense::new("Ancient", 1.0, Category::Other, date);

            assert!(matches!(result, Err(Error::InvalidInput(_))), "{date}");
        }
    }

    #[test]
    fn with_id_keeps_fields() {
        let fields = NewExpense::new("Lunch", 50.0, Category::Food, date!(2025 - 03 - 14)).unwrap();

        let expense = fields.clone().with_id(7);

        assert_eq!(expense.id, 7);
        assert_eq!(expense.to_new_expense(), fields);
    }
}
