//! This module defines the domain data types.

pub use category::Category;
pub use expense::{EARLIEST_DATE, Expense, ExpenseId, LATEST_DATE, MAX_AMOUNT, NewExpense, check_date};

mod category;
mod expense;
