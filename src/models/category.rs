//! This file defines the `Category` type, the closed set of tags an expense can carry.
//! An expense has exactly one category.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// What an expense was spent on.
///
/// Categories are serialized (in JSON and in the database) as their upper-case
/// names, e.g. `"FOOD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Groceries, eating out and takeaways.
    Food,
    /// Public transport, fuel, taxis.
    Transport,
    /// Movies, concerts, games.
    Entertainment,
    /// Power, water, internet and phone bills.
    Utilities,
    /// Doctor visits, prescriptions.
    Health,
    /// Clothes, electronics, household items.
    Shopping,
    /// Anything that does not fit the other categories.
    Other,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Health,
        Category::Shopping,
        Category::Other,
    ];

    /// The canonical name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "FOOD",
            Category::Transport => "TRANSPORT",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Utilities => "UTILITIES",
            Category::Health => "HEALTH",
            Category::Shopping => "SHOPPING",
            Category::Other => "OTHER",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category from its canonical name.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if `s` is not exactly one of the category names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("\"{s}\" is not a valid category")))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
