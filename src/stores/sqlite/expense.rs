//! Implements a SQLite backed expense store.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, OptionalExtension, Row, params};
use time::Date;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, Expense, ExpenseId, NewExpense},
    stores::ExpenseStore,
};

/// Stores expenses in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteExpenseStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteExpenseStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The expense table must already exist, see [initialize](crate::db::initialize).
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }

    fn query_many<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Expense>, Error> {
        self.lock()?
            .prepare(sql)?
            .query_map(params, Self::map_row)?
            .map(|maybe_expense| maybe_expense.map_err(Error::from))
            .collect()
    }
}

impl ExpenseStore for SQLiteExpenseStore {
    /// Insert an expense into the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidInput] if the amount violates the table's CHECK constraint,
    /// - [Error::DatabaseLockError] if the connection lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, expense: NewExpense) -> Result<Expense, Error> {
        let expense = self
            .lock()?
            .prepare(
                "INSERT INTO expense (description, amount, category, date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, description, amount, category, date",
            )?
            .query_row(
                params![
                    expense.description(),
                    expense.amount(),
                    expense.category(),
                    expense.date(),
                ],
                Self::map_row,
            )?;

        tracing::debug!("created expense {}", expense.id);

        Ok(expense)
    }

    /// Retrieve an expense in the database by its `id`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get(&self, id: ExpenseId) -> Result<Option<Expense>, Error> {
        let expense = self
            .lock()?
            .prepare("SELECT id, description, amount, category, date FROM expense WHERE id = :id")?
            .query_row(&[(":id", &id)], Self::map_row)
            .optional()?;

        Ok(expense)
    }

    /// Retrieve all expenses in the database, in the order they were created.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Expense>, Error> {
        self.query_many(
            "SELECT id, description, amount, category, date FROM expense ORDER BY id",
            (),
        )
    }

    /// Retrieve the expenses in `category`, in the order they were created.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_by_category(&self, category: Category) -> Result<Vec<Expense>, Error> {
        self.query_many(
            "SELECT id, description, amount, category, date FROM expense
             WHERE category = ?1 ORDER BY id",
            params![category],
        )
    }

    /// Retrieve the expenses dated within `date_range`, in the order they were created.
    ///
    /// A range that starts after it ends matches nothing.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_by_date_range(&self, date_range: RangeInclusive<Date>) -> Result<Vec<Expense>, Error> {
        self.query_many(
            "SELECT id, description, amount, category, date FROM expense
             WHERE date BETWEEN ?1 AND ?2 ORDER BY id",
            params![date_range.start(), date_range.end()],
        )
    }

    fn exists(&self, id: ExpenseId) -> Result<bool, Error> {
        let exists = self.lock()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM expense WHERE id = ?1)",
            params![id],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    /// Overwrite the stored fields of `expense`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if there is no row with the expense's ID,
    /// - [Error::InvalidInput] if the amount violates the table's CHECK constraint,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&self, expense: &Expense) -> Result<Expense, Error> {
        let updated = self
            .lock()?
            .prepare(
                "UPDATE expense
                 SET description = ?1, amount = ?2, category = ?3, date = ?4
                 WHERE id = ?5
                 RETURNING id, description, amount, category, date",
            )?
            .query_row(
                params![
                    expense.description,
                    expense.amount,
                    expense.category,
                    expense.date,
                    expense.id,
                ],
                Self::map_row,
            )
            .optional()?;

        match updated {
            Some(updated) => {
                tracing::debug!("updated expense {}", updated.id);
                Ok(updated)
            }
            None => Err(Error::NotFound(expense.id)),
        }
    }

    /// Delete the expense with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if no row was deleted,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, id: ExpenseId) -> Result<(), Error> {
        let rows_affected = self
            .lock()?
            .execute("DELETE FROM expense WHERE id = :id", &[(":id", &id)])?;

        if rows_affected == 0 {
            return Err(Error::NotFound(id));
        }

        tracing::debug!("deleted expense {id}");

        Ok(())
    }
}

impl CreateTable for SQLiteExpenseStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL CHECK (length(description) > 0),
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL,
                date TEXT NOT NULL
            )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_expense_category ON expense(category)",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteExpenseStore {
    type ReturnType = Expense;

    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Expense {
            id: row.get(0)?,
            description: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            date: row.get(4)?,
        })
    }
}
