//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::{service::ExpenseService, stores::ExpenseStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: ExpenseStore,
{
    /// The service that handles the business rules for [expenses](crate::models::Expense).
    pub expense_service: ExpenseService<S>,
}

impl<S> AppState<S>
where
    S: ExpenseStore,
{
    /// Create a new [AppState] that persists expenses to `expense_store`.
    pub fn new(expense_store: S) -> Self {
        Self {
            expense_service: ExpenseService::new(expense_store),
        }
    }
}

// Lets route handlers extract just the service with `State<ExpenseService<S>>`.
impl<S> FromRef<AppState<S>> for ExpenseService<S>
where
    S: ExpenseStore + Clone,
{
    fn from_ref(state: &AppState<S>) -> Self {
        state.expense_service.clone()
    }
}
