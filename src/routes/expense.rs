//! This file defines the route handlers for the expense resource.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{
        Category, EARLIEST_DATE, Expense, ExpenseId, LATEST_DATE, NewExpense, check_date,
    },
    service::{CategorySummary, ExpenseService},
    stores::ExpenseStore,
};

/// The text returned by the health check.
pub const HEALTH_MESSAGE: &str = "Application is running";

/// The JSON body for creating or updating an expense.
///
/// Every field is required. An `id` field in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub description: String,
    /// How much was spent, must be greater than zero.
    pub amount: f64,
    /// The category of the expense.
    pub category: Category,
    /// When the money was spent, e.g. "2025-01-31".
    pub date: Date,
}

impl ExpenseForm {
    /// Check the form and convert it into the fields for an expense.
    ///
    /// # Errors
    /// Returns [Error::InvalidInput] if the fields do not pass [NewExpense::new].
    pub fn validate(self) -> Result<NewExpense, Error> {
        NewExpense::new(&self.description, self.amount, self.category, self.date)
    }
}

/// Optional filters for listing expenses.
#[derive(Debug, Deserialize)]
pub struct ExpenseFilter {
    /// Only include expenses in this category.
    pub category: Option<Category>,
    /// Only include expenses on or after this date.
    pub from: Option<Date>,
    /// Only include expenses on or before this date.
    pub to: Option<Date>,
}

/// A route handler for creating a new expense, responds with the stored expense.
pub async fn create_expense_endpoint<S>(
    State(service): State<ExpenseService<S>>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), Error>
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let Json(form) = form?;
    let fields = form.validate().inspect_err(|error| {
        tracing::debug!("rejected expense: {error}");
    })?;

    let expense = service.create(fields)?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// A route handler for listing expenses, optionally filtered by category and date range.
pub async fn list_expenses_endpoint<S>(
    State(service): State<ExpenseService<S>>,
    filter: Result<Query<ExpenseFilter>, QueryRejection>,
) -> Result<Json<Vec<Expense>>, Error>
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let Query(filter) = filter?;

    let expenses = match filter {
        ExpenseFilter {
            category: None,
            from: None,
            to: None,
        } => service.list()?,
        ExpenseFilter {
            category: Some(category),
            from: None,
            to: None,
        } => service.list_by_category(category)?,
        ExpenseFilter { category, from, to } => {
            let from = from.map(check_date).transpose()?.unwrap_or(EARLIEST_DATE);
            let to = to.map(check_date).transpose()?.unwrap_or(LATEST_DATE);
            let date_range = from..=to;
            let expenses = service.list_in_date_range(date_range)?;

            match category {
                Some(category) => expenses
                    .into_iter()
                    .filter(|expense| expense.category == category)
                    .collect(),
                None => expenses,
            }
        }
    };

    Ok(Json(expenses))
}

/// A route handler for getting an expense by its ID.
///
/// Responds with 404 if there is no expense with the ID.
pub async fn get_expense_endpoint<S>(
    State(service): State<ExpenseService<S>>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<Json<Expense>, Error>
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let Path(expense_id) = expense_id?;

    service
        .get_by_id(expense_id)?
        .map(Json)
        .ok_or(Error::NotFound(expense_id))
}

/// A route handler for replacing the fields of an expense.
///
/// Responds with 404 if there is no expense with the ID.
pub async fn update_expense_endpoint<S>(
    State(service): State<ExpenseService<S>>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Json<Expense>, Error>
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let Path(expense_id) = expense_id?;
    let Json(form) = form?;
    let fields = form.validate()?;

    let expense = service.update(expense_id, fields).inspect_err(|error| {
        tracing::debug!("could not update expense {expense_id}: {error}");
    })?;

    Ok(Json(expense))
}

/// A route handler for deleting an expense, responds with 204 No Content.
///
/// Responds with 404 if there is no expense with the ID.
pub async fn delete_expense_endpoint<S>(
    State(service): State<ExpenseService<S>>,
    expense_id: Result<Path<ExpenseId>, PathRejection>,
) -> Result<StatusCode, Error>
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    let Path(expense_id) = expense_id?;

    service.delete(expense_id)?;

    Ok(StatusCode::NO_CONTENT)
}

/// A route handler for the total amount spent in each category.
pub async fn get_summary_endpoint<S>(
    State(service): State<ExpenseService<S>>,
) -> Result<Json<CategorySummary>, Error>
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    Ok(Json(service.summary_by_category()?))
}

/// A route handler for checking that the server is up.
pub async fn get_health() -> &'static str {
    HEALTH_MESSAGE
}

#[cfg(test)]
mod expense_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        endpoints::{self, format_endpoint},
        models::{Category, Expense, MAX_AMOUNT},
        service::CategorySummary,
        test_utils::get_test_server,
    };

    use super::{ExpenseForm, HEALTH_MESSAGE};

    fn form(description: &str, amount: f64, category: Category) -> ExpenseForm {
        ExpenseForm {
            description: description.to_owned(),
            amount,
            category,
            date: OffsetDateTime::now_utc().date(),
        }
    }

    async fn create(server: &TestServer, form: &ExpenseForm) -> Expense {
        let response = server.post(endpoints::EXPENSES).json(form).await;
        response.assert_status(StatusCode::CREATED);

        response.json::<Expense>()
    }

    async fn list(server: &TestServer) -> Vec<Expense> {
        let response = server.get(endpoints::EXPENSES).await;
        response.assert_status_ok();

        response.json::<Vec<Expense>>()
    }

    #[tokio::test]
    async fn health_check_returns_200() {
        let server = get_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_text(HEALTH_MESSAGE);
    }

    #[tokio::test]
    async fn create_with_valid_data_returns_201() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&form("Test Expense", 100.0, Category::Food))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert!(body["id"].is_i64());
        assert_eq!(body["description"], "Test Expense");
        assert_eq!(body["amount"], 100.0);
        assert_eq!(body["category"], "FOOD");
    }

    #[tokio::test]
    async fn create_with_missing_fields_returns_400() {
        let server = get_test_server();

        let response = server.post(endpoints::EXPENSES).json(&json!({})).await;

        response.assert_status_bad_request();
        assert!(list(&server).await.is_empty());
    }

    #[tokio::test]
    async fn create_with_negative_amount_returns_400() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&form("Invalid", -50.0, Category::Food))
            .await;

        response.assert_status_bad_request();
        assert!(list(&server).await.is_empty());
    }

    #[tokio::test]
    async fn create_with_empty_description_returns_400() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&form("", 5.0, Category::Food))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn create_with_unknown_category_returns_400() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "description": "Yacht",
                "amount": 1000000.0,
                "category": "LUXURY",
                "date": "2025-01-01",
            }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn create_ignores_id_in_body() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "id": 999,
                "description": "Lunch",
                "amount": 12.0,
                "category": "FOOD",
                "date": "2025-01-01",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_ne!(response.json::<Expense>().id, 999);
    }

    #[tokio::test]
    async fn list_returns_created_expenses() {
        let server = get_test_server();
        let created = create(&server, &form("Test", 50.0, Category::Food)).await;

        let expenses = list(&server).await;

        assert_eq!(expenses, vec![created]);
    }

    #[tokio::test]
    async fn list_when_empty_returns_empty_array() {
        let server = get_test_server();

        let response = server.get(endpoints::EXPENSES).await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn list_filters_by_category() {
        let server = get_test_server();
        let lunch = create(&server, &form("Lunch", 50.0, Category::Food)).await;
        create(&server, &form("Bus", 20.0, Category::Transport)).await;

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("category", "FOOD")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Expense>>(), vec![lunch]);
    }

    #[tokio::test]
    async fn list_filters_by_date_range() {
        let server = get_test_server();
        let mut january = form("Rent", 500.0, Category::Utilities);
        january.date = date!(2025 - 01 - 15);
        let mut february = form("Rent", 500.0, Category::Utilities);
        february.date = date!(2025 - 02 - 15);
        create(&server, &january).await;
        let february = create(&server, &february).await;

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("from", "2025-02-01")
            .add_query_param("to", "2025-02-28")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Expense>>(), vec![february]);
    }

    #[tokio::test]
    async fn list_filters_by_open_ended_range_and_category() {
        let server = get_test_server();
        let mut old_lunch = form("Lunch", 10.0, Category::Food);
        old_lunch.date = date!(2020 - 01 - 01);
        let mut new_lunch = form("Lunch", 11.0, Category::Food);
        new_lunch.date = date!(2025 - 01 - 01);
        let mut new_bus = form("Bus", 3.0, Category::Transport);
        new_bus.date = date!(2025 - 01 - 01);
        create(&server, &old_lunch).await;
        let new_lunch = create(&server, &new_lunch).await;
        create(&server, &new_bus).await;

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("from", "2024-01-01")
            .add_query_param("category", "FOOD")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Expense>>(), vec![new_lunch]);
    }

    #[tokio::test]
    async fn list_with_malformed_filter_returns_400() {
        let server = get_test_server();

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("from", "last tuesday")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn create_with_date_before_year_zero_returns_400() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "description": "Ancient",
                "amount": 10.0,
                "category": "OTHER",
                "date": "-0001-06-01",
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(list(&server).await, vec![]);
    }

    #[tokio::test]
    async fn list_with_filter_before_year_zero_returns_400() {
        let server = get_test_server();

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("from", "-0005-01-01")
            .add_query_param("to", "-0001-12-31")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn list_with_open_start_includes_earliest_date() {
        let server = get_test_server();
        let mut oldest = form("Oldest", 5.0, Category::Other);
        oldest.date = date!(0000 - 01 - 01);
        let oldest = create(&server, &oldest).await;

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("to", "2025-01-01")
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Expense>>(), vec![oldest]);
    }

    #[tokio::test]
    async fn create_with_amount_over_max_returns_400() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&form("Huge", 1.0e308, Category::Food))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn summary_of_max_amounts_is_a_number() {
        let server = get_test_server();
        for _ in 0..2 {
            create(&server, &form("House", MAX_AMOUNT, Category::Food)).await;
        }

        let response = server.get(endpoints::EXPENSE_SUMMARY).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!({ "FOOD": 2.0 * MAX_AMOUNT }));
    }

    #[tokio::test]
    async fn get_existing_returns_200() {
        let server = get_test_server();
        let created = create(&server, &form("Test", 50.0, Category::Food)).await;

        let response = server
            .get(&format_endpoint(endpoints::EXPENSE, created.id))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Expense>(), created);
    }

    #[tokio::test]
    async fn get_missing_returns_404() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::EXPENSE, 999)).await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn get_with_non_numeric_id_returns_400() {
        let server = get_test_server();

        let response = server.get("/api/expenses/abc").await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn update_existing_returns_200() {
        let server = get_test_server();
        let created = create(&server, &form("Original", 50.0, Category::Food)).await;

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, created.id))
            .json(&form("Updated", 75.0, Category::Food))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Expense>();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "Updated");
        assert_eq!(updated.amount, 75.0);

        let got = server
            .get(&format_endpoint(endpoints::EXPENSE, created.id))
            .await
            .json::<Expense>();
        assert_eq!(got, updated);
    }

    #[tokio::test]
    async fn update_missing_returns_404() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, 999))
            .json(&form("Test", 50.0, Category::Food))
            .await;

        response.assert_status_not_found();
        assert!(list(&server).await.is_empty());
    }

    #[tokio::test]
    async fn update_with_invalid_amount_returns_400_and_keeps_expense() {
        let server = get_test_server();
        let created = create(&server, &form("Original", 50.0, Category::Food)).await;

        let response = server
            .put(&format_endpoint(endpoints::EXPENSE, created.id))
            .json(&form("Updated", 0.0, Category::Food))
            .await;

        response.assert_status_bad_request();
        assert_eq!(list(&server).await, vec![created]);
    }

    #[tokio::test]
    async fn delete_existing_returns_204() {
        let server = get_test_server();
        let created = create(&server, &form("Test", 50.0, Category::Food)).await;

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, created.id))
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format_endpoint(endpoints::EXPENSE, created.id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_returns_404() {
        let server = get_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::EXPENSE, 999))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn summary_returns_totals_per_category() {
        let server = get_test_server();
        create(&server, &form("Lunch", 50.0, Category::Food)).await;
        create(&server, &form("Bus", 20.0, Category::Transport)).await;

        let response = server.get(endpoints::EXPENSE_SUMMARY).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "FOOD": 50.0, "TRANSPORT": 20.0 }));
        assert_eq!(
            response.json::<CategorySummary>(),
            CategorySummary::from([(Category::Food, 50.0), (Category::Transport, 20.0)])
        );
    }

    #[tokio::test]
    async fn summary_when_empty_returns_empty_object() {
        let server = get_test_server();

        let response = server.get(endpoints::EXPENSE_SUMMARY).await;

        response.assert_status_ok();
        response.assert_json(&json!({}));
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let server = get_test_server();

        let response = server.get("/api/nothing/here").await;

        response.assert_status_not_found();
    }
}
