//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::ExpenseId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested expense does not exist.
    ///
    /// Carries the ID that was looked up. For HTTP request handlers, the client
    /// should check that the ID is correct and that the expense has not been deleted.
    #[error("could not find an expense with the ID {0}")]
    NotFound(ExpenseId),

    /// The client sent data that does not describe a valid expense, e.g. a
    /// non-positive amount, an empty description or an unknown category.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The request body was larger than the given number of bytes, or could
    /// not be read.
    #[error("the request body must be at most {0} bytes")]
    RequestBodyTooLarge(usize),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 275 occurs when a CHECK constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 275 =>
            {
                Error::InvalidInput(desc.to_owned())
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidInput(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code that represents this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::RequestBodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Unexpected errors are logged where they are created and are not shown to the client.
        let message = match &self {
            Error::NotFound(_) | Error::InvalidInput(_) | Error::RequestBodyTooLarge(_) => {
                self.to_string()
            }
            Error::SqlError(_) | Error::DatabaseLockError => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
