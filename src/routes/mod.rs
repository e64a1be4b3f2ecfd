//! Route handlers for the REST API.

pub mod expense;
