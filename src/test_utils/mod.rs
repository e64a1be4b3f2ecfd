#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    build_router,
    stores::sqlite::{SQLAppState, create_app_state},
};

/// An app state backed by a fresh in-memory SQLite database.
#[track_caller]
pub(crate) fn get_test_state() -> SQLAppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    create_app_state(connection).expect("Could not create app state.")
}

/// A test server for the full router backed by a fresh in-memory SQLite database.
#[track_caller]
pub(crate) fn get_test_server() -> TestServer {
    TestServer::new(build_router(get_test_state())).expect("Could not create test server.")
}
