//! Application router configuration.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
    routes::expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint, get_health,
        get_summary_endpoint, list_expenses_endpoint, update_expense_endpoint,
    },
    stores::ExpenseStore,
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: ExpenseStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint::<S>).post(create_expense_endpoint::<S>),
        )
        .route(endpoints::EXPENSE_SUMMARY, get(get_summary_endpoint::<S>))
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint::<S>)
                .put(update_expense_endpoint::<S>)
                .delete(delete_expense_endpoint::<S>),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Wrap `router` with request/response logging and a tracing span per request.
pub fn add_logging_layers(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but errors are logged
        // where they are converted into responses, so disable that.
        .on_failure(());

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(tracing_layer)
}
