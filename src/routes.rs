use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        ecommerce::{commerce_handler, storefront_handler},
        fields::fields_handler,
        jobs::jobs_handler,
        offers::offers_handler,
        orgs::{operators_handler, orgs_handler},
        quotes::quotes_handler,
        rates::rate_cards_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Product browsing stays public; cart, checkout and orders need a token
    let ecommerce_routes = Router::new()
        .merge(storefront_handler())
        .merge(commerce_handler().layer(middleware::from_fn(auth)));

    let api_route = Router::new()
        .nest("/orgs", orgs_handler().layer(middleware::from_fn(auth)))
        .nest("/operators", operators_handler().layer(middleware::from_fn(auth)))
        .nest("/fields", fields_handler().layer(middleware::from_fn(auth)))
        .nest("/quotes", quotes_handler().layer(middleware::from_fn(auth)))
        .nest("/rate-cards", rate_cards_handler().layer(middleware::from_fn(auth)))
        .nest("/jobs", jobs_handler().layer(middleware::from_fn(auth)))
        .nest("/offers", offers_handler().layer(middleware::from_fn(auth)))
        .nest("/ecommerce", ecommerce_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
