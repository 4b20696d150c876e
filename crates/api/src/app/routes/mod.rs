use axum::{
    routing::{get, put},
    Router,
};

pub mod expenses;
pub mod invoices;
pub mod products;
pub mod profile;
pub mod purchase_orders;
pub mod reports;
pub mod system;

/// Router for all authenticated (owner-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/profile/logo", put(profile::upload_logo))
        .nest("/products", products::router())
        .nest("/invoices", invoices::router())
        .nest("/purchase-orders", purchase_orders::router())
        .nest("/expenses", expenses::router())
        .nest("/reports", reports::router())
}
