use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use shopledger_catalog::{Product, ProductDraft, ProductUpdate};
use shopledger_core::DocumentId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::OwnerContext;

/// Fixed page size of the inventory table.
const PAGE_SIZE: usize = 5;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_or_restock).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_or_restock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let draft = ProductDraft {
        company: body.company,
        name: body.name,
        unit_price: body.unit_price,
        quantity: body.quantity,
        description: body.description,
    };

    // Re-submitting a known (company, name) pair is quantity-additive.
    let existing = match services.products.list(owner.owner_id()) {
        Ok(items) => items
            .into_iter()
            .find(|(p, _)| p.matches(&draft.company, &draft.name)),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some((product, _)) = existing {
        let restocked = match services.stock.adjust(owner.owner_id(), product.id, |p| {
            p.restock(&draft, Utc::now())
        }) {
            Ok(p) => p,
            Err(e) => return errors::stock_error_to_response(e),
        };
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "product": restocked, "restocked": true })),
        )
            .into_response();
    }

    let product = match Product::create(draft, Utc::now()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.products.insert(owner.owner_id(), &product) {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "product": product, "restocked": false })),
    )
        .into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<dto::ProductsPageQuery>,
) -> axum::response::Response {
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "page numbers start at 1",
        );
    }

    let items = match services.products.list(owner.owner_id()) {
        Ok(items) => items,
        Err(e) => return errors::store_error_to_response(e),
    };

    let total = items.len();
    let page_count = total.div_ceil(PAGE_SIZE);
    let page_items: Vec<Product> = items
        .into_iter()
        .map(|(p, _)| p)
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "items": page_items,
            "total": total,
            "page": page,
            "page_count": page_count,
            "page_size": PAGE_SIZE,
        })),
    )
        .into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };
    match services.products.get(owner.owner_id(), id) {
        Ok(Some((product, _))) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    let update = ProductUpdate {
        unit_price: body.unit_price,
        quantity: body.quantity,
        description: body.description,
    };

    match services
        .stock
        .adjust(owner.owner_id(), id, move |p| {
            p.edit(update.clone());
            Ok(())
        }) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::stock_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };
    match services.products.delete(owner.owner_id(), id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
