use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use shopledger_core::DocumentId;
use shopledger_purchasing::{PurchaseOrder, PurchaseOrderDraft, PurchaseOrderLine};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order).delete(delete_order))
        .route("/:id/document", get(get_document))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<dto::CreatePurchaseOrderRequest>,
) -> axum::response::Response {
    let draft = PurchaseOrderDraft {
        supplier_name: body.supplier_name,
        supplier_address: body.supplier_address,
        supplier_state: body.supplier_state,
        lines: body
            .lines
            .into_iter()
            .map(|l| PurchaseOrderLine {
                company: l.company,
                product: l.product,
                quantity: l.quantity,
                unit_cost: l.unit_cost,
            })
            .collect(),
    };

    let order = match PurchaseOrder::create(draft, Utc::now()) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.purchase_orders.insert(owner.owner_id(), &order) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(order)).into_response()
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.purchase_orders.list(owner.owner_id()) {
        Ok(items) => {
            let items: Vec<PurchaseOrder> = items.into_iter().map(|(o, _)| o).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid purchase order id")
        }
    };
    match services.purchase_orders.get(owner.owner_id(), id) {
        Ok(Some((order, _))) => (StatusCode::OK, Json(order)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "purchase order not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid purchase order id")
        }
    };
    match services.purchase_orders.delete(owner.owner_id(), id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "purchase order not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Purchase orders never change after creation, so the printable document is
/// rendered on demand instead of being stored.
pub async fn get_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid purchase order id")
        }
    };

    let order = match services.purchase_orders.get(owner.owner_id(), id) {
        Ok(Some((order, _))) => order,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "purchase order not found")
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let profile = match services.profile_or_default(owner.owner_id()) {
        Ok((p, _)) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let html = shopledger_docgen::render_purchase_order(&profile, &order);
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}
