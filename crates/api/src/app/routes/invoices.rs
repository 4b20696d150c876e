use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use shopledger_core::{DocumentId, DomainError, ExpectedRevision};
use shopledger_invoicing::{Invoice, InvoiceDraft, InvoiceLine, PaymentMethod};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route("/:id", get(get_invoice).delete(delete_invoice))
        .route("/:id/delivery", post(toggle_delivery))
        .route("/:id/document", get(get_document))
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<dto::CreateInvoiceRequest>,
) -> axum::response::Response {
    let payment_method: PaymentMethod = match body.payment_method.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Resolve every line against the live product documents before touching
    // stock: any unknown product, zero quantity, or shortfall aborts the
    // whole invoice with nothing decremented.
    let mut lines = Vec::with_capacity(body.lines.len());
    for line in &body.lines {
        let product_id: DocumentId = match line.product_id.parse() {
            Ok(v) => v,
            Err(e) => return errors::domain_error_to_response(e),
        };
        let product = match services.products.get(owner.owner_id(), product_id) {
            Ok(Some((p, _))) => p,
            Ok(None) => {
                return errors::json_error(
                    StatusCode::NOT_FOUND,
                    "not_found",
                    format!("product {product_id} not found"),
                )
            }
            Err(e) => return errors::store_error_to_response(e),
        };
        if line.quantity > product.quantity {
            return errors::domain_error_to_response(DomainError::conflict(format!(
                "insufficient stock for '{}': requested {}, on hand {}",
                product.name, line.quantity, product.quantity
            )));
        }
        lines.push(InvoiceLine {
            product_id,
            product_name: product.name,
            quantity: line.quantity,
            unit_price: product.unit_price,
        });
    }

    let mut invoice = match Invoice::create(
        InvoiceDraft {
            customer_name: body.customer_name,
            customer_address: body.customer_address,
            lines,
            payment_method,
            issued_on: body.issued_on,
        },
        Utc::now(),
    ) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Decrement stock per line. A late failure (a concurrent sale emptied a
    // shelf between the precheck and here) unwinds the lines already taken.
    let mut taken: Vec<(DocumentId, u32)> = Vec::with_capacity(invoice.lines.len());
    for line in &invoice.lines {
        match services
            .stock
            .deduct(owner.owner_id(), line.product_id, line.quantity)
        {
            Ok(_) => taken.push((line.product_id, line.quantity)),
            Err(e) => {
                unwind(&services, owner, &taken);
                return errors::stock_error_to_response(e);
            }
        }
    }

    // Printable document: render, upload, record the retrieval URL. An
    // upload failure abandons the invoice entirely.
    let profile = match services.profile_or_default(owner.owner_id()) {
        Ok((p, _)) => p,
        Err(e) => {
            unwind(&services, owner, &taken);
            return errors::store_error_to_response(e);
        }
    };
    let html = shopledger_docgen::render_invoice(&profile, &invoice);
    let path = format!("{}/invoices/{}.html", owner.owner_id(), invoice.id);
    let url = match services.objects.put(&path, "text/html", html.into_bytes()) {
        Ok(url) => url,
        Err(e) => {
            unwind(&services, owner, &taken);
            return errors::object_error_to_response(e);
        }
    };
    invoice.set_document_url(url);

    if let Err(e) = services.invoices.insert(owner.owner_id(), &invoice) {
        unwind(&services, owner, &taken);
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(invoice)).into_response()
}

/// Put already-deducted quantities back after a failed create.
fn unwind(services: &AppServices, owner: OwnerContext, taken: &[(DocumentId, u32)]) {
    for (product_id, quantity) in taken {
        if let Err(e) = services.stock.replenish(owner.owner_id(), *product_id, *quantity) {
            tracing::error!(%product_id, quantity, error = %e, "failed to restore stock after aborted invoice");
        }
    }
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.invoices.list(owner.owner_id()) {
        Ok(items) => {
            let items: Vec<Invoice> = items.into_iter().map(|(inv, _)| inv).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"),
    };
    match services.invoices.get(owner.owner_id(), id) {
        Ok(Some((invoice, _))) => (StatusCode::OK, Json(invoice)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"),
    };

    let invoice = match services.invoices.get(owner.owner_id(), id) {
        Ok(Some((invoice, _))) => invoice,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    match services.invoices.delete(owner.owner_id(), id) {
        Ok(_) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    // Best-effort removal of the stored printable document.
    if let Some(path) = invoice
        .document_url
        .as_deref()
        .and_then(|url| services.objects.path_of_url(url))
    {
        let _ = services.objects.delete(path);
    }

    StatusCode::NO_CONTENT.into_response()
}

pub async fn toggle_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"),
    };

    let (mut invoice, revision) = match services.invoices.get(owner.owner_id(), id) {
        Ok(Some(v)) => v,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    let delivered = invoice.toggle_delivered();
    if let Err(e) = services
        .invoices
        .update(owner.owner_id(), &invoice, ExpectedRevision::Exact(revision))
    {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "id": id.to_string(), "delivered": delivered })),
    )
        .into_response()
}

pub async fn get_document(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"),
    };

    let invoice = match services.invoices.get(owner.owner_id(), id) {
        Ok(Some((invoice, _))) => invoice,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    serve_stored_document(&services, invoice.document_url.as_deref())
}

/// Resolve a stored retrieval URL and serve the object's bytes.
pub(super) fn serve_stored_document(
    services: &AppServices,
    document_url: Option<&str>,
) -> axum::response::Response {
    let Some(path) = document_url.and_then(|url| services.objects.path_of_url(url)) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "no document stored");
    };

    match services.objects.get(path) {
        Ok(Some(object)) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, object.content_type)],
            object.bytes,
        )
            .into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "document not stored"),
        Err(e) => errors::object_error_to_response(e),
    }
}
