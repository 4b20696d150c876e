use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shopledger_core::{DocumentId, ExpectedRevision};
use shopledger_expenses::{Expense, ExpenseDraft};
use shopledger_invoicing::PaymentMethod;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(record_expense).get(list_expenses))
        .route("/:id", get(get_expense).delete(delete_expense))
}

pub async fn record_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<dto::CreateExpenseRequest>,
) -> axum::response::Response {
    let payment_method: PaymentMethod = match body.payment_method.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let draft = ExpenseDraft {
        category: body.category,
        amount: body.amount,
        spent_on: body.spent_on,
        vendor: body.vendor,
        payment_method,
    };

    // A known category accumulates; anything else becomes a new document.
    let existing = match services.expenses.list(owner.owner_id()) {
        Ok(items) => items
            .into_iter()
            .find(|(e, _)| e.matches_category(&draft.category)),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some((mut expense, revision)) = existing {
        if let Err(e) = expense.accumulate(&draft) {
            return errors::domain_error_to_response(e);
        }
        if let Err(e) = services
            .expenses
            .update(owner.owner_id(), &expense, ExpectedRevision::Exact(revision))
        {
            return errors::store_error_to_response(e);
        }
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "expense": expense, "accumulated": true })),
        )
            .into_response();
    }

    let expense = match Expense::create(draft) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.expenses.insert(owner.owner_id(), &expense) {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "expense": expense, "accumulated": false })),
    )
        .into_response()
}

pub async fn list_expenses(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.expenses.list(owner.owner_id()) {
        Ok(items) => {
            let items: Vec<Expense> = items.into_iter().map(|(e, _)| e).collect();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid expense id"),
    };
    match services.expenses.get(owner.owner_id(), id) {
        Ok(Some((expense, _))) => (StatusCode::OK, Json(expense)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "expense not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DocumentId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid expense id"),
    };
    match services.expenses.delete(owner.owner_id(), id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "expense not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
