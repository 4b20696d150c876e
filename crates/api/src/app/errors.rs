use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopledger_core::DomainError;
use shopledger_infra::{ObjectStoreError, StockError, StoreError};

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::AlreadyExists(id) => json_error(
            StatusCode::CONFLICT,
            "conflict",
            format!("document already exists: {id}"),
        ),
        StoreError::RevisionConflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Serialization(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "serialize_error", msg)
        }
        StoreError::Backend(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg),
    }
}

pub fn object_error_to_response(err: ObjectStoreError) -> axum::response::Response {
    match err {
        ObjectStoreError::Upload(msg) => json_error(StatusCode::BAD_GATEWAY, "upload_error", msg),
        ObjectStoreError::Backend(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "object_store_error", msg)
        }
    }
}

pub fn stock_error_to_response(err: StockError) -> axum::response::Response {
    match err {
        StockError::Domain(e) => domain_error_to_response(e),
        StockError::Store(e) => store_error_to_response(e),
        StockError::Contended(id) => json_error(
            StatusCode::CONFLICT,
            "conflict",
            format!("stock adjustment for product {id} did not settle"),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
