use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    axum::extract::Extension(owner): axum::extract::Extension<crate::context::OwnerContext>,
    axum::extract::Extension(principal): axum::extract::Extension<crate::context::PrincipalContext>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "owner_id": owner.owner_id().to_string(),
        "principal_id": principal.principal_id().to_string(),
    }))
}
