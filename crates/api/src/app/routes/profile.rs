use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use shopledger_core::{ExpectedRevision, OwnerId, Revision};
use shopledger_infra::StoreError;
use shopledger_profile::ShopProfile;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::OwnerContext;

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    match services.profile_or_default(owner.owner_id()) {
        Ok((profile, _)) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Json(body): Json<dto::UpdateProfileRequest>,
) -> axum::response::Response {
    let (mut profile, revision) = match services.profile_or_default(owner.owner_id()) {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = profile.apply(body.into_update(), Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    if let Err(e) = save_profile(&services, owner.owner_id(), &profile, revision) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(profile)).into_response()
}

pub async fn upload_logo(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    if body.is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "logo body is empty");
    }

    let content_type = headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let path = format!("{}/logo", owner.owner_id());
    let url = match services.objects.put(&path, &content_type, body.to_vec()) {
        Ok(url) => url,
        Err(e) => return errors::object_error_to_response(e),
    };

    let (mut profile, revision) = match services.profile_or_default(owner.owner_id()) {
        Ok(v) => v,
        Err(e) => return errors::store_error_to_response(e),
    };
    profile.set_logo_url(&url, Utc::now());

    if let Err(e) = save_profile(&services, owner.owner_id(), &profile, revision) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::OK, Json(serde_json::json!({ "logo_url": url }))).into_response()
}

/// Insert on first save, revision-checked update afterwards.
fn save_profile(
    services: &AppServices,
    owner_id: OwnerId,
    profile: &ShopProfile,
    revision: Option<Revision>,
) -> Result<Revision, StoreError> {
    match revision {
        None => services.profiles.insert(owner_id, profile),
        Some(rev) => services
            .profiles
            .update(owner_id, profile, ExpectedRevision::Exact(rev)),
    }
}
