use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;

use shopledger_invoicing::{Invoice, PaymentMethod};
use shopledger_reports::{filter_invoices, summarize, SalesFilter};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new().route("/sales", get(sales_report))
}

pub async fn sales_report(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<dto::SalesReportQuery>,
) -> axum::response::Response {
    let from = match parse_date(query.from.as_deref(), "from") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let to = match parse_date(query.to.as_deref(), "to") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let payment_method = match &query.payment_method {
        Some(raw) if !raw.trim().is_empty() => match raw.parse::<PaymentMethod>() {
            Ok(v) => Some(v),
            Err(e) => return errors::domain_error_to_response(e),
        },
        _ => None,
    };

    let filter = SalesFilter {
        from,
        to,
        payment_method,
        query: query.q,
    };

    let invoices: Vec<Invoice> = match services.invoices.list(owner.owner_id()) {
        Ok(items) => items.into_iter().map(|(inv, _)| inv).collect(),
        Err(e) => return errors::store_error_to_response(e),
    };

    let matched = filter_invoices(&invoices, &filter);
    let summary = summarize(&matched);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "invoices": matched,
            "summary": summary,
        })),
    )
        .into_response()
}

/// `YYYY-MM-DD` or absent; anything else is a 400.
fn parse_date(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, axum::response::Response> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.parse::<NaiveDate>().map(Some).map_err(|_| {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("{field} must be an ISO date (YYYY-MM-DD)"),
            )
        }),
    }
}
