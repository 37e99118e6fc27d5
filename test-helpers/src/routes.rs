//! Routes of the mock dashboard backend.
//!
//! List endpoints understand `limit`, `offset` and `ordering` (a field name,
//! `-` prefixed for descending) the way the real backend does, plus a few
//! per-resource filters. Any endpoint also accepts `delay_ms`, which holds
//! the response back so tests can reorder concurrent requests.

use std::{cmp::Ordering, collections::HashMap, str::FromStr, time::Duration};

use actix_web::{
    HttpResponse, Responder, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, http::StatusCode, web,
};
use payloads::{
    Paginated,
    responses::{
        AgedReceivable, ClientPortfolio, ImplantationSuivi, ZoneOccupation,
    },
};
use serde::Serialize;
use serde_json::json;

use crate::MockState;

type Params = web::Query<HashMap<String, String>>;

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/api")
        .service(health_check)
        .service(implantation_suivi)
        .service(zone_occupation)
        .service(client_portfolio)
        .service(aged_receivables)
        .service(financial_summary)
        .service(failing)
        .service(malformed)
}

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Injected failure ({0})")]
    Injected(StatusCode, serde_json::Value),
}

impl ResponseError for MockError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(detail) => {
                HttpResponse::BadRequest().json(json!({ "detail": detail }))
            }
            Self::Injected(status, body) => {
                HttpResponse::build(*status).json(body)
            }
        }
    }
}

#[get("/health_check")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("healthy")
}

#[tracing::instrument(skip(state))]
#[get("/implantation-suivi/")]
pub async fn implantation_suivi(
    state: web::Data<MockState>,
    params: Params,
) -> Result<HttpResponse, MockError> {
    prepare(&state, &params).await?;

    let mut rows = state.dataset.implantations.clone();
    if let Some(zone_id) = param::<i64>(&params, "zone_id")? {
        rows.retain(|row| row.zone_id.0 == zone_id);
    }
    if let Some(client_id) = param::<i64>(&params, "client_id")? {
        rows.retain(|row| row.client_id.0 == client_id);
    }
    if let Some(client) = params.get("client") {
        let needle = client.to_lowercase();
        rows.retain(|row| row.client.to_lowercase().contains(&needle));
    }
    order_by(&mut rows, &params, compare_implantations);
    page(rows, &params)
}

#[tracing::instrument(skip(state))]
#[get("/kpi/zone-occupation/")]
pub async fn zone_occupation(
    state: web::Data<MockState>,
    params: Params,
) -> Result<HttpResponse, MockError> {
    prepare(&state, &params).await?;

    let mut rows = state.dataset.zones.clone();
    if let Some(zone_id) = param::<i64>(&params, "zone_id")? {
        rows.retain(|row| row.zone_id.0 == zone_id);
    }
    order_by(&mut rows, &params, compare_zones);
    page(rows, &params)
}

#[tracing::instrument(skip(state))]
#[get("/kpi/client-portfolio/")]
pub async fn client_portfolio(
    state: web::Data<MockState>,
    params: Params,
) -> Result<HttpResponse, MockError> {
    prepare(&state, &params).await?;

    let mut rows = state.dataset.portfolio.clone();
    if let Some(sector) = params.get("sector") {
        rows.retain(|row| row.sector.as_deref() == Some(sector.as_str()));
    }
    order_by(&mut rows, &params, compare_portfolio);
    page(rows, &params)
}

#[tracing::instrument(skip(state))]
#[get("/kpi/aged-receivables/")]
pub async fn aged_receivables(
    state: web::Data<MockState>,
    params: Params,
) -> Result<HttpResponse, MockError> {
    prepare(&state, &params).await?;

    let mut rows = state.dataset.receivables.clone();
    order_by(&mut rows, &params, compare_receivables);
    page(rows, &params)
}

/// Not paginated: a bare array of yearly figures.
#[tracing::instrument(skip(state))]
#[get("/kpi/financial-summary/")]
pub async fn financial_summary(
    state: web::Data<MockState>,
    params: Params,
) -> Result<HttpResponse, MockError> {
    prepare(&state, &params).await?;
    Ok(HttpResponse::Ok().json(&state.dataset.financials))
}

/// Always answers 500 with a DRF-style error body.
#[get("/failing/")]
pub async fn failing(
    state: web::Data<MockState>,
    params: Params,
) -> Result<HttpResponse, MockError> {
    prepare(&state, &params).await?;
    Ok(HttpResponse::InternalServerError()
        .json(json!({ "detail": "server error" })))
}

/// Answers 200 with a body that is not JSON.
#[get("/malformed/")]
pub async fn malformed() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html")
        .body("<html>maintenance</html>")
}

/// Apply the requested delay, then any failure injected by the test.
async fn prepare(state: &MockState, params: &Params) -> Result<(), MockError> {
    if let Some(delay) = param::<u64>(params, "delay_ms")? {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    match state.failure() {
        Some((status, body)) => Err(MockError::Injected(status, body)),
        None => Ok(()),
    }
}

fn param<T: FromStr>(
    params: &Params,
    key: &str,
) -> Result<Option<T>, MockError> {
    params
        .get(key)
        .map(|value| {
            value.parse().map_err(|_| {
                MockError::BadRequest(format!(
                    "{key}: A valid integer is required."
                ))
            })
        })
        .transpose()
}

/// Sort `rows` by the `ordering` parameter. Unknown fields compare equal, so
/// the original order is kept.
fn order_by<T>(
    rows: &mut [T],
    params: &Params,
    compare: fn(&T, &T, &str) -> Option<Ordering>,
) {
    let Some(ordering) = params.get("ordering") else {
        return;
    };
    let (field, descending) = match ordering.strip_prefix('-') {
        Some(field) => (field, true),
        None => (ordering.as_str(), false),
    };
    rows.sort_by(|a, b| {
        let order = compare(a, b, field).unwrap_or(Ordering::Equal);
        if descending { order.reverse() } else { order }
    });
}

fn page<T: Serialize>(
    rows: Vec<T>,
    params: &Params,
) -> Result<HttpResponse, MockError> {
    let count = rows.len() as u64;
    let offset = param::<usize>(params, "offset")?.unwrap_or(0);
    let limit = param::<usize>(params, "limit")?.unwrap_or(usize::MAX);
    let results: Vec<T> = rows.into_iter().skip(offset).take(limit).collect();
    Ok(HttpResponse::Ok().json(Paginated { results, count }))
}

fn compare_implantations(
    a: &ImplantationSuivi,
    b: &ImplantationSuivi,
    field: &str,
) -> Option<Ordering> {
    Some(match field {
        "id" => a.id.cmp(&b.id),
        "zone" => a.zone.cmp(&b.zone),
        "zone_id" => a.zone_id.cmp(&b.zone_id),
        "client" => a.client.cmp(&b.client),
        "client_id" => a.client_id.cmp(&b.client_id),
        "surface_m2" => a.surface_m2.cmp(&b.surface_m2),
        "occupation_rate" => a.occupation_rate.cmp(&b.occupation_rate),
        "start_date" => a.start_date.cmp(&b.start_date),
        _ => return None,
    })
}

fn compare_zones(
    a: &ZoneOccupation,
    b: &ZoneOccupation,
    field: &str,
) -> Option<Ordering> {
    Some(match field {
        "zone" => a.zone.cmp(&b.zone),
        "zone_id" => a.zone_id.cmp(&b.zone_id),
        "total_surface" => a.total_surface.cmp(&b.total_surface),
        "occupied_surface" => a.occupied_surface.cmp(&b.occupied_surface),
        "occupation_rate" => a.occupation_rate.cmp(&b.occupation_rate),
        _ => return None,
    })
}

fn compare_portfolio(
    a: &ClientPortfolio,
    b: &ClientPortfolio,
    field: &str,
) -> Option<Ordering> {
    Some(match field {
        "client" => a.client.cmp(&b.client),
        "sector" => a.sector.cmp(&b.sector),
        "contract_count" => a.contract_count.cmp(&b.contract_count),
        "annual_revenue" => a.annual_revenue.cmp(&b.annual_revenue),
        _ => return None,
    })
}

fn compare_receivables(
    a: &AgedReceivable,
    b: &AgedReceivable,
    field: &str,
) -> Option<Ordering> {
    Some(match field {
        "client" => a.client.cmp(&b.client),
        "current" => a.current.cmp(&b.current),
        "days_30" => a.days_30.cmp(&b.days_30),
        "days_60" => a.days_60.cmp(&b.days_60),
        "days_90_plus" => a.days_90_plus.cmp(&b.days_90_plus),
        "total" => a.total().cmp(&b.total()),
        _ => return None,
    })
}
