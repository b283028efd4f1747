//! Estimator API route handlers.
//!
//! JSON wrappers around the calculators and bid assembly. Every request is
//! range-checked before it reaches the math.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::{
    calculate_final_pricing, calculate_material_cost, calculate_overhead_per_hour,
    calculate_service_cost, calculate_total_travel_cost,
};
use super::models::{AppSettings, Bid, FrozenRates};
use super::requests::{
    CreateBidRequest, FinalPricingRequest, FrozenRatesRequest, MaterialCostRequest,
    OverheadRateRequest, ServiceCostRequest, TravelCostRequest,
};
use super::responses::{AmountResponse, FinalPricingResponse};
use super::{services, validation};

/// Estimator routes, mounted under `/api/estimator`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overhead-rate", post(overhead_rate))
        .route("/service-cost", post(service_cost))
        .route("/material-cost", post(material_cost))
        .route("/travel-cost", post(travel_cost))
        .route("/final-pricing", post(final_pricing))
        .route("/frozen-rates", post(frozen_rates))
        .route("/bids", post(create_bid))
        .route("/settings", get(current_settings))
}

/// Inline settings win over the configured default
fn resolve_settings(state: &AppState, inline: Option<AppSettings>) -> Result<AppSettings> {
    match inline {
        Some(settings) => Ok(settings),
        None => state
            .settings
            .as_deref()
            .cloned()
            .ok_or(AppError::SettingsNotConfigured),
    }
}

async fn overhead_rate(
    payload: std::result::Result<Json<OverheadRateRequest>, JsonRejection>,
) -> Result<Json<AmountResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let amount = calculate_overhead_per_hour(
        req.monthly_overhead,
        req.working_days,
        req.billable_hours_per_day,
    );
    Ok(Json(amount.into()))
}

async fn service_cost(
    payload: std::result::Result<Json<ServiceCostRequest>, JsonRejection>,
) -> Result<Json<AmountResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let amount = calculate_service_cost(
        req.est_hours,
        req.crew_size,
        req.labor_rate,
        req.overhead_rate,
        req.equipment_cost_per_hour,
    );
    Ok(Json(amount.into()))
}

async fn material_cost(
    payload: std::result::Result<Json<MaterialCostRequest>, JsonRejection>,
) -> Result<Json<AmountResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let amount = calculate_material_cost(req.quantity, req.unit_cost, req.markup_percent);
    Ok(Json(amount.into()))
}

async fn travel_cost(
    payload: std::result::Result<Json<TravelCostRequest>, JsonRejection>,
) -> Result<Json<AmountResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let amount = calculate_total_travel_cost(
        req.drive_time_hrs,
        req.miles_per_trip,
        req.number_of_trips,
        req.crew_size,
        req.labor_rate,
        req.mileage_rate,
    );
    Ok(Json(amount.into()))
}

async fn final_pricing(
    payload: std::result::Result<Json<FinalPricingRequest>, JsonRejection>,
) -> Result<Json<FinalPricingResponse>> {
    let Json(req) = payload?;
    req.validate()?;

    let pricing = calculate_final_pricing(
        req.pre_profit_subtotal,
        req.profit_percentage,
        req.minimum_charge,
        req.sales_tax_multiplier,
    );
    Ok(Json(pricing.into()))
}

async fn frozen_rates(
    State(state): State<AppState>,
    payload: std::result::Result<Json<FrozenRatesRequest>, JsonRejection>,
) -> Result<Json<FrozenRates>> {
    let Json(req) = payload?;
    let settings = resolve_settings(&state, req.settings)?;
    validation::validate_settings(&settings)?;

    let rates = services::freeze_rates(&settings);
    validation::validate_frozen_rates(&rates)?;
    Ok(Json(rates))
}

async fn create_bid(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateBidRequest>, JsonRejection>,
) -> Result<Json<Bid>> {
    let Json(req) = payload?;
    let settings = resolve_settings(&state, req.settings)?;

    let bid = services::assemble_bid(req.bid, &settings)?;
    tracing::info!(
        "Priced bid '{}' ({:?}) for {}: grand total {}",
        bid.bid_id,
        bid.job_type,
        bid.client_name,
        bid.totals.grand_total
    );
    Ok(Json(bid))
}

async fn current_settings(State(state): State<AppState>) -> Result<Json<AppSettings>> {
    state
        .settings
        .as_deref()
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("settings".to_string()))
}
