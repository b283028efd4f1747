//! Bid assembly.
//!
//! Composes the calculators the way the bid workflow does: settings are
//! frozen into rates, each line is priced, travel is added and final pricing
//! is applied for the job type. Nothing here touches storage; callers load
//! catalog entries and settings and persist the returned [`Bid`].

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::calculators::{
    calculate_final_pricing, calculate_material_cost, calculate_overhead_per_hour,
    calculate_service_cost, calculate_total_travel_cost, round_money,
};
use super::models::{
    AppSettings, Bid, BidDraft, BidStatus, BidTotals, FrozenRates, JobType, LineItemInput,
    LineItemKind, PricedLineItem, TravelInput,
};
use super::validation;

/// Estimating error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("{message}: {}", .errors.join("; "))]
    Validation {
        message: String,
        errors: Vec<String>,
    },
}

/// Capture the rates a new bid is priced with.
///
/// Overhead is spread over each job type's billable hours; labor and mileage
/// rates are taken as configured. An overhead too large to represent
/// saturates and is caught by `validate_frozen_rates`.
pub fn freeze_rates(settings: &AppSettings) -> FrozenRates {
    let overhead = |job_type| {
        calculate_overhead_per_hour(
            settings.monthly_overhead,
            settings.working_days_per_month,
            settings.billable_hours_for(job_type),
        )
    };

    FrozenRates {
        labor_rate: settings.base_labor_rate,
        overhead_maintenance: overhead(JobType::Maintenance),
        overhead_project: overhead(JobType::Project),
        mileage_rate: settings.mileage_rate,
    }
}

/// Price a single bid line against frozen rates.
///
/// Catalog values are used unless the line overrides them.
pub fn price_line_item(
    item: &LineItemInput,
    job_type: JobType,
    rates: &FrozenRates,
) -> PricedLineItem {
    match item {
        LineItemInput::Service {
            service,
            hours,
            crew_size,
        } => {
            let hours = hours.unwrap_or(service.estimated_labor_time);
            let crew_size = crew_size.unwrap_or(service.crew_size);
            let overhead_rate = rates.overhead_for(job_type);
            let cost = calculate_service_cost(
                hours,
                crew_size,
                rates.labor_rate,
                overhead_rate,
                service.equipment_embedded_costs,
            );

            PricedLineItem {
                kind: LineItemKind::Service,
                reference_id: service.id.clone(),
                description: service.service_name.clone(),
                quantity: hours,
                crew_size: Some(crew_size),
                unit_rate: rates.labor_rate + overhead_rate + service.equipment_embedded_costs,
                markup_percent: None,
                cost,
            }
        }
        LineItemInput::Material {
            material,
            quantity,
            unit_cost,
            markup_percent,
        } => {
            let unit_cost = unit_cost.unwrap_or(material.default_unit_cost);
            let markup_percent = markup_percent.unwrap_or(material.default_markup_percent);

            PricedLineItem {
                kind: LineItemKind::Material,
                reference_id: material.id.clone(),
                description: material.material_name.clone(),
                quantity: *quantity,
                crew_size: None,
                unit_rate: unit_cost,
                markup_percent: Some(markup_percent),
                cost: calculate_material_cost(*quantity, unit_cost, markup_percent),
            }
        }
    }
}

/// Travel cost at frozen rates. No travel costs nothing.
pub fn price_travel(travel: Option<&TravelInput>, rates: &FrozenRates) -> Decimal {
    match travel {
        Some(travel) => calculate_total_travel_cost(
            travel.drive_time_hrs,
            travel.miles_per_trip,
            travel.number_of_trips,
            travel.crew_size,
            rates.labor_rate,
            rates.mileage_rate,
        ),
        None => Decimal::ZERO,
    }
}

/// Roll priced lines and travel up into bid totals.
///
/// Profit and minimum charge come from the settings for the job type.
pub fn calculate_bid_totals(
    job_type: JobType,
    line_items: &[PricedLineItem],
    travel: Option<&TravelInput>,
    sales_tax_multiplier: Decimal,
    settings: &AppSettings,
    rates: &FrozenRates,
) -> BidTotals {
    let sum_of = |kind: LineItemKind| {
        round_money(
            line_items
                .iter()
                .filter(|line| line.kind == kind)
                .map(|line| line.cost)
                .sum(),
        )
    };

    let services_total = sum_of(LineItemKind::Service);
    let materials_total = sum_of(LineItemKind::Material);
    let travel_total = price_travel(travel, rates);
    let pre_profit_subtotal = round_money(services_total + materials_total + travel_total);

    let pricing = calculate_final_pricing(
        pre_profit_subtotal,
        settings.profit_for(job_type),
        settings.min_charge_for(job_type),
        sales_tax_multiplier,
    );

    BidTotals {
        services_total,
        materials_total,
        travel_total,
        pre_profit_subtotal,
        subtotal_with_profit: pricing.subtotal_with_profit,
        pre_tax_total: pricing.pre_tax_total,
        sales_tax: pricing.sales_tax,
        grand_total: pricing.grand_total,
    }
}

/// Validate a draft, freeze rates and price it into a new proposed bid.
///
/// # Arguments
/// * `draft` - Client, job type, lines and travel for the bid
/// * `settings` - Current business settings
///
/// # Returns
/// A `Bid` with a fresh id, ready for the persistence layer
pub fn assemble_bid(draft: BidDraft, settings: &AppSettings) -> Result<Bid, EstimateError> {
    validation::validate_settings(settings)?;
    validation::validate_draft(&draft)?;

    let frozen_rates = freeze_rates(settings);
    validation::validate_frozen_rates(&frozen_rates)?;

    let line_items: Vec<PricedLineItem> = draft
        .line_items
        .iter()
        .map(|item| price_line_item(item, draft.job_type, &frozen_rates))
        .collect();

    let totals = calculate_bid_totals(
        draft.job_type,
        &line_items,
        draft.travel.as_ref(),
        draft.sales_tax_multiplier,
        settings,
        &frozen_rates,
    );

    tracing::debug!(
        "Priced {} lines for bid '{}': pre-profit {}, grand total {}",
        line_items.len(),
        draft.bid_id,
        totals.pre_profit_subtotal,
        totals.grand_total
    );

    Ok(Bid {
        id: Uuid::new_v4(),
        bid_id: draft.bid_id,
        client_name: draft.client_name,
        address: draft.address,
        job_type: draft.job_type,
        status: BidStatus::Proposed,
        sales_tax_multiplier: draft.sales_tax_multiplier,
        created_at: Utc::now(),
        frozen_rates,
        line_items,
        travel: draft.travel,
        totals,
    })
}
