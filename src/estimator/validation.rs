//! Input range checks applied before anything reaches the calculators.
//!
//! The calculators trust their inputs. Callers outside the crate go through
//! these checks, which also keep Decimal arithmetic clear of overflow.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::models::{AppSettings, BidDraft, FrozenRates, LineItemInput, TravelInput};
use super::services::EstimateError;

/// Largest accepted amount, hour count or quantity
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Largest accepted profit or markup percentage
pub const MAX_PERCENT: Decimal = dec!(10000);

/// Largest accepted crew size or trip count
pub const MAX_COUNT: u32 = 10_000;

/// Largest number of lines on a single bid
pub const MAX_LINE_ITEMS: usize = 1_000;

/// Smallest accepted sales tax multiplier (0% tax)
pub const MIN_TAX_MULTIPLIER: Decimal = Decimal::ONE;

/// Largest accepted sales tax multiplier (100% tax)
pub const MAX_TAX_MULTIPLIER: Decimal = dec!(2);

/// Collects every failed check so a caller sees all problems at once.
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<String>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount, hours or quantity: 0..=MAX_AMOUNT
    pub fn amount(&mut self, field: &str, value: Decimal) -> &mut Self {
        if value < Decimal::ZERO {
            self.errors.push(format!("{} must not be negative", field));
        } else if value > MAX_AMOUNT {
            self.errors.push(format!("{} must not exceed {}", field, MAX_AMOUNT));
        }
        self
    }

    /// Percentage: 0..=MAX_PERCENT
    pub fn percent(&mut self, field: &str, value: Decimal) -> &mut Self {
        if value < Decimal::ZERO {
            self.errors.push(format!("{} must not be negative", field));
        } else if value > MAX_PERCENT {
            self.errors.push(format!("{} must not exceed {}", field, MAX_PERCENT));
        }
        self
    }

    /// Crew size or trip count: 0..=MAX_COUNT
    pub fn count(&mut self, field: &str, value: u32) -> &mut Self {
        if value > MAX_COUNT {
            self.errors.push(format!("{} must not exceed {}", field, MAX_COUNT));
        }
        self
    }

    pub fn tax_multiplier(&mut self, field: &str, value: Decimal) -> &mut Self {
        if value < MIN_TAX_MULTIPLIER || value > MAX_TAX_MULTIPLIER {
            self.errors.push(format!(
                "{} must be between {} and {}",
                field, MIN_TAX_MULTIPLIER, MAX_TAX_MULTIPLIER
            ));
        }
        self
    }

    pub fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{} must not be empty", field));
        }
        self
    }

    pub fn fail(&mut self, message: String) -> &mut Self {
        self.errors.push(message);
        self
    }

    /// Ok when every check passed, otherwise a validation error listing them
    pub fn finish(&mut self, message: &str) -> Result<(), EstimateError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(EstimateError::Validation {
            message: message.to_string(),
            errors: std::mem::take(&mut self.errors),
        })
    }
}

/// Check business settings before freezing rates from them
pub fn validate_settings(settings: &AppSettings) -> Result<(), EstimateError> {
    let mut checks = Checks::new();
    for (field, value) in settings.fields() {
        match field {
            "profitMaintenance" | "profitProject" => checks.percent(field, value),
            _ => checks.amount(field, value),
        };
    }
    checks.finish("Invalid settings")
}

/// Overhead can blow up when billable capacity is tiny; a saturated rate
/// fails the amount range check
pub fn validate_frozen_rates(rates: &FrozenRates) -> Result<(), EstimateError> {
    Checks::new()
        .amount("laborRate", rates.labor_rate)
        .amount("overheadMaintenance", rates.overhead_maintenance)
        .amount("overheadProject", rates.overhead_project)
        .amount("mileageRate", rates.mileage_rate)
        .finish("Frozen rates out of range")
}

pub fn validate_travel(checks: &mut Checks, travel: &TravelInput) {
    checks
        .amount("travel.driveTimeHrs", travel.drive_time_hrs)
        .amount("travel.milesPerTrip", travel.miles_per_trip)
        .count("travel.numberOfTrips", travel.number_of_trips)
        .count("travel.crewSize", travel.crew_size);
}

pub fn validate_line_item(checks: &mut Checks, index: usize, item: &LineItemInput) {
    match item {
        LineItemInput::Service { service, hours, crew_size } => {
            let hours = hours.unwrap_or(service.estimated_labor_time);
            let crew = crew_size.unwrap_or(service.crew_size);
            checks
                .amount(&format!("lineItems[{}].hours", index), hours)
                .count(&format!("lineItems[{}].crewSize", index), crew)
                .amount(
                    &format!("lineItems[{}].equipmentEmbeddedCosts", index),
                    service.equipment_embedded_costs,
                );
        }
        LineItemInput::Material { material, quantity, unit_cost, markup_percent } => {
            checks
                .amount(&format!("lineItems[{}].quantity", index), *quantity)
                .amount(
                    &format!("lineItems[{}].unitCost", index),
                    unit_cost.unwrap_or(material.default_unit_cost),
                )
                .percent(
                    &format!("lineItems[{}].markupPercent", index),
                    markup_percent.unwrap_or(material.default_markup_percent),
                );
        }
    }
}

/// Check a bid draft before pricing
pub fn validate_draft(draft: &BidDraft) -> Result<(), EstimateError> {
    let mut checks = Checks::new();
    checks
        .non_empty("clientName", &draft.client_name)
        .tax_multiplier("salesTaxMultiplier", draft.sales_tax_multiplier);

    if draft.line_items.len() > MAX_LINE_ITEMS {
        checks.fail(format!(
            "lineItems must not contain more than {} entries",
            MAX_LINE_ITEMS
        ));
    }
    for (index, item) in draft.line_items.iter().enumerate() {
        validate_line_item(&mut checks, index, item);
    }
    if let Some(travel) = &draft.travel {
        validate_travel(&mut checks, travel);
    }

    checks.finish("Invalid bid")
}
