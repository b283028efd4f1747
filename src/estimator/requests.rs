//! Request DTOs for estimator API endpoints.
//!
//! Decimal fields accept JSON numbers or strings.

use rust_decimal::Decimal;
use serde::Deserialize;

use super::models::{AppSettings, BidDraft};
use super::services::EstimateError;
use super::validation::Checks;

/// Request to calculate the overhead rate per billable hour
#[derive(Debug, Deserialize)]
pub struct OverheadRateRequest {
    pub monthly_overhead: Decimal,
    pub working_days: Decimal,
    pub billable_hours_per_day: Decimal,
}

impl OverheadRateRequest {
    /// Divisors are not checked: non-positive ones price overhead at zero
    pub fn validate(&self) -> Result<(), EstimateError> {
        Checks::new()
            .amount("monthly_overhead", self.monthly_overhead)
            .finish("Invalid overhead request")
    }
}

/// Request to calculate a service cost
#[derive(Debug, Deserialize)]
pub struct ServiceCostRequest {
    pub est_hours: Decimal,
    pub crew_size: u32,
    pub labor_rate: Decimal,
    pub overhead_rate: Decimal,
    #[serde(default)]
    pub equipment_cost_per_hour: Decimal,
}

impl ServiceCostRequest {
    pub fn validate(&self) -> Result<(), EstimateError> {
        Checks::new()
            .amount("est_hours", self.est_hours)
            .count("crew_size", self.crew_size)
            .amount("labor_rate", self.labor_rate)
            .amount("overhead_rate", self.overhead_rate)
            .amount("equipment_cost_per_hour", self.equipment_cost_per_hour)
            .finish("Invalid service cost request")
    }
}

/// Request to calculate a material cost
#[derive(Debug, Deserialize)]
pub struct MaterialCostRequest {
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    #[serde(default)]
    pub markup_percent: Decimal,
}

impl MaterialCostRequest {
    pub fn validate(&self) -> Result<(), EstimateError> {
        Checks::new()
            .amount("quantity", self.quantity)
            .amount("unit_cost", self.unit_cost)
            .percent("markup_percent", self.markup_percent)
            .finish("Invalid material cost request")
    }
}

/// Request to calculate travel cost
#[derive(Debug, Deserialize)]
pub struct TravelCostRequest {
    pub drive_time_hrs: Decimal,
    pub miles_per_trip: Decimal,
    pub number_of_trips: u32,
    pub crew_size: u32,
    pub labor_rate: Decimal,
    pub mileage_rate: Decimal,
}

impl TravelCostRequest {
    pub fn validate(&self) -> Result<(), EstimateError> {
        Checks::new()
            .amount("drive_time_hrs", self.drive_time_hrs)
            .amount("miles_per_trip", self.miles_per_trip)
            .count("number_of_trips", self.number_of_trips)
            .count("crew_size", self.crew_size)
            .amount("labor_rate", self.labor_rate)
            .amount("mileage_rate", self.mileage_rate)
            .finish("Invalid travel cost request")
    }
}

/// Request to apply profit, minimum charge and tax
#[derive(Debug, Deserialize)]
pub struct FinalPricingRequest {
    pub pre_profit_subtotal: Decimal,
    pub profit_percentage: Decimal,
    #[serde(default)]
    pub minimum_charge: Decimal,
    #[serde(default = "default_tax_multiplier")]
    pub sales_tax_multiplier: Decimal,
}

fn default_tax_multiplier() -> Decimal {
    Decimal::ONE
}

impl FinalPricingRequest {
    pub fn validate(&self) -> Result<(), EstimateError> {
        Checks::new()
            .amount("pre_profit_subtotal", self.pre_profit_subtotal)
            .percent("profit_percentage", self.profit_percentage)
            .amount("minimum_charge", self.minimum_charge)
            .tax_multiplier("sales_tax_multiplier", self.sales_tax_multiplier)
            .finish("Invalid final pricing request")
    }
}

/// Request to freeze rates. Falls back to the configured settings.
#[derive(Debug, Default, Deserialize)]
pub struct FrozenRatesRequest {
    #[serde(default)]
    pub settings: Option<AppSettings>,
}

/// Request to price a new bid. Falls back to the configured settings.
#[derive(Debug, Deserialize)]
pub struct CreateBidRequest {
    pub bid: BidDraft,
    #[serde(default)]
    pub settings: Option<AppSettings>,
}
