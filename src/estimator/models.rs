//! Catalog, settings and bid records.
//!
//! These mirror the documents kept by the persistence layer, so field names
//! serialize in camelCase. Decimal fields accept JSON numbers or strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of job a bid is for. Selects billable hours, profit and minimum charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Maintenance,
    Project,
}

/// Lifecycle status of a bid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BidStatus {
    #[default]
    Proposed,
    Accepted,
    Completed,
}

/// Business-wide cost settings (the `settings/globalConfig` document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub monthly_overhead: Decimal,
    pub working_days_per_month: Decimal,
    pub billable_hours_project: Decimal,
    pub billable_hours_maintenance: Decimal,
    pub base_labor_rate: Decimal,
    pub profit_maintenance: Decimal,
    pub profit_project: Decimal,
    pub min_charge_maintenance: Decimal,
    pub min_charge_project: Decimal,
    pub mileage_rate: Decimal,
}

impl AppSettings {
    /// Billable hours per day for the job type
    pub fn billable_hours_for(&self, job_type: JobType) -> Decimal {
        match job_type {
            JobType::Maintenance => self.billable_hours_maintenance,
            JobType::Project => self.billable_hours_project,
        }
    }

    /// Profit percentage for the job type
    pub fn profit_for(&self, job_type: JobType) -> Decimal {
        match job_type {
            JobType::Maintenance => self.profit_maintenance,
            JobType::Project => self.profit_project,
        }
    }

    /// Minimum charge for the job type
    pub fn min_charge_for(&self, job_type: JobType) -> Decimal {
        match job_type {
            JobType::Maintenance => self.min_charge_maintenance,
            JobType::Project => self.min_charge_project,
        }
    }

    /// Named numeric fields, in document order
    pub fn fields(&self) -> [(&'static str, Decimal); 10] {
        [
            ("monthlyOverhead", self.monthly_overhead),
            ("workingDaysPerMonth", self.working_days_per_month),
            ("billableHoursProject", self.billable_hours_project),
            ("billableHoursMaintenance", self.billable_hours_maintenance),
            ("baseLaborRate", self.base_labor_rate),
            ("profitMaintenance", self.profit_maintenance),
            ("profitProject", self.profit_project),
            ("minChargeMaintenance", self.min_charge_maintenance),
            ("minChargeProject", self.min_charge_project),
            ("mileageRate", self.mileage_rate),
        ]
    }
}

/// Service catalog entry.
///
/// Blank numeric form fields are stored as 0, so missing numbers default to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub service_name: String,
    /// Estimated hours on site
    #[serde(default)]
    pub estimated_labor_time: Decimal,
    #[serde(default)]
    pub crew_size: u32,
    /// Equipment cost per person-hour
    #[serde(default)]
    pub equipment_embedded_costs: Decimal,
}

/// Material catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default)]
    pub id: String,
    pub material_name: String,
    #[serde(default)]
    pub default_unit_cost: Decimal,
    #[serde(default)]
    pub default_markup_percent: Decimal,
}

/// Rates captured when a bid is created.
///
/// Stored on the bid so later settings edits do not re-price it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrozenRates {
    pub labor_rate: Decimal,
    pub overhead_maintenance: Decimal,
    pub overhead_project: Decimal,
    pub mileage_rate: Decimal,
}

impl FrozenRates {
    /// Overhead per hour for the job type
    pub fn overhead_for(&self, job_type: JobType) -> Decimal {
        match job_type {
            JobType::Maintenance => self.overhead_maintenance,
            JobType::Project => self.overhead_project,
        }
    }
}

/// A line on a bid before pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LineItemInput {
    /// Catalog service, optionally with adjusted hours or crew
    Service {
        service: Service,
        #[serde(default)]
        hours: Option<Decimal>,
        #[serde(default)]
        crew_size: Option<u32>,
    },
    /// Catalog material, optionally with an adjusted unit cost or markup
    Material {
        material: Material,
        quantity: Decimal,
        #[serde(default)]
        unit_cost: Option<Decimal>,
        #[serde(default)]
        markup_percent: Option<Decimal>,
    },
}

/// Whether a priced line came from the service or the material catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItemKind {
    Service,
    Material,
}

/// A priced bid line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLineItem {
    pub kind: LineItemKind,
    /// Catalog id of the service or material
    pub reference_id: String,
    pub description: String,
    /// Hours for services, units for materials
    pub quantity: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew_size: Option<u32>,
    /// Per person-hour burden for services, unit cost for materials
    pub unit_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_percent: Option<Decimal>,
    pub cost: Decimal,
}

/// Travel for a job. Drive time and mileage are for a single trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInput {
    #[serde(default)]
    pub drive_time_hrs: Decimal,
    #[serde(default)]
    pub miles_per_trip: Decimal,
    #[serde(default)]
    pub number_of_trips: u32,
    #[serde(default)]
    pub crew_size: u32,
}

/// Totals written back onto a bid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidTotals {
    pub services_total: Decimal,
    pub materials_total: Decimal,
    pub travel_total: Decimal,
    pub pre_profit_subtotal: Decimal,
    pub subtotal_with_profit: Decimal,
    pub pre_tax_total: Decimal,
    pub sales_tax: Decimal,
    pub grand_total: Decimal,
}

/// Everything needed to price a new bid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidDraft {
    #[serde(default)]
    pub bid_id: String,
    pub client_name: String,
    #[serde(default)]
    pub address: String,
    pub job_type: JobType,
    pub sales_tax_multiplier: Decimal,
    #[serde(default)]
    pub line_items: Vec<LineItemInput>,
    #[serde(default)]
    pub travel: Option<TravelInput>,
}

/// A priced bid, ready to hand back to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: Uuid,
    pub bid_id: String,
    pub client_name: String,
    pub address: String,
    pub job_type: JobType,
    pub status: BidStatus,
    pub sales_tax_multiplier: Decimal,
    pub created_at: DateTime<Utc>,
    pub frozen_rates: FrozenRates,
    pub line_items: Vec<PricedLineItem>,
    pub travel: Option<TravelInput>,
    pub totals: BidTotals,
}
