//! Response DTOs for estimator API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::FinalPricing;

/// A single computed amount
#[derive(Debug, Clone, Serialize)]
pub struct AmountResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl From<Decimal> for AmountResponse {
    fn from(amount: Decimal) -> Self {
        Self { amount }
    }
}

/// Response for final pricing
#[derive(Debug, Clone, Serialize)]
pub struct FinalPricingResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal_with_profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub pre_tax_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub grand_total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub sales_tax: Decimal,
}

impl From<FinalPricing> for FinalPricingResponse {
    fn from(pricing: FinalPricing) -> Self {
        Self {
            subtotal_with_profit: pricing.subtotal_with_profit,
            pre_tax_total: pricing.pre_tax_total,
            grand_total: pricing.grand_total,
            sales_tax: pricing.sales_tax,
        }
    }
}

/// Generic estimator error response
#[derive(Debug, Serialize)]
pub struct EstimateErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
