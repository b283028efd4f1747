//! Estimating engine for field-service bids.
//!
//! `calculators` holds the pure bid math. `services` assembles priced bids
//! from catalog entries and business settings, and `routes` exposes both over
//! HTTP/JSON to the app that owns persistence.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;
pub mod validation;

// Re-export commonly used items
pub use calculators::{
    calculate_final_pricing, calculate_material_cost, calculate_overhead_per_hour,
    calculate_service_cost, calculate_total_travel_cost, checked_overhead_per_hour, round_money,
    FinalPricing,
};
pub use routes::router;
pub use services::{assemble_bid, freeze_rates, EstimateError};
