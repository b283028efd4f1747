//! Core estimating calculation functions.
//!
//! Pure functions for bid math - no I/O, no shared state. Every public
//! function rounds its result with [`round_money`]; intermediate values are
//! never rounded.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Number of fractional digits carried by emitted money amounts.
pub const MONEY_PLACES: u32 = 2;

/// Round a money amount to cents, half up.
///
/// Midpoints always round towards positive infinity: `19.005` becomes `19.01`
/// and `-3.455` becomes `-3.45`. Amounts are exact decimals, so a value
/// written as `19.005` really is the midpoint.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use field_estimator::estimator::round_money;
///
/// assert_eq!(round_money(dec!(19.005)), dec!(19.01));
/// assert_eq!(round_money(dec!(-3.455)), dec!(-3.45));
/// assert_eq!(round_money(dec!(-3.456)), dec!(-3.46));
/// assert_eq!(round_money(dec!(1.234)), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let strategy = if amount.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    amount.round_dp_with_strategy(MONEY_PLACES, strategy)
}

/// Spread fixed monthly overhead across the month's billable hours.
///
/// Returns zero when either divisor is not positive. A quotient too large
/// for a `Decimal` saturates at `Decimal::MAX` (or `Decimal::MIN` for a
/// negative overhead); use [`checked_overhead_per_hour`] to detect that.
pub fn calculate_overhead_per_hour(
    monthly_overhead: Decimal,
    working_days: Decimal,
    billable_hours_per_day: Decimal,
) -> Decimal {
    checked_overhead_per_hour(monthly_overhead, working_days, billable_hours_per_day).unwrap_or(
        if monthly_overhead.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        },
    )
}

/// Like [`calculate_overhead_per_hour`], but `None` when the billable
/// capacity is so small that the rate does not fit in a `Decimal`.
pub fn checked_overhead_per_hour(
    monthly_overhead: Decimal,
    working_days: Decimal,
    billable_hours_per_day: Decimal,
) -> Option<Decimal> {
    if working_days <= Decimal::ZERO || billable_hours_per_day <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let billable_hours_per_month = working_days.checked_mul(billable_hours_per_day)?;
    if billable_hours_per_month.is_zero() {
        return None;
    }
    monthly_overhead
        .checked_div(billable_hours_per_month)
        .map(round_money)
}

/// Cost of a service: every crew member carries labor, overhead and
/// equipment burden for every estimated hour.
///
/// # Arguments
/// * `est_hours` - Estimated hours on site
/// * `crew_size` - Number of people in the crew
/// * `labor_rate` - Labor rate per person-hour
/// * `overhead_rate` - Overhead rate per person-hour (see [`calculate_overhead_per_hour`])
/// * `equipment_cost_per_hour` - Equipment burden per person-hour
pub fn calculate_service_cost(
    est_hours: Decimal,
    crew_size: u32,
    labor_rate: Decimal,
    overhead_rate: Decimal,
    equipment_cost_per_hour: Decimal,
) -> Decimal {
    let hourly_burden = labor_rate + overhead_rate + equipment_cost_per_hour;
    round_money(est_hours * Decimal::from(crew_size) * hourly_burden)
}

/// Extended material cost with markup applied to the whole line.
///
/// `markup_percent` is a percentage: `15` means 15%.
pub fn calculate_material_cost(
    quantity: Decimal,
    unit_cost: Decimal,
    markup_percent: Decimal,
) -> Decimal {
    let markup_factor = Decimal::ONE + markup_percent / Decimal::ONE_HUNDRED;
    round_money(quantity * unit_cost * markup_factor)
}

/// Travel cost for a job.
///
/// Drive time is paid to every crew member for every trip. Mileage is charged
/// once for `miles_per_trip` and does not scale with the number of trips.
pub fn calculate_total_travel_cost(
    drive_time_hrs: Decimal,
    miles_per_trip: Decimal,
    number_of_trips: u32,
    crew_size: u32,
    labor_rate: Decimal,
    mileage_rate: Decimal,
) -> Decimal {
    let labor_cost =
        drive_time_hrs * Decimal::from(number_of_trips) * Decimal::from(crew_size) * labor_rate;
    let mileage_cost = miles_per_trip * mileage_rate;

    round_money(labor_cost + mileage_cost)
}

/// Result of final pricing. Each stage is rounded on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalPricing {
    pub subtotal_with_profit: Decimal,
    pub pre_tax_total: Decimal,
    pub grand_total: Decimal,
    pub sales_tax: Decimal,
}

/// Apply profit, the minimum-charge floor and sales tax to a subtotal.
///
/// The minimum charge only ever raises the price and is applied after profit.
/// Sales tax is the residual `grand_total - pre_tax_total`, so the three
/// totals always reconcile to the cent.
pub fn calculate_final_pricing(
    pre_profit_subtotal: Decimal,
    profit_percentage: Decimal,
    minimum_charge: Decimal,
    sales_tax_multiplier: Decimal,
) -> FinalPricing {
    let profit_factor = Decimal::ONE + profit_percentage / Decimal::ONE_HUNDRED;
    let subtotal_with_profit = round_money(pre_profit_subtotal * profit_factor);
    let pre_tax_total = round_money(subtotal_with_profit.max(minimum_charge));
    let grand_total = round_money(pre_tax_total * sales_tax_multiplier);
    let sales_tax = round_money(grand_total - pre_tax_total);

    FinalPricing {
        subtotal_with_profit,
        pre_tax_total,
        grand_total,
        sales_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_midpoint_rounds_up() {
        assert_eq!(round_money(dec!(19.005)), dec!(19.01));
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn test_round_money_negative() {
        assert_eq!(round_money(dec!(-3.456)), dec!(-3.46));
        assert_eq!(round_money(dec!(-1.234)), dec!(-1.23));
    }

    #[test]
    fn test_round_money_negative_midpoint_rounds_up() {
        assert_eq!(round_money(dec!(-0.005)), dec!(0));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.00));
        assert_eq!(round_money(dec!(-3.455)), dec!(-3.45));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234)), dec!(1.23));
        assert_eq!(round_money(dec!(1.236)), dec!(1.24));
        assert_eq!(round_money(dec!(1.2349)), dec!(1.23));
        assert_eq!(round_money(dec!(123456.789)), dec!(123456.79));
        assert_eq!(round_money(dec!(999999.995)), dec!(1000000.00));
    }

    #[test]
    fn test_round_money_is_idempotent() {
        for value in [dec!(19.005), dec!(-3.456), dec!(0), dec!(33.3333), dec!(7.1)] {
            let once = round_money(value);
            assert_eq!(round_money(once), once);
        }
    }

    #[test]
    fn test_round_money_at_most_two_places() {
        assert!(round_money(dec!(10) / dec!(3)).scale() <= MONEY_PLACES);
        assert!(round_money(dec!(2) / dec!(7)).scale() <= MONEY_PLACES);
    }

    // ==================== overhead tests ====================

    #[test]
    fn test_overhead_per_hour() {
        // 4400 / (22 * 6) = 33.333...
        assert_eq!(calculate_overhead_per_hour(dec!(4400), dec!(22), dec!(6)), dec!(33.33));
    }

    #[test]
    fn test_overhead_per_hour_zero_overhead() {
        assert_eq!(calculate_overhead_per_hour(dec!(0), dec!(22), dec!(6)), dec!(0));
    }

    #[test]
    fn test_overhead_per_hour_non_positive_divisors() {
        assert_eq!(calculate_overhead_per_hour(dec!(4400), dec!(0), dec!(6)), dec!(0));
        assert_eq!(calculate_overhead_per_hour(dec!(4400), dec!(22), dec!(0)), dec!(0));
        assert_eq!(calculate_overhead_per_hour(dec!(4400), dec!(-1), dec!(6)), dec!(0));
        assert_eq!(calculate_overhead_per_hour(dec!(4400), dec!(22), dec!(-8)), dec!(0));
    }

    #[test]
    fn test_overhead_per_hour_vanishing_capacity() {
        let tiny = Decimal::new(1, 28);
        assert_eq!(checked_overhead_per_hour(dec!(4400), tiny, tiny), None);
        assert_eq!(calculate_overhead_per_hour(dec!(4400), tiny, tiny), Decimal::MAX);
    }

    #[test]
    fn test_overhead_per_hour_overflow_is_not_zero() {
        // 1e9 / (1e-10 * 1e-10) = 1e29, past Decimal::MAX
        let tiny = Decimal::new(1, 10);
        let overhead = dec!(1000000000);
        assert_eq!(checked_overhead_per_hour(overhead, tiny, tiny), None);
        assert_eq!(calculate_overhead_per_hour(overhead, tiny, tiny), Decimal::MAX);
        assert_eq!(calculate_overhead_per_hour(-overhead, tiny, tiny), Decimal::MIN);
    }

    #[test]
    fn test_checked_overhead_per_hour() {
        assert_eq!(
            checked_overhead_per_hour(dec!(4400), dec!(22), dec!(6)),
            Some(dec!(33.33))
        );
        assert_eq!(checked_overhead_per_hour(dec!(4400), dec!(0), dec!(6)), Some(dec!(0)));
    }

    // ==================== service / material tests ====================

    #[test]
    fn test_service_cost() {
        // 8 * 2 * (25 + 10 + 5) = 640
        assert_eq!(
            calculate_service_cost(dec!(8), 2, dec!(25), dec!(10), dec!(5)),
            dec!(640.00)
        );
    }

    #[test]
    fn test_service_cost_scales_with_crew() {
        let solo = calculate_service_cost(dec!(3.5), 1, dec!(30), dec!(12.5), dec!(2));
        let crew = calculate_service_cost(dec!(3.5), 3, dec!(30), dec!(12.5), dec!(2));
        assert_eq!(crew, solo * dec!(3));
    }

    #[test]
    fn test_service_cost_empty_crew() {
        assert_eq!(calculate_service_cost(dec!(8), 0, dec!(25), dec!(10), dec!(5)), dec!(0));
    }

    #[test]
    fn test_material_cost() {
        // 10 * 2.5 * 1.2 = 30
        assert_eq!(calculate_material_cost(dec!(10), dec!(2.5), dec!(20)), dec!(30.00));
    }

    #[test]
    fn test_material_cost_markup_on_extended_cost() {
        // 3 * 1.99 * 1.15 = 6.8655
        assert_eq!(calculate_material_cost(dec!(3), dec!(1.99), dec!(15)), dec!(6.87));
        assert_eq!(calculate_material_cost(dec!(3), dec!(1.99), dec!(0)), dec!(5.97));
    }

    // ==================== travel tests ====================

    #[test]
    fn test_travel_cost() {
        // labor = 0.5 * 2 * 3 * 20 = 60, mileage = 10 * 0.65 = 6.5
        assert_eq!(
            calculate_total_travel_cost(dec!(0.5), dec!(10), 2, 3, dec!(20), dec!(0.65)),
            dec!(66.50)
        );
    }

    #[test]
    fn test_travel_mileage_does_not_scale_with_trips() {
        // Mileage is charged once for miles_per_trip whatever the trip count.
        // Kept as-is until product decides whether it should be per trip.
        let one_trip = calculate_total_travel_cost(dec!(0), dec!(40), 1, 2, dec!(20), dec!(0.65));
        let five_trips = calculate_total_travel_cost(dec!(0), dec!(40), 5, 2, dec!(20), dec!(0.65));
        assert_eq!(one_trip, dec!(26.00));
        assert_eq!(five_trips, one_trip);
    }

    #[test]
    fn test_travel_rounds_once_at_the_end() {
        // labor = 0.1004 * 1 * 1 * 10 = 1.004, mileage = 0.004 * 1 = 0.004
        // 1.008 rounds to 1.01; rounding per component would give 1.00
        assert_eq!(
            calculate_total_travel_cost(dec!(0.1004), dec!(0.004), 1, 1, dec!(10), dec!(1)),
            dec!(1.01)
        );
    }

    // ==================== final pricing tests ====================

    #[test]
    fn test_final_pricing() {
        let pricing = calculate_final_pricing(dec!(1000), dec!(15), dec!(500), dec!(1.07));
        assert_eq!(pricing.subtotal_with_profit, dec!(1150.00));
        assert_eq!(pricing.pre_tax_total, dec!(1150.00));
        assert_eq!(pricing.grand_total, dec!(1230.50));
        assert_eq!(pricing.sales_tax, dec!(80.50));
    }

    #[test]
    fn test_final_pricing_minimum_charge_floor() {
        let pricing = calculate_final_pricing(dec!(100), dec!(10), dec!(500), dec!(1.0));
        assert_eq!(pricing.subtotal_with_profit, dec!(110.00));
        assert_eq!(pricing.pre_tax_total, dec!(500.00));
        assert_eq!(pricing.grand_total, dec!(500.00));
        assert_eq!(pricing.sales_tax, dec!(0.00));
    }

    #[test]
    fn test_final_pricing_floor_never_reduces() {
        let pricing = calculate_final_pricing(dec!(800), dec!(0), dec!(500), dec!(1));
        assert_eq!(pricing.pre_tax_total, dec!(800));
    }

    #[test]
    fn test_final_pricing_tax_reconciles() {
        let cases = [
            (dec!(1000), dec!(15), dec!(500), dec!(1.07)),
            (dec!(333.33), dec!(12.5), dec!(0), dec!(1.0825)),
            (dec!(19.99), dec!(7), dec!(25), dec!(1.06)),
            (dec!(1234.567), dec!(33.3), dec!(100), dec!(1.0725)),
        ];
        for (subtotal, profit, minimum, tax) in cases {
            let pricing = calculate_final_pricing(subtotal, profit, minimum, tax);
            assert_eq!(pricing.grand_total - pricing.pre_tax_total, pricing.sales_tax);
        }
    }

    #[test]
    fn test_final_pricing_is_deterministic() {
        let first = calculate_final_pricing(dec!(421.17), dec!(22), dec!(150), dec!(1.0875));
        let second = calculate_final_pricing(dec!(421.17), dec!(22), dec!(150), dec!(1.0875));
        assert_eq!(first, second);
    }
}
