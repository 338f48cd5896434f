//! Percent/amount pairs for each stage of a line item.
//!
//! Percent forms take the already rounded amounts of the earlier stages, amount
//! forms take percents and recompute those amounts on the way.

use crate::domain::primitives::{get_amount_from_percent, get_percent_from_amount, safe_divide};
use crate::domain::totals::calculate_total_direct_cost_with_fees;
use crate::numeric::Scalar;

pub fn calculate_contingency_percent<T: Scalar>(direct_cost: T, contingency_amount: T) -> T {
  get_percent_from_amount(contingency_amount, direct_cost)
}

pub fn calculate_contingency_amount<T: Scalar>(direct_cost: T, contingency_percent: T) -> T {
  get_amount_from_percent(contingency_percent, direct_cost)
}

pub fn calculate_escalation_percent<T: Scalar>(
  direct_cost: T,
  contingency_amount: T,
  escalation_amount: T,
) -> T {
  get_percent_from_amount(escalation_amount, direct_cost + contingency_amount)
}

pub fn calculate_escalation_amount<T: Scalar>(
  direct_cost: T,
  contingency_percent: T,
  escalation_percent: T,
) -> T {
  let contingency_amount = calculate_contingency_amount(direct_cost, contingency_percent);
  get_amount_from_percent(escalation_percent, direct_cost + contingency_amount)
}

pub fn calculate_aggregated_fee_percent<T: Scalar>(
  direct_cost: T,
  contingency_amount: T,
  aggregated_fee_amount: T,
) -> T {
  get_percent_from_amount(aggregated_fee_amount, direct_cost + contingency_amount)
}

pub fn calculate_aggregated_fee_amount<T: Scalar>(
  direct_cost: T,
  contingency_percent: T,
  aggregated_fee_percent: T,
) -> T {
  let contingency_amount = calculate_contingency_amount(direct_cost, contingency_percent);
  get_amount_from_percent(aggregated_fee_percent, direct_cost + contingency_amount)
}

/// Markup over cost equivalent to a gross margin over sell price.
///
/// A 100% margin has no finite markup; it yields 1 by convention, which is a
/// pricing policy and not something the algebra implies.
pub fn calculate_markup_percent<T: Scalar>(gross_margin_percent: T) -> T {
  safe_divide(
    gross_margin_percent,
    T::one() - gross_margin_percent,
    Some(T::one()),
  )
}

pub fn calculate_markup_amount<T: Scalar>(
  direct_cost: T,
  contingency_percent: T,
  aggregated_fee_percent: T,
  markup_percent: T,
) -> T {
  let total_direct_cost = fee_pipeline_total(direct_cost, contingency_percent, aggregated_fee_percent);
  get_amount_from_percent(markup_percent, total_direct_cost)
}

/// Gross margin is a share of the sell price, not of the cost.
pub fn calculate_gross_margin_percent<T: Scalar>(
  direct_cost: T,
  contingency_amount: T,
  aggregated_fee_amount: T,
  gross_margin_amount: T,
) -> T {
  let total_direct_cost =
    calculate_total_direct_cost_with_fees(direct_cost, contingency_amount, aggregated_fee_amount);
  let sell_price = total_direct_cost + gross_margin_amount;
  get_percent_from_amount(gross_margin_amount, sell_price)
}

pub fn calculate_gross_margin_amount<T: Scalar>(
  direct_cost: T,
  contingency_percent: T,
  aggregated_fee_percent: T,
  gross_margin_percent: T,
) -> T {
  let total_direct_cost = fee_pipeline_total(direct_cost, contingency_percent, aggregated_fee_percent);
  gross_margin_on_total(total_direct_cost, gross_margin_percent)
}

/// Back-solves `margin = amount / (total + amount)` for the amount.
///
/// At a 100% margin the sell price falls back to zero and the result is the
/// negated total.
pub fn gross_margin_on_total<T: Scalar>(total_direct_cost: T, gross_margin_percent: T) -> T {
  let sell_price = safe_divide(total_direct_cost, T::one() - gross_margin_percent, None);
  (sell_price - total_direct_cost).round_currency()
}

fn fee_pipeline_total<T: Scalar>(direct_cost: T, contingency_percent: T, aggregated_fee_percent: T) -> T {
  let contingency_amount = calculate_contingency_amount(direct_cost, contingency_percent);
  let aggregated_fee_amount =
    calculate_aggregated_fee_amount(direct_cost, contingency_percent, aggregated_fee_percent);
  calculate_total_direct_cost_with_fees(direct_cost, contingency_amount, aggregated_fee_amount)
}
