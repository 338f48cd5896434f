//! Whole-line-item pricing built only from the public formulas.

use crate::domain::formulas::{
  calculate_aggregated_fee_amount, calculate_aggregated_fee_percent, calculate_contingency_amount,
  calculate_contingency_percent, calculate_escalation_amount, calculate_escalation_percent,
  calculate_markup_percent, gross_margin_on_total,
};
use crate::domain::primitives::get_percent_from_amount;
use crate::domain::totals::{calculate_sell_price, calculate_total_direct_cost_with_escalation};
use crate::numeric::Scalar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItemRates<T> {
  pub direct_cost: T,
  pub contingency_percent: T,
  pub escalation_percent: T,
  pub aggregated_fee_percent: T,
  pub gross_margin_percent: T,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItemBreakdown<T> {
  pub direct_cost: T,
  pub contingency_amount: T,
  pub escalation_amount: T,
  pub aggregated_fee_amount: T,
  pub total_direct_cost: T,
  pub gross_margin_amount: T,
  pub sell_price: T,
  pub markup_percent: T,
}

pub fn price_line_item<T: Scalar>(rates: &LineItemRates<T>) -> LineItemBreakdown<T> {
  let LineItemRates {
    direct_cost,
    contingency_percent,
    escalation_percent,
    aggregated_fee_percent,
    gross_margin_percent,
  } = *rates;

  let contingency_amount = calculate_contingency_amount(direct_cost, contingency_percent);
  let escalation_amount =
    calculate_escalation_amount(direct_cost, contingency_percent, escalation_percent);
  let aggregated_fee_amount =
    calculate_aggregated_fee_amount(direct_cost, contingency_percent, aggregated_fee_percent);
  let total_direct_cost = calculate_total_direct_cost_with_escalation(
    direct_cost,
    contingency_amount,
    escalation_amount,
    aggregated_fee_amount,
  );
  let gross_margin_amount = gross_margin_on_total(total_direct_cost, gross_margin_percent);
  let sell_price = calculate_sell_price(
    direct_cost,
    contingency_amount,
    escalation_amount,
    aggregated_fee_amount,
    gross_margin_amount,
  );

  LineItemBreakdown {
    direct_cost,
    contingency_amount,
    escalation_amount,
    aggregated_fee_amount,
    total_direct_cost,
    gross_margin_amount,
    sell_price,
    markup_percent: calculate_markup_percent(gross_margin_percent),
  }
}

impl<T: Scalar> LineItemBreakdown<T> {
  /// Rates implied by the rounded amounts; equal to the input rates up to rounding.
  pub fn implied_rates(&self) -> LineItemRates<T> {
    LineItemRates {
      direct_cost: self.direct_cost,
      contingency_percent: calculate_contingency_percent(self.direct_cost, self.contingency_amount),
      escalation_percent: calculate_escalation_percent(
        self.direct_cost,
        self.contingency_amount,
        self.escalation_amount,
      ),
      aggregated_fee_percent: calculate_aggregated_fee_percent(
        self.direct_cost,
        self.contingency_amount,
        self.aggregated_fee_amount,
      ),
      gross_margin_percent: get_percent_from_amount(self.gross_margin_amount, self.sell_price),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use rust_decimal_macros::dec;

  use super::*;
  use crate::domain::primitives::nearly_equals;

  fn sample_rates() -> LineItemRates<rust_decimal::Decimal> {
    LineItemRates {
      direct_cost: dec!(1000),
      contingency_percent: dec!(0.05),
      escalation_percent: dec!(0.03),
      aggregated_fee_percent: dec!(0.02),
      gross_margin_percent: dec!(0.2),
    }
  }

  #[test]
  fn prices_every_stage() {
    let breakdown = price_line_item(&sample_rates());

    assert_eq!(
      breakdown,
      LineItemBreakdown {
        direct_cost: dec!(1000),
        contingency_amount: dec!(50.00),
        escalation_amount: dec!(31.50),
        aggregated_fee_amount: dec!(21.00),
        total_direct_cost: dec!(1102.50),
        // 275.625 rounds to even
        gross_margin_amount: dec!(275.62),
        sell_price: dec!(1378.12),
        markup_percent: dec!(0.25),
      }
    );
  }

  #[test]
  fn implied_rates_recover_inputs() {
    let rates = sample_rates();
    let implied = price_line_item(&rates).implied_rates();

    assert_eq!(implied.contingency_percent, rates.contingency_percent);
    assert_eq!(implied.escalation_percent, rates.escalation_percent);
    assert_eq!(implied.aggregated_fee_percent, rates.aggregated_fee_percent);
    assert!(nearly_equals(implied.gross_margin_percent, rates.gross_margin_percent));
  }

  #[test]
  fn zero_direct_cost_prices_to_zero() {
    let breakdown = price_line_item(&LineItemRates {
      direct_cost: 0.0,
      contingency_percent: 0.1,
      escalation_percent: 0.1,
      aggregated_fee_percent: 0.1,
      gross_margin_percent: 0.3,
    });

    assert_eq!(breakdown.total_direct_cost, 0.0);
    assert_eq!(breakdown.sell_price, 0.0);
    assert_eq!(breakdown.implied_rates().contingency_percent, 0.0);
  }
}
