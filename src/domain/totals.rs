use crate::numeric::Scalar;

/// Total for the pipeline with a separate escalation stage.
pub fn calculate_total_direct_cost_with_escalation<T: Scalar>(
  direct_cost: T,
  contingency_amount: T,
  escalation_amount: T,
  material_fee_amount: T,
) -> T {
  direct_cost + contingency_amount + escalation_amount + material_fee_amount
}

/// Total for the pipeline without escalation.
pub fn calculate_total_direct_cost_with_fees<T: Scalar>(
  direct_cost: T,
  contingency_amount: T,
  aggregated_fee_amount: T,
) -> T {
  direct_cost + contingency_amount + aggregated_fee_amount
}

// Inputs are already rounded amounts, so the sum is not rounded again.
pub fn calculate_sell_price<T: Scalar>(
  direct_cost: T,
  contingency_amount: T,
  escalation_amount: T,
  material_fee_amount: T,
  gross_margin_amount: T,
) -> T {
  let total_direct_cost = calculate_total_direct_cost_with_escalation(
    direct_cost,
    contingency_amount,
    escalation_amount,
    material_fee_amount,
  );
  total_direct_cost + gross_margin_amount
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;

  #[test]
  fn totals_are_plain_sums() {
    assert_eq!(
      calculate_total_direct_cost_with_fees(dec!(1000), dec!(50), dec!(21)),
      dec!(1071)
    );
    assert_eq!(
      calculate_total_direct_cost_with_escalation(dec!(1000), dec!(50), dec!(31.50), dec!(21)),
      dec!(1102.50)
    );
    assert_eq!(
      calculate_total_direct_cost_with_escalation(dec!(1000), dec!(50), dec!(0), dec!(21)),
      calculate_total_direct_cost_with_fees(dec!(1000), dec!(50), dec!(21))
    );
  }

  #[test]
  fn sell_price_adds_margin_to_total() {
    assert_eq!(
      calculate_sell_price(dec!(1000), dec!(50), dec!(31.50), dec!(21), dec!(275.63)),
      dec!(1378.13)
    );
    assert_eq!(calculate_sell_price(0.0, 0.0, 0.0, 0.0, -5.0), -5.0);
  }
}
