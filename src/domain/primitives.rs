use crate::numeric::Scalar;

/// `dividend / divisor`, or `fallback` (zero when absent) for a zero divisor.
pub fn safe_divide<T: Scalar>(dividend: T, divisor: T, fallback: Option<T>) -> T {
  if divisor.is_zero() {
    match fallback {
      Some(value) => value,
      None => T::zero(),
    }
  } else {
    dividend / divisor
  }
}

pub fn nearly_equals<T: Scalar>(first: T, second: T) -> bool {
  (first - second).abs() < T::epsilon()
}

/// Absent only ever equals absent.
pub fn nearly_equals_optional<T: Scalar>(first: Option<T>, second: Option<T>) -> bool {
  match (first, second) {
    (Some(first), Some(second)) => nearly_equals(first, second),
    (None, None) => true,
    _ => false,
  }
}

pub fn get_percent_from_amount<T: Scalar>(amount: T, cost: T) -> T {
  safe_divide(amount, cost, None)
}

/// Amounts are kept to the cent so totals add up the way users see them.
pub fn get_amount_from_percent<T: Scalar>(percent: T, cost: T) -> T {
  (percent * cost).round_currency()
}
