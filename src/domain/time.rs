use crate::numeric::Scalar;

pub const MINUTES_IN_HOUR: u32 = 60;

pub fn convert_minutes_to_hours<T: Scalar>(minutes: T) -> T {
  minutes / T::from_u32(MINUTES_IN_HOUR)
}

pub fn convert_hours_to_minutes<T: Scalar>(hours: T) -> T {
  hours * T::from_u32(MINUTES_IN_HOUR)
}

#[cfg(test)]
mod tests {
  use rust_decimal_macros::dec;

  use super::*;

  #[test]
  fn converts_both_ways() {
    assert_eq!(convert_minutes_to_hours(dec!(90)), dec!(1.5));
    assert_eq!(convert_hours_to_minutes(dec!(1.5)), dec!(90));
    assert_eq!(convert_minutes_to_hours(90.0), 1.5);
    assert_eq!(convert_hours_to_minutes(1.5), 90.0);
  }

  #[test]
  fn no_rounding_is_applied() {
    let one_minute = convert_minutes_to_hours(dec!(1));
    assert!(one_minute > dec!(0.01666) && one_minute < dec!(0.01667));
    assert_eq!(convert_minutes_to_hours(dec!(-30)), dec!(-0.5));
    assert_eq!(convert_hours_to_minutes(dec!(0.001)), dec!(0.06));
  }
}
