//! Numeric backends the formulas are generic over.
//!
//! `Decimal` is the decimal-safe backend, `f64` the native floating-point one.
//! Results are not bit-identical between them, so a deployment picks one.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Decimal places every amount is rounded to.
pub const CURRENCY_SCALE: u32 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
  #[error("empty numeric value")]
  Empty,
  #[error("`{0}` is not a number")]
  Invalid(String),
  #[error("`{0}` is not a finite number")]
  NonFinite(String),
}

/// Arithmetic the formula set needs from a numeric representation.
pub trait Scalar:
  Copy
  + Debug
  + Display
  + PartialOrd
  + Add<Output = Self>
  + Sub<Output = Self>
  + Mul<Output = Self>
  + Div<Output = Self>
{
  fn zero() -> Self;

  fn one() -> Self;

  fn from_u32(value: u32) -> Self;

  /// Tolerance used by `nearly_equals` (0.0001).
  fn epsilon() -> Self;

  fn is_zero(self) -> bool;

  fn abs(self) -> Self;

  /// Round half to even at `CURRENCY_SCALE` decimals.
  fn round_currency(self) -> Self;

  fn parse(raw: &str) -> Result<Self, ParseError>;

  /// String form handed back across the host boundary.
  fn encode(self) -> String;
}

impl Scalar for Decimal {
  fn zero() -> Self {
    Decimal::ZERO
  }

  fn one() -> Self {
    Decimal::ONE
  }

  fn from_u32(value: u32) -> Self {
    Decimal::from(value)
  }

  fn epsilon() -> Self {
    Decimal::new(1, 4)
  }

  fn is_zero(self) -> bool {
    Decimal::is_zero(&self)
  }

  fn abs(self) -> Self {
    Decimal::abs(&self)
  }

  fn round_currency(self) -> Self {
    let mut rounded =
      self.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven);
    // pads 10.0 to 10.00; never rounds again since the scale is already <= 2
    rounded.rescale(CURRENCY_SCALE);
    rounded
  }

  fn parse(raw: &str) -> Result<Self, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(ParseError::Empty);
    }
    Decimal::from_str(trimmed)
      .or_else(|_| Decimal::from_scientific(trimmed))
      .map_err(|_| ParseError::Invalid(trimmed.to_string()))
  }

  fn encode(self) -> String {
    self.to_string()
  }
}

impl Scalar for f64 {
  fn zero() -> Self {
    0.0
  }

  fn one() -> Self {
    1.0
  }

  fn from_u32(value: u32) -> Self {
    f64::from(value)
  }

  fn epsilon() -> Self {
    0.0001
  }

  fn is_zero(self) -> bool {
    self == 0.0
  }

  fn abs(self) -> Self {
    f64::abs(self)
  }

  fn round_currency(self) -> Self {
    let factor = 10_f64.powi(CURRENCY_SCALE as i32);
    (self * factor).round_ties_even() / factor
  }

  fn parse(raw: &str) -> Result<Self, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(ParseError::Empty);
    }
    let value = trimmed
      .parse::<f64>()
      .map_err(|_| ParseError::Invalid(trimmed.to_string()))?;
    if !value.is_finite() {
      return Err(ParseError::NonFinite(trimmed.to_string()));
    }
    Ok(value)
  }

  fn encode(self) -> String {
    self.to_string()
  }
}

/// Arithmetic that reports overflow instead of panicking or leaving the finite range.
pub trait CheckedArithmetic: Scalar {
  fn checked_add(self, rhs: Self) -> Option<Self>;

  fn checked_sub(self, rhs: Self) -> Option<Self>;

  fn checked_mul(self, rhs: Self) -> Option<Self>;

  fn checked_div(self, rhs: Self) -> Option<Self>;

  fn checked_round_currency(self) -> Option<Self>;
}

impl CheckedArithmetic for Decimal {
  fn checked_add(self, rhs: Self) -> Option<Self> {
    Decimal::checked_add(self, rhs)
  }

  fn checked_sub(self, rhs: Self) -> Option<Self> {
    Decimal::checked_sub(self, rhs)
  }

  fn checked_mul(self, rhs: Self) -> Option<Self> {
    Decimal::checked_mul(self, rhs)
  }

  fn checked_div(self, rhs: Self) -> Option<Self> {
    Decimal::checked_div(self, rhs)
  }

  fn checked_round_currency(self) -> Option<Self> {
    Some(self.round_currency())
  }
}

fn finite(value: f64) -> Option<f64> {
  value.is_finite().then_some(value)
}

impl CheckedArithmetic for f64 {
  fn checked_add(self, rhs: Self) -> Option<Self> {
    finite(self + rhs)
  }

  fn checked_sub(self, rhs: Self) -> Option<Self> {
    finite(self - rhs)
  }

  fn checked_mul(self, rhs: Self) -> Option<Self> {
    finite(self * rhs)
  }

  fn checked_div(self, rhs: Self) -> Option<Self> {
    finite(self / rhs)
  }

  fn checked_round_currency(self) -> Option<Self> {
    finite(self.round_currency())
  }
}

/// Overflow-tracking wrapper the host boundary evaluates formulas with.
///
/// Once an operation leaves the representable range the value stays
/// `Checked(None)` through the rest of the formula. Comparisons against it are
/// always false.
#[derive(Debug, Clone, Copy)]
pub struct Checked<T>(Option<T>);

impl<T: CheckedArithmetic> Checked<T> {
  pub fn new(value: T) -> Self {
    Checked(Some(value))
  }

  pub fn value(self) -> Option<T> {
    self.0
  }

  fn combine(self, rhs: Self, op: impl FnOnce(T, T) -> Option<T>) -> Self {
    match (self.0, rhs.0) {
      (Some(lhs), Some(rhs)) => Checked(op(lhs, rhs)),
      _ => Checked(None),
    }
  }
}

impl<T: CheckedArithmetic> Add for Checked<T> {
  type Output = Self;

  fn add(self, rhs: Self) -> Self {
    self.combine(rhs, T::checked_add)
  }
}

impl<T: CheckedArithmetic> Sub for Checked<T> {
  type Output = Self;

  fn sub(self, rhs: Self) -> Self {
    self.combine(rhs, T::checked_sub)
  }
}

impl<T: CheckedArithmetic> Mul for Checked<T> {
  type Output = Self;

  fn mul(self, rhs: Self) -> Self {
    self.combine(rhs, T::checked_mul)
  }
}

impl<T: CheckedArithmetic> Div for Checked<T> {
  type Output = Self;

  fn div(self, rhs: Self) -> Self {
    self.combine(rhs, T::checked_div)
  }
}

impl<T: CheckedArithmetic> PartialEq for Checked<T> {
  fn eq(&self, other: &Self) -> bool {
    matches!((self.0, other.0), (Some(lhs), Some(rhs)) if lhs == rhs)
  }
}

impl<T: CheckedArithmetic> PartialOrd for Checked<T> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    match (self.0, other.0) {
      (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs),
      _ => None,
    }
  }
}

impl<T: CheckedArithmetic> Display for Checked<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.0 {
      Some(value) => write!(f, "{}", value),
      None => write!(f, "overflow"),
    }
  }
}

impl<T: CheckedArithmetic> Scalar for Checked<T> {
  fn zero() -> Self {
    Checked::new(T::zero())
  }

  fn one() -> Self {
    Checked::new(T::one())
  }

  fn from_u32(value: u32) -> Self {
    Checked::new(T::from_u32(value))
  }

  fn epsilon() -> Self {
    Checked::new(T::epsilon())
  }

  fn is_zero(self) -> bool {
    self.0.is_some_and(T::is_zero)
  }

  fn abs(self) -> Self {
    Checked(self.0.map(T::abs))
  }

  fn round_currency(self) -> Self {
    Checked(self.0.and_then(T::checked_round_currency))
  }

  fn parse(raw: &str) -> Result<Self, ParseError> {
    T::parse(raw).map(Checked::new)
  }

  fn encode(self) -> String {
    self.to_string()
  }
}
