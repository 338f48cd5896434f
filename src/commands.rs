//! Host-facing call surface.
//!
//! Arguments arrive as decimal-safe strings, are parsed with the deployment's
//! numeric representation and dispatched through the operation table. A single
//! call never mixes representations.

use std::marker::PhantomData;

use log::{debug, warn};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::*;
use crate::error::{AppError, ARITY, BAD_REQUEST, OVERFLOW, PARSE_ERROR};
use crate::models::{Invocation, Representation, Response, Settings};
use crate::numeric::{Checked, CheckedArithmetic, Scalar};
use crate::schema::{self, Operation, OperationId};

pub fn invoke(settings: &Settings, invocation: &Invocation) -> Result<Value, AppError> {
  let operation = schema::resolve(&invocation.operation, &invocation.args)?;
  debug!(
    "{} -> {} ({:?}, {} args)",
    operation.name,
    operation.symbol,
    settings.representation,
    invocation.args.len()
  );

  let result = match settings.representation {
    Representation::Decimal => dispatch::<Decimal>(operation, &invocation.args),
    Representation::Float => dispatch::<f64>(operation, &invocation.args),
  };
  if let Err(err) = &result {
    warn!("{} rejected: {}", operation.name, err);
  }
  result
}

/// Envelope form of `invoke` for hosts that exchange raw JSON.
pub fn handle_request(settings: &Settings, raw: &str) -> String {
  let response = match serde_json::from_str::<Invocation>(raw) {
    Ok(invocation) => match invoke(settings, &invocation) {
      Ok(value) => Response::Ok(value),
      Err(err) => Response::Error(err),
    },
    Err(err) => {
      warn!("malformed request: {}", err);
      Response::Error(err.into())
    }
  };
  serde_json::to_string(&response).unwrap_or_else(|err| {
    warn!("response could not be encoded: {}", err);
    format!(
      r#"{{"error":{{"code":"{}","message":"response could not be encoded"}}}}"#,
      BAD_REQUEST
    )
  })
}

struct Args<'a, T> {
  operation: &'a Operation,
  raw: &'a [Option<String>],
  backend: PhantomData<T>,
}

impl<'a, T: Scalar> Args<'a, T> {
  fn new(operation: &'a Operation, raw: &'a [Option<String>]) -> Self {
    Self {
      operation,
      raw,
      backend: PhantomData,
    }
  }

  fn required(&self, index: usize) -> Result<T, AppError> {
    self.optional(index)?.ok_or_else(|| {
      AppError::new(
        ARITY,
        format!("{} requires `{}`", self.operation.name, self.param_name(index)),
      )
    })
  }

  fn optional(&self, index: usize) -> Result<Option<T>, AppError> {
    match self.raw.get(index) {
      Some(Some(raw)) => T::parse(raw).map(Some).map_err(|err| {
        AppError::new(PARSE_ERROR, format!("{}: {}", self.param_name(index), err))
      }),
      _ => Ok(None),
    }
  }

  fn param_name(&self, index: usize) -> &'static str {
    self
      .operation
      .params
      .get(index)
      .map(|param| param.name)
      .unwrap_or("?")
  }
}

/// Evaluates with overflow tracking so no input can panic the backend.
fn dispatch<T: CheckedArithmetic>(
  operation: &Operation,
  raw: &[Option<String>],
) -> Result<Value, AppError> {
  let args = Args::<Checked<T>>::new(operation, raw);
  let number = |value: Checked<T>| encode_number(operation, value);

  match operation.id {
    OperationId::ConvertMinutesToHours => number(convert_minutes_to_hours(args.required(0)?)),
    OperationId::ConvertHoursToMinutes => number(convert_hours_to_minutes(args.required(0)?)),
    OperationId::SafeDivide => number(safe_divide(
      args.required(0)?,
      args.required(1)?,
      args.optional(2)?,
    )),
    OperationId::NearlyEquals => Ok(Value::Bool(nearly_equals(args.required(0)?, args.required(1)?))),
    OperationId::NearlyEqualsOptional => {
      Ok(Value::Bool(nearly_equals_optional(args.optional(0)?, args.optional(1)?)))
    }
    OperationId::GetPercentFromAmount => {
      number(get_percent_from_amount(args.required(0)?, args.required(1)?))
    }
    OperationId::GetAmountFromPercent => {
      number(get_amount_from_percent(args.required(0)?, args.required(1)?))
    }
    OperationId::CalculateContingencyPercent => {
      number(calculate_contingency_percent(args.required(0)?, args.required(1)?))
    }
    OperationId::CalculateContingencyAmount => {
      number(calculate_contingency_amount(args.required(0)?, args.required(1)?))
    }
    OperationId::CalculateEscalationPercent => number(calculate_escalation_percent(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
    )),
    OperationId::CalculateEscalationAmount => number(calculate_escalation_amount(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
    )),
    OperationId::CalculateMarkupPercent => number(calculate_markup_percent(args.required(0)?)),
    OperationId::CalculateMarkupAmount => number(calculate_markup_amount(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
      args.required(3)?,
    )),
    OperationId::CalculateGrossMarginPercent => number(calculate_gross_margin_percent(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
      args.required(3)?,
    )),
    OperationId::CalculateGrossMarginAmount => number(calculate_gross_margin_amount(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
      args.required(3)?,
    )),
    OperationId::CalculateAggregatedFeePercent => number(calculate_aggregated_fee_percent(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
    )),
    OperationId::CalculateAggregatedFeeAmount => number(calculate_aggregated_fee_amount(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
    )),
    OperationId::CalculateTotalDirectCostWithEscalation => {
      number(calculate_total_direct_cost_with_escalation(
        args.required(0)?,
        args.required(1)?,
        args.required(2)?,
        args.required(3)?,
      ))
    }
    OperationId::CalculateTotalDirectCostWithFees => number(calculate_total_direct_cost_with_fees(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
    )),
    OperationId::CalculateSellPrice => number(calculate_sell_price(
      args.required(0)?,
      args.required(1)?,
      args.required(2)?,
      args.required(3)?,
      args.required(4)?,
    )),
  }
}

fn encode_number<T: CheckedArithmetic>(
  operation: &Operation,
  value: Checked<T>,
) -> Result<Value, AppError> {
  value
    .value()
    .map(|value| Value::String(value.encode()))
    .ok_or_else(|| {
      AppError::new(
        OVERFLOW,
        format!("{} result is outside the representable range", operation.name),
      )
    })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::error::{NOT_IMPLEMENTED, UNKNOWN_OPERATION};

  fn call(representation: Representation, operation: &str, args: &[Option<&str>]) -> Result<Value, AppError> {
    let settings = Settings {
      representation,
      ..Settings::default()
    };
    invoke(
      &settings,
      &Invocation {
        operation: operation.to_string(),
        args: args.iter().map(|arg| arg.map(str::to_string)).collect(),
      },
    )
  }

  #[test]
  fn decimal_results_keep_cents() {
    assert_eq!(
      call(Representation::Decimal, "getAmountFromPercent", &[Some("0.1"), Some("100")]),
      Ok(json!("10.00"))
    );
    assert_eq!(
      call(Representation::Decimal, "calculateContingencyAmount", &[Some("1000"), Some("0.05")]),
      Ok(json!("50.00"))
    );
  }

  #[test]
  fn float_results_are_plain_numbers() {
    assert_eq!(
      call(Representation::Float, "convertMinutesToHours", &[Some("90")]),
      Ok(json!("1.5"))
    );
    assert_eq!(
      call(Representation::Float, "safeDivide", &[Some("10"), Some("0"), Some("5")]),
      Ok(json!("5"))
    );
  }

  #[test]
  fn safe_divide_without_fallback_returns_zero() {
    assert_eq!(
      call(Representation::Decimal, "safeDivide", &[Some("10"), Some("0")]),
      Ok(json!("0"))
    );
    assert_eq!(
      call(Representation::Decimal, "safeDivide", &[Some("10"), Some("0"), None]),
      Ok(json!("0"))
    );
  }

  #[test]
  fn nearly_equals_returns_booleans() {
    assert_eq!(
      call(Representation::Decimal, "nearlyEquals", &[Some("1.00001"), Some("1.00005")]),
      Ok(json!(true))
    );
    assert_eq!(
      call(Representation::Decimal, "nearlyEquals", &[None, None]),
      Ok(json!(true))
    );
    assert_eq!(
      call(Representation::Float, "nearlyEquals", &[Some("5"), None]),
      Ok(json!(false))
    );
  }

  #[test]
  fn malformed_number_is_a_parse_error() {
    let err = call(Representation::Decimal, "calculateMarkupPercent", &[Some("twenty")]).unwrap_err();
    assert_eq!(err.code, PARSE_ERROR);
    assert!(err.message.starts_with("grossMarginPercent"));

    let err = call(Representation::Float, "convertHoursToMinutes", &[Some("inf")]).unwrap_err();
    assert_eq!(err.code, PARSE_ERROR);
  }

  #[test]
  fn optional_argument_is_still_parsed() {
    let err = call(Representation::Decimal, "safeDivide", &[Some("1"), Some("0"), Some("x")]).unwrap_err();
    assert_eq!(err.code, PARSE_ERROR);
    assert!(err.message.starts_with("fallbackValue"));
  }

  #[test]
  fn routing_errors_carry_codes() {
    assert_eq!(
      call(Representation::Decimal, "calculateTax", &[]).unwrap_err().code,
      UNKNOWN_OPERATION
    );
    assert_eq!(
      call(Representation::Decimal, "calculateSellPrice", &[Some("1")]).unwrap_err().code,
      ARITY
    );
    assert_eq!(
      call(
        Representation::Decimal,
        "calculateCompoundEscalationPercent",
        &[Some("2"), Some("0.03")]
      )
      .unwrap_err()
      .code,
      NOT_IMPLEMENTED
    );
  }

  #[test]
  fn decimal_overflow_is_reported_not_raised() {
    let max = "79228162514264337593543950335";
    for (operation, args) in [
      ("calculateTotalDirectCost", vec![Some(max), Some("1"), Some("0")]),
      ("safeDivide", vec![Some(max), Some("0.5")]),
      ("getAmountFromPercent", vec![Some(max), Some("2")]),
      ("calculateSellPrice", vec![Some(max), Some(max), Some("0"), Some("0"), Some("0")]),
    ] {
      let err = call(Representation::Decimal, operation, &args).unwrap_err();
      assert_eq!(err.code, OVERFLOW, "{}", operation);
      assert!(err.message.starts_with(operation));
    }

    assert_eq!(
      call(Representation::Decimal, "calculateTotalDirectCost", &[Some(max), Some("-1"), Some("0")]),
      Ok(json!("79228162514264337593543950334"))
    );
  }

  #[test]
  fn non_finite_float_result_is_an_overflow() {
    let err = call(Representation::Float, "safeDivide", &[Some("1e300"), Some("1e-300")]).unwrap_err();
    assert_eq!(err.code, OVERFLOW);

    let err = call(Representation::Float, "getAmountFromPercent", &[Some("1e200"), Some("1e200")]).unwrap_err();
    assert_eq!(err.code, OVERFLOW);
  }

  #[test]
  fn handle_request_survives_extreme_input() {
    let settings = Settings::default();

    let response = handle_request(
      &settings,
      r#"{"operation":"calculateTotalDirectCost","args":["79228162514264337593543950335","1","0"]}"#,
    );
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["code"], json!("OVERFLOW"));
  }

  #[test]
  fn nearly_equals_needs_both_operands() {
    assert_eq!(call(Representation::Decimal, "nearlyEquals", &[]).unwrap_err().code, ARITY);
    assert_eq!(
      call(Representation::Decimal, "nearlyEquals", &[Some("5")]).unwrap_err().code,
      ARITY
    );
    assert_eq!(call(Representation::Float, "nearlyEquals", &[None]).unwrap_err().code, ARITY);
  }

  #[test]
  fn handle_request_wraps_results_and_errors() {
    let settings = Settings::default();

    let ok = handle_request(
      &settings,
      r#"{"operation":"calculateTotalDirectCost","args":["1000","50","21"]}"#,
    );
    assert_eq!(serde_json::from_str::<Value>(&ok).unwrap(), json!({ "ok": "1071" }));

    let bad = handle_request(&settings, "not json");
    let bad: Value = serde_json::from_str(&bad).unwrap();
    assert_eq!(bad["error"]["code"], json!("BAD_REQUEST"));

    let parse = handle_request(&settings, r#"{"operation":"convertMinutesToHours","args":["ninety"]}"#);
    let parse: Value = serde_json::from_str(&parse).unwrap();
    assert_eq!(parse["error"]["code"], json!("PARSE_ERROR"));
  }
}
