//! The published function surface.
//!
//! `OPERATIONS` is the single table both the host boundary dispatches on and the
//! exported interface description is generated from. Overloads are separate rows
//! sharing a contract name.

use chrono::Utc;

use crate::error::{AppError, ARITY, NOT_IMPLEMENTED, SCHEMA, UNKNOWN_OPERATION};
use crate::models::{
  InterfaceDescription, KnownGap, OperationSchema, ParamSchema, Representation, ValueKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationId {
  ConvertMinutesToHours,
  ConvertHoursToMinutes,
  SafeDivide,
  NearlyEquals,
  NearlyEqualsOptional,
  GetPercentFromAmount,
  GetAmountFromPercent,
  CalculateContingencyPercent,
  CalculateContingencyAmount,
  CalculateEscalationPercent,
  CalculateEscalationAmount,
  CalculateMarkupPercent,
  CalculateMarkupAmount,
  CalculateGrossMarginPercent,
  CalculateGrossMarginAmount,
  CalculateAggregatedFeePercent,
  CalculateAggregatedFeeAmount,
  CalculateTotalDirectCostWithEscalation,
  CalculateTotalDirectCostWithFees,
  CalculateSellPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
  Required,
  /// Positional but may be null.
  Nullable,
  /// Trailing; may be null or left off entirely.
  Omittable,
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
  pub name: &'static str,
  pub kind: ValueKind,
  pub presence: Presence,
}

#[derive(Debug)]
pub struct Operation {
  pub name: &'static str,
  pub symbol: &'static str,
  pub id: OperationId,
  pub params: &'static [Param],
  pub returns: ValueKind,
}

pub struct Gap {
  pub name: &'static str,
  pub params: &'static [Param],
  pub note: &'static str,
}

const fn req(name: &'static str) -> Param {
  Param {
    name,
    kind: ValueKind::Number,
    presence: Presence::Required,
  }
}

const fn nullable(name: &'static str) -> Param {
  Param {
    name,
    kind: ValueKind::Number,
    presence: Presence::Nullable,
  }
}

const fn opt(name: &'static str) -> Param {
  Param {
    name,
    kind: ValueKind::Number,
    presence: Presence::Omittable,
  }
}

const fn int(name: &'static str) -> Param {
  Param {
    name,
    kind: ValueKind::Integer,
    presence: Presence::Required,
  }
}

pub static OPERATIONS: &[Operation] = &[
  Operation {
    name: "convertMinutesToHours",
    symbol: "convert_minutes_to_hours",
    id: OperationId::ConvertMinutesToHours,
    params: &[req("minutes")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "convertHoursToMinutes",
    symbol: "convert_hours_to_minutes",
    id: OperationId::ConvertHoursToMinutes,
    params: &[req("hours")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "safeDivide",
    symbol: "safe_divide",
    id: OperationId::SafeDivide,
    params: &[req("firstValue"), req("secondValue"), opt("fallbackValue")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "nearlyEquals",
    symbol: "nearly_equals",
    id: OperationId::NearlyEquals,
    params: &[req("firstValue"), req("secondValue")],
    returns: ValueKind::Bool,
  },
  Operation {
    name: "nearlyEquals",
    symbol: "nearly_equals_optional",
    id: OperationId::NearlyEqualsOptional,
    params: &[nullable("firstValue"), nullable("secondValue")],
    returns: ValueKind::Bool,
  },
  Operation {
    name: "getPercentFromAmount",
    symbol: "get_percent_from_amount",
    id: OperationId::GetPercentFromAmount,
    params: &[req("amount"), req("cost")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "getAmountFromPercent",
    symbol: "get_amount_from_percent",
    id: OperationId::GetAmountFromPercent,
    params: &[req("percent"), req("cost")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateContingencyPercent",
    symbol: "calculate_contingency_percent",
    id: OperationId::CalculateContingencyPercent,
    params: &[req("directCost"), req("contingencyAmount")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateContingencyAmount",
    symbol: "calculate_contingency_amount",
    id: OperationId::CalculateContingencyAmount,
    params: &[req("directCost"), req("contingencyPercent")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateEscalationPercent",
    symbol: "calculate_escalation_percent",
    id: OperationId::CalculateEscalationPercent,
    params: &[req("directCost"), req("contingencyAmount"), req("escalationAmount")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateEscalationAmount",
    symbol: "calculate_escalation_amount",
    id: OperationId::CalculateEscalationAmount,
    params: &[req("directCost"), req("contingencyPercent"), req("escalationPercent")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateMarkupPercent",
    symbol: "calculate_markup_percent",
    id: OperationId::CalculateMarkupPercent,
    params: &[req("grossMarginPercent")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateMarkupAmount",
    symbol: "calculate_markup_amount",
    id: OperationId::CalculateMarkupAmount,
    params: &[
      req("directCost"),
      req("contingencyPercent"),
      req("aggregatedFeePercent"),
      req("markupPercent"),
    ],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateGrossMarginPercent",
    symbol: "calculate_gross_margin_percent",
    id: OperationId::CalculateGrossMarginPercent,
    params: &[
      req("directCost"),
      req("contingencyAmount"),
      req("aggregatedFeeAmount"),
      req("grossMarginAmount"),
    ],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateGrossMarginAmount",
    symbol: "calculate_gross_margin_amount",
    id: OperationId::CalculateGrossMarginAmount,
    params: &[
      req("directCost"),
      req("contingencyPercent"),
      req("aggregatedFeePercent"),
      req("grossMarginPercent"),
    ],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateAggregatedFeePercent",
    symbol: "calculate_aggregated_fee_percent",
    id: OperationId::CalculateAggregatedFeePercent,
    params: &[req("directCost"), req("contingencyAmount"), req("aggregatedFeeAmount")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateAggregatedFeeAmount",
    symbol: "calculate_aggregated_fee_amount",
    id: OperationId::CalculateAggregatedFeeAmount,
    params: &[req("directCost"), req("contingencyPercent"), req("aggregatedFeePercent")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateTotalDirectCost",
    symbol: "calculate_total_direct_cost_with_escalation",
    id: OperationId::CalculateTotalDirectCostWithEscalation,
    params: &[
      req("directCost"),
      req("contingencyAmount"),
      req("escalationAmount"),
      req("materialFeeAmount"),
    ],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateTotalDirectCost",
    symbol: "calculate_total_direct_cost_with_fees",
    id: OperationId::CalculateTotalDirectCostWithFees,
    params: &[req("directCost"), req("contingencyAmount"), req("aggregatedFeeAmount")],
    returns: ValueKind::Number,
  },
  Operation {
    name: "calculateSellPrice",
    symbol: "calculate_sell_price",
    id: OperationId::CalculateSellPrice,
    params: &[
      req("directCost"),
      req("contingencyAmount"),
      req("escalationAmount"),
      req("materialFeeAmount"),
      req("grossMarginAmount"),
    ],
    returns: ValueKind::Number,
  },
];

pub static KNOWN_GAPS: &[Gap] = &[Gap {
  name: "calculateCompoundEscalationPercent",
  params: &[int("termOrder"), req("compoundEscalationPercent")],
  note: "declared in the published interface but without an agreed formula; awaiting product clarification",
}];

impl Operation {
  /// Arguments that must be passed, null or not.
  pub fn min_args(&self) -> usize {
    self
      .params
      .iter()
      .filter(|param| param.presence != Presence::Omittable)
      .count()
  }

  /// Whether `args` fits this row: arity in range and no required argument null.
  pub fn accepts(&self, args: &[Option<String>]) -> bool {
    args.len() >= self.min_args()
      && args.len() <= self.params.len()
      && self
        .params
        .iter()
        .zip(args)
        .all(|(param, arg)| param.presence != Presence::Required || arg.is_some())
  }

  fn to_schema(&self) -> OperationSchema {
    OperationSchema {
      name: self.name.to_string(),
      symbol: self.symbol.to_string(),
      params: params_schema(self.params),
      returns: self.returns,
    }
  }
}

/// Picks the overload of `name` that accepts `args`.
pub fn resolve(name: &str, args: &[Option<String>]) -> Result<&'static Operation, AppError> {
  let mut candidates = OPERATIONS.iter().filter(|operation| operation.name == name).peekable();
  if candidates.peek().is_none() {
    if let Some(gap) = KNOWN_GAPS.iter().find(|gap| gap.name == name) {
      return Err(AppError::new(
        NOT_IMPLEMENTED,
        format!("{} is not implemented: {}", gap.name, gap.note),
      ));
    }
    return Err(AppError::new(
      UNKNOWN_OPERATION,
      format!("unknown operation `{}`", name),
    ));
  }

  candidates
    .find(|operation| operation.accepts(args))
    .ok_or_else(|| {
      AppError::new(
        ARITY,
        format!("no overload of {} accepts {} argument(s) in that shape", name, args.len()),
      )
    })
}

pub fn describe(representation: Representation) -> InterfaceDescription {
  InterfaceDescription {
    package: env!("CARGO_PKG_NAME").to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    representation,
    generated_at: Utc::now().to_rfc3339(),
    operations: OPERATIONS.iter().map(Operation::to_schema).collect(),
    known_gaps: KNOWN_GAPS
      .iter()
      .map(|gap| KnownGap {
        name: gap.name.to_string(),
        params: params_schema(gap.params),
        note: gap.note.to_string(),
      })
      .collect(),
  }
}

pub fn export_json(representation: Representation) -> Result<String, AppError> {
  serde_json::to_string_pretty(&describe(representation))
    .map_err(|err| AppError::new(SCHEMA, err.to_string()))
}

fn params_schema(params: &[Param]) -> Vec<ParamSchema> {
  params
    .iter()
    .map(|param| ParamSchema {
      name: param.name.to_string(),
      kind: param.kind,
      optional: param.presence != Presence::Required,
      omittable: param.presence == Presence::Omittable,
    })
    .collect()
}
