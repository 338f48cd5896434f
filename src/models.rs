use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
  #[default]
  Decimal,
  Float,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
  pub representation: Representation,
  pub schema_file: String,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      representation: Representation::Decimal,
      schema_file: "estimate_calc.schema.json".to_string(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Invocation {
  pub operation: String,
  #[serde(default)]
  pub args: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
  Ok(serde_json::Value),
  Error(AppError),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
  Number,
  Integer,
  Bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParamSchema {
  pub name: String,
  pub kind: ValueKind,
  /// May be null.
  pub optional: bool,
  /// May be left off the end of the argument list.
  pub omittable: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OperationSchema {
  pub name: String,
  pub symbol: String,
  pub params: Vec<ParamSchema>,
  pub returns: ValueKind,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct KnownGap {
  pub name: String,
  pub params: Vec<ParamSchema>,
  pub note: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InterfaceDescription {
  pub package: String,
  pub version: String,
  pub representation: Representation,
  pub generated_at: String,
  pub operations: Vec<OperationSchema>,
  pub known_gaps: Vec<KnownGap>,
}
