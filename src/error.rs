use serde::Serialize;

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
pub const ARITY: &str = "ARITY";
pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";
pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const OVERFLOW: &str = "OVERFLOW";
pub const IO_ERROR: &str = "IO_ERROR";
pub const PATH: &str = "PATH";
pub const SETTINGS: &str = "SETTINGS";
pub const SCHEMA: &str = "SCHEMA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppError {
  pub code: String,
  pub message: String,
}

impl AppError {
  pub fn new(code: &str, message: impl Into<String>) -> Self {
    Self {
      code: code.to_string(),
      message: message.into(),
    }
  }
}

impl std::fmt::Display for AppError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
  fn from(err: serde_json::Error) -> Self {
    AppError::new(BAD_REQUEST, err.to_string())
  }
}

impl From<std::io::Error> for AppError {
  fn from(err: std::io::Error) -> Self {
    AppError::new(IO_ERROR, err.to_string())
  }
}
