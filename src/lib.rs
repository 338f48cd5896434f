//! Cost, percent and amount formulas for estimate line items.

pub mod commands;
pub mod domain;
pub mod error;
pub mod models;
pub mod numeric;
pub mod schema;
pub mod settings;

pub use error::AppError;
pub use numeric::{ParseError, Scalar};
