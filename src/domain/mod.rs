pub mod breakdown;
pub mod formulas;
pub mod primitives;
pub mod time;
pub mod totals;

pub use formulas::*;
pub use primitives::*;
pub use time::*;
pub use totals::*;
