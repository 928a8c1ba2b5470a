pub mod error;
pub mod metric;
pub mod rule;
pub mod table;
pub mod timeliness;

pub use error::{QualityError, Result};
pub use metric::MetricResult;
pub use rule::{RuleKind, RuleOperand, ValidityRule};
pub use table::{CellValue, Column, Table};
pub use timeliness::{Cutoff, Frequency, TimelinessConfig};
