//! Column-wise data-quality metrics.
//!
//! Each metric is a pure function of an immutable [`dq_model::Table`]
//! and its parameters: no caching, no shared state, and identical
//! results on repeated invocation.

pub mod completeness;
pub mod timeliness;
pub mod uniqueness;
pub mod validity;

pub use completeness::completeness;
pub use timeliness::{timeliness, timeliness_at};
pub use uniqueness::uniqueness;
pub use validity::validity;
