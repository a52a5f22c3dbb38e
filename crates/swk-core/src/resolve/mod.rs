//! Schema reference resolution and per-operation analysis.

pub mod operation;
pub mod types;

pub use operation::{analyze, analyze_all};
pub use types::{resolve_type, type_for_property};
