//! Type inference: reservoir sampling and the type catalog.

mod columns;
mod sample;
mod types;

pub use columns::ColumnAnalyzer;
pub use sample::{Reservoir, DEFAULT_SAMPLE_CAPACITY};
pub use types::{infer_type, is_compatible, matches_type, TypeInference, TYPE_PRIORITY};

pub use crate::report::ValueType;
