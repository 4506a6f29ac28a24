pub mod analyzer;
pub mod batch;
pub mod exporter;
pub mod levels;

pub use crate::domain::model::{
    BatchEntry, BatchResult, CsvRow, KeywordCollection, KeywordKind, KeywordResult,
};
pub use crate::domain::ports::{KeywordSource, Storage};
pub use crate::utils::error::Result;
