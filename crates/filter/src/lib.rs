//! `leadsift-filter` - contact-list email classification engine.
//!
//! Pure engine crate: receives a pre-loaded dataset, returns partitioned rows.
//! No CLI or IO dependencies.

pub mod config;
pub mod duplicates;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod partition;
pub mod prefilter;
pub mod resolve;

pub use config::FilterConfig;
pub use engine::run;
pub use error::FilterError;
pub use model::{CellValue, Dataset, PartitionKind, PartitionedReport, Record};
