//! Core domain types: records, categories, seasons and configuration.

mod category;
mod config;
mod record;
mod season;

pub use category::StressCategory;
pub use config::{ConfidenceThresholds, EngineConfig};
pub(crate) use record::json_type_name;
pub use record::{parse_date, parse_history, HistoricalRecord, RawLevel, RawRecord, LEVEL_UNIT};
pub use season::{RechargeEntry, Season};
