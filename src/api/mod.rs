mod engine;
mod engine_config;
mod json_contract;

pub use engine::TimelineEngine;
pub use engine_config::TimelineConfig;
pub use json_contract::{TIMELINE_LAYOUT_JSON_SCHEMA_V1, TimelineLayoutJsonContractV1};
