use serde::{Deserialize, Serialize};

use crate::core::TimelineLayout;
use crate::error::{TimelineError, TimelineResult};

pub const TIMELINE_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayoutJsonContractV1 {
    pub schema_version: u32,
    pub layout: TimelineLayout,
}

impl TimelineLayout {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize layout json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        let payload = TimelineLayoutJsonContractV1 {
            schema_version: TIMELINE_LAYOUT_JSON_SCHEMA_V1,
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize layout contract v1: {e}"))
        })
    }

    /// Accepts either a bare layout or a versioned contract envelope.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        if let Ok(layout) = serde_json::from_str::<TimelineLayout>(input) {
            return Ok(layout);
        }
        let payload: TimelineLayoutJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse layout json payload: {e}"))
        })?;
        if payload.schema_version != TIMELINE_LAYOUT_JSON_SCHEMA_V1 {
            return Err(TimelineError::InvalidData(format!(
                "unsupported layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.layout)
    }
}
