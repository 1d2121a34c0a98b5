//! Versioned JSON exchange format for [`TimelineLayout`].
//!
//! Export refuses layouts that fail [`TimelineLayout::validate`]; import runs
//! the same check, so a payload that parses is always drawable.

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

use super::TimelineLayout;

pub const TIMELINE_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

/// Schema v1 envelope.
///
/// `day_count` lets hosts size a scroll area before walking the tracks. It
/// must match the layout's range on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayoutJsonContractV1 {
    pub schema_version: u32,
    pub day_count: u32,
    pub layout: TimelineLayout,
}

/// Envelope version only; a bare layout has none.
#[derive(Deserialize)]
struct SchemaHeader {
    #[serde(default)]
    schema_version: Option<u32>,
}

fn json_error(action: &'static str) -> impl FnOnce(serde_json::Error) -> TimelineError {
    move |err| TimelineError::InvalidData(format!("cannot {action} timeline layout json: {err}"))
}

impl TimelineLayout {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        self.validate()?;
        serde_json::to_string_pretty(self).map_err(json_error("write"))
    }

    pub fn to_json_contract_v1_pretty(&self) -> TimelineResult<String> {
        self.validate()?;
        let payload = TimelineLayoutJsonContractV1 {
            schema_version: TIMELINE_LAYOUT_JSON_SCHEMA_V1,
            day_count: self.range().day_count(),
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(json_error("write"))
    }

    /// Parses a bare layout, or a contract envelope when `schema_version` is
    /// present.
    ///
    /// Envelopes from other schema versions are rejected rather than read
    /// as best effort.
    pub fn from_json_compat_str(input: &str) -> TimelineResult<Self> {
        let header: SchemaHeader = serde_json::from_str(input).map_err(json_error("read"))?;

        let layout = match header.schema_version {
            None => serde_json::from_str::<Self>(input).map_err(json_error("read"))?,
            Some(TIMELINE_LAYOUT_JSON_SCHEMA_V1) => {
                let payload: TimelineLayoutJsonContractV1 =
                    serde_json::from_str(input).map_err(json_error("read"))?;
                let day_count = payload.layout.range().day_count();
                if payload.day_count != day_count {
                    return Err(TimelineError::InvalidData(format!(
                        "layout envelope declares {} days but its range covers {day_count}",
                        payload.day_count
                    )));
                }
                payload.layout
            }
            Some(version) => {
                return Err(TimelineError::InvalidData(format!(
                    "layout schema v{version} cannot be read; expected v{TIMELINE_LAYOUT_JSON_SCHEMA_V1}"
                )));
            }
        };

        layout.validate()?;
        Ok(layout)
    }
}
