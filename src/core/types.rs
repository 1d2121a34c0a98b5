use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::calendar::is_supported_timestamp;
use crate::error::{TimelineError, TimelineResult};

/// Supported UTC offset range, in whole hours.
pub const MIN_UTC_OFFSET_HOURS: i32 = -12;
pub const MAX_UTC_OFFSET_HOURS: i32 = 12;

/// Opaque location identifier owned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque step identifier owned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StepId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StepId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub coordinates: Coordinates,
    pub timezone_offset: i32,
}

impl Location {
    #[must_use]
    pub fn new(
        id: impl Into<LocationId>,
        name: impl Into<String>,
        coordinates: Coordinates,
        timezone_offset: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            timezone_offset,
        }
    }

    /// Offset in hours, clamped to the supported range.
    #[must_use]
    pub fn utc_offset_hours(&self) -> i32 {
        self.timezone_offset
            .clamp(MIN_UTC_OFFSET_HOURS, MAX_UTC_OFFSET_HOURS)
    }
}

/// Step payload; a move always carries both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepKind {
    #[serde(rename_all = "camelCase")]
    Stay { location_id: LocationId },
    #[serde(rename_all = "camelCase")]
    Move {
        start_location_id: LocationId,
        finish_location_id: LocationId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: StepId,
    #[serde(flatten)]
    pub kind: StepKind,
    pub start_timestamp: i64,
    pub finish_timestamp: i64,
    pub start_date: String,
    pub finish_date: String,
}

impl Step {
    /// Builds a stay step at one location.
    pub fn stay(
        id: impl Into<StepId>,
        location_id: impl Into<LocationId>,
        start_timestamp: i64,
        finish_timestamp: i64,
    ) -> TimelineResult<Self> {
        validate_interval(start_timestamp, finish_timestamp)?;
        Ok(Self {
            id: id.into(),
            kind: StepKind::Stay {
                location_id: location_id.into(),
            },
            start_timestamp,
            finish_timestamp,
            start_date: String::new(),
            finish_date: String::new(),
        })
    }

    /// Builds a move step between two distinct locations.
    pub fn moving(
        id: impl Into<StepId>,
        start_location_id: impl Into<LocationId>,
        finish_location_id: impl Into<LocationId>,
        start_timestamp: i64,
        finish_timestamp: i64,
    ) -> TimelineResult<Self> {
        validate_interval(start_timestamp, finish_timestamp)?;
        let start_location_id = start_location_id.into();
        let finish_location_id = finish_location_id.into();
        if start_location_id == finish_location_id {
            return Err(TimelineError::InvalidData(format!(
                "move step endpoints must differ (both `{start_location_id}`)"
            )));
        }

        Ok(Self {
            id: id.into(),
            kind: StepKind::Move {
                start_location_id,
                finish_location_id,
            },
            start_timestamp,
            finish_timestamp,
            start_date: String::new(),
            finish_date: String::new(),
        })
    }

    /// False for steps deserialized or built field-by-field with timestamps
    /// the constructors would reject.
    #[must_use]
    pub fn has_supported_timestamps(&self) -> bool {
        is_supported_timestamp(self.start_timestamp) && is_supported_timestamp(self.finish_timestamp)
    }

    /// Attaches the ISO date strings used for label rendering.
    #[must_use]
    pub fn with_dates(mut self, start_date: impl Into<String>, finish_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self.finish_date = finish_date.into();
        self
    }

    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self.kind, StepKind::Move { .. })
    }

    #[must_use]
    pub fn start_location_id(&self) -> &LocationId {
        match &self.kind {
            StepKind::Stay { location_id } => location_id,
            StepKind::Move {
                start_location_id, ..
            } => start_location_id,
        }
    }

    /// Finish location for a move, the single location for a stay.
    #[must_use]
    pub fn finish_location_id(&self) -> &LocationId {
        match &self.kind {
            StepKind::Stay { location_id } => location_id,
            StepKind::Move {
                finish_location_id, ..
            } => finish_location_id,
        }
    }

    /// Locations referenced by this step, start first.
    #[must_use]
    pub fn location_ids(&self) -> SmallVec<[&LocationId; 2]> {
        match &self.kind {
            StepKind::Stay { location_id } => smallvec![location_id],
            StepKind::Move {
                start_location_id,
                finish_location_id,
            } => smallvec![start_location_id, finish_location_id],
        }
    }
}

fn validate_interval(start_timestamp: i64, finish_timestamp: i64) -> TimelineResult<()> {
    for timestamp in [start_timestamp, finish_timestamp] {
        if !is_supported_timestamp(timestamp) {
            return Err(TimelineError::InvalidData(format!(
                "step timestamp {timestamp} is outside the supported calendar"
            )));
        }
    }
    if finish_timestamp < start_timestamp {
        return Err(TimelineError::InvalidData(format!(
            "step finish ({finish_timestamp}) precedes start ({start_timestamp})"
        )));
    }
    Ok(())
}
