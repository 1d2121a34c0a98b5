use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{TimelineError, TimelineResult};

const FIT_MODE: &str = "fit";

/// Persisted zoom choice: a discrete day width or continuous fit.
///
/// Serializes as a JSON number or the string `"fit"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZoomPreferenceRepr", into = "ZoomPreferenceRepr")]
pub enum ZoomPreference {
    DayWidth(f64),
    Fit,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ZoomPreferenceRepr {
    DayWidth(f64),
    Mode(String),
}

impl TryFrom<ZoomPreferenceRepr> for ZoomPreference {
    type Error = TimelineError;

    fn try_from(value: ZoomPreferenceRepr) -> Result<Self, Self::Error> {
        match value {
            ZoomPreferenceRepr::DayWidth(width) if width.is_finite() && width > 0.0 => {
                Ok(Self::DayWidth(width))
            }
            ZoomPreferenceRepr::DayWidth(width) => Err(TimelineError::Preference(format!(
                "day width must be finite and > 0, got {width}"
            ))),
            ZoomPreferenceRepr::Mode(mode) if mode == FIT_MODE => Ok(Self::Fit),
            ZoomPreferenceRepr::Mode(mode) => Err(TimelineError::Preference(format!(
                "unknown zoom mode `{mode}`"
            ))),
        }
    }
}

impl From<ZoomPreference> for ZoomPreferenceRepr {
    fn from(value: ZoomPreference) -> Self {
        match value {
            ZoomPreference::DayWidth(width) => Self::DayWidth(width),
            ZoomPreference::Fit => Self::Mode(FIT_MODE.to_owned()),
        }
    }
}

impl ZoomPreference {
    pub fn to_json(self) -> TimelineResult<String> {
        serde_json::to_string(&self).map_err(|e| {
            TimelineError::Preference(format!("failed to serialize zoom preference: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            TimelineError::Preference(format!("failed to parse zoom preference: {e}"))
        })
    }
}

/// Host-owned key/value port used to persist the zoom choice.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-process store for headless hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }
}

/// Reads the stored preference; unreadable values count as absent.
pub fn load_zoom_preference<S: PreferenceStore + ?Sized>(
    store: &S,
    key: &str,
) -> Option<ZoomPreference> {
    let raw = store.get(key)?;
    match ZoomPreference::from_json_str(&raw) {
        Ok(preference) => Some(preference),
        Err(err) => {
            warn!(key, error = %err, "ignoring unreadable zoom preference");
            None
        }
    }
}

pub fn store_zoom_preference<S: PreferenceStore + ?Sized>(
    store: &mut S,
    key: &str,
    preference: ZoomPreference,
) -> TimelineResult<()> {
    store.set(key, preference.to_json()?);
    Ok(())
}
