use indexmap::IndexMap;

use crate::core::types::{Location, LocationId, Step};
use crate::error::{TimelineError, TimelineResult};

/// Borrowed id index over a location snapshot.
///
/// Duplicate ids keep the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct LocationLookup<'a> {
    by_id: IndexMap<&'a LocationId, &'a Location>,
}

impl<'a> LocationLookup<'a> {
    #[must_use]
    pub fn new(locations: &'a [Location]) -> Self {
        let mut by_id = IndexMap::with_capacity(locations.len());
        for location in locations {
            by_id.entry(&location.id).or_insert(location);
        }
        Self { by_id }
    }

    #[must_use]
    pub fn get(&self, id: &LocationId) -> Option<&'a Location> {
        self.by_id.get(id).copied()
    }

    pub fn require(&self, id: &LocationId) -> TimelineResult<&'a Location> {
        self.get(id).ok_or_else(|| TimelineError::UnknownLocation {
            location_id: id.to_string(),
        })
    }

    /// Fails on the first step endpoint with no matching location.
    ///
    /// Layout tolerates such steps by dropping them; this is for hosts that
    /// want to reject the snapshot instead.
    pub fn validate_steps(&self, steps: &[Step]) -> TimelineResult<()> {
        for step in steps {
            for id in step.location_ids() {
                self.require(id)?;
            }
        }
        Ok(())
    }

    /// True when every location the step references is present.
    #[must_use]
    pub fn resolves(&self, step: &Step) -> bool {
        step.location_ids().iter().all(|id| self.by_id.contains_key(*id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
