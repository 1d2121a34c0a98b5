use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{Location, LocationLookup, Step, TimelineRange, layout_order, resolve_range_with};
use crate::error::TimelineResult;

use super::label_format::estimate_label_text_width_px;
use super::zoom_preference::{load_zoom_preference, store_zoom_preference};
use super::{
    PreferenceStore, ResizeThrottle, TimelineLayout, TimelineLayoutConfig, ZoomController,
    build_layout,
};

fn default_true() -> bool {
    true
}

/// Public engine bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    #[serde(default)]
    pub layout: TimelineLayoutConfig,
    /// Restore the persisted zoom choice on construction.
    #[serde(default = "default_true")]
    pub restore_zoom_preference: bool,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            layout: TimelineLayoutConfig::default(),
            restore_zoom_preference: true,
        }
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(layout: TimelineLayoutConfig) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_restore_zoom_preference(mut self, restore: bool) -> Self {
        self.restore_zoom_preference = restore;
        self
    }
}

/// Host-facing timeline engine.
///
/// Holds the current location/step snapshot, zoom state and preference
/// store. Layout is recomputed from scratch on every [`Self::layout`] call.
pub struct TimelineEngine<S: PreferenceStore> {
    config: TimelineLayoutConfig,
    store: S,
    zoom: ZoomController,
    resize_throttle: ResizeThrottle,
    locations: Vec<Location>,
    steps: Vec<Step>,
    container_width_px: Option<f64>,
}

impl<S: PreferenceStore> TimelineEngine<S> {
    pub fn new(store: S, config: TimelineEngineConfig) -> TimelineResult<Self> {
        let TimelineEngineConfig {
            layout,
            restore_zoom_preference,
        } = config;
        layout.validate()?;

        let mut zoom = ZoomController::from_config(&layout)?;
        if restore_zoom_preference {
            if let Some(preference) = load_zoom_preference(&store, &layout.zoom_preference_key) {
                debug!(?preference, "restoring zoom preference");
                zoom.apply_preference(preference);
            }
        }

        Ok(Self {
            resize_throttle: ResizeThrottle::from_millis(layout.resize_throttle_ms),
            config: layout,
            store,
            zoom,
            locations: Vec::new(),
            steps: Vec::new(),
            container_width_px: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineLayoutConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn container_width_px(&self) -> Option<f64> {
        self.container_width_px
    }

    /// Replaces the location snapshot.
    pub fn set_locations(&mut self, locations: Vec<Location>) {
        debug!(count = locations.len(), "set locations");
        self.locations = locations;
        self.refit_if_needed();
    }

    /// Replaces the step snapshot.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        debug!(count = steps.len(), "set steps");
        self.steps = steps;
        self.refit_if_needed();
    }

    /// Replaces both snapshots with a single refit.
    pub fn set_snapshot(&mut self, locations: Vec<Location>, steps: Vec<Step>) {
        debug!(
            locations = locations.len(),
            steps = steps.len(),
            "set snapshot"
        );
        self.locations = locations;
        self.steps = steps;
        self.refit_if_needed();
    }

    #[must_use]
    pub fn day_width_px(&self) -> f64 {
        self.zoom.day_width_px()
    }

    #[must_use]
    pub fn is_min_zoom(&self) -> bool {
        self.zoom.is_min_zoom()
    }

    #[must_use]
    pub fn is_max_zoom(&self) -> bool {
        self.zoom.is_max_zoom()
    }

    #[must_use]
    pub fn is_fit_zoom(&self) -> bool {
        self.zoom.is_fit_zoom()
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.zoom.zoom_in();
        if changed {
            self.persist_zoom();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.zoom.zoom_out();
        if changed {
            self.persist_zoom();
        }
        changed
    }

    /// Enters fit mode against `container_width_px`; returns the new day width.
    pub fn zoom_to_fit(&mut self, container_width_px: f64) -> f64 {
        if container_width_px.is_finite() && container_width_px >= 0.0 {
            self.container_width_px = Some(container_width_px);
        }
        let width = self.refit(container_width_px);
        self.persist_zoom();
        width
    }

    /// Leaves fit mode for the nearest discrete rung.
    pub fn exit_fit_zoom(&mut self) -> bool {
        let changed = self.zoom.exit_fit_zoom();
        if changed {
            self.persist_zoom();
        }
        changed
    }

    /// Feeds a container-resize event through the throttle.
    ///
    /// Returns `true` when a fit recompute ran.
    pub fn on_container_resized(&mut self, width_px: f64, now: Instant) -> bool {
        match self.resize_throttle.on_resize(width_px, now) {
            Some(width_px) => self.apply_container_width(width_px),
            None => false,
        }
    }

    /// Releases a throttled resize whose window has elapsed.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        match self.resize_throttle.poll(now) {
            Some(width_px) => self.apply_container_width(width_px),
            None => false,
        }
    }

    #[must_use]
    pub fn next_resize_deadline(&self) -> Option<Instant> {
        self.resize_throttle.next_deadline()
    }

    /// Strict check that every step endpoint names a known location.
    pub fn validate_snapshot(&self) -> TimelineResult<()> {
        LocationLookup::new(&self.locations).validate_steps(&self.steps)
    }

    /// Range of the current snapshot, resolved over the same step order
    /// [`Self::layout`] uses so fit zoom and drawing agree on the day count.
    #[must_use]
    pub fn range(&self) -> TimelineRange {
        let lookup = LocationLookup::new(&self.locations);
        resolve_range_with(layout_order(&self.steps, &lookup), &lookup)
    }

    /// Recomputes the layout for the current snapshot and zoom.
    #[must_use]
    pub fn layout(&self) -> TimelineLayout {
        build_layout(
            &self.steps,
            &self.locations,
            self.zoom.day_width_px(),
            &self.config,
        )
    }

    /// Width reserved left of the first day when fitting.
    ///
    /// The larger of the configured label column and the widest estimated
    /// name of a location referenced by a step.
    #[must_use]
    pub fn longest_location_label_width_px(&self) -> f64 {
        let lookup = LocationLookup::new(&self.locations);
        self.steps
            .iter()
            .flat_map(Step::location_ids)
            .filter_map(|id| lookup.get(id))
            .map(|location| {
                estimate_label_text_width_px(&location.name, self.config.label_font_size_px)
                    + 2.0 * self.config.label_padding_px
            })
            .fold(self.config.location_label_width_px, f64::max)
    }

    fn apply_container_width(&mut self, width_px: f64) -> bool {
        self.container_width_px = Some(width_px);
        if !self.zoom.is_fit_zoom() {
            trace!(width_px, "container resized outside fit zoom");
            return false;
        }
        self.refit(width_px);
        true
    }

    fn refit_if_needed(&mut self) {
        if !self.zoom.is_fit_zoom() {
            return;
        }
        if let Some(width_px) = self.container_width_px {
            self.refit(width_px);
        }
    }

    fn refit(&mut self, container_width_px: f64) -> f64 {
        let days = self.range().day_count();
        let label_width_px = self.longest_location_label_width_px();
        self.zoom.zoom_to_fit(container_width_px, days, label_width_px)
    }

    fn persist_zoom(&mut self) {
        let preference = self.zoom.preference();
        if let Err(err) = store_zoom_preference(
            &mut self.store,
            &self.config.zoom_preference_key,
            preference,
        ) {
            warn!(error = %err, "failed to persist zoom preference");
        }
    }
}
