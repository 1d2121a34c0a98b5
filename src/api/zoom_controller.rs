use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{TimelineError, TimelineResult};

use super::layout_config::validate_zoom_ladder;
use super::{TimelineLayoutConfig, ZoomPreference};

/// Tolerance used when comparing a continuous width against ladder rungs.
const RUNG_EPSILON_PX: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomMode {
    /// Index into the zoom ladder.
    Discrete(usize),
    /// Width derived from the container size.
    Fit,
}

/// Owns the pixels-per-day value and the discrete/fit zoom model.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    ladder_px: Vec<f64>,
    default_index: usize,
    mode: ZoomMode,
    day_width_px: f64,
    last_discrete_index: Option<usize>,
    last_fit_width_px: Option<f64>,
}

impl ZoomController {
    /// Creates a controller at `default_index` of an ascending ladder.
    pub fn new(ladder_px: Vec<f64>, default_index: usize) -> TimelineResult<Self> {
        validate_zoom_ladder(&ladder_px, default_index)?;
        let day_width_px = ladder_px[default_index];
        Ok(Self {
            ladder_px,
            default_index,
            mode: ZoomMode::Discrete(default_index),
            day_width_px,
            last_discrete_index: None,
            last_fit_width_px: None,
        })
    }

    pub fn from_config(config: &TimelineLayoutConfig) -> TimelineResult<Self> {
        Self::new(config.zoom_ladder_px.clone(), config.default_zoom_index)
    }

    #[must_use]
    pub fn day_width_px(&self) -> f64 {
        self.day_width_px
    }

    #[must_use]
    pub fn mode(&self) -> ZoomMode {
        self.mode
    }

    #[must_use]
    pub fn ladder_px(&self) -> &[f64] {
        &self.ladder_px
    }

    #[must_use]
    pub fn min_day_width_px(&self) -> f64 {
        self.ladder_px[0]
    }

    #[must_use]
    pub fn max_day_width_px(&self) -> f64 {
        self.ladder_px[self.ladder_px.len() - 1]
    }

    #[must_use]
    pub fn is_fit_zoom(&self) -> bool {
        self.mode == ZoomMode::Fit
    }

    #[must_use]
    pub fn is_min_zoom(&self) -> bool {
        self.next_lower_rung().is_none()
    }

    #[must_use]
    pub fn is_max_zoom(&self) -> bool {
        self.next_higher_rung().is_none()
    }

    /// Moves to the next rung wider than the current width.
    ///
    /// Returns `false` at the top of the ladder.
    pub fn zoom_in(&mut self) -> bool {
        match self.next_higher_rung() {
            Some(index) => {
                self.select_rung(index);
                true
            }
            None => false,
        }
    }

    /// Moves to the next rung narrower than the current width.
    ///
    /// Returns `false` at the bottom of the ladder.
    pub fn zoom_out(&mut self) -> bool {
        match self.next_lower_rung() {
            Some(index) => {
                self.select_rung(index);
                true
            }
            None => false,
        }
    }

    /// Enters fit mode and derives the day width from the container.
    ///
    /// The width is clamped to the ladder bounds. Non-finite inputs keep
    /// the current width.
    pub fn zoom_to_fit(
        &mut self,
        container_width_px: f64,
        days_in_range: u32,
        longest_label_width_px: f64,
    ) -> f64 {
        self.mode = ZoomMode::Fit;
        if !container_width_px.is_finite() || !longest_label_width_px.is_finite() {
            debug!(
                container_width_px,
                longest_label_width_px, "fit zoom skipped for non-finite input"
            );
            return self.day_width_px;
        }

        let days = f64::from(days_in_range.max(1));
        let available = (container_width_px - longest_label_width_px).max(0.0);
        let width = (available / days).clamp(self.min_day_width_px(), self.max_day_width_px());
        trace!(container_width_px, days, width, "fit zoom recomputed");

        self.day_width_px = width;
        self.last_fit_width_px = Some(width);
        width
    }

    /// Leaves fit mode for the rung nearest the last fitted width.
    ///
    /// Without a fitted width the previous discrete rung is restored, and
    /// without one of those the default rung. Returns `false` when not in
    /// fit mode.
    pub fn exit_fit_zoom(&mut self) -> bool {
        if !self.is_fit_zoom() {
            return false;
        }
        let index = self
            .last_fit_width_px
            .map(|width| self.nearest_rung_index(width))
            .or(self.last_discrete_index)
            .unwrap_or(self.default_index);
        self.select_rung(index);
        true
    }

    pub fn set_discrete_index(&mut self, index: usize) -> TimelineResult<()> {
        if index >= self.ladder_px.len() {
            return Err(TimelineError::InvalidData(format!(
                "zoom index {index} is out of bounds for {} rungs",
                self.ladder_px.len()
            )));
        }
        self.select_rung(index);
        Ok(())
    }

    /// Index of the rung closest to `width_px`; ties resolve to the narrower rung.
    #[must_use]
    pub fn nearest_rung_index(&self, width_px: f64) -> usize {
        self.ladder_px
            .iter()
            .enumerate()
            .min_by(|(_, lhs), (_, rhs)| {
                (*lhs - width_px).abs().total_cmp(&(*rhs - width_px).abs())
            })
            .map_or(self.default_index, |(index, _)| index)
    }

    #[must_use]
    pub fn preference(&self) -> ZoomPreference {
        match self.mode {
            ZoomMode::Fit => ZoomPreference::Fit,
            ZoomMode::Discrete(_) => ZoomPreference::DayWidth(self.day_width_px),
        }
    }

    /// Restores a persisted preference.
    ///
    /// A stored width snaps to the nearest rung. A stored fit keeps the
    /// current width until the next [`Self::zoom_to_fit`].
    pub fn apply_preference(&mut self, preference: ZoomPreference) {
        match preference {
            ZoomPreference::DayWidth(width) => {
                let index = self.nearest_rung_index(width);
                self.select_rung(index);
            }
            ZoomPreference::Fit => {
                self.mode = ZoomMode::Fit;
            }
        }
    }

    fn select_rung(&mut self, index: usize) {
        self.mode = ZoomMode::Discrete(index);
        self.day_width_px = self.ladder_px[index];
        self.last_discrete_index = Some(index);
        debug!(index, day_width_px = self.day_width_px, "zoom rung selected");
    }

    fn next_higher_rung(&self) -> Option<usize> {
        self.ladder_px
            .iter()
            .position(|rung| *rung > self.day_width_px + RUNG_EPSILON_PX)
    }

    fn next_lower_rung(&self) -> Option<usize> {
        self.ladder_px
            .iter()
            .rposition(|rung| *rung < self.day_width_px - RUNG_EPSILON_PX)
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        let config = TimelineLayoutConfig::default();
        let day_width_px = config.zoom_ladder_px[config.default_zoom_index];
        Self {
            ladder_px: config.zoom_ladder_px,
            default_index: config.default_zoom_index,
            mode: ZoomMode::Discrete(config.default_zoom_index),
            day_width_px,
            last_discrete_index: None,
            last_fit_width_px: None,
        }
    }
}
