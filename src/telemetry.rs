//! Opt-in tracing setup for hosts that do not install their own subscriber.
//!
//! Layout rebuilds, zoom changes and dropped input are reported through
//! `tracing`; without a subscriber they cost nothing.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "itinerary_timeline=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG` or
/// [`DEFAULT_TRACING_DIRECTIVE`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directive(DEFAULT_TRACING_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"itinerary_timeline=trace"` while debugging fit zoom.
#[must_use]
pub fn init_tracing_with_directive(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_directive))
            .unwrap_or_else(|_| EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
