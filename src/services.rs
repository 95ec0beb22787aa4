//! Interfaces to the subsystems the LED pipeline depends on.
//!
//! The manager polls each of these once per frame. Implementations are
//! expected to be cheap and non-blocking.

use time::PrimitiveDateTime;

/// Local wall clock, usually backed by SNTP.
pub trait WallClock {
    /// Current local date and time.
    fn local_time(&self) -> PrimitiveDateTime;

    /// Whether the clock has been synchronized at least once.
    fn is_synced(&self) -> bool;

    /// Whether it is currently between sunset and sunrise.
    fn is_night(&self) -> bool {
        false
    }
}

/// Firmware update state.
pub trait OtaStatus {
    fn in_progress(&self) -> bool;

    /// Progress in percent, 0.0-100.0.
    fn percent(&self) -> f32;
}

/// Power source detection.
pub trait PowerSense {
    /// True when a supply that can deliver more current (barrel jack) is
    /// connected.
    fn high_current_source(&self) -> bool;
}

/// Convenience bound for everything [`LedManager::update`] polls.
///
/// [`LedManager::update`]: crate::manager::LedManager::update
pub trait Environment: WallClock + OtaStatus + PowerSense {}

impl<T: WallClock + OtaStatus + PowerSense> Environment for T {}

/// Converts a raw progress value into a whole percentage.
pub(crate) fn ota_percent(raw: f32) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0) as u8
}
