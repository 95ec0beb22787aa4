//! Monotonic time abstraction.
//!
//! The render loop only ever needs "milliseconds elapsed since X", so the
//! traits are deliberately small. Implement them for `embassy_time::Instant`,
//! `esp_idf_svc::systime`, or a mock clock in tests.

/// Source of monotonic instants, typically a hardware timer.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Duration between two [`TimeInstant`]s.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to whole milliseconds.
    fn as_millis(&self) -> u64;
}

/// A point on a monotonic timeline.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations should saturate to zero if `earlier` is in the future.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Milliseconds elapsed since `earlier`.
    #[inline]
    fn millis_since(&self, earlier: Self) -> u64 {
        self.duration_since(earlier).as_millis()
    }
}
