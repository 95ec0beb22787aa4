//! Shared test infrastructure for ws2812-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use time::{Date, Month, PrimitiveDateTime, Time};
use ws2812_clock::{
    LED_COUNT, LedStrip, OtaStatus, PowerSense, RGB8, TimeDuration, TimeInstant, TimeSource,
    WallClock,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

/// Mock strip that records every flushed frame and governance call
pub struct MockStrip {
    pub frames: Vec<Vec<RGB8>>,
    pub brightness_history: Vec<u8>,
    pub power_limits: Vec<(u8, u32)>,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            brightness_history: Vec::new(),
            power_limits: Vec::new(),
        }
    }

    pub fn last_frame(&self) -> &[RGB8] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn last_brightness(&self) -> Option<u8> {
        self.brightness_history.last().copied()
    }
}

impl LedStrip for MockStrip {
    fn write(&mut self, leds: &[RGB8]) {
        assert_eq!(leds.len(), LED_COUNT);
        self.frames.push(leds.to_vec());
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness_history.push(brightness);
    }

    fn set_power_limit(&mut self, volts: u8, milliamps: u32) {
        self.power_limits.push((volts, milliamps));
    }
}

// ============================================================================
// Mock Environment
// ============================================================================

/// Clock, OTA and power services with settable state
pub struct MockEnvironment {
    pub local_time: Cell<PrimitiveDateTime>,
    pub synced: Cell<bool>,
    pub night: Cell<bool>,
    pub ota_in_progress: Cell<bool>,
    pub ota_percent: Cell<f32>,
    pub high_current: Cell<bool>,
}

impl MockEnvironment {
    /// Synced clock at 12:34:00, no update running, USB power
    pub fn new() -> Self {
        Self {
            local_time: Cell::new(datetime(12, 34, 0)),
            synced: Cell::new(true),
            night: Cell::new(false),
            ota_in_progress: Cell::new(false),
            ota_percent: Cell::new(0.0),
            high_current: Cell::new(false),
        }
    }

    pub fn set_time(&self, hour: u8, minute: u8) {
        self.local_time.set(datetime(hour, minute, 0));
    }

    pub fn start_ota(&self, percent: f32) {
        self.ota_in_progress.set(true);
        self.ota_percent.set(percent);
    }

    pub fn finish_ota(&self) {
        self.ota_in_progress.set(false);
    }
}

impl WallClock for MockEnvironment {
    fn local_time(&self) -> PrimitiveDateTime {
        self.local_time.get()
    }

    fn is_synced(&self) -> bool {
        self.synced.get()
    }

    fn is_night(&self) -> bool {
        self.night.get()
    }
}

impl OtaStatus for MockEnvironment {
    fn in_progress(&self) -> bool {
        self.ota_in_progress.get()
    }

    fn percent(&self) -> f32 {
        self.ota_percent.get()
    }
}

impl PowerSense for MockEnvironment {
    fn high_current_source(&self) -> bool {
        self.high_current.get()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub const RED: RGB8 = RGB8::new(255, 0, 0);
pub const BLUE: RGB8 = RGB8::new(0, 0, 255);

/// A date in mid June 2024 at the given time
pub fn datetime(hour: u8, minute: u8, second: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(2024, Month::June, 15).unwrap(),
        Time::from_hms(hour, minute, second).unwrap(),
    )
}

pub fn all_equal(leds: &[RGB8], color: RGB8) -> bool {
    leds.iter().all(|led| *led == color)
}
