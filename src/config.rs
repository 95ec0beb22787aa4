//! LED related configuration values.
//!
//! The render path reads these as-is. Validation happens once, when a value
//! is written through [`LedConfig::validate`] or a [`LedCommand`].
//!
//! [`LedCommand`]: crate::command::LedCommand

use smart_leds::RGB8;

use crate::animation::AnimationId;
use crate::colors::{BLACK, WHITE};
use crate::governor::{
    BrightnessSmoothing, CurrentBudget, SecondaryBrightnessMode, TimeRange, WindowBoundary,
};
use crate::registry::AnimationRegistry;
use crate::time::TimeInstant;

/// Maximum stored length of the digit override text.
pub const OVERRIDE_TEXT_CAPACITY: usize = 16;

/// Text shown instead of the time when non-empty.
pub type OverrideText = heapless::String<OVERRIDE_TEXT_CAPACITY>;

/// Default primary color, a slightly warm white.
pub const DEFAULT_PRIMARY_COLOR: RGB8 = RGB8::new(255, 235, 235);

/// Errors from validating configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The animation is not registered.
    UnknownAnimation(AnimationId),
    /// A range end lies beyond 24 hours.
    InvalidTimeRange { start_secs: u32, end_secs: u32 },
    /// Speed multiplier is not a finite, positive number.
    InvalidSpeedMultiplier,
    /// Override text exceeds [`OVERRIDE_TEXT_CAPACITY`].
    OverrideTextTooLong,
    /// Exponential smoothing factor outside `[0, 1)`.
    InvalidSmoothing,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::UnknownAnimation(id) => {
                write!(f, "invalid animation name '{}'", id.name())
            }
            ConfigError::InvalidTimeRange {
                start_secs,
                end_secs,
            } => write!(
                f,
                "invalid time range {}..{}, values must not exceed 24h",
                start_secs, end_secs
            ),
            ConfigError::InvalidSpeedMultiplier => {
                write!(f, "speed multiplier must be finite and positive")
            }
            ConfigError::InvalidSmoothing => {
                write!(f, "smoothing factor must be at least 0 and below 1")
            }
            ConfigError::OverrideTextTooLong => write!(
                f,
                "override text longer than {} characters",
                OVERRIDE_TEXT_CAPACITY
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Everything the LED manager reads from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LedConfig {
    /// Master switch; when off the LEDs fade to black.
    pub animation_enabled: bool,
    /// Show the time even before the clock has been synced.
    pub show_unsynced_time: bool,
    pub animation: AnimationId,
    pub primary_color: RGB8,
    pub secondary_color: RGB8,
    pub tertiary_color: RGB8,
    pub brightness: u8,
    pub secondary_brightness: u8,
    pub secondary_brightness_mode: SecondaryBrightnessMode,
    pub secondary_brightness_range: TimeRange,
    pub window_boundary: WindowBoundary,
    pub smoothing: BrightnessSmoothing,
    /// Keep the dots lit instead of blinking them.
    pub disable_dot_blinking: bool,
    /// Skip segment masking so animations cover whole digits.
    pub no_clock_digits: bool,
    pub override_text: OverrideText,
    pub speed_multiplier: f32,
    pub current_budget: CurrentBudget,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            animation_enabled: true,
            show_unsynced_time: false,
            animation: AnimationId::Rainbow,
            primary_color: DEFAULT_PRIMARY_COLOR,
            secondary_color: WHITE,
            tertiary_color: BLACK,
            brightness: 50,
            secondary_brightness: 10,
            secondary_brightness_mode: SecondaryBrightnessMode::Off,
            secondary_brightness_range: TimeRange::default(),
            window_boundary: WindowBoundary::default(),
            smoothing: BrightnessSmoothing::default(),
            disable_dot_blinking: true,
            no_clock_digits: false,
            override_text: OverrideText::new(),
            speed_multiplier: 1.0,
            current_budget: CurrentBudget::default(),
        }
    }
}

impl LedConfig {
    /// Defaults with the animation set to the first one in `registry`.
    pub fn for_registry<I: TimeInstant>(registry: &AnimationRegistry<I>) -> Self {
        let mut config = Self::default();
        if let Some(first) = registry.first() {
            config.animation = first;
        }
        config
    }

    /// Replaces the override text.
    pub fn set_override_text(&mut self, text: &str) -> Result<(), ConfigError> {
        let mut stored = OverrideText::new();
        stored
            .push_str(text)
            .map_err(|_| ConfigError::OverrideTextTooLong)?;
        self.override_text = stored;
        Ok(())
    }

    /// Checks every value the config store constrains.
    pub fn validate<I: TimeInstant>(
        &self,
        registry: &AnimationRegistry<I>,
    ) -> Result<(), ConfigError> {
        if !registry.animation_exists(self.animation) {
            return Err(ConfigError::UnknownAnimation(self.animation));
        }
        validate_time_range(self.secondary_brightness_range)?;
        validate_smoothing(self.smoothing)?;
        validate_speed_multiplier(self.speed_multiplier)
    }
}

pub fn validate_time_range(range: TimeRange) -> Result<(), ConfigError> {
    if range.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeRange {
            start_secs: range.start_secs,
            end_secs: range.end_secs,
        })
    }
}

pub fn validate_smoothing(smoothing: BrightnessSmoothing) -> Result<(), ConfigError> {
    if smoothing.is_valid() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSmoothing)
    }
}

pub fn validate_speed_multiplier(multiplier: f32) -> Result<(), ConfigError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeedMultiplier)
    }
}
