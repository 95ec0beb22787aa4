//! Command-based control for the LED manager.
//!
//! Network handlers and other tasks never touch LED state directly. They
//! send [`LedCommand`]s through a queue (for example a `heapless::spsc`
//! queue or an embassy channel) and the task that owns the
//! [`LedManager`](crate::manager::LedManager) applies them between frames.

use smart_leds::RGB8;

use crate::animation::AnimationId;
use crate::config::{LedConfig, OverrideText};
use crate::governor::{SecondaryBrightnessMode, TimeRange};

/// Changes to LED configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum LedCommand {
    /// Select the animation shown while no update is in progress.
    SetAnimation(AnimationId),
    /// Enable or disable the LEDs as a whole.
    SetAnimationEnabled(bool),
    SetBrightness(u8),
    SetSecondaryBrightness(u8),
    SetSecondaryBrightnessMode(SecondaryBrightnessMode),
    SetSecondaryBrightnessRange(TimeRange),
    SetPrimaryColor(RGB8),
    SetSecondaryColor(RGB8),
    SetTertiaryColor(RGB8),
    SetSpeedMultiplier(f32),
    /// Replace the time with text; an empty string shows the time again.
    SetOverrideText(OverrideText),
    SetShowUnsyncedTime(bool),
    SetDotBlinkingDisabled(bool),
    SetNoClockDigits(bool),
    /// Replace the whole configuration, e.g. after loading from flash.
    ReplaceConfig(LedConfig),
}

impl LedCommand {
    /// Short name for log output.
    pub fn name(&self) -> &'static str {
        match self {
            LedCommand::SetAnimation(_) => "SetAnimation",
            LedCommand::SetAnimationEnabled(_) => "SetAnimationEnabled",
            LedCommand::SetBrightness(_) => "SetBrightness",
            LedCommand::SetSecondaryBrightness(_) => "SetSecondaryBrightness",
            LedCommand::SetSecondaryBrightnessMode(_) => "SetSecondaryBrightnessMode",
            LedCommand::SetSecondaryBrightnessRange(_) => "SetSecondaryBrightnessRange",
            LedCommand::SetPrimaryColor(_) => "SetPrimaryColor",
            LedCommand::SetSecondaryColor(_) => "SetSecondaryColor",
            LedCommand::SetTertiaryColor(_) => "SetTertiaryColor",
            LedCommand::SetSpeedMultiplier(_) => "SetSpeedMultiplier",
            LedCommand::SetOverrideText(_) => "SetOverrideText",
            LedCommand::SetShowUnsyncedTime(_) => "SetShowUnsyncedTime",
            LedCommand::SetDotBlinkingDisabled(_) => "SetDotBlinkingDisabled",
            LedCommand::SetNoClockDigits(_) => "SetNoClockDigits",
            LedCommand::ReplaceConfig(_) => "ReplaceConfig",
        }
    }

    /// Builds a [`LedCommand::SetOverrideText`], `None` if `text` is too long.
    pub fn override_text(text: &str) -> Option<Self> {
        let mut stored = OverrideText::new();
        stored.push_str(text).ok()?;
        Some(LedCommand::SetOverrideText(stored))
    }

    /// Builds a [`LedCommand::SetSecondaryBrightnessRange`] from `HH:MM` pairs.
    pub fn secondary_range(start: (u8, u8), end: (u8, u8)) -> Self {
        LedCommand::SetSecondaryBrightnessRange(TimeRange::from_hm(start, end))
    }
}
