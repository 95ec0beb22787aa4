//! Frame orchestration.
//!
//! Provides [`LedManager`], the single owner of the LED buffer and of the
//! LED configuration. Call [`LedManager::update`] from one task at a fixed
//! tick (every millisecond on the clock); feed configuration changes in
//! between frames with [`LedManager::process_commands`].

use smart_leds::RGB8;

use crate::animation::{AnimationId, FrameContext, RenderType};
use crate::colors::BLACK;
use crate::command::LedCommand;
use crate::config::{ConfigError, LedConfig, validate_speed_multiplier, validate_time_range};
use crate::digit::SevenSegmentDigit;
use crate::dot::{ClockDot, DotPlacement};
use crate::governor::{BrightnessGovernor, GovernorInput, SecondaryBrightnessMode};
use crate::layout::{DIGIT_COUNT, DIGIT_RANGES, DOT_RANGES, LED_COUNT};
use crate::registry::{AnimationError, AnimationRegistry};
use crate::services::{Environment, ota_percent};
use crate::strip::LedStrip;
use crate::time::{TimeInstant, TimeSource};

/// Snapshot of the LED state for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedStatus {
    /// Frames flushed during the last full second.
    pub fps: u16,
    pub brightness: u8,
    pub visible: bool,
    /// Current animation, `None` while none is active or during an update.
    pub animation: Option<AnimationId>,
}

/// Counts flushed frames per second of monotonic time.
#[derive(Debug, Clone, Copy)]
struct FpsCounter<I> {
    window_start: Option<I>,
    frames: u16,
    fps: u16,
}

impl<I: TimeInstant> FpsCounter<I> {
    const fn new() -> Self {
        Self {
            window_start: None,
            frames: 0,
            fps: 0,
        }
    }

    fn frame(&mut self, now: I) {
        match self.window_start {
            Some(start) if now.millis_since(start) >= 1000 => {
                self.fps = self.frames;
                self.frames = 0;
                self.window_start = Some(now);
            }
            Some(_) => {}
            None => self.window_start = Some(now),
        }
        self.frames = self.frames.saturating_add(1);
    }
}

/// Renders the clock face into the strip.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Strip implementation type
pub struct LedManager<'t, I: TimeInstant, T: TimeSource<I>, S: LedStrip> {
    leds: [RGB8; LED_COUNT],
    digits: [SevenSegmentDigit; DIGIT_COUNT],
    upper: ClockDot,
    lower: ClockDot,
    registry: AnimationRegistry<I>,
    governor: BrightnessGovernor,
    config: LedConfig,
    strip: S,
    time_source: &'t T,
    epoch: I,
    visible: bool,
    last_error: Option<AnimationError>,
    fps: FpsCounter<I>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, S: LedStrip> LedManager<'t, I, T, S> {
    /// Creates a manager with every animation registered and default config.
    pub fn new(strip: S, time_source: &'t T) -> Self {
        let registry = AnimationRegistry::new();
        let config = LedConfig::for_registry(&registry);
        Self::with_registry(strip, time_source, registry, config)
    }

    /// Creates a manager from an explicit registry and configuration.
    pub fn with_registry(
        strip: S,
        time_source: &'t T,
        registry: AnimationRegistry<I>,
        config: LedConfig,
    ) -> Self {
        let governor = BrightnessGovernor::new(config.smoothing);
        Self {
            leds: [BLACK; LED_COUNT],
            digits: DIGIT_RANGES.map(SevenSegmentDigit::new),
            upper: ClockDot::new(DotPlacement::Top, DOT_RANGES[0]),
            lower: ClockDot::new(DotPlacement::Bottom, DOT_RANGES[1]),
            registry,
            governor,
            config,
            strip,
            time_source,
            epoch: time_source.now(),
            visible: false,
            last_error: None,
            fps: FpsCounter::new(),
        }
    }

    /// Renders and flushes one frame.
    pub fn update<E: Environment>(&mut self, env: &E) {
        let now = self.time_source.now();
        let local_time = env.local_time();
        let ota_in_progress = env.in_progress();

        self.visible = self.compute_visibility(env.is_synced());

        let dots_on =
            self.config.disable_dot_blinking || now.millis_since(self.epoch) % 1000 < 500;
        self.upper.set_on(dots_on);
        self.lower.set_on(dots_on);

        match self.registry.update_animation(
            self.config.animation,
            ota_in_progress,
            now,
            &mut self.leds,
        ) {
            Ok(_) => self.last_error = None,
            Err(err) => {
                if self.last_error != Some(err) {
                    error!("failed to update animation: {}", err);
                    self.last_error = Some(err);
                }
            }
        }

        let text_override = !self.config.override_text.is_empty();
        let clock_allowed = self
            .registry
            .current()
            .is_none_or(|handle| self.registry.animation(handle).should_set_digits());
        if clock_allowed && !text_override {
            self.set_time(local_time.hour(), local_time.minute());
        }

        let ctx = FrameContext {
            local_time,
            primary_color: self.config.primary_color,
            secondary_color: self.config.secondary_color,
            tertiary_color: self.config.tertiary_color,
            ota_percent: ota_percent(env.percent()),
        };
        self.render(&ctx, now, text_override);

        self.strip.write(&self.leds);
        self.fps.frame(now);

        let in_secondary_window = match self.config.secondary_brightness_mode {
            SecondaryBrightnessMode::Off => false,
            SecondaryBrightnessMode::UseRange => self.config.secondary_brightness_range.contains(
                local_time.hour(),
                local_time.minute(),
                self.config.window_boundary,
            ),
            SecondaryBrightnessMode::UseSunriseSunset => env.is_night(),
        };
        let input = GovernorInput {
            visible: self.visible,
            in_secondary_window,
            brightness: self.config.brightness,
            secondary_brightness: self.config.secondary_brightness,
            high_current_source: env.high_current_source(),
        };
        self.governor.set_smoothing(self.config.smoothing);
        let governance = self.governor.govern(&input, &self.config.current_budget);
        self.strip.set_brightness(governance.brightness);
        self.strip
            .set_power_limit(governance.volts, governance.milliamps);
    }

    fn compute_visibility(&self, synced: bool) -> bool {
        if !self.config.animation_enabled {
            return false;
        }
        self.config.show_unsynced_time || synced
    }

    fn render(&mut self, ctx: &FrameContext, now: I, text_override: bool) {
        let Self {
            leds,
            digits,
            upper,
            lower,
            registry,
            config,
            ..
        } = self;

        if let Some((animation, timer)) = registry.current_mut() {
            if timer.needs_update(now, animation.update_interval_ms(), config.speed_multiplier) {
                if text_override {
                    apply_text(digits, &config.override_text);
                }

                animation.update(ctx, digits);
                timer.mark_updated(now);

                match animation.render_type() {
                    RenderType::AllAtOnce => animation.render_all(ctx, leds),
                    RenderType::ForEveryDigit => {
                        for (index, digit) in digits.iter_mut().enumerate() {
                            animation.render_digit(ctx, digit, index, leds);
                        }
                    }
                    RenderType::ForEverySegment => {
                        for digit in digits.iter() {
                            digit.for_every_segment(leds, |segment, segment_leds| {
                                animation.render_segment(ctx, digit, segment, segment_leds)
                            });
                        }
                    }
                }

                animation.render_dot(ctx, upper, leds);
                animation.render_dot(ctx, lower, leds);
                timer.mark_rendered(now);
            }
        }

        upper.render(leds, text_override);
        lower.render(leds, text_override);

        if !config.no_clock_digits {
            for digit in digits.iter() {
                digit.render_mask(leds);
            }
        }
    }

    /// Writes `HHMM` into the digits.
    pub fn set_time(&mut self, hour: u8, minute: u8) {
        let [d0, d1, d2, d3] = &mut self.digits;
        d0.set_digit(hour / 10);
        d1.set_digit(hour % 10);
        d2.set_digit(minute / 10);
        d3.set_digit(minute % 10);
    }

    /// Shows `text` on the digits, one character each.
    ///
    /// Characters that are not ASCII alphanumeric, and digits past the end of
    /// `text`, are blank.
    pub fn set_text(&mut self, text: &str) {
        apply_text(&mut self.digits, text);
    }

    /// Applies one configuration change.
    pub fn handle_command(&mut self, command: LedCommand) -> Result<(), ConfigError> {
        let config = &mut self.config;
        match command {
            LedCommand::SetAnimation(id) => {
                if !self.registry.animation_exists(id) {
                    return Err(ConfigError::UnknownAnimation(id));
                }
                config.animation = id;
            }
            LedCommand::SetAnimationEnabled(enabled) => config.animation_enabled = enabled,
            LedCommand::SetBrightness(value) => config.brightness = value,
            LedCommand::SetSecondaryBrightness(value) => config.secondary_brightness = value,
            LedCommand::SetSecondaryBrightnessMode(mode) => {
                config.secondary_brightness_mode = mode
            }
            LedCommand::SetSecondaryBrightnessRange(range) => {
                validate_time_range(range)?;
                config.secondary_brightness_range = range;
            }
            LedCommand::SetPrimaryColor(color) => config.primary_color = color,
            LedCommand::SetSecondaryColor(color) => config.secondary_color = color,
            LedCommand::SetTertiaryColor(color) => config.tertiary_color = color,
            LedCommand::SetSpeedMultiplier(multiplier) => {
                validate_speed_multiplier(multiplier)?;
                config.speed_multiplier = multiplier;
            }
            LedCommand::SetOverrideText(text) => config.override_text = text,
            LedCommand::SetShowUnsyncedTime(show) => config.show_unsynced_time = show,
            LedCommand::SetDotBlinkingDisabled(disabled) => {
                config.disable_dot_blinking = disabled
            }
            LedCommand::SetNoClockDigits(disabled) => config.no_clock_digits = disabled,
            LedCommand::ReplaceConfig(new_config) => {
                new_config.validate(&self.registry)?;
                *config = new_config;
            }
        }
        Ok(())
    }

    /// Applies queued commands in order, logging the ones that are rejected.
    ///
    /// Returns the number of commands applied.
    pub fn process_commands<C>(&mut self, commands: C) -> usize
    where
        C: IntoIterator<Item = LedCommand>,
    {
        let mut applied = 0;
        for command in commands {
            let name = command.name();
            match self.handle_command(command) {
                Ok(()) => applied += 1,
                Err(err) => warn!("rejected {} command: {}", name, err),
            }
        }
        applied
    }

    /// Whether anything is lit: visible, or still fading out.
    pub fn is_visible(&self) -> bool {
        self.visible && self.governor.brightness() > 0
    }

    /// Smoothed brightness handed to the strip.
    pub fn brightness(&self) -> u8 {
        self.governor.brightness()
    }

    pub fn status(&self) -> LedStatus {
        LedStatus {
            fps: self.fps.fps,
            brightness: self.governor.brightness(),
            visible: self.is_visible(),
            animation: self.registry.current_id(),
        }
    }

    pub fn config(&self) -> &LedConfig {
        &self.config
    }

    pub fn leds(&self) -> &[RGB8] {
        &self.leds
    }

    pub fn digits(&self) -> &[SevenSegmentDigit; DIGIT_COUNT] {
        &self.digits
    }

    pub fn upper_dot(&self) -> &ClockDot {
        &self.upper
    }

    pub fn lower_dot(&self) -> &ClockDot {
        &self.lower
    }

    pub fn registry(&self) -> &AnimationRegistry<I> {
        &self.registry
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }
}

fn apply_text(digits: &mut [SevenSegmentDigit], text: &str) {
    let mut chars = text.chars();
    for digit in digits.iter_mut() {
        match chars.next() {
            Some(c) if c.is_ascii_alphanumeric() => digit.set_char(c),
            _ => digit.set_char(' '),
        }
    }
}

impl<I: TimeInstant, T: TimeSource<I>, S: LedStrip> core::fmt::Display
    for LedManager<'_, I, T, S>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [d0, d1, d2, d3] = &self.digits;
        write!(
            f,
            "LedManager digit0={} digit1={} digit2={} digit3={} upper={} lower={}",
            d0, d1, d2, d3, self.upper, self.lower
        )
    }
}
