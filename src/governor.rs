//! Brightness and current governance.
//!
//! Picks a brightness target from visibility and the secondary brightness
//! window, smooths towards it once per frame, and selects the current budget
//! from the detected power source.

/// When the dimmed secondary brightness applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecondaryBrightnessMode {
    /// Always use the primary brightness.
    #[default]
    Off,
    /// Use the secondary brightness inside a configured [`TimeRange`].
    UseRange,
    /// Use the secondary brightness between sunset and sunrise.
    UseSunriseSunset,
}

/// How the minutes at the edges of a [`TimeRange`] are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindowBoundary {
    /// The start minute is inside the window, the end minute is not.
    #[default]
    HalfOpen,
    /// Both the start and the end minute are inside the window.
    Inclusive,
}

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A time-of-day window in seconds past midnight.
///
/// A start later than the end wraps around midnight. Only hour and minute
/// resolution is used when testing membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeRange {
    pub start_secs: u32,
    pub end_secs: u32,
}

impl TimeRange {
    pub const fn new(start_secs: u32, end_secs: u32) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// Builds a range from `HH:MM` pairs.
    pub const fn from_hm(start: (u8, u8), end: (u8, u8)) -> Self {
        Self::new(
            start.0 as u32 * 3600 + start.1 as u32 * 60,
            end.0 as u32 * 3600 + end.1 as u32 * 60,
        )
    }

    /// Both ends lie within one day (24:00 allowed).
    pub const fn is_valid(&self) -> bool {
        self.start_secs <= SECONDS_PER_DAY && self.end_secs <= SECONDS_PER_DAY
    }

    /// Whether the window crosses midnight.
    pub const fn crosses_midnight(&self) -> bool {
        self.start_minute() > self.end_minute()
    }

    const fn start_minute(&self) -> u32 {
        self.start_secs / 60
    }

    const fn end_minute(&self) -> u32 {
        self.end_secs / 60
    }

    /// Whether `hour:minute` falls inside the window.
    pub fn contains(&self, hour: u8, minute: u8, boundary: WindowBoundary) -> bool {
        let now = u32::from(hour) * 60 + u32::from(minute);
        let start = self.start_minute();
        let end = self.end_minute();

        let before_end = match boundary {
            WindowBoundary::HalfOpen => now < end,
            WindowBoundary::Inclusive => now <= end,
        };

        if self.crosses_midnight() {
            now >= start || before_end
        } else {
            now >= start && before_end
        }
    }
}

/// Smoothing applied to brightness changes, once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessSmoothing {
    /// `value = value * factor + target * (1 - factor)`.
    Exponential { factor: f32 },
    /// Moves at most `step` units per frame.
    Step { step: u8 },
}

impl BrightnessSmoothing {
    /// Whether the smoothing reaches its target in a bounded number of frames.
    ///
    /// An exponential factor must lie in `[0, 1)`; at `1` the value never moves.
    pub fn is_valid(&self) -> bool {
        match *self {
            BrightnessSmoothing::Exponential { factor } => (0.0..1.0).contains(&factor),
            BrightnessSmoothing::Step { .. } => true,
        }
    }
}

impl Default for BrightnessSmoothing {
    fn default() -> Self {
        BrightnessSmoothing::Exponential { factor: 0.9 }
    }
}

/// Inputs for one governance pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GovernorInput {
    pub visible: bool,
    /// Whether the secondary brightness currently applies.
    pub in_secondary_window: bool,
    pub brightness: u8,
    pub secondary_brightness: u8,
    /// A high-current power source (barrel jack) is connected.
    pub high_current_source: bool,
}

/// Current budget per power source, in milliamps at [`CurrentBudget::volts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurrentBudget {
    pub volts: u8,
    pub default_milliamps: u32,
    pub high_current_milliamps: u32,
}

impl Default for CurrentBudget {
    fn default() -> Self {
        Self {
            volts: 5,
            default_milliamps: 3000,
            high_current_milliamps: 8000,
        }
    }
}

impl CurrentBudget {
    pub fn milliamps(&self, high_current_source: bool) -> u32 {
        if high_current_source {
            self.high_current_milliamps
        } else {
            self.default_milliamps
        }
    }
}

/// Output of one governance pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Governance {
    pub brightness: u8,
    pub volts: u8,
    pub milliamps: u32,
}

/// Smoothed brightness state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessGovernor {
    smoothing: BrightnessSmoothing,
    value: f32,
    target: u8,
    high_current_source: Option<bool>,
}

impl Default for BrightnessGovernor {
    fn default() -> Self {
        Self::new(BrightnessSmoothing::default())
    }
}

impl BrightnessGovernor {
    /// Starts fully dark.
    pub const fn new(smoothing: BrightnessSmoothing) -> Self {
        Self {
            smoothing,
            value: 0.0,
            target: 0,
            high_current_source: None,
        }
    }

    pub fn set_smoothing(&mut self, smoothing: BrightnessSmoothing) {
        self.smoothing = smoothing;
    }

    pub fn smoothing(&self) -> BrightnessSmoothing {
        self.smoothing
    }

    /// Current smoothed brightness, rounded.
    pub fn brightness(&self) -> u8 {
        (self.value + 0.5) as u8
    }

    /// Current smoothed brightness without rounding.
    pub fn raw(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    /// Brightness to aim for given the frame's inputs.
    pub fn target_for(input: &GovernorInput) -> u8 {
        if !input.visible {
            0
        } else if input.in_secondary_window {
            input.secondary_brightness
        } else {
            input.brightness
        }
    }

    /// Moves the smoothed value one frame towards `target`.
    ///
    /// Snaps to `target` once within one unit of it, so the value never
    /// overshoots and settles in a bounded number of frames.
    pub fn step_towards(&mut self, target: u8) -> u8 {
        if target != self.target {
            debug!("brightness target {} -> {}", self.target, target);
            self.target = target;
        }

        let target = f32::from(target);
        // invalid factors use the default
        let smoothing = if self.smoothing.is_valid() {
            self.smoothing
        } else {
            BrightnessSmoothing::default()
        };
        self.value = match smoothing {
            BrightnessSmoothing::Exponential { factor } => {
                self.value * factor + target * (1.0 - factor)
            }
            BrightnessSmoothing::Step { step } => {
                let step = f32::from(step.max(1));
                if self.value < target {
                    (self.value + step).min(target)
                } else {
                    (self.value - step).max(target)
                }
            }
        };

        let diff = self.value - target;
        if diff < 1.0 && diff > -1.0 {
            self.value = target;
        }

        self.brightness()
    }

    /// Runs one governance pass.
    pub fn govern(&mut self, input: &GovernorInput, budget: &CurrentBudget) -> Governance {
        let brightness = self.step_towards(Self::target_for(input));

        if self.high_current_source != Some(input.high_current_source) {
            info!(
                "power source changed, high current: {}",
                input.high_current_source
            );
            self.high_current_source = Some(input.high_current_source);
        }

        Governance {
            brightness,
            volts: budget.volts,
            milliamps: budget.milliamps(input.high_current_source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_validity() {
        assert!(TimeRange::new(0, SECONDS_PER_DAY).is_valid());
        assert!(!TimeRange::new(0, SECONDS_PER_DAY + 1).is_valid());
    }

    #[test]
    fn empty_same_day_window() {
        let range = TimeRange::from_hm((8, 0), (8, 0));
        assert!(!range.contains(8, 0, WindowBoundary::HalfOpen));
        assert!(range.contains(8, 0, WindowBoundary::Inclusive));
        assert!(!range.contains(9, 0, WindowBoundary::Inclusive));
    }

    #[test]
    fn visibility_and_window_select_target() {
        let mut input = GovernorInput {
            visible: true,
            in_secondary_window: false,
            brightness: 50,
            secondary_brightness: 10,
            high_current_source: false,
        };
        assert_eq!(BrightnessGovernor::target_for(&input), 50);
        input.in_secondary_window = true;
        assert_eq!(BrightnessGovernor::target_for(&input), 10);
        input.visible = false;
        assert_eq!(BrightnessGovernor::target_for(&input), 0);
    }

    #[test]
    fn budget_follows_power_source() {
        let budget = CurrentBudget::default();
        assert_eq!(budget.milliamps(false), 3000);
        assert_eq!(budget.milliamps(true), 8000);
    }

    #[test]
    fn stalling_factor_falls_back_to_default() {
        let stalling = BrightnessSmoothing::Exponential { factor: 1.0 };
        let mut governor = BrightnessGovernor::new(stalling);
        assert_eq!(governor.smoothing(), stalling);

        let frames = (0..200).take_while(|_| governor.step_towards(50) != 50).count();
        assert!(frames < 200);
        assert_eq!(governor.raw(), 50.0);

        governor.set_smoothing(BrightnessSmoothing::Step { step: 5 });
        assert_eq!(governor.smoothing(), BrightnessSmoothing::Step { step: 5 });
        assert_eq!(governor.step_towards(40), 45);
    }
}
