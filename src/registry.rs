//! Animation registry and selection.
//!
//! All animations live inside the registry for the lifetime of the device.
//! The current animation is tracked by [`AnimationHandle`], a stable slot
//! index, and is only changed by [`AnimationRegistry::update_animation`].

use smart_leds::RGB8;

use crate::animation::{
    Animation, AnimationId, AnimationTimer, NewYearAnimation, OtaAnimation, RainbowAnimation,
    StaticColorAnimation, StrobeAnimation,
};
use crate::time::TimeInstant;

const SLOT_COUNT: usize = 5;

/// Stable reference to an animation slot in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationHandle {
    Rainbow,
    StaticColor,
    Strobe,
    NewYear,
    /// Firmware update progress, never user-selectable.
    Ota,
}

impl AnimationHandle {
    const fn slot(self) -> usize {
        match self {
            AnimationHandle::Rainbow => 0,
            AnimationHandle::StaticColor => 1,
            AnimationHandle::Strobe => 2,
            AnimationHandle::NewYear => 3,
            AnimationHandle::Ota => 4,
        }
    }

    /// Public identity of the slot, `None` for [`AnimationHandle::Ota`].
    pub const fn id(self) -> Option<AnimationId> {
        match self {
            AnimationHandle::Rainbow => Some(AnimationId::Rainbow),
            AnimationHandle::StaticColor => Some(AnimationId::StaticColor),
            AnimationHandle::Strobe => Some(AnimationId::Strobe),
            AnimationHandle::NewYear => Some(AnimationId::NewYear),
            AnimationHandle::Ota => None,
        }
    }
}

impl From<AnimationId> for AnimationHandle {
    fn from(id: AnimationId) -> Self {
        match id {
            AnimationId::Rainbow => AnimationHandle::Rainbow,
            AnimationId::StaticColor => AnimationHandle::StaticColor,
            AnimationId::Strobe => AnimationHandle::Strobe,
            AnimationId::NewYear => AnimationHandle::NewYear,
        }
    }
}

/// Errors that can occur while selecting an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationError {
    /// The requested animation is not registered.
    NotFound(AnimationId),
}

impl core::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AnimationError::NotFound(id) => {
                write!(f, "animation '{}' not found ({})", id.name(), id.index())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AnimationError {}

/// Owns every animation instance and tracks which one is current.
///
/// # Type Parameters
/// * `I` - Time instant type used for update throttling
pub struct AnimationRegistry<I: TimeInstant> {
    rainbow: RainbowAnimation,
    static_color: StaticColorAnimation,
    strobe: StrobeAnimation,
    new_year: NewYearAnimation,
    ota: OtaAnimation,
    timers: [AnimationTimer<I>; SLOT_COUNT],
    selectable: heapless::Vec<AnimationHandle, 4>,
    current: Option<AnimationHandle>,
    lifecycle_seq: u32,
}

impl<I: TimeInstant> Default for AnimationRegistry<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TimeInstant> AnimationRegistry<I> {
    /// Registers every animation in [`AnimationId::ALL`] order.
    pub fn new() -> Self {
        Self::with_animations(&AnimationId::ALL)
    }

    /// Registers only `ids`, in the given order. Duplicates are ignored.
    pub fn with_animations(ids: &[AnimationId]) -> Self {
        let mut selectable = heapless::Vec::new();
        for &id in ids {
            let handle = AnimationHandle::from(id);
            if !selectable.contains(&handle) && selectable.push(handle).is_err() {
                break;
            }
        }

        Self {
            rainbow: RainbowAnimation::new(),
            static_color: StaticColorAnimation::new(),
            strobe: StrobeAnimation::new(),
            new_year: NewYearAnimation::new(),
            ota: OtaAnimation::new(),
            timers: [AnimationTimer::new(); SLOT_COUNT],
            selectable,
            current: None,
            lifecycle_seq: 0,
        }
    }

    /// Registered animation ids in registration order.
    pub fn registered(&self) -> impl Iterator<Item = AnimationId> + '_ {
        self.selectable.iter().filter_map(|handle| handle.id())
    }

    /// The first registered animation, used as the configuration default.
    pub fn first(&self) -> Option<AnimationId> {
        self.registered().next()
    }

    /// Whether an animation with `id` is registered.
    pub fn animation_exists(&self, id: AnimationId) -> bool {
        self.registered().any(|registered| registered == id)
    }

    pub fn current(&self) -> Option<AnimationHandle> {
        self.current
    }

    /// Public identity of the current animation.
    pub fn current_id(&self) -> Option<AnimationId> {
        self.current.and_then(AnimationHandle::id)
    }

    pub fn animation(&self, handle: AnimationHandle) -> &dyn Animation {
        match handle {
            AnimationHandle::Rainbow => &self.rainbow,
            AnimationHandle::StaticColor => &self.static_color,
            AnimationHandle::Strobe => &self.strobe,
            AnimationHandle::NewYear => &self.new_year,
            AnimationHandle::Ota => &self.ota,
        }
    }

    pub fn animation_mut(&mut self, handle: AnimationHandle) -> &mut dyn Animation {
        match handle {
            AnimationHandle::Rainbow => &mut self.rainbow,
            AnimationHandle::StaticColor => &mut self.static_color,
            AnimationHandle::Strobe => &mut self.strobe,
            AnimationHandle::NewYear => &mut self.new_year,
            AnimationHandle::Ota => &mut self.ota,
        }
    }

    pub fn timer(&self, handle: AnimationHandle) -> &AnimationTimer<I> {
        &self.timers[handle.slot()]
    }

    /// The current animation together with its timer.
    pub fn current_mut(&mut self) -> Option<(&mut dyn Animation, &mut AnimationTimer<I>)> {
        let handle = self.current?;
        let timer = &mut self.timers[handle.slot()];
        let animation: &mut dyn Animation = match handle {
            AnimationHandle::Rainbow => &mut self.rainbow,
            AnimationHandle::StaticColor => &mut self.static_color,
            AnimationHandle::Strobe => &mut self.strobe,
            AnimationHandle::NewYear => &mut self.new_year,
            AnimationHandle::Ota => &mut self.ota,
        };
        Some((animation, timer))
    }

    /// Makes `requested` the current animation, or the OTA animation while
    /// `ota_in_progress` is set.
    ///
    /// Switching stops the outgoing animation before starting the incoming
    /// one. Selecting the already current animation does nothing.
    ///
    /// # Returns
    /// * `Ok(true)` - The current animation changed
    /// * `Ok(false)` - The target was already current
    /// * `Err` - `requested` is not registered, current animation unchanged
    pub fn update_animation(
        &mut self,
        requested: AnimationId,
        ota_in_progress: bool,
        now: I,
        leds: &mut [RGB8],
    ) -> Result<bool, AnimationError> {
        let target = if ota_in_progress {
            AnimationHandle::Ota
        } else if self.animation_exists(requested) {
            AnimationHandle::from(requested)
        } else {
            return Err(AnimationError::NotFound(requested));
        };

        if self.current == Some(target) {
            return Ok(false);
        }

        if let Some(outgoing) = self.current {
            let seq = self.next_seq();
            self.animation_mut(outgoing).stop(leds);
            self.timers[outgoing.slot()].mark_stopped(now, seq);
        }

        let seq = self.next_seq();
        self.current = Some(target);
        self.animation_mut(target).start(leds);
        self.timers[target.slot()].mark_started(now, seq);

        info!("animation switched to {:?}", target);
        Ok(true)
    }

    fn next_seq(&mut self) -> u32 {
        self.lifecycle_seq = self.lifecycle_seq.wrapping_add(1);
        self.lifecycle_seq
    }
}
