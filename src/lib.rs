#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LedManager`**: Owns the LED buffer and renders one frame per `update()`
//! - **`SevenSegmentDigit`** / **`ClockDot`**: The clock face, addressed by LED ranges
//! - **`Animation`**: Trait every animation implements; rendering hooks per strip, digit or segment
//! - **`AnimationRegistry`**: Holds all animations and switches between them, including the OTA override
//! - **`BrightnessGovernor`**: Smooths brightness and picks the current budget
//! - **`LedCommand`**: Configuration changes sent to the manager's task
//! - **`LedStrip`**: Trait to implement for your strip driver (or use `SmartLedsStrip`)
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`WallClock`** / **`OtaStatus`** / **`PowerSense`**: Services polled once per frame

#[macro_use]
mod fmt;

pub mod animation;
pub mod colors;
pub mod command;
pub mod config;
pub mod digit;
pub mod dot;
pub mod governor;
pub mod layout;
pub mod manager;
pub mod registry;
pub mod segment;
pub mod services;
pub mod strip;
pub mod time;

pub use smart_leds::RGB8;

pub use animation::{Animation, AnimationId, AnimationTimer, FrameContext, RenderType};
pub use command::LedCommand;
pub use config::{ConfigError, LedConfig};
pub use digit::SevenSegmentDigit;
pub use dot::{ClockDot, DotPlacement};
pub use governor::{
    BrightnessGovernor, BrightnessSmoothing, CurrentBudget, SecondaryBrightnessMode, TimeRange,
    WindowBoundary,
};
pub use layout::{LED_COUNT, LedRange};
pub use manager::{LedManager, LedStatus};
pub use registry::{AnimationError, AnimationHandle, AnimationRegistry};
pub use segment::{Segment, segment_mask};
pub use services::{Environment, OtaStatus, PowerSense, WallClock};
pub use strip::{LedStrip, SmartLedsStrip};
pub use crate::time::{TimeDuration, TimeInstant, TimeSource};
