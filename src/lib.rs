//! Control logic for a four-digit alarm clock.
//!
//! This crate provides:
//! - `bcd`, the two-digit BCD pair adjuster
//! - `clock`, the tick-driven time-keeping engine
//! - `display`, the 7-segment driver with blinking digits and dots
//! - `hold`, the long-press detector and the shared tick counter
//! - `input`, button sampling into events
//! - `alarm`, arming/disarming and the buzzer
//! - `mode` and `controller`, the mode state machine and tick handler
//!
//! Everything except the firmware binary is hardware independent and runs
//! on the host under `cargo test`.

#![cfg_attr(not(test), no_std)]

pub mod alarm;
pub mod bcd;
pub mod clock;
pub mod config;
pub mod controller;
pub mod display;
pub mod hold;
pub mod input;
pub mod mode;

pub use config::Config;
pub use controller::Controller;
