// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the raw `hw/` layer and below the
//! application logic. They are generic over the traits in [`crate::io`].
//!
//! ## Existing drivers
//!
//! - [`joystick_link`] – Joystick frames over the serial receiver link, with a stale-link fallback
//! - [`light_strip`] – Bit-banged one-wire LED strip
//! - [`potentiometer`] – Arm potentiometer with rest-position calibration
//! - [`rx_buffer`] – Queue between a UART receive interrupt and the joystick link

pub mod joystick_link;
pub mod light_strip;
pub mod potentiometer;
pub mod rx_buffer;

pub use joystick_link::JoystickLink;
pub use light_strip::{LightStrip, Waveform};
pub use potentiometer::Potentiometer;
pub use rx_buffer::RxBuffer;
