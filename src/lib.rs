// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Cubebot Firmware
//!
//! This crate contains the operator-control firmware for a cube-stacking competition robot,
//! written in Rust, targeting an STM32F777 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`io`] | Port map, joystick snapshot, and the traits the logic drives hardware through |
//! | [`config`] | Button bindings, powers, timings and bounds |
//! | [`control`] | Drive mapping, arm controller, tray, dropoff macro, operator loop |
//! | [`drivers`] | Joystick link, potentiometer, light strip |
//! | [`protocol`] | Joystick serial frame format and parser |
//! | `hw` | MCU-level timers, PWM, ADC and USART (`firmware` feature only) |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features firmware
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control;
pub mod drivers;
#[cfg(feature = "firmware")]
pub mod hw;
pub mod io;
pub mod protocol;

#[cfg(test)]
mod testing;
