// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Robot constants.
//!
//! The robot's wiring and tuning are fixed at compile time. Anything that changes between
//! builds is a Cargo feature (`tiered-arm-gain`), not a runtime setting.

use crate::io::{Axis, Button};

/// Target period of one operator-control cycle.
pub const CYCLE_PERIOD_MS: u32 = 20;

// Drive
pub const FORWARD_AXIS: Axis = Axis::Ch3;
pub const TURN_AXIS: Axis = Axis::Ch1;
/// Stick readings with a smaller magnitude are treated as centered.
pub const STICK_DEADBAND: i32 = 15;
/// Turn readings are divided by this to soften steering.
pub const TURN_SCALE: f32 = 1.4;
/// Reverse speed used when backing away from a stack.
pub const BACKUP_SPEED: i32 = 70;

// Rollers
pub const ROLLER_INTAKE_BUTTON: Button = Button::Group6Up;
pub const ROLLER_RELEASE_BUTTON: Button = Button::Group6Down;
pub const ROLLER_INTAKE_POWER: i32 = 127;
/// Slower outward spin for precise cube placement.
pub const ROLLER_RELEASE_POWER: i32 = 60;
/// Outward spin while backing away from a placed stack.
pub const ROLLER_BACKOUT_POWER: i32 = 80;

// Tray
pub const TRAY_RAISE_BUTTON: Button = Button::Group5Up;
pub const TRAY_LOWER_BUTTON: Button = Button::Group5Down;
pub const TRAY_TORQUE_POWER: i32 = 127;
pub const TRAY_CRUISE_POWER: i32 = 40;
pub const TRAY_LOWER_POWER: i32 = -127;
/// One torque pulse followed by `TRAY_CYCLE_PERIOD - 1` cruise pulses.
pub const TRAY_CYCLE_PERIOD: u8 = 4;

// Arm
pub const ARM_RAISE_BUTTON: Button = Button::Group7Up;
pub const ARM_LOWER_BUTTON: Button = Button::Group7Down;
pub const ARM_RESET_BUTTON: Button = Button::Group7Left;
/// Target change per cycle while a nudge button is held.
pub const ARM_STEP: i32 = 30;
/// Potentiometer reading of the fully lowered arm after calibration.
pub const ARM_LOWER_BOUND: i32 = 0;
pub const ARM_UPPER_BOUND: i32 = 4000;
pub const ARM_KP: f32 = 0.1;
/// Potentiometer samples averaged at boot to find the rest position.
pub const ARM_CALIBRATION_SAMPLES: u32 = 256;
/// ADC1 input the arm potentiometer is wired to.
pub const ARM_POT_CHANNEL: u8 = 14;

// Macros
pub const BACKOUT_BUTTON: Button = Button::Group8Down;
pub const DROPOFF_BUTTON: Button = Button::Group8Right;
pub const SIGNAL_BUTTON: Button = Button::Group8Up;
/// Power applied to the indicator port while the signal button is held.
pub const INDICATOR_POWER: i32 = 127;

// Joystick link
/// Without a valid frame for this long the joystick reads as neutral.
pub const LINK_TIMEOUT_MS: u32 = 250;
pub const JOYSTICK_BAUD: u32 = 115_200;
/// Bytes buffered between the receive interrupt and the control loop, several frames' worth.
pub const RX_BUFFER_LEN: usize = 64;

// Debug terminal
pub const LOG_BAUD: u32 = 115_200;
