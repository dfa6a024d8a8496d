// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Arcade drive mapping for the differential drivetrain.
//!
//! Two stick readings (forward, turn) become a left/right power pair. The right side of the
//! drivetrain is mounted mirrored, so its motors receive the negated command.

use crate::config::{STICK_DEADBAND, TURN_SCALE};
use crate::io::{MotorPort, MotorSink};

/// Logical drive command: positive is forward on both sides.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DriveCommand {
    pub left: i32,
    pub right: i32,
}

impl DriveCommand {
    pub const STOP: DriveCommand = DriveCommand { left: 0, right: 0 };

    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Same power on both sides.
    pub const fn straight(power: i32) -> Self {
        Self::new(power, power)
    }

    /// Channel values as sent to the motors, `(left, right)`, with the right side mirrored.
    #[inline]
    pub const fn outputs(&self) -> (i32, i32) {
        (self.left, -self.right)
    }

    /// Drive both motors of each side.
    pub fn apply<M: MotorSink>(&self, motors: &mut M) {
        let (left, right) = self.outputs();
        motors.set_power(MotorPort::LeftDriveFront, left);
        motors.set_power(MotorPort::LeftDriveBack, left);
        motors.set_power(MotorPort::RightDriveFront, right);
        motors.set_power(MotorPort::RightDriveBack, right);
    }
}

/// Force small readings to zero to suppress stick-centering drift.
#[inline]
pub fn deadband(value: i32) -> i32 {
    if value.abs() < STICK_DEADBAND {
        0
    } else {
        value
    }
}

/// Soften the turn axis. Truncates toward zero.
#[inline]
pub fn scale_turn(turn: i32) -> i32 {
    (turn as f32 / TURN_SCALE) as i32
}

/// Map raw `forward` and `turn` readings to a drive command.
///
/// The turn reading is scaled before the deadband is applied, so a turn reading that only
/// clears the deadband before scaling still reads as zero.
pub fn arcade(forward: i32, turn: i32) -> DriveCommand {
    let turn = deadband(scale_turn(turn));
    let forward = deadband(forward);

    DriveCommand {
        left: forward + turn,
        right: forward - turn,
    }
}
