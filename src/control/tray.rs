// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Open-loop tray lift and intake rollers.
//!
//! Neither has feedback. The rollers map buttons straight to a mirrored power pair. The tray
//! alternates a full-torque pulse with cruise pulses while raising, which gives the lift a rough
//! duty-cycled power profile without hardware PWM.

use crate::config::{
    ROLLER_BACKOUT_POWER, ROLLER_INTAKE_BUTTON, ROLLER_INTAKE_POWER, ROLLER_RELEASE_BUTTON,
    ROLLER_RELEASE_POWER, TRAY_CRUISE_POWER, TRAY_CYCLE_PERIOD, TRAY_LOWER_BUTTON,
    TRAY_LOWER_POWER, TRAY_RAISE_BUTTON, TRAY_TORQUE_POWER,
};
use crate::io::{JoystickState, MotorPort, MotorSink};

/// Roller command. The two rollers face each other, so the right one is driven inverted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rollers {
    /// Pull cubes in.
    Intake(i32),
    /// Push cubes out.
    Outward(i32),
    Stop,
}

impl Rollers {
    pub const INTAKE: Rollers = Rollers::Intake(ROLLER_INTAKE_POWER);
    pub const RELEASE: Rollers = Rollers::Outward(ROLLER_RELEASE_POWER);
    pub const BACKOUT: Rollers = Rollers::Outward(ROLLER_BACKOUT_POWER);

    /// Decode the roller buttons. Intake wins when both are held.
    pub fn from_joystick(js: &JoystickState) -> Self {
        if js.pressed(ROLLER_INTAKE_BUTTON) {
            Rollers::INTAKE
        } else if js.pressed(ROLLER_RELEASE_BUTTON) {
            Rollers::RELEASE
        } else {
            Rollers::Stop
        }
    }

    /// `(right, left)` motor powers.
    pub const fn outputs(self) -> (i32, i32) {
        match self {
            Rollers::Intake(power) => (-power, power),
            Rollers::Outward(power) => (power, -power),
            Rollers::Stop => (0, 0),
        }
    }

    pub fn apply<M: MotorSink>(self, motors: &mut M) {
        let (right, left) = self.outputs();
        motors.set_power(MotorPort::RightRoller, right);
        motors.set_power(MotorPort::LeftRoller, left);
    }
}

/// Tray lift with its torque/cruise pulse counter.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tray {
    cycle_index: u8,
}

impl Tray {
    pub const fn new() -> Self {
        Self { cycle_index: 0 }
    }

    /// Position within the raise pattern, `0..TRAY_CYCLE_PERIOD`.
    #[inline]
    pub fn cycle_index(&self) -> u8 {
        self.cycle_index
    }

    /// Tray power for this cycle.
    ///
    /// While `raise` is held the power cycles through one torque pulse and then cruise pulses.
    /// Any cycle without `raise` restarts the pattern, so every new press begins at full torque.
    pub fn power(&mut self, raise: bool, lower: bool) -> i32 {
        if raise {
            let power = if self.cycle_index == 0 {
                TRAY_TORQUE_POWER
            } else {
                TRAY_CRUISE_POWER
            };
            self.cycle_index = (self.cycle_index + 1) % TRAY_CYCLE_PERIOD;
            return power;
        }

        self.cycle_index = 0;
        if lower {
            TRAY_LOWER_POWER
        } else {
            0
        }
    }

    /// Read the tray buttons and drive the tray motor.
    pub fn update<M: MotorSink>(&mut self, js: &JoystickState, motors: &mut M) {
        let power = self.power(js.pressed(TRAY_RAISE_BUTTON), js.pressed(TRAY_LOWER_BUTTON));
        motors.set_power(MotorPort::Tray, power);
    }
}
