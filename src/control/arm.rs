// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Position-seeking controller for the intake arm.
//!
//! The driver does not command arm power directly. Buttons move a desired angle up or down by a
//! fixed step each cycle, and every cycle the controller drives both arm motors toward that angle
//! using the calibrated potentiometer as feedback.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let power = arm.step(&mut state.desired_arm_angle, ArmEvent::from_joystick(&js), measured);
//! motors.set_power(MotorPort::RightArm, power);
//! motors.set_power(MotorPort::LeftArm, power);
//! ```

use crate::config::{
    ARM_KP, ARM_LOWER_BOUND, ARM_LOWER_BUTTON, ARM_RAISE_BUTTON, ARM_RESET_BUTTON, ARM_STEP,
    ARM_UPPER_BOUND,
};
use crate::io::{JoystickState, MAX_POWER};

/// Discrete adjustment of the desired arm angle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ArmEvent {
    Raise,
    Lower,
    /// Return the target to the lower bound.
    Reset,
}

impl ArmEvent {
    /// Decode this cycle's arm buttons. Reset wins over raise, raise wins over lower.
    pub fn from_joystick(js: &JoystickState) -> Option<Self> {
        if js.pressed(ARM_RESET_BUTTON) {
            Some(ArmEvent::Reset)
        } else if js.pressed(ARM_RAISE_BUTTON) {
            Some(ArmEvent::Raise)
        } else if js.pressed(ARM_LOWER_BUTTON) {
            Some(ArmEvent::Lower)
        } else {
            None
        }
    }
}

/// One band of the tiered schedule: `kp` applies once `|error| >= min_error`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GainTier {
    pub min_error: i32,
    pub kp: f32,
}

/// Four bands, softest near the target.
pub const TIERED_GAINS: [GainTier; 4] = [
    GainTier { min_error: 0, kp: 0.05 },
    GainTier { min_error: 100, kp: 0.1 },
    GainTier { min_error: 400, kp: 0.15 },
    GainTier { min_error: 1000, kp: 0.25 },
];

/// How error turns into power.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GainSchedule {
    /// Single gain, no output clamp.
    Proportional { kp: f32 },
    /// Gain picked by `|error|` band, output clamped to `[-limit, limit]`.
    ///
    /// Tiers must be sorted by ascending `min_error`.
    Tiered { tiers: [GainTier; 4], limit: i32 },
}

impl GainSchedule {
    pub const FLAT: GainSchedule = GainSchedule::Proportional { kp: ARM_KP };

    pub const TIERED: GainSchedule = GainSchedule::Tiered {
        tiers: TIERED_GAINS,
        limit: MAX_POWER,
    };

    /// Schedule selected by the `tiered-arm-gain` feature.
    pub const fn configured() -> Self {
        if cfg!(feature = "tiered-arm-gain") {
            Self::TIERED
        } else {
            Self::FLAT
        }
    }

    /// Power for a given `error = desired - measured`. Truncates toward zero.
    pub fn power(&self, error: i32) -> i32 {
        match *self {
            GainSchedule::Proportional { kp } => (error as f32 * -kp) as i32,
            GainSchedule::Tiered { tiers, limit } => {
                let magnitude = error.abs();
                let kp = tiers
                    .iter()
                    .rev()
                    .find(|tier| magnitude >= tier.min_error)
                    .map_or(0.0, |tier| tier.kp);
                let power = (error as f32 * -kp) as i32;
                power.clamp(-limit, limit)
            }
        }
    }
}

/// Arm controller configuration. The desired angle itself lives in the cycle state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArmController {
    lower: i32,
    upper: i32,
    step: i32,
    schedule: GainSchedule,
}

impl Default for ArmController {
    fn default() -> Self {
        Self::new(ARM_LOWER_BOUND, ARM_UPPER_BOUND, ARM_STEP, GainSchedule::configured())
    }
}

impl ArmController {
    pub const fn new(lower: i32, upper: i32, step: i32, schedule: GainSchedule) -> Self {
        Self {
            lower,
            upper,
            step,
            schedule,
        }
    }

    #[inline]
    pub fn bounds(&self) -> (i32, i32) {
        (self.lower, self.upper)
    }

    /// Apply one event to `desired`. The result is saturated to the bounds before it is stored.
    pub fn apply(&self, desired: &mut i32, event: ArmEvent) {
        let next = match event {
            ArmEvent::Raise => desired.saturating_add(self.step),
            ArmEvent::Lower => desired.saturating_sub(self.step),
            ArmEvent::Reset => self.lower,
        };
        *desired = next.clamp(self.lower, self.upper);
    }

    /// Corrective power for the gap between `desired` and `measured`.
    #[inline]
    pub fn correction(&self, desired: i32, measured: i32) -> i32 {
        self.schedule.power(desired - measured)
    }

    /// Run one control step: apply this cycle's event (if any), then compute arm power.
    pub fn step(&self, desired: &mut i32, event: Option<ArmEvent>, measured: i32) -> i32 {
        if let Some(event) = event {
            let before = *desired;
            self.apply(desired, event);
            if *desired != before {
                log::debug!("arm target {} -> {}", before, *desired);
            }
        }
        self.correction(*desired, measured)
    }
}
