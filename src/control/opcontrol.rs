// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operator-control loop.
//!
//! Every 20 ms the loop samples the joystick once and then, in a fixed order, drives the
//! drivetrain, rollers, tray and arm. Two macro buttons are edge-triggered: the dropoff macro
//! blocks the loop until it finishes, and the signal button writes the light strip.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! let mut opcontrol = OpControl::new(link, motors, pot, clock, strip);
//! opcontrol.run();
//! ```

use crate::config::{
    BACKOUT_BUTTON, BACKUP_SPEED, CYCLE_PERIOD_MS, DROPOFF_BUTTON, FORWARD_AXIS, INDICATOR_POWER,
    SIGNAL_BUTTON, TURN_AXIS,
};
use crate::control::arm::{ArmController, ArmEvent};
use crate::control::dropoff::Sequencer;
use crate::control::drive::{self, DriveCommand};
use crate::control::tray::{Rollers, Tray};
use crate::drivers::LightStrip;
use crate::io::{
    AnalogSensor, Clock, DigitalOutput, InputSampler, MotorPort, MotorSink, PulseDelay,
};

/// Transition of a button between two consecutive samples.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    Pressed,
    Released,
    Unchanged,
}

/// Remembers the previous level of one button.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    pub fn update(&mut self, pressed: bool) -> Edge {
        let edge = match (self.was_pressed, pressed) {
            (false, true) => Edge::Pressed,
            (true, false) => Edge::Released,
            _ => Edge::Unchanged,
        };
        self.was_pressed = pressed;
        edge
    }
}

/// Working memory carried from one cycle to the next.
///
/// Created zeroed whenever the control task starts; nothing survives a restart.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ControlCycleState {
    /// Always within the arm controller's bounds.
    pub desired_arm_angle: i32,
    pub tray: Tray,
    pub dropoff_button: EdgeDetector,
    pub signal_button: EdgeDetector,
}

pub struct OpControl<I, M, S, C, P, D> {
    inputs: I,
    motors: M,
    arm_sensor: S,
    clock: C,
    light: LightStrip<P, D>,
    arm: ArmController,
    dropoff: Sequencer<'static>,
    state: ControlCycleState,
}

impl<I, M, S, C, P, D> OpControl<I, M, S, C, P, D>
where
    I: InputSampler,
    M: MotorSink,
    S: AnalogSensor,
    C: Clock,
    P: DigitalOutput,
    D: PulseDelay,
{
    pub fn new(inputs: I, motors: M, arm_sensor: S, clock: C, light: LightStrip<P, D>) -> Self {
        Self::with_arm(inputs, motors, arm_sensor, clock, light, ArmController::default())
    }

    pub fn with_arm(
        inputs: I,
        motors: M,
        arm_sensor: S,
        clock: C,
        light: LightStrip<P, D>,
        arm: ArmController,
    ) -> Self {
        let (lower, _) = arm.bounds();
        Self {
            inputs,
            motors,
            arm_sensor,
            clock,
            light,
            arm,
            dropoff: Sequencer::dropoff(),
            state: ControlCycleState {
                desired_arm_angle: lower,
                ..ControlCycleState::default()
            },
        }
    }

    #[inline]
    pub fn state(&self) -> &ControlCycleState {
        &self.state
    }

    #[inline]
    pub fn motors(&self) -> &M {
        &self.motors
    }

    /// Run one control cycle without pacing. Returns the time the cycle started.
    pub fn cycle(&mut self) -> u32 {
        let started = self.clock.now_ms();
        let js = self.inputs.sample();

        // Drive and rollers; backing out overrides both.
        let (drive, rollers) = if js.pressed(BACKOUT_BUTTON) {
            (DriveCommand::straight(-BACKUP_SPEED), Rollers::BACKOUT)
        } else {
            (
                drive::arcade(js.axis(FORWARD_AXIS), js.axis(TURN_AXIS)),
                Rollers::from_joystick(&js),
            )
        };
        drive.apply(&mut self.motors);
        rollers.apply(&mut self.motors);

        self.state.tray.update(&js, &mut self.motors);

        let measured = self.arm_sensor.read_calibrated();
        let arm_power = self.arm.step(
            &mut self.state.desired_arm_angle,
            ArmEvent::from_joystick(&js),
            measured,
        );
        self.motors.set_power(MotorPort::RightArm, arm_power);
        self.motors.set_power(MotorPort::LeftArm, arm_power);

        if self.state.dropoff_button.update(js.pressed(DROPOFF_BUTTON)) == Edge::Pressed {
            log::info!("dropoff macro start");
            self.dropoff.run_blocking(&mut self.clock, &mut self.motors);
            log::info!("dropoff macro done");
        }

        match self.state.signal_button.update(js.pressed(SIGNAL_BUTTON)) {
            Edge::Pressed => {
                self.motors.set_power(MotorPort::Indicator, INDICATOR_POWER);
                self.light.emit();
            }
            Edge::Released => self.motors.set_power(MotorPort::Indicator, 0),
            Edge::Unchanged => {}
        }

        started
    }

    /// Sleep out the rest of the cycle that began at `started`. Overruns skip the sleep.
    pub fn pace(&mut self, started: u32) {
        let elapsed = self.clock.now_ms().wrapping_sub(started);
        if elapsed < CYCLE_PERIOD_MS {
            self.clock.delay_ms(CYCLE_PERIOD_MS - elapsed);
        }
    }

    /// The operator-control task body. Never returns.
    pub fn run(&mut self) -> ! {
        log::info!("operator control running");
        loop {
            let started = self.cycle();
            self.pace(started);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ARM_LOWER_BOUND, ARM_STEP, ARM_UPPER_BOUND};
    use crate::control::arm::GainSchedule;
    use crate::control::dropoff::{
        BACKOUT_MS, BUMP_MS, DWELL_MS, RAMP_DURATION_MS, RAMP_STEPS, SETTLE_MS,
    };
    use crate::io::{Axis, Button, JoystickState};
    use crate::testing::{
        waveform_recorder, ManualClock, RecordingDelay, RecordingLine, RecordingMotors,
        ScriptedInputs, SharedSensor, WaveEvent, WaveLog,
    };

    type TestLoop = OpControl<
        ScriptedInputs,
        RecordingMotors,
        SharedSensor,
        ManualClock,
        RecordingLine,
        RecordingDelay,
    >;

    struct Rig {
        inputs: ScriptedInputs,
        sensor: SharedSensor,
        clock: ManualClock,
        wave: WaveLog,
        op: TestLoop,
    }

    fn rig() -> Rig {
        let inputs = ScriptedInputs::default();
        let sensor = SharedSensor::default();
        let clock = ManualClock::starting_at(0);
        let (line, delay, wave) = waveform_recorder();
        let op = OpControl::with_arm(
            inputs.clone(),
            RecordingMotors::with_clock(clock.handle()),
            sensor.clone(),
            clock.clone(),
            LightStrip::new(line, delay),
            ArmController::new(ARM_LOWER_BOUND, ARM_UPPER_BOUND, ARM_STEP, GainSchedule::FLAT),
        );
        Rig {
            inputs,
            sensor,
            clock,
            wave,
            op,
        }
    }

    #[test]
    fn edge_detector_reports_transitions() {
        let mut edge = EdgeDetector::default();
        assert_eq!(edge.update(false), Edge::Unchanged);
        assert_eq!(edge.update(true), Edge::Pressed);
        assert_eq!(edge.update(true), Edge::Unchanged);
        assert_eq!(edge.update(false), Edge::Released);
    }

    #[test]
    fn state_starts_zeroed() {
        let r = rig();
        assert_eq!(r.op.state().desired_arm_angle, 0);
        assert_eq!(r.op.state().tray.cycle_index(), 0);
    }

    #[test]
    fn cycle_maps_sticks_to_drive() {
        let mut r = rig();
        r.inputs.push(
            JoystickState::NEUTRAL
                .with_axis(Axis::Ch3, 100)
                .with_axis(Axis::Ch1, 42),
        );
        r.op.cycle();

        // 42 / 1.4 = 30
        let motors = r.op.motors();
        assert_eq!(motors.power(MotorPort::LeftDriveFront), 127);
        assert_eq!(motors.power(MotorPort::LeftDriveBack), 127);
        assert_eq!(motors.power(MotorPort::RightDriveFront), -70);
        assert_eq!(motors.power(MotorPort::RightDriveBack), -70);
    }

    #[test]
    fn backout_overrides_drive_and_rollers() {
        let mut r = rig();
        r.inputs.push(
            JoystickState::NEUTRAL
                .with_axis(Axis::Ch3, 127)
                .with_button(Button::Group6Up)
                .with_button(Button::Group8Down),
        );
        r.op.cycle();

        let motors = r.op.motors();
        assert_eq!(motors.power(MotorPort::LeftDriveFront), -70);
        assert_eq!(motors.power(MotorPort::RightDriveFront), 70);
        assert_eq!(motors.power(MotorPort::RightRoller), 80);
        assert_eq!(motors.power(MotorPort::LeftRoller), -80);
    }

    #[test]
    fn arm_target_climbs_and_drives_motors() {
        let mut r = rig();
        r.sensor.set(0);
        let raise = JoystickState::NEUTRAL.with_button(Button::Group7Up);
        for _ in 0..5 {
            r.inputs.push(raise);
        }
        for _ in 0..5 {
            r.op.cycle();
        }

        assert_eq!(r.op.state().desired_arm_angle, 150);
        assert_eq!(r.op.motors().power(MotorPort::RightArm), -15);
        assert_eq!(r.op.motors().power(MotorPort::LeftArm), -15);

        // Held past the top, the target saturates.
        for _ in 0..200 {
            r.op.cycle();
        }
        assert_eq!(r.op.state().desired_arm_angle, ARM_UPPER_BOUND);

        r.inputs
            .push(JoystickState::NEUTRAL.with_button(Button::Group7Left));
        r.sensor.set(300);
        r.op.cycle();
        assert_eq!(r.op.state().desired_arm_angle, 0);
        assert_eq!(r.op.motors().power(MotorPort::LeftArm), 30);
    }

    #[test]
    fn dropoff_runs_once_per_press() {
        let mut r = rig();
        let held = JoystickState::NEUTRAL.with_button(Button::Group8Right);
        r.inputs.push(held);
        r.inputs.push(held);
        r.inputs.push(JoystickState::NEUTRAL);

        let started = r.op.cycle();
        let macro_ms = RAMP_DURATION_MS + SETTLE_MS + 2 * BUMP_MS + DWELL_MS + BACKOUT_MS;
        assert_eq!(r.clock.handle().get() - started, macro_ms);
        for port in [
            MotorPort::Tray,
            MotorPort::LeftDriveFront,
            MotorPort::RightRoller,
        ] {
            assert_eq!(r.op.motors().power(port), 0);
        }

        // Held, then released: no second run.
        let before = r.clock.handle().get();
        r.op.cycle();
        r.op.cycle();
        assert_eq!(r.clock.handle().get(), before);
        // One sleep per ramp step plus the five timed holds.
        assert_eq!(r.clock.delays().len(), RAMP_STEPS + 5);

        r.inputs.push(JoystickState::NEUTRAL);
        r.inputs.push(held);
        r.op.cycle();
        r.op.cycle();
        assert_eq!(r.clock.handle().get(), before + macro_ms);
    }

    #[test]
    fn signal_button_emits_light_on_press() {
        let mut r = rig();
        let held = JoystickState::NEUTRAL.with_button(Button::Group8Up);
        r.inputs.push(held);
        r.inputs.push(held);
        r.inputs.push(JoystickState::NEUTRAL);

        r.op.cycle();
        assert_eq!(r.op.motors().power(MotorPort::Indicator), 127);
        let emitted = r.wave.borrow().len();
        assert_eq!(emitted, 3 + 48 * 4 + 1);
        assert_eq!(r.wave.borrow().last(), Some(&WaveEvent::High));

        r.op.cycle();
        assert_eq!(r.wave.borrow().len(), emitted);

        r.op.cycle();
        assert_eq!(r.op.motors().power(MotorPort::Indicator), 0);
        assert_eq!(r.wave.borrow().len(), emitted);
    }

    #[test]
    fn one_cycle_writes_subsystems_in_fixed_order() {
        let mut r = rig();
        r.inputs.push(
            JoystickState::NEUTRAL
                .with_axis(Axis::Ch3, 90)
                .with_axis(Axis::Ch1, 60)
                .with_button(Button::Group6Up)
                .with_button(Button::Group5Up)
                .with_button(Button::Group7Up)
                .with_button(Button::Group8Up),
        );
        r.op.cycle();

        assert_eq!(
            r.op.motors().write_order(),
            [
                MotorPort::LeftDriveFront,
                MotorPort::LeftDriveBack,
                MotorPort::RightDriveFront,
                MotorPort::RightDriveBack,
                MotorPort::RightRoller,
                MotorPort::LeftRoller,
                MotorPort::Tray,
                MotorPort::RightArm,
                MotorPort::LeftArm,
                MotorPort::Indicator,
            ]
        );
    }

    #[test]
    fn dropoff_runs_after_arm_and_before_signal() {
        let mut r = rig();
        r.inputs.push(
            JoystickState::NEUTRAL
                .with_button(Button::Group8Right)
                .with_button(Button::Group8Up),
        );
        r.op.cycle();

        let order = r.op.motors().write_order();
        assert_eq!(order[8], MotorPort::LeftArm);
        // First ramp step of the macro.
        assert_eq!(order[9], MotorPort::Tray);
        assert_eq!(order.last(), Some(&MotorPort::Indicator));
        assert_eq!(
            order.iter().filter(|&&p| p == MotorPort::Indicator).count(),
            1
        );
    }

    #[test]
    fn pace_sleeps_out_the_period() {
        let mut r = rig();
        let started = r.op.cycle();
        r.clock.advance(7);
        r.op.pace(started);
        assert_eq!(r.clock.delays(), [13]);

        // Overrun: no sleep.
        let started = r.op.cycle();
        r.clock.advance(25);
        r.op.pace(started);
        assert_eq!(r.clock.delays(), [13]);
    }
}
