// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Timed macro sequencer and the cube dropoff choreography.
//!
//! A macro is an ordered list of [`Step`]s. Each step applies one [`Action`] to the motors and
//! then holds for a fixed time before the next step starts. The [`Sequencer`] walks the list
//! against a millisecond time source, so the same plan can run blocking inside the control loop
//! ([`Sequencer::run_blocking`]) or be polled once per cycle and cancelled.
//!
//! Step start times are scheduled from the plan, not from when `poll` happened to run, so late
//! wakeups do not accumulate drift.

use crate::config::BACKUP_SPEED;
use crate::control::drive::DriveCommand;
use crate::control::tray::Rollers;
use crate::io::{Clock, MotorPort, MotorSink};

/// Tray power at the start of the raise ramp.
pub const RAMP_START_POWER: i32 = 127;
/// The ramp stops before dropping below this power.
pub const RAMP_END_POWER: i32 = 30;
pub const RAMP_DECREMENT: i32 = 2;
pub const RAMP_STEP_MS: u32 = 20;
pub const RAMP_STEPS: usize = ((RAMP_START_POWER - RAMP_END_POWER) / RAMP_DECREMENT) as usize + 1;
pub const RAMP_DURATION_MS: u32 = RAMP_STEPS as u32 * RAMP_STEP_MS;

/// Wait for the stack to tip out of the tray.
pub const SETTLE_MS: u32 = 2000;
pub const BUMP_POWER: i32 = 60;
pub const BUMP_MS: u32 = 200;
/// Wait for the bumped cubes to stop moving.
pub const DWELL_MS: u32 = 2000;
pub const BACKOUT_MS: u32 = 700;

pub const DROPOFF_STEPS: usize = RAMP_STEPS + 6;

/// The dropoff choreography: ramp the tray up, settle, bump, dwell, back away rolling out.
pub static DROPOFF_SEQUENCE: [Step; DROPOFF_STEPS] = dropoff_sequence();

const fn dropoff_sequence() -> [Step; DROPOFF_STEPS] {
    let mut steps = [Step::new(Action::Stop, 0); DROPOFF_STEPS];

    let mut i = 0;
    while i < RAMP_STEPS {
        let power = RAMP_START_POWER - RAMP_DECREMENT * i as i32;
        steps[i] = Step::new(Action::Tray(power), RAMP_STEP_MS);
        i += 1;
    }

    steps[RAMP_STEPS] = Step::new(Action::Tray(0), SETTLE_MS);
    steps[RAMP_STEPS + 1] = Step::new(Action::Drive(DriveCommand::straight(BUMP_POWER)), BUMP_MS);
    steps[RAMP_STEPS + 2] = Step::new(Action::Drive(DriveCommand::straight(-BUMP_POWER)), BUMP_MS);
    steps[RAMP_STEPS + 3] = Step::new(Action::Drive(DriveCommand::STOP), DWELL_MS);
    steps[RAMP_STEPS + 4] = Step::new(
        Action::BackOut {
            rollers: Rollers::BACKOUT,
            drive: DriveCommand::straight(-BACKUP_SPEED),
        },
        BACKOUT_MS,
    );
    steps[RAMP_STEPS + 5] = Step::new(Action::Stop, 0);

    steps
}

/// Motor command issued at the start of a step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Tray(i32),
    Drive(DriveCommand),
    BackOut {
        rollers: Rollers,
        drive: DriveCommand,
    },
    /// Rollers and drivetrain to zero.
    Stop,
}

impl Action {
    pub fn apply<M: MotorSink>(&self, motors: &mut M) {
        match *self {
            Action::Tray(power) => motors.set_power(MotorPort::Tray, power),
            Action::Drive(drive) => drive.apply(motors),
            Action::BackOut { rollers, drive } => {
                rollers.apply(motors);
                drive.apply(motors);
            }
            Action::Stop => {
                Rollers::Stop.apply(motors);
                DriveCommand::STOP.apply(motors);
            }
        }
    }
}

/// One `{action, hold}` pair of a macro.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub action: Action,
    pub hold_ms: u32,
}

impl Step {
    pub const fn new(action: Action, hold_ms: u32) -> Self {
        Self { action, hold_ms }
    }
}

/// What the sequencer is doing after a `start`/`poll`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    Idle,
    /// The current step holds for another `wait_ms`.
    Running { wait_ms: u32 },
    /// The last step completed on this call.
    Finished,
}

/// Walks a step list against a millisecond clock.
pub struct Sequencer<'a> {
    steps: &'a [Step],
    cursor: usize,
    step_started_ms: u32,
    running: bool,
}

impl Sequencer<'static> {
    /// Sequencer for the cube dropoff macro.
    pub fn dropoff() -> Self {
        Self::new(&DROPOFF_SEQUENCE)
    }
}

impl<'a> Sequencer<'a> {
    pub const fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            cursor: 0,
            step_started_ms: 0,
            running: false,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the step currently holding, if running.
    #[inline]
    pub fn current_step(&self) -> Option<usize> {
        self.running.then_some(self.cursor)
    }

    /// Begin the macro at `now_ms`, applying its first step.
    ///
    /// Starting while already running does nothing; the running macro keeps its schedule.
    pub fn start<M: MotorSink>(&mut self, now_ms: u32, motors: &mut M) -> Status {
        if self.running {
            log::warn!("macro already running, ignoring trigger");
            return self.poll(now_ms, motors);
        }

        let Some(first) = self.steps.first() else {
            return Status::Finished;
        };

        self.running = true;
        self.cursor = 0;
        self.step_started_ms = now_ms;
        first.action.apply(motors);

        self.poll(now_ms, motors)
    }

    /// Advance through every step whose hold has elapsed by `now_ms`.
    pub fn poll<M: MotorSink>(&mut self, now_ms: u32, motors: &mut M) -> Status {
        if !self.running {
            return Status::Idle;
        }

        loop {
            let step = self.steps[self.cursor];
            let elapsed = now_ms.wrapping_sub(self.step_started_ms);
            if elapsed < step.hold_ms {
                return Status::Running {
                    wait_ms: step.hold_ms - elapsed,
                };
            }

            self.cursor += 1;
            if self.cursor >= self.steps.len() {
                self.running = false;
                return Status::Finished;
            }

            self.step_started_ms = self.step_started_ms.wrapping_add(step.hold_ms);
            self.steps[self.cursor].action.apply(motors);
        }
    }

    /// Abort a running macro and zero every actuator it can command.
    pub fn cancel<M: MotorSink>(&mut self, motors: &mut M) {
        if !self.running {
            return;
        }
        log::warn!("macro cancelled at step {}", self.cursor);
        self.running = false;
        Action::Tray(0).apply(motors);
        Action::Stop.apply(motors);
    }

    /// Run the whole macro, sleeping on `clock` between steps.
    pub fn run_blocking<C: Clock, M: MotorSink>(&mut self, clock: &mut C, motors: &mut M) {
        let mut status = self.start(clock.now_ms(), motors);
        while let Status::Running { wait_ms } = status {
            clock.delay_ms(wait_ms);
            status = self.poll(clock.now_ms(), motors);
        }
    }
}
