// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Seams
//!
//! The control code never touches registers. Everything it needs from the robot goes through
//! the small traits in this module, which the `hw` layer implements for the STM32F7 board and
//! the test fakes implement on the host.

/// Largest magnitude a motor port accepts. Commands beyond this saturate.
pub const MAX_POWER: i32 = 127;

/// Motor ports, numbered as they are wired on the robot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MotorPort {
    Indicator,
    RightDriveFront,
    RightDriveBack,
    LeftDriveBack,
    LeftDriveFront,
    Tray,
    RightRoller,
    LeftRoller,
    RightArm,
    LeftArm,
}

impl MotorPort {
    pub const ALL: [MotorPort; 10] = [
        MotorPort::Indicator,
        MotorPort::RightDriveFront,
        MotorPort::RightDriveBack,
        MotorPort::LeftDriveBack,
        MotorPort::LeftDriveFront,
        MotorPort::Tray,
        MotorPort::RightRoller,
        MotorPort::LeftRoller,
        MotorPort::RightArm,
        MotorPort::LeftArm,
    ];

    /// Physical port number (1..=10).
    pub const fn number(self) -> u8 {
        match self {
            MotorPort::Indicator => 1,
            MotorPort::RightDriveFront => 2,
            MotorPort::RightDriveBack => 3,
            MotorPort::LeftDriveBack => 4,
            MotorPort::LeftDriveFront => 5,
            MotorPort::Tray => 6,
            MotorPort::RightRoller => 7,
            MotorPort::LeftRoller => 8,
            MotorPort::RightArm => 9,
            MotorPort::LeftArm => 10,
        }
    }
}

/// Saturate a power command to `[-MAX_POWER, MAX_POWER]`.
#[inline]
pub fn clamp_power(power: i32) -> i32 {
    power.clamp(-MAX_POWER, MAX_POWER)
}

/// Joystick analog channels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Axis {
    /// Right stick, horizontal.
    Ch1,
    /// Right stick, vertical.
    Ch2,
    /// Left stick, vertical.
    Ch3,
    /// Left stick, horizontal.
    Ch4,
}

impl Axis {
    #[inline]
    const fn index(self) -> usize {
        match self {
            Axis::Ch1 => 0,
            Axis::Ch2 => 1,
            Axis::Ch3 => 2,
            Axis::Ch4 => 3,
        }
    }
}

/// Joystick digital buttons, grouped the way the handset labels them.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Button {
    Group5Up,
    Group5Down,
    Group6Up,
    Group6Down,
    Group7Up,
    Group7Down,
    Group7Left,
    Group7Right,
    Group8Up,
    Group8Down,
    Group8Left,
    Group8Right,
}

impl Button {
    /// Bit position inside the packed button word.
    #[inline]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// One sample of the joystick: four signed axes and a packed button word.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct JoystickState {
    axes: [i8; 4],
    buttons: u16,
}

impl JoystickState {
    /// All axes centered, nothing pressed.
    pub const NEUTRAL: JoystickState = JoystickState {
        axes: [0; 4],
        buttons: 0,
    };

    pub const fn new(axes: [i8; 4], buttons: u16) -> Self {
        Self { axes, buttons }
    }

    /// Signed axis reading, nominally `[-127, 127]`.
    #[inline]
    pub fn axis(&self, axis: Axis) -> i32 {
        self.axes[axis.index()] as i32
    }

    #[inline]
    pub fn pressed(&self, button: Button) -> bool {
        self.buttons & button.bit() != 0
    }

    #[inline]
    pub fn buttons(&self) -> u16 {
        self.buttons
    }

    pub fn with_axis(mut self, axis: Axis, value: i8) -> Self {
        self.axes[axis.index()] = value;
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons |= button.bit();
        self
    }
}

/// Reads the joystick once per control cycle.
pub trait InputSampler {
    fn sample(&mut self) -> JoystickState;
}

/// Non-blocking byte receiver.
pub trait ByteSource {
    /// Next received byte, or `None` if nothing is waiting.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Accepts a signed power level per motor port and applies it to hardware.
pub trait MotorSink {
    /// Apply `power` to `port`. Implementations saturate to `[-MAX_POWER, MAX_POWER]`.
    fn set_power(&mut self, port: MotorPort, power: i32);
}

/// Trait for reading a single raw sample from an analog input.
pub trait AdcRead {
    fn read_raw(&mut self) -> u16;
}

/// Calibrated analog position sensor (zero at the calibrated rest position).
pub trait AnalogSensor {
    fn read_calibrated(&mut self) -> i32;
}

/// A single push-pull digital output line.
pub trait DigitalOutput {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

/// Short, calibrated busy-wait delays used for bit-banged waveforms.
pub trait PulseDelay {
    fn delay_ns(&mut self, ns: u32);
}

/// Millisecond time source with a cooperative blocking delay.
///
/// `now_ms` is a free-running counter and is allowed to wrap; compare with `wrapping_sub`.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
    fn delay_ms(&mut self, ms: u32);
}

impl<T: MotorSink + ?Sized> MotorSink for &mut T {
    fn set_power(&mut self, port: MotorPort, power: i32) {
        (**self).set_power(port, power)
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&mut self) -> u32 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
