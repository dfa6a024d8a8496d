// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side fakes for the hardware seams.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::config::RX_BUFFER_LEN;
use crate::drivers::rx_buffer::RxBuffer;
use crate::io::{
    clamp_power, AnalogSensor, ByteSource, Clock, DigitalOutput, InputSampler, JoystickState,
    MotorPort, MotorSink, PulseDelay,
};

/// Millisecond clock that only moves when told to (or when something delays on it).
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u32>>,
    delays: Rc<RefCell<Vec<u32>>>,
}

impl ManualClock {
    pub fn starting_at(ms: u32) -> Self {
        let clock = Self::default();
        clock.now.set(ms);
        clock
    }

    /// Shared view of the current time, for recorders that timestamp events.
    pub fn handle(&self) -> Rc<Cell<u32>> {
        self.now.clone()
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u32 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.borrow_mut().push(ms);
        self.advance(ms);
    }
}

/// Motor sink that remembers the last power per port and every write.
#[derive(Default)]
pub struct RecordingMotors {
    powers: [i32; 10],
    log: Vec<(u32, MotorPort, i32)>,
    time: Option<Rc<Cell<u32>>>,
}

impl RecordingMotors {
    pub fn with_clock(time: Rc<Cell<u32>>) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    pub fn power(&self, port: MotorPort) -> i32 {
        self.powers[port.number() as usize - 1]
    }

    /// Every port written, in write order.
    pub fn write_order(&self) -> Vec<MotorPort> {
        self.log.iter().map(|&(_, port, _)| port).collect()
    }

    /// `(time, power)` for every write to `port`, in order.
    pub fn history(&self, port: MotorPort) -> Vec<(u32, i32)> {
        self.log
            .iter()
            .filter(|(_, p, _)| *p == port)
            .map(|&(at, _, power)| (at, power))
            .collect()
    }
}

impl MotorSink for RecordingMotors {
    fn set_power(&mut self, port: MotorPort, power: i32) {
        let power = clamp_power(power);
        let at = self.time.as_ref().map_or(0, |t| t.get());
        self.powers[port.number() as usize - 1] = power;
        self.log.push((at, port, power));
    }
}

/// Replays queued joystick samples, then repeats the last one.
#[derive(Clone, Default)]
pub struct ScriptedInputs {
    queue: Rc<RefCell<VecDeque<JoystickState>>>,
    last: Rc<Cell<JoystickState>>,
}

impl ScriptedInputs {
    pub fn push(&self, js: JoystickState) {
        self.queue.borrow_mut().push_back(js);
    }
}

impl InputSampler for ScriptedInputs {
    fn sample(&mut self) -> JoystickState {
        if let Some(js) = self.queue.borrow_mut().pop_front() {
            self.last.set(js);
        }
        self.last.get()
    }
}

/// Sensor whose value the test sets directly.
#[derive(Clone, Default)]
pub struct SharedSensor(pub Rc<Cell<i32>>);

impl SharedSensor {
    pub fn set(&self, value: i32) {
        self.0.set(value);
    }
}

impl AnalogSensor for SharedSensor {
    fn read_calibrated(&mut self) -> i32 {
        self.0.get()
    }
}

/// Bytes waiting in a fake UART.
#[derive(Clone, Default)]
pub struct QueuedBytes(Rc<RefCell<VecDeque<u8>>>);

impl QueuedBytes {
    pub fn push(&self, bytes: &[u8]) {
        self.0.borrow_mut().extend(bytes.iter().copied());
    }
}

impl ByteSource for QueuedBytes {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.borrow_mut().pop_front()
    }
}

/// UART with a single data register: a byte that lands before the previous one was read
/// overwrites it.
#[derive(Clone, Default)]
pub struct SingleByteUart {
    data: Rc<Cell<Option<u8>>>,
    overruns: Rc<Cell<u32>>,
}

impl SingleByteUart {
    /// A byte finishes arriving on the wire.
    pub fn receive(&self, byte: u8) {
        if self.data.replace(Some(byte)).is_some() {
            self.overruns.set(self.overruns.get() + 1);
        }
    }

    pub fn overruns(&self) -> u32 {
        self.overruns.get()
    }
}

impl ByteSource for SingleByteUart {
    fn read_byte(&mut self) -> Option<u8> {
        self.data.take()
    }
}

/// Receive buffer shared between a simulated interrupt and a reader.
#[derive(Clone, Default)]
pub struct SharedRxBuffer(pub Rc<RefCell<RxBuffer<RX_BUFFER_LEN>>>);

impl ByteSource for SharedRxBuffer {
    fn read_byte(&mut self) -> Option<u8> {
        self.0.borrow_mut().read_byte()
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WaveEvent {
    High,
    Low,
    Delay(u32),
}

pub type WaveLog = Rc<RefCell<Vec<WaveEvent>>>;

pub struct RecordingLine(WaveLog);

impl DigitalOutput for RecordingLine {
    fn set_high(&mut self) {
        self.0.borrow_mut().push(WaveEvent::High);
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().push(WaveEvent::Low);
    }
}

pub struct RecordingDelay(WaveLog);

impl PulseDelay for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(WaveEvent::Delay(ns));
    }
}

/// A line and a delay that write into one shared, ordered log.
pub fn waveform_recorder() -> (RecordingLine, RecordingDelay, WaveLog) {
    let log = WaveLog::default();
    (RecordingLine(log.clone()), RecordingDelay(log.clone()), log)
}
