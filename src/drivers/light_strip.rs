// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bit-banged one-wire addressable LED strip.
//!
//! The strip takes a single data line: a long low pulse resets it, then each bit is a high pulse
//! followed by a low pulse, with the high/low ratio encoding the bit value. Only logic-0 bits are
//! emitted here, so a write clears the first pixels of the strip.
//!
//! Timing is described by a [`Waveform`] in nanoseconds and realised by a [`PulseDelay`]. The
//! protocol code never counts instructions itself; retargeting to another clock speed, or to a
//! timer peripheral, only means supplying a different delay.
//!
//! There is no feedback from the strip. Interrupts, flash wait states or a miscalibrated delay all
//! stretch pulses silently, so a write is best effort.

use crate::io::{DigitalOutput, PulseDelay};

/// Core clock the cycle counts in `ZERO_FILL` were measured at.
pub const REFERENCE_CLOCK_HZ: u32 = 90_000_000;

/// Reset pulse plus `bit_slots` logic-0 bits.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Waveform {
    pub reset_ns: u32,
    pub zero_high_ns: u32,
    pub zero_low_ns: u32,
    pub bit_slots: u32,
}

impl Waveform {
    /// 51 µs reset, then 48 zero bits of 1 cycle high / 80 cycles low at the reference clock.
    pub const ZERO_FILL: Waveform = Waveform::from_cycles(REFERENCE_CLOCK_HZ, 51, 1, 80, 48);

    /// Build a waveform from cycle counts measured at `clock_hz`.
    pub const fn from_cycles(
        clock_hz: u32,
        reset_us: u32,
        high_cycles: u32,
        low_cycles: u32,
        bit_slots: u32,
    ) -> Self {
        Self {
            reset_ns: reset_us * 1_000,
            zero_high_ns: cycles_to_ns(high_cycles, clock_hz),
            zero_low_ns: cycles_to_ns(low_cycles, clock_hz),
            bit_slots,
        }
    }

    /// Total time the line is busy, ignoring pin toggle overhead.
    pub const fn duration_ns(&self) -> u64 {
        self.reset_ns as u64 + self.bit_slots as u64 * (self.zero_high_ns + self.zero_low_ns) as u64
    }
}

/// Nanoseconds covered by `cycles` at `clock_hz`, rounded to nearest.
pub const fn cycles_to_ns(cycles: u32, clock_hz: u32) -> u32 {
    ((cycles as u64 * 1_000_000_000 + clock_hz as u64 / 2) / clock_hz as u64) as u32
}

/// Cycles needed to cover `ns` at `clock_hz`, rounded to nearest but never zero.
pub const fn ns_to_cycles(ns: u32, clock_hz: u32) -> u32 {
    let cycles = ((ns as u64 * clock_hz as u64 + 500_000_000) / 1_000_000_000) as u32;
    if cycles == 0 {
        1
    } else {
        cycles
    }
}

pub struct LightStrip<P, D> {
    line: P,
    delay: D,
    waveform: Waveform,
}

impl<P: DigitalOutput, D: PulseDelay> LightStrip<P, D> {
    pub fn new(line: P, delay: D) -> Self {
        Self::with_waveform(line, delay, Waveform::ZERO_FILL)
    }

    pub fn with_waveform(line: P, delay: D, waveform: Waveform) -> Self {
        Self {
            line,
            delay,
            waveform,
        }
    }

    /// Reset pulse followed by the zero bits. Blocks for the whole waveform and leaves the line
    /// high.
    pub fn emit(&mut self) {
        let w = self.waveform;

        self.line.set_low();
        self.delay.delay_ns(w.reset_ns);
        self.line.set_high();

        for _ in 0..w.bit_slots {
            self.line.set_high();
            self.delay.delay_ns(w.zero_high_ns);
            self.line.set_low();
            self.delay.delay_ns(w.zero_low_ns);
        }

        self.line.set_high();
    }
}
