// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Cycle-counted busy wait for sub-microsecond pulses.

use crate::drivers::light_strip::ns_to_cycles;
use crate::io::PulseDelay;

/// Spins the core for the requested time. Interrupts stretch the wait.
#[derive(Copy, Clone, Debug)]
pub struct BusyWait {
    sysclk_hz: u32,
}

impl BusyWait {
    pub fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl PulseDelay for BusyWait {
    #[inline(always)]
    fn delay_ns(&mut self, ns: u32) {
        cortex_m::asm::delay(ns_to_cycles(ns, self.sysclk_hz));
    }
}
