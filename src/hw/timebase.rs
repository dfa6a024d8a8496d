// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Millisecond timebase driven by the SysTick exception.
//!
//! The binary forwards its `SysTick` handler to [`tick`]. [`Millis`] is a copyable handle onto the
//! shared counter, so the joystick link and the control loop can each own one.

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::{syst::SystClkSource, SYST};

use crate::io::Clock;

static MILLIS: AtomicU32 = AtomicU32::new(0);

/// Advance the counter by one millisecond. Call only from the SysTick handler.
#[inline]
pub fn tick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Copy, Clone, Debug)]
pub struct Millis {
    _private: (),
}

impl Millis {
    /// Program SysTick for a 1 kHz interrupt off the core clock and start counting from zero.
    pub fn start(mut syst: SYST, sysclk_hz: u32) -> Self {
        syst.disable_counter();
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk_hz / 1_000 - 1);
        syst.clear_current();
        MILLIS.store(0, Ordering::Relaxed);
        syst.enable_interrupt();
        syst.enable_counter();

        // SYST stays configured for the life of the program.
        core::mem::forget(syst);
        Self { _private: () }
    }

    #[inline]
    pub fn now(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}

impl Clock for Millis {
    fn now_ms(&mut self) -> u32 {
        self.now()
    }

    fn delay_ms(&mut self, ms: u32) {
        let start = self.now();
        while self.now().wrapping_sub(start) < ms {
            cortex_m::asm::wfi();
        }
    }
}
