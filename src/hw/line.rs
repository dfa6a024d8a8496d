// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Push-pull data line for the light strip.

use stm32f7xx_hal::gpio::{gpioe, Output, PushPull};

use crate::io::DigitalOutput;

pub type LightPin = gpioe::PE4<Output<PushPull>>;

/// Whether the line is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// Output pin that maps logical high/low through the board's active level.
pub struct DataLine {
    pin: LightPin,
    active: ActiveLevel,
}

impl DataLine {
    /// Wrap `pin` and park it at logical high, the strip's idle level.
    pub fn new(pin: LightPin, active: ActiveLevel) -> Self {
        let mut line = Self { pin, active };
        line.set(true);
        line
    }

    pub fn active_high(pin: LightPin) -> Self {
        Self::new(pin, ActiveLevel::High)
    }

    fn set(&mut self, high: bool) {
        match (self.active, high) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low(),
        }
    }
}

impl DigitalOutput for DataLine {
    #[inline(always)]
    fn set_high(&mut self) {
        self.set(true);
    }

    #[inline(always)]
    fn set_low(&mut self) {
        self.set(false);
    }
}
