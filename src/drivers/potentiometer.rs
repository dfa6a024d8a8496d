// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Arm potentiometer with a boot-time rest calibration.
//!
//! The arm rests on its hard stop at power-up. Averaging a burst of samples there gives the
//! baseline, and every later reading is reported relative to it, so the lowered arm reads 0.

use crate::io::{AdcRead, AnalogSensor};

pub struct Potentiometer<R> {
    adc: R,
    baseline: i32,
}

impl<R: AdcRead> Potentiometer<R> {
    /// Wrap an ADC channel. Uncalibrated until [`calibrate`](Self::calibrate) runs.
    pub fn new(adc: R) -> Self {
        Self { adc, baseline: 0 }
    }

    /// Average `samples` readings and use the result as the zero point.
    pub fn calibrate(&mut self, samples: u32) -> i32 {
        if samples == 0 {
            return self.baseline;
        }

        let sum: u32 = (0..samples).map(|_| self.adc.read_raw() as u32).sum();
        self.baseline = ((sum + samples / 2) / samples) as i32;

        log::info!("arm potentiometer baseline {}", self.baseline);
        self.baseline
    }

    #[inline]
    pub fn baseline(&self) -> i32 {
        self.baseline
    }
}

impl<R: AdcRead> AnalogSensor for Potentiometer<R> {
    fn read_calibrated(&mut self) -> i32 {
        self.adc.read_raw() as i32 - self.baseline
    }
}
