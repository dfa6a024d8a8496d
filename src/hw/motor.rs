// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Servo-style PWM outputs for the ten motor ports.
//!
//! Each port drives a motor controller that reads a 50 Hz pulse: 1500 µs is stop, and the pulse
//! swings ±500 µs across the full power range. TIM3 and TIM4 carry ports 1-8, TIM5 carries the
//! two arm ports. All three timers tick at 1 MHz so compare values are in microseconds.

use stm32f7xx_hal::pac;

use crate::hw::pins::MotorPins;
use crate::io::{clamp_power, MotorPort, MotorSink, MAX_POWER};

/// Frame period, µs.
pub const FRAME_US: u32 = 20_000;
pub const NEUTRAL_PULSE_US: u32 = 1_500;
pub const PULSE_SWING_US: i32 = 500;

/// Compare value for a signed power, saturated to the valid range.
pub fn pulse_width_us(power: i32) -> u32 {
    let power = clamp_power(power);
    (NEUTRAL_PULSE_US as i32 + power * PULSE_SWING_US / MAX_POWER) as u32
}

// PWM mode 1 with preload on both channels of a CCMR register.
const CCMR_PWM1_BOTH: u32 = 0x6868;
// CC1E..CC4E
const CCER_ALL_ENABLED: u32 = 0x1111;

pub struct MotorBank {
    tim3: pac::TIM3,
    tim4: pac::TIM4,
    tim5: pac::TIM5,
    _pins: MotorPins,
}

fn init_16bit(tim: &pac::tim3::RegisterBlock, psc: u32) {
    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    tim.psc.write(|w| unsafe { w.bits(psc) });
    tim.arr.write(|w| unsafe { w.bits(FRAME_US - 1) });

    tim.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_BOTH) });
    tim.ccmr2_output().write(|w| unsafe { w.bits(CCMR_PWM1_BOTH) });

    tim.ccr1.write(|w| unsafe { w.bits(NEUTRAL_PULSE_US) });
    tim.ccr2.write(|w| unsafe { w.bits(NEUTRAL_PULSE_US) });
    tim.ccr3.write(|w| unsafe { w.bits(NEUTRAL_PULSE_US) });
    tim.ccr4.write(|w| unsafe { w.bits(NEUTRAL_PULSE_US) });

    tim.ccer.write(|w| unsafe { w.bits(CCER_ALL_ENABLED) });

    // Load prescaler and compares, then start with auto-reload preload
    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());
}

fn init_32bit(tim: &pac::tim2::RegisterBlock, psc: u32) {
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    tim.psc.write(|w| unsafe { w.bits(psc) });
    tim.arr.write(|w| unsafe { w.bits(FRAME_US - 1) });

    tim.ccmr1_output().write(|w| unsafe { w.bits(CCMR_PWM1_BOTH) });
    tim.ccr1.write(|w| unsafe { w.bits(NEUTRAL_PULSE_US) });
    tim.ccr2.write(|w| unsafe { w.bits(NEUTRAL_PULSE_US) });

    // CC1E, CC2E
    tim.ccer.write(|w| unsafe { w.bits(0x0011) });

    tim.egr.write(|w| w.ug().set_bit());
    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());
}

fn write_16bit(tim: &pac::tim3::RegisterBlock, channel: u8, us: u32) {
    match channel {
        1 => tim.ccr1.write(|w| unsafe { w.bits(us) }),
        2 => tim.ccr2.write(|w| unsafe { w.bits(us) }),
        3 => tim.ccr3.write(|w| unsafe { w.bits(us) }),
        _ => tim.ccr4.write(|w| unsafe { w.bits(us) }),
    }
}

fn write_32bit(tim: &pac::tim2::RegisterBlock, channel: u8, us: u32) {
    match channel {
        1 => tim.ccr1.write(|w| unsafe { w.bits(us) }),
        _ => tim.ccr2.write(|w| unsafe { w.bits(us) }),
    }
}

impl MotorBank {
    /// Enable the timers, start every output at neutral. `timclk_hz` is the APB1 timer clock.
    pub fn new(
        tim3: pac::TIM3,
        tim4: pac::TIM4,
        tim5: pac::TIM5,
        pins: MotorPins,
        timclk_hz: u32,
    ) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr
            .modify(|_, w| w.tim3en().set_bit().tim4en().set_bit().tim5en().set_bit());

        let psc = timclk_hz / 1_000_000 - 1;
        init_16bit(&tim3, psc);
        init_16bit(&tim4, psc);
        init_32bit(&tim5, psc);

        Self {
            tim3,
            tim4,
            tim5,
            _pins: pins,
        }
    }
}

impl MotorSink for MotorBank {
    fn set_power(&mut self, port: MotorPort, power: i32) {
        let us = pulse_width_us(power);
        match port.number() {
            n @ 1..=4 => write_16bit(&self.tim3, n, us),
            n @ 5..=8 => write_16bit(&self.tim4, n - 4, us),
            n => write_32bit(&self.tim5, n - 8, us),
        }
    }
}
