// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Basic ADC support for STM32F7 using direct PAC register access.
//!
//! Thin wrapper around ADC1 with blocking single-channel reads.
//!
//! Example:
//! ```ignore
//! let pot = Adc::adc1(dp.ADC1).channel(14);
//! ```

use stm32f7xx_hal::pac;

use crate::io::AdcRead;

pub struct Adc<ADC> {
    adc: ADC,
}

fn configure_common() {
    let common = unsafe { &*pac::ADC_COMMON::ptr() };

    // ADC prescaler: PCLK2 / 4
    common.ccr.modify(|_, w| w.adcpre().div4());
}

fn init_basic_adc(adc: &pac::adc1::RegisterBlock) {
    // Power off to configure
    adc.cr2.modify(|_, w| w.adon().clear_bit());

    // 12-bit, right-aligned, software trigger
    adc.cr1.modify(|_, w| w.res().bits(0b00));
    adc.cr2.modify(|_, w| {
        w.cont().clear_bit();
        w.align().right();
        w.exten().disabled();
        w
    });

    // Longest sample time on every channel; the pot source impedance is high
    adc.smpr1.write(|w| unsafe { w.bits(0x07FF_FFFF) });
    adc.smpr2.write(|w| unsafe { w.bits(0x3FFF_FFFF) });

    // Sequence length = 1 conversion
    adc.sqr1.modify(|_, w| w.l().bits(0));

    adc.cr2.modify(|_, w| w.adon().set_bit());
}

impl Adc<pac::ADC1> {
    /// Create and initialize ADC1.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        configure_common();
        init_basic_adc(&adc1);

        Self { adc: adc1 }
    }

    /// Blocking conversion of one channel.
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;

        adc.sqr3
            .modify(|_, w| unsafe { w.sq1().bits(channel & 0x1F) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }

    /// Dedicate the converter to a single input.
    pub fn channel(self, channel: u8) -> AdcChannel {
        AdcChannel { adc: self, channel }
    }
}

/// One ADC1 input, as a reading source for a sensor driver.
pub struct AdcChannel {
    adc: Adc<pac::ADC1>,
    channel: u8,
}

impl AdcRead for AdcChannel {
    #[inline]
    fn read_raw(&mut self) -> u16 {
        self.adc.read(self.channel)
    }
}
