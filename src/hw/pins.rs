// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 robot controller.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, gpioe, Alternate, Analog, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub debug: Usart1Pins,
    pub receiver: Usart2Pins,
    pub motors: MotorPins,
    pub arm_pot: gpioc::PC4<Analog>, // ADC1_IN14
    pub light: gpioe::PE4<Output<PushPull>>,
}

/// Debug terminal
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Joystick receiver link
pub struct Usart2Pins {
    pub tx: gpiod::PD5<Alternate<7>>,
    pub rx: gpiod::PD6<Alternate<7>>,
}

/// Servo-pulse outputs, in motor port order.
pub struct MotorPins {
    pub port1: gpioc::PC6<Alternate<2>>,  // TIM3_CH1
    pub port2: gpioc::PC7<Alternate<2>>,  // TIM3_CH2
    pub port3: gpioc::PC8<Alternate<2>>,  // TIM3_CH3
    pub port4: gpioc::PC9<Alternate<2>>,  // TIM3_CH4
    pub port5: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub port6: gpiod::PD13<Alternate<2>>, // TIM4_CH2
    pub port7: gpiod::PD14<Alternate<2>>, // TIM4_CH3
    pub port8: gpiod::PD15<Alternate<2>>, // TIM4_CH4
    pub port9: gpioa::PA0<Alternate<2>>,  // TIM5_CH1
    pub port10: gpioa::PA1<Alternate<2>>, // TIM5_CH2
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD, gpioe: pac::GPIOE) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            debug: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            receiver: Usart2Pins {
                tx: gpiod.pd5.into_alternate::<7>(),
                rx: gpiod.pd6.into_alternate::<7>(),
            },

            motors: MotorPins {
                port1: gpioc.pc6.into_alternate::<2>(),
                port2: gpioc.pc7.into_alternate::<2>(),
                port3: gpioc.pc8.into_alternate::<2>(),
                port4: gpioc.pc9.into_alternate::<2>(),
                port5: gpiod.pd12.into_alternate::<2>(),
                port6: gpiod.pd13.into_alternate::<2>(),
                port7: gpiod.pd14.into_alternate::<2>(),
                port8: gpiod.pd15.into_alternate::<2>(),
                port9: gpioa.pa0.into_alternate::<2>(),
                port10: gpioa.pa1.into_alternate::<2>(),
            },

            arm_pot: gpioc.pc4.into_analog(),

            light: gpioe.pe4.into_push_pull_output(),
        }
    }
}
