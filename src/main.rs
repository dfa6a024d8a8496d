// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::{entry, exception};
use panic_halt as _;

use hal::{
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use cubebot::config::{ARM_CALIBRATION_SAMPLES, ARM_POT_CHANNEL, JOYSTICK_BAUD, LOG_BAUD};
use cubebot::control::OpControl;
use cubebot::drivers::{JoystickLink, LightStrip, Potentiometer};
use cubebot::hw::{self, Adc, BoardPins, BusyWait, DataLine, Millis, MotorBank, SerialRx, Usart};

#[exception]
fn SysTick() {
    hw::timebase::tick();
}

#[interrupt]
fn USART2() {
    hw::usart::on_receiver_interrupt();
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();
    let sysclk_hz = clocks.sysclk().raw();

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD, dp.GPIOE);

    // USART1 (DBG)
    let debug_cfg = Config {
        baud_rate: LOG_BAUD.bps(),
        ..Default::default()
    };
    let debug = Serial::new(dp.USART1, (pins.debug.tx, pins.debug.rx), &clocks, debug_cfg);
    hw::init_logger(Usart::new(debug), log::LevelFilter::Info);
    log::info!("cubebot boot, sysclk {} Hz", sysclk_hz);

    let clock = Millis::start(cp.SYST, sysclk_hz);

    // Outputs to neutral before anything else can command them
    let motors = MotorBank::new(
        dp.TIM3,
        dp.TIM4,
        dp.TIM5,
        pins.motors,
        clocks.timclk1().raw(),
    );

    // Arm rests on its hard stop at power-up
    let _arm_pot = pins.arm_pot;
    let mut pot = Potentiometer::new(Adc::adc1(dp.ADC1).channel(ARM_POT_CHANNEL));
    pot.calibrate(ARM_CALIBRATION_SAMPLES);

    // USART2 (joystick receiver)
    let link_cfg = Config {
        baud_rate: JOYSTICK_BAUD.bps(),
        ..Default::default()
    };
    let receiver = Serial::new(
        dp.USART2,
        (pins.receiver.tx, pins.receiver.rx),
        &clocks,
        link_cfg,
    );
    let link = JoystickLink::new(SerialRx::start(receiver), clock);

    let light = LightStrip::new(DataLine::active_high(pins.light), BusyWait::new(sysclk_hz));

    OpControl::new(link, motors, pot, clock, light).run()
}
