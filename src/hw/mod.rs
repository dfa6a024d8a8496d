// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board support: the STM32F777 implementations of the [`crate::io`] traits.

pub mod adc;
pub mod busy_wait;
pub mod line;
pub mod motor;
pub mod pins;
pub mod timebase;
pub mod usart;

pub use adc::{Adc, AdcChannel};
pub use busy_wait::BusyWait;
pub use line::DataLine;
pub use motor::MotorBank;
pub use pins::BoardPins;
pub use timebase::Millis;
pub use usart::{init_logger, SerialRx, Usart};
