// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Joystick input over the serial receiver link.
//!
//! Each sample drains whatever the UART has buffered, keeps the newest valid frame, and falls
//! back to a neutral joystick if the link has gone quiet for longer than the timeout.

use crate::config::LINK_TIMEOUT_MS;
use crate::io::{ByteSource, Clock, InputSampler, JoystickState};
use crate::protocol::{Message, Parser};

/// Upper bound on bytes consumed per sample, keeps one cycle's input work bounded.
const MAX_BYTES_PER_SAMPLE: usize = 64;

pub struct JoystickLink<B, C> {
    rx: B,
    clock: C,
    parser: Parser,
    latest: JoystickState,
    last_frame_ms: Option<u32>,
    timeout_ms: u32,
    stale: bool,
}

impl<B: ByteSource, C: Clock> JoystickLink<B, C> {
    pub fn new(rx: B, clock: C) -> Self {
        Self::with_timeout(rx, clock, LINK_TIMEOUT_MS)
    }

    pub fn with_timeout(rx: B, clock: C, timeout_ms: u32) -> Self {
        Self {
            rx,
            clock,
            parser: Parser::new(),
            latest: JoystickState::NEUTRAL,
            last_frame_ms: None,
            timeout_ms,
            stale: true,
        }
    }

    /// Whether the last sample fell back to neutral.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn drain(&mut self) {
        for _ in 0..MAX_BYTES_PER_SAMPLE {
            let Some(byte) = self.rx.read_byte() else {
                break;
            };
            match self.parser.push(byte) {
                Ok(Some(Message::Joystick(js))) => {
                    self.latest = js;
                    self.last_frame_ms = Some(self.clock.now_ms());
                }
                Ok(None) => {}
                Err(e) => log::warn!("joystick link: dropped frame ({:?})", e),
            }
        }
    }
}

impl<B: ByteSource, C: Clock> InputSampler for JoystickLink<B, C> {
    fn sample(&mut self) -> JoystickState {
        self.drain();

        let now = self.clock.now_ms();
        let fresh = self
            .last_frame_ms
            .is_some_and(|at| now.wrapping_sub(at) <= self.timeout_ms);

        if fresh {
            if self.stale {
                log::info!("joystick link up");
            }
            self.stale = false;
            self.latest
        } else {
            if !self.stale {
                log::warn!("joystick link lost, holding neutral");
            }
            self.stale = true;
            JoystickState::NEUTRAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CYCLE_PERIOD_MS;
    use crate::io::{Axis, Button};
    use crate::testing::{ManualClock, QueuedBytes, SharedRxBuffer, SingleByteUart};

    fn frame(forward: i8) -> [u8; 9] {
        Message::Joystick(
            JoystickState::NEUTRAL
                .with_axis(Axis::Ch3, forward)
                .with_button(Button::Group6Up),
        )
        .encode()
    }

    #[test]
    fn neutral_until_first_frame() {
        let clock = ManualClock::starting_at(0);
        let rx = QueuedBytes::default();
        let mut link = JoystickLink::new(rx.clone(), clock.clone());

        assert_eq!(link.sample(), JoystickState::NEUTRAL);
        assert!(link.is_stale());

        rx.push(&frame(90));
        let js = link.sample();
        assert_eq!(js.axis(Axis::Ch3), 90);
        assert!(js.pressed(Button::Group6Up));
        assert!(!link.is_stale());
    }

    #[test]
    fn keeps_newest_frame() {
        let clock = ManualClock::starting_at(0);
        let rx = QueuedBytes::default();
        let mut link = JoystickLink::new(rx.clone(), clock.clone());

        rx.push(&frame(10));
        rx.push(&frame(-40));
        assert_eq!(link.sample().axis(Axis::Ch3), -40);

        // No new bytes: the last frame holds until the timeout.
        clock.advance(LINK_TIMEOUT_MS);
        assert_eq!(link.sample().axis(Axis::Ch3), -40);
    }

    #[test]
    fn falls_back_to_neutral_when_link_goes_quiet() {
        let clock = ManualClock::starting_at(500);
        let rx = QueuedBytes::default();
        let mut link = JoystickLink::with_timeout(rx.clone(), clock.clone(), 100);

        rx.push(&frame(127));
        assert_eq!(link.sample().axis(Axis::Ch3), 127);

        clock.advance(101);
        assert_eq!(link.sample(), JoystickState::NEUTRAL);
        assert!(link.is_stale());

        rx.push(&frame(50));
        assert_eq!(link.sample().axis(Axis::Ch3), 50);
    }

    #[test]
    fn corrupt_frame_is_ignored() {
        let clock = ManualClock::starting_at(0);
        let rx = QueuedBytes::default();
        let mut link = JoystickLink::new(rx.clone(), clock.clone());

        rx.push(&frame(70));
        link.sample();

        let mut bad = frame(-127);
        bad[8] ^= 0xFF;
        rx.push(&bad);
        assert_eq!(link.sample().axis(Axis::Ch3), 70);
    }

    #[test]
    fn interrupt_fed_buffer_delivers_every_frame() {
        let clock = ManualClock::starting_at(0);
        let uart = SingleByteUart::default();
        let buffer = SharedRxBuffer::default();
        let mut link = JoystickLink::new(buffer.clone(), clock.clone());

        for cycle in 0..50i32 {
            let forward = (cycle * 5 - 120) as i8;
            // The sender finishes a frame between two samples; the receive interrupt runs
            // after every byte.
            for &byte in &frame(forward) {
                uart.receive(byte);
                buffer.0.borrow_mut().service(&mut uart.clone());
            }
            clock.advance(CYCLE_PERIOD_MS);

            assert_eq!(link.sample().axis(Axis::Ch3), forward as i32, "cycle {}", cycle);
            assert!(!link.is_stale());
        }
        assert_eq!(uart.overruns(), 0);
        assert_eq!(buffer.0.borrow().dropped(), 0);
    }

    #[test]
    fn polling_the_data_register_once_per_cycle_never_completes_a_frame() {
        let clock = ManualClock::starting_at(0);
        let uart = SingleByteUart::default();
        let mut link = JoystickLink::new(uart.clone(), clock.clone());

        for _ in 0..50 {
            for &byte in &frame(90) {
                uart.receive(byte);
            }
            clock.advance(CYCLE_PERIOD_MS);
            assert_eq!(link.sample(), JoystickState::NEUTRAL);
        }
        assert!(link.is_stale());
        assert!(uart.overruns() > 0);
    }
}
