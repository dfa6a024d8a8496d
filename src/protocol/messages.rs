// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Joystick link message format.
//!
//! Frame layout:
//!
//! | Byte | Content |
//! | ---- | ------- |
//! | 0 | `START_BYTE` |
//! | 1 | message id |
//! | 2..=5 | axes ch1..ch4, two's complement |
//! | 6..=7 | button word, little endian |
//! | 8 | checksum: wrapping sum of bytes 1..=7 |

use crate::io::JoystickState;

/// Sync byte for the protocol.
pub const START_BYTE: u8 = 0xA5;

// Message IDs
pub const MSG_JOYSTICK: u8 = 0x10;

pub const JOYSTICK_PAYLOAD_LEN: usize = 6;
pub const JOYSTICK_FRAME_LEN: usize = JOYSTICK_PAYLOAD_LEN + 3;

/// Messages carried on the joystick link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Joystick(JoystickState),
}

impl Message {
    /// Decode a payload for a known message id.
    pub(crate) fn from_payload(id: u8, payload: &[u8]) -> Result<Self, Error> {
        match (id, payload) {
            (MSG_JOYSTICK, &[a1, a2, a3, a4, lo, hi]) => {
                let axes = [a1 as i8, a2 as i8, a3 as i8, a4 as i8];
                let buttons = u16::from_le_bytes([lo, hi]);
                Ok(Message::Joystick(JoystickState::new(axes, buttons)))
            }
            _ => Err(Error::UnknownId(id)),
        }
    }

    /// Full frame including sync byte and checksum.
    pub fn encode(&self) -> [u8; JOYSTICK_FRAME_LEN] {
        let Message::Joystick(js) = self;
        let [lo, hi] = js.buttons().to_le_bytes();

        let mut frame = [0u8; JOYSTICK_FRAME_LEN];
        frame[0] = START_BYTE;
        frame[1] = MSG_JOYSTICK;
        frame[2] = js.axis(crate::io::Axis::Ch1) as u8;
        frame[3] = js.axis(crate::io::Axis::Ch2) as u8;
        frame[4] = js.axis(crate::io::Axis::Ch3) as u8;
        frame[5] = js.axis(crate::io::Axis::Ch4) as u8;
        frame[6] = lo;
        frame[7] = hi;
        frame[8] = checksum(&frame[1..8]);
        frame
    }
}

/// Wrapping byte sum.
#[inline]
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Error type for link frames. Both cases drop the frame and resynchronise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Message id not recognised.
    UnknownId(u8),
    /// Checksum byte did not match the frame contents.
    Checksum { expected: u8, received: u8 },
}
