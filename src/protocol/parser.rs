// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Message parser for the joystick link.
//!
//! Bytes arrive one at a time from the receiver's UART. The parser hunts for `START_BYTE`,
//! collects a frame, and hands back a decoded [`Message`] once the checksum matches.

use crate::protocol::messages::*;

enum State {
    WaitStart,
    WaitId,
    Payload { id: u8 },
    WaitChecksum { id: u8 },
}

pub struct Parser {
    state: State,
    checksum: u8,
    payload: [u8; JOYSTICK_PAYLOAD_LEN],
    len: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            state: State::WaitStart,
            checksum: 0,
            payload: [0; JOYSTICK_PAYLOAD_LEN],
            len: 0,
        }
    }

    /// Process a single incoming byte. Returns `Ok(Some(Message))` once a complete, valid frame
    /// has been received.
    pub fn push(&mut self, byte: u8) -> Result<Option<Message>, Error> {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.state = State::WaitId;
                    self.checksum = 0;
                    self.len = 0;
                }
            }
            State::WaitId => {
                self.checksum = self.checksum.wrapping_add(byte);

                match byte {
                    MSG_JOYSTICK => {
                        self.state = State::Payload { id: byte };
                    }
                    _ => {
                        // Unknown message ID, reset state
                        self.state = State::WaitStart;
                        return Err(Error::UnknownId(byte));
                    }
                }
            }
            State::Payload { id } => {
                self.checksum = self.checksum.wrapping_add(byte);
                self.payload[self.len] = byte;
                self.len += 1;

                if self.len == JOYSTICK_PAYLOAD_LEN {
                    self.state = State::WaitChecksum { id };
                }
            }
            State::WaitChecksum { id } => {
                self.state = State::WaitStart; // Reset for next message

                if byte != self.checksum {
                    return Err(Error::Checksum {
                        expected: self.checksum,
                        received: byte,
                    });
                }
                return Message::from_payload(id, &self.payload[..self.len]).map(Some);
            }
        }
        Ok(None)
    }
}
