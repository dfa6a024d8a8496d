// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Receive buffer between a UART interrupt and the control loop.
//!
//! The USART holds one received byte at a time, so it has to be emptied as each byte lands, not
//! once per control cycle. The receive interrupt calls [`RxBuffer::service`] to move whatever the
//! data register holds into a bounded queue; the joystick link later drains the queue through
//! [`ByteSource`].

use heapless::Deque;

use crate::io::ByteSource;

pub struct RxBuffer<const N: usize> {
    queue: Deque<u8, N>,
    dropped: u32,
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxBuffer<N> {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Move every byte `uart` currently has into the queue. Returns how many were read.
    ///
    /// When the queue is full new bytes are discarded; the frame parser resynchronises on the
    /// next start byte.
    pub fn service<S: ByteSource>(&mut self, uart: &mut S) -> usize {
        let mut read = 0;
        while let Some(byte) = uart.read_byte() {
            read += 1;
            if self.queue.push_back(byte).is_err() {
                self.dropped = self.dropped.wrapping_add(1);
            }
        }
        read
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Bytes discarded because the queue was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> ByteSource for RxBuffer<N> {
    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        self.queue.pop_front()
    }
}
