// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! [`Usart`] is the transmit half used for the debug terminal, and [`UsartLogger`] routes the
//! `log` macros to it. [`SerialRx`] is the interrupt-fed receiver used by the joystick link;
//! the binary forwards its `USART2` handler to [`on_receiver_interrupt`].
//!
//! To access the terminal on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::cell::RefCell;
use core::fmt::{self, Write as _};

use cortex_m::interrupt::{self, Mutex};
use log::{LevelFilter, Log, Metadata, Record};
use nb::block;
use stm32f7xx_hal::{
    pac,
    prelude::*,
    serial::{Event, Instance, Pins, Rx, Serial, Tx},
};

use crate::config::RX_BUFFER_LEN;
use crate::drivers::RxBuffer;
use crate::io::ByteSource;

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

/// Raw receive half: reads the data register if a byte is waiting.
pub struct UsartRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> ByteSource for UsartRx<U> {
    fn read_byte(&mut self) -> Option<u8> {
        match self.rx.read() {
            Ok(b) => Some(b),
            Err(nb::Error::WouldBlock) => None,
            // Overrun/framing: the byte is lost, the parser resynchronises on the next start byte.
            Err(nb::Error::Other(_)) => None,
        }
    }
}

static RECEIVER: Mutex<RefCell<Option<UsartRx<pac::USART2>>>> = Mutex::new(RefCell::new(None));
static RX_BUFFER: Mutex<RefCell<RxBuffer<RX_BUFFER_LEN>>> = Mutex::new(RefCell::new(RxBuffer::new()));

/// Interrupt-fed receiver on USART2. Reads pop from the buffer the RXNE interrupt fills.
pub struct SerialRx {
    _private: (),
}

impl SerialRx {
    /// Hand USART2 to the receive interrupt and unmask it.
    pub fn start<PINS: Pins<pac::USART2>>(mut serial: Serial<pac::USART2, PINS>) -> Self {
        serial.listen(Event::Rxne);
        let (_tx, rx) = serial.split();

        interrupt::free(|cs| {
            RECEIVER.borrow(cs).replace(Some(UsartRx { rx }));
        });
        unsafe { pac::NVIC::unmask(pac::Interrupt::USART2) };

        Self { _private: () }
    }
}

impl ByteSource for SerialRx {
    fn read_byte(&mut self) -> Option<u8> {
        interrupt::free(|cs| RX_BUFFER.borrow(cs).borrow_mut().read_byte())
    }
}

/// Body of the USART2 interrupt: move the received byte into the buffer.
pub fn on_receiver_interrupt() {
    interrupt::free(|cs| {
        if let Some(rx) = RECEIVER.borrow(cs).borrow_mut().as_mut() {
            RX_BUFFER.borrow(cs).borrow_mut().service(rx);
        }
    });
}

/// `log` backend writing one line per record to the debug USART.
pub struct UsartLogger {
    usart: Mutex<RefCell<Option<Usart<pac::USART1>>>>,
}

impl Log for UsartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // The port is borrowed out so the write runs with interrupts enabled and the receiver
        // keeps up. A record logged while another is being written is dropped.
        let Some(mut usart) = self.take() else {
            return;
        };
        let _ = write!(usart, "[{}] {}\r\n", record.level(), record.args());
        self.put_back(usart);
    }

    fn flush(&self) {
        if let Some(mut usart) = self.take() {
            usart.flush();
            self.put_back(usart);
        }
    }
}

impl UsartLogger {
    fn take(&self) -> Option<Usart<pac::USART1>> {
        interrupt::free(|cs| self.usart.borrow(cs).borrow_mut().take())
    }

    fn put_back(&self, usart: Usart<pac::USART1>) {
        interrupt::free(|cs| {
            self.usart.borrow(cs).replace(Some(usart));
        });
    }
}

static LOGGER: UsartLogger = UsartLogger {
    usart: Mutex::new(RefCell::new(None)),
};

/// Hand the debug USART to the logger and install it. A second call only swaps the port.
pub fn init_logger(usart: Usart<pac::USART1>, level: LevelFilter) {
    interrupt::free(|cs| {
        LOGGER.usart.borrow(cs).replace(Some(usart));
    });
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
