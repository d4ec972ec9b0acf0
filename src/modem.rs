//! UART modem dispatcher
//!
//! Drives one AT exchange at a time over an async UART. Lines that turn out
//! to be URCs are forwarded to a channel for the application task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{with_timeout, Duration, Instant};
use embedded_io_async::{Read, Write};

use crate::config::{LINE_BUFFER_SIZE, URC_QUEUE_DEPTH};
use crate::error::{RilError, RilResult};
use crate::protocol::command::AtCommand;
use crate::protocol::urc::Urc;
use crate::ril::{AtDispatcher, Exchange};
use crate::serial::LineBuffer;

/// URC queue sender handed to the modem
pub type UrcSender<'ch> = Sender<'ch, CriticalSectionRawMutex, Urc, URC_QUEUE_DEPTH>;

/// Read chunk size
const READ_CHUNK: usize = 32;

fn forward(urcs: &UrcSender<'_>, urc: Urc) {
    if urcs.try_send(urc).is_err() {
        defmt::warn!("URC queue full, dropped {}", urc);
    }
}

/// AT dispatcher over an `embedded-io-async` UART
pub struct UartModem<'ch, U> {
    uart: U,
    lines: LineBuffer<LINE_BUFFER_SIZE>,
    urcs: UrcSender<'ch>,
}

impl<'ch, U: Read + Write> UartModem<'ch, U> {
    /// Create a modem dispatcher
    #[must_use]
    pub fn new(uart: U, urcs: UrcSender<'ch>) -> Self {
        Self {
            uart,
            lines: LineBuffer::new(),
            urcs,
        }
    }

    /// Overlong lines dropped since start-up
    #[must_use]
    pub const fn overflows(&self) -> u32 {
        self.lines.overflows()
    }

    /// Read until at least one byte arrives or `deadline` passes
    async fn fill(&mut self, chunk: &mut [u8], deadline: Instant) -> RilResult<usize> {
        let remaining = deadline
            .checked_duration_since(Instant::now())
            .ok_or(RilError::Timeout)?;
        match with_timeout(remaining, self.uart.read(chunk)).await {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(_)) => Err(RilError::Transport),
            Err(_) => Err(RilError::Timeout),
        }
    }
}

impl<U: Read + Write> AtDispatcher for UartModem<'_, U> {
    async fn dispatch(
        &mut self,
        command: &AtCommand,
        exchange: &mut Exchange<'_>,
        timeout_ms: u32,
    ) -> RilResult<()> {
        // Anything still buffered predates this command
        let urcs = &self.urcs;
        self.lines.flush_urcs(|urc| forward(urcs, urc));

        self.uart
            .write_all(command.as_bytes())
            .await
            .map_err(|_| RilError::Transport)?;
        self.uart.flush().await.map_err(|_| RilError::Transport)?;

        let deadline = Instant::now() + Duration::from_millis(u64::from(timeout_ms));
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            let n = self.fill(&mut chunk, deadline).await?;
            let mut rest = &chunk[..n];
            loop {
                let taken = self.lines.push(rest);
                rest = &rest[taken..];

                let urcs = &self.urcs;
                let classification = self.lines.pump(exchange, |urc| forward(urcs, urc));
                if classification.is_terminal() {
                    // Later bytes wait for the next command's URC flush
                    self.lines.push(rest);
                    defmt::debug!("AT <- {} ({})", classification, command);
                    return Ok(());
                }
                if rest.is_empty() {
                    break;
                }
            }
        }
    }
}
