//! Modem response line accumulation
//!
//! Bytes arrive from the UART in arbitrary chunks. Lines are cut at `\n`
//! and handed out with their terminator still attached, since data-line
//! extraction relies on the trailing `\r\n`.

use heapless::Vec;

use crate::protocol::response::Classification;
use crate::protocol::urc::{self, Urc};
use crate::ril::Exchange;

/// Fixed-capacity line accumulator
pub struct LineBuffer<const N: usize> {
    buffer: [u8; N],
    read_pos: usize,
    write_pos: usize,
    /// Dropping bytes until the next `\n` after an overlong line
    discarding: bool,
    overflows: u32,
}

impl<const N: usize> LineBuffer<N> {
    /// Create an empty line buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            read_pos: 0,
            write_pos: 0,
            discarding: false,
            overflows: 0,
        }
    }

    /// Push received bytes
    ///
    /// Returns the number of bytes consumed. Consumption stops early when the
    /// buffer is full but still holds a complete line; take lines with
    /// [`Self::next_line`] and push the rest again. A single line longer than
    /// the buffer is dropped whole and counted in [`Self::overflows`].
    pub fn push(&mut self, data: &[u8]) -> usize {
        for (taken, &byte) in data.iter().enumerate() {
            if self.discarding {
                self.discarding = byte != b'\n';
                continue;
            }
            if self.write_pos == N {
                self.compact();
            }
            if self.write_pos == N {
                if self.has_line() {
                    return taken;
                }
                // Full with one unterminated line
                self.clear();
                self.overflows = self.overflows.saturating_add(1);
                self.discarding = byte != b'\n';
                continue;
            }
            self.buffer[self.write_pos] = byte;
            self.write_pos += 1;
        }
        data.len()
    }

    fn has_line(&self) -> bool {
        self.buffer[self.read_pos..self.write_pos].contains(&b'\n')
    }

    /// Take the next non-blank line, terminator included
    pub fn next_line(&mut self) -> Option<Vec<u8, N>> {
        loop {
            let pending = &self.buffer[self.read_pos..self.write_pos];
            let newline = pending.iter().position(|&b| b == b'\n')?;
            let line = &pending[..=newline];
            let blank = line.iter().all(|&b| b == b'\r' || b == b'\n');

            let mut out = Vec::new();
            if !blank {
                let _ = out.extend_from_slice(line);
            }
            self.read_pos += newline + 1;

            if self.read_pos >= N / 2 {
                self.compact();
            }
            if !blank {
                return Some(out);
            }
        }
    }

    /// Feed every complete line to `exchange` until it reaches a final result
    ///
    /// URC lines go to `on_urc` instead. Lines after the final result code
    /// stay buffered.
    pub fn pump(&mut self, exchange: &mut Exchange<'_>, mut on_urc: impl FnMut(Urc)) -> Classification {
        while let Some(line) = self.next_line() {
            if let Some(urc) = urc::parse(&line) {
                on_urc(urc);
                continue;
            }
            let classification = exchange.feed(&line);
            if classification.is_terminal() {
                return classification;
            }
        }
        Classification::Continue
    }

    /// Hand buffered URCs to `on_urc` and drop everything else
    pub fn flush_urcs(&mut self, mut on_urc: impl FnMut(Urc)) {
        while let Some(line) = self.next_line() {
            if let Some(urc) = urc::parse(&line) {
                on_urc(urc);
            }
        }
        self.clear();
    }

    /// Compact the buffer
    fn compact(&mut self) {
        if self.read_pos > 0 {
            let remaining = self.write_pos - self.read_pos;
            self.buffer.copy_within(self.read_pos..self.write_pos, 0);
            self.read_pos = 0;
            self.write_pos = remaining;
        }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
        self.discarding = false;
    }

    /// Get buffered bytes not yet returned as lines
    #[must_use]
    pub const fn available(&self) -> usize {
        self.write_pos - self.read_pos
    }

    /// Number of overlong lines dropped so far
    #[must_use]
    pub const fn overflows(&self) -> u32 {
        self.overflows
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
