//! Serial Subsystem
//!
//! Turns the modem UART byte stream into response lines.

pub mod line_buffer;

pub use line_buffer::LineBuffer;
