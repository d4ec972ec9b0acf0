//! NB-IoT Modem Radio Interface Layer
//!
//! This library drives a Quectel BC66-class NB-IoT modem from an STM32G474
//! host over a UART, using AT commands. Its centre is a stateless response
//! classifier that decides, line by line, whether a command succeeded,
//! failed, or needs more lines, and extracts the command's data field.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  RIL wrappers (IMEI, CGMR, CBC, RAI, PSM events)  │  URCs    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PROTOCOL LAYER                           │
//! │  Command format  │  Response classifier  │  Field extractor  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  SERIAL / DISPATCH LAYER                     │
//! │  Line accumulation  │  UART dispatcher with deadline         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Pure classification**: no I/O, no allocation, no state between lines
//! - **Type-driven design**: IMEI, RAI and event codes validated on construction
//! - **No unsafe in application code**
//! - **Functional core, imperative shell**: only `modem` touches the UART
//! - **Explicit error handling**: All fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_sync;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Communication Protocols
///
/// AT command formatting, response classification, field extraction, URCs.
pub mod protocol;

/// Serial line accumulation
pub mod serial;

/// Radio Interface Layer
///
/// Typed AT command wrappers over a dispatcher.
pub mod ril;

/// UART dispatcher
///
/// embassy-based implementation of the RIL dispatcher.
#[cfg(feature = "embedded")]
pub mod modem;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::error::{RilError, RilResult};
    pub use crate::modem::{UartModem, UrcSender};
    pub use crate::protocol::Urc;
    pub use crate::ril::{AtDispatcher, Ril};
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
