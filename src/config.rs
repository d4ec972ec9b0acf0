//! System configuration and modem constants
//!
//! This module defines compile-time constants for the NB-IoT node.
//! UART wiring, buffer capacities and AT command timeouts are centralized here.

/// System clock frequency (STM32G474 @ 170MHz)
pub const SYSTEM_CLOCK_HZ: u32 = 170_000_000;

/// Modem UART baud rate (BC66 main port default)
pub const MODEM_BAUD_RATE: u32 = 115_200;

/// UART transmit ring size in bytes
pub const UART_TX_BUFFER_SIZE: usize = 128;

/// UART receive ring size in bytes
pub const UART_RX_BUFFER_SIZE: usize = 512;

/// Longest response line the line buffer accumulates
pub const LINE_BUFFER_SIZE: usize = 256;

/// Longest command line, including the terminator
pub const MAX_COMMAND_LEN: usize = 64;

/// Largest field the RIL wrappers extract from a data line
pub const MAX_FIELD_LEN: usize = 64;

/// Command line terminator
pub const COMMAND_TERMINATOR: &str = "\r\n";

/// Default time to wait for a final result code, in milliseconds
pub const DEFAULT_AT_TIMEOUT_MS: u32 = 3_000;

/// `AT+CBC` can take a fresh ADC sample, allow a little longer
pub const BATTERY_AT_TIMEOUT_MS: u32 = 5_000;

/// Number of digits in an IMEI
pub const IMEI_LEN: usize = 15;

/// Capacity of the firmware revision string
pub const FIRMWARE_VERSION_LEN: usize = 32;

/// Event code accepted by `AT+QNBIOTEVENT` (PSM enter/exit reporting)
pub const PSM_EVENT: u32 = 1;

/// Highest release assistance indication value accepted by `AT+QNBIOTRAI`
pub const MAX_RAI: u8 = 2;

/// Depth of the URC queue between the modem task and the application
pub const URC_QUEUE_DEPTH: usize = 4;

/// PWRKEY low pulse that switches the modem on, in milliseconds
pub const PWRKEY_PULSE_MS: u64 = 600;

/// Time the modem needs after PWRKEY before it accepts AT commands
pub const MODEM_BOOT_MS: u64 = 3_000;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// USART1 TX to modem RXD
    pub const MODEM_TX: &str = "PA9";

    /// USART1 RX from modem TXD
    pub const MODEM_RX: &str = "PA10";

    /// Modem PWRKEY (through an NPN, so active high here)
    pub const MODEM_PWRKEY: &str = "PB0";
}
