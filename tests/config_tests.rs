//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use nbiot_ril::config::*;

// =============================================================================
// UART Configuration Tests
// =============================================================================

#[test]
fn modem_baud_rate_supported() {
    // BC66 main UART auto-bauds among these
    assert!([9_600, 19_200, 38_400, 57_600, 115_200].contains(&MODEM_BAUD_RATE));
}

#[test]
fn rx_ring_holds_a_full_line() {
    assert!(UART_RX_BUFFER_SIZE >= LINE_BUFFER_SIZE);
}

#[test]
fn tx_ring_holds_a_full_command() {
    assert!(UART_TX_BUFFER_SIZE >= MAX_COMMAND_LEN);
}

// =============================================================================
// Buffer Capacity Tests
// =============================================================================

#[test]
fn field_fits_in_line() {
    assert!(MAX_FIELD_LEN < LINE_BUFFER_SIZE);
}

#[test]
fn imei_fits_in_field() {
    assert_eq!(IMEI_LEN, 15);
    assert!(IMEI_LEN < MAX_FIELD_LEN);
}

#[test]
fn firmware_version_fits_in_field() {
    assert!(FIRMWARE_VERSION_LEN <= MAX_FIELD_LEN);
}

#[test]
fn terminator_is_crlf() {
    assert_eq!(COMMAND_TERMINATOR, "\r\n");
}

// =============================================================================
// Timing Tests
// =============================================================================

#[test]
fn battery_timeout_not_shorter_than_default() {
    assert!(BATTERY_AT_TIMEOUT_MS >= DEFAULT_AT_TIMEOUT_MS);
}

#[test]
fn pwrkey_pulse_long_enough() {
    // BC66 needs PWRKEY held low for at least 500 ms
    assert!(PWRKEY_PULSE_MS >= 500);
}

#[test]
fn command_values() {
    assert_eq!(PSM_EVENT, 1);
    assert_eq!(MAX_RAI, 2);
    assert!(URC_QUEUE_DEPTH > 0);
}

// =============================================================================
// Pin Assignment Tests
// =============================================================================

#[test]
fn modem_uart_pins_distinct() {
    assert_ne!(pins::MODEM_TX, pins::MODEM_RX);
    assert_ne!(pins::MODEM_PWRKEY, pins::MODEM_TX);
    assert_ne!(pins::MODEM_PWRKEY, pins::MODEM_RX);
}
