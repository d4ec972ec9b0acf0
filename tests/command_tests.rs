//! AT Command Formatting Tests
//!
//! Tests for the command lines the RIL sends to the modem.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test command_tests

use nbiot_ril::config::MAX_COMMAND_LEN;
use nbiot_ril::protocol::AtCommand;
use nbiot_ril::types::{ModemEvent, Rai};

#[test]
fn firmware_version_command() {
    assert_eq!(AtCommand::firmware_version().as_str(), "AT+CGMR\r\n");
}

#[test]
fn imei_command() {
    assert_eq!(AtCommand::imei().as_str(), "AT+CGSN=1\r\n");
}

#[test]
fn battery_command() {
    assert_eq!(AtCommand::battery().as_str(), "AT+CBC\r\n");
}

#[test]
fn registration_command() {
    assert_eq!(AtCommand::registration().as_str(), "AT+CEREG?\r\n");
}

#[test]
fn rai_commands() {
    assert_eq!(AtCommand::rai(Rai::None).as_str(), "AT+QNBIOTRAI=0\r\n");
    assert_eq!(AtCommand::rai(Rai::NoFurtherData).as_str(), "AT+QNBIOTRAI=1\r\n");
    assert_eq!(AtCommand::rai(Rai::SingleDownlink).as_str(), "AT+QNBIOTRAI=2\r\n");
}

#[test]
fn psm_event_reporting_commands() {
    assert_eq!(
        AtCommand::event_reporting(ModemEvent::Psm, true).as_str(),
        "AT+QNBIOTEVENT=1,1\r\n"
    );
    assert_eq!(
        AtCommand::event_reporting(ModemEvent::Psm, false).as_str(),
        "AT+QNBIOTEVENT=0,1\r\n"
    );
}

#[test]
fn raw_command_and_body() {
    let cmd = AtCommand::raw("AT+CSQ").expect("fits");
    assert_eq!(cmd.as_bytes(), b"AT+CSQ\r\n");
    assert_eq!(cmd.body(), "AT+CSQ");
}

#[test]
fn raw_command_too_long() {
    let body = "A".repeat(MAX_COMMAND_LEN - 1);
    assert!(AtCommand::raw(&body).is_none());

    let body = "A".repeat(MAX_COMMAND_LEN - 2);
    assert_eq!(AtCommand::raw(&body).expect("fits").as_str().len(), MAX_COMMAND_LEN);
}
