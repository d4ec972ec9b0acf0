//! RIL Wrapper Tests
//!
//! Tests for the typed AT command wrappers against a scripted modem.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test ril_tests

use embassy_futures::block_on;

use nbiot_ril::config::{BATTERY_AT_TIMEOUT_MS, DEFAULT_AT_TIMEOUT_MS, PSM_EVENT};
use nbiot_ril::error::{RilError, RilResult};
use nbiot_ril::protocol::response::{FailureCause, ResponseKind};
use nbiot_ril::protocol::urc::{PsmTransition, Urc};
use nbiot_ril::protocol::AtCommand;
use nbiot_ril::ril::{AtDispatcher, Exchange, Ril};
use nbiot_ril::serial::LineBuffer;
use nbiot_ril::types::{ChargeState, RegistrationStatus};

/// Modem that answers every command with the next scripted reply
#[derive(Default)]
struct ScriptedModem {
    replies: Vec<&'static [u8]>,
    sent: Vec<String>,
    timeouts: Vec<u32>,
    urcs: Vec<Urc>,
    fail_transport: bool,
}

impl ScriptedModem {
    fn replying(replies: &[&'static [u8]]) -> Self {
        Self {
            replies: replies.iter().rev().copied().collect(),
            ..Self::default()
        }
    }
}

impl AtDispatcher for ScriptedModem {
    async fn dispatch(
        &mut self,
        command: &AtCommand,
        exchange: &mut Exchange<'_>,
        timeout_ms: u32,
    ) -> RilResult<()> {
        self.sent.push(command.as_str().to_owned());
        self.timeouts.push(timeout_ms);
        if self.fail_transport {
            return Err(RilError::Transport);
        }

        let mut lines = LineBuffer::<256>::new();
        if let Some(reply) = self.replies.pop() {
            // Deliver in small chunks, as a UART would
            for chunk in reply.chunks(5) {
                lines.push(chunk);
                let urcs = &mut self.urcs;
                if lines.pump(exchange, |urc| urcs.push(urc)).is_terminal() {
                    return Ok(());
                }
            }
        }
        Err(RilError::Timeout)
    }
}

fn ril(replies: &[&'static [u8]]) -> Ril<ScriptedModem> {
    Ril::new(ScriptedModem::replying(replies))
}

// =============================================================================
// Identity Queries
// =============================================================================

#[test]
fn imei_query() {
    let mut ril = ril(&[b"\r\n+CGSN: 359999999999999\r\n\r\nOK\r\n"]);
    let imei = block_on(ril.imei()).expect("imei");
    assert_eq!(imei.as_str(), "359999999999999");

    let modem = ril.into_inner();
    assert_eq!(modem.sent, vec!["AT+CGSN=1\r\n"]);
    assert_eq!(modem.timeouts, vec![DEFAULT_AT_TIMEOUT_MS]);
}

#[test]
fn imei_without_space_after_colon() {
    let mut ril = ril(&[b"+CGSN:359999999999999\r\nOK\r\n"]);
    assert_eq!(
        block_on(ril.imei()).expect("imei").as_str(),
        "359999999999999"
    );
}

#[test]
fn imei_with_wrong_length_is_malformed() {
    let mut ril = ril(&[b"+CGSN: 12345\r\nOK\r\n"]);
    assert_eq!(block_on(ril.imei()), Err(RilError::Malformed));
}

#[test]
fn imei_missing_data_line_is_malformed() {
    let mut ril = ril(&[b"\r\nOK\r\n"]);
    assert_eq!(block_on(ril.imei()), Err(RilError::Malformed));
}

#[test]
fn imei_cme_error() {
    let mut ril = ril(&[b"\r\n+CME ERROR: 10\r\n"]);
    assert_eq!(
        block_on(ril.imei()),
        Err(RilError::Protocol(FailureCause::Cme(Some(10))))
    );
}

#[test]
fn firmware_version_query() {
    let mut ril = ril(&[b"\r\nRevision: BC66NBR01A10\r\n\r\nOK\r\n"]);
    let version = block_on(ril.firmware_version()).expect("version");
    assert_eq!(version.as_str(), "BC66NBR01A10");
    assert_eq!(ril.into_inner().sent, vec!["AT+CGMR\r\n"]);
}

#[test]
fn firmware_version_error() {
    let mut ril = ril(&[b"\r\nERROR\r\n"]);
    assert_eq!(
        block_on(ril.firmware_version()),
        Err(RilError::Protocol(FailureCause::Error))
    );
}

// =============================================================================
// Battery And Registration
// =============================================================================

#[test]
fn battery_query() {
    let mut ril = ril(&[b"\r\n+CBC: 1,85,3800\r\n\r\nOK\r\n"]);
    let battery = block_on(ril.battery()).expect("battery");
    assert_eq!(battery.charge, ChargeState::Charging);
    assert_eq!(battery.level_percent, 85);
    assert_eq!(battery.voltage_mv, 3800);

    let modem = ril.into_inner();
    assert_eq!(modem.sent, vec!["AT+CBC\r\n"]);
    assert_eq!(modem.timeouts, vec![BATTERY_AT_TIMEOUT_MS]);
}

#[test]
fn battery_garbage_payload() {
    let mut ril = ril(&[b"+CBC: x\r\nOK\r\n"]);
    assert_eq!(block_on(ril.battery()), Err(RilError::Malformed));
}

#[test]
fn registration_query() {
    let mut ril = ril(&[b"\r\n+CEREG: 0,5\r\n\r\nOK\r\n"]);
    assert_eq!(
        block_on(ril.registration()),
        Ok(RegistrationStatus::Roaming)
    );
}

#[test]
fn registration_query_with_interleaved_urc() {
    let mut ril = ril(&[b"\r\n+CEREG: 0,1\r\n+CEREG: 5,\"1A2B\",\"01A2D101\",9\r\n\r\nOK\r\n"]);
    assert_eq!(block_on(ril.registration()), Ok(RegistrationStatus::Home));
    assert_eq!(
        ril.dispatcher_mut().urcs,
        vec![Urc::Registration(RegistrationStatus::Roaming)]
    );
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn set_rai_valid_values() {
    for rai in 0..=2u8 {
        let mut ril = ril(&[b"\r\nOK\r\n"]);
        assert_eq!(block_on(ril.set_rai(rai)), Ok(()));
        assert_eq!(
            ril.into_inner().sent,
            vec![format!("AT+QNBIOTRAI={rai}\r\n")]
        );
    }
}

#[test]
fn set_rai_rejects_out_of_range_without_sending() {
    let mut ril = ril(&[]);
    assert_eq!(block_on(ril.set_rai(3)), Err(RilError::InvalidArgument));
    assert!(ril.into_inner().sent.is_empty());
}

#[test]
fn psm_event_enable_disable() {
    let mut ril = ril(&[b"OK\r\n", b"OK\r\n"]);
    assert_eq!(block_on(ril.enable_event(PSM_EVENT)), Ok(()));
    assert_eq!(block_on(ril.disable_event(PSM_EVENT)), Ok(()));
    assert_eq!(
        ril.into_inner().sent,
        vec!["AT+QNBIOTEVENT=1,1\r\n", "AT+QNBIOTEVENT=0,1\r\n"]
    );
}

#[test]
fn unknown_event_rejected() {
    let mut ril = ril(&[]);
    assert_eq!(block_on(ril.enable_event(7)), Err(RilError::InvalidArgument));
    assert_eq!(block_on(ril.disable_event(0)), Err(RilError::InvalidArgument));
    assert!(ril.into_inner().sent.is_empty());
}

#[test]
fn cms_error_surfaces_as_protocol_failure() {
    let mut ril = ril(&[b"+CMS ERROR: 302\r\n"]);
    assert_eq!(
        block_on(ril.set_rai(1)),
        Err(RilError::Protocol(FailureCause::Cms(Some(302))))
    );
}

// =============================================================================
// Dispatcher Failures
// =============================================================================

#[test]
fn no_final_result_times_out() {
    let mut ril = ril(&[b"+CGSN: 359999999999999\r\n"]);
    assert_eq!(block_on(ril.imei()), Err(RilError::Timeout));
}

#[test]
fn transport_error_propagates() {
    let mut ril = Ril::new(ScriptedModem {
        fail_transport: true,
        ..ScriptedModem::default()
    });
    assert_eq!(block_on(ril.ping()), Err(RilError::Transport));
}

#[test]
fn custom_timeout_used() {
    let mut ril = ril(&[b"OK\r\n"]).with_timeout(250);
    assert_eq!(block_on(ril.ping()), Ok(()));
    assert_eq!(ril.into_inner().timeouts, vec![250]);
}

#[test]
fn urc_during_response_is_routed() {
    let mut ril = ril(&[b"+QNBIOTEVENT: \"EXIT PSM\"\r\n+CGSN: 359999999999999\r\nOK\r\n"]);
    assert!(block_on(ril.imei()).is_ok());
    assert_eq!(
        ril.dispatcher_mut().urcs,
        vec![Urc::Psm(PsmTransition::Exit)]
    );
}

// =============================================================================
// Exchange
// =============================================================================

#[test]
fn execute_with_caller_exchange() {
    let mut ril = ril(&[b"+CGSN: 359999999999999\r\nOK\r\n"]);
    let mut out = [0u8; 20];
    let mut exchange = Exchange::with_output(ResponseKind::Imei, &mut out);
    let cmd = AtCommand::imei();
    assert_eq!(block_on(ril.execute(&cmd, &mut exchange)), Ok(()));
    assert_eq!(exchange.finish(), Ok(Some(&b"359999999999999"[..])));
}

#[test]
fn exchange_ignores_lines_after_completion() {
    let mut exchange = Exchange::new(ResponseKind::Generic);
    exchange.feed(b"OK\r\n");
    exchange.feed(b"ERROR\r\n");
    assert_eq!(exchange.finish(), Ok(None));
}

#[test]
fn exchange_unfinished_is_timeout() {
    let exchange = Exchange::new(ResponseKind::Generic);
    assert_eq!(exchange.finish(), Err(RilError::Timeout));
}

#[test]
fn exchange_malformed_data_line() {
    let mut out = [0u8; 20];
    let mut exchange = Exchange::with_output(ResponseKind::Imei, &mut out);
    exchange.feed(b"+CGSN: 359999999999999");
    exchange.feed(b"OK\r\n");
    assert!(exchange.saw_malformed());
    assert_eq!(exchange.finish(), Err(RilError::Malformed));
}

#[test]
fn exchange_field_overflow() {
    let mut out = [0u8; 4];
    let mut exchange = Exchange::with_output(ResponseKind::Imei, &mut out);
    exchange.feed(b"+CGSN: 359999999999999\r\n");
    exchange.feed(b"OK\r\n");
    assert_eq!(exchange.finish(), Err(RilError::Overflow));
}
