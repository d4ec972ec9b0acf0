//! Radio Interface Layer
//!
//! Typed wrappers over the modem's AT commands. Each wrapper formats an
//! [`AtCommand`], hands it to an [`AtDispatcher`] together with an
//! [`Exchange`] describing which response it expects, and turns the
//! classified outcome into a [`RilResult`].
//!
//! The dispatcher owns the transport, the line splitting and the overall
//! timeout; the exchange owns classification and field capture.

use crate::config::{BATTERY_AT_TIMEOUT_MS, DEFAULT_AT_TIMEOUT_MS, MAX_FIELD_LEN};
use crate::error::{RilError, RilResult};
use crate::protocol::command::AtCommand;
use crate::protocol::field::parse_field;
use crate::protocol::response::{
    copy_terminated, parse_line, Classification, FailureCause, ResponseKind, ResponseLine,
};
use crate::types::{BatteryStatus, FirmwareVersion, Imei, ModemEvent, Rai, RegistrationStatus};

/// One command's response in progress
///
/// Lines are fed in arrival order. Once a final result code is seen the
/// exchange is complete and later lines are ignored.
#[derive(Debug)]
pub struct Exchange<'a> {
    kind: ResponseKind,
    out: Option<&'a mut [u8]>,
    captured: Option<usize>,
    failure: Option<FailureCause>,
    result: Option<Classification>,
    malformed: bool,
    overflow: bool,
}

impl<'a> Exchange<'a> {
    /// Expect a response of `kind` without capturing data
    #[must_use]
    pub fn new(kind: ResponseKind) -> Self {
        Self {
            kind,
            out: None,
            captured: None,
            failure: None,
            result: None,
            malformed: false,
            overflow: false,
        }
    }

    /// Expect a response of `kind`, capturing its data field into `out`
    #[must_use]
    pub fn with_output(kind: ResponseKind, out: &'a mut [u8]) -> Self {
        Self {
            out: Some(out),
            ..Self::new(kind)
        }
    }

    /// Response kind this exchange classifies against
    #[must_use]
    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    /// Feed one received line
    pub fn feed(&mut self, line: &[u8]) -> Classification {
        if let Some(done) = self.result {
            return done;
        }

        let parsed = parse_line(self.kind, line);
        match parsed {
            ResponseLine::Data(field) => {
                if let Some(out) = self.out.as_deref_mut() {
                    match copy_terminated(field, out) {
                        Some(len) => self.captured = Some(len),
                        None => self.overflow = true,
                    }
                }
            }
            ResponseLine::Malformed => self.malformed = true,
            ResponseLine::Error(cause) => self.failure = Some(cause),
            ResponseLine::Ok | ResponseLine::Other => {}
        }

        let classification = parsed.classification();
        if classification.is_terminal() {
            self.result = Some(classification);
        }
        classification
    }

    /// Whether a final result code has been seen
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// Final outcome, with the captured field when one was requested
    ///
    /// # Errors
    ///
    /// - [`RilError::Timeout`] if no final result code was seen
    /// - [`RilError::Protocol`] if the modem answered with an error
    /// - [`RilError::Overflow`] if the data field did not fit the buffer
    /// - [`RilError::Malformed`] if a requested field never arrived intact
    pub fn finish(&self) -> RilResult<Option<&[u8]>> {
        match self.result {
            None => Err(RilError::Timeout),
            Some(Classification::Failure) => Err(RilError::Protocol(
                self.failure.unwrap_or(FailureCause::Error),
            )),
            Some(_) => {
                let Some(out) = self.out.as_deref() else {
                    return Ok(None);
                };
                if self.kind.marker().is_none() {
                    return Ok(None);
                }
                if self.overflow {
                    return Err(RilError::Overflow);
                }
                match self.captured {
                    Some(len) => Ok(Some(&out[..len])),
                    None => Err(RilError::Malformed),
                }
            }
        }
    }

    /// Whether a marker line arrived without its delimiters
    #[must_use]
    pub fn saw_malformed(&self) -> bool {
        self.malformed
    }
}

/// "Send AT command, await classified response"
///
/// Implementations write `command`, feed each received line to `exchange`
/// until [`Exchange::is_complete`], and give up after `timeout_ms`.
#[allow(async_fn_in_trait)]
pub trait AtDispatcher {
    /// Run one command/response exchange
    ///
    /// # Errors
    ///
    /// [`RilError::Timeout`] when no final result code arrives in time,
    /// [`RilError::Transport`] when the UART fails.
    async fn dispatch(
        &mut self,
        command: &AtCommand,
        exchange: &mut Exchange<'_>,
        timeout_ms: u32,
    ) -> RilResult<()>;
}

/// Typed AT command wrappers over a dispatcher
pub struct Ril<D> {
    dispatcher: D,
    timeout_ms: u32,
}

impl<D: AtDispatcher> Ril<D> {
    /// Create a RIL over `dispatcher` with the default command timeout
    #[must_use]
    pub const fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            timeout_ms: DEFAULT_AT_TIMEOUT_MS,
        }
    }

    /// Override the default command timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Borrow the dispatcher
    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// Release the dispatcher
    pub fn into_inner(self) -> D {
        self.dispatcher
    }

    /// Run `command` with a caller-built exchange
    ///
    /// # Errors
    ///
    /// Any dispatcher error, or the exchange's own outcome (see
    /// [`Exchange::finish`]).
    pub async fn execute(
        &mut self,
        command: &AtCommand,
        exchange: &mut Exchange<'_>,
    ) -> RilResult<()> {
        self.transact(command, exchange, self.timeout_ms).await?;
        exchange.finish().map(|_| ())
    }

    async fn transact(
        &mut self,
        command: &AtCommand,
        exchange: &mut Exchange<'_>,
        timeout_ms: u32,
    ) -> RilResult<()> {
        #[cfg(feature = "embedded")]
        defmt::debug!("AT -> {}", command);

        let result = self.dispatcher.dispatch(command, exchange, timeout_ms).await;

        #[cfg(feature = "embedded")]
        {
            if let Err(e) = &result {
                defmt::warn!("AT {} failed: {}", command, e);
            }
        }
        result
    }

    async fn send(&mut self, command: AtCommand) -> RilResult<()> {
        let mut exchange = Exchange::new(ResponseKind::Generic);
        self.execute(&command, &mut exchange).await
    }

    async fn query_field<'b>(
        &mut self,
        command: AtCommand,
        kind: ResponseKind,
        timeout_ms: u32,
        buf: &'b mut [u8],
    ) -> RilResult<&'b str> {
        let len = {
            let mut exchange = Exchange::with_output(kind, &mut *buf);
            self.transact(&command, &mut exchange, timeout_ms).await?;
            exchange.finish()?.ok_or(RilError::Malformed)?.len()
        };
        core::str::from_utf8(&buf[..len]).map_err(|_| RilError::Malformed)
    }

    /// Modem firmware revision (`AT+CGMR`)
    ///
    /// # Errors
    ///
    /// [`RilError::Malformed`] if the revision line is missing or empty.
    pub async fn firmware_version(&mut self) -> RilResult<FirmwareVersion> {
        let mut buf = [0u8; MAX_FIELD_LEN + 1];
        let field = self
            .query_field(
                AtCommand::firmware_version(),
                ResponseKind::FirmwareVersion,
                self.timeout_ms,
                &mut buf,
            )
            .await?;
        FirmwareVersion::parse(field).ok_or(RilError::Malformed)
    }

    /// Modem IMEI (`AT+CGSN=1`)
    ///
    /// # Errors
    ///
    /// [`RilError::Malformed`] unless the field is exactly 15 digits.
    pub async fn imei(&mut self) -> RilResult<Imei> {
        let mut buf = [0u8; MAX_FIELD_LEN + 1];
        let field = self
            .query_field(AtCommand::imei(), ResponseKind::Imei, self.timeout_ms, &mut buf)
            .await?;
        Imei::parse(field).ok_or(RilError::Malformed)
    }

    /// Supply charge and voltage (`AT+CBC`)
    ///
    /// # Errors
    ///
    /// [`RilError::Malformed`] if the `+CBC` payload does not parse.
    pub async fn battery(&mut self) -> RilResult<BatteryStatus> {
        let mut buf = [0u8; MAX_FIELD_LEN + 1];
        let timeout_ms = self.timeout_ms.max(BATTERY_AT_TIMEOUT_MS);
        let field = self
            .query_field(AtCommand::battery(), ResponseKind::BatteryCharge, timeout_ms, &mut buf)
            .await?;
        BatteryStatus::parse(field).ok_or(RilError::Malformed)
    }

    /// EPS registration status (`AT+CEREG?`)
    ///
    /// # Errors
    ///
    /// [`RilError::Malformed`] if `<stat>` is missing or unknown.
    pub async fn registration(&mut self) -> RilResult<RegistrationStatus> {
        let mut buf = [0u8; MAX_FIELD_LEN + 1];
        let field = self
            .query_field(
                AtCommand::registration(),
                ResponseKind::Registration,
                self.timeout_ms,
                &mut buf,
            )
            .await?;
        parse_field(field, 1)
            .and_then(RegistrationStatus::from_code)
            .ok_or(RilError::Malformed)
    }

    /// Set the release assistance indication (`AT+QNBIOTRAI`)
    ///
    /// # Errors
    ///
    /// [`RilError::InvalidArgument`] unless `rai` is 0, 1 or 2; nothing is
    /// sent in that case.
    pub async fn set_rai(&mut self, rai: u8) -> RilResult<()> {
        let rai = Rai::try_from(rai)?;
        self.send(AtCommand::rai(rai)).await
    }

    /// Turn on event reporting (`AT+QNBIOTEVENT=1,<event>`)
    ///
    /// # Errors
    ///
    /// [`RilError::InvalidArgument`] unless `event` is the PSM event code.
    pub async fn enable_event(&mut self, event: u32) -> RilResult<()> {
        let event = ModemEvent::try_from(event)?;
        self.send(AtCommand::event_reporting(event, true)).await
    }

    /// Turn off event reporting (`AT+QNBIOTEVENT=0,<event>`)
    ///
    /// # Errors
    ///
    /// [`RilError::InvalidArgument`] unless `event` is the PSM event code.
    pub async fn disable_event(&mut self, event: u32) -> RilResult<()> {
        let event = ModemEvent::try_from(event)?;
        self.send(AtCommand::event_reporting(event, false)).await
    }

    /// Basic liveness check (`AT`)
    ///
    /// # Errors
    ///
    /// Any dispatcher or protocol error.
    pub async fn ping(&mut self) -> RilResult<()> {
        match AtCommand::raw("AT") {
            Some(command) => self.send(command).await,
            None => Err(RilError::Overflow),
        }
    }
}
