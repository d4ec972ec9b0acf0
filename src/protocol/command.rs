//! AT command line formatting

use heapless::String;

use crate::config::{COMMAND_TERMINATOR, MAX_COMMAND_LEN};
use crate::types::{ModemEvent, Rai};

/// One AT command line, terminator included
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtCommand {
    buffer: String<MAX_COMMAND_LEN>,
}

impl AtCommand {
    // Built-in commands are all far shorter than MAX_COMMAND_LEN
    fn build(args: core::fmt::Arguments<'_>) -> Self {
        let mut buffer = String::new();
        let _ = core::fmt::write(&mut buffer, args);
        let _ = buffer.push_str(COMMAND_TERMINATOR);
        Self { buffer }
    }

    /// Arbitrary command body, e.g. `"AT+CSQ"`; None if it does not fit
    #[must_use]
    pub fn raw(body: &str) -> Option<Self> {
        if body.len() + COMMAND_TERMINATOR.len() > MAX_COMMAND_LEN {
            return None;
        }
        Some(Self::build(format_args!("{body}")))
    }

    /// `AT+CGMR` firmware revision
    #[must_use]
    pub fn firmware_version() -> Self {
        Self::build(format_args!("AT+CGMR"))
    }

    /// `AT+CGSN=1` IMEI
    #[must_use]
    pub fn imei() -> Self {
        Self::build(format_args!("AT+CGSN=1"))
    }

    /// `AT+CBC` battery charge
    #[must_use]
    pub fn battery() -> Self {
        Self::build(format_args!("AT+CBC"))
    }

    /// `AT+CEREG?` registration status
    #[must_use]
    pub fn registration() -> Self {
        Self::build(format_args!("AT+CEREG?"))
    }

    /// `AT+QNBIOTRAI=<n>` release assistance indication
    #[must_use]
    pub fn rai(rai: Rai) -> Self {
        Self::build(format_args!("AT+QNBIOTRAI={}", rai.code()))
    }

    /// `AT+QNBIOTEVENT=<enable>,<event>` event reporting
    #[must_use]
    pub fn event_reporting(event: ModemEvent, enable: bool) -> Self {
        Self::build(format_args!(
            "AT+QNBIOTEVENT={},{}",
            u8::from(enable),
            event.code()
        ))
    }

    /// Get the command string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Get the command bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Command without its terminator
    #[must_use]
    pub fn body(&self) -> &str {
        self.as_str()
            .strip_suffix(COMMAND_TERMINATOR)
            .unwrap_or(self.as_str())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AtCommand {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.body());
    }
}
