//! Unsolicited result codes
//!
//! The modem interleaves URCs with command responses on the same UART.
//! They are recognized here so the dispatcher can route them away from the
//! response classifier.

use super::field::{nth_field, parse_field};
use super::response::find_str;
use crate::types::RegistrationStatus;

/// PSM transition reported by `+QNBIOTEVENT`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PsmTransition {
    /// `"ENTER PSM"`
    Enter,
    /// `"EXIT PSM"`
    Exit,
}

/// Unsolicited result code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Urc {
    /// `+QNBIOTEVENT: "ENTER PSM"` / `"EXIT PSM"`
    Psm(PsmTransition),
    /// `+CEREG: <stat>[,<tac>,<ci>,<AcT>]`
    Registration(RegistrationStatus),
}

#[cfg(feature = "embedded")]
impl defmt::Format for Urc {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Psm(PsmTransition::Enter) => defmt::write!(f, "PSM enter"),
            Self::Psm(PsmTransition::Exit) => defmt::write!(f, "PSM exit"),
            Self::Registration(stat) => defmt::write!(f, "CEREG {}", stat),
        }
    }
}

const PSM_EVENT: &str = "+QNBIOTEVENT:";
const CEREG: &str = "+CEREG:";

fn payload<'a>(line: &'a [u8], marker_at: usize, marker: &str) -> Option<&'a str> {
    let rest = core::str::from_utf8(&line[marker_at + marker.len()..]).ok()?;
    Some(rest.trim())
}

/// Recognize a URC line
///
/// A `+CEREG:` line is unsolicited when it is `<stat>` alone or
/// `<stat>,"<tac>",...`. The solicited `AT+CEREG?` answer starts with
/// `<n>,<stat>`, so its second field is a bare digit, and it is left to the
/// classifier.
#[must_use]
pub fn parse(line: &[u8]) -> Option<Urc> {
    if let Some(at) = find_str(line, PSM_EVENT) {
        let event = payload(line, at, PSM_EVENT)?.trim_matches('"');
        return match event {
            "ENTER PSM" => Some(Urc::Psm(PsmTransition::Enter)),
            "EXIT PSM" => Some(Urc::Psm(PsmTransition::Exit)),
            _ => None,
        };
    }
    if let Some(at) = find_str(line, CEREG) {
        let fields = payload(line, at, CEREG)?;
        let solicited = nth_field(fields, 1).is_some_and(|f| !f.trim().starts_with('"'));
        if solicited {
            return None;
        }
        let stat = parse_field(fields, 0)?;
        return RegistrationStatus::from_code(stat).map(Urc::Registration);
    }
    None
}
