//! AT Response Classifier
//!
//! Decides, one received line at a time, whether a command's response is
//! finished and whether the line carries the data field the command asked
//! for. The modem response grammar is:
//!
//! ```text
//! <CR><LF>+CGSN: 359999999999999<CR><LF>     data line(s), optional
//! <CR><LF>OK<CR><LF>                          final result code
//! ```
//!
//! Classification holds no state between calls; every call is bounded by
//! the length of the line it is given.

use core::fmt;

/// Outcome of classifying a single line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Final `OK` seen
    Success,
    /// Final `ERROR`, `+CME ERROR` or `+CMS ERROR` seen
    Failure,
    /// Not finished, wait for the next line
    Continue,
}

impl Classification {
    /// Whether the response is complete
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Continue)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Classification {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Success => defmt::write!(f, "Success"),
            Self::Failure => defmt::write!(f, "Failure"),
            Self::Continue => defmt::write!(f, "Continue"),
        }
    }
}

/// Which command a response belongs to
///
/// Each kind has at most one data marker. A command without data uses
/// [`ResponseKind::Generic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Final result code only
    #[default]
    Generic,
    /// `AT+CGMR`
    FirmwareVersion,
    /// `AT+CGSN=1`
    Imei,
    /// `AT+CBC`
    BatteryCharge,
    /// `AT+CEREG?`
    Registration,
}

impl ResponseKind {
    /// Marker that identifies this command's data line
    #[must_use]
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Generic => None,
            Self::FirmwareVersion => Some("Revision:"),
            Self::Imei => Some("+CGSN:"),
            Self::BatteryCharge => Some("+CBC:"),
            Self::Registration => Some("+CEREG:"),
        }
    }
}

/// Why the modem rejected a command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCause {
    /// Plain `ERROR`
    Error,
    /// `+CME ERROR: <n>` (mobile equipment), code absent in verbose mode
    Cme(Option<u16>),
    /// `+CMS ERROR: <n>` (message service)
    Cms(Option<u16>),
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("ERROR"),
            Self::Cme(Some(code)) => write!(f, "+CME ERROR: {code}"),
            Self::Cme(None) => f.write_str("+CME ERROR"),
            Self::Cms(Some(code)) => write!(f, "+CMS ERROR: {code}"),
            Self::Cms(None) => f.write_str("+CMS ERROR"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FailureCause {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Error => defmt::write!(f, "ERROR"),
            Self::Cme(code) => defmt::write!(f, "+CME ERROR: {}", code),
            Self::Cms(code) => defmt::write!(f, "+CMS ERROR: {}", code),
        }
    }
}

/// Structured reading of one response line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseLine<'a> {
    /// Final `OK`
    Ok,
    /// Final error result code
    Error(FailureCause),
    /// The command's data field, between the marker's `:` and `\r\n`
    Data(&'a [u8]),
    /// Marker present but `:` or the trailing `\r\n` missing
    Malformed,
    /// Anything else (echo, blank, unrelated output)
    Other,
}

impl ResponseLine<'_> {
    /// Classification this line maps to
    #[must_use]
    pub const fn classification(&self) -> Classification {
        match self {
            Self::Ok => Classification::Success,
            Self::Error(_) => Classification::Failure,
            Self::Data(_) | Self::Malformed | Self::Other => Classification::Continue,
        }
    }
}

// The colon is optional; some firmware reports a bare `+CME ERROR`
const CME_ERROR: &str = "+CME ERROR";
const CMS_ERROR: &str = "+CMS ERROR";

/// Find `needle` anywhere in `haystack`
#[must_use]
pub fn find_str(haystack: &[u8], needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

const fn is_line_break(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Find `token` occupying a whole line
///
/// Matches `<CR><LF>OK<CR><LF>`, `<CR>OK<CR>`, `<LF>OK<LF>` and a bare
/// `OK` at either end of the buffer, but not `OK` inside other text.
#[must_use]
pub fn find_line(line: &[u8], token: &str) -> Option<usize> {
    let token = token.as_bytes();
    if token.is_empty() || token.len() > line.len() {
        return None;
    }
    line.windows(token.len()).enumerate().find_map(|(start, w)| {
        let end = start + token.len();
        let before_ok = start == 0 || is_line_break(line[start - 1]);
        let after_ok = end == line.len() || is_line_break(line[end]);
        (w == token && before_ok && after_ok).then_some(start)
    })
}

fn error_code(line: &[u8], marker_at: usize, marker: &str) -> Option<u16> {
    let rest = &line[marker_at + marker.len()..];
    let digits = rest
        .iter()
        .skip_while(|&&b| b == b':' || b == b' ')
        .take_while(|b| b.is_ascii_digit());
    let mut code: u16 = 0;
    let mut seen = false;
    for &d in digits {
        code = code.checked_mul(10)?.checked_add(u16::from(d - b'0'))?;
        seen = true;
    }
    seen.then_some(code)
}

fn data_field<'a>(line: &'a [u8], marker_at: usize) -> ResponseLine<'a> {
    let Some(colon) = line[marker_at..].iter().position(|&b| b == b':') else {
        return ResponseLine::Malformed;
    };
    let value_start = marker_at + colon + 1;
    let Some(len) = find_str(&line[value_start..], "\r\n") else {
        return ResponseLine::Malformed;
    };
    let field = &line[value_start..value_start + len];
    let skip = field.iter().take_while(|&&b| b == b' ').count();
    ResponseLine::Data(&field[skip..])
}

/// Read one line in the context of `kind`
///
/// Precedence is fixed: `OK`, `ERROR`, `+CME ERROR`, `+CMS ERROR`, then
/// the kind's data marker.
#[must_use]
pub fn parse_line(kind: ResponseKind, line: &[u8]) -> ResponseLine<'_> {
    if find_line(line, "OK").is_some() {
        return ResponseLine::Ok;
    }
    if find_line(line, "ERROR").is_some() {
        return ResponseLine::Error(FailureCause::Error);
    }
    if let Some(at) = find_str(line, CME_ERROR) {
        return ResponseLine::Error(FailureCause::Cme(error_code(line, at, CME_ERROR)));
    }
    if let Some(at) = find_str(line, CMS_ERROR) {
        return ResponseLine::Error(FailureCause::Cms(error_code(line, at, CMS_ERROR)));
    }
    match kind.marker().and_then(|m| find_str(line, m)) {
        Some(at) => data_field(line, at),
        None => ResponseLine::Other,
    }
}

/// Copy `src` into `dst` followed by a NUL byte
///
/// Writes exactly `src.len() + 1` bytes, or nothing when `dst` is too small.
/// Returns the number of field bytes copied.
pub fn copy_terminated(src: &[u8], dst: &mut [u8]) -> Option<usize> {
    let slot = dst.get_mut(..=src.len())?;
    slot[..src.len()].copy_from_slice(src);
    slot[src.len()] = 0;
    Some(src.len())
}

/// Classify one line, copying any data field into `out`
///
/// A data line without an output buffer, a malformed data line, and a data
/// field larger than `out` all leave `out` untouched and return
/// [`Classification::Continue`].
pub fn classify(kind: ResponseKind, line: &[u8], out: Option<&mut [u8]>) -> Classification {
    let parsed = parse_line(kind, line);
    if let (ResponseLine::Data(field), Some(out)) = (parsed, out) {
        let _ = copy_terminated(field, out);
    }
    parsed.classification()
}
