//! Shared types used across the RIL
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time and provide type safety throughout the codebase.

use core::fmt;

use heapless::String;

use crate::config::{FIRMWARE_VERSION_LEN, IMEI_LEN, MAX_RAI, PSM_EVENT};
use crate::error::RilError;
use crate::protocol::field::parse_field;

/// International Mobile Equipment Identity
///
/// Always exactly 15 ASCII digits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Imei(String<IMEI_LEN>);

impl Imei {
    /// Create from the modem's `+CGSN` field, returns None unless 15 digits
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        let digits = field.trim();
        if digits.len() != IMEI_LEN || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let mut s = String::new();
        s.push_str(digits).ok()?;
        Some(Self(s))
    }

    /// Get the digits
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type Allocation Code (first 8 digits)
    #[must_use]
    pub fn tac(&self) -> &str {
        &self.0[..8]
    }

    /// Whether the Luhn check digit matches
    #[must_use]
    pub fn luhn_valid(&self) -> bool {
        let sum: u32 = self
            .0
            .bytes()
            .rev()
            .enumerate()
            .map(|(i, b)| {
                let d = u32::from(b - b'0');
                if i % 2 == 1 {
                    let doubled = d * 2;
                    doubled / 10 + doubled % 10
                } else {
                    d
                }
            })
            .sum();
        sum % 10 == 0
    }
}

impl fmt::Debug for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Imei({})", self.0)
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Imei {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.0.as_str());
    }
}

/// Modem firmware revision, as reported after `Revision:`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirmwareVersion(String<FIRMWARE_VERSION_LEN>);

impl FirmwareVersion {
    /// Create from the revision field, returns None if empty or too long
    #[must_use]
    pub fn parse(field: &str) -> Option<Self> {
        let field = field.trim();
        if field.is_empty() {
            return None;
        }
        let mut s = String::new();
        s.push_str(field).ok()?;
        Some(Self(s))
    }

    /// Get the revision string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FirmwareVersion {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.0.as_str());
    }
}

/// Battery charge state (`<bcs>` of `+CBC`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ChargeState {
    /// Not charging
    #[default]
    NotCharging,
    /// Charging
    Charging,
    /// Charging has finished
    Finished,
}

impl ChargeState {
    /// Decode the `<bcs>` value
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NotCharging),
            1 => Some(Self::Charging),
            2 => Some(Self::Finished),
            _ => None,
        }
    }
}

/// Supply status reported by `AT+CBC`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryStatus {
    /// Charge state
    pub charge: ChargeState,
    /// Capacity in percent (0-100)
    pub level_percent: u8,
    /// Supply voltage in millivolts
    pub voltage_mv: u16,
}

impl BatteryStatus {
    /// Parse the `<bcs>,<bcl>,<voltage>` payload
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        let level_percent: u8 = parse_field(payload, 1)?;
        if level_percent > 100 {
            return None;
        }
        Some(Self {
            charge: ChargeState::from_code(parse_field(payload, 0)?)?,
            level_percent,
            voltage_mv: parse_field(payload, 2)?,
        })
    }

    /// Voltage in volts
    #[must_use]
    pub fn volts(&self) -> f32 {
        f32::from(self.voltage_mv) / 1000.0
    }

    /// Below the modem's brown-out margin (3.3 V)
    #[must_use]
    pub const fn is_low(&self) -> bool {
        self.voltage_mv < 3_300
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BatteryStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}% {} mV", self.level_percent, self.voltage_mv);
    }
}

/// Release Assistance Indication for `AT+QNBIOTRAI`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Rai {
    /// No indication
    #[default]
    None,
    /// No further uplink or downlink data expected
    NoFurtherData,
    /// Only a single downlink packet expected after the uplink
    SingleDownlink,
}

impl Rai {
    /// Value sent on the wire
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::NoFurtherData => 1,
            Self::SingleDownlink => 2,
        }
    }
}

impl TryFrom<u8> for Rai {
    type Error = RilError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::NoFurtherData),
            MAX_RAI => Ok(Self::SingleDownlink),
            _ => Err(RilError::InvalidArgument),
        }
    }
}

/// Event classes `AT+QNBIOTEVENT` can report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModemEvent {
    /// PSM enter/exit
    Psm,
}

impl ModemEvent {
    /// Value sent on the wire
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Psm => PSM_EVENT,
        }
    }
}

impl TryFrom<u32> for ModemEvent {
    type Error = RilError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            PSM_EVENT => Ok(Self::Psm),
            _ => Err(RilError::InvalidArgument),
        }
    }
}

/// EPS network registration status (`<stat>` of `+CEREG`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RegistrationStatus {
    /// Not registered, not searching
    #[default]
    NotRegistered,
    /// Registered on the home network
    Home,
    /// Not registered, searching
    Searching,
    /// Registration denied
    Denied,
    /// Unknown (e.g. out of coverage)
    Unknown,
    /// Registered, roaming
    Roaming,
}

impl RegistrationStatus {
    /// Decode the `<stat>` value
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NotRegistered),
            1 => Some(Self::Home),
            2 => Some(Self::Searching),
            3 => Some(Self::Denied),
            4 => Some(Self::Unknown),
            5 => Some(Self::Roaming),
            _ => None,
        }
    }

    /// Whether the modem can carry data
    #[must_use]
    pub const fn is_registered(self) -> bool {
        matches!(self, Self::Home | Self::Roaming)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RegistrationStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NotRegistered => defmt::write!(f, "not registered"),
            Self::Home => defmt::write!(f, "home"),
            Self::Searching => defmt::write!(f, "searching"),
            Self::Denied => defmt::write!(f, "denied"),
            Self::Unknown => defmt::write!(f, "unknown"),
            Self::Roaming => defmt::write!(f, "roaming"),
        }
    }
}
