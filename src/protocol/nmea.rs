//! NMEA RMC sentence reading
//!
//! The modem's GNSS engine reports position as `$GPRMC`/`$GNRMC`
//! sentences. Fields are borrowed from the source string.

use super::field::{nth_field, parse_field};

/// Hemisphere suffix of a coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hemisphere {
    /// `N`
    North,
    /// `S`
    South,
    /// `E`
    East,
    /// `W`
    West,
}

impl Hemisphere {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "N" => Some(Self::North),
            "S" => Some(Self::South),
            "E" => Some(Self::East),
            "W" => Some(Self::West),
            _ => None,
        }
    }

    /// Sign applied to the decimal coordinate
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::North | Self::East => 1.0,
            Self::South | Self::West => -1.0,
        }
    }
}

/// Coordinate in NMEA `dddmm.mmmm` form plus hemisphere
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    /// Raw `dddmm.mmmm` value
    pub raw: f32,
    /// Hemisphere suffix
    pub hemisphere: Hemisphere,
}

impl Coordinate {
    /// Signed decimal degrees
    #[must_use]
    pub fn degrees(&self) -> f32 {
        let whole = (self.raw / 100.0) as u32;
        let minutes = self.raw - (whole * 100) as f32;
        self.hemisphere.sign() * (whole as f32 + minutes / 60.0)
    }
}

/// Recommended minimum navigation data
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RmcSentence<'a> {
    /// UTC time `hhmmss.sss`
    pub utc_time: Option<&'a str>,
    /// `A` when the fix is valid, `V` otherwise
    pub valid: bool,
    /// Latitude, when fixed
    pub latitude: Option<Coordinate>,
    /// Longitude, when fixed
    pub longitude: Option<Coordinate>,
    /// Speed over ground in knots
    pub speed_knots: Option<f32>,
    /// Course over ground in degrees
    pub course: Option<f32>,
    /// Date `ddmmyy`
    pub date: Option<&'a str>,
    /// Mode indicator (`A`, `D`, `E`, `N`)
    pub mode: Option<char>,
}

impl<'a> RmcSentence<'a> {
    /// Field indices within an RMC sentence
    const TIME: usize = 1;
    const STATUS: usize = 2;
    const LAT: usize = 3;
    const LAT_HEMI: usize = 4;
    const LON: usize = 5;
    const LON_HEMI: usize = 6;
    const SPEED: usize = 7;
    const COURSE: usize = 8;
    const DATE: usize = 9;
    const MODE: usize = 12;

    /// Parse a sentence with or without the leading `$` and `*hh` checksum
    #[must_use]
    pub fn parse(sentence: &'a str) -> Option<Self> {
        let body = sentence.trim_end_matches(['\r', '\n']);
        let body = body.strip_prefix('$').unwrap_or(body);
        let body = body.split_once('*').map_or(body, |(data, _)| data);

        let talker = nth_field(body, 0)?;
        if !talker.ends_with("RMC") {
            return None;
        }

        Some(Self {
            utc_time: nth_field(body, Self::TIME),
            valid: nth_field(body, Self::STATUS) == Some("A"),
            latitude: Self::coordinate(body, Self::LAT, Self::LAT_HEMI),
            longitude: Self::coordinate(body, Self::LON, Self::LON_HEMI),
            speed_knots: parse_field(body, Self::SPEED),
            course: parse_field(body, Self::COURSE),
            date: nth_field(body, Self::DATE),
            mode: nth_field(body, Self::MODE).and_then(|m| m.chars().next()),
        })
    }

    fn coordinate(body: &str, value: usize, hemisphere: usize) -> Option<Coordinate> {
        Some(Coordinate {
            raw: parse_field(body, value)?,
            hemisphere: Hemisphere::from_field(nth_field(body, hemisphere)?)?,
        })
    }
}
