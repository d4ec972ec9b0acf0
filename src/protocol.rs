//! Communication Protocols
//!
//! AT command formatting, response classification and field extraction
//! for Quectel BC66-class NB-IoT modems.

pub mod command;
pub mod field;
pub mod nmea;
pub mod response;
pub mod urc;

pub use command::AtCommand;
pub use field::{get_field, nth_field};
pub use response::{classify, parse_line, Classification, FailureCause, ResponseKind, ResponseLine};
pub use urc::Urc;
