//! BCBP: IATA Bar Coded Boarding Pass codec.
//!
//! This crate decodes, validates, and encodes the fixed-width text payload
//! carried in the PDF417/Aztec/QR barcode of an airline boarding pass
//! (IATA Resolution 792, format code `M`).
//!
//! # Quick Start
//!
//! ```rust
//! use bcbp::{decode_pass, encode_pass, Cabin};
//!
//! let raw = "M1DOE/JOHN            EABC123 JFKLAXAA 0100 045Y012C0025 100";
//!
//! let pass = decode_pass(raw).unwrap();
//! assert_eq!(pass.passenger_name.last, "DOE");
//! assert_eq!(pass.segments[0].from_airport, "JFK");
//! assert_eq!(pass.segments[0].cabin(), Cabin::Economy);
//! assert_eq!(pass.segments[0].seat_display(), "12C");
//!
//! // Re-encoding a decoded pass reproduces the payload exactly
//! assert_eq!(encode_pass(&pass).unwrap(), raw);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Record types (BoardingPassRecord, SegmentRecord, ...) and a builder
//! - [`codec`]: Text encoding/decoding
//! - [`validate`]: Semantic validation
//! - [`layout`]: Field widths and fill rules
//! - [`util`]: Resolving day-of-year dates against a reference date
//! - [`error`]: Error types
//!
//! # Wire Format
//!
//! A payload is a 23-character header, one 37-character mandatory block per
//! leg each followed by a size-prefixed variable block, and optional trailing
//! security data:
//! - Text fields are left-justified and space padded
//! - Numeric fields are zero padded
//! - Block sizes are two upper-case hex digits
//!
//! The decoder handles untrusted input: every read is bounds checked against
//! the enclosing declared block, and malformed payloads are rejected with the
//! field name and offset.

pub mod codec;
pub mod error;
pub mod layout;
pub mod model;
pub mod util;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{decode_pass, encode_pass};
pub use error::{DecodeError, EncodeError, ValidationError};
pub use model::{
    BoardingPassRecord, Cabin, InvalidJulianDay, JulianDay, PassBuilder, PassengerName,
    SecurityBlock, SegmentBuilder, SegmentConditional, SegmentRecord, UniqueConditional,
};
pub use util::{resolve_issue_date, resolve_julian_date, CalendarDate};
pub use validate::validate_pass;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// BCBP format code this crate implements.
pub const SUPPORTED_FORMAT_CODE: char = layout::FORMAT_CODE_M;
