//! Error types for BCBP decoding, encoding and validation.

use thiserror::Error;

/// Error during payload decoding.
///
/// Offsets are byte positions in the original payload, so a caller can point
/// at the exact place a scanned barcode went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unsupported format code {found:?}, expected 'M'")]
    UnsupportedFormat { found: char },

    #[error("malformed {field} at offset {offset}: {found:?}")]
    MalformedField {
        field: &'static str,
        offset: usize,
        found: String,
    },

    #[error("input truncated while reading {field} at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("payload declares {declared} legs but only {parsed} are present")]
    LegCountMismatch { declared: u8, parsed: usize },
}

impl DecodeError {
    /// Returns the payload offset the error refers to, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::MalformedField { offset, .. }
            | DecodeError::TruncatedInput { offset, .. } => Some(*offset),
            DecodeError::UnsupportedFormat { .. } => Some(0),
            DecodeError::LegCountMismatch { .. } => None,
        }
    }
}

/// Error during payload encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unsupported format code {found:?}, expected 'M'")]
    UnsupportedFormat { found: char },

    #[error("{field} length {len} exceeds field width {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("leg count {declared} does not match {segments} segments (must be 1-9)")]
    InvalidLegCount { declared: u8, segments: usize },

    #[error("{field} contains invalid character {found:?}")]
    InvalidCharacterSet { field: &'static str, found: char },

    #[error("{field} cannot be encoded without the items that precede it")]
    MisplacedField { field: &'static str },

    #[error("{field} is present but empty")]
    EmptyField { field: &'static str },
}

/// Error during semantic validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("passenger last name is empty")]
    EmptyLastName,

    #[error("passenger name {value:?} is not upper-case and would not survive encoding")]
    LowercaseName { value: String },

    #[error("segment {segment}: booking reference {value:?} is not upper-case alphanumeric")]
    InvalidPnr { segment: usize, value: String },

    #[error("segment {segment}: {field} {value:?} is not a three-letter airport code")]
    InvalidAirportCode {
        segment: usize,
        field: &'static str,
        value: String,
    },

    #[error("segment {segment}: {field} {value:?} is not a carrier designator")]
    InvalidCarrier {
        segment: usize,
        field: &'static str,
        value: String,
    },

    #[error("segment {segment}: flight number {value:?} is not 1-4 digits with an optional suffix")]
    InvalidFlightNumber { segment: usize, value: String },

    #[error("segment {segment}: compartment code {value:?} is not an upper-case letter")]
    InvalidCompartment { segment: usize, value: char },

    #[error("{field} {value:?} has trailing spaces that would not survive decoding")]
    TrailingSpaces { field: &'static str, value: String },

    #[error("record cannot be encoded: {0}")]
    NotEncodable(#[from] EncodeError),
}
