//! Boarding pass record types.

use std::fmt;

use crate::layout::SECURITY_MARKER;
use crate::model::SegmentRecord;

/// Passenger name, stored on the wire as `LAST/FIRST[TITLE]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerName {
    pub last: String,
    /// First name, followed directly by any title ("JOHNMR").
    pub first: String,
}

impl PassengerName {
    pub fn new(last: impl Into<String>, first: impl Into<String>) -> Self {
        Self {
            last: last.into(),
            first: first.into(),
        }
    }

    /// Splits a name on its first `/`. Returns `None` if there is none.
    pub fn parse(name: &str) -> Option<Self> {
        let (last, first) = name.split_once('/')?;
        Some(Self::new(last, first))
    }
}

impl fmt::Display for PassengerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.last, self.first)
    }
}

/// Items carried once per pass, at the start of the first leg's variable
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniqueConditional {
    pub version_number: char,
    pub passenger_description: Option<String>,
    pub source_of_check_in: Option<String>,
    pub source_of_issuance: Option<String>,
    /// Last digit of the year followed by the day-of-year.
    pub date_of_issue: Option<String>,
    pub document_type: Option<String>,
    pub issuer_designator: Option<String>,
    pub baggage_tag: Option<String>,
    pub first_non_consecutive_baggage_tag: Option<String>,
    pub second_non_consecutive_baggage_tag: Option<String>,
    pub extra: String,
}

impl UniqueConditional {
    /// Creates an empty block for the given version number.
    pub fn new(version_number: char) -> Self {
        Self {
            version_number,
            passenger_description: None,
            source_of_check_in: None,
            source_of_issuance: None,
            date_of_issue: None,
            document_type: None,
            issuer_designator: None,
            baggage_tag: None,
            first_non_consecutive_baggage_tag: None,
            second_non_consecutive_baggage_tag: None,
            extra: String::new(),
        }
    }

    /// Items in wire order, matching `layout::UNIQUE_CONDITIONAL_FIELDS`.
    pub(crate) fn items(&self) -> [Option<&str>; 9] {
        [
            self.passenger_description.as_deref(),
            self.source_of_check_in.as_deref(),
            self.source_of_issuance.as_deref(),
            self.date_of_issue.as_deref(),
            self.document_type.as_deref(),
            self.issuer_designator.as_deref(),
            self.baggage_tag.as_deref(),
            self.first_non_consecutive_baggage_tag.as_deref(),
            self.second_non_consecutive_baggage_tag.as_deref(),
        ]
    }

    pub(crate) fn from_items(version_number: char, items: [Option<String>; 9], extra: String) -> Self {
        let [
            passenger_description,
            source_of_check_in,
            source_of_issuance,
            date_of_issue,
            document_type,
            issuer_designator,
            baggage_tag,
            first_non_consecutive_baggage_tag,
            second_non_consecutive_baggage_tag,
        ] = items;
        Self {
            version_number,
            passenger_description,
            source_of_check_in,
            source_of_issuance,
            date_of_issue,
            document_type,
            issuer_designator,
            baggage_tag,
            first_non_consecutive_baggage_tag,
            second_non_consecutive_baggage_tag,
            extra,
        }
    }
}

/// A decoded boarding pass payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardingPassRecord {
    pub format_code: char,
    /// Must equal `segments.len()`.
    pub leg_count: u8,
    pub passenger_name: PassengerName,
    pub electronic_ticket_indicator: char,
    pub unique_conditional: Option<UniqueConditional>,
    pub segments: Vec<SegmentRecord>,
    /// Issuer security data, kept byte for byte.
    pub security_data: Option<String>,
}

impl BoardingPassRecord {
    /// Returns true if the pass was issued against an electronic ticket.
    pub fn is_electronic_ticket(&self) -> bool {
        self.electronic_ticket_indicator == 'E'
    }

    /// Parses the security data as `^` + type + hex length + data.
    ///
    /// Returns `None` when there is no security data or it does not follow
    /// that layout. The record always keeps the raw bytes regardless.
    pub fn security_block(&self) -> Option<SecurityBlock<'_>> {
        SecurityBlock::parse(self.security_data.as_deref()?)
    }
}

/// Structured view over a pass's security data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityBlock<'a> {
    pub security_type: char,
    pub data: &'a str,
}

impl<'a> SecurityBlock<'a> {
    /// Parses `^` + type (1) + length (2 hex) + data.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let rest = raw.strip_prefix(SECURITY_MARKER)?;
        let security_type = rest.chars().next().filter(char::is_ascii)?;
        let len_hex = rest.get(1..3)?;
        if !len_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let len = usize::from_str_radix(len_hex, 16).ok()?;
        let data = rest.get(3..)?;
        if data.len() != len {
            return None;
        }
        Some(Self { security_type, data })
    }
}
