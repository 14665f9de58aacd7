//! Flight leg types.
//!
//! Every leg carries the repeated mandatory block. The repeated conditional
//! items and the airline use block live in the leg's variable-size block.

use std::fmt;

use thiserror::Error;

use crate::layout::MAX_JULIAN_DAY;

/// Day of the year (1-366) on which a flight departs.
///
/// The year is not encoded in the barcode. See
/// [`resolve_julian_date`](crate::util::resolve_julian_date) for turning it
/// into a calendar date given a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct JulianDay(u16);

/// Returned when a day-of-year is outside 1-366.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("day of year {0} out of range [1, 366]")]
pub struct InvalidJulianDay(pub u16);

impl JulianDay {
    /// Creates a day-of-year, returning `None` outside 1-366.
    pub fn new(day: u16) -> Option<Self> {
        if (1..=MAX_JULIAN_DAY).contains(&day) {
            Some(Self(day))
        } else {
            None
        }
    }

    /// Returns the day-of-year.
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for JulianDay {
    type Error = InvalidJulianDay;

    fn try_from(day: u16) -> Result<Self, Self::Error> {
        JulianDay::new(day).ok_or(InvalidJulianDay(day))
    }
}

impl From<JulianDay> for u16 {
    fn from(day: JulianDay) -> u16 {
        day.0
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Cabin derived from a compartment code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cabin {
    First,
    Business,
    PremiumEconomy,
    Economy,
    Unknown(char),
}

impl Cabin {
    /// Maps a compartment code to its cabin.
    pub fn from_code(code: char) -> Cabin {
        match code {
            'F' | 'A' => Cabin::First,
            'J' | 'C' | 'D' | 'I' => Cabin::Business,
            'W' | 'P' => Cabin::PremiumEconomy,
            'Y' | 'S' | 'B' | 'H' | 'K' | 'L' | 'M' | 'N' => Cabin::Economy,
            other => Cabin::Unknown(other),
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cabin::First => f.write_str("First"),
            Cabin::Business => f.write_str("Business"),
            Cabin::PremiumEconomy => f.write_str("Premium Economy"),
            Cabin::Economy => f.write_str("Economy"),
            Cabin::Unknown(code) => write!(f, "Unknown Code ({code})"),
        }
    }
}

/// Repeated conditional items for one leg.
///
/// An item is `None` when the declared block size ends before it. Bytes of
/// the block past the last recognized item are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentConditional {
    pub airline_numeric_code: Option<String>,
    pub document_serial_number: Option<String>,
    pub selectee_indicator: Option<String>,
    pub international_document_verification: Option<String>,
    pub marketing_carrier: Option<String>,
    pub frequent_flyer_airline: Option<String>,
    pub frequent_flyer_number: Option<String>,
    pub id_ad_indicator: Option<String>,
    pub free_baggage_allowance: Option<String>,
    pub fast_track: Option<String>,
    pub extra: String,
}

impl SegmentConditional {
    /// Items in wire order, matching `layout::SEGMENT_CONDITIONAL_FIELDS`.
    pub(crate) fn items(&self) -> [Option<&str>; 10] {
        [
            self.airline_numeric_code.as_deref(),
            self.document_serial_number.as_deref(),
            self.selectee_indicator.as_deref(),
            self.international_document_verification.as_deref(),
            self.marketing_carrier.as_deref(),
            self.frequent_flyer_airline.as_deref(),
            self.frequent_flyer_number.as_deref(),
            self.id_ad_indicator.as_deref(),
            self.free_baggage_allowance.as_deref(),
            self.fast_track.as_deref(),
        ]
    }

    pub(crate) fn from_items(items: [Option<String>; 10], extra: String) -> Self {
        let [
            airline_numeric_code,
            document_serial_number,
            selectee_indicator,
            international_document_verification,
            marketing_carrier,
            frequent_flyer_airline,
            frequent_flyer_number,
            id_ad_indicator,
            free_baggage_allowance,
            fast_track,
        ] = items;
        Self {
            airline_numeric_code,
            document_serial_number,
            selectee_indicator,
            international_document_verification,
            marketing_carrier,
            frequent_flyer_airline,
            frequent_flyer_number,
            id_ad_indicator,
            free_baggage_allowance,
            fast_track,
            extra,
        }
    }

    /// Returns the 13-digit ticket number (airline numeric code followed by
    /// the document serial number), if both are present and filled in.
    pub fn ticket_number(&self) -> Option<String> {
        let code = self.airline_numeric_code.as_deref().filter(|s| !s.is_empty())?;
        let serial = self.document_serial_number.as_deref().filter(|s| !s.is_empty())?;
        Some(format!("{code}{serial}"))
    }

    /// Returns the frequent flyer airline and number, if a number is present.
    pub fn frequent_flyer(&self) -> Option<(&str, &str)> {
        let number = self.frequent_flyer_number.as_deref().filter(|s| !s.is_empty())?;
        let airline = self.frequent_flyer_airline.as_deref().unwrap_or("");
        Some((airline, number))
    }
}

/// One flight leg.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentRecord {
    pub operating_carrier_pnr: String,
    pub from_airport: String,
    pub to_airport: String,
    pub operating_carrier: String,
    pub flight_number: String,
    pub date_of_flight: JulianDay,
    pub compartment_code: char,
    /// Empty when no seat has been assigned yet.
    pub seat_number: String,
    pub check_in_sequence: String,
    pub passenger_status: char,
    pub conditional: Option<SegmentConditional>,
    /// Opaque bytes reserved for the operating airline.
    pub airline_use: String,
}

impl SegmentRecord {
    /// Returns the cabin for this leg's compartment code.
    pub fn cabin(&self) -> Cabin {
        Cabin::from_code(self.compartment_code)
    }

    /// Returns true if a seat has been assigned.
    pub fn is_seat_assigned(&self) -> bool {
        !self.seat_number.trim().is_empty()
    }

    /// Returns the seat without zero padding ("012C" becomes "12C").
    pub fn seat_display(&self) -> String {
        let seat = self.seat_number.trim();
        let digits_end = seat
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(seat.len());
        if digits_end == 0 {
            return seat.to_string();
        }
        let row = seat[..digits_end].trim_start_matches('0');
        let row = if row.is_empty() { "0" } else { row };
        format!("{}{}", row, &seat[digits_end..])
    }

    /// Returns the flight number without zero padding ("0100" becomes "100").
    pub fn flight_number_display(&self) -> &str {
        let trimmed = self.flight_number.trim_start_matches(['0', ' ']).trim_end();
        if trimmed.is_empty() && !self.flight_number.trim().is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}
