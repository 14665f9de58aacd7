//! Field table for the BCBP format (IATA Resolution 792).
//!
//! Every field on the wire has a fixed width and a fill rule. Mandatory
//! fields are always present; conditional items are present only as far as
//! the enclosing block's declared size reaches.

/// How a value is justified and padded inside its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Left-justified, padded with trailing spaces.
    Text,
    /// Right-justified, padded with leading zeros.
    Numeric,
    /// Upper-case hexadecimal, padded with leading zeros.
    Hex,
}

/// A single fixed-width field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
    pub fill: Fill,
}

impl FieldSpec {
    pub const fn text(name: &'static str, width: usize) -> Self {
        Self { name, width, fill: Fill::Text }
    }

    pub const fn numeric(name: &'static str, width: usize) -> Self {
        Self { name, width, fill: Fill::Numeric }
    }

    pub const fn hex(name: &'static str) -> Self {
        Self { name, width: 2, fill: Fill::Hex }
    }
}

// =============================================================================
// FORMAT CONSTANTS
// =============================================================================

/// The only format code defined by the standard.
pub const FORMAT_CODE_M: char = 'M';

/// Marks the start of the unique conditional items in the first leg.
pub const VERSION_MARKER: char = '>';

/// Marks the start of the security data block.
pub const SECURITY_MARKER: char = '^';

/// Highest number of legs a single payload can carry.
pub const MAX_LEGS: u8 = 9;

/// Largest size expressible by a two-digit hex field size.
pub const MAX_BLOCK_LEN: usize = 0xFF;

/// Highest valid day-of-year.
pub const MAX_JULIAN_DAY: u16 = 366;

// =============================================================================
// MANDATORY FIELDS
// =============================================================================

pub const FORMAT_CODE: FieldSpec = FieldSpec::text("format_code", 1);
pub const LEG_COUNT: FieldSpec = FieldSpec::numeric("leg_count", 1);
pub const PASSENGER_NAME: FieldSpec = FieldSpec::text("passenger_name", 20);
pub const ELECTRONIC_TICKET_INDICATOR: FieldSpec =
    FieldSpec::text("electronic_ticket_indicator", 1);

pub const OPERATING_CARRIER_PNR: FieldSpec = FieldSpec::text("operating_carrier_pnr", 7);
pub const FROM_AIRPORT: FieldSpec = FieldSpec::text("from_airport", 3);
pub const TO_AIRPORT: FieldSpec = FieldSpec::text("to_airport", 3);
pub const OPERATING_CARRIER: FieldSpec = FieldSpec::text("operating_carrier", 3);
pub const FLIGHT_NUMBER: FieldSpec = FieldSpec::text("flight_number", 5);
pub const DATE_OF_FLIGHT: FieldSpec = FieldSpec::numeric("date_of_flight", 3);
pub const COMPARTMENT_CODE: FieldSpec = FieldSpec::text("compartment_code", 1);
pub const SEAT_NUMBER: FieldSpec = FieldSpec::text("seat_number", 4);
pub const CHECK_IN_SEQUENCE: FieldSpec = FieldSpec::text("check_in_sequence", 5);
pub const PASSENGER_STATUS: FieldSpec = FieldSpec::text("passenger_status", 1);
pub const SEGMENT_BLOCK_SIZE: FieldSpec = FieldSpec::hex("segment_block_size");

/// Width of the header shared by all legs.
pub const HEADER_LEN: usize = FORMAT_CODE.width
    + LEG_COUNT.width
    + PASSENGER_NAME.width
    + ELECTRONIC_TICKET_INDICATOR.width;

/// Width of one leg's mandatory block, including its field size.
pub const SEGMENT_MANDATORY_LEN: usize = OPERATING_CARRIER_PNR.width
    + FROM_AIRPORT.width
    + TO_AIRPORT.width
    + OPERATING_CARRIER.width
    + FLIGHT_NUMBER.width
    + DATE_OF_FLIGHT.width
    + COMPARTMENT_CODE.width
    + SEAT_NUMBER.width
    + CHECK_IN_SEQUENCE.width
    + PASSENGER_STATUS.width
    + SEGMENT_BLOCK_SIZE.width;

/// Shortest payload the decoder can accept: header plus one bare leg.
pub const MIN_PAYLOAD_LEN: usize = HEADER_LEN + SEGMENT_MANDATORY_LEN;

// =============================================================================
// CONDITIONAL ITEMS
// =============================================================================

pub const VERSION_MARKER_FIELD: FieldSpec = FieldSpec::text("version_marker", 1);
pub const VERSION_NUMBER: FieldSpec = FieldSpec::text("version_number", 1);
pub const UNIQUE_BLOCK_SIZE: FieldSpec = FieldSpec::hex("unique_block_size");
pub const REPEATED_BLOCK_SIZE: FieldSpec = FieldSpec::hex("repeated_block_size");

/// Items carried once per pass, in wire order.
pub const UNIQUE_CONDITIONAL_FIELDS: [FieldSpec; 9] = [
    FieldSpec::text("passenger_description", 1),
    FieldSpec::text("source_of_check_in", 1),
    FieldSpec::text("source_of_issuance", 1),
    FieldSpec::text("date_of_issue", 4),
    FieldSpec::text("document_type", 1),
    FieldSpec::text("issuer_designator", 3),
    FieldSpec::text("baggage_tag", 13),
    FieldSpec::text("first_non_consecutive_baggage_tag", 13),
    FieldSpec::text("second_non_consecutive_baggage_tag", 13),
];

/// Items repeated for every leg, in wire order.
pub const SEGMENT_CONDITIONAL_FIELDS: [FieldSpec; 10] = [
    FieldSpec::text("airline_numeric_code", 3),
    FieldSpec::text("document_serial_number", 10),
    FieldSpec::text("selectee_indicator", 1),
    FieldSpec::text("international_document_verification", 1),
    FieldSpec::text("marketing_carrier", 3),
    FieldSpec::text("frequent_flyer_airline", 3),
    FieldSpec::text("frequent_flyer_number", 16),
    FieldSpec::text("id_ad_indicator", 1),
    FieldSpec::text("free_baggage_allowance", 3),
    FieldSpec::text("fast_track", 1),
];
