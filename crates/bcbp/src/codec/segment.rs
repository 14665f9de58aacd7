//! Leg encoding/decoding.
//!
//! A leg is its repeated mandatory block followed by a two-digit hex size and
//! a variable block of that size. On the first leg the variable block opens
//! with the unique conditional items; on every leg it then carries the
//! repeated conditional items and finally the airline use bytes.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::layout::{
    CHECK_IN_SEQUENCE, COMPARTMENT_CODE, DATE_OF_FLIGHT, FLIGHT_NUMBER, FROM_AIRPORT, FieldSpec,
    OPERATING_CARRIER, OPERATING_CARRIER_PNR, PASSENGER_STATUS, REPEATED_BLOCK_SIZE,
    SEAT_NUMBER, SEGMENT_BLOCK_SIZE, SEGMENT_CONDITIONAL_FIELDS, TO_AIRPORT,
    SECURITY_MARKER, UNIQUE_BLOCK_SIZE, UNIQUE_CONDITIONAL_FIELDS, VERSION_MARKER,
    VERSION_MARKER_FIELD, VERSION_NUMBER,
};
use crate::model::{JulianDay, SegmentConditional, SegmentRecord, UniqueConditional};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one leg.
///
/// For the first leg, also returns the unique conditional items found at the
/// start of its variable block.
pub fn decode_segment(
    reader: &mut Reader<'_>,
    first: bool,
) -> Result<(SegmentRecord, Option<UniqueConditional>), DecodeError> {
    let operating_carrier_pnr = reader.read_text(OPERATING_CARRIER_PNR)?;
    let from_airport = reader.read_text(FROM_AIRPORT)?;
    let to_airport = reader.read_text(TO_AIRPORT)?;
    let operating_carrier = reader.read_text(OPERATING_CARRIER)?;
    let flight_number = reader.read_text(FLIGHT_NUMBER)?;

    let date_offset = reader.position();
    let day = reader.read_numeric(DATE_OF_FLIGHT)?;
    let date_of_flight = u16::try_from(day)
        .ok()
        .and_then(JulianDay::new)
        .ok_or_else(|| DecodeError::MalformedField {
            field: DATE_OF_FLIGHT.name,
            offset: date_offset,
            found: format!("{:03}", day),
        })?;

    let compartment_code = reader.read_char(COMPARTMENT_CODE)?;
    let seat_number = reader.read_text(SEAT_NUMBER)?;
    let check_in_sequence = reader.read_text(CHECK_IN_SEQUENCE)?;
    let passenger_status = reader.read_char(PASSENGER_STATUS)?;

    let block_len = reader.read_hex(SEGMENT_BLOCK_SIZE)?;
    let mut block = reader.sub_reader(block_len, "segment_block")?;

    let unique = if first && !block.is_empty() {
        Some(decode_unique(&mut block)?)
    } else {
        None
    };
    let conditional = if block.is_empty() {
        None
    } else {
        Some(decode_repeated(&mut block)?)
    };
    let airline_use = block.read_rest().to_string();

    let segment = SegmentRecord {
        operating_carrier_pnr,
        from_airport,
        to_airport,
        operating_carrier,
        flight_number,
        date_of_flight,
        compartment_code,
        seat_number,
        check_in_sequence,
        passenger_status,
        conditional,
        airline_use,
    };
    Ok((segment, unique))
}

fn decode_unique(block: &mut Reader<'_>) -> Result<UniqueConditional, DecodeError> {
    let marker_offset = block.position();
    let marker = block.read_char(VERSION_MARKER_FIELD)?;
    if marker != VERSION_MARKER {
        return Err(DecodeError::MalformedField {
            field: VERSION_MARKER_FIELD.name,
            offset: marker_offset,
            found: marker.to_string(),
        });
    }
    let version_number = block.read_char(VERSION_NUMBER)?;

    let len = block.read_hex(UNIQUE_BLOCK_SIZE)?;
    let mut unique_block = block.sub_reader(len, "unique_block")?;
    let (items, extra) = read_items(&mut unique_block, &UNIQUE_CONDITIONAL_FIELDS)?;
    Ok(UniqueConditional::from_items(version_number, items, extra))
}

fn decode_repeated(block: &mut Reader<'_>) -> Result<SegmentConditional, DecodeError> {
    let len = block.read_hex(REPEATED_BLOCK_SIZE)?;
    let mut repeated_block = block.sub_reader(len, "repeated_block")?;
    let (items, extra) = read_items(&mut repeated_block, &SEGMENT_CONDITIONAL_FIELDS)?;
    Ok(SegmentConditional::from_items(items, extra))
}

/// Reads items in order while each one fits entirely in the block.
///
/// Whatever is left, including a partial item, is returned verbatim.
fn read_items<const N: usize>(
    block: &mut Reader<'_>,
    specs: &[FieldSpec; N],
) -> Result<([Option<String>; N], String), DecodeError> {
    let mut items: [Option<String>; N] = std::array::from_fn(|_| None);
    for (slot, spec) in items.iter_mut().zip(specs) {
        if block.remaining_len() < spec.width {
            break;
        }
        *slot = Some(block.read_text(*spec)?);
    }
    let extra = block.read_rest().to_string();
    Ok((items, extra))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes one leg.
///
/// `unique` is only meaningful for the first leg; the caller passes `None`
/// for every other leg.
pub fn encode_segment(
    writer: &mut Writer,
    segment: &SegmentRecord,
    unique: Option<&UniqueConditional>,
    first: bool,
) -> Result<(), EncodeError> {
    // A later leg opening with '^' would decode as the start of security data.
    if !first && segment.operating_carrier_pnr.starts_with(SECURITY_MARKER) {
        return Err(EncodeError::InvalidCharacterSet {
            field: OPERATING_CARRIER_PNR.name,
            found: SECURITY_MARKER,
        });
    }
    writer.write_text(OPERATING_CARRIER_PNR, &segment.operating_carrier_pnr)?;
    writer.write_text(FROM_AIRPORT, &segment.from_airport)?;
    writer.write_text(TO_AIRPORT, &segment.to_airport)?;
    writer.write_text(OPERATING_CARRIER, &segment.operating_carrier)?;
    writer.write_text(FLIGHT_NUMBER, &segment.flight_number)?;
    writer.write_numeric(DATE_OF_FLIGHT, u32::from(segment.date_of_flight.get()))?;
    writer.write_char(COMPARTMENT_CODE, segment.compartment_code)?;
    writer.write_text(SEAT_NUMBER, &segment.seat_number)?;
    writer.write_text(CHECK_IN_SEQUENCE, &segment.check_in_sequence)?;
    writer.write_char(PASSENGER_STATUS, segment.passenger_status)?;

    let mut block = Writer::new();
    match unique {
        Some(unique) => encode_unique(&mut block, unique)?,
        // The decoder expects the version marker first on leg one.
        None if first && segment.conditional.is_some() => {
            return Err(EncodeError::MisplacedField {
                field: "segments[0].conditional",
            });
        }
        None => {}
    }
    match &segment.conditional {
        Some(conditional) => encode_repeated(&mut block, conditional)?,
        None if !segment.airline_use.is_empty() => {
            return Err(EncodeError::MisplacedField { field: "airline_use" });
        }
        None => {}
    }
    block.write_raw("airline_use", &segment.airline_use)?;

    writer.write_block(SEGMENT_BLOCK_SIZE, &block)
}

fn encode_unique(block: &mut Writer, unique: &UniqueConditional) -> Result<(), EncodeError> {
    block.write_char(VERSION_MARKER_FIELD, VERSION_MARKER)?;
    block.write_char(VERSION_NUMBER, unique.version_number)?;

    let mut unique_block = Writer::new();
    write_items(
        &mut unique_block,
        &UNIQUE_CONDITIONAL_FIELDS,
        &unique.items(),
        &unique.extra,
        "unique_conditional.extra",
    )?;
    block.write_block(UNIQUE_BLOCK_SIZE, &unique_block)
}

fn encode_repeated(block: &mut Writer, conditional: &SegmentConditional) -> Result<(), EncodeError> {
    let mut repeated_block = Writer::new();
    write_items(
        &mut repeated_block,
        &SEGMENT_CONDITIONAL_FIELDS,
        &conditional.items(),
        &conditional.extra,
        "conditional.extra",
    )?;
    block.write_block(REPEATED_BLOCK_SIZE, &repeated_block)
}

/// Writes the present items followed by the opaque remainder.
///
/// Present items must form a prefix of the declared order, and the remainder
/// must be shorter than the first absent item; otherwise the decoder would
/// read the bytes back as a different item.
fn write_items(
    block: &mut Writer,
    specs: &[FieldSpec],
    items: &[Option<&str>],
    extra: &str,
    extra_field: &'static str,
) -> Result<(), EncodeError> {
    let mut first_absent: Option<FieldSpec> = None;
    for (spec, item) in specs.iter().zip(items) {
        match (item, first_absent) {
            (Some(value), None) => block.write_text(*spec, value)?,
            (Some(_), Some(_)) => return Err(EncodeError::MisplacedField { field: spec.name }),
            (None, None) => first_absent = Some(*spec),
            (None, Some(_)) => {}
        }
    }
    if let Some(absent) = first_absent {
        if extra.len() >= absent.width {
            return Err(EncodeError::MisplacedField { field: extra_field });
        }
    }
    block.write_raw(extra_field, extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_segment() -> SegmentRecord {
        SegmentRecord {
            operating_carrier_pnr: "DEF456".to_string(),
            from_airport: "FRA".to_string(),
            to_airport: "GVA".to_string(),
            operating_carrier: "LH".to_string(),
            flight_number: "3664".to_string(),
            date_of_flight: JulianDay::new(327).unwrap(),
            compartment_code: 'C',
            seat_number: "012C".to_string(),
            check_in_sequence: "0002".to_string(),
            passenger_status: '1',
            conditional: None,
            airline_use: String::new(),
        }
    }

    #[test]
    fn test_bare_segment_layout() {
        let mut writer = Writer::new();
        encode_segment(&mut writer, &make_segment(), None, false).unwrap();
        assert_eq!(writer.as_str(), "DEF456 FRAGVALH 3664 327C012C0002 100");

        let mut reader = Reader::new(writer.as_str());
        let (decoded, unique) = decode_segment(&mut reader, false).unwrap();
        assert_eq!(decoded, make_segment());
        assert!(unique.is_none());
        assert!(reader.is_empty());
    }

    #[test]
    fn test_repeated_conditional_with_airline_use() {
        let mut segment = make_segment();
        segment.conditional = Some(SegmentConditional {
            airline_numeric_code: Some("220".to_string()),
            document_serial_number: Some("2345678901".to_string()),
            ..Default::default()
        });
        segment.airline_use = "X".to_string();

        let mut writer = Writer::new();
        encode_segment(&mut writer, &segment, None, false).unwrap();
        assert_eq!(&writer.as_str()[35..], "100D2202345678901X");

        let mut reader = Reader::new(writer.as_str());
        let (decoded, _) = decode_segment(&mut reader, false).unwrap();
        assert_eq!(decoded, segment);
    }

    #[test]
    fn test_partial_item_kept_as_extra() {
        // Repeated block of 5: airline numeric code (3) and two bytes that
        // do not fill the 10-byte document serial number.
        let input = "DEF456 FRAGVALH 3664 327C012C0002 10705220AB";
        let mut reader = Reader::new(input);
        let (decoded, _) = decode_segment(&mut reader, false).unwrap();

        let conditional = decoded.conditional.clone().unwrap();
        assert_eq!(conditional.airline_numeric_code.as_deref(), Some("220"));
        assert_eq!(conditional.document_serial_number, None);
        assert_eq!(conditional.extra, "AB");
        assert_eq!(decoded.airline_use, "");

        let mut writer = Writer::new();
        encode_segment(&mut writer, &decoded, None, false).unwrap();
        assert_eq!(writer.as_str(), input);
    }

    #[test]
    fn test_first_leg_requires_version_marker() {
        let input = "DEF456 FRAGVALH 3664 327C012C0002 102XY";
        let mut reader = Reader::new(input);
        let result = decode_segment(&mut reader, true);
        assert_eq!(
            result,
            Err(DecodeError::MalformedField {
                field: "version_marker",
                offset: 37,
                found: "X".to_string(),
            })
        );
    }

    #[test]
    fn test_block_size_past_end_of_input() {
        let input = "DEF456 FRAGVALH 3664 327C012C0002 10AXY";
        let mut reader = Reader::new(input);
        let result = decode_segment(&mut reader, false);
        assert_eq!(
            result,
            Err(DecodeError::TruncatedInput {
                field: "segment_block",
                offset: 37,
                needed: 10,
                available: 2,
            })
        );
    }

    #[test]
    fn test_julian_day_out_of_range() {
        let input = "DEF456 FRAGVALH 3664 367C012C0002 100";
        let mut reader = Reader::new(input);
        let result = decode_segment(&mut reader, false);
        assert!(matches!(
            result,
            Err(DecodeError::MalformedField { field: "date_of_flight", offset: 21, .. })
        ));
    }

    #[test]
    fn test_gap_in_items_rejected() {
        let mut segment = make_segment();
        segment.conditional = Some(SegmentConditional {
            airline_numeric_code: Some("220".to_string()),
            selectee_indicator: Some("0".to_string()),
            ..Default::default()
        });

        let mut writer = Writer::new();
        let result = encode_segment(&mut writer, &segment, None, false);
        assert_eq!(
            result,
            Err(EncodeError::MisplacedField { field: "selectee_indicator" })
        );
    }

    #[test]
    fn test_extra_that_would_decode_as_item_rejected() {
        let mut segment = make_segment();
        segment.conditional = Some(SegmentConditional {
            airline_numeric_code: Some("220".to_string()),
            extra: "0123456789".to_string(),
            ..Default::default()
        });

        let mut writer = Writer::new();
        let result = encode_segment(&mut writer, &segment, None, false);
        assert_eq!(
            result,
            Err(EncodeError::MisplacedField { field: "conditional.extra" })
        );
    }

    #[test]
    fn test_airline_use_requires_conditional() {
        let mut segment = make_segment();
        segment.airline_use = "X".to_string();

        let mut writer = Writer::new();
        let result = encode_segment(&mut writer, &segment, None, false);
        assert_eq!(result, Err(EncodeError::MisplacedField { field: "airline_use" }));
    }

    #[test]
    fn test_first_leg_conditional_requires_unique() {
        let mut segment = make_segment();
        segment.conditional = Some(SegmentConditional::default());

        let mut writer = Writer::new();
        let result = encode_segment(&mut writer, &segment, None, true);
        assert_eq!(
            result,
            Err(EncodeError::MisplacedField { field: "segments[0].conditional" })
        );
    }

    #[test]
    fn test_later_leg_pnr_cannot_open_with_security_marker() {
        let mut segment = make_segment();
        segment.operating_carrier_pnr = "^BC123".to_string();

        let mut writer = Writer::new();
        let result = encode_segment(&mut writer, &segment, None, false);
        assert_eq!(
            result,
            Err(EncodeError::InvalidCharacterSet {
                field: "operating_carrier_pnr",
                found: '^',
            })
        );

        // The first leg follows the header, so the marker is unambiguous there.
        let mut writer = Writer::new();
        assert!(encode_segment(&mut writer, &segment, None, true).is_ok());
    }
}
