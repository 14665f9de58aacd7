//! Pass encoding/decoding.
//!
//! A payload is the header (format code, leg count, passenger name,
//! electronic ticket indicator), then one block per leg, then optional
//! security data running to the end of the payload.

use crate::codec::primitives::{Reader, Writer, find_unprintable};
use crate::codec::segment::{decode_segment, encode_segment};
use crate::error::{DecodeError, EncodeError};
use crate::layout::{
    ELECTRONIC_TICKET_INDICATOR, FORMAT_CODE, FORMAT_CODE_M, LEG_COUNT, MAX_LEGS,
    MIN_PAYLOAD_LEN, PASSENGER_NAME, SECURITY_MARKER,
};
use crate::model::{BoardingPassRecord, PassengerName};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a boarding pass from its barcode payload.
///
/// Decoding is all-or-nothing: any structural problem returns an error and
/// no partial record.
pub fn decode_pass(input: &str) -> Result<BoardingPassRecord, DecodeError> {
    if let Some((offset, byte)) = find_unprintable(input) {
        return Err(DecodeError::MalformedField {
            field: "payload",
            offset,
            found: format!("{:#04x}", byte),
        });
    }
    if input.len() < MIN_PAYLOAD_LEN {
        return Err(DecodeError::TruncatedInput {
            field: "payload",
            offset: input.len(),
            needed: MIN_PAYLOAD_LEN,
            available: input.len(),
        });
    }

    let mut reader = Reader::new(input);

    let format_code = reader.read_char(FORMAT_CODE)?;
    if format_code != FORMAT_CODE_M {
        return Err(DecodeError::UnsupportedFormat { found: format_code });
    }

    let leg_offset = reader.position();
    let legs = reader.read_numeric(LEG_COUNT)?;
    let leg_count = u8::try_from(legs)
        .ok()
        .filter(|n| (1..=MAX_LEGS).contains(n))
        .ok_or_else(|| DecodeError::MalformedField {
            field: LEG_COUNT.name,
            offset: leg_offset,
            found: legs.to_string(),
        })?;

    let name_offset = reader.position();
    let raw_name = reader.read_text(PASSENGER_NAME)?;
    let passenger_name =
        PassengerName::parse(&raw_name).ok_or_else(|| DecodeError::MalformedField {
            field: PASSENGER_NAME.name,
            offset: name_offset,
            found: raw_name.clone(),
        })?;

    let electronic_ticket_indicator = reader.read_char(ELECTRONIC_TICKET_INDICATOR)?;

    let mut segments = Vec::with_capacity(usize::from(leg_count));
    let mut unique_conditional = None;
    for index in 0..usize::from(leg_count) {
        // Running out of legs is a count mismatch rather than truncation
        // when the input stops cleanly between legs.
        if index > 0 && (reader.is_empty() || reader.peek_char() == Some(SECURITY_MARKER)) {
            return Err(DecodeError::LegCountMismatch {
                declared: leg_count,
                parsed: index,
            });
        }
        let (segment, unique) = decode_segment(&mut reader, index == 0)?;
        if index == 0 {
            unique_conditional = unique;
        }
        segments.push(segment);
    }

    let rest = reader.read_rest();
    let security_data = (!rest.is_empty()).then(|| rest.to_string());

    Ok(BoardingPassRecord {
        format_code,
        leg_count,
        passenger_name,
        electronic_ticket_indicator,
        unique_conditional,
        segments,
        security_data,
    })
}

// =============================================================================
// ENCODING
// =============================================================================

fn validate_pass_inputs(record: &BoardingPassRecord) -> Result<(), EncodeError> {
    if record.format_code != FORMAT_CODE_M {
        return Err(EncodeError::UnsupportedFormat {
            found: record.format_code,
        });
    }
    let declared = record.leg_count;
    if declared == 0 || declared > MAX_LEGS || usize::from(declared) != record.segments.len() {
        return Err(EncodeError::InvalidLegCount {
            declared,
            segments: record.segments.len(),
        });
    }
    Ok(())
}

/// Joins the name parts as `LAST/FIRST`, upper-cased.
fn encode_name(name: &PassengerName) -> Result<String, EncodeError> {
    // The decoder splits on the first '/', so the last name cannot hold one.
    if name.last.contains('/') {
        return Err(EncodeError::InvalidCharacterSet {
            field: "passenger_name.last",
            found: '/',
        });
    }
    Ok(format!("{}/{}", name.last, name.first).to_ascii_uppercase())
}

/// Encodes a boarding pass into its barcode payload.
///
/// Values longer than their field are rejected, never truncated. Shorter
/// values are padded according to the field's fill rule.
pub fn encode_pass(record: &BoardingPassRecord) -> Result<String, EncodeError> {
    validate_pass_inputs(record)?;

    let mut writer = Writer::with_capacity(MIN_PAYLOAD_LEN * record.segments.len());

    writer.write_char(FORMAT_CODE, record.format_code)?;
    writer.write_numeric(LEG_COUNT, u32::from(record.leg_count))?;
    writer.write_text(PASSENGER_NAME, &encode_name(&record.passenger_name)?)?;
    writer.write_char(ELECTRONIC_TICKET_INDICATOR, record.electronic_ticket_indicator)?;

    for (index, segment) in record.segments.iter().enumerate() {
        let first = index == 0;
        let unique = if first {
            record.unique_conditional.as_ref()
        } else {
            None
        };
        encode_segment(&mut writer, segment, unique, first)?;
    }

    if let Some(security_data) = &record.security_data {
        // Decode yields `None` for a payload that ends after the last leg.
        if security_data.is_empty() {
            return Err(EncodeError::EmptyField {
                field: "security_data",
            });
        }
        writer.write_raw("security_data", security_data)?;
    }

    Ok(writer.into_string())
}
