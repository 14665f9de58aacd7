//! Semantic validation for boarding pass records.
//!
//! Structural validation happens in the codec: decode rejects payloads that
//! do not follow the layout, encode rejects values that do not fit it. The
//! checks here are advisory and look at what the values mean: airport and
//! carrier codes, flight numbers, and values that would not survive a round
//! trip through the wire format.

use crate::codec::encode_pass;
use crate::error::ValidationError;
use crate::layout::{SEGMENT_CONDITIONAL_FIELDS, UNIQUE_CONDITIONAL_FIELDS};
use crate::model::{BoardingPassRecord, SegmentRecord};

/// Validates a record.
///
/// Checks, in order:
/// - the passenger last name is non-empty and the name is upper-case
/// - booking references are upper-case alphanumeric
/// - airport codes are three upper-case letters
/// - carrier designators are two or three upper-case alphanumerics
/// - flight numbers are 1-4 digits with an optional letter suffix
/// - compartment codes are upper-case letters
/// - no space-padded value carries trailing spaces
/// - the record encodes (see [`encode_pass`])
pub fn validate_pass(record: &BoardingPassRecord) -> Result<(), ValidationError> {
    if record.passenger_name.last.trim().is_empty() {
        return Err(ValidationError::EmptyLastName);
    }
    let name = record.passenger_name.to_string();
    if name.bytes().any(|b| b.is_ascii_lowercase()) {
        return Err(ValidationError::LowercaseName { value: name });
    }
    check_trailing("passenger_name", &record.passenger_name.first)?;

    if let Some(unique) = &record.unique_conditional {
        for (spec, item) in UNIQUE_CONDITIONAL_FIELDS.iter().zip(unique.items()) {
            if let Some(value) = item {
                check_trailing(spec.name, value)?;
            }
        }
    }

    for (index, segment) in record.segments.iter().enumerate() {
        validate_segment(index, segment)?;
    }

    encode_pass(record)?;
    Ok(())
}

fn validate_segment(index: usize, segment: &SegmentRecord) -> Result<(), ValidationError> {
    if !is_pnr(&segment.operating_carrier_pnr) {
        return Err(ValidationError::InvalidPnr {
            segment: index,
            value: segment.operating_carrier_pnr.clone(),
        });
    }

    for (field, value) in [
        ("from_airport", &segment.from_airport),
        ("to_airport", &segment.to_airport),
    ] {
        if !is_airport_code(value) {
            return Err(ValidationError::InvalidAirportCode {
                segment: index,
                field,
                value: value.clone(),
            });
        }
    }

    check_carrier(index, "operating_carrier", &segment.operating_carrier)?;

    if !is_flight_number(&segment.flight_number) {
        return Err(ValidationError::InvalidFlightNumber {
            segment: index,
            value: segment.flight_number.clone(),
        });
    }

    if !segment.compartment_code.is_ascii_uppercase() {
        return Err(ValidationError::InvalidCompartment {
            segment: index,
            value: segment.compartment_code,
        });
    }

    check_trailing("seat_number", &segment.seat_number)?;
    check_trailing("check_in_sequence", &segment.check_in_sequence)?;

    if let Some(conditional) = &segment.conditional {
        if let Some(carrier) = conditional.marketing_carrier.as_deref().filter(|c| !c.is_empty()) {
            check_carrier(index, "marketing_carrier", carrier)?;
        }
        if let Some(carrier) = conditional
            .frequent_flyer_airline
            .as_deref()
            .filter(|c| !c.is_empty())
        {
            check_carrier(index, "frequent_flyer_airline", carrier)?;
        }
        for (spec, item) in SEGMENT_CONDITIONAL_FIELDS.iter().zip(conditional.items()) {
            if let Some(value) = item {
                check_trailing(spec.name, value)?;
            }
        }
    }

    Ok(())
}

fn check_carrier(index: usize, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_carrier(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCarrier {
            segment: index,
            field,
            value: value.to_string(),
        })
    }
}

fn check_trailing(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.ends_with(' ') {
        return Err(ValidationError::TrailingSpaces {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn is_pnr(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn is_airport_code(value: &str) -> bool {
    value.len() == 3 && value.bytes().all(|b| b.is_ascii_uppercase())
}

fn is_carrier(value: &str) -> bool {
    (2..=3).contains(&value.len())
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn is_flight_number(value: &str) -> bool {
    let digits = value.bytes().take_while(u8::is_ascii_digit).count();
    let suffix = &value.as_bytes()[digits..];
    (1..=4).contains(&digits)
        && match suffix {
            [] => true,
            [letter] => letter.is_ascii_uppercase(),
            _ => false,
        }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EncodeError;
    use crate::model::{PassBuilder, SegmentConditional, UniqueConditional};

    fn make_pass() -> BoardingPassRecord {
        PassBuilder::new("DOE", "JOHN")
            .electronic_ticket('E')
            .segment(|s| {
                s.pnr("ABC123")
                    .route("JFK", "LAX")
                    .flight("AA", "0100")
                    .date_of_flight(45)
                    .compartment('Y')
                    .seat("012C")
                    .check_in_sequence("0025")
                    .passenger_status('1')
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(validate_pass(&make_pass()), Ok(()));
    }

    #[test]
    fn test_validate_empty_last_name() {
        let mut pass = make_pass();
        pass.passenger_name.last = String::new();
        assert_eq!(validate_pass(&pass), Err(ValidationError::EmptyLastName));
    }

    #[test]
    fn test_validate_lowercase_name() {
        let mut pass = make_pass();
        pass.passenger_name.first = "John".to_string();
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::LowercaseName {
                value: "DOE/John".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_pnr() {
        let mut pass = make_pass();
        pass.segments.push(pass.segments[0].clone());
        pass.leg_count = 2;
        assert_eq!(validate_pass(&pass), Ok(()));

        pass.segments[1].operating_carrier_pnr = "^BC123".to_string();
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::InvalidPnr {
                segment: 1,
                value: "^BC123".to_string(),
            })
        );

        pass.segments[1].operating_carrier_pnr = "ABC 12".to_string();
        assert!(matches!(
            validate_pass(&pass),
            Err(ValidationError::InvalidPnr { segment: 1, .. })
        ));
    }

    #[test]
    fn test_validate_empty_security_data() {
        let mut pass = make_pass();
        pass.security_data = Some(String::new());
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::NotEncodable(EncodeError::EmptyField {
                field: "security_data",
            }))
        );
    }

    #[test]
    fn test_validate_airport_code() {
        let mut pass = make_pass();
        pass.segments[0].to_airport = "la1".to_string();
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::InvalidAirportCode {
                segment: 0,
                field: "to_airport",
                value: "la1".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_carrier() {
        let mut pass = make_pass();
        pass.segments[0].operating_carrier = "A".to_string();
        assert!(matches!(
            validate_pass(&pass),
            Err(ValidationError::InvalidCarrier { field: "operating_carrier", .. })
        ));

        let mut pass = make_pass();
        pass.unique_conditional = Some(UniqueConditional::new('6'));
        pass.segments[0].conditional = Some(SegmentConditional {
            airline_numeric_code: Some("001".to_string()),
            document_serial_number: Some("1234567890".to_string()),
            selectee_indicator: Some("0".to_string()),
            international_document_verification: Some(" ".to_string()),
            marketing_carrier: Some("A-".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            validate_pass(&pass),
            Err(ValidationError::InvalidCarrier { field: "marketing_carrier", .. })
        ));
    }

    #[test]
    fn test_validate_flight_number() {
        for good in ["1", "0100", "834A", "1234"] {
            assert!(is_flight_number(good), "{good}");
        }
        for bad in ["", "12345", "A100", "10AB", "01 0"] {
            assert!(!is_flight_number(bad), "{bad}");
        }

        let mut pass = make_pass();
        pass.segments[0].flight_number = "X1".to_string();
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::InvalidFlightNumber {
                segment: 0,
                value: "X1".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_compartment() {
        let mut pass = make_pass();
        pass.segments[0].compartment_code = 'y';
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::InvalidCompartment {
                segment: 0,
                value: 'y',
            })
        );
    }

    #[test]
    fn test_validate_trailing_spaces() {
        let mut pass = make_pass();
        pass.segments[0].seat_number = "12C ".to_string();
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::TrailingSpaces {
                field: "seat_number",
                value: "12C ".to_string(),
            })
        );

        let mut pass = make_pass();
        pass.passenger_name.first = "JOHN ".to_string();
        assert!(matches!(
            validate_pass(&pass),
            Err(ValidationError::TrailingSpaces { field: "passenger_name", .. })
        ));

        let mut unique = UniqueConditional::new('6');
        unique.passenger_description = Some(" ".to_string());
        let mut pass = make_pass();
        pass.unique_conditional = Some(unique);
        assert!(matches!(
            validate_pass(&pass),
            Err(ValidationError::TrailingSpaces { .. })
        ));
    }

    #[test]
    fn test_validate_not_encodable() {
        let mut pass = make_pass();
        pass.segments[0].airline_use = "XYZ".to_string();
        assert_eq!(
            validate_pass(&pass),
            Err(ValidationError::NotEncodable(EncodeError::MisplacedField {
                field: "airline_use",
            }))
        );

        let mut pass = make_pass();
        pass.leg_count = 2;
        assert!(matches!(
            validate_pass(&pass),
            Err(ValidationError::NotEncodable(EncodeError::InvalidLegCount { .. }))
        ));
    }
}
