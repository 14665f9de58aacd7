//! Command handlers

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use bcbp::{
    decode_pass, encode_pass, resolve_issue_date, resolve_julian_date, validate_pass,
    BoardingPassRecord, CalendarDate, SegmentRecord,
};

/// Reads a payload from the argument, or from stdin when absent.
///
/// Only line terminators are stripped; trailing spaces are part of the payload.
fn read_payload(payload: Option<String>) -> Result<String> {
    let raw = match payload {
        Some(payload) => payload,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        }
    };
    Ok(raw.trim_end_matches(['\r', '\n']).to_string())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn decode_payload(raw: &str) -> Result<BoardingPassRecord> {
    tracing::debug!(len = raw.len(), "decoding payload");
    let pass = decode_pass(raw).context("Failed to decode boarding pass")?;
    tracing::info!(legs = pass.leg_count, "decoded boarding pass");
    Ok(pass)
}

fn today() -> Result<CalendarDate> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?;
    Ok(CalendarDate::from_unix_days((elapsed.as_secs() / 86_400) as i64))
}

/// Handle `decode` command
pub fn decode(payload: Option<String>, pretty: bool) -> Result<()> {
    let pass = decode_payload(&read_payload(payload)?)?;
    let json = if pretty {
        serde_json::to_string_pretty(&pass)
    } else {
        serde_json::to_string(&pass)
    }
    .context("Failed to serialize record")?;
    println!("{}", json);
    Ok(())
}

/// Handle `encode` command
pub fn encode(input: Option<&Path>) -> Result<()> {
    let json = read_input(input)?;
    let pass: BoardingPassRecord =
        serde_json::from_str(&json).context("Failed to parse JSON record")?;
    let raw = encode_pass(&pass).context("Failed to encode boarding pass")?;
    tracing::info!(len = raw.len(), legs = pass.leg_count, "encoded boarding pass");
    println!("{}", raw);
    Ok(())
}

/// Handle `inspect` command
pub fn inspect(payload: Option<String>, reference_date: Option<CalendarDate>) -> Result<()> {
    let pass = decode_payload(&read_payload(payload)?)?;
    let reference = match reference_date {
        Some(date) => date,
        None => today()?,
    };
    tracing::debug!(%reference, "resolving dates");
    let summary = render_summary(&pass, reference).context("Failed to render summary")?;
    print!("{}", summary);
    Ok(())
}

/// Handle `validate` command
pub fn validate(payload: Option<String>) -> Result<()> {
    let pass = decode_payload(&read_payload(payload)?)?;
    if let Err(e) = validate_pass(&pass) {
        tracing::warn!(error = %e, "validation failed");
        bail!("Boarding pass is not valid: {}", e);
    }
    println!("OK");
    Ok(())
}

/// Renders the human-readable summary printed by `inspect`.
fn render_summary(pass: &BoardingPassRecord, reference: CalendarDate) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Passenger: {}", pass.passenger_name)?;
    writeln!(
        out,
        "E-ticket:  {}",
        if pass.is_electronic_ticket() { "yes" } else { "no" }
    )?;
    writeln!(out, "Legs:      {}", pass.leg_count)?;

    if let Some(unique) = &pass.unique_conditional {
        writeln!(out, "Version:   {}", unique.version_number)?;
        if let Some(raw) = unique.date_of_issue.as_deref().filter(|d| !d.is_empty()) {
            match resolve_issue_date(raw, reference) {
                Some(date) => writeln!(out, "Issued:    {} ({})", date, raw)?,
                None => writeln!(out, "Issued:    {}", raw)?,
            }
        }
        if let Some(tag) = unique.baggage_tag.as_deref().filter(|t| !t.is_empty()) {
            writeln!(out, "Bag tag:   {}", tag)?;
        }
    }

    for (i, segment) in pass.segments.iter().enumerate() {
        render_segment(&mut out, i, segment, reference)?;
    }

    match (pass.security_block(), pass.security_data.as_deref()) {
        (Some(block), _) => writeln!(
            out,
            "Security:  type {}, {} bytes",
            block.security_type,
            block.data.len()
        )?,
        (None, Some(raw)) => writeln!(out, "Security:  {} bytes (unstructured)", raw.len())?,
        (None, None) => {}
    }

    Ok(out)
}

fn render_segment(
    out: &mut String,
    index: usize,
    segment: &SegmentRecord,
    reference: CalendarDate,
) -> fmt::Result {
    let date = match resolve_julian_date(segment.date_of_flight, reference) {
        Some(date) => format!("{} (day {})", date, segment.date_of_flight),
        None => format!("day {}", segment.date_of_flight),
    };
    writeln!(
        out,
        "Leg {}: {} -> {}  {} {}  {}",
        index + 1,
        segment.from_airport,
        segment.to_airport,
        segment.operating_carrier,
        segment.flight_number_display(),
        date
    )?;
    let seat = if segment.is_seat_assigned() {
        segment.seat_display()
    } else {
        "unassigned".to_string()
    };
    writeln!(
        out,
        "  PNR: {}  Cabin: {} ({})  Seat: {}  Seq: {}  Status: {}",
        segment.operating_carrier_pnr,
        segment.cabin(),
        segment.compartment_code,
        seat,
        segment.check_in_sequence,
        segment.passenger_status
    )?;
    if let Some(conditional) = &segment.conditional {
        if let Some(ticket) = conditional.ticket_number() {
            writeln!(out, "  Ticket: {}", ticket)?;
        }
        if let Some((airline, number)) = conditional.frequent_flyer() {
            writeln!(out, "  Frequent flyer: {} {}", airline, number)?;
        }
    }
    if !segment.airline_use.is_empty() {
        writeln!(out, "  Airline use: {:?}", segment.airline_use)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JFK_LAX: &str = "M1DOE/JOHN            EABC123 JFKLAXAA 0100 045Y012C0025 100";

    #[test]
    fn test_read_payload_keeps_trailing_spaces() {
        let raw = read_payload(Some("M1DOE  \r\n".to_string())).unwrap();
        assert_eq!(raw, "M1DOE  ");
    }

    #[test]
    fn test_render_summary() {
        let pass = decode_pass(JFK_LAX).unwrap();
        let reference = CalendarDate::new(2024, 3, 15).unwrap();
        let summary = render_summary(&pass, reference).unwrap();

        assert!(summary.contains("Passenger: DOE/JOHN"));
        assert!(summary.contains("E-ticket:  yes"));
        assert!(summary.contains("Leg 1: JFK -> LAX  AA 100  2024-02-14 (day 045)"));
        assert!(summary.contains("Cabin: Economy (Y)"));
        assert!(summary.contains("Seat: 12C"));
        assert!(!summary.contains("Security"));
    }

    #[test]
    fn test_render_summary_unresolvable_date() {
        let mut pass = decode_pass(JFK_LAX).unwrap();
        pass.segments[0].date_of_flight = bcbp::JulianDay::new(366).unwrap();
        pass.security_data = Some("^1ZZ".to_string());
        let reference = CalendarDate::new(2026, 6, 1).unwrap();
        let summary = render_summary(&pass, reference).unwrap();

        assert!(summary.contains("AA 100  day 366"));
        assert!(summary.contains("Security:  4 bytes (unstructured)"));
    }
}
