//! Builder API for ergonomic record construction.
//!
//! # Example
//!
//! ```rust
//! use bcbp::model::builder::PassBuilder;
//! use bcbp::encode_pass;
//!
//! let pass = PassBuilder::new("DOE", "JOHN")
//!     .electronic_ticket('E')
//!     .segment(|s| s
//!         .pnr("ABC123")
//!         .route("JFK", "LAX")
//!         .flight("AA", "0100")
//!         .date_of_flight(45)
//!         .compartment('Y')
//!         .seat("012C")
//!         .check_in_sequence("0025")
//!         .passenger_status('1')
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(pass.leg_count, 1);
//! assert_eq!(encode_pass(&pass).unwrap().len(), 60);
//! ```

use crate::layout::FORMAT_CODE_M;
use crate::model::{
    BoardingPassRecord, InvalidJulianDay, JulianDay, PassengerName, SegmentConditional,
    SegmentRecord, UniqueConditional,
};

/// Builder for constructing a [`BoardingPassRecord`].
#[derive(Debug, Clone)]
pub struct PassBuilder {
    passenger_name: PassengerName,
    electronic_ticket_indicator: char,
    unique_conditional: Option<UniqueConditional>,
    segments: Vec<SegmentBuilder>,
    security_data: Option<String>,
}

impl PassBuilder {
    /// Creates a new PassBuilder for the given passenger.
    pub fn new(last: impl Into<String>, first: impl Into<String>) -> Self {
        Self {
            passenger_name: PassengerName::new(last, first),
            electronic_ticket_indicator: ' ',
            unique_conditional: None,
            segments: Vec::new(),
            security_data: None,
        }
    }

    /// Sets the electronic ticket indicator.
    pub fn electronic_ticket(mut self, indicator: char) -> Self {
        self.electronic_ticket_indicator = indicator;
        self
    }

    /// Sets the items carried once per pass.
    pub fn unique_conditional(mut self, unique: UniqueConditional) -> Self {
        self.unique_conditional = Some(unique);
        self
    }

    /// Sets the opaque security data.
    pub fn security_data(mut self, data: impl Into<String>) -> Self {
        self.security_data = Some(data.into());
        self
    }

    /// Adds a leg using a builder function.
    pub fn segment<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SegmentBuilder) -> SegmentBuilder,
    {
        self.segments.push(f(SegmentBuilder::new()));
        self
    }

    /// Builds the record, deriving `leg_count` from the legs added.
    ///
    /// Fails only if a leg's date of flight is outside 1-366. Width and
    /// character checks happen at encode time.
    pub fn build(self) -> Result<BoardingPassRecord, InvalidJulianDay> {
        let segments = self
            .segments
            .into_iter()
            .map(SegmentBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BoardingPassRecord {
            format_code: FORMAT_CODE_M,
            leg_count: u8::try_from(segments.len()).unwrap_or(u8::MAX),
            passenger_name: self.passenger_name,
            electronic_ticket_indicator: self.electronic_ticket_indicator,
            unique_conditional: self.unique_conditional,
            segments,
            security_data: self.security_data,
        })
    }
}

/// Builder for a single leg.
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    operating_carrier_pnr: String,
    from_airport: String,
    to_airport: String,
    operating_carrier: String,
    flight_number: String,
    date_of_flight: u16,
    compartment_code: char,
    seat_number: String,
    check_in_sequence: String,
    passenger_status: char,
    conditional: Option<SegmentConditional>,
    airline_use: String,
}

impl SegmentBuilder {
    fn new() -> Self {
        Self {
            operating_carrier_pnr: String::new(),
            from_airport: String::new(),
            to_airport: String::new(),
            operating_carrier: String::new(),
            flight_number: String::new(),
            date_of_flight: 1,
            compartment_code: ' ',
            seat_number: String::new(),
            check_in_sequence: String::new(),
            passenger_status: ' ',
            conditional: None,
            airline_use: String::new(),
        }
    }

    /// Sets the operating carrier's booking reference.
    pub fn pnr(mut self, pnr: impl Into<String>) -> Self {
        self.operating_carrier_pnr = pnr.into();
        self
    }

    /// Sets the origin and destination airports.
    pub fn route(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.from_airport = from.into();
        self.to_airport = to.into();
        self
    }

    /// Sets the operating carrier and flight number.
    pub fn flight(mut self, carrier: impl Into<String>, number: impl Into<String>) -> Self {
        self.operating_carrier = carrier.into();
        self.flight_number = number.into();
        self
    }

    /// Sets the day-of-year of departure (1-366).
    pub fn date_of_flight(mut self, day: u16) -> Self {
        self.date_of_flight = day;
        self
    }

    pub fn compartment(mut self, code: char) -> Self {
        self.compartment_code = code;
        self
    }

    pub fn seat(mut self, seat: impl Into<String>) -> Self {
        self.seat_number = seat.into();
        self
    }

    pub fn check_in_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.check_in_sequence = sequence.into();
        self
    }

    pub fn passenger_status(mut self, status: char) -> Self {
        self.passenger_status = status;
        self
    }

    /// Sets the repeated conditional items for this leg.
    pub fn conditional(mut self, conditional: SegmentConditional) -> Self {
        self.conditional = Some(conditional);
        self
    }

    /// Sets the opaque airline use block for this leg.
    pub fn airline_use(mut self, data: impl Into<String>) -> Self {
        self.airline_use = data.into();
        self
    }

    fn build(self) -> Result<SegmentRecord, InvalidJulianDay> {
        let date_of_flight = JulianDay::try_from(self.date_of_flight)?;
        Ok(SegmentRecord {
            operating_carrier_pnr: self.operating_carrier_pnr,
            from_airport: self.from_airport,
            to_airport: self.to_airport,
            operating_carrier: self.operating_carrier,
            flight_number: self.flight_number,
            date_of_flight,
            compartment_code: self.compartment_code,
            seat_number: self.seat_number,
            check_in_sequence: self.check_in_sequence,
            passenger_status: self.passenger_status,
            conditional: self.conditional,
            airline_use: self.airline_use,
        })
    }
}
