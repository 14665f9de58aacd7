//! Text encoding/decoding for BCBP payloads.
//!
//! This module implements the IATA Resolution 792 layout: a fixed header,
//! one mandatory block plus a sized variable block per leg, and trailing
//! security data.

pub mod pass;
pub mod primitives;
pub mod segment;

pub use pass::{decode_pass, encode_pass};
pub use primitives::{Reader, Writer};
