//! Fixed-width field reading and writing for the BCBP text format.
//!
//! Payloads are printable ASCII, so byte offsets and character offsets are
//! the same thing.

use crate::error::{DecodeError, EncodeError};
use crate::layout::{FieldSpec, Fill, MAX_BLOCK_LEN};

/// Returns true for the characters allowed anywhere in a payload.
#[inline]
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7E).contains(&byte)
}

/// Returns the offset and value of the first byte outside printable ASCII.
pub fn find_unprintable(data: &str) -> Option<(usize, u8)> {
    data.bytes()
        .enumerate()
        .find(|&(_, b)| !is_printable(b))
}

// =============================================================================
// DECODING
// =============================================================================

/// Cursor over a payload, or over a sized block within one.
///
/// All offsets reported in errors are absolute positions in the payload,
/// including for readers obtained from [`Reader::sub_reader`].
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a str,
    pos: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over a whole payload.
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Returns the absolute position in the payload.
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Returns the unread part of the data.
    pub fn remaining(&self) -> &'a str {
        &self.data[self.pos..]
    }

    /// Returns the number of unread bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Returns the next character without consuming it.
    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Reads exactly `width` bytes without interpreting them.
    pub fn read_raw(&mut self, width: usize, field: &'static str) -> Result<&'a str, DecodeError> {
        let available = self.remaining_len();
        if width > available {
            return Err(DecodeError::TruncatedInput {
                field,
                offset: self.position(),
                needed: width,
                available,
            });
        }
        let value = self
            .data
            .get(self.pos..self.pos + width)
            .ok_or_else(|| DecodeError::MalformedField {
                field,
                offset: self.position(),
                found: "non-ASCII data".to_string(),
            })?;
        self.pos += width;
        Ok(value)
    }

    /// Consumes and returns everything left.
    pub fn read_rest(&mut self) -> &'a str {
        let rest = self.remaining();
        self.pos = self.data.len();
        rest
    }

    /// Reads a text field, dropping its trailing space padding.
    pub fn read_text(&mut self, spec: FieldSpec) -> Result<String, DecodeError> {
        let raw = self.read_raw(spec.width, spec.name)?;
        Ok(raw.trim_end_matches(' ').to_string())
    }

    /// Reads a single-character field.
    pub fn read_char(&mut self, spec: FieldSpec) -> Result<char, DecodeError> {
        debug_assert_eq!(spec.width, 1);
        let offset = self.position();
        let raw = self.read_raw(1, spec.name)?;
        raw.chars().next().ok_or(DecodeError::TruncatedInput {
            field: spec.name,
            offset,
            needed: 1,
            available: 0,
        })
    }

    /// Reads a zero-padded decimal field.
    pub fn read_numeric(&mut self, spec: FieldSpec) -> Result<u32, DecodeError> {
        let offset = self.position();
        let raw = self.read_raw(spec.width, spec.name)?;
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::MalformedField {
                field: spec.name,
                offset,
                found: raw.to_string(),
            });
        }
        raw.parse().map_err(|_| DecodeError::MalformedField {
            field: spec.name,
            offset,
            found: raw.to_string(),
        })
    }

    /// Reads a two-digit upper-case hexadecimal size.
    pub fn read_hex(&mut self, spec: FieldSpec) -> Result<usize, DecodeError> {
        let offset = self.position();
        let raw = self.read_raw(spec.width, spec.name)?;
        let valid = raw
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b));
        if !valid {
            return Err(DecodeError::MalformedField {
                field: spec.name,
                offset,
                found: raw.to_string(),
            });
        }
        usize::from_str_radix(raw, 16).map_err(|_| DecodeError::MalformedField {
            field: spec.name,
            offset,
            found: raw.to_string(),
        })
    }

    /// Splits off the next `len` bytes as a reader of their own.
    pub fn sub_reader(&mut self, len: usize, field: &'static str) -> Result<Reader<'a>, DecodeError> {
        let base = self.position();
        let data = self.read_raw(len, field)?;
        Ok(Reader { data, pos: 0, base })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for building a payload, or a sized block within one.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: String,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    /// Returns the written text.
    pub fn into_string(self) -> String {
        self.buf
    }

    /// Returns a reference to the written text.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a text field, left-justified and space padded.
    pub fn write_text(&mut self, spec: FieldSpec, value: &str) -> Result<(), EncodeError> {
        debug_assert_eq!(spec.fill, Fill::Text);
        check_charset(spec.name, value)?;
        if value.len() > spec.width {
            return Err(EncodeError::FieldTooLong {
                field: spec.name,
                len: value.len(),
                max: spec.width,
            });
        }
        self.buf.push_str(value);
        for _ in value.len()..spec.width {
            self.buf.push(' ');
        }
        Ok(())
    }

    /// Writes a single-character field.
    pub fn write_char(&mut self, spec: FieldSpec, value: char) -> Result<(), EncodeError> {
        let mut tmp = [0u8; 4];
        self.write_text(spec, value.encode_utf8(&mut tmp))
    }

    /// Writes a decimal field, right-justified and zero padded.
    pub fn write_numeric(&mut self, spec: FieldSpec, value: u32) -> Result<(), EncodeError> {
        debug_assert_eq!(spec.fill, Fill::Numeric);
        let digits = value.to_string();
        if digits.len() > spec.width {
            return Err(EncodeError::FieldTooLong {
                field: spec.name,
                len: digits.len(),
                max: spec.width,
            });
        }
        for _ in digits.len()..spec.width {
            self.buf.push('0');
        }
        self.buf.push_str(&digits);
        Ok(())
    }

    /// Writes a block size as two upper-case hex digits.
    pub fn write_hex(&mut self, spec: FieldSpec, value: usize) -> Result<(), EncodeError> {
        debug_assert_eq!(spec.fill, Fill::Hex);
        if value > MAX_BLOCK_LEN {
            return Err(EncodeError::FieldTooLong {
                field: spec.name,
                len: value,
                max: MAX_BLOCK_LEN,
            });
        }
        self.buf.push_str(&format!("{:02X}", value));
        Ok(())
    }

    /// Writes opaque bytes verbatim.
    pub fn write_raw(&mut self, field: &'static str, value: &str) -> Result<(), EncodeError> {
        check_charset(field, value)?;
        self.buf.push_str(value);
        Ok(())
    }

    /// Writes a sized block: its two-digit hex length, then its content.
    pub fn write_block(&mut self, size_spec: FieldSpec, block: &Writer) -> Result<(), EncodeError> {
        self.write_hex(size_spec, block.len())?;
        self.buf.push_str(block.as_str());
        Ok(())
    }
}

/// Rejects anything outside printable ASCII.
fn check_charset(field: &'static str, value: &str) -> Result<(), EncodeError> {
    match value.chars().find(|c| !c.is_ascii() || !is_printable(*c as u8)) {
        Some(found) => Err(EncodeError::InvalidCharacterSet { field, found }),
        None => Ok(()),
    }
}
