//! Assembly of unescaped output from whole characters and numeric units.
//!
//! Numeric escape rules decode one unit per escape sequence: a UTF-8 byte, a
//! UTF-16 code unit, or a whole code point. Multi-unit characters are
//! therefore rebuilt here, purely from adjacency in the output:
//!
//! - A run of UTF-8 bytes is decoded when the run ends. Bytes that do not
//!   form valid UTF-8 are taken as the Latin-1 code point of the same value.
//! - A high surrogate must be immediately followed by a low surrogate; the
//!   pair yields one code point.
//!
//! # Errors
//!
//! - A high surrogate followed by anything other than a low surrogate, a low
//!   surrogate on its own, or a high surrogate at the end of output is an
//!   [`UnescapeErrorKind::UnpairedSurrogate`].

use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;

use crate::{error::UnescapeErrorKind, rule::Unescaped};

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

#[derive(Debug, Default)]
pub(crate) struct OutputBuffer {
    text: String,
    utf8: Vec<u8>,
    high_surrogate: Option<u16>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, unescaped: Unescaped) -> Result<(), UnescapeErrorKind> {
        match unescaped {
            Unescaped::Char(ch) => self.push_char(ch),
            Unescaped::Text(text) => self.push_str(&text),
            Unescaped::Utf8Byte(byte) => {
                self.close_surrogate()?;
                self.utf8.push(byte);
                Ok(())
            }
            Unescaped::Utf16Unit(unit) => {
                self.flush_utf8();
                self.push_utf16(unit)
            }
        }
    }

    pub fn push_char(&mut self, ch: char) -> Result<(), UnescapeErrorKind> {
        self.settle()?;
        self.text.push(ch);
        Ok(())
    }

    pub fn push_str(&mut self, text: &str) -> Result<(), UnescapeErrorKind> {
        self.settle()?;
        self.text.push_str(text);
        Ok(())
    }

    pub fn finish(mut self) -> Result<String, UnescapeErrorKind> {
        self.settle()?;
        Ok(self.text)
    }

    fn settle(&mut self) -> Result<(), UnescapeErrorKind> {
        self.flush_utf8();
        self.close_surrogate()
    }

    fn push_utf16(&mut self, unit: u16) -> Result<(), UnescapeErrorKind> {
        match self.high_surrogate.take() {
            Some(high) if LOW_SURROGATES.contains(&unit) => {
                let value = 0x1_0000
                    + ((u32::from(high) - 0xD800) << 10)
                    + (u32::from(unit) - 0xDC00);
                let ch = char::from_u32(value).ok_or(UnescapeErrorKind::InvalidCodePoint { value })?;
                self.text.push(ch);
                Ok(())
            }
            Some(high) => Err(UnescapeErrorKind::UnpairedSurrogate { unit: high }),
            None if HIGH_SURROGATES.contains(&unit) => {
                self.high_surrogate = Some(unit);
                Ok(())
            }
            None if LOW_SURROGATES.contains(&unit) => {
                Err(UnescapeErrorKind::UnpairedSurrogate { unit })
            }
            None => {
                let value = u32::from(unit);
                let ch = char::from_u32(value).ok_or(UnescapeErrorKind::InvalidCodePoint { value })?;
                self.text.push(ch);
                Ok(())
            }
        }
    }

    fn close_surrogate(&mut self) -> Result<(), UnescapeErrorKind> {
        match self.high_surrogate.take() {
            Some(unit) => Err(UnescapeErrorKind::UnpairedSurrogate { unit }),
            None => Ok(()),
        }
    }

    fn flush_utf8(&mut self) {
        if self.utf8.is_empty() {
            return;
        }
        for chunk in ByteSlice::utf8_chunks(self.utf8.as_slice()) {
            self.text.push_str(chunk.valid());
            self.text.extend(chunk.invalid().iter().map(|&byte| char::from(byte)));
        }
        self.utf8.clear();
    }
}
