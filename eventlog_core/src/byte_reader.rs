/*
 * Copyright (c) Huawei Technologies Co., Ltd. 2025. All rights reserved.
 * Global Trust Authority is licensed under the Mulan PSL v2.
 * You can use this software according to the terms and conditions of the Mulan PSL v2.
 * You may obtain a copy of Mulan PSL v2 at:
 *     http://license.coscl.org.cn/MulanPSL2
 * THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY KIND, EITHER EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR
 * PURPOSE.
 * See the Mulan PSL v2 for more details.
 */

//! Byte Reader Module
//!
//! Bounds-checked cursor over an immutable event log buffer.
//! Every field of the log, from the record headers down to the payload internals,
//! is extracted through `ByteReader`; a read larger than the remaining input fails
//! with `EventLogError::InputError` instead of touching memory past the end.
//!
//! The module contains two main components:
//! - `ByteReader`: the cursor, reading little-endian integers, byte ranges, GUIDs and UTF-16 names
//! - `ByteParseable`: types implementing this trait can be parsed directly from a reader

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;
use uuid::Uuid;
use crate::codec::decode_utf16le;
use crate::error::EventLogError;

/// UEFI GUID size
pub const UEFI_GUID_SIZE: usize = 16;

/// Binary data parsing helper structure
///
/// Internally uses a `Cursor` for position tracking; the underlying buffer is only ever borrowed.
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

/// Trait for types that can be parsed from a byte stream
///
/// # Example
///
/// ```rust
/// use tpm_eventlog_core::{ByteReader, ByteParseable, EventLogError};
///
/// struct Blob {
///     base: u64,
///     length: u64,
/// }
///
/// impl ByteParseable for Blob {
///     fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
///         let base = parser.read_u64()?;
///         let length = parser.read_u64()?;
///         Ok(Self { base, length })
///     }
/// }
///
/// let data = [0u8; 16];
/// let blob = Blob::parse_from(&mut ByteReader::new(&data)).unwrap();
/// assert_eq!(blob.base, 0);
/// assert_eq!(blob.length, 0);
/// ```
pub trait ByteParseable: Sized {
    /// Parse an instance of the current type from a byte reader
    ///
    /// # Errors
    ///
    /// Returns an `EventLogError` when the byte stream contains insufficient data or is incorrectly formatted
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError>;
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current read offset in bytes
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Number of unread bytes remaining
    pub fn remaining(&self) -> usize {
        self.get_length().saturating_sub(self.position())
    }

    /// Total length of the wrapped buffer
    pub fn get_length(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Whether the cursor sits exactly at the end of the buffer
    pub fn is_end(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless at least `length` bytes are left to read
    ///
    /// # Errors
    /// * Returns `InputError` naming `what` when the request exceeds the remaining bytes
    pub fn ensure_remaining(&self, length: usize, what: &str) -> Result<(), EventLogError> {
        if length > self.remaining() {
            return Err(EventLogError::InputError(format!(
                "Failed to read {}: requested {} bytes but only {} bytes remain",
                what, length, self.remaining()
            )));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, EventLogError> {
        self.ensure_remaining(1, "u8")?;
        self.cursor.read_u8()
            .map_err(|e| EventLogError::InputError(format!("Failed to read u8: {}", e)))
    }

    /// Read a u16 value (little-endian)
    pub fn read_u16(&mut self) -> Result<u16, EventLogError> {
        self.ensure_remaining(2, "u16")?;
        self.cursor.read_u16::<LittleEndian>()
            .map_err(|e| EventLogError::InputError(format!("Failed to read u16: {}", e)))
    }

    /// Read a u32 value (little-endian)
    pub fn read_u32(&mut self) -> Result<u32, EventLogError> {
        self.ensure_remaining(4, "u32")?;
        self.cursor.read_u32::<LittleEndian>()
            .map_err(|e| EventLogError::InputError(format!("Failed to read u32: {}", e)))
    }

    /// Read a u64 value (little-endian)
    pub fn read_u64(&mut self) -> Result<u64, EventLogError> {
        self.ensure_remaining(8, "u64")?;
        self.cursor.read_u64::<LittleEndian>()
            .map_err(|e| EventLogError::InputError(format!("Failed to read u64: {}", e)))
    }

    /// Borrow the next `length` bytes and advance past them
    ///
    /// # Errors
    /// * Returns an error when the requested number of bytes exceeds the remaining bytes
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], EventLogError> {
        self.ensure_remaining(length, "bytes")?;
        let data: &'a [u8] = *self.cursor.get_ref();
        let start = self.position();
        let slice = &data[start..start + length];
        self.cursor.set_position((start + length) as u64);
        Ok(slice)
    }

    /// Validate a length field taken from the log as a byte count
    ///
    /// The value must fit in `usize` and must not exceed the remaining bytes.
    pub fn checked_length(&self, value: u64, what: &str) -> Result<usize, EventLogError> {
        let length = usize::try_from(value).map_err(|_| EventLogError::InputError(
            format!("{} {} does not fit in memory", what, value)
        ))?;
        self.ensure_remaining(length, what)?;
        Ok(length)
    }

    /// Split off the next `length` bytes as an independent reader
    pub fn sub_reader(&mut self, length: usize) -> Result<ByteReader<'a>, EventLogError> {
        self.read_bytes(length).map(ByteReader::new)
    }

    /// Read all bytes that are left
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let data: &'a [u8] = *self.cursor.get_ref();
        let start = self.position().min(data.len());
        self.cursor.set_position(data.len() as u64);
        &data[start..]
    }

    /// Read GUID (16 bytes)
    ///
    /// EFI GUIDs store their first three fields little-endian; the result is the
    /// lower-case hyphenated textual form.
    pub fn read_guid(&mut self) -> Result<String, EventLogError> {
        let bytes = self.read_bytes(UEFI_GUID_SIZE)?;
        let mut guid_bytes: [u8; UEFI_GUID_SIZE] = [0; UEFI_GUID_SIZE];
        guid_bytes.copy_from_slice(bytes);

        let guid: Uuid = Uuid::from_bytes_le(guid_bytes);
        Ok(guid.to_string())
    }

    /// Read a UTF-16LE name of `code_units` 16-bit units
    ///
    /// # Errors
    /// * `InputError` when fewer than `code_units * 2` bytes remain
    /// * `DecodeError` when the units are not valid UTF-16 (e.g. an unpaired surrogate)
    pub fn read_utf16_name(&mut self, code_units: u64) -> Result<String, EventLogError> {
        let byte_length = code_units.checked_mul(2).ok_or_else(|| EventLogError::InputError(
            format!("Unicode name length {} overflows", code_units)
        ))?;
        let length = self.checked_length(byte_length, "unicode name")?;
        let bytes = self.read_bytes(length)?;
        decode_utf16le(bytes)
    }
}
