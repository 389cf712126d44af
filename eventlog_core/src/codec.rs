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

//! Hex and text codecs used when rendering event fields.

use crate::error::EventLogError;

/// Lower-case hex, two characters per byte, no separators
pub fn bytes_to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode UTF-16LE code units into a `String`
///
/// # Errors
/// * `DecodeError` for an odd byte count or any unpaired surrogate
pub fn decode_utf16le(data: &[u8]) -> Result<String, EventLogError> {
    if data.len() % 2 != 0 {
        return Err(EventLogError::DecodeError(
            format!("UTF-16 data has odd length {}", data.len())
        ));
    }

    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let mut text = String::with_capacity(data.len() / 2);
    let mut position = 0usize;
    for unit in char::decode_utf16(units) {
        let c = unit.map_err(|e| EventLogError::DecodeError(
            format!("Invalid UTF-16 code unit 0x{:04x} at code unit {}", e.unpaired_surrogate(), position)
        ))?;
        position += c.len_utf16();
        text.push(c);
    }
    Ok(text)
}

/// Printable form of a decoded name, line breaks and other control characters shown as '.'
pub fn text_to_printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() || c == '\u{2028}' || c == '\u{2029}' { '.' } else { c })
        .collect()
}

/// Printable form of a text event payload
///
/// The declared length is authoritative: trailing NULs are dropped, invalid UTF-8 is
/// replaced and remaining control characters are shown as '.'.
pub fn bytes_to_printable(data: &[u8]) -> String {
    text_to_printable(String::from_utf8_lossy(data).trim_end_matches('\0'))
}
