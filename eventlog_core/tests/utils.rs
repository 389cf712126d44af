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

#![allow(dead_code)]

//! Helpers building binary event logs for the integration tests

use openssl::sha::{sha1, sha256};

pub const ALG_SHA1: u16 = 0x0004;
pub const ALG_SHA256: u16 = 0x000B;
pub const ALG_SHA384: u16 = 0x000C;

pub const EV_POST_CODE: u32 = 0x00000001;
pub const EV_NO_ACTION: u32 = 0x00000003;
pub const EV_SEPARATOR: u32 = 0x00000004;
pub const EV_S_CRTM_CONTENTS: u32 = 0x00000007;
pub const EV_EFI_VARIABLE_DRIVER_CONFIG: u32 = 0x80000001;
pub const EV_EFI_BOOT_SERVICES_APPLICATION: u32 = 0x80000003;
pub const EV_EFI_ACTION: u32 = 0x80000007;
pub const EV_EFI_PLATFORM_FIRMWARE_BLOB2: u32 = 0x8000000A;

/// EFI_GLOBAL_VARIABLE 8be4df61-93ca-11d2-aa0d-00e098032b8c as stored in the log
pub const EFI_GLOBAL_VARIABLE_GUID: [u8; 16] = [
    0x61, 0xdf, 0xe4, 0x8b, 0xca, 0x93, 0xd2, 0x11,
    0xaa, 0x0d, 0x00, 0xe0, 0x98, 0x03, 0x2b, 0x8c,
];

/// Builds a crypto-agile event log: SpecID event first, then the added events
pub struct EventLogBuilder {
    algorithms: Vec<(u16, u16)>,
    vendor_info: Vec<u8>,
    events: Vec<u8>,
}

impl EventLogBuilder {
    pub fn new(algorithms: &[(u16, u16)]) -> Self {
        Self {
            algorithms: algorithms.to_vec(),
            vendor_info: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn sha256_only() -> Self {
        Self::new(&[(ALG_SHA256, 32)])
    }

    pub fn sha1_sha256() -> Self {
        Self::new(&[(ALG_SHA1, 20), (ALG_SHA256, 32)])
    }

    pub fn with_vendor_info(mut self, vendor_info: &[u8]) -> Self {
        self.vendor_info = vendor_info.to_vec();
        self
    }

    /// Append an event with explicitly given digests
    pub fn event(mut self, pcr_index: u32, event_type: u32, digests: &[(u16, Vec<u8>)], data: &[u8]) -> Self {
        self.events.extend_from_slice(&pcr_index.to_le_bytes());
        self.events.extend_from_slice(&event_type.to_le_bytes());
        self.events.extend_from_slice(&(digests.len() as u32).to_le_bytes());
        for (alg, digest) in digests {
            self.events.extend_from_slice(&alg.to_le_bytes());
            self.events.extend_from_slice(digest);
        }
        self.events.extend_from_slice(&(data.len() as u32).to_le_bytes());
        self.events.extend_from_slice(data);
        self
    }

    /// Append an event whose digests are all filled with `fill`, one per declared algorithm
    pub fn filled_event(self, pcr_index: u32, event_type: u32, fill: u8, data: &[u8]) -> Self {
        let digests: Vec<(u16, Vec<u8>)> = self
            .algorithms
            .iter()
            .map(|(alg, size)| (*alg, vec![fill; *size as usize]))
            .collect();
        self.event(pcr_index, event_type, &digests, data)
    }

    pub fn spec_id_payload(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(b"Spec ID Event03\0");
        payload.extend_from_slice(&0u32.to_le_bytes());   // platformClass
        payload.extend_from_slice(&[0, 2, 0, 2]);         // minor, major, errata, uintnSize
        payload.extend_from_slice(&(self.algorithms.len() as u32).to_le_bytes());
        for (alg, size) in &self.algorithms {
            payload.extend_from_slice(&alg.to_le_bytes());
            payload.extend_from_slice(&size.to_le_bytes());
        }
        payload.push(self.vendor_info.len() as u8);
        payload.extend_from_slice(&self.vendor_info);
        payload
    }

    pub fn spec_id_event(&self) -> Vec<u8> {
        let payload = self.spec_id_payload();
        let mut event = Vec::new();
        event.extend_from_slice(&0u32.to_le_bytes());
        event.extend_from_slice(&EV_NO_ACTION.to_le_bytes());
        event.extend_from_slice(&[0u8; 20]);
        event.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        event.extend_from_slice(&payload);
        event
    }

    pub fn build(&self) -> Vec<u8> {
        let mut log = self.spec_id_event();
        log.extend_from_slice(&self.events);
        log
    }
}

/// Reference log: SpecID (SHA-256) plus one EV_POST_CODE event on PCR 7
pub fn reference_log(digest: &[u8; 32]) -> Vec<u8> {
    EventLogBuilder::sha256_only()
        .event(7, EV_POST_CODE, &[(ALG_SHA256, digest.to_vec())], b"POST CODE")
        .build()
}

pub fn extend_sha1(old: &[u8], digest: &[u8]) -> [u8; 20] {
    let mut input = old.to_vec();
    input.extend_from_slice(digest);
    sha1(&input)
}

pub fn extend_sha256(old: &[u8], digest: &[u8]) -> [u8; 32] {
    let mut input = old.to_vec();
    input.extend_from_slice(digest);
    sha256(&input)
}

pub fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
}

pub fn uefi_variable_payload(guid: &[u8; 16], name: &str, data: &[u8]) -> Vec<u8> {
    let mut payload = guid.to_vec();
    payload.extend_from_slice(&(name.encode_utf16().count() as u64).to_le_bytes());
    payload.extend_from_slice(&(data.len() as u64).to_le_bytes());
    payload.extend_from_slice(&utf16le(name));
    payload.extend_from_slice(data);
    payload
}

pub fn image_load_payload(location: u64, length: u64, link_time_address: u64, device_path: &[u8]) -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&location.to_le_bytes());
    payload.extend_from_slice(&length.to_le_bytes());
    payload.extend_from_slice(&link_time_address.to_le_bytes());
    payload.extend_from_slice(&(device_path.len() as u64).to_le_bytes());
    payload.extend_from_slice(device_path);
    payload
}

pub fn firmware_blob_payload(base: u64, length: u64) -> Vec<u8> {
    let mut payload = base.to_le_bytes().to_vec();
    payload.extend_from_slice(&length.to_le_bytes());
    payload
}
