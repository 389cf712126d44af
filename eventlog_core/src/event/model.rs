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

//! Event Type Definitions
//!
//! This module defines the event types, record headers and decoded payloads found in a
//! crypto-agile TCG event log: one legacy-format SpecID event followed by any number of
//! events carrying one digest per algorithm declared by that SpecID event.

use std::fmt;
use crate::algorithm::AlgorithmId;

/// Size of the SHA-1 digest carried by the legacy (first) event
pub const SHA1_DIGEST_SIZE: usize = 20;

/// Size of the signature that opens SpecID and other EV_NO_ACTION payloads
pub const NO_ACTION_SIGNATURE_SIZE: usize = 16;

/// PCRIndex + EventType + Digest + EventSize of the legacy header
pub const LEGACY_EVENT_HEADER_SIZE: usize = 4 + 4 + SHA1_DIGEST_SIZE + 4;

/// Spec id event signature 03
pub const SPEC_ID_EVENT_SIGNATURE_03: &[u8] = &[
    0x53, 0x70, 0x65, 0x63, 0x20,  // "Spec "
    0x49, 0x44, 0x20,              // "ID "
    0x45, 0x76, 0x65, 0x6E, 0x74,  // "Event"
    0x30, 0x33,                    // "03"
    0x00                           // Null terminator
];

/// Byte representation of startup locality identifier
pub const STARTUP_LOCALITY_SIGNATURE: &[u8] = &[
    0x53, 0x74, 0x61, 0x72, 0x74, 0x75, 0x70,           // "Startup"
    0x4C, 0x6F, 0x63, 0x61, 0x6C, 0x69, 0x74, 0x79,     // "Locality"
    0x00                                                // Null terminator
];

/// TCG Event Type Enumeration
///
/// Standard TPM event types and UEFI-specific event types.
/// Codes without a variant map to `Unknown`; the raw code stays available on the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventType {
    EvPrebootCert = 0x00000000,
    EvPostCode = 0x00000001,
    EvUnused = 0x00000002,
    EvNoAction = 0x00000003,
    EvSeparator = 0x00000004,
    EvAction = 0x00000005,
    EvEventTag = 0x00000006,
    EvSCrtmContents = 0x00000007,
    EvSCrtmVersion = 0x00000008,
    EvCpuMicrocode = 0x00000009,
    EvPlatformConfigFlags = 0x0000000A,
    EvTableOfDevices = 0x0000000B,
    EvCompactHash = 0x0000000C,
    EvIpl = 0x0000000D,
    EvIplPartitionData = 0x0000000E,
    EvNonhostCode = 0x0000000F,
    EvNonhostConfig = 0x00000010,
    EvNonhostInfo = 0x00000011,
    EvOmitBootDeviceEvents = 0x00000012,

    // EFI specific event types
    EvEfiEventBase = 0x80000000,
    EvEfiVariableDriverConfig = 0x80000001,
    EvEfiVariableBoot = 0x80000002,
    EvEfiBootServicesApplication = 0x80000003,
    EvEfiBootServicesDriver = 0x80000004,
    EvEfiRuntimeServicesDriver = 0x80000005,
    EvEfiGptEvent = 0x80000006,
    EvEfiAction = 0x80000007,
    EvEfiPlatformFirmwareBlob = 0x80000008,
    EvEfiHandoffTables = 0x80000009,
    EvEfiPlatformFirmwareBlob2 = 0x8000000A,
    EvEfiHandoffTables2 = 0x8000000B,
    EvEfiVariableBoot2 = 0x8000000C,
    EvEfiHcrtmEvent = 0x80000010,
    EvEfiVariableAuthority = 0x800000E0,
    Unknown = 0xFFFFFFFF,
}

impl EventType {
    pub fn from_u32(value: u32) -> Self {
        match value {
            0x00000000 => Self::EvPrebootCert,
            0x00000001 => Self::EvPostCode,
            0x00000002 => Self::EvUnused,
            0x00000003 => Self::EvNoAction,
            0x00000004 => Self::EvSeparator,
            0x00000005 => Self::EvAction,
            0x00000006 => Self::EvEventTag,
            0x00000007 => Self::EvSCrtmContents,
            0x00000008 => Self::EvSCrtmVersion,
            0x00000009 => Self::EvCpuMicrocode,
            0x0000000A => Self::EvPlatformConfigFlags,
            0x0000000B => Self::EvTableOfDevices,
            0x0000000C => Self::EvCompactHash,
            0x0000000D => Self::EvIpl,
            0x0000000E => Self::EvIplPartitionData,
            0x0000000F => Self::EvNonhostCode,
            0x00000010 => Self::EvNonhostConfig,
            0x00000011 => Self::EvNonhostInfo,
            0x00000012 => Self::EvOmitBootDeviceEvents,

            0x80000000 => Self::EvEfiEventBase,
            0x80000001 => Self::EvEfiVariableDriverConfig,
            0x80000002 => Self::EvEfiVariableBoot,
            0x80000003 => Self::EvEfiBootServicesApplication,
            0x80000004 => Self::EvEfiBootServicesDriver,
            0x80000005 => Self::EvEfiRuntimeServicesDriver,
            0x80000006 => Self::EvEfiGptEvent,
            0x80000007 => Self::EvEfiAction,
            0x80000008 => Self::EvEfiPlatformFirmwareBlob,
            0x80000009 => Self::EvEfiHandoffTables,
            0x8000000A => Self::EvEfiPlatformFirmwareBlob2,
            0x8000000B => Self::EvEfiHandoffTables2,
            0x8000000C => Self::EvEfiVariableBoot2,
            0x80000010 => Self::EvEfiHcrtmEvent,
            0x800000E0 => Self::EvEfiVariableAuthority,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvPrebootCert => write!(f, "EV_PREBOOT_CERT"),
            Self::EvPostCode => write!(f, "EV_POST_CODE"),
            Self::EvUnused => write!(f, "EV_UNUSED"),
            Self::EvNoAction => write!(f, "EV_NO_ACTION"),
            Self::EvSeparator => write!(f, "EV_SEPARATOR"),
            Self::EvAction => write!(f, "EV_ACTION"),
            Self::EvEventTag => write!(f, "EV_EVENT_TAG"),
            Self::EvSCrtmContents => write!(f, "EV_S_CRTM_CONTENTS"),
            Self::EvSCrtmVersion => write!(f, "EV_S_CRTM_VERSION"),
            Self::EvCpuMicrocode => write!(f, "EV_CPU_MICROCODE"),
            Self::EvPlatformConfigFlags => write!(f, "EV_PLATFORM_CONFIG_FLAGS"),
            Self::EvTableOfDevices => write!(f, "EV_TABLE_OF_DEVICES"),
            Self::EvCompactHash => write!(f, "EV_COMPACT_HASH"),
            Self::EvIpl => write!(f, "EV_IPL"),
            Self::EvIplPartitionData => write!(f, "EV_IPL_PARTITION_DATA"),
            Self::EvNonhostCode => write!(f, "EV_NONHOST_CODE"),
            Self::EvNonhostConfig => write!(f, "EV_NONHOST_CONFIG"),
            Self::EvNonhostInfo => write!(f, "EV_NONHOST_INFO"),
            Self::EvOmitBootDeviceEvents => write!(f, "EV_OMIT_BOOT_DEVICE_EVENTS"),
            Self::EvEfiEventBase => write!(f, "EV_EFI_EVENT_BASE"),
            Self::EvEfiVariableDriverConfig => write!(f, "EV_EFI_VARIABLE_DRIVER_CONFIG"),
            Self::EvEfiVariableBoot => write!(f, "EV_EFI_VARIABLE_BOOT"),
            Self::EvEfiBootServicesApplication => write!(f, "EV_EFI_BOOT_SERVICES_APPLICATION"),
            Self::EvEfiBootServicesDriver => write!(f, "EV_EFI_BOOT_SERVICES_DRIVER"),
            Self::EvEfiRuntimeServicesDriver => write!(f, "EV_EFI_RUNTIME_SERVICES_DRIVER"),
            Self::EvEfiGptEvent => write!(f, "EV_EFI_GPT_EVENT"),
            Self::EvEfiAction => write!(f, "EV_EFI_ACTION"),
            Self::EvEfiPlatformFirmwareBlob => write!(f, "EV_EFI_PLATFORM_FIRMWARE_BLOB"),
            Self::EvEfiHandoffTables => write!(f, "EV_EFI_HANDOFF_TABLES"),
            Self::EvEfiPlatformFirmwareBlob2 => write!(f, "EV_EFI_PLATFORM_FIRMWARE_BLOB2"),
            Self::EvEfiHandoffTables2 => write!(f, "EV_EFI_HANDOFF_TABLES2"),
            Self::EvEfiVariableBoot2 => write!(f, "EV_EFI_VARIABLE_BOOT2"),
            Self::EvEfiHcrtmEvent => write!(f, "EV_EFI_HCRTM_EVENT"),
            Self::EvEfiVariableAuthority => write!(f, "EV_EFI_VARIABLE_AUTHORITY"),
            Self::Unknown => write!(f, "Unknown event type"),
        }
    }
}

/// Header of the legacy TCG 1.2 formatted first event
#[derive(Debug, Clone)]
pub struct LegacyEventHeader {
    pub pcr_index: u32,
    pub event_type: EventType,
    pub digest: Vec<u8>,                    // SHA-1, always 20 bytes
    pub event_size: u32,
}

/// Fixed part of a crypto-agile event, read before its digests
#[derive(Debug, Clone)]
pub struct EventHeader {
    pub pcr_index: u32,
    pub event_type: EventType,
    pub event_type_raw: u32,
    pub digest_count: u32,
}

/// One algorithm-tagged digest of a crypto-agile event
///
/// The length comes from the SpecID event and may differ from the algorithm's canonical size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub algorithm_id: AlgorithmId,
    pub digest: Vec<u8>,
}

impl DigestEntry {
    pub fn new(algorithm_id: AlgorithmId, digest: Vec<u8>) -> Self {
        Self { algorithm_id, digest }
    }
}

/// TCG EFI Specification ID Event Algorithm Size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecIdAlgorithm {
    pub algorithm_id: AlgorithmId,
    pub digest_size: u16,
}

/// Specification ID Event Data
///
/// Declares which digests, and of which size, every following event carries
#[derive(Debug, Clone)]
pub struct SpecIdEvent {
    pub signature: String,                  // "Spec ID Event03"
    pub platform_class: u32,
    pub spec_version_minor: u8,
    pub spec_version_major: u8,
    pub spec_errata: u8,
    pub uintn_size: u8,                     // UINTN size in UINT32 units
    pub digest_sizes: Vec<SpecIdAlgorithm>,
    pub vendor_info: Vec<u8>,
}

impl SpecIdEvent {
    /// Digest size declared for `algorithm_id`, `None` if the log does not carry it
    pub fn digest_size_of(&self, algorithm_id: AlgorithmId) -> Option<usize> {
        self.digest_sizes
            .iter()
            .find(|alg| alg.algorithm_id == algorithm_id)
            .map(|alg| alg.digest_size as usize)
    }

    pub fn number_of_algorithms(&self) -> usize {
        self.digest_sizes.len()
    }
}

/// UEFI Variable Event Data
#[derive(Debug, Clone)]
pub struct UefiVariableData {
    pub variable_name: String,              // Variable GUID
    pub unicode_name_length: u64,           // in UTF-16 code units
    pub variable_data_length: u64,          // in bytes
    pub unicode_name: String,
    pub variable_data: Vec<u8>,
}

/// UEFI image load event (boot/runtime services applications and drivers)
#[derive(Debug, Clone)]
pub struct UefiImageLoadEvent {
    pub image_location_in_memory: u64,
    pub image_length_in_memory: u64,
    pub image_link_time_address: u64,
    pub length_of_device_path: u64,
    pub device_path: Vec<u8>,
}

/// Platform Firmware Blob Event Data
#[derive(Debug, Clone)]
pub struct UefiPlatformFirmwareBlob {
    pub blob_base: u64,                     // Efi physical address
    pub blob_length: u64,
}

/// Platform Firmware Blob Event2 Data
#[derive(Debug, Clone)]
pub struct UefiPlatformFirmwareBlob2 {
    pub blob_description: String,
    pub blob_base: u64,
    pub blob_length: u64,
}

/// Startup Locality Event
///
/// EV_NO_ACTION payload recording the locality the TPM was started from
#[derive(Debug, Clone)]
pub struct StartupLocalityEvent {
    pub locality: u8,
}

/// Decoded event payload, one variant per decoder
#[derive(Debug, Clone)]
pub enum EventPayload {
    Empty,                                          // zero-length payload
    UefiVariable(UefiVariableData),
    UefiImageLoad(UefiImageLoadEvent),
    FirmwareBlob(UefiPlatformFirmwareBlob),
    FirmwareBlob2(UefiPlatformFirmwareBlob2),
    StartupLocality(StartupLocalityEvent),
    Text(Vec<u8>),                                  // rendered as a string
    Opaque(Vec<u8>),                                // rendered as hex
}

/// Payload of a crypto-agile event together with its declared size
#[derive(Debug, Clone)]
pub struct EventData {
    pub event_size: u32,
    pub payload: EventPayload,
}
