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

//! Record and payload parsers.
//!
//! Every structure is extracted field by field through `ByteReader`; no byte range is ever
//! reinterpreted as a typed record. Payload decoders only see the bytes of their own event.

use crate::algorithm::AlgorithmId;
use crate::byte_reader::{ByteParseable, ByteReader};
use crate::codec::bytes_to_printable;
use crate::error::EventLogError;
use crate::event::model::{
    EventHeader, EventPayload, EventType, LegacyEventHeader, SpecIdAlgorithm, SpecIdEvent,
    StartupLocalityEvent, UefiImageLoadEvent, UefiPlatformFirmwareBlob, UefiPlatformFirmwareBlob2,
    UefiVariableData, NO_ACTION_SIGNATURE_SIZE, SHA1_DIGEST_SIZE, SPEC_ID_EVENT_SIGNATURE_03,
    STARTUP_LOCALITY_SIGNATURE,
};

/// Bytes of one (algorithmId, digestSize) pair in the SpecID event
const SPEC_ID_ALGORITHM_SIZE: u64 = 4;

impl ByteParseable for LegacyEventHeader {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let pcr_index = parser.read_u32()?;
        let event_type = EventType::from_u32(parser.read_u32()?);
        let digest = parser.read_bytes(SHA1_DIGEST_SIZE)?.to_vec();
        let event_size = parser.read_u32()?;

        Ok(Self { pcr_index, event_type, digest, event_size })
    }
}

impl ByteParseable for EventHeader {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let pcr_index = parser.read_u32()?;
        let event_type_raw = parser.read_u32()?;
        let digest_count = parser.read_u32()?;

        Ok(Self {
            pcr_index,
            event_type: EventType::from_u32(event_type_raw),
            event_type_raw,
            digest_count,
        })
    }
}

impl ByteParseable for SpecIdAlgorithm {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let algorithm_id = AlgorithmId::from(parser.read_u16()?);
        let digest_size = parser.read_u16()?;
        Ok(Self { algorithm_id, digest_size })
    }
}

impl ByteParseable for SpecIdEvent {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let signature_bytes = parser.read_bytes(NO_ACTION_SIGNATURE_SIZE)?;
        if signature_bytes != SPEC_ID_EVENT_SIGNATURE_03 {
            return Err(EventLogError::InputError(format!(
                "Invalid SpecID signature: {}, only crypto-agile logs are supported",
                hex::encode(signature_bytes)
            )));
        }
        let signature = bytes_to_printable(signature_bytes);

        let platform_class = parser.read_u32()?;
        let spec_version_minor = parser.read_u8()?;
        let spec_version_major = parser.read_u8()?;
        let spec_errata = parser.read_u8()?;
        let uintn_size = parser.read_u8()?;

        let number_of_algorithms = parser.read_u32()?;
        if number_of_algorithms == 0 {
            return Err(EventLogError::InputError(
                "SpecID event declares no digest algorithms".to_string()
            ));
        }
        parser.checked_length(
            u64::from(number_of_algorithms) * SPEC_ID_ALGORITHM_SIZE,
            "SpecID algorithm list",
        )?;

        let mut digest_sizes: Vec<SpecIdAlgorithm> = Vec::with_capacity(number_of_algorithms as usize);
        for _ in 0..number_of_algorithms {
            let algorithm = SpecIdAlgorithm::parse_from(parser)?;
            if digest_sizes.iter().any(|alg| alg.algorithm_id == algorithm.algorithm_id) {
                return Err(EventLogError::InputError(format!(
                    "SpecID event declares algorithm {} more than once",
                    algorithm.algorithm_id
                )));
            }
            digest_sizes.push(algorithm);
        }

        let vendor_info_size = parser.read_u8()?;
        let vendor_info = parser.read_bytes(vendor_info_size as usize)?.to_vec();

        Ok(Self {
            signature,
            platform_class,
            spec_version_minor,
            spec_version_major,
            spec_errata,
            uintn_size,
            digest_sizes,
            vendor_info,
        })
    }
}

impl ByteParseable for UefiVariableData {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let variable_name = parser.read_guid()?;
        let unicode_name_length = parser.read_u64()?;
        let variable_data_length = parser.read_u64()?;

        let unicode_name = parser.read_utf16_name(unicode_name_length)?;
        let data_length = parser.checked_length(variable_data_length, "variable data")?;
        let variable_data = parser.read_bytes(data_length)?.to_vec();

        Ok(Self {
            variable_name,
            unicode_name_length,
            variable_data_length,
            unicode_name,
            variable_data,
        })
    }
}

impl ByteParseable for UefiImageLoadEvent {
    /// The device path spans the rest of the payload, whatever LengthOfDevicePath claims
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let image_location_in_memory = parser.read_u64()?;
        let image_length_in_memory = parser.read_u64()?;
        let image_link_time_address = parser.read_u64()?;
        let length_of_device_path = parser.read_u64()?;
        let device_path = parser.read_remaining().to_vec();

        Ok(Self {
            image_location_in_memory,
            image_length_in_memory,
            image_link_time_address,
            length_of_device_path,
            device_path,
        })
    }
}

impl ByteParseable for UefiPlatformFirmwareBlob {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let blob_base = parser.read_u64()?;
        let blob_length = parser.read_u64()?;
        Ok(Self { blob_base, blob_length })
    }
}

impl ByteParseable for UefiPlatformFirmwareBlob2 {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let description_size = parser.read_u8()?;
        let blob_description = bytes_to_printable(parser.read_bytes(description_size as usize)?);
        let blob_base = parser.read_u64()?;
        let blob_length = parser.read_u64()?;

        Ok(Self { blob_description, blob_base, blob_length })
    }
}

impl ByteParseable for StartupLocalityEvent {
    fn parse_from(parser: &mut ByteReader<'_>) -> Result<Self, EventLogError> {
        let signature = parser.read_bytes(NO_ACTION_SIGNATURE_SIZE)?;
        if signature != STARTUP_LOCALITY_SIGNATURE {
            return Err(EventLogError::InputError(
                "Invalid StartupLocality signature".to_string()
            ));
        }
        let locality = parser.read_u8()?;
        Ok(Self { locality })
    }
}

/// Decode the payload of a crypto-agile event according to its type
///
/// `data` holds exactly the EventSize bytes of the event. An empty payload is never handed
/// to a type-specific decoder; unrecognized types are kept as opaque bytes.
///
/// # Errors
/// * `InputError` when a fixed prefix or a declared length runs past the payload
/// * `DecodeError` when a UEFI variable name is not valid UTF-16
pub fn decode_event_payload(event_type: EventType, data: &[u8]) -> Result<EventPayload, EventLogError> {
    if data.is_empty() {
        return Ok(EventPayload::Empty);
    }

    let mut parser = ByteReader::new(data);
    let payload = match event_type {
        EventType::EvEfiVariableDriverConfig
        | EventType::EvEfiVariableBoot
        | EventType::EvEfiVariableBoot2
        | EventType::EvEfiVariableAuthority => {
            EventPayload::UefiVariable(UefiVariableData::parse_from(&mut parser)?)
        }
        EventType::EvEfiBootServicesApplication
        | EventType::EvEfiBootServicesDriver
        | EventType::EvEfiRuntimeServicesDriver => {
            EventPayload::UefiImageLoad(UefiImageLoadEvent::parse_from(&mut parser)?)
        }
        EventType::EvSCrtmContents | EventType::EvEfiPlatformFirmwareBlob => {
            EventPayload::FirmwareBlob(UefiPlatformFirmwareBlob::parse_from(&mut parser)?)
        }
        EventType::EvEfiPlatformFirmwareBlob2 => {
            EventPayload::FirmwareBlob2(UefiPlatformFirmwareBlob2::parse_from(&mut parser)?)
        }
        EventType::EvPostCode | EventType::EvAction | EventType::EvEfiAction => {
            EventPayload::Text(data.to_vec())
        }
        EventType::EvNoAction if data.starts_with(STARTUP_LOCALITY_SIGNATURE) => {
            EventPayload::StartupLocality(StartupLocalityEvent::parse_from(&mut parser)?)
        }
        _ => EventPayload::Opaque(data.to_vec()),
    };

    Ok(payload)
}
