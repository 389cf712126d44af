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

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeStruct},
};
use crate::codec::{bytes_to_hex, bytes_to_printable};
use crate::event::log::{EventEntry, EventLog, LogEntry, SpecIdEntry};
use crate::event::model::{
    DigestEntry, EventPayload, EventType, SpecIdAlgorithm, SpecIdEvent, StartupLocalityEvent,
    UefiImageLoadEvent, UefiPlatformFirmwareBlob, UefiPlatformFirmwareBlob2, UefiVariableData,
};
use crate::pcr::{PcrBanks, PCR_COUNT};

/// When serializing EventType to JSON, it needs to be converted to the standard definition,
/// for example EvNoAction -> EV_NO_ACTION
impl Serialize for EventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for DigestEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("DigestEntry", 2)?; // field number
        state.serialize_field("algorithm_id", &self.algorithm_id)?;
        state.serialize_field("digest", &bytes_to_hex(&self.digest))?;
        state.end()
    }
}

impl Serialize for SpecIdAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("SpecIdAlgorithm", 2)?; // field number
        state.serialize_field("algorithm_id", &self.algorithm_id)?;
        state.serialize_field("digest_size", &self.digest_size)?;
        state.end()
    }
}

impl Serialize for SpecIdEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("SpecIdEvent", 9)?; // field number
        state.serialize_field("signature", &self.signature)?;
        state.serialize_field("platform_class", &self.platform_class)?;
        state.serialize_field("spec_version_minor", &self.spec_version_minor)?;
        state.serialize_field("spec_version_major", &self.spec_version_major)?;
        state.serialize_field("spec_errata", &self.spec_errata)?;
        state.serialize_field("uintn_size", &self.uintn_size)?;
        state.serialize_field("number_of_algorithms", &self.number_of_algorithms())?;
        state.serialize_field("algorithms", &self.digest_sizes)?;
        state.serialize_field("vendor_info", &bytes_to_hex(&self.vendor_info))?;
        state.end()
    }
}

/// Serializes UEFI variable data, the variable data is hex encoded
impl Serialize for UefiVariableData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("UefiVariableData", 5)?; // field number
        state.serialize_field("variable_name", &self.variable_name)?;
        state.serialize_field("unicode_name_length", &self.unicode_name_length)?;
        state.serialize_field("variable_data_length", &self.variable_data_length)?;
        state.serialize_field("unicode_name", &self.unicode_name)?;
        state.serialize_field("variable_data", &bytes_to_hex(&self.variable_data))?;
        state.end()
    }
}

impl Serialize for UefiImageLoadEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("UefiImageLoadEvent", 5)?; // field number
        state.serialize_field("image_location_in_memory", &format!("0x{:x}", self.image_location_in_memory))?;
        state.serialize_field("image_length_in_memory", &self.image_length_in_memory)?;
        state.serialize_field("image_link_time_address", &format!("0x{:x}", self.image_link_time_address))?;
        state.serialize_field("length_of_device_path", &self.length_of_device_path)?;
        state.serialize_field("device_path", &bytes_to_hex(&self.device_path))?;
        state.end()
    }
}

/// Serializes UEFI platform firmware BLOB event
impl Serialize for UefiPlatformFirmwareBlob {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("FirmwareBlob", 2)?; // field number
        state.serialize_field("blob_base", &format!("0x{:x}", self.blob_base))?;
        state.serialize_field("blob_length", &format!("0x{:x}", self.blob_length))?;
        state.end()
    }
}

/// Serializes UEFI platform firmware BLOB event (version 2)
impl Serialize for UefiPlatformFirmwareBlob2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("FirmwareBlob", 3)?; // field number
        state.serialize_field("description", &self.blob_description)?;
        state.serialize_field("blob_base", &format!("0x{:x}", self.blob_base))?;
        state.serialize_field("blob_length", &format!("0x{:x}", self.blob_length))?;
        state.end()
    }
}

impl Serialize for StartupLocalityEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("StartupLocalityEvent", 1)?; // field number
        state.serialize_field("startup_locality", &self.locality)?;
        state.end()
    }
}

/// Serializes the decoded payload, calling different serialization methods based on type
///
/// Text payloads become strings, opaque payloads hex strings and empty payloads null.
impl Serialize for EventPayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        match self {
            EventPayload::Empty => serializer.serialize_none(),
            EventPayload::UefiVariable(var) => var.serialize(serializer),
            EventPayload::UefiImageLoad(image) => image.serialize(serializer),
            EventPayload::FirmwareBlob(blob) => blob.serialize(serializer),
            EventPayload::FirmwareBlob2(blob) => blob.serialize(serializer),
            EventPayload::StartupLocality(event) => event.serialize(serializer),
            EventPayload::Text(text) => serializer.serialize_str(&bytes_to_printable(text)),
            EventPayload::Opaque(bytes) => serializer.serialize_str(&bytes_to_hex(bytes)),
        }
    }
}

impl Serialize for SpecIdEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("SpecIdEntry", 6)?; // field number
        state.serialize_field("event_number", &self.event_number)?;
        state.serialize_field("pcr_index", &self.header.pcr_index)?;
        state.serialize_field("event_type", &self.header.event_type)?;
        state.serialize_field("digest", &bytes_to_hex(&self.header.digest))?;
        state.serialize_field("event_size", &self.header.event_size)?;
        state.serialize_field("spec_id", &self.spec_id)?;
        state.end()
    }
}

impl Serialize for EventEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("EventEntry", 7)?; // field number
        state.serialize_field("event_number", &self.event_number)?;
        state.serialize_field("pcr_index", &self.header.pcr_index)?;
        state.serialize_field("event_type", &self.header.event_type)?;
        state.serialize_field("digest_count", &self.header.digest_count)?;
        state.serialize_field("digests", &self.digests)?;
        state.serialize_field("event_size", &self.data.as_ref().map(|data| data.event_size))?;
        state.serialize_field("event", &self.data.as_ref().map(|data| &data.payload))?;
        state.end()
    }
}

impl Serialize for LogEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        match self {
            LogEntry::SpecId(entry) => entry.serialize(serializer),
            LogEntry::Event(entry) => entry.serialize(serializer),
        }
    }
}

/// One bank as `{"0": "<hex>", ..., "23": "<hex>"}`
struct BankValues<'a, const N: usize>(&'a [[u8; N]; PCR_COUNT]);

impl<const N: usize> Serialize for BankValues<'_, N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut map = serializer.serialize_map(Some(PCR_COUNT))?;
        for (i, value) in self.0.iter().enumerate() {
            map.serialize_entry(&i.to_string(), &bytes_to_hex(value))?;
        }
        map.end()
    }
}

impl Serialize for PcrBanks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("PcrBanks", 2)?; // field number
        state.serialize_field("sha1", &BankValues(self.sha1()))?;
        state.serialize_field("sha256", &BankValues(self.sha256()))?;
        state.end()
    }
}

impl Serialize for EventLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        let mut state = serializer.serialize_struct("EventLog", 2)?; // field number
        state.serialize_field("events", &self.entries)?;
        state.serialize_field("pcrs", &self.banks)?;
        state.end()
    }
}
