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

//! Renderers, turning decoded events and the final PCR banks into a document.
//!
//! A renderer is fed by `LogSession` in log order. `YamlRenderer` streams each event to its
//! writer as soon as it is observed; the PCR tables are written only once the walk succeeded.

use std::io::Write;
use crate::codec::{bytes_to_hex, bytes_to_printable, text_to_printable};
use crate::error::EventLogError;
use crate::event::model::{
    DigestEntry, EventData, EventHeader, EventPayload, LegacyEventHeader, SpecIdEvent,
    UefiImageLoadEvent, UefiPlatformFirmwareBlob, UefiPlatformFirmwareBlob2, UefiVariableData,
};
use crate::pcr::PcrBanks;

/// Sink for the pieces of a parsed event log
pub trait EventRenderer {
    /// Called once before the first event
    fn begin(&mut self) -> Result<(), EventLogError>;

    fn spec_id_event(
        &mut self,
        event_number: usize,
        header: &LegacyEventHeader,
        spec_id: &SpecIdEvent,
    ) -> Result<(), EventLogError>;

    fn event_header(&mut self, event_number: usize, header: &EventHeader) -> Result<(), EventLogError>;

    fn digest(&mut self, digest: &DigestEntry) -> Result<(), EventLogError>;

    fn event_data(&mut self, data: &EventData) -> Result<(), EventLogError>;

    /// Final bank values, only called when the whole log was parsed
    fn pcr_banks(&mut self, banks: &PcrBanks) -> Result<(), EventLogError>;
}

/// Streaming YAML document writer
pub struct YamlRenderer<W: Write> {
    out: W,
}

impl<W: Write> YamlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_uefi_variable(&mut self, var: &UefiVariableData) -> Result<(), EventLogError> {
        write!(
            self.out,
            "  Event:\n    - VariableName: {}\n      UnicodeNameLength: {}\n      VariableDataLength: {}\n",
            var.variable_name, var.unicode_name_length, var.variable_data_length
        )?;
        writeln!(self.out, "      UnicodeName: {}", single_quoted(&text_to_printable(&var.unicode_name)))?;
        if !var.variable_data.is_empty() {
            writeln!(self.out, "      VariableData: {}", bytes_to_hex(&var.variable_data))?;
        }
        Ok(())
    }

    fn write_image_load(&mut self, image: &UefiImageLoadEvent) -> Result<(), EventLogError> {
        write!(
            self.out,
            "  Event:\n    - ImageLocationInMemory: 0x{:x}\n      ImageLengthInMemory: {}\n      \
             ImageLinkTimeAddress: 0x{:x}\n      LengthOfDevicePath: {}\n",
            image.image_location_in_memory,
            image.image_length_in_memory,
            image.image_link_time_address,
            image.length_of_device_path
        )?;
        writeln!(self.out, "      DevicePath: {}", bytes_to_hex(&image.device_path))?;
        Ok(())
    }

    fn write_firmware_blob(&mut self, blob: &UefiPlatformFirmwareBlob) -> Result<(), EventLogError> {
        write!(
            self.out,
            "  Event:\n    - BlobBase: 0x{:x}\n      BlobLength: 0x{:x}\n",
            blob.blob_base, blob.blob_length
        )?;
        Ok(())
    }

    fn write_firmware_blob2(&mut self, blob: &UefiPlatformFirmwareBlob2) -> Result<(), EventLogError> {
        write!(
            self.out,
            "  Event:\n    - BlobDescription: {}\n      BlobBase: 0x{:x}\n      BlobLength: 0x{:x}\n",
            single_quoted(&blob.blob_description), blob.blob_base, blob.blob_length
        )?;
        Ok(())
    }
}

impl<W: Write> EventRenderer for YamlRenderer<W> {
    fn begin(&mut self) -> Result<(), EventLogError> {
        writeln!(self.out, "---")?;
        Ok(())
    }

    fn spec_id_event(
        &mut self,
        event_number: usize,
        header: &LegacyEventHeader,
        spec_id: &SpecIdEvent,
    ) -> Result<(), EventLogError> {
        write!(
            self.out,
            "- Event[{}]:\n  PCRIndex: {}\n  EventType: {}\n  Digest: {}\n  EventSize: {}\n",
            event_number,
            header.pcr_index,
            header.event_type,
            bytes_to_hex(&header.digest),
            header.event_size
        )?;

        write!(
            self.out,
            "  SpecID:\n    - Signature: {}\n      platformClass: {}\n      specVersionMinor: {}\n      \
             specVersionMajor: {}\n      specErrata: {}\n      uintnSize: {}\n      \
             numberOfAlgorithms: {}\n      Algorithms:\n",
            spec_id.signature,
            spec_id.platform_class,
            spec_id.spec_version_minor,
            spec_id.spec_version_major,
            spec_id.spec_errata,
            spec_id.uintn_size,
            spec_id.number_of_algorithms()
        )?;

        for (i, alg) in spec_id.digest_sizes.iter().enumerate() {
            write!(
                self.out,
                "        - Algorithm[{}]:\n          algorithmId: {}\n          digestSize: {}\n",
                i, alg.algorithm_id, alg.digest_size
            )?;
        }

        writeln!(self.out, "      vendorInfoSize: {}", spec_id.vendor_info.len())?;
        if !spec_id.vendor_info.is_empty() {
            writeln!(self.out, "      vendorInfo: {}", bytes_to_hex(&spec_id.vendor_info))?;
        }
        Ok(())
    }

    fn event_header(&mut self, event_number: usize, header: &EventHeader) -> Result<(), EventLogError> {
        write!(
            self.out,
            "- Event[{}]:\n  PCRIndex: {}\n  EventType: {}\n  DigestCount: {}\n  Digests:\n",
            event_number, header.pcr_index, header.event_type, header.digest_count
        )?;
        Ok(())
    }

    fn digest(&mut self, digest: &DigestEntry) -> Result<(), EventLogError> {
        write!(
            self.out,
            "    - AlgorithmId: {}\n      Digest: {}\n",
            digest.algorithm_id,
            bytes_to_hex(&digest.digest)
        )?;
        Ok(())
    }

    fn event_data(&mut self, data: &EventData) -> Result<(), EventLogError> {
        writeln!(self.out, "  EventSize: {}", data.event_size)?;

        match &data.payload {
            EventPayload::Empty => {}
            EventPayload::UefiVariable(var) => self.write_uefi_variable(var)?,
            EventPayload::UefiImageLoad(image) => self.write_image_load(image)?,
            EventPayload::FirmwareBlob(blob) => self.write_firmware_blob(blob)?,
            EventPayload::FirmwareBlob2(blob) => self.write_firmware_blob2(blob)?,
            EventPayload::StartupLocality(event) => {
                write!(self.out, "  Event:\n    - StartupLocality: {}\n", event.locality)?;
            }
            EventPayload::Text(text) => {
                writeln!(self.out, "  Event: {}", single_quoted(&bytes_to_printable(text)))?;
            }
            EventPayload::Opaque(bytes) => {
                writeln!(self.out, "  Event: {}", bytes_to_hex(bytes))?;
            }
        }
        Ok(())
    }

    fn pcr_banks(&mut self, banks: &PcrBanks) -> Result<(), EventLogError> {
        writeln!(self.out, "pcrs:")?;

        writeln!(self.out, "  sha1:")?;
        for (i, value) in banks.sha1().iter().enumerate() {
            writeln!(self.out, "    {} : 0x{}", i, bytes_to_hex(value))?;
        }

        writeln!(self.out, "  sha256:")?;
        for (i, value) in banks.sha256().iter().enumerate() {
            writeln!(self.out, "    {} : 0x{}", i, bytes_to_hex(value))?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// YAML single-quoted scalar, quotes inside are doubled
fn single_quoted(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
