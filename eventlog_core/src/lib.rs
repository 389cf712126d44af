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

mod algorithm;
mod byte_reader;
mod codec;
mod error;
mod event;
mod pcr;
mod render;
mod session;

pub use algorithm::{
    AlgorithmId,
    TPM_ALG_SHA1, TPM_ALG_SHA256, TPM_ALG_SHA384, TPM_ALG_SHA512, TPM_ALG_SM3_256
};
pub use byte_reader::{
    ByteReader, ByteParseable,
    UEFI_GUID_SIZE
};
pub use codec::{bytes_to_hex, bytes_to_printable, decode_utf16le, text_to_printable};
pub use error::{EventLogError, ExtendWarning};
pub use event::model::{
    SHA1_DIGEST_SIZE, NO_ACTION_SIGNATURE_SIZE, LEGACY_EVENT_HEADER_SIZE,
    SPEC_ID_EVENT_SIGNATURE_03, STARTUP_LOCALITY_SIGNATURE,
    EventType, LegacyEventHeader, EventHeader, DigestEntry,
    SpecIdAlgorithm, SpecIdEvent,
    UefiVariableData, UefiImageLoadEvent, UefiPlatformFirmwareBlob, UefiPlatformFirmwareBlob2,
    StartupLocalityEvent, EventPayload, EventData
};
pub use event::parser::decode_event_payload;
pub use event::walker::{EventLogVisitor, EventLogWalker, WalkState, walk_event_log};
pub use event::log::{EventLog, LogEntry, SpecIdEntry, EventEntry};
pub use pcr::{PcrBanks, PCR_COUNT, SHA1_PCR_SIZE, SHA256_PCR_SIZE};
pub use render::{EventRenderer, YamlRenderer};
pub use session::{LogSession, ReplaySummary, parse_event_log, yaml_eventlog};
