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

//! In-memory event log.
//!
//! `EventLog` is the buffering counterpart of `YamlRenderer`: it keeps every decoded event
//! together with the final PCR banks and converts the whole log to JSON on request.
//!
//! # Examples
//! ```no_run
//! use tpm_eventlog_core::EventLog;
//!
//! let data = std::fs::read("binary_bios_measurements").unwrap();
//! let event_log = EventLog::parse(&data).unwrap();
//! println!("{}", serde_json::to_string_pretty(&event_log.to_json_value().unwrap()).unwrap());
//! ```

use serde_json::Value;
use crate::error::{EventLogError, ExtendWarning};
use crate::event::model::{DigestEntry, EventData, EventHeader, LegacyEventHeader, SpecIdEvent};
use crate::pcr::PcrBanks;
use crate::render::EventRenderer;
use crate::session::parse_event_log;

/// The legacy-format first event of the log
#[derive(Debug, Clone)]
pub struct SpecIdEntry {
    pub event_number: usize,
    pub header: LegacyEventHeader,
    pub spec_id: SpecIdEvent,
}

/// One crypto-agile event
#[derive(Debug, Clone)]
pub struct EventEntry {
    pub event_number: usize,
    pub header: EventHeader,
    pub digests: Vec<DigestEntry>,
    pub data: Option<EventData>,
}

#[derive(Debug, Clone)]
pub enum LogEntry {
    SpecId(SpecIdEntry),
    Event(EventEntry),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub entries: Vec<LogEntry>,
    pub banks: Option<PcrBanks>,
    pub warnings: Vec<ExtendWarning>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a binary event log into memory
    ///
    /// # Errors
    /// * `EventLogError` - The log is structurally invalid
    pub fn parse(data: &[u8]) -> Result<Self, EventLogError> {
        let mut event_log = Self::new();
        let summary = parse_event_log(data, &mut event_log)?;
        event_log.warnings = summary.warnings;
        Ok(event_log)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert the parsed log into a JSON value
    ///
    /// # Returns
    /// * `{"events": [...], "pcrs": {"sha1": {...}, "sha256": {...}}}`
    ///
    /// # Errors
    /// * `EventLogError::InternalError` - The log is incomplete or serialization failed
    pub fn to_json_value(&self) -> Result<Value, EventLogError> {
        if self.banks.is_none() {
            return Err(EventLogError::InternalError(
                "Event log has not been completely parsed".to_string()
            ));
        }

        serde_json::to_value(self)
            .map_err(|e| EventLogError::InternalError(
                format!("Failed to serialize event log: {}", e)
            ))
    }

    fn current_event(&mut self) -> Result<&mut EventEntry, EventLogError> {
        match self.entries.last_mut() {
            Some(LogEntry::Event(entry)) => Ok(entry),
            _ => Err(EventLogError::InternalError(
                "Event content received before its header".to_string()
            )),
        }
    }
}

impl EventRenderer for EventLog {
    fn begin(&mut self) -> Result<(), EventLogError> {
        self.entries.clear();
        self.banks = None;
        self.warnings.clear();
        Ok(())
    }

    fn spec_id_event(
        &mut self,
        event_number: usize,
        header: &LegacyEventHeader,
        spec_id: &SpecIdEvent,
    ) -> Result<(), EventLogError> {
        self.entries.push(LogEntry::SpecId(SpecIdEntry {
            event_number,
            header: header.clone(),
            spec_id: spec_id.clone(),
        }));
        Ok(())
    }

    fn event_header(&mut self, event_number: usize, header: &EventHeader) -> Result<(), EventLogError> {
        self.entries.push(LogEntry::Event(EventEntry {
            event_number,
            header: header.clone(),
            digests: Vec::with_capacity(header.digest_count as usize),
            data: None,
        }));
        Ok(())
    }

    fn digest(&mut self, digest: &DigestEntry) -> Result<(), EventLogError> {
        self.current_event()?.digests.push(digest.clone());
        Ok(())
    }

    fn event_data(&mut self, data: &EventData) -> Result<(), EventLogError> {
        self.current_event()?.data = Some(data.clone());
        Ok(())
    }

    fn pcr_banks(&mut self, banks: &PcrBanks) -> Result<(), EventLogError> {
        self.banks = Some(banks.clone());
        Ok(())
    }
}
