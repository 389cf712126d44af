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

//! Parse session, the state of one parse call.
//!
//! `LogSession` sits between the walker and a renderer: it numbers the events, tracks the PCR
//! the current event targets, replays every digest into the banks and collects the
//! warnings raised along the way.

use std::io::Write;
use log::{debug, info, warn};
use crate::algorithm::AlgorithmId;
use crate::error::{EventLogError, ExtendWarning};
use crate::event::model::{DigestEntry, EventData, EventHeader, LegacyEventHeader, SpecIdEvent};
use crate::event::walker::{walk_event_log, EventLogVisitor};
use crate::pcr::PcrBanks;
use crate::render::{EventRenderer, YamlRenderer};

/// Outcome of a successful parse
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    /// Events decoded, SpecID event included
    pub event_count: usize,
    pub banks: PcrBanks,
    pub warnings: Vec<ExtendWarning>,
}

pub struct LogSession<'r, R: EventRenderer + ?Sized> {
    renderer: &'r mut R,
    event_count: usize,
    current_pcr: Option<u32>,
    banks: PcrBanks,
    warnings: Vec<ExtendWarning>,
}

impl<'r, R: EventRenderer + ?Sized> LogSession<'r, R> {
    pub fn new(renderer: &'r mut R) -> Self {
        Self {
            renderer,
            event_count: 0,
            current_pcr: None,
            banks: PcrBanks::new(),
            warnings: Vec::new(),
        }
    }

    pub fn current_pcr(&self) -> Option<u32> {
        self.current_pcr
    }

    pub fn banks(&self) -> &PcrBanks {
        &self.banks
    }

    pub fn into_summary(self) -> ReplaySummary {
        ReplaySummary {
            event_count: self.event_count,
            banks: self.banks,
            warnings: self.warnings,
        }
    }

    fn extend(&mut self, algorithm: AlgorithmId, digest: &[u8]) -> Result<(), EventLogError> {
        if let Some(warning) = self.banks.extend(self.current_pcr, algorithm, digest)? {
            warn!("{}", warning);
            self.warnings.push(warning);
        }
        Ok(())
    }
}

impl<R: EventRenderer + ?Sized> EventLogVisitor for LogSession<'_, R> {
    fn on_spec_id(&mut self, header: &LegacyEventHeader, spec_id: &SpecIdEvent) -> Result<(), EventLogError> {
        // The SpecID event is EV_NO_ACTION: its digest never reaches a bank.
        self.current_pcr = None;
        debug!(
            "SpecID event: platform class {}, {} digest algorithm(s)",
            spec_id.platform_class,
            spec_id.number_of_algorithms()
        );

        self.renderer.spec_id_event(self.event_count, header, spec_id)?;
        self.event_count += 1;
        Ok(())
    }

    fn on_event_header(&mut self, header: &EventHeader) -> Result<(), EventLogError> {
        self.current_pcr = Some(header.pcr_index);
        debug!(
            "Event {}: PCR{}, type {} (0x{:08x})",
            self.event_count, header.pcr_index, header.event_type, header.event_type_raw
        );

        self.renderer.event_header(self.event_count, header)
    }

    fn on_digest(&mut self, _header: &EventHeader, digest: &DigestEntry) -> Result<(), EventLogError> {
        self.renderer.digest(digest)?;
        self.extend(digest.algorithm_id, &digest.digest)
    }

    fn on_event_data(&mut self, _header: &EventHeader, data: &EventData) -> Result<(), EventLogError> {
        debug!("Event {}: {} bytes of event data", self.event_count, data.event_size);
        self.renderer.event_data(data)?;
        self.event_count += 1;
        Ok(())
    }
}

/// Parse a whole event log, rendering it and replaying its digests
///
/// Events reach `renderer` as they are decoded; the PCR banks are handed over only after the
/// last event. On error the renderer may already hold some events, which must not be
/// treated as complete.
///
/// # Errors
/// * `EventLogError` when the log is structurally invalid or the renderer fails
pub fn parse_event_log(data: &[u8], renderer: &mut dyn EventRenderer) -> Result<ReplaySummary, EventLogError> {
    renderer.begin()?;

    let mut session = LogSession::new(&mut *renderer);
    walk_event_log(data, &mut session)?;
    let summary = session.into_summary();

    renderer.pcr_banks(&summary.banks)?;
    info!(
        "Parsed {} events from {} bytes, {} extend warning(s)",
        summary.event_count,
        data.len(),
        summary.warnings.len()
    );
    Ok(summary)
}

/// Parse `data` and write the YAML document to `out`
///
/// # Example
/// ```no_run
/// let data = std::fs::read("/sys/kernel/security/tpm0/binary_bios_measurements").unwrap();
/// let mut out = std::io::stdout();
/// let summary = tpm_eventlog_core::yaml_eventlog(&data, &mut out).unwrap();
/// println!("{} events", summary.event_count);
/// ```
pub fn yaml_eventlog(data: &[u8], out: &mut dyn Write) -> Result<ReplaySummary, EventLogError> {
    let mut renderer = YamlRenderer::new(out);
    parse_event_log(data, &mut renderer)
}
