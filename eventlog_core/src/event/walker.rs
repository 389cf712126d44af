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

//! Event log walker.
//!
//! Decodes a crypto-agile event log in a single pass and reports every decoded piece to an
//! [`EventLogVisitor`]. The walk moves through the states
//! `Start -> SpecIdDecoded -> EventDecoded* -> Done`; any structural error moves it to
//! `Failed` and is returned to the caller with the event number and type attached.
//!
//! For every crypto-agile event the visitor sees, in order: the header, each digest, the payload.

use crate::algorithm::AlgorithmId;
use crate::byte_reader::{ByteParseable, ByteReader};
use crate::error::EventLogError;
use crate::event::model::{
    DigestEntry, EventData, EventHeader, EventType, LegacyEventHeader, SpecIdEvent,
    LEGACY_EVENT_HEADER_SIZE,
};
use crate::event::parser::decode_event_payload;

/// Observer of a log walk
///
/// Returning an error from any callback aborts the walk with that error.
pub trait EventLogVisitor {
    /// The legacy-format first event and the SpecID structure it carries
    fn on_spec_id(&mut self, header: &LegacyEventHeader, spec_id: &SpecIdEvent) -> Result<(), EventLogError>;

    fn on_event_header(&mut self, header: &EventHeader) -> Result<(), EventLogError>;

    fn on_digest(&mut self, header: &EventHeader, digest: &DigestEntry) -> Result<(), EventLogError>;

    fn on_event_data(&mut self, header: &EventHeader, data: &EventData) -> Result<(), EventLogError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Start,
    SpecIdDecoded,
    EventDecoded,
    Done,
    Failed,
}

/// Single-use walker over one event log buffer
pub struct EventLogWalker<'a> {
    parser: ByteReader<'a>,
    state: WalkState,
    event_number: usize,
}

impl<'a> EventLogWalker<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            parser: ByteReader::new(data),
            state: WalkState::Start,
            event_number: 0,
        }
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Walk the whole log, returning the number of events decoded (SpecID event included)
    ///
    /// # Errors
    /// * `InputError` for truncated or inconsistent records
    /// * `DecodeError` for undecodable text inside a payload
    /// * any error returned by the visitor
    pub fn walk(&mut self, visitor: &mut dyn EventLogVisitor) -> Result<usize, EventLogError> {
        match self.walk_inner(visitor) {
            Ok(()) => {
                self.state = WalkState::Done;
                Ok(self.event_number)
            }
            Err(e) => {
                self.state = WalkState::Failed;
                Err(e)
            }
        }
    }

    fn walk_inner(&mut self, visitor: &mut dyn EventLogVisitor) -> Result<(), EventLogError> {
        if self.state != WalkState::Start {
            return Err(EventLogError::InternalError(
                format!("Event log walker reused in state {:?}", self.state)
            ));
        }

        let spec_id = self.read_spec_id_event(visitor)?;
        self.state = WalkState::SpecIdDecoded;

        while !self.parser.is_end() {
            self.read_event(&spec_id, visitor)?;
            self.state = WalkState::EventDecoded;
        }
        Ok(())
    }

    fn read_spec_id_event(&mut self, visitor: &mut dyn EventLogVisitor) -> Result<SpecIdEvent, EventLogError> {
        let number = self.event_number;
        let fail = |e: EventLogError| with_event_context(e, number, None);

        self.parser
            .ensure_remaining(LEGACY_EVENT_HEADER_SIZE, "legacy event header")
            .map_err(fail)?;
        let header = LegacyEventHeader::parse_from(&mut self.parser).map_err(fail)?;

        let event_type = header.event_type;
        let fail = |e: EventLogError| with_event_context(e, number, Some(event_type));
        if event_type != EventType::EvNoAction {
            return Err(fail(EventLogError::InputError(
                "First event is not a SpecID event".to_string()
            )));
        }

        let event_size = self.parser
            .checked_length(u64::from(header.event_size), "SpecID event data")
            .map_err(fail)?;
        let mut event_parser = self.parser.sub_reader(event_size).map_err(fail)?;
        let spec_id = SpecIdEvent::parse_from(&mut event_parser).map_err(fail)?;

        visitor.on_spec_id(&header, &spec_id).map_err(fail)?;
        self.event_number += 1;

        Ok(spec_id)
    }

    fn read_event(&mut self, spec_id: &SpecIdEvent, visitor: &mut dyn EventLogVisitor) -> Result<(), EventLogError> {
        let number = self.event_number;
        let header = EventHeader::parse_from(&mut self.parser)
            .map_err(|e| with_event_context(e, number, None))?;

        let event_type = header.event_type;
        let fail = |e: EventLogError| with_event_context(e, number, Some(event_type));

        if header.digest_count as usize != spec_id.number_of_algorithms() {
            return Err(fail(EventLogError::InputError(format!(
                "Digest count {} does not match the {} algorithms declared by the SpecID event",
                header.digest_count,
                spec_id.number_of_algorithms()
            ))));
        }

        visitor.on_event_header(&header).map_err(fail)?;

        for _ in 0..header.digest_count {
            let algorithm_id = AlgorithmId::from(self.parser.read_u16().map_err(fail)?);
            let digest_size = spec_id.digest_size_of(algorithm_id).ok_or_else(|| {
                fail(EventLogError::InputError(format!(
                    "Digest algorithm {} is not declared by the SpecID event",
                    algorithm_id
                )))
            })?;
            let digest = self.parser.read_bytes(digest_size).map_err(fail)?;

            visitor
                .on_digest(&header, &DigestEntry::new(algorithm_id, digest.to_vec()))
                .map_err(fail)?;
        }

        let event_size = self.parser.read_u32().map_err(fail)?;
        let data_length = self.parser
            .checked_length(u64::from(event_size), "event data")
            .map_err(fail)?;
        let data = self.parser.read_bytes(data_length).map_err(fail)?;
        let payload = decode_event_payload(event_type, data).map_err(fail)?;

        visitor
            .on_event_data(&header, &EventData { event_size, payload })
            .map_err(fail)?;
        self.event_number += 1;

        Ok(())
    }
}

/// Walk `data` with a fresh [`EventLogWalker`]
pub fn walk_event_log(data: &[u8], visitor: &mut dyn EventLogVisitor) -> Result<usize, EventLogError> {
    EventLogWalker::new(data).walk(visitor)
}

fn with_event_context(err: EventLogError, event_number: usize, event_type: Option<EventType>) -> EventLogError {
    let context = match event_type {
        Some(event_type) => format!("event_number: {}, event_type: {}", event_number, event_type),
        None => format!("event_number: {}", event_number),
    };

    match err {
        EventLogError::InputError(msg) => EventLogError::InputError(format!("{}, {}", msg, context)),
        EventLogError::DecodeError(msg) => EventLogError::DecodeError(format!("{}, {}", msg, context)),
        EventLogError::InternalError(msg) => EventLogError::InternalError(format!("{}, {}", msg, context)),
        other => other,
    }
}
