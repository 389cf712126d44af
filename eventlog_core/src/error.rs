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

//! Error types shared by every stage of event log processing.

use std::fmt;
use thiserror::Error;
use crate::algorithm::AlgorithmId;

/// Fatal error, the parse stops and nothing emitted so far may be trusted.
#[derive(Error, Debug)]
pub enum EventLogError {
    /// Truncated or malformed log structure
    #[error("Input error: {0}")]
    InputError(String),

    /// Text field inside an event payload could not be decoded
    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// The rendering sink refused a write
    #[error("Output error: {0}")]
    OutputError(#[from] std::io::Error),
}

/// Recoverable condition raised while replaying a digest into a PCR bank.
///
/// The event is still decoded and rendered; only the bank is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendWarning {
    /// PCR index outside the modelled register range
    InvalidPcrIndex { pcr_index: u32 },
    /// Digest length differs from the bank slot size of its algorithm
    DigestSizeMismatch { pcr_index: u32, algorithm: AlgorithmId, size: usize },
    /// No bank is modelled for the algorithm
    UnsupportedAlgorithm { pcr_index: u32, algorithm: AlgorithmId, size: usize },
}

impl fmt::Display for ExtendWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPcrIndex { pcr_index } => write!(f, "PCR{} is invalid", pcr_index),
            Self::DigestSizeMismatch { pcr_index, algorithm, size } => write!(
                f,
                "PCR{}: extended with {} digest of invalid size {}",
                pcr_index, algorithm, size
            ),
            Self::UnsupportedAlgorithm { pcr_index, algorithm, size } => write!(
                f,
                "PCR{}: extended with invalid algorithm {} and size {}",
                pcr_index, algorithm, size
            ),
        }
    }
}
