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

//! PCR replay, simulate the PCR banks a TPM holds after the logged extends.
//!
//! # Examples
//! ```
//! use tpm_eventlog_core::{AlgorithmId, PcrBanks};
//!
//! let mut banks = PcrBanks::new();
//! let warning = banks.extend(Some(7), AlgorithmId::Sha256, &[0xab; 32]).unwrap();
//! assert!(warning.is_none());
//! assert_ne!(banks.sha256()[7], [0u8; 32]);
//! assert_eq!(banks.sha1()[7], [0u8; 20]);
//! ```

use openssl::hash::Hasher;
use crate::algorithm::AlgorithmId;
use crate::error::{EventLogError, ExtendWarning};

/// Number of PCRs modelled per bank
pub const PCR_COUNT: usize = 24;

pub const SHA1_PCR_SIZE: usize = 20;
pub const SHA256_PCR_SIZE: usize = 32;

/// SHA-1 and SHA-256 PCR banks, every slot starting all-zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcrBanks {
    sha1: [[u8; SHA1_PCR_SIZE]; PCR_COUNT],
    sha256: [[u8; SHA256_PCR_SIZE]; PCR_COUNT],
}

impl Default for PcrBanks {
    fn default() -> Self {
        Self::new()
    }
}

impl PcrBanks {
    pub fn new() -> Self {
        Self {
            sha1: [[0u8; SHA1_PCR_SIZE]; PCR_COUNT],
            sha256: [[0u8; SHA256_PCR_SIZE]; PCR_COUNT],
        }
    }

    pub fn sha1(&self) -> &[[u8; SHA1_PCR_SIZE]; PCR_COUNT] {
        &self.sha1
    }

    pub fn sha256(&self) -> &[[u8; SHA256_PCR_SIZE]; PCR_COUNT] {
        &self.sha256
    }

    /// Extend one PCR: `new = Hash(old || digest)`
    ///
    /// # Arguments
    ///
    /// * `pcr_index` - PCR to extend, `None` skips the extend
    /// * `algorithm` - Bank selector and hash function
    /// * `digest` - Measured digest
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - The bank was extended, or nothing was to be done
    /// * `Ok(Some(warning))` - The banks were left untouched for the reason given
    ///
    /// # Errors
    ///
    /// * `EventLogError::InternalError` - The hash primitive failed
    pub fn extend(
        &mut self,
        pcr_index: Option<u32>,
        algorithm: AlgorithmId,
        digest: &[u8],
    ) -> Result<Option<ExtendWarning>, EventLogError> {
        let Some(pcr_index) = pcr_index else {
            return Ok(None);
        };

        let index = pcr_index as usize;
        if index >= PCR_COUNT {
            return Ok(Some(ExtendWarning::InvalidPcrIndex { pcr_index }));
        }

        let slot: &mut [u8] = match algorithm {
            AlgorithmId::Sha1 => &mut self.sha1[index],
            AlgorithmId::Sha256 => &mut self.sha256[index],
            _ => {
                return Ok(Some(ExtendWarning::UnsupportedAlgorithm {
                    pcr_index,
                    algorithm,
                    size: digest.len(),
                }))
            }
        };

        if digest.len() != slot.len() {
            return Ok(Some(ExtendWarning::DigestSizeMismatch {
                pcr_index,
                algorithm,
                size: digest.len(),
            }));
        }

        let new_value = extend_value(algorithm, slot, digest)?;
        slot.copy_from_slice(&new_value);
        Ok(None)
    }
}

fn extend_value(algorithm: AlgorithmId, old_value: &[u8], digest: &[u8]) -> Result<Vec<u8>, EventLogError> {
    let mut hasher = Hasher::new(algorithm.message_digest()?)
        .map_err(|e| EventLogError::InternalError(
            format!("Failed to create hasher: {}", e)
        ))?;

    hasher.update(old_value)
        .map_err(|e| EventLogError::InternalError(
            format!("Failed to update hash: {}", e)
        ))?;
    hasher.update(digest)
        .map_err(|e| EventLogError::InternalError(
            format!("Failed to update hash: {}", e)
        ))?;

    let new_value = hasher.finish()
        .map_err(|e| EventLogError::InternalError(
            format!("Failed to finalize hash calculation: {}", e)
        ))?;

    Ok(new_value.to_vec())
}
