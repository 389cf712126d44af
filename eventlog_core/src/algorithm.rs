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

//! TPM hash algorithm registry: identifiers, canonical names and digest sizes.

use std::fmt;
use openssl::hash::MessageDigest;
use serde::{Serialize, Serializer};
use crate::error::EventLogError;

pub const TPM_ALG_SHA1: u16 = 0x0004;
pub const TPM_ALG_SHA256: u16 = 0x000B;
pub const TPM_ALG_SHA384: u16 = 0x000C;
pub const TPM_ALG_SHA512: u16 = 0x000D;
pub const TPM_ALG_SM3_256: u16 = 0x0012;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sm3,
    Unknown(u16),
}

impl From<u16> for AlgorithmId {
    fn from(value: u16) -> Self {
        match value {
            TPM_ALG_SHA1 => AlgorithmId::Sha1,
            TPM_ALG_SHA256 => AlgorithmId::Sha256,
            TPM_ALG_SHA384 => AlgorithmId::Sha384,
            TPM_ALG_SHA512 => AlgorithmId::Sha512,
            TPM_ALG_SM3_256 => AlgorithmId::Sm3,
            other => AlgorithmId::Unknown(other),
        }
    }
}

impl AlgorithmId {
    pub fn from_str(s: &str) -> Result<Self, EventLogError> {
        match s.to_lowercase().as_str() {
            "sha1" => Ok(AlgorithmId::Sha1),
            "sha256" => Ok(AlgorithmId::Sha256),
            "sha384" => Ok(AlgorithmId::Sha384),
            "sha512" => Ok(AlgorithmId::Sha512),
            "sm3_256" | "sm3" => Ok(AlgorithmId::Sm3),
            _ => Err(EventLogError::InputError(format!("Unsupported algorithm: {}", s))),
        }
    }

    /// Raw TPM_ALG_ID value
    pub fn value(&self) -> u16 {
        match self {
            AlgorithmId::Sha1 => TPM_ALG_SHA1,
            AlgorithmId::Sha256 => TPM_ALG_SHA256,
            AlgorithmId::Sha384 => TPM_ALG_SHA384,
            AlgorithmId::Sha512 => TPM_ALG_SHA512,
            AlgorithmId::Sm3 => TPM_ALG_SM3_256,
            AlgorithmId::Unknown(value) => *value,
        }
    }

    /// Canonical digest size in bytes, 0 when the algorithm is not known
    pub fn digest_size(&self) -> usize {
        match self {
            AlgorithmId::Sha1 => 20,
            AlgorithmId::Sha256 => 32,
            AlgorithmId::Sha384 => 48,
            AlgorithmId::Sha512 => 64,
            AlgorithmId::Sm3 => 32,
            AlgorithmId::Unknown(_) => 0,
        }
    }

    pub fn message_digest(&self) -> Result<MessageDigest, EventLogError> {
        match self {
            AlgorithmId::Sha1 => Ok(MessageDigest::sha1()),
            AlgorithmId::Sha256 => Ok(MessageDigest::sha256()),
            AlgorithmId::Sha384 => Ok(MessageDigest::sha384()),
            AlgorithmId::Sha512 => Ok(MessageDigest::sha512()),
            AlgorithmId::Sm3 => Ok(MessageDigest::sm3()),
            AlgorithmId::Unknown(_) => Err(EventLogError::InputError(
                format!("Unsupported hash algorithm: {}", self)
            )),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmId::Sha1 => write!(f, "sha1"),
            AlgorithmId::Sha256 => write!(f, "sha256"),
            AlgorithmId::Sha384 => write!(f, "sha384"),
            AlgorithmId::Sha512 => write!(f, "sha512"),
            AlgorithmId::Sm3 => write!(f, "sm3_256"),
            AlgorithmId::Unknown(value) => write!(f, "unknown_0x{:04x}", value),
        }
    }
}

impl Serialize for AlgorithmId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer {
        serializer.serialize_str(&self.to_string())
    }
}
