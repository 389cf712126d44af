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

mod utils;

use tpm_eventlog_core::{AlgorithmId, ExtendWarning, PcrBanks, PCR_COUNT};
use utils::{extend_sha1, extend_sha256};

/// Test Objective: Verify a single SHA-256 extend against a known answer
/// Expected Result: PCR 0 equals SHA256(32 zero bytes || digest), every other slot stays zero
#[test]
fn test_extend_sha256_known_answer() {
    let mut banks = PcrBanks::new();
    let warning = banks.extend(Some(0), AlgorithmId::Sha256, &[0xab; 32]).unwrap();
    assert!(warning.is_none());

    assert_eq!(
        hex::encode(banks.sha256()[0]),
        "debb3e7acfff6dd18d501042273629f0b79cb206bb8c24f59f62ddb80849403b"
    );
    assert!(banks.sha256()[1..].iter().all(|slot| slot == &[0u8; 32]));
    assert!(banks.sha1().iter().all(|slot| slot == &[0u8; 20]));
}

/// Test Objective: Verify a single SHA-1 extend against a known answer
/// Expected Result: PCR 5 equals SHA1(20 zero bytes || digest)
#[test]
fn test_extend_sha1_known_answer() {
    let mut banks = PcrBanks::new();
    assert!(banks.extend(Some(5), AlgorithmId::Sha1, &[0x11; 20]).unwrap().is_none());

    assert_eq!(hex::encode(banks.sha1()[5]), "b3e26c6ca6785f04dd7187293d802d5b16dad8c1");
    assert_eq!(banks.sha1()[5], extend_sha1(&[0u8; 20], &[0x11; 20]));
}

/// Test Objective: Verify extends accumulate and depend on their order
/// Expected Result: [d1, d2] and [d2, d1] give different values, each matching an independent computation
#[test]
fn test_extend_order_sensitive() {
    let d1 = [0x01u8; 32];
    let d2 = [0x02u8; 32];

    let mut forward = PcrBanks::new();
    forward.extend(Some(0), AlgorithmId::Sha256, &d1).unwrap();
    forward.extend(Some(0), AlgorithmId::Sha256, &d2).unwrap();

    let mut backward = PcrBanks::new();
    backward.extend(Some(0), AlgorithmId::Sha256, &d2).unwrap();
    backward.extend(Some(0), AlgorithmId::Sha256, &d1).unwrap();

    assert_ne!(forward.sha256()[0], backward.sha256()[0]);

    let expected = extend_sha256(&extend_sha256(&[0u8; 32], &d1), &d2);
    assert_eq!(forward.sha256()[0], expected);
}

/// Test Objective: Verify an absent PCR index skips the extend silently
/// Expected Result: No warning and the banks are unchanged
#[test]
fn test_extend_without_pcr_index() {
    let mut banks = PcrBanks::new();
    assert!(banks.extend(None, AlgorithmId::Sha256, &[0xab; 32]).unwrap().is_none());
    assert_eq!(banks, PcrBanks::new());
}

/// Test Objective: Verify PCR indices outside [0, 24) are rejected
/// Expected Result: InvalidPcrIndex warning for 24 and u32::MAX, banks unchanged
#[test]
fn test_extend_invalid_pcr_index() {
    let mut banks = PcrBanks::new();

    let warning = banks.extend(Some(PCR_COUNT as u32), AlgorithmId::Sha256, &[0xab; 32]).unwrap();
    assert_eq!(warning, Some(ExtendWarning::InvalidPcrIndex { pcr_index: 24 }));

    let warning = banks.extend(Some(u32::MAX), AlgorithmId::Sha1, &[0xab; 20]).unwrap();
    assert!(matches!(warning, Some(ExtendWarning::InvalidPcrIndex { .. })));

    assert_eq!(banks, PcrBanks::new());
}

/// Test Objective: Verify a digest of the wrong size is not folded into the bank
/// Expected Result: DigestSizeMismatch naming index, algorithm and size, banks unchanged
#[test]
fn test_extend_digest_size_mismatch() {
    let mut banks = PcrBanks::new();

    let warning = banks.extend(Some(3), AlgorithmId::Sha1, &[0x11; 19]).unwrap();
    assert_eq!(
        warning,
        Some(ExtendWarning::DigestSizeMismatch { pcr_index: 3, algorithm: AlgorithmId::Sha1, size: 19 })
    );
    assert_eq!(
        warning.unwrap().to_string(),
        "PCR3: extended with sha1 digest of invalid size 19"
    );
    assert_eq!(banks, PcrBanks::new());
}

/// Test Objective: Verify digests of algorithms without a bank are rejected
/// Expected Result: UnsupportedAlgorithm for SHA-384 and unknown identifiers, banks unchanged
#[test]
fn test_extend_unsupported_algorithm() {
    let mut banks = PcrBanks::new();

    let warning = banks.extend(Some(0), AlgorithmId::Sha384, &[0u8; 48]).unwrap();
    assert!(matches!(warning, Some(ExtendWarning::UnsupportedAlgorithm { size: 48, .. })));

    let warning = banks.extend(Some(0), AlgorithmId::from(0x0099u16), &[0u8; 32]).unwrap();
    assert_eq!(
        warning.unwrap().to_string(),
        "PCR0: extended with invalid algorithm unknown_0x0099 and size 32"
    );
    assert_eq!(banks, PcrBanks::new());
}

/// Test Objective: Verify the algorithm registry names and sizes
/// Expected Result: Canonical names and digest sizes, unknown identifiers keep their value
#[test]
fn test_algorithm_registry() {
    assert_eq!(AlgorithmId::from(0x0004u16), AlgorithmId::Sha1);
    assert_eq!(AlgorithmId::from(0x000Bu16).to_string(), "sha256");
    assert_eq!(AlgorithmId::from(0x0012u16).to_string(), "sm3_256");
    assert_eq!(AlgorithmId::Sha384.digest_size(), 48);
    assert_eq!(AlgorithmId::Sha512.digest_size(), 64);
    assert_eq!(AlgorithmId::from(0x1234u16).value(), 0x1234);
    assert_eq!(AlgorithmId::from(0x1234u16).digest_size(), 0);
    assert_eq!(AlgorithmId::from_str("SHA256").unwrap(), AlgorithmId::Sha256);
    assert!(AlgorithmId::from_str("md5").is_err());
}
