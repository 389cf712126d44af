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

use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

const EV_POST_CODE: u32 = 0x00000001;

/// SpecID event declaring SHA-256, optionally followed by one post-code event on PCR 7
fn write_log(with_event: bool, truncate: usize) -> NamedTempFile {
    let mut spec_id = Vec::new();
    spec_id.extend_from_slice(b"Spec ID Event03\0");
    spec_id.extend_from_slice(&0u32.to_le_bytes());
    spec_id.extend_from_slice(&[0, 2, 0, 2]);
    spec_id.extend_from_slice(&1u32.to_le_bytes());
    spec_id.extend_from_slice(&0x000Bu16.to_le_bytes());
    spec_id.extend_from_slice(&32u16.to_le_bytes());
    spec_id.push(0);

    let mut data = Vec::new();
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&3u32.to_le_bytes());
    data.extend_from_slice(&[0u8; 20]);
    data.extend_from_slice(&(spec_id.len() as u32).to_le_bytes());
    data.extend_from_slice(&spec_id);

    if with_event {
        data.extend_from_slice(&7u32.to_le_bytes());
        data.extend_from_slice(&EV_POST_CODE.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&0x000Bu16.to_le_bytes());
        data.extend_from_slice(&[0xab; 32]);
        data.extend_from_slice(&9u32.to_le_bytes());
        data.extend_from_slice(b"POST CODE");
    }
    data.truncate(data.len() - truncate);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file
}

fn tpm2_eventlog() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tpm2_eventlog"));
    command.env_remove("TPM2_EVENTLOG_FORMAT");
    command.env_remove("TPM2_EVENTLOG_LOG_LEVEL");
    command
}

/// Test Objective: Verify the default YAML output of a valid log
/// Expected Result: Exit status 0 and a document with both events and the PCR tables
#[test]
fn test_cli_yaml_output() {
    let log = write_log(true, 0);
    let output = tpm2_eventlog().arg(log.path()).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("---\n- Event[0]:\n"));
    assert!(stdout.contains("- Event[1]:\n  PCRIndex: 7\n"));
    assert!(stdout.contains("  Event: 'POST CODE'\n"));
    assert!(stdout.contains("pcrs:\n  sha1:\n"));
}

/// Test Objective: Verify the JSON output selected through the environment
/// Expected Result: Exit status 0 and a JSON document with two events
#[test]
fn test_cli_json_output_from_env() {
    let log = write_log(true, 0);
    let output = tpm2_eventlog()
        .arg(log.path())
        .env("TPM2_EVENTLOG_FORMAT", "json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["events"].as_array().unwrap().len(), 2);
    assert_eq!(value["pcrs"]["sha256"].as_object().unwrap().len(), 24);
}

/// Test Objective: Verify the document can be written to a file
/// Expected Result: Nothing on stdout, the file holds the YAML document
#[test]
fn test_cli_output_file() {
    let log = write_log(false, 0);
    let out = NamedTempFile::new().unwrap();
    let output = tpm2_eventlog()
        .arg(log.path())
        .arg("--output")
        .arg(out.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let document = std::fs::read_to_string(out.path()).unwrap();
    assert!(document.contains("  SpecID:\n"));
}

/// Test Objective: Verify a truncated log is reported as a parse failure
/// Expected Result: Exit status 1, the error on stderr and no PCR tables on stdout
#[test]
fn test_cli_truncated_log() {
    let log = write_log(true, 3);
    let output = tpm2_eventlog().arg(log.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("pcrs:"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to parse event log"));
}

/// Test Objective: Verify a missing input file is a usage error
/// Expected Result: Exit status 2
#[test]
fn test_cli_missing_file() {
    let output = tpm2_eventlog()
        .arg("/nonexistent/binary_bios_measurements")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}
