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
use common_log::config::{LogConfig, LoggerConfig, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_ROLL_COUNT};
use common_log::logger::Logger;
use common_log::parse_level;
use log::LevelFilter;
use serial_test::serial;
use tempfile::{tempdir, NamedTempFile};

/// Test Objective: Verify a YAML logging configuration is read with defaults filled in
/// Expected Result: Both loggers are present, the file logger keeps its path and the rolling defaults apply
#[test]
fn test_log_config_from_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "loggers:\n  - path_prefix: root\n    level: warn\n  - path_prefix: tpm_eventlog_core\n    level: debug\n    log_file: logs/eventlog.log\n"
    ).unwrap();

    let config = LogConfig::from_yaml(file.path()).unwrap();
    assert_eq!(config.loggers.len(), 2);

    let root = config.get_root_config().unwrap();
    assert_eq!(root.level, "warn");
    assert!(root.log_file.is_none());

    let core = config.get_logger_config("tpm_eventlog_core::session").unwrap();
    assert_eq!(core.log_file.as_deref(), Some("logs/eventlog.log"));
    assert_eq!(core.max_file_size, DEFAULT_MAX_FILE_SIZE);
    assert_eq!(core.max_roll_count, DEFAULT_MAX_ROLL_COUNT);
}

/// Test Objective: Verify a malformed configuration file is rejected
/// Expected Result: from_yaml returns an error instead of panicking
#[test]
fn test_log_config_from_invalid_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "loggers: [ path_prefix: root").unwrap();
    assert!(LogConfig::from_yaml(file.path()).is_err());

    assert!(LogConfig::from_yaml("/nonexistent/logging.yaml").is_err());
}

/// Test Objective: Verify level names are parsed case-insensitively
/// Expected Result: Known names map to their filter, unknown names fall back to info
#[test]
fn test_parse_level() {
    assert_eq!(parse_level("TRACE"), LevelFilter::Trace);
    assert_eq!(parse_level("debug"), LevelFilter::Debug);
    assert_eq!(parse_level("Warn"), LevelFilter::Warn);
    assert_eq!(parse_level("error"), LevelFilter::Error);
    assert_eq!(parse_level("off"), LevelFilter::Off);
    assert_eq!(parse_level("verbose"), LevelFilter::Info);
}

/// Test Objective: Verify a file logger configuration builds and creates its log directory
/// Expected Result: build_config succeeds and the directory of the log file exists
#[test]
fn test_build_config_with_file_logger() {
    let dir = tempdir().unwrap();
    let log_file = dir.path().join("nested").join("eventlog.log");

    let mut file_logger = LoggerConfig::console("tpm_eventlog_core", "debug");
    file_logger.log_file = Some(log_file.to_string_lossy().to_string());
    let config = LogConfig {
        loggers: vec![LoggerConfig::console("root", "warn"), file_logger],
    };

    let log4rs_config = Logger::build_config(&config).unwrap();
    assert_eq!(log4rs_config.loggers().len(), 1);
    assert_eq!(log4rs_config.root().level(), LevelFilter::Warn);
    assert!(dir.path().join("nested").is_dir());
}

/// Test Objective: Verify explicit rolling limits are read from YAML and accepted by the rolling appender
/// Expected Result: The limits override the defaults and build_config creates the log directory
#[test]
fn test_build_config_with_rolling_limits() {
    let dir = tempdir().unwrap();
    let log_file = dir.path().join("rolling").join("eventlog.log");
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "loggers:\n  - path_prefix: root\n    level: info\n    log_file: '{}'\n    max_file_size: 1024\n    max_roll_count: 3\n",
        log_file.to_string_lossy()
    ).unwrap();

    let config = LogConfig::from_yaml(file.path()).unwrap();
    let root = config.get_root_config().unwrap();
    assert_eq!(root.max_file_size, 1024);
    assert_eq!(root.max_roll_count, 3);

    let log4rs_config = Logger::build_config(&config).unwrap();
    assert_eq!(log4rs_config.root().level(), LevelFilter::Info);
    assert_eq!(log4rs_config.appenders().len(), 1);
    assert!(dir.path().join("rolling").is_dir());
}

/// Test Objective: Verify a configuration without a root entry still gets a root logger
/// Expected Result: The root logger defaults to info
#[test]
fn test_build_config_without_root() {
    let config = LogConfig {
        loggers: vec![LoggerConfig::console("tpm2_eventlog", "trace")],
    };

    let log4rs_config = Logger::build_config(&config).unwrap();
    assert_eq!(log4rs_config.root().level(), LevelFilter::Info);
    assert_eq!(log4rs_config.loggers()[0].name(), "tpm2_eventlog");
}

/// Test Objective: Verify the global logger can only be installed once
/// Expected Result: The first initialization succeeds, the second one reports an error
#[test]
#[serial]
fn test_init_twice() {
    assert!(!common_log::is_initialized());
    assert!(common_log::reconfigure(&LogConfig::with_level("debug")).is_err());

    common_log::init_with_level("info").unwrap();
    assert!(common_log::is_initialized());
    log::info!("logger installed");

    let result = common_log::init_with_level("debug");
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "Logger already initialized");

    assert!(common_log::reconfigure(&LogConfig::with_level("debug")).is_ok());
}
