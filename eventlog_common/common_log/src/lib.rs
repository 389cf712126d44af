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

pub mod config;
pub mod logger;

use std::{path::PathBuf, sync::OnceLock};

static LOGGER: OnceLock<logger::Logger> = OnceLock::new();

/// Initialize logging system from a YAML configuration file
///
/// # Arguments
/// * `config_path` - Path to the logging configuration file
///
/// # Example
/// ```no_run
/// fn main() {
///     common_log::init_with_yaml("logging.yaml").expect("Failed to initialize logger");
///     log::info!("Logger initialized");
/// }
/// ```
pub fn init_with_yaml(config_path: impl Into<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = LogConfig::from_yaml(config_path)?;
    init_with_config(config)
}

/// Initialize logging system with a single stderr logger at `level`
///
/// # Example
/// ```
/// common_log::init_with_level("debug").expect("Failed to initialize logger");
/// log::debug!("Logger initialized");
/// ```
pub fn init_with_level(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    init_with_config(LogConfig::with_level(level))
}

/// Initialize logging system with config
///
/// # Arguments
/// * `config` - LogConfig info
///
/// # Example
/// ```
/// use common_log::config::{LogConfig, LoggerConfig};
/// use common_log::init_with_config;
///
/// let config = LogConfig {
///     loggers: vec![
///         LoggerConfig::console("root", "warn"),
///         LoggerConfig::console("tpm_eventlog_core", "debug"),
///     ],
/// };
/// init_with_config(config).expect("Failed to initialize logger");
/// log::info!("Logger initialized");
/// ```
pub fn init_with_config(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    if LOGGER.get().is_some() {
        return Err("Logger already initialized".into());
    }
    let logger = logger::Logger::new_from_config(config)?;
    if LOGGER.set(logger).is_err() {
        return Err("Logger already initialized".into());
    }
    Ok(())
}

/// Apply a new configuration to the installed logger
pub fn reconfigure(config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    match LOGGER.get() {
        Some(logger) => logger.reconfigure(config),
        None => Err("Logger not initialized".into()),
    }
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

// Re-export log macros for convenient use in other modules
pub use log::{debug, error, info, trace, warn};
pub use logger::parse_level;
use crate::config::LogConfig;
