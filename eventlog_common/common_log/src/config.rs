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

use serde::Deserialize;
use std::path::PathBuf;

/// Path prefix selecting the root logger
pub const ROOT_LOGGER: &str = "root";

/// Default size after which a log file is rolled, 10 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// Default number of rolled log files kept
pub const DEFAULT_MAX_ROLL_COUNT: u32 = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub loggers: Vec<LoggerConfig>,
}

/// One logger, keyed by module path prefix; the prefix "root" configures the root logger
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    pub path_prefix: String,
    pub level: String,
    /// Log to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_max_roll_count")]
    pub max_roll_count: u32,
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_max_roll_count() -> u32 {
    DEFAULT_MAX_ROLL_COUNT
}

impl LoggerConfig {
    /// Console logger writing to stderr
    pub fn console(path_prefix: &str, level: &str) -> Self {
        Self {
            path_prefix: path_prefix.to_string(),
            level: level.to_string(),
            log_file: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_roll_count: DEFAULT_MAX_ROLL_COUNT,
        }
    }
}

impl LogConfig {
    pub fn from_yaml(path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_str = std::fs::read_to_string(path.into())?;
        let config: LogConfig = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }

    /// Configuration with a single stderr root logger
    pub fn with_level(level: &str) -> Self {
        Self {
            loggers: vec![LoggerConfig::console(ROOT_LOGGER, level)],
        }
    }

    pub fn get_logger_config(&self, path_prefix: &str) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| path_prefix.starts_with(&l.path_prefix))
    }

    pub fn get_root_config(&self) -> Option<&LoggerConfig> {
        self.loggers.iter().find(|l| l.path_prefix == ROOT_LOGGER)
    }
}
