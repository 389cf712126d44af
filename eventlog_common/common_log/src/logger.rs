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

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger as SizeBasedTriggerPolicy;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use std::path::{Path, PathBuf};
use crate::config::{LogConfig, LoggerConfig, ROOT_LOGGER};

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S:%3f)} {l} [{M}:{L}] - {m}{n}";

const ROOT_APPENDER: &str = "root_appender";

pub struct Logger {
    handle: Handle,
}

impl Logger {
    pub fn new_from_yaml(config_path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config = LogConfig::from_yaml(config_path)?;
        Self::new_from_config(config)
    }

    pub fn new_from_config(config: LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let log4rs_config = Self::build_config(&config)?;
        let handle = log4rs::init_config(log4rs_config)?;
        Ok(Self { handle })
    }

    /// Replace the active configuration of an installed logger
    pub fn reconfigure(&self, config: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
        self.handle.set_config(Self::build_config(config)?);
        Ok(())
    }

    /// Translate a `LogConfig` into a log4rs configuration without installing it
    ///
    /// Every logger gets its own appender and does not propagate to the root logger.
    /// Without a "root" entry the root logger writes `info` and above to stderr.
    pub fn build_config(config: &LogConfig) -> Result<Config, Box<dyn std::error::Error>> {
        let mut log4rs_config = Config::builder();

        for logger_config in config.loggers.iter().filter(|l| l.path_prefix != ROOT_LOGGER) {
            let appender_name = format!("{}_appender", logger_config.path_prefix);
            log4rs_config = log4rs_config
                .appender(Appender::builder().build(&appender_name, Self::create_appender(logger_config)?));

            let logger = log4rs::config::Logger::builder()
                .appender(appender_name)
                .additive(false)
                .build(
                    logger_config.path_prefix.clone(),
                    parse_level(&logger_config.level),
                );
            log4rs_config = log4rs_config.logger(logger);
        }

        let root_config = config
            .get_root_config()
            .cloned()
            .unwrap_or_else(|| LoggerConfig::console(ROOT_LOGGER, "info"));
        log4rs_config = log4rs_config
            .appender(Appender::builder().build(ROOT_APPENDER, Self::create_appender(&root_config)?));
        let root = Root::builder()
            .appender(ROOT_APPENDER)
            .build(parse_level(&root_config.level));

        Ok(log4rs_config.build(root)?)
    }

    fn create_appender(config: &LoggerConfig) -> Result<Box<dyn Append>, Box<dyn std::error::Error>> {
        let encoder = Box::new(PatternEncoder::new(LOG_PATTERN));

        let Some(log_file) = &config.log_file else {
            let appender = ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(encoder)
                .build();
            return Ok(Box::new(appender));
        };

        if let Some(log_directory) = Path::new(log_file).parent() {
            if !log_directory.as_os_str().is_empty() {
                std::fs::create_dir_all(log_directory)?;
            }
        }

        // Configure rolling policy
        let archived_log_pattern = format!("{}.{{}}", log_file);
        let size_trigger = SizeBasedTriggerPolicy::new(config.max_file_size);
        let roller =
            FixedWindowRoller::builder().build(&archived_log_pattern, config.max_roll_count)?;
        let compound_policy = CompoundPolicy::new(Box::new(size_trigger), Box::new(roller));

        let appender = RollingFileAppender::builder()
            .encoder(encoder)
            .build(log_file, Box::new(compound_policy))?;

        Ok(Box::new(appender))
    }
}

/// Parse a level name case-insensitively, unknown names fall back to `info`
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}
