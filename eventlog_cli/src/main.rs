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

use clap::{Parser, ValueEnum};
use log::{error, info};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tpm_eventlog_core::{yaml_eventlog, EventLog, EventLogError};

const EXIT_PARSE_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Streaming YAML document
    Yaml,
    /// JSON document, written once the whole log is parsed
    Json,
}

#[derive(Parser)]
#[clap(author, version, about = "Display a TPM2 event log and replay its PCR banks", long_about = None)]
struct Cli {
    /// Binary event log, e.g. /sys/kernel/security/tpm0/binary_bios_measurements
    #[clap(value_name = "FILE")]
    file: PathBuf,

    #[clap(short, long, value_enum, env = "TPM2_EVENTLOG_FORMAT", default_value = "yaml")]
    format: OutputFormat,

    /// trace, debug, info, warn, error or off
    #[clap(long, env = "TPM2_EVENTLOG_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// YAML logging configuration, takes precedence over --log-level
    #[clap(long)]
    log_config: Option<PathBuf>,

    /// Write the document to this file instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.log_config {
        Some(path) => common_log::init_with_yaml(path),
        None => common_log::init_with_level(&cli.log_level),
    }
}

fn open_output(output: &Option<PathBuf>) -> io::Result<Box<dyn Write>> {
    match output {
        Some(path) => Ok(Box::new(BufWriter::new(fs::File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn render_json(data: &[u8], out: &mut dyn Write) -> Result<(), EventLogError> {
    let event_log = EventLog::parse(data)?;
    let json_value = event_log.to_json_value()?;

    serde_json::to_writer_pretty(&mut *out, &json_value)
        .map_err(|e| EventLogError::OutputError(e.into()))?;
    writeln!(out)?;
    Ok(())
}

fn run(cli: &Cli, data: &[u8], out: &mut dyn Write) -> Result<(), EventLogError> {
    match cli.format {
        OutputFormat::Yaml => {
            let summary = yaml_eventlog(data, out)?;
            info!("{} events, {} extend warning(s)", summary.event_count, summary.warnings.len());
        }
        OutputFormat::Json => render_json(data, out)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    let data = match fs::read(&cli.file) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to read event log {}: {}", cli.file.display(), e);
            eprintln!("Failed to read event log {}: {}", cli.file.display(), e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let mut out = match open_output(&cli.output) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to open output: {}", e);
            eprintln!("Failed to open output: {}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let result = run(&cli, &data, out.as_mut());
    // Partial YAML stays visible for diagnostics even when the parse failed.
    if let Err(e) = out.flush() {
        eprintln!("Failed to write output: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(EventLogError::OutputError(e)) => {
            error!("Failed to write output: {}", e);
            eprintln!("Failed to write output: {}", e);
            ExitCode::from(EXIT_USAGE)
        }
        Err(e) => {
            error!("Failed to parse event log {}: {}", cli.file.display(), e);
            eprintln!("Failed to parse event log {}: {}", cli.file.display(), e);
            ExitCode::from(EXIT_PARSE_FAILURE)
        }
    }
}
