// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use psxcore::core::config::EmulatorConfig;
use psxcore::core::error::Result;
use psxcore::core::loader::PsxExecutable;
use psxcore::core::system::System;

/// PlayStation CPU interpreter
#[derive(Parser)]
#[command(name = "psxcore")]
#[command(about = "Run a PlayStation BIOS or executable on the R3000A interpreter", long_about = None)]
struct Args {
    /// TOML configuration file; command-line options override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to PlayStation BIOS file (e.g., SCPH1001.BIN)
    #[arg(long)]
    bios: Option<PathBuf>,

    /// PSX-EXE to side-load into RAM before running
    #[arg(long)]
    exe: Option<PathBuf>,

    /// Number of instructions to execute (default: run until a fatal error)
    #[arg(short = 'n', long)]
    instructions: Option<u64>,

    /// Write a per-instruction trace to this file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Log BIOS A/B/C kernel calls and TTY output
    #[arg(long)]
    bios_calls: bool,
}

impl Args {
    /// Resolve the effective configuration
    fn into_config(self) -> Result<EmulatorConfig> {
        let mut config = match &self.config {
            Some(path) => EmulatorConfig::from_file(path)?,
            None => EmulatorConfig::default(),
        };

        if self.bios.is_some() {
            config.bios = self.bios;
        }
        if self.exe.is_some() {
            config.exe = self.exe;
        }
        if self.instructions.is_some() {
            config.instructions = self.instructions;
        }
        if self.trace.is_some() {
            config.trace = self.trace;
        }
        config.bios_calls |= self.bios_calls;

        Ok(config)
    }
}

fn main() -> ExitCode {
    // Optional .env for RUST_LOG and friends; a missing file is not an error
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("psxcore v{}", env!("CARGO_PKG_VERSION"));

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut system = System::new();
    if let Err(e) = setup(&mut system, &config) {
        error!("{}", e);
        return ExitCode::from(2);
    }

    match run(&mut system, config.instructions) {
        Ok(()) => {
            info!("Emulation completed successfully!");
            info!("Total instructions: {}", system.cycles());
            info!("Final PC: 0x{:08X}", system.pc());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let pc = e.pc().unwrap_or_else(|| system.cpu().current_pc());
            match e.instruction() {
                Some(word) => error!(
                    "Fatal error at PC=0x{:08X} (instruction 0x{:08X}): {}",
                    pc,
                    word,
                    e.root()
                ),
                None => error!("Fatal error at PC=0x{:08X}: {}", pc, e.root()),
            }
            error!("Instruction count: {}", system.cycles());
            error!("Register dump:\n{}", system.cpu().register_dump());
            ExitCode::FAILURE
        }
    }
}

fn setup(system: &mut System, config: &EmulatorConfig) -> Result<()> {
    system.set_tick_order(config.tick_order);

    match &config.bios {
        Some(path) => {
            info!("Loading BIOS from: {}", path.display());
            system.load_bios_file(path)?;
        }
        None => log::warn!("No BIOS given; the reset vector will execute zeroed memory"),
    }

    if let Some(path) = &config.exe {
        info!("Loading executable from: {}", path.display());
        let exe = PsxExecutable::from_file(path)?;
        system.load_executable(&exe);
    }

    if let Some(path) = &config.trace {
        system.enable_tracing(path)?;
    }
    system.enable_bios_call_trace(config.bios_calls);

    Ok(())
}

fn run(system: &mut System, limit: Option<u64>) -> Result<()> {
    info!("Starting emulation...");

    let Some(total) = limit else {
        system.run(None)?;
        return Ok(());
    };

    // Log ~10 times during execution
    let chunk = (total / 10).max(1);
    let mut done = 0;
    while done < total {
        done += system.run(Some(chunk.min(total - done)))?;
        info!(
            "Progress: {}/{} instructions | PC: 0x{:08X}",
            done,
            total,
            system.pc()
        );
    }

    Ok(())
}
