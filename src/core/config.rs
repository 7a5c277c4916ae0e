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

//! Emulator configuration
//!
//! Settings come from an optional TOML file. Every field has a default, so
//! an empty file (or no file at all) gives a runnable configuration. The
//! command-line runner overrides individual fields on top.
//!
//! ```
//! use psxcore::core::config::{EmulatorConfig, TickOrder};
//!
//! let config = EmulatorConfig::from_toml_str(
//!     r#"
//!     bios = "SCPH1001.BIN"
//!     instructions = 1000
//!     tick_order = "peripherals-first"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.instructions, Some(1000));
//! assert_eq!(config.tick_order, TickOrder::PeripheralsFirst);
//! assert!(!config.bios_calls);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Order of the CPU step and the peripheral tick within one iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TickOrder {
    #[default]
    CpuFirst,
    PeripheralsFirst,
}

/// Top-level emulator settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmulatorConfig {
    /// BIOS image
    pub bios: Option<PathBuf>,

    /// PSX-EXE to side-load once the BIOS is in place
    pub exe: Option<PathBuf>,

    /// Step limit; `None` runs until a fatal error
    pub instructions: Option<u64>,

    /// Per-instruction trace output
    pub trace: Option<PathBuf>,

    /// Log BIOS A/B/C kernel calls
    pub bios_calls: bool,

    pub tick_order: TickOrder,
}

impl EmulatorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}
