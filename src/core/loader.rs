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

//! PSX-EXE loader
//!
//! PSX-EXE files have a 2048-byte header followed by the executable code:
//!
//! ```text
//! 0x00-0x07: "PS-X EXE" magic
//! 0x10-0x13: Initial PC (entry point)
//! 0x14-0x17: Initial GP
//! 0x18-0x1B: Load address
//! 0x1C-0x1F: Load size
//! 0x28-0x2B: Memfill start
//! 0x2C-0x2F: Memfill size
//! 0x30-0x33: Stack base
//! 0x34-0x37: Stack offset
//! 0x800+:    Executable data
//! ```
//!
//! # Example
//!
//! ```
//! use psxcore::core::loader::PsxExecutable;
//!
//! let mut file = vec![0u8; 0x804];
//! file[0..8].copy_from_slice(b"PS-X EXE");
//! file[0x10..0x14].copy_from_slice(&0x8001_0000u32.to_le_bytes());
//! file[0x18..0x1C].copy_from_slice(&0x8001_0000u32.to_le_bytes());
//! file[0x1C..0x20].copy_from_slice(&4u32.to_le_bytes());
//!
//! let exe = PsxExecutable::parse(&file).unwrap();
//! assert_eq!(exe.pc, 0x8001_0000);
//! assert_eq!(exe.data.len(), 4);
//! ```

use std::path::Path;

use super::error::{EmulatorError, Result};

/// Parsed PSX-EXE image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsxExecutable {
    /// Initial program counter (entry point)
    pub pc: u32,

    /// Initial global pointer (r28)
    pub gp: u32,

    /// Load address in RAM
    pub load_address: u32,

    /// Region cleared before the program starts (BSS)
    pub memfill_start: u32,
    pub memfill_size: u32,

    /// Stack base address; zero keeps the caller's stack
    pub stack_base: u32,

    /// Stack offset from base
    pub stack_offset: u32,

    /// Executable payload
    pub data: Vec<u8>,
}

impl PsxExecutable {
    /// PSX-EXE header size
    pub const HEADER_SIZE: usize = 0x800;

    const MAGIC: &'static [u8; 8] = b"PS-X EXE";

    /// Parse a PSX-EXE image from raw file contents
    ///
    /// A load size running past the end of the file is clamped to what is
    /// actually there.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(EmulatorError::InvalidExe(format!(
                "file too small ({} bytes)",
                data.len()
            )));
        }

        if &data[0..8] != Self::MAGIC {
            return Err(EmulatorError::InvalidExe("bad magic number".to_string()));
        }

        let word = |offset: usize| {
            u32::from_le_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ])
        };

        let load_size = word(0x1C) as usize;
        let available = data.len() - Self::HEADER_SIZE;
        if load_size > available {
            log::warn!(
                "PSX-EXE load size 0x{:X} exceeds payload (0x{:X}), truncating",
                load_size,
                available
            );
        }
        let payload_end = Self::HEADER_SIZE + load_size.min(available);

        let exe = Self {
            pc: word(0x10),
            gp: word(0x14),
            load_address: word(0x18),
            memfill_start: word(0x28),
            memfill_size: word(0x2C),
            stack_base: word(0x30),
            stack_offset: word(0x34),
            data: data[Self::HEADER_SIZE..payload_end].to_vec(),
        };

        log::info!(
            "PSX-EXE parsed: PC=0x{:08X}, GP=0x{:08X}, Load=0x{:08X}, Size=0x{:X}",
            exe.pc,
            exe.gp,
            exe.load_address,
            exe.data.len()
        );

        Ok(exe)
    }

    /// Read and parse a PSX-EXE file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::parse(&data)
    }

    /// Initial stack pointer, when the header sets one
    pub fn initial_sp(&self) -> Option<u32> {
        (self.stack_base != 0).then(|| self.stack_base.wrapping_add(self.stack_offset))
    }
}
