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

//! Save state serialization
//!
//! A [`SaveState`] is a complete snapshot of the machine: CPU registers,
//! COP0, every writable memory region, the cache-control register and the
//! register state of each peripheral. The BIOS is not saved; it never
//! changes while the machine runs and is expected to be loaded already.
//!
//! States are encoded with bincode (serde mode). Each one carries a format
//! version, and decoding a state with a different version fails.
//!
//! # Example
//!
//! ```no_run
//! use psxcore::core::save_state::SaveState;
//! use psxcore::core::System;
//!
//! let mut system = System::new();
//! system.step_n(100).unwrap();
//!
//! system.save_state().save_to_file("game.state").unwrap();
//!
//! let state = SaveState::load_from_file("game.state").unwrap();
//! system.load_state(&state).unwrap();
//! ```

use std::path::Path;

use bincode::config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cpu::{Status, CPU};
use super::dma::DMA;
use super::error::{EmulatorError, Result};
use super::gpu::GPU;
use super::interrupt::InterruptController;
use super::memory::{Bus, MemoryRegion, REGIONS};
use super::spu::SPU;
use super::timer::Timers;

/// Save state format version
///
/// Bump whenever the layout below changes.
pub const SAVE_STATE_VERSION: u32 = 1;

/// Complete machine snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    /// Version number for compatibility checking
    pub version: u32,

    pub metadata: SaveStateMetadata,

    pub cpu: CpuState,

    pub memory: MemoryState,

    pub interrupts: InterruptController,
    pub dma: DMA,
    pub timers: Timers,
    pub gpu: GPU,
    pub spu: SPU,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveStateMetadata {
    /// When the state was captured
    pub timestamp: DateTime<Utc>,

    /// Instructions executed since reset
    pub cycles: u64,
}

/// CPU registers, PC pair and COP0 bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    pub regs: [u32; 32],
    pub pc: u32,
    pub next_pc: u32,
    pub current_pc: u32,
    pub current_instruction: u32,
    pub hi: u32,
    pub lo: u32,
    pub cop0: [u32; 32],
}

/// Memory contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryState {
    /// Backing store per region in arena order; the BIOS slot is empty
    pub regions: Vec<Vec<u8>>,

    /// Cache Control register (0xFFFE0130)
    pub cache_control: u32,
}

impl SaveState {
    /// Snapshot a CPU and bus pair
    pub fn capture(cpu: &CPU, bus: &Bus, cycles: u64) -> Self {
        let regions = REGIONS
            .iter()
            .map(|desc| match desc.region {
                MemoryRegion::BIOS => Vec::new(),
                region => bus.region(region).to_vec(),
            })
            .collect();

        Self {
            version: SAVE_STATE_VERSION,
            metadata: SaveStateMetadata {
                timestamp: Utc::now(),
                cycles,
            },
            cpu: CpuState {
                regs: *cpu.registers(),
                pc: cpu.pc(),
                next_pc: cpu.next_pc(),
                current_pc: cpu.current_pc(),
                current_instruction: cpu.current_instruction(),
                hi: cpu.hi(),
                lo: cpu.lo(),
                cop0: *cpu.cop0().registers(),
            },
            memory: MemoryState {
                regions,
                cache_control: bus.cache_control(),
            },
            interrupts: bus.interrupts().clone(),
            dma: bus.dma().clone(),
            timers: bus.timers().clone(),
            gpu: bus.gpu().clone(),
            spu: bus.spu().clone(),
        }
    }

    /// Write this snapshot back into a CPU and bus pair
    ///
    /// The BIOS region is left untouched. Cache isolation is re-derived from
    /// the restored status register.
    pub fn restore(&self, cpu: &mut CPU, bus: &mut Bus) -> Result<()> {
        self.check_version()?;

        if self.memory.regions.len() != MemoryRegion::COUNT {
            return Err(EmulatorError::InvalidSaveState(format!(
                "expected {} memory regions, found {}",
                MemoryRegion::COUNT,
                self.memory.regions.len()
            )));
        }
        for (desc, data) in REGIONS.iter().zip(&self.memory.regions) {
            if desc.region != MemoryRegion::BIOS && data.len() != desc.size {
                return Err(EmulatorError::InvalidSaveState(format!(
                    "{} is {} bytes, expected {}",
                    desc.region.name(),
                    data.len(),
                    desc.size
                )));
            }
        }

        for (desc, data) in REGIONS.iter().zip(&self.memory.regions) {
            if desc.region != MemoryRegion::BIOS {
                bus.region_mut(desc.region).copy_from_slice(data);
            }
        }
        bus.set_cache_control(self.memory.cache_control);
        *bus.interrupts_mut() = self.interrupts.clone();
        *bus.dma_mut() = self.dma.clone();
        *bus.timers_mut() = self.timers.clone();
        *bus.gpu_mut() = self.gpu.clone();
        *bus.spu_mut() = self.spu.clone();

        let state = &self.cpu;
        cpu.restore_registers(state.regs);
        cpu.restore_pc_state(
            state.pc,
            state.next_pc,
            state.current_pc,
            state.current_instruction,
        );
        cpu.set_hi(state.hi);
        cpu.set_lo(state.lo);
        cpu.cop0_mut().restore_registers(state.cop0);

        bus.set_cache_isolated(cpu.cop0().status().contains(Status::ISC));

        log::info!(
            "Restored save state from {} (cycles: {})",
            self.metadata.timestamp,
            self.metadata.cycles
        );
        Ok(())
    }

    fn check_version(&self) -> Result<()> {
        if self.version != SAVE_STATE_VERSION {
            return Err(EmulatorError::SaveStateVersion {
                expected: SAVE_STATE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serde::encode_to_vec(self, config::standard())?)
    }

    /// Decode a state, rejecting other format versions
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (state, _): (SaveState, usize) =
            bincode::serde::decode_from_slice(bytes, config::standard())?;
        state.check_version()?;
        Ok(state)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let encoded = self.to_bytes()?;
        std::fs::write(path.as_ref(), &encoded)?;
        log::info!(
            "Save state written to {} ({} bytes)",
            path.as_ref().display(),
            encoded.len()
        );
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }
}
