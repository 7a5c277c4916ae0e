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

//! System integration module
//!
//! [`System`] is the machine context. It owns the CPU and the bus, and the
//! bus owns every memory region and peripheral by value, so a `System` is
//! the whole machine: nothing lives in globals and nothing is shared.

use std::path::Path;

use super::bios::BiosCallTracer;
use super::config::TickOrder;
use super::cpu::{CpuTracer, CPU};
use super::error::Result;
use super::loader::PsxExecutable;
use super::memory::Bus;
use super::save_state::SaveState;

/// PlayStation System
///
/// Each [`step`](System::step) executes one instruction and ticks the
/// peripherals once, in the order set by [`TickOrder`].
///
/// # Example
/// ```
/// use psxcore::core::system::System;
///
/// let mut system = System::new();
/// let mut bios = vec![0u8; 512 * 1024];
/// // lui t0, 0x1234
/// bios[0..4].copy_from_slice(&0x3C08_1234u32.to_le_bytes());
/// system.load_bios(&bios).unwrap();
///
/// system.step().unwrap();
/// assert_eq!(system.cpu().reg(8), 0x1234_0000);
/// assert_eq!(system.cycles(), 1);
/// ```
pub struct System {
    cpu: CPU,
    bus: Bus,
    /// Instructions executed since reset
    cycles: u64,
    tick_order: TickOrder,
    /// Per-instruction trace output (optional)
    tracer: Option<CpuTracer>,
    /// BIOS kernel call logging (optional)
    bios_tracer: Option<BiosCallTracer>,
}

impl System {
    /// Create a new System with every component at its reset state
    pub fn new() -> Self {
        Self {
            cpu: CPU::new(),
            bus: Bus::new(),
            cycles: 0,
            tick_order: TickOrder::default(),
            tracer: None,
            bios_tracer: None,
        }
    }

    /// Reset the system to initial state
    ///
    /// Clears RAM, scratchpad and peripheral state but keeps the loaded
    /// BIOS. Tracing settings survive the reset.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.cycles = 0;
        if let Some(bios_tracer) = self.bios_tracer.as_mut() {
            bios_tracer.flush();
        }
    }

    /// Install a 512KB BIOS image
    pub fn load_bios(&mut self, data: &[u8]) -> Result<()> {
        self.bus.load_bios(data)
    }

    /// Read a BIOS image from disk and install it
    pub fn load_bios_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.bus.load_bios_file(path)
    }

    /// Side-load a PSX-EXE into RAM and point the CPU at its entry
    ///
    /// Copies the payload, clears the memfill area, then seeds PC and GP.
    /// SP and FP are set only when the header carries a stack base.
    pub fn load_executable(&mut self, exe: &PsxExecutable) {
        self.bus.copy_to_ram(exe.load_address, &exe.data);
        if exe.memfill_size != 0 {
            self.bus.fill_ram(exe.memfill_start, exe.memfill_size, 0);
        }

        self.cpu.set_pc(exe.pc);
        self.cpu.set_reg(28, exe.gp);
        if let Some(sp) = exe.initial_sp() {
            self.cpu.set_reg(29, sp);
            self.cpu.set_reg(30, sp);
        }

        log::info!(
            "Executable loaded: {} bytes at 0x{:08X}, entry 0x{:08X}",
            exe.data.len(),
            exe.load_address,
            exe.pc
        );
    }

    /// Execute one instruction and tick the peripherals once
    ///
    /// # Errors
    /// Any fatal CPU or bus error. The peripheral tick for this iteration is
    /// skipped when the CPU half of a cpu-first step fails.
    pub fn step(&mut self) -> Result<()> {
        if let Some(bios_tracer) = self.bios_tracer.as_mut() {
            bios_tracer.observe(&self.cpu);
        }

        match self.tick_order {
            TickOrder::CpuFirst => {
                self.cpu.step(&mut self.bus)?;
                self.tick_peripherals();
            }
            TickOrder::PeripheralsFirst => {
                self.tick_peripherals();
                self.cpu.step(&mut self.bus)?;
            }
        }

        if let Some(tracer) = self.tracer.as_mut() {
            if let Err(e) = tracer.trace(&self.cpu) {
                log::warn!("Failed to write trace: {}", e);
            }
        }

        self.cycles += 1;
        Ok(())
    }

    /// Mirror the interrupt controller's output into COP0 CAUSE
    fn tick_peripherals(&mut self) {
        let pending = self.bus.tick_peripherals();
        self.cpu.cop0_mut().set_hardware_interrupt(0, pending);
    }

    /// Execute exactly `n` steps unless an error occurs
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Run until `limit` steps have executed, or forever when `None`
    ///
    /// Returns the number of steps executed by this call. A fatal error ends
    /// the run and is returned instead.
    pub fn run(&mut self, limit: Option<u64>) -> Result<u64> {
        let start = self.cycles;
        while limit.is_none_or(|limit| self.cycles - start < limit) {
            self.step()?;
        }
        Ok(self.cycles - start)
    }

    /// Current PC value
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Instructions executed since reset
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn tick_order(&self) -> TickOrder {
        self.tick_order
    }

    pub fn set_tick_order(&mut self, order: TickOrder) {
        self.tick_order = order;
    }

    /// Enable CPU execution tracing to a file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psxcore::core::system::System;
    ///
    /// let mut system = System::new();
    /// system.enable_tracing("trace.log").unwrap();
    /// ```
    pub fn enable_tracing<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.tracer = Some(CpuTracer::new(path.as_ref())?);
        log::info!("CPU tracing enabled: {}", path.as_ref().display());
        Ok(())
    }

    /// Disable CPU execution tracing, flushing the trace file
    pub fn disable_tracing(&mut self) {
        if let Some(mut tracer) = self.tracer.take() {
            if let Err(e) = tracer.flush() {
                log::warn!("Failed to flush trace: {}", e);
            }
            log::info!("CPU tracing disabled");
        }
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Turn BIOS kernel call logging on or off
    pub fn enable_bios_call_trace(&mut self, enabled: bool) {
        if enabled {
            self.bios_tracer.get_or_insert_with(BiosCallTracer::new);
        } else if let Some(mut bios_tracer) = self.bios_tracer.take() {
            bios_tracer.flush();
        }
    }

    pub fn bios_tracer(&self) -> Option<&BiosCallTracer> {
        self.bios_tracer.as_ref()
    }

    /// Snapshot the whole machine
    pub fn save_state(&self) -> SaveState {
        SaveState::capture(&self.cpu, &self.bus, self.cycles)
    }

    /// Restore a snapshot taken with [`save_state`](System::save_state)
    pub fn load_state(&mut self, state: &SaveState) -> Result<()> {
        state.restore(&mut self.cpu, &mut self.bus)?;
        self.cycles = state.metadata.cycles;
        Ok(())
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
