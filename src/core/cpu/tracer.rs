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

//! CPU execution tracer for debugging
//!
//! Writes one line per retired instruction to a file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{Disassembler, CPU, REGISTER_NAMES};
use crate::core::error::Result;

/// CPU execution tracer
///
/// Each line holds the instruction's address, its raw encoding, the
/// disassembly and every non-zero register after it executed:
///
/// ```text
/// 0xBFC00000 [0x3C080013] lui t0, 0x0013                 | t0=00130000
/// ```
///
/// # Example
/// ```no_run
/// use psxcore::core::cpu::{CPU, CpuTracer};
/// use psxcore::core::memory::Bus;
///
/// let mut cpu = CPU::new();
/// let mut bus = Bus::new();
/// let mut tracer = CpuTracer::new("trace.log").unwrap();
///
/// cpu.step(&mut bus).unwrap();
/// tracer.trace(&cpu).unwrap();
/// ```
pub struct CpuTracer {
    enabled: bool,
    output: BufWriter<File>,
}

impl CpuTracer {
    /// Create a tracer writing to `path`, truncating any existing file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let output = BufWriter::new(File::create(path)?);
        Ok(Self {
            enabled: true,
            output,
        })
    }

    /// Enable or disable tracing
    ///
    /// When disabled, trace() calls return immediately without writing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Trace the instruction the CPU just executed
    pub fn trace(&mut self, cpu: &CPU) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        self.write_prefix(cpu)?;
        for (index, name) in REGISTER_NAMES.iter().enumerate().skip(1) {
            let value = cpu.reg(index as u8);
            if value != 0 {
                write!(self.output, " {}={:08X}", name, value)?;
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Like `trace()`, but only shows the given registers (up to 8)
    pub fn trace_with_regs(&mut self, cpu: &CPU, regs: &[u8]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        self.write_prefix(cpu)?;
        for &reg in regs.iter().take(8) {
            write!(
                self.output,
                " {}={:08X}",
                REGISTER_NAMES[(reg & 0x1F) as usize],
                cpu.reg(reg)
            )?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Forces any buffered trace data to be written to disk
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    fn write_prefix(&mut self, cpu: &CPU) -> Result<()> {
        let pc = cpu.current_pc();
        let instruction = cpu.current_instruction();
        let disasm = Disassembler::disassemble(instruction, pc);
        write!(self.output, "0x{:08X} [0x{:08X}] {:30} |", pc, instruction, disasm)?;
        Ok(())
    }
}

impl Drop for CpuTracer {
    fn drop(&mut self) {
        let _ = self.output.flush();
    }
}
