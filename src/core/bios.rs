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

//! BIOS call tracer
//!
//! The BIOS exposes its kernel through three dispatch stubs at 0xA0, 0xB0
//! and 0xC0; the function number travels in r9. Watching the PC for those
//! addresses is enough to log every kernel call a program makes. `putchar`
//! calls are collected into a TTY line buffer instead, so program output
//! shows up in the log one line at a time.
//!
//! The tracer only reads CPU state.

use super::cpu::CPU;

/// Kernel dispatch table a call went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiosVector {
    A,
    B,
    C,
}

impl BiosVector {
    /// Vector for a masked PC, if it is one of the dispatch stubs
    pub fn from_address(pc: u32) -> Option<Self> {
        match pc & 0x1FFF_FFFF {
            0xA0 => Some(BiosVector::A),
            0xB0 => Some(BiosVector::B),
            0xC0 => Some(BiosVector::C),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            BiosVector::A => 'A',
            BiosVector::B => 'B',
            BiosVector::C => 'C',
        }
    }
}

/// One observed kernel call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiosCall {
    pub vector: BiosVector,
    pub function: u8,
    /// First four argument registers (a0-a3)
    pub args: [u32; 4],
}

impl BiosCall {
    /// Known name of the called function
    pub fn name(&self) -> Option<&'static str> {
        function_name(self.vector, self.function)
    }

    pub fn is_putchar(&self) -> bool {
        matches!(
            (self.vector, self.function),
            (BiosVector::A, 0x3C) | (BiosVector::B, 0x3D)
        )
    }
}

fn function_name(vector: BiosVector, function: u8) -> Option<&'static str> {
    let name = match (vector, function) {
        (BiosVector::A, 0x00) => "FileOpen",
        (BiosVector::A, 0x01) => "FileSeek",
        (BiosVector::A, 0x02) => "FileRead",
        (BiosVector::A, 0x03) => "FileWrite",
        (BiosVector::A, 0x04) => "FileClose",
        (BiosVector::A, 0x13) => "setjmp",
        (BiosVector::A, 0x14) => "longjmp",
        (BiosVector::A, 0x15) => "strcat",
        (BiosVector::A, 0x17) => "strcmp",
        (BiosVector::A, 0x19) => "strcpy",
        (BiosVector::A, 0x1B) => "strlen",
        (BiosVector::A, 0x25) => "toupper",
        (BiosVector::A, 0x26) => "tolower",
        (BiosVector::A, 0x2A) => "memcpy",
        (BiosVector::A, 0x2B) => "memset",
        (BiosVector::A, 0x2F) => "rand",
        (BiosVector::A, 0x30) => "srand",
        (BiosVector::A, 0x33) => "malloc",
        (BiosVector::A, 0x34) => "free",
        (BiosVector::A, 0x39) => "InitHeap",
        (BiosVector::A, 0x3C) => "putchar",
        (BiosVector::A, 0x3E) => "puts",
        (BiosVector::A, 0x3F) => "printf",
        (BiosVector::A, 0x44) => "FlushCache",
        (BiosVector::A, 0x49) => "GPU_cw",
        (BiosVector::A, 0x96) => "AddCDROMDevice",
        (BiosVector::B, 0x00) => "alloc_kernel_memory",
        (BiosVector::B, 0x07) => "DeliverEvent",
        (BiosVector::B, 0x08) => "OpenEvent",
        (BiosVector::B, 0x09) => "CloseEvent",
        (BiosVector::B, 0x0A) => "WaitEvent",
        (BiosVector::B, 0x0B) => "TestEvent",
        (BiosVector::B, 0x0C) => "EnableEvent",
        (BiosVector::B, 0x0D) => "DisableEvent",
        (BiosVector::B, 0x12) => "InitPad",
        (BiosVector::B, 0x13) => "StartPad",
        (BiosVector::B, 0x17) => "ReturnFromException",
        (BiosVector::B, 0x18) => "SetDefaultExitFromException",
        (BiosVector::B, 0x19) => "SetCustomExitFromException",
        (BiosVector::B, 0x3D) => "putchar",
        (BiosVector::B, 0x3F) => "puts",
        (BiosVector::B, 0x47) => "AddDevice",
        (BiosVector::B, 0x5B) => "ChangeClearPad",
        (BiosVector::C, 0x00) => "EnqueueTimerAndVblankIrqs",
        (BiosVector::C, 0x01) => "EnqueueSyscallHandler",
        (BiosVector::C, 0x02) => "SysEnqIntRP",
        (BiosVector::C, 0x03) => "SysDeqIntRP",
        (BiosVector::C, 0x07) => "InstallExceptionHandlers",
        (BiosVector::C, 0x08) => "SysInitMemory",
        (BiosVector::C, 0x0A) => "ChangeClearRCnt",
        (BiosVector::C, 0x0C) => "InitDefInt",
        (BiosVector::C, 0x12) => "InstallDevices",
        (BiosVector::C, 0x1C) => "AdjustA0Table",
        _ => return None,
    };
    Some(name)
}

/// Longest TTY line kept before it is flushed without a newline
pub const TTY_LINE_LIMIT: usize = 256;

/// Watches the PC for kernel calls and collects TTY output
#[derive(Debug, Default)]
pub struct BiosCallTracer {
    tty: String,
}

impl BiosCallTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the instruction about to execute
    ///
    /// Must be called before the CPU steps, while `cpu.pc()` still points at
    /// the dispatch stub.
    pub fn observe(&mut self, cpu: &CPU) -> Option<BiosCall> {
        let vector = BiosVector::from_address(cpu.pc())?;
        let call = BiosCall {
            vector,
            function: cpu.reg(9) as u8,
            args: [cpu.reg(4), cpu.reg(5), cpu.reg(6), cpu.reg(7)],
        };

        if call.is_putchar() {
            self.putchar(call.args[0] as u8);
        } else {
            match call.name() {
                Some(name) => log::info!(
                    "BIOS {}({:02X}h) {}(0x{:08X}, 0x{:08X}, 0x{:08X}, 0x{:08X})",
                    vector.letter(),
                    call.function,
                    name,
                    call.args[0],
                    call.args[1],
                    call.args[2],
                    call.args[3]
                ),
                None => log::info!("BIOS {}({:02X}h)", vector.letter(), call.function),
            }
        }

        Some(call)
    }

    fn putchar(&mut self, byte: u8) {
        match byte {
            b'\n' => self.flush(),
            b'\r' => {}
            _ => {
                self.tty.push(byte as char);
                if self.tty.len() >= TTY_LINE_LIMIT {
                    self.flush();
                }
            }
        }
    }

    /// Log whatever is in the TTY buffer as one line
    pub fn flush(&mut self) {
        if !self.tty.is_empty() {
            log::info!("TTY: {}", self.tty);
            self.tty.clear();
        }
    }

    /// TTY output not yet terminated by a newline
    pub fn tty_buffer(&self) -> &str {
        &self.tty
    }
}
