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

//! Emulator error types
//!
//! Every fatal condition the interpreter or the bus can hit is a variant of
//! [`EmulatorError`]. Nothing here is retried: the same machine state always
//! fails the same way.

use thiserror::Error;

use super::cpu::ExceptionCause;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the emulator
#[derive(Error, Debug)]
pub enum EmulatorError {
    /// Opcode, function code or coprocessor operation with no handler
    #[error("Unsupported instruction 0x{instruction:08X} at PC=0x{pc:08X}")]
    UnsupportedInstruction { pc: u32, instruction: u32 },

    /// JR/JALR to a target that is not word aligned
    #[error("Address error at PC=0x{pc:08X}: jump target 0x{target:08X} is not word aligned")]
    AddressError { pc: u32, target: u32 },

    /// Address inside the I/O window that no peripheral decodes
    #[error("Unmapped I/O {width}-byte access at 0x{address:08X}")]
    UnmappedIo { address: u32, width: u8 },

    #[error("Invalid memory access at 0x{address:08X}")]
    InvalidMemoryAccess { address: u32 },

    /// Bus error raised while fetching or executing the instruction at `pc`
    ///
    /// `instruction` is `None` when the fetch itself failed.
    #[error(
        "Fault at PC=0x{pc:08X}{}: {source}",
        .instruction.map(|word| format!(" (instruction 0x{word:08X})")).unwrap_or_default()
    )]
    ExecutionFault {
        pc: u32,
        instruction: Option<u32>,
        #[source]
        source: Box<EmulatorError>,
    },

    #[error("Invalid BIOS size: {got} bytes (expected {expected})")]
    InvalidBiosSize { expected: usize, got: usize },

    #[error("Invalid PSX-EXE: {0}")]
    InvalidExe(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Save state encode error: {0}")]
    SaveStateEncode(#[from] bincode::error::EncodeError),

    #[error("Save state decode error: {0}")]
    SaveStateDecode(#[from] bincode::error::DecodeError),

    #[error("Save state does not match this machine: {0}")]
    InvalidSaveState(String),

    #[error("Save state version {found} is not supported (expected {expected})")]
    SaveStateVersion { expected: u32, found: u32 },
}

impl EmulatorError {
    /// Exception this error would raise if it were routed through COP0
    ///
    /// Only address errors have an architectural exception today. They are
    /// still reported as fatal, but the cause is kept so the interpreter can
    /// switch to trapping without changing callers.
    pub fn exception_cause(&self) -> Option<ExceptionCause> {
        match self {
            EmulatorError::AddressError { .. } => Some(ExceptionCause::AddressErrorLoad),
            _ => None,
        }
    }

    /// Faulting PC, when the error came from executing an instruction
    pub fn pc(&self) -> Option<u32> {
        match self {
            EmulatorError::UnsupportedInstruction { pc, .. }
            | EmulatorError::AddressError { pc, .. }
            | EmulatorError::ExecutionFault { pc, .. } => Some(*pc),
            _ => None,
        }
    }

    /// Instruction word that faulted, if it was fetched
    pub fn instruction(&self) -> Option<u32> {
        match self {
            EmulatorError::UnsupportedInstruction { instruction, .. } => Some(*instruction),
            EmulatorError::ExecutionFault { instruction, .. } => *instruction,
            _ => None,
        }
    }

    /// Underlying error with any execution context removed
    pub fn root(&self) -> &EmulatorError {
        match self {
            EmulatorError::ExecutionFault { source, .. } => source.root(),
            other => other,
        }
    }

    /// Attach the faulting PC and instruction word to a bus error
    ///
    /// Errors that already name their PC are returned unchanged.
    pub(crate) fn at(self, pc: u32, instruction: Option<u32>) -> Self {
        match self {
            EmulatorError::UnsupportedInstruction { .. }
            | EmulatorError::AddressError { .. }
            | EmulatorError::ExecutionFault { .. } => self,
            other => EmulatorError::ExecutionFault {
                pc,
                instruction,
                source: Box::new(other),
            },
        }
    }
}
