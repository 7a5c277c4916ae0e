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

//! System module tests
//!
//! - `basic`: construction, reset, accessors
//! - `execution`: stepping, run limits, tick order, executable loading
//! - `interrupt_integration`: timer IRQ flow into COP0 CAUSE
//! - `dma_integration`: DMA registers through the bus
//! - `gpu_integration`: GP0/GP1 through the bus
//! - `bios`: BIOS call tracing and real-BIOS boot
//! - `state`: save state round trips

use super::*;
use crate::core::error::EmulatorError;


/// `j 0xBFC00000`
const JUMP_TO_RESET: u32 = 0x0BF0_0000;

/// System whose BIOS starts with `program` (the rest is NOPs)
fn system_with_bios(program: &[u32]) -> System {
    let mut bios = vec![0u8; Bus::BIOS_SIZE];
    for (i, word) in program.iter().enumerate() {
        bios[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    let mut system = System::new();
    system.load_bios(&bios).unwrap();
    system
}

/// System spinning on `j 0xBFC00000; nop`
fn idle_system() -> System {
    system_with_bios(&[JUMP_TO_RESET, 0])
}
