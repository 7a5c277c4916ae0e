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

//! Test fixtures for common test scenarios

use psxcore::core::cpu::CPU;
use psxcore::core::loader::PsxExecutable;
use psxcore::core::memory::Bus;
use psxcore::core::system::System;

/// RAM address test programs are loaded at
#[allow(dead_code)]
pub const PROGRAM_BASE: u32 = 0x8001_0000;

/// Create a CPU with default memory bus for testing
#[allow(dead_code)]
pub fn create_cpu_with_bus() -> (CPU, Bus) {
    (CPU::new(), Bus::new())
}

/// Load a test program into memory at specified address
#[allow(dead_code)]
pub fn load_test_program(bus: &mut Bus, start_addr: u32, program: &[u32]) {
    for (i, &instruction) in program.iter().enumerate() {
        let addr = start_addr + (i as u32 * 4);
        bus.write32(addr, instruction)
            .expect("Failed to write to memory");
    }
}

/// BIOS image with `program` at the reset vector and zeroes elsewhere
#[allow(dead_code)]
pub fn bios_image(program: &[u32]) -> Vec<u8> {
    let mut bios = vec![0u8; Bus::BIOS_SIZE];
    for (i, word) in program.iter().enumerate() {
        bios[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    bios
}

/// System with an idle BIOS and `program` in RAM at `PROGRAM_BASE`, PC on
/// its first instruction
#[allow(dead_code)]
pub fn system_with_program(program: &[u32]) -> System {
    let mut system = System::new();
    system
        .load_bios(&bios_image(&[]))
        .expect("Failed to load BIOS");
    load_test_program(system.bus_mut(), PROGRAM_BASE, program);
    system.cpu_mut().set_pc(PROGRAM_BASE);
    system
}

/// Raw PSX-EXE file contents wrapping `program`
#[allow(dead_code)]
pub fn exe_image(entry: u32, program: &[u32]) -> Vec<u8> {
    let mut file = vec![0u8; PsxExecutable::HEADER_SIZE];
    file[0..8].copy_from_slice(b"PS-X EXE");
    let mut put = |offset: usize, value: u32| {
        file[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    };
    put(0x10, entry);
    put(0x14, 0x8002_0000);
    put(0x18, entry);
    put(0x1C, (program.len() * 4) as u32);
    put(0x30, 0x801F_FF00);
    for word in program {
        file.extend_from_slice(&word.to_le_bytes());
    }
    file
}
