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

//! Assertions over interpreter state with hex-formatted failure messages

use psxcore::core::cpu::{CPU, REGISTER_NAMES};
use psxcore::core::memory::Bus;

#[allow(dead_code)]
pub fn assert_cpu_reg(cpu: &CPU, reg: u8, expected: u32) {
    let actual = cpu.reg(reg);
    assert_eq!(
        actual, expected,
        "${reg} ({}) = 0x{actual:08X}, expected 0x{expected:08X}\n{}",
        REGISTER_NAMES[reg as usize],
        cpu.register_dump()
    );
}

/// Check several `(register, value)` pairs at once
#[allow(dead_code)]
pub fn assert_cpu_regs(cpu: &CPU, expected: &[(u8, u32)]) {
    for &(reg, value) in expected {
        assert_cpu_reg(cpu, reg, value);
    }
}

#[allow(dead_code)]
pub fn assert_cpu_pc(cpu: &CPU, expected: u32) {
    let actual = cpu.pc();
    assert_eq!(
        actual, expected,
        "pc = 0x{actual:08X}, expected 0x{expected:08X} (last instruction 0x{:08X} at 0x{:08X})",
        cpu.current_instruction(),
        cpu.current_pc()
    );
}

/// Compare the three KU/IE pairs at the bottom of the status register
///
/// `expected` is written as `0b_old_prev_cur`, two bits per pair.
#[allow(dead_code)]
pub fn assert_mode_stack(cpu: &CPU, expected: u32) {
    let actual = cpu.cop0().status().bits() & 0x3F;
    assert_eq!(
        actual, expected,
        "mode stack = {actual:06b}, expected {expected:06b}"
    );
}

/// Read a word through the bus and compare
#[allow(dead_code)]
pub fn assert_memory_word(bus: &mut Bus, addr: u32, expected: u32) {
    let actual = match bus.read32(addr) {
        Ok(value) => value,
        Err(e) => panic!("read32(0x{addr:08X}) failed: {e}"),
    };
    assert_eq!(
        actual, expected,
        "[0x{addr:08X}] = 0x{actual:08X}, expected 0x{expected:08X}"
    );
}
