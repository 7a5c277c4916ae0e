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

//! Small hand-assembled test programs

/// `j PROGRAM_BASE ; nop`
#[allow(dead_code)]
pub fn idle_loop() -> Vec<u32> {
    vec![
        0x08004000, // J     0x80010000
        0x00000000, // NOP (delay slot)
    ]
}

/// Test program: Register arithmetic
#[allow(dead_code)]
pub fn basic_arithmetic() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1      ; $1 = 1
        0x24020002, // ADDIU $2, $0, 2      ; $2 = 2
        0x00221820, // ADD   $3, $1, $2     ; $3 = 3
        0x00032023, // SUBU  $4, $0, $3     ; $4 = -3
        0x00042883, // SRA   $5, $4, 2      ; $5 = -1
        0x0004302B, // SLTU  $6, $0, $4     ; $6 = 1
    ]
}

/// Test program: Load/Store through the scratchpad
#[allow(dead_code)]
pub fn load_store() -> Vec<u32> {
    vec![
        0x3C011F80, // LUI   $1, 0x1F80     ; $1 = 0x1F800000
        0x240200AA, // ADDIU $2, $0, 0xAA   ; $2 = 0xAA
        0xAC220000, // SW    $2, 0($1)      ; Store to 0x1F800000
        0x8C230000, // LW    $3, 0($1)      ; Load from 0x1F800000
        0xA0220005, // SB    $2, 5($1)
        0x80240005, // LB    $4, 5($1)      ; sign-extended 0xAA
        0x90250005, // LBU   $5, 5($1)
    ]
}

/// Test program: Branch instructions
#[allow(dead_code)]
pub fn branch() -> Vec<u32> {
    vec![
        0x24010001, // ADDIU $1, $0, 1      ; $1 = 1
        0x24020001, // ADDIU $2, $0, 1      ; $2 = 1
        0x10220003, // BEQ   $1, $2, +3     ; Branch if equal
        0x24070007, // ADDIU $7, $0, 7      ; delay slot, executed
        0x24030042, // ADDIU $3, $0, 0x42   ; Should be skipped
        0x24040099, // ADDIU $4, $0, 0x99   ; Should be skipped
        0x24050055, // ADDIU $5, $0, 0x55   ; Branch target
    ]
}

/// Test program: counted loop summing 1..=10 into $2
#[allow(dead_code)]
pub fn counted_loop() -> Vec<u32> {
    vec![
        0x2401000A, // ADDIU $1, $0, 10
        0x00001025, // OR    $2, $0, $0
        0x00411021, // ADDU  $2, $2, $1     ; loop:
        0x2421FFFF, // ADDIU $1, $1, -1
        0x1420FFFD, // BNE   $1, $0, loop
        0x00000000, // NOP (delay slot)
        0x08004006, // J     self
        0x00000000, // NOP
    ]
}

/// SYSCALL handler for the RAM exception vector: resume after the syscall
#[allow(dead_code)]
pub fn syscall_handler() -> Vec<u32> {
    vec![
        0x401A7000, // MFC0  $26, EPC
        0x275A0004, // ADDIU $26, $26, 4
        0x03400008, // JR    $26
        0x42000010, // RFE (delay slot)
    ]
}

/// Get BIOS path from environment or default location
#[allow(dead_code)]
pub fn get_bios_path() -> Option<String> {
    std::env::var("PSX_BIOS_PATH").ok().or_else(|| {
        let default_path = "SCPH1001.BIN";
        if std::path::Path::new(default_path).exists() {
            Some(default_path.to_string())
        } else {
            None
        }
    })
}
