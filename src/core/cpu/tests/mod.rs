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

//! CPU test modules
//!
//! - `basic`: initialization, reset, register access, stepping
//! - `decode`: instruction field extraction and opcode resolution
//! - `alu`: arithmetic, logical and shift instructions
//! - `multiply`: MULT/DIV family and HI/LO moves
//! - `branch`: branches, jumps and the delay slot
//! - `load_store`: loads, stores and the unaligned LWL/LWR/SWL/SWR pairs
//! - `exceptions`: SYSCALL/BREAK/overflow entry, RFE, fatal instructions
//! - `cop0`: COP0 moves and cache isolation

use super::*;
use crate::core::memory::Bus;

mod branch;
mod decode;

/// Test programs run from KSEG0 RAM
const PROGRAM_BASE: u32 = 0x8001_0000;

/// CPU and bus with `program` loaded at `PROGRAM_BASE` and PC pointing at it
fn setup(program: &[u32]) -> (CPU, Bus) {
    let mut bus = Bus::new();
    for (i, &word) in program.iter().enumerate() {
        bus.write32(PROGRAM_BASE + (i as u32) * 4, word).unwrap();
    }
    let mut cpu = CPU::new();
    cpu.set_pc(PROGRAM_BASE);
    (cpu, bus)
}

fn run(cpu: &mut CPU, bus: &mut Bus, steps: usize) {
    for _ in 0..steps {
        cpu.step(bus).unwrap();
    }
}

/// Minimal MIPS encoder for test programs
mod asm {
    pub const NOP: u32 = 0;
    pub const SYSCALL: u32 = 0x0000_000C;
    pub const BREAK: u32 = 0x0000_000D;
    pub const RFE: u32 = 0x4200_0010;

    pub fn special(funct: u32, rs: u8, rt: u8, rd: u8, shamt: u8) -> u32 {
        ((rs as u32) << 21) | ((rt as u32) << 16) | ((rd as u32) << 11) | ((shamt as u32) << 6) | funct
    }

    pub fn imm(op: u32, rs: u8, rt: u8, imm: u16) -> u32 {
        (op << 26) | ((rs as u32) << 21) | ((rt as u32) << 16) | imm as u32
    }

    pub fn sll(rd: u8, rt: u8, sa: u8) -> u32 {
        special(0x00, 0, rt, rd, sa)
    }
    pub fn sra(rd: u8, rt: u8, sa: u8) -> u32 {
        special(0x03, 0, rt, rd, sa)
    }
    pub fn srlv(rd: u8, rt: u8, rs: u8) -> u32 {
        special(0x06, rs, rt, rd, 0)
    }
    pub fn srav(rd: u8, rt: u8, rs: u8) -> u32 {
        special(0x07, rs, rt, rd, 0)
    }
    pub fn jr(rs: u8) -> u32 {
        special(0x08, rs, 0, 0, 0)
    }
    pub fn jalr(rd: u8, rs: u8) -> u32 {
        special(0x09, rs, 0, rd, 0)
    }
    pub fn mfhi(rd: u8) -> u32 {
        special(0x10, 0, 0, rd, 0)
    }
    pub fn mthi(rs: u8) -> u32 {
        special(0x11, rs, 0, 0, 0)
    }
    pub fn mflo(rd: u8) -> u32 {
        special(0x12, 0, 0, rd, 0)
    }
    pub fn mtlo(rs: u8) -> u32 {
        special(0x13, rs, 0, 0, 0)
    }
    pub fn mult(rs: u8, rt: u8) -> u32 {
        special(0x18, rs, rt, 0, 0)
    }
    pub fn multu(rs: u8, rt: u8) -> u32 {
        special(0x19, rs, rt, 0, 0)
    }
    pub fn div(rs: u8, rt: u8) -> u32 {
        special(0x1A, rs, rt, 0, 0)
    }
    pub fn divu(rs: u8, rt: u8) -> u32 {
        special(0x1B, rs, rt, 0, 0)
    }
    pub fn add(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x20, rs, rt, rd, 0)
    }
    pub fn addu(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x21, rs, rt, rd, 0)
    }
    pub fn sub(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x22, rs, rt, rd, 0)
    }
    pub fn subu(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x23, rs, rt, rd, 0)
    }
    pub fn nor(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x27, rs, rt, rd, 0)
    }
    pub fn slt(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x2A, rs, rt, rd, 0)
    }
    pub fn sltu(rd: u8, rs: u8, rt: u8) -> u32 {
        special(0x2B, rs, rt, rd, 0)
    }

    pub fn bltz(rs: u8, offset: i16) -> u32 {
        imm(0x01, rs, 0x00, offset as u16)
    }
    pub fn bltzal(rs: u8, offset: i16) -> u32 {
        imm(0x01, rs, 0x10, offset as u16)
    }
    pub fn bgezal(rs: u8, offset: i16) -> u32 {
        imm(0x01, rs, 0x11, offset as u16)
    }
    pub fn j(addr: u32) -> u32 {
        (0x02 << 26) | ((addr >> 2) & 0x03FF_FFFF)
    }
    pub fn jal(addr: u32) -> u32 {
        (0x03 << 26) | ((addr >> 2) & 0x03FF_FFFF)
    }
    pub fn beq(rs: u8, rt: u8, offset: i16) -> u32 {
        imm(0x04, rs, rt, offset as u16)
    }
    pub fn bne(rs: u8, rt: u8, offset: i16) -> u32 {
        imm(0x05, rs, rt, offset as u16)
    }
    pub fn blez(rs: u8, offset: i16) -> u32 {
        imm(0x06, rs, 0, offset as u16)
    }
    pub fn bgtz(rs: u8, offset: i16) -> u32 {
        imm(0x07, rs, 0, offset as u16)
    }
    pub fn addi(rt: u8, rs: u8, value: i16) -> u32 {
        imm(0x08, rs, rt, value as u16)
    }
    pub fn addiu(rt: u8, rs: u8, value: i16) -> u32 {
        imm(0x09, rs, rt, value as u16)
    }
    pub fn slti(rt: u8, rs: u8, value: i16) -> u32 {
        imm(0x0A, rs, rt, value as u16)
    }
    pub fn sltiu(rt: u8, rs: u8, value: i16) -> u32 {
        imm(0x0B, rs, rt, value as u16)
    }
    pub fn andi(rt: u8, rs: u8, value: u16) -> u32 {
        imm(0x0C, rs, rt, value)
    }
    pub fn ori(rt: u8, rs: u8, value: u16) -> u32 {
        imm(0x0D, rs, rt, value)
    }
    pub fn xori(rt: u8, rs: u8, value: u16) -> u32 {
        imm(0x0E, rs, rt, value)
    }
    pub fn lui(rt: u8, value: u16) -> u32 {
        imm(0x0F, 0, rt, value)
    }
    pub fn mfc0(rt: u8, rd: u8) -> u32 {
        0x4000_0000 | ((rt as u32) << 16) | ((rd as u32) << 11)
    }
    pub fn cfc0(rt: u8, rd: u8) -> u32 {
        0x4040_0000 | ((rt as u32) << 16) | ((rd as u32) << 11)
    }
    pub fn mtc0(rt: u8, rd: u8) -> u32 {
        0x4080_0000 | ((rt as u32) << 16) | ((rd as u32) << 11)
    }
    pub fn ctc0(rt: u8, rd: u8) -> u32 {
        0x40C0_0000 | ((rt as u32) << 16) | ((rd as u32) << 11)
    }
    pub fn lb(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x20, base, rt, offset as u16)
    }
    pub fn lh(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x21, base, rt, offset as u16)
    }
    pub fn lwl(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x22, base, rt, offset as u16)
    }
    pub fn lw(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x23, base, rt, offset as u16)
    }
    pub fn lbu(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x24, base, rt, offset as u16)
    }
    pub fn lhu(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x25, base, rt, offset as u16)
    }
    pub fn lwr(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x26, base, rt, offset as u16)
    }
    pub fn sb(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x28, base, rt, offset as u16)
    }
    pub fn sh(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x29, base, rt, offset as u16)
    }
    pub fn swl(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x2A, base, rt, offset as u16)
    }
    pub fn sw(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x2B, base, rt, offset as u16)
    }
    pub fn swr(rt: u8, base: u8, offset: i16) -> u32 {
        imm(0x2E, base, rt, offset as u16)
    }
}

// ABI register numbers used by the tests
const AT: u8 = 1;
const T0: u8 = 8;
const T1: u8 = 9;
const T2: u8 = 10;
const T3: u8 = 11;
const RA: u8 = 31;
