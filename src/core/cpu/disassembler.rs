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

//! MIPS instruction disassembler for debugging
//!
//! Converts binary instruction encodings to assembly with ABI register
//! names. Branch and jump operands are rendered as absolute addresses.

use super::decode::{decode, Opcode};
use super::REGISTER_NAMES;

/// Instruction disassembler
///
/// # Example
/// ```
/// use psxcore::core::cpu::Disassembler;
///
/// let disasm = Disassembler::disassemble(0x3C011234, 0xBFC00000);
/// assert_eq!(disasm, "lui at, 0x1234");
/// ```
pub struct Disassembler;

#[inline]
fn r(index: u8) -> &'static str {
    REGISTER_NAMES[(index & 0x1F) as usize]
}

impl Disassembler {
    /// Disassemble a single instruction located at `pc`
    pub fn disassemble(instruction: u32, pc: u32) -> String {
        let i = decode(instruction);
        let (rs, rt, rd) = (r(i.rs), r(i.rt), r(i.rd));
        let simm = i.imm as i16;
        let delay_slot = pc.wrapping_add(4);
        let branch_target = delay_slot.wrapping_add(i.branch_offset());

        match i.opcode {
            Opcode::Sll if instruction == 0 => "nop".to_string(),
            Opcode::Sll => format!("sll {}, {}, {}", rd, rt, i.shamt),
            Opcode::Srl => format!("srl {}, {}, {}", rd, rt, i.shamt),
            Opcode::Sra => format!("sra {}, {}, {}", rd, rt, i.shamt),
            Opcode::Sllv => format!("sllv {}, {}, {}", rd, rt, rs),
            Opcode::Srlv => format!("srlv {}, {}, {}", rd, rt, rs),
            Opcode::Srav => format!("srav {}, {}, {}", rd, rt, rs),
            Opcode::Jr => format!("jr {}", rs),
            Opcode::Jalr if i.rd == 31 => format!("jalr {}", rs),
            Opcode::Jalr => format!("jalr {}, {}", rd, rs),
            Opcode::Syscall => "syscall".to_string(),
            Opcode::Break => "break".to_string(),
            Opcode::Mfhi => format!("mfhi {}", rd),
            Opcode::Mthi => format!("mthi {}", rs),
            Opcode::Mflo => format!("mflo {}", rd),
            Opcode::Mtlo => format!("mtlo {}", rs),
            Opcode::Mult => format!("mult {}, {}", rs, rt),
            Opcode::Multu => format!("multu {}, {}", rs, rt),
            Opcode::Div => format!("div {}, {}", rs, rt),
            Opcode::Divu => format!("divu {}, {}", rs, rt),
            Opcode::Add => format!("add {}, {}, {}", rd, rs, rt),
            Opcode::Addu => format!("addu {}, {}, {}", rd, rs, rt),
            Opcode::Sub => format!("sub {}, {}, {}", rd, rs, rt),
            Opcode::Subu => format!("subu {}, {}, {}", rd, rs, rt),
            Opcode::And => format!("and {}, {}, {}", rd, rs, rt),
            Opcode::Or => format!("or {}, {}, {}", rd, rs, rt),
            Opcode::Xor => format!("xor {}, {}, {}", rd, rs, rt),
            Opcode::Nor => format!("nor {}, {}, {}", rd, rs, rt),
            Opcode::Slt => format!("slt {}, {}, {}", rd, rs, rt),
            Opcode::Sltu => format!("sltu {}, {}, {}", rd, rs, rt),

            Opcode::Bltz => format!("bltz {}, 0x{:08X}", rs, branch_target),
            Opcode::Bgez => format!("bgez {}, 0x{:08X}", rs, branch_target),
            Opcode::Bltzal => format!("bltzal {}, 0x{:08X}", rs, branch_target),
            Opcode::Bgezal => format!("bgezal {}, 0x{:08X}", rs, branch_target),
            Opcode::J | Opcode::Jal => {
                let target = (delay_slot & 0xF000_0000) | (i.target << 2);
                let name = if i.opcode == Opcode::J { "j" } else { "jal" };
                format!("{} 0x{:08X}", name, target)
            }
            Opcode::Beq => format!("beq {}, {}, 0x{:08X}", rs, rt, branch_target),
            Opcode::Bne => format!("bne {}, {}, 0x{:08X}", rs, rt, branch_target),
            Opcode::Blez => format!("blez {}, 0x{:08X}", rs, branch_target),
            Opcode::Bgtz => format!("bgtz {}, 0x{:08X}", rs, branch_target),

            Opcode::Addi => format!("addi {}, {}, {}", rt, rs, simm),
            Opcode::Addiu => format!("addiu {}, {}, {}", rt, rs, simm),
            Opcode::Slti => format!("slti {}, {}, {}", rt, rs, simm),
            Opcode::Sltiu => format!("sltiu {}, {}, {}", rt, rs, simm),
            Opcode::Andi => format!("andi {}, {}, 0x{:04X}", rt, rs, i.imm),
            Opcode::Ori => format!("ori {}, {}, 0x{:04X}", rt, rs, i.imm),
            Opcode::Xori => format!("xori {}, {}, 0x{:04X}", rt, rs, i.imm),
            Opcode::Lui => format!("lui {}, 0x{:04X}", rt, i.imm),

            Opcode::Mfc0 => format!("mfc0 {}, cop0r{}", rt, i.rd),
            Opcode::Cfc0 => format!("cfc0 {}, cop0r{}", rt, i.rd),
            Opcode::Mtc0 => format!("mtc0 {}, cop0r{}", rt, i.rd),
            Opcode::Ctc0 => format!("ctc0 {}, cop0r{}", rt, i.rd),
            Opcode::Rfe => "rfe".to_string(),

            Opcode::Lb => format!("lb {}, {}({})", rt, simm, rs),
            Opcode::Lh => format!("lh {}, {}({})", rt, simm, rs),
            Opcode::Lwl => format!("lwl {}, {}({})", rt, simm, rs),
            Opcode::Lw => format!("lw {}, {}({})", rt, simm, rs),
            Opcode::Lbu => format!("lbu {}, {}({})", rt, simm, rs),
            Opcode::Lhu => format!("lhu {}, {}({})", rt, simm, rs),
            Opcode::Lwr => format!("lwr {}, {}({})", rt, simm, rs),
            Opcode::Sb => format!("sb {}, {}({})", rt, simm, rs),
            Opcode::Sh => format!("sh {}, {}({})", rt, simm, rs),
            Opcode::Swl => format!("swl {}, {}({})", rt, simm, rs),
            Opcode::Sw => format!("sw {}, {}({})", rt, simm, rs),
            Opcode::Swr => format!("swr {}, {}({})", rt, simm, rs),

            Opcode::Cop(n) => format!("cop{} 0x{:07X}", n, instruction & 0x01FF_FFFF),
            Opcode::Lwc(n) => format!("lwc{} ${}, {}({})", n, i.rt, simm, rs),
            Opcode::Swc(n) => format!("swc{} ${}, {}({})", n, i.rt, simm, rs),
            Opcode::Illegal => format!("illegal 0x{:08X}", instruction),
        }
    }
}
