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

//! CPU instruction implementations
//!
//! Handlers are grouped by instruction class. [`CPU::execute`] is the only
//! dispatch point.

use super::decode::{Instruction, Opcode};
use super::CPU;
use crate::core::error::Result;
use crate::core::memory::Bus;

mod arithmetic;
mod branch;
mod cop0;
mod exception;
mod jump;
mod load;
mod logical;
mod multiply;
mod shift;
mod store;

impl CPU {
    /// Execute a decoded instruction
    pub(super) fn execute(&mut self, i: Instruction, bus: &mut Bus) -> Result<()> {
        let (rs, rt, rd) = (i.rs, i.rt, i.rd);

        match i.opcode {
            Opcode::Sll => self.op_sll(rt, rd, i.shamt),
            Opcode::Srl => self.op_srl(rt, rd, i.shamt),
            Opcode::Sra => self.op_sra(rt, rd, i.shamt),
            Opcode::Sllv => self.op_sllv(rs, rt, rd),
            Opcode::Srlv => self.op_srlv(rs, rt, rd),
            Opcode::Srav => self.op_srav(rs, rt, rd),
            Opcode::Jr => self.op_jr(rs),
            Opcode::Jalr => self.op_jalr(rs, rd),
            Opcode::Syscall => self.op_syscall(),
            Opcode::Break => self.op_break(),
            Opcode::Mfhi => self.op_mfhi(rd),
            Opcode::Mthi => self.op_mthi(rs),
            Opcode::Mflo => self.op_mflo(rd),
            Opcode::Mtlo => self.op_mtlo(rs),
            Opcode::Mult => self.op_mult(rs, rt),
            Opcode::Multu => self.op_multu(rs, rt),
            Opcode::Div => self.op_div(rs, rt),
            Opcode::Divu => self.op_divu(rs, rt),
            Opcode::Add => self.op_add(rs, rt, rd),
            Opcode::Addu => self.op_addu(rs, rt, rd),
            Opcode::Sub => self.op_sub(rs, rt, rd),
            Opcode::Subu => self.op_subu(rs, rt, rd),
            Opcode::And => self.op_and(rs, rt, rd),
            Opcode::Or => self.op_or(rs, rt, rd),
            Opcode::Xor => self.op_xor(rs, rt, rd),
            Opcode::Nor => self.op_nor(rs, rt, rd),
            Opcode::Slt => self.op_slt(rs, rt, rd),
            Opcode::Sltu => self.op_sltu(rs, rt, rd),

            Opcode::Bltz => self.op_bltz(i, false),
            Opcode::Bgez => self.op_bgez(i, false),
            Opcode::Bltzal => self.op_bltz(i, true),
            Opcode::Bgezal => self.op_bgez(i, true),
            Opcode::J => self.op_j(i),
            Opcode::Jal => self.op_jal(i),
            Opcode::Beq => self.op_beq(i),
            Opcode::Bne => self.op_bne(i),
            Opcode::Blez => self.op_blez(i),
            Opcode::Bgtz => self.op_bgtz(i),

            Opcode::Addi => self.op_addi(i),
            Opcode::Addiu => self.op_addiu(i),
            Opcode::Slti => self.op_slti(i),
            Opcode::Sltiu => self.op_sltiu(i),
            Opcode::Andi => self.op_andi(i),
            Opcode::Ori => self.op_ori(i),
            Opcode::Xori => self.op_xori(i),
            Opcode::Lui => self.op_lui(i),

            Opcode::Mfc0 | Opcode::Cfc0 => self.op_mfc0(rt, rd),
            Opcode::Mtc0 | Opcode::Ctc0 => self.op_mtc0(rt, rd, bus),
            Opcode::Rfe => self.op_rfe(),

            Opcode::Lb => self.op_lb(i, bus),
            Opcode::Lh => self.op_lh(i, bus),
            Opcode::Lwl => self.op_lwl(i, bus),
            Opcode::Lw => self.op_lw(i, bus),
            Opcode::Lbu => self.op_lbu(i, bus),
            Opcode::Lhu => self.op_lhu(i, bus),
            Opcode::Lwr => self.op_lwr(i, bus),
            Opcode::Sb => self.op_sb(i, bus),
            Opcode::Sh => self.op_sh(i, bus),
            Opcode::Swl => self.op_swl(i, bus),
            Opcode::Sw => self.op_sw(i, bus),
            Opcode::Swr => self.op_swr(i, bus),

            Opcode::Cop(_) | Opcode::Lwc(_) | Opcode::Swc(_) | Opcode::Illegal => {
                log::error!(
                    "Unsupported instruction 0x{:08X} ({:?}) at PC=0x{:08X}",
                    i.word,
                    i.opcode,
                    self.current_pc
                );
                Err(self.unsupported())
            }
        }
    }

    /// Effective address of a load/store: rs + sign_extend(imm)
    #[inline(always)]
    fn effective_address(&self, i: Instruction) -> u32 {
        self.reg(i.rs).wrapping_add(i.imm_se())
    }
}
