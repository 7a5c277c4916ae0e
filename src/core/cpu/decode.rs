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

//! Instruction decoding
//!
//! A 32-bit word is split positionally into every field up front, and the
//! opcode class is resolved once into an [`Opcode`]. Execution is a single
//! exhaustive `match` over that enum.
//!
//! ```text
//! R-type: | op (6) | rs (5) | rt (5) | rd (5) | shamt (5) | funct (6) |
//! I-type: | op (6) | rs (5) | rt (5) |        immediate (16)          |
//! J-type: | op (6) |                 target (26)                     |
//! ```

/// Resolved operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // SPECIAL
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Jr,
    Jalr,
    Syscall,
    Break,
    Mfhi,
    Mthi,
    Mflo,
    Mtlo,
    Mult,
    Multu,
    Div,
    Divu,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,

    // REGIMM
    Bltz,
    Bgez,
    Bltzal,
    Bgezal,

    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,

    // COP0
    Mfc0,
    Cfc0,
    Mtc0,
    Ctc0,
    Rfe,

    Lb,
    Lh,
    Lwl,
    Lw,
    Lbu,
    Lhu,
    Lwr,
    Sb,
    Sh,
    Swl,
    Sw,
    Swr,

    /// COP1-COP3 operation (no such coprocessor is emulated)
    Cop(u8),
    /// LWC1-LWC3
    Lwc(u8),
    /// SWC1-SWC3
    Swc(u8),
    /// Reserved encoding, TLB operation or unknown COP0 operation
    Illegal,
}

/// A decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Raw instruction word
    pub word: u32,
    pub opcode: Opcode,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    /// Low 16 bits, unextended
    pub imm: u16,
    /// Low 26 bits (J/JAL)
    pub target: u32,
}

impl Instruction {
    /// Immediate sign-extended to 32 bits
    #[inline(always)]
    pub fn imm_se(&self) -> u32 {
        self.imm as i16 as i32 as u32
    }

    /// Immediate zero-extended to 32 bits
    #[inline(always)]
    pub fn imm_ze(&self) -> u32 {
        self.imm as u32
    }

    /// Branch displacement in bytes
    #[inline(always)]
    pub fn branch_offset(&self) -> u32 {
        self.imm_se() << 2
    }
}

/// Decode a 32-bit instruction word
///
/// # Example
///
/// ```
/// use psxcore::core::cpu::{decode, Opcode};
///
/// let instr = decode(0x2408FFFF); // addiu t0, zero, -1
/// assert_eq!(instr.opcode, Opcode::Addiu);
/// assert_eq!(instr.rt, 8);
/// assert_eq!(instr.imm_se(), 0xFFFF_FFFF);
/// ```
#[inline]
pub fn decode(word: u32) -> Instruction {
    let primary = word >> 26;
    let rs = ((word >> 21) & 0x1F) as u8;
    let rt = ((word >> 16) & 0x1F) as u8;
    let funct = word & 0x3F;

    let opcode = match primary {
        0x00 => decode_special(funct),
        0x01 => decode_regimm(rt),
        0x02 => Opcode::J,
        0x03 => Opcode::Jal,
        0x04 => Opcode::Beq,
        0x05 => Opcode::Bne,
        0x06 => Opcode::Blez,
        0x07 => Opcode::Bgtz,
        0x08 => Opcode::Addi,
        0x09 => Opcode::Addiu,
        0x0A => Opcode::Slti,
        0x0B => Opcode::Sltiu,
        0x0C => Opcode::Andi,
        0x0D => Opcode::Ori,
        0x0E => Opcode::Xori,
        0x0F => Opcode::Lui,
        0x10 => decode_cop0(rs, funct),
        0x11..=0x13 => Opcode::Cop((primary & 3) as u8),
        0x20 => Opcode::Lb,
        0x21 => Opcode::Lh,
        0x22 => Opcode::Lwl,
        0x23 => Opcode::Lw,
        0x24 => Opcode::Lbu,
        0x25 => Opcode::Lhu,
        0x26 => Opcode::Lwr,
        0x28 => Opcode::Sb,
        0x29 => Opcode::Sh,
        0x2A => Opcode::Swl,
        0x2B => Opcode::Sw,
        0x2E => Opcode::Swr,
        0x30..=0x33 => Opcode::Lwc((primary & 3) as u8),
        0x38..=0x3B => Opcode::Swc((primary & 3) as u8),
        _ => Opcode::Illegal,
    };

    Instruction {
        word,
        opcode,
        rs,
        rt,
        rd: ((word >> 11) & 0x1F) as u8,
        shamt: ((word >> 6) & 0x1F) as u8,
        imm: (word & 0xFFFF) as u16,
        target: word & 0x03FF_FFFF,
    }
}

fn decode_special(funct: u32) -> Opcode {
    match funct {
        0x00 => Opcode::Sll,
        0x02 => Opcode::Srl,
        0x03 => Opcode::Sra,
        0x04 => Opcode::Sllv,
        0x06 => Opcode::Srlv,
        0x07 => Opcode::Srav,
        0x08 => Opcode::Jr,
        0x09 => Opcode::Jalr,
        0x0C => Opcode::Syscall,
        0x0D => Opcode::Break,
        0x10 => Opcode::Mfhi,
        0x11 => Opcode::Mthi,
        0x12 => Opcode::Mflo,
        0x13 => Opcode::Mtlo,
        0x18 => Opcode::Mult,
        0x19 => Opcode::Multu,
        0x1A => Opcode::Div,
        0x1B => Opcode::Divu,
        0x20 => Opcode::Add,
        0x21 => Opcode::Addu,
        0x22 => Opcode::Sub,
        0x23 => Opcode::Subu,
        0x24 => Opcode::And,
        0x25 => Opcode::Or,
        0x26 => Opcode::Xor,
        0x27 => Opcode::Nor,
        0x2A => Opcode::Slt,
        0x2B => Opcode::Sltu,
        _ => Opcode::Illegal,
    }
}

/// BcondZ: bit 0 of rt selects GEZ, rt = 1000x selects the linking form.
/// Every other rt value still decodes as the plain branch.
fn decode_regimm(rt: u8) -> Opcode {
    let gez = rt & 0x01 != 0;
    let link = rt & 0x1E == 0x10;
    match (gez, link) {
        (false, false) => Opcode::Bltz,
        (true, false) => Opcode::Bgez,
        (false, true) => Opcode::Bltzal,
        (true, true) => Opcode::Bgezal,
    }
}

fn decode_cop0(rs: u8, funct: u32) -> Opcode {
    match rs {
        0x00 => Opcode::Mfc0,
        0x02 => Opcode::Cfc0,
        0x04 => Opcode::Mtc0,
        0x06 => Opcode::Ctc0,
        0x10..=0x1F if funct == 0x10 => Opcode::Rfe,
        // TLBR/TLBWI/TLBWR/TLBP and BC0x have nothing to act on
        _ => Opcode::Illegal,
    }
}
