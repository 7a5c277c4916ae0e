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

use super::*;

#[test]
fn test_decode_r_type_fields() {
    // addu t0, t1, t2
    let i = decode(0x012A4021);

    assert_eq!(i.opcode, Opcode::Addu);
    assert_eq!(i.rs, 9);
    assert_eq!(i.rt, 10);
    assert_eq!(i.rd, 8);
    assert_eq!(i.shamt, 0);
    assert_eq!(i.word, 0x012A4021);
}

#[test]
fn test_decode_immediates() {
    let i = decode(asm::addiu(T0, 0, -2));

    assert_eq!(i.imm, 0xFFFE);
    assert_eq!(i.imm_se(), 0xFFFF_FFFE);
    assert_eq!(i.imm_ze(), 0x0000_FFFE);
    assert_eq!(i.branch_offset(), 0xFFFF_FFF8);
}

#[test]
fn test_decode_jump_target() {
    let i = decode(0x0BF00010);
    assert_eq!(i.opcode, Opcode::J);
    assert_eq!(i.target, 0x03F00010);
}

#[test]
fn test_decode_bcondz_variants() {
    assert_eq!(decode(asm::imm(0x01, 1, 0x00, 0)).opcode, Opcode::Bltz);
    assert_eq!(decode(asm::imm(0x01, 1, 0x01, 0)).opcode, Opcode::Bgez);
    assert_eq!(decode(asm::imm(0x01, 1, 0x10, 0)).opcode, Opcode::Bltzal);
    assert_eq!(decode(asm::imm(0x01, 1, 0x11, 0)).opcode, Opcode::Bgezal);
    // Only rt = 1000x links; other encodings are the plain branches
    assert_eq!(decode(asm::imm(0x01, 1, 0x12, 0)).opcode, Opcode::Bltz);
    assert_eq!(decode(asm::imm(0x01, 1, 0x03, 0)).opcode, Opcode::Bgez);
}

#[test]
fn test_decode_cop0() {
    assert_eq!(decode(asm::mfc0(T0, 12)).opcode, Opcode::Mfc0);
    assert_eq!(decode(asm::cfc0(T0, 12)).opcode, Opcode::Cfc0);
    assert_eq!(decode(asm::mtc0(T0, 12)).opcode, Opcode::Mtc0);
    assert_eq!(decode(asm::ctc0(T0, 12)).opcode, Opcode::Ctc0);
    assert_eq!(decode(asm::RFE).opcode, Opcode::Rfe);
    // TLBR, TLBWI, TLBP
    assert_eq!(decode(0x42000001).opcode, Opcode::Illegal);
    assert_eq!(decode(0x42000002).opcode, Opcode::Illegal);
    assert_eq!(decode(0x42000008).opcode, Opcode::Illegal);
}

#[test]
fn test_decode_other_coprocessors() {
    assert_eq!(decode(0x44000000).opcode, Opcode::Cop(1));
    assert_eq!(decode(0x4A000000).opcode, Opcode::Cop(2));
    assert_eq!(decode(0xC8000000).opcode, Opcode::Lwc(2));
    assert_eq!(decode(0xE8000000).opcode, Opcode::Swc(2));
}

#[test]
fn test_decode_reserved() {
    assert_eq!(decode(0xFC000000).opcode, Opcode::Illegal);
    assert_eq!(decode(asm::special(0x01, 0, 0, 0, 0)).opcode, Opcode::Illegal);
    assert_eq!(decode(0x9C000000).opcode, Opcode::Illegal); // 0x27
}
