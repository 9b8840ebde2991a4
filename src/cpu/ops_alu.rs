use super::{Cpu, constants::*};
use crate::memory_bus::MemoryBus;

// --- Arithmetic / logic operations ---
impl Cpu {
    // ALU quadrant 0x80-0xBF: family in bits 3-5, source in bits 0-2.
    pub(super) fn op_alu_r(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let value = self.read_reg8(bus, opcode & 7);
        self.alu_dispatch((opcode >> 3) & 7, value);
        0
    }

    // Immediate forms 0xC6/0xCE/.../0xFE share the same family decode.
    pub(super) fn op_alu_d8(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let value = self.read_d8(bus);
        self.alu_dispatch((opcode >> 3) & 7, value);
        0
    }

    fn alu_dispatch(&mut self, family: u8, value: u8) {
        match family & 7 {
            0 => self.add_a(value, false),
            1 => self.add_a(value, true),
            2 => self.sub_a(value, false),
            3 => self.sub_a(value, true),
            4 => self.and_a(value),
            5 => self.xor_a(value),
            6 => self.or_a(value),
            _ => self.cp_a(value),
        }
    }

    pub(super) fn op_inc_r(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let index = (opcode >> 3) & 7;
        let value = self.read_reg8(bus, index);
        let result = self.inc_u8(value);
        self.write_reg8(bus, index, result);
        0
    }

    pub(super) fn op_dec_r(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let index = (opcode >> 3) & 7;
        let value = self.read_reg8(bus, index);
        let result = self.dec_u8(value);
        self.write_reg8(bus, index, result);
        0
    }

    // 16-bit INC/DEC touch no flags.
    pub(super) fn op_inc_rr(&mut self, _bus: &mut MemoryBus, opcode: u8) -> u32 {
        let index = opcode >> 4;
        self.write_pair(index, self.read_pair(index).wrapping_add(1));
        0
    }

    pub(super) fn op_dec_rr(&mut self, _bus: &mut MemoryBus, opcode: u8) -> u32 {
        let index = opcode >> 4;
        self.write_pair(index, self.read_pair(index).wrapping_sub(1));
        0
    }

    pub(super) fn op_add_hl_rr(&mut self, _bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.add_hl(self.read_pair(opcode >> 4));
        0
    }

    pub(super) fn op_add_sp_r8(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        let offset = self.read_d8(bus);
        self.sp = self.add_sp_signed(offset);
        0
    }

    pub(super) fn op_ld_hl_sp_r8(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        let offset = self.read_d8(bus);
        let result = self.add_sp_signed(offset);
        self.set_hl(result);
        0
    }

    // BCD adjust after an add or subtract; direction comes from N.
    pub(super) fn op_daa(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        let mut adjustment = 0u8;
        let mut carry = false;
        if !self.get_flag(FLAG_N) {
            if self.get_flag(FLAG_C) || self.a > 0x99 {
                adjustment |= 0x60;
                carry = true;
            }
            if self.get_flag(FLAG_H) || self.a & 0x0F > 0x09 {
                adjustment |= 0x06;
            }
            self.a = self.a.wrapping_add(adjustment);
        } else {
            if self.get_flag(FLAG_C) {
                adjustment |= 0x60;
                carry = true;
            }
            if self.get_flag(FLAG_H) {
                adjustment |= 0x06;
            }
            self.a = self.a.wrapping_sub(adjustment);
        }
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_H, false);
        self.set_flag(FLAG_C, carry);
        0
    }

    // --- ALU helpers ---
    fn add_a(&mut self, value: u8, with_carry: bool) {
        let carry_in = u8::from(with_carry && self.get_flag(FLAG_C));
        let (partial, c1) = self.a.overflowing_add(value);
        let (result, c2) = partial.overflowing_add(carry_in);
        let half_carry = (self.a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;
        self.a = result;
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, half_carry);
        self.set_flag(FLAG_C, c1 || c2);
    }

    fn sub_a(&mut self, value: u8, with_carry: bool) {
        let carry_in = u8::from(with_carry && self.get_flag(FLAG_C));
        let (partial, b1) = self.a.overflowing_sub(value);
        let (result, b2) = partial.overflowing_sub(carry_in);
        let half_borrow = (self.a & 0x0F) < (value & 0x0F) + carry_in;
        self.a = result;
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, true);
        self.set_flag(FLAG_H, half_borrow);
        self.set_flag(FLAG_C, b1 || b2);
    }

    fn and_a(&mut self, value: u8) {
        self.a &= value;
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_N | FLAG_C, false);
        self.set_flag(FLAG_H, true);
    }

    fn xor_a(&mut self, value: u8) {
        self.a ^= value;
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_N | FLAG_H | FLAG_C, false);
    }

    fn or_a(&mut self, value: u8) {
        self.a |= value;
        self.set_flag(FLAG_Z, self.a == 0);
        self.set_flag(FLAG_N | FLAG_H | FLAG_C, false);
    }

    // CP is SUB with the result discarded.
    fn cp_a(&mut self, value: u8) {
        let saved = self.a;
        self.sub_a(value, false);
        self.a = saved;
    }

    fn inc_u8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, value & 0x0F == 0x0F);
        result // C preserved
    }

    fn dec_u8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, true);
        self.set_flag(FLAG_H, value & 0x0F == 0x00);
        result // C preserved
    }

    // ADD HL, rr: Z preserved, H from bit 11, C from bit 15. No carry-in.
    fn add_hl(&mut self, value: u16) {
        let hl = self.get_hl();
        let (result, carry) = hl.overflowing_add(value);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(FLAG_C, carry);
        self.set_hl(result);
    }

    // SP + signed offset for ADD SP,r8 and LD HL,SP+r8: the result is
    // signed, the H/C flags come from the unsigned low byte.
    fn add_sp_signed(&mut self, offset: u8) -> u16 {
        let result = self.sp.wrapping_add(offset as i8 as i16 as u16);
        self.set_flag(FLAG_Z | FLAG_N, false);
        self.set_flag(FLAG_H, (self.sp & 0x0F) + u16::from(offset & 0x0F) > 0x0F);
        self.set_flag(FLAG_C, (self.sp & 0xFF) + u16::from(offset) > 0xFF);
        result
    }
}
