use super::{Cpu, constants::*};
use crate::memory_bus::MemoryBus;

// --- Rotates and shifts ---
impl Cpu {
    // The four A-register rotates always clear Z.
    pub(super) fn op_rlca(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.a = self.rlc(self.a);
        self.set_flag(FLAG_Z, false);
        0
    }

    pub(super) fn op_rrca(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.a = self.rrc(self.a);
        self.set_flag(FLAG_Z, false);
        0
    }

    pub(super) fn op_rla(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.a = self.rl(self.a);
        self.set_flag(FLAG_Z, false);
        0
    }

    pub(super) fn op_rra(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.a = self.rr(self.a);
        self.set_flag(FLAG_Z, false);
        0
    }

    // --- CB-prefixed handlers: target register in bits 0-2 ---
    pub(super) fn cb_rlc(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::rlc)
    }
    pub(super) fn cb_rrc(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::rrc)
    }
    pub(super) fn cb_rl(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::rl)
    }
    pub(super) fn cb_rr(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::rr)
    }
    pub(super) fn cb_sla(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::sla)
    }
    pub(super) fn cb_sra(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::sra)
    }
    pub(super) fn cb_swap(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::swap)
    }
    pub(super) fn cb_srl(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.cb_apply(bus, opcode, Cpu::srl)
    }

    fn cb_apply(&mut self, bus: &mut MemoryBus, opcode: u8, f: fn(&mut Cpu, u8) -> u8) -> u32 {
        let value = self.read_reg8(bus, opcode & 7);
        let result = f(self, value);
        self.write_reg8(bus, opcode & 7, result);
        0
    }

    pub(super) fn cb_bit(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let value = self.read_reg8(bus, opcode & 7);
        let bit = (opcode >> 3) & 7;
        self.set_flag(FLAG_Z, value & (1 << bit) == 0);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, true);
        0 // C preserved
    }

    pub(super) fn cb_res(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let value = self.read_reg8(bus, opcode & 7);
        let bit = (opcode >> 3) & 7;
        self.write_reg8(bus, opcode & 7, value & !(1 << bit));
        0
    }

    pub(super) fn cb_set(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let value = self.read_reg8(bus, opcode & 7);
        let bit = (opcode >> 3) & 7;
        self.write_reg8(bus, opcode & 7, value | (1 << bit));
        0
    }

    // --- Helpers; all set Z from the result ---

    // RLC/RRC are plain rotates: the bit that falls off enters both the
    // carry and the opposite end.
    fn rlc(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(1);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x80 != 0);
        result
    }

    fn rrc(&mut self, value: u8) -> u8 {
        let result = value.rotate_right(1);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x01 != 0);
        result
    }

    // RL/RR rotate through the carry: carry in, new carry out.
    fn rl(&mut self, value: u8) -> u8 {
        let result = (value << 1) | u8::from(self.get_flag(FLAG_C));
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x80 != 0);
        result
    }

    fn rr(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (u8::from(self.get_flag(FLAG_C)) << 7);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x01 != 0);
        result
    }

    fn sla(&mut self, value: u8) -> u8 {
        let result = value << 1;
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x80 != 0);
        result
    }

    // SRA keeps the sign bit.
    fn sra(&mut self, value: u8) -> u8 {
        let result = (value >> 1) | (value & 0x80);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x01 != 0);
        result
    }

    fn swap(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(4);
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H | FLAG_C, false);
        result
    }

    fn srl(&mut self, value: u8) -> u8 {
        let result = value >> 1;
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, value & 0x01 != 0);
        result
    }
}
