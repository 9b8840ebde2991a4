use super::{Cpu, constants::*};
use crate::memory_bus::MemoryBus;

// --- Control flow and miscellaneous operations ---
impl Cpu {
    pub(super) fn op_nop(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        0
    }

    // STOP: low-power mode is not modeled; the pad byte is consumed by the
    // declared length and execution continues.
    pub(super) fn op_stop(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        0
    }

    pub(super) fn op_jr(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        let offset = self.read_r8(bus);
        self.pc = self.pc.wrapping_add(offset as u16);
        0
    }

    pub(super) fn op_jr_cc(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let offset = self.read_r8(bus);
        if self.condition((opcode >> 3) & 3) {
            self.pc = self.pc.wrapping_add(offset as u16);
            4 // taken: 12 total
        } else {
            0
        }
    }

    pub(super) fn op_jp_a16(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.pc = self.read_d16(bus);
        0
    }

    pub(super) fn op_jp_cc(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let addr = self.read_d16(bus);
        if self.condition((opcode >> 3) & 3) {
            self.pc = addr;
            4 // taken: 16 total
        } else {
            0
        }
    }

    pub(super) fn op_jp_hl(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.pc = self.get_hl();
        0
    }

    pub(super) fn op_call_a16(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        let addr = self.read_d16(bus);
        self.push_word(bus, self.pc); // PC already past the operand
        self.pc = addr;
        0
    }

    pub(super) fn op_call_cc(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        let addr = self.read_d16(bus);
        if self.condition((opcode >> 3) & 3) {
            self.push_word(bus, self.pc);
            self.pc = addr;
            12 // taken: 24 total
        } else {
            0
        }
    }

    pub(super) fn op_ret(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.pc = self.pop_word(bus);
        0
    }

    pub(super) fn op_ret_cc(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        if self.condition((opcode >> 3) & 3) {
            self.pc = self.pop_word(bus);
            12 // taken: 20 total
        } else {
            0
        }
    }

    // RETI re-enables IME immediately, with no EI-style delay.
    pub(super) fn op_reti(&mut self, bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.pc = self.pop_word(bus);
        self.ime = true;
        self.ime_pending = 0;
        0
    }

    // RST: the vector is encoded in opcode bits 3-5.
    pub(super) fn op_rst(&mut self, bus: &mut MemoryBus, opcode: u8) -> u32 {
        self.push_word(bus, self.pc);
        self.pc = u16::from(opcode & 0x38);
        0
    }

    pub(super) fn op_di(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.ime = false;
        self.ime_pending = 0; // cancels a pending EI
        0
    }

    pub(super) fn op_ei(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.ime_pending = 2;
        0
    }

    pub(super) fn op_halt(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.halted = true;
        0
    }

    pub(super) fn op_scf(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, true);
        0
    }

    pub(super) fn op_ccf(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        let carry = self.get_flag(FLAG_C);
        self.set_flag(FLAG_N | FLAG_H, false);
        self.set_flag(FLAG_C, !carry);
        0
    }

    pub(super) fn op_cpl(&mut self, _bus: &mut MemoryBus, _opcode: u8) -> u32 {
        self.a = !self.a;
        self.set_flag(FLAG_N | FLAG_H, true);
        0
    }

    // Unknown opcodes halt the CPU instead of corrupting state.
    pub(super) fn op_invalid(&mut self, _bus: &mut MemoryBus, opcode: u8) -> u32 {
        log::warn!(
            "Invalid opcode {:#04X} at PC={:#06X}; halting CPU",
            opcode,
            self.instruction_pc
        );
        self.halted = true;
        0
    }
}
