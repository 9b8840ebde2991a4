use super::Cpu;
use crate::memory_bus::MemoryBus;
use lazy_static::lazy_static;

/// An opcode handler: receives the opcode so regular blocks (LD r,r', the
/// ALU quadrant, the CB families) can share one handler and decode their
/// operand fields from it. Returns the extra T-cycles of a taken branch.
pub type OpFn = fn(&mut Cpu, &mut MemoryBus, u8) -> u32;

#[derive(Clone)]
pub struct Instruction {
    pub mnemonic: &'static str,
    pub length: u8,
    pub cycles: u8, // base T-cycles (not-taken cost for conditionals)
    pub execute: OpFn,
}

impl Instruction {
    pub const fn new(mnemonic: &'static str, length: u8, cycles: u8, execute: OpFn) -> Self {
        Instruction {
            mnemonic,
            length,
            cycles,
            execute,
        }
    }

    pub const fn invalid() -> Self {
        Instruction {
            mnemonic: "INVALID",
            length: 1,
            cycles: 4,
            execute: Cpu::op_invalid,
        }
    }
}

macro_rules! op {
    ($mnemonic:expr, $length:expr, $cycles:expr, $handler:ident) => {
        Instruction::new($mnemonic, $length, $cycles, Cpu::$handler)
    };
}
macro_rules! invalid {
    () => {
        Instruction::invalid()
    };
}

lazy_static! {
    /// Main instruction table (0x00-0xFF). 0xCB never reaches this table;
    /// the step loop dispatches it through CB_OPCODES.
    pub static ref OPCODES: [Instruction; 256] = [
        // 0x00
        op!("NOP", 1, 4, op_nop),
        op!("LD BC, d16", 3, 12, op_ld_rr_d16),
        op!("LD (BC), A", 1, 8, op_ld_rrp_a),
        op!("INC BC", 1, 8, op_inc_rr),
        op!("INC B", 1, 4, op_inc_r),
        op!("DEC B", 1, 4, op_dec_r),
        op!("LD B, d8", 2, 8, op_ld_r_d8),
        op!("RLCA", 1, 4, op_rlca),
        op!("LD (a16), SP", 3, 20, op_ld_a16_sp),
        op!("ADD HL, BC", 1, 8, op_add_hl_rr),
        op!("LD A, (BC)", 1, 8, op_ld_a_rrp),
        op!("DEC BC", 1, 8, op_dec_rr),
        op!("INC C", 1, 4, op_inc_r),
        op!("DEC C", 1, 4, op_dec_r),
        op!("LD C, d8", 2, 8, op_ld_r_d8),
        op!("RRCA", 1, 4, op_rrca),
        // 0x10
        op!("STOP", 2, 4, op_stop),
        op!("LD DE, d16", 3, 12, op_ld_rr_d16),
        op!("LD (DE), A", 1, 8, op_ld_rrp_a),
        op!("INC DE", 1, 8, op_inc_rr),
        op!("INC D", 1, 4, op_inc_r),
        op!("DEC D", 1, 4, op_dec_r),
        op!("LD D, d8", 2, 8, op_ld_r_d8),
        op!("RLA", 1, 4, op_rla),
        op!("JR r8", 2, 12, op_jr),
        op!("ADD HL, DE", 1, 8, op_add_hl_rr),
        op!("LD A, (DE)", 1, 8, op_ld_a_rrp),
        op!("DEC DE", 1, 8, op_dec_rr),
        op!("INC E", 1, 4, op_inc_r),
        op!("DEC E", 1, 4, op_dec_r),
        op!("LD E, d8", 2, 8, op_ld_r_d8),
        op!("RRA", 1, 4, op_rra),
        // 0x20
        op!("JR NZ, r8", 2, 8, op_jr_cc),
        op!("LD HL, d16", 3, 12, op_ld_rr_d16),
        op!("LD (HL+), A", 1, 8, op_ld_rrp_a),
        op!("INC HL", 1, 8, op_inc_rr),
        op!("INC H", 1, 4, op_inc_r),
        op!("DEC H", 1, 4, op_dec_r),
        op!("LD H, d8", 2, 8, op_ld_r_d8),
        op!("DAA", 1, 4, op_daa),
        op!("JR Z, r8", 2, 8, op_jr_cc),
        op!("ADD HL, HL", 1, 8, op_add_hl_rr),
        op!("LD A, (HL+)", 1, 8, op_ld_a_rrp),
        op!("DEC HL", 1, 8, op_dec_rr),
        op!("INC L", 1, 4, op_inc_r),
        op!("DEC L", 1, 4, op_dec_r),
        op!("LD L, d8", 2, 8, op_ld_r_d8),
        op!("CPL", 1, 4, op_cpl),
        // 0x30
        op!("JR NC, r8", 2, 8, op_jr_cc),
        op!("LD SP, d16", 3, 12, op_ld_rr_d16),
        op!("LD (HL-), A", 1, 8, op_ld_rrp_a),
        op!("INC SP", 1, 8, op_inc_rr),
        op!("INC (HL)", 1, 12, op_inc_r),
        op!("DEC (HL)", 1, 12, op_dec_r),
        op!("LD (HL), d8", 2, 12, op_ld_r_d8),
        op!("SCF", 1, 4, op_scf),
        op!("JR C, r8", 2, 8, op_jr_cc),
        op!("ADD HL, SP", 1, 8, op_add_hl_rr),
        op!("LD A, (HL-)", 1, 8, op_ld_a_rrp),
        op!("DEC SP", 1, 8, op_dec_rr),
        op!("INC A", 1, 4, op_inc_r),
        op!("DEC A", 1, 4, op_dec_r),
        op!("LD A, d8", 2, 8, op_ld_r_d8),
        op!("CCF", 1, 4, op_ccf),
        // 0x40: LD B, r
        op!("LD B, B", 1, 4, op_ld_r_r),
        op!("LD B, C", 1, 4, op_ld_r_r),
        op!("LD B, D", 1, 4, op_ld_r_r),
        op!("LD B, E", 1, 4, op_ld_r_r),
        op!("LD B, H", 1, 4, op_ld_r_r),
        op!("LD B, L", 1, 4, op_ld_r_r),
        op!("LD B, (HL)", 1, 8, op_ld_r_r),
        op!("LD B, A", 1, 4, op_ld_r_r),
        // 0x48: LD C, r
        op!("LD C, B", 1, 4, op_ld_r_r),
        op!("LD C, C", 1, 4, op_ld_r_r),
        op!("LD C, D", 1, 4, op_ld_r_r),
        op!("LD C, E", 1, 4, op_ld_r_r),
        op!("LD C, H", 1, 4, op_ld_r_r),
        op!("LD C, L", 1, 4, op_ld_r_r),
        op!("LD C, (HL)", 1, 8, op_ld_r_r),
        op!("LD C, A", 1, 4, op_ld_r_r),
        // 0x50: LD D, r
        op!("LD D, B", 1, 4, op_ld_r_r),
        op!("LD D, C", 1, 4, op_ld_r_r),
        op!("LD D, D", 1, 4, op_ld_r_r),
        op!("LD D, E", 1, 4, op_ld_r_r),
        op!("LD D, H", 1, 4, op_ld_r_r),
        op!("LD D, L", 1, 4, op_ld_r_r),
        op!("LD D, (HL)", 1, 8, op_ld_r_r),
        op!("LD D, A", 1, 4, op_ld_r_r),
        // 0x58: LD E, r
        op!("LD E, B", 1, 4, op_ld_r_r),
        op!("LD E, C", 1, 4, op_ld_r_r),
        op!("LD E, D", 1, 4, op_ld_r_r),
        op!("LD E, E", 1, 4, op_ld_r_r),
        op!("LD E, H", 1, 4, op_ld_r_r),
        op!("LD E, L", 1, 4, op_ld_r_r),
        op!("LD E, (HL)", 1, 8, op_ld_r_r),
        op!("LD E, A", 1, 4, op_ld_r_r),
        // 0x60: LD H, r
        op!("LD H, B", 1, 4, op_ld_r_r),
        op!("LD H, C", 1, 4, op_ld_r_r),
        op!("LD H, D", 1, 4, op_ld_r_r),
        op!("LD H, E", 1, 4, op_ld_r_r),
        op!("LD H, H", 1, 4, op_ld_r_r),
        op!("LD H, L", 1, 4, op_ld_r_r),
        op!("LD H, (HL)", 1, 8, op_ld_r_r),
        op!("LD H, A", 1, 4, op_ld_r_r),
        // 0x68: LD L, r
        op!("LD L, B", 1, 4, op_ld_r_r),
        op!("LD L, C", 1, 4, op_ld_r_r),
        op!("LD L, D", 1, 4, op_ld_r_r),
        op!("LD L, E", 1, 4, op_ld_r_r),
        op!("LD L, H", 1, 4, op_ld_r_r),
        op!("LD L, L", 1, 4, op_ld_r_r),
        op!("LD L, (HL)", 1, 8, op_ld_r_r),
        op!("LD L, A", 1, 4, op_ld_r_r),
        // 0x70: LD (HL), r / HALT
        op!("LD (HL), B", 1, 8, op_ld_r_r),
        op!("LD (HL), C", 1, 8, op_ld_r_r),
        op!("LD (HL), D", 1, 8, op_ld_r_r),
        op!("LD (HL), E", 1, 8, op_ld_r_r),
        op!("LD (HL), H", 1, 8, op_ld_r_r),
        op!("LD (HL), L", 1, 8, op_ld_r_r),
        op!("HALT", 1, 4, op_halt),
        op!("LD (HL), A", 1, 8, op_ld_r_r),
        // 0x78: LD A, r
        op!("LD A, B", 1, 4, op_ld_r_r),
        op!("LD A, C", 1, 4, op_ld_r_r),
        op!("LD A, D", 1, 4, op_ld_r_r),
        op!("LD A, E", 1, 4, op_ld_r_r),
        op!("LD A, H", 1, 4, op_ld_r_r),
        op!("LD A, L", 1, 4, op_ld_r_r),
        op!("LD A, (HL)", 1, 8, op_ld_r_r),
        op!("LD A, A", 1, 4, op_ld_r_r),
        // 0x80: ADD A, r
        op!("ADD A, B", 1, 4, op_alu_r),
        op!("ADD A, C", 1, 4, op_alu_r),
        op!("ADD A, D", 1, 4, op_alu_r),
        op!("ADD A, E", 1, 4, op_alu_r),
        op!("ADD A, H", 1, 4, op_alu_r),
        op!("ADD A, L", 1, 4, op_alu_r),
        op!("ADD A, (HL)", 1, 8, op_alu_r),
        op!("ADD A, A", 1, 4, op_alu_r),
        // 0x88: ADC A, r
        op!("ADC A, B", 1, 4, op_alu_r),
        op!("ADC A, C", 1, 4, op_alu_r),
        op!("ADC A, D", 1, 4, op_alu_r),
        op!("ADC A, E", 1, 4, op_alu_r),
        op!("ADC A, H", 1, 4, op_alu_r),
        op!("ADC A, L", 1, 4, op_alu_r),
        op!("ADC A, (HL)", 1, 8, op_alu_r),
        op!("ADC A, A", 1, 4, op_alu_r),
        // 0x90: SUB A, r
        op!("SUB A, B", 1, 4, op_alu_r),
        op!("SUB A, C", 1, 4, op_alu_r),
        op!("SUB A, D", 1, 4, op_alu_r),
        op!("SUB A, E", 1, 4, op_alu_r),
        op!("SUB A, H", 1, 4, op_alu_r),
        op!("SUB A, L", 1, 4, op_alu_r),
        op!("SUB A, (HL)", 1, 8, op_alu_r),
        op!("SUB A, A", 1, 4, op_alu_r),
        // 0x98: SBC A, r
        op!("SBC A, B", 1, 4, op_alu_r),
        op!("SBC A, C", 1, 4, op_alu_r),
        op!("SBC A, D", 1, 4, op_alu_r),
        op!("SBC A, E", 1, 4, op_alu_r),
        op!("SBC A, H", 1, 4, op_alu_r),
        op!("SBC A, L", 1, 4, op_alu_r),
        op!("SBC A, (HL)", 1, 8, op_alu_r),
        op!("SBC A, A", 1, 4, op_alu_r),
        // 0xA0: AND A, r
        op!("AND A, B", 1, 4, op_alu_r),
        op!("AND A, C", 1, 4, op_alu_r),
        op!("AND A, D", 1, 4, op_alu_r),
        op!("AND A, E", 1, 4, op_alu_r),
        op!("AND A, H", 1, 4, op_alu_r),
        op!("AND A, L", 1, 4, op_alu_r),
        op!("AND A, (HL)", 1, 8, op_alu_r),
        op!("AND A, A", 1, 4, op_alu_r),
        // 0xA8: XOR A, r
        op!("XOR A, B", 1, 4, op_alu_r),
        op!("XOR A, C", 1, 4, op_alu_r),
        op!("XOR A, D", 1, 4, op_alu_r),
        op!("XOR A, E", 1, 4, op_alu_r),
        op!("XOR A, H", 1, 4, op_alu_r),
        op!("XOR A, L", 1, 4, op_alu_r),
        op!("XOR A, (HL)", 1, 8, op_alu_r),
        op!("XOR A, A", 1, 4, op_alu_r),
        // 0xB0: OR A, r
        op!("OR A, B", 1, 4, op_alu_r),
        op!("OR A, C", 1, 4, op_alu_r),
        op!("OR A, D", 1, 4, op_alu_r),
        op!("OR A, E", 1, 4, op_alu_r),
        op!("OR A, H", 1, 4, op_alu_r),
        op!("OR A, L", 1, 4, op_alu_r),
        op!("OR A, (HL)", 1, 8, op_alu_r),
        op!("OR A, A", 1, 4, op_alu_r),
        // 0xB8: CP A, r
        op!("CP A, B", 1, 4, op_alu_r),
        op!("CP A, C", 1, 4, op_alu_r),
        op!("CP A, D", 1, 4, op_alu_r),
        op!("CP A, E", 1, 4, op_alu_r),
        op!("CP A, H", 1, 4, op_alu_r),
        op!("CP A, L", 1, 4, op_alu_r),
        op!("CP A, (HL)", 1, 8, op_alu_r),
        op!("CP A, A", 1, 4, op_alu_r),
        // 0xC0
        op!("RET NZ", 1, 8, op_ret_cc),
        op!("POP BC", 1, 12, op_pop_rr),
        op!("JP NZ, a16", 3, 12, op_jp_cc),
        op!("JP a16", 3, 16, op_jp_a16),
        op!("CALL NZ, a16", 3, 12, op_call_cc),
        op!("PUSH BC", 1, 16, op_push_rr),
        op!("ADD A, d8", 2, 8, op_alu_d8),
        op!("RST 00H", 1, 16, op_rst),
        op!("RET Z", 1, 8, op_ret_cc),
        op!("RET", 1, 16, op_ret),
        op!("JP Z, a16", 3, 12, op_jp_cc),
        op!("PREFIX CB", 1, 4, op_nop), // dispatched through CB_OPCODES
        op!("CALL Z, a16", 3, 12, op_call_cc),
        op!("CALL a16", 3, 24, op_call_a16),
        op!("ADC A, d8", 2, 8, op_alu_d8),
        op!("RST 08H", 1, 16, op_rst),
        // 0xD0
        op!("RET NC", 1, 8, op_ret_cc),
        op!("POP DE", 1, 12, op_pop_rr),
        op!("JP NC, a16", 3, 12, op_jp_cc),
        invalid!(),
        op!("CALL NC, a16", 3, 12, op_call_cc),
        op!("PUSH DE", 1, 16, op_push_rr),
        op!("SUB A, d8", 2, 8, op_alu_d8),
        op!("RST 10H", 1, 16, op_rst),
        op!("RET C", 1, 8, op_ret_cc),
        op!("RETI", 1, 16, op_reti),
        op!("JP C, a16", 3, 12, op_jp_cc),
        invalid!(),
        op!("CALL C, a16", 3, 12, op_call_cc),
        invalid!(),
        op!("SBC A, d8", 2, 8, op_alu_d8),
        op!("RST 18H", 1, 16, op_rst),
        // 0xE0
        op!("LDH (a8), A", 2, 12, op_ldh_a8_a),
        op!("POP HL", 1, 12, op_pop_rr),
        op!("LD (C), A", 1, 8, op_ldh_c_a),
        invalid!(),
        invalid!(),
        op!("PUSH HL", 1, 16, op_push_rr),
        op!("AND A, d8", 2, 8, op_alu_d8),
        op!("RST 20H", 1, 16, op_rst),
        op!("ADD SP, r8", 2, 16, op_add_sp_r8),
        op!("JP HL", 1, 4, op_jp_hl),
        op!("LD (a16), A", 3, 16, op_ld_a16_a),
        invalid!(),
        invalid!(),
        invalid!(),
        op!("XOR A, d8", 2, 8, op_alu_d8),
        op!("RST 28H", 1, 16, op_rst),
        // 0xF0
        op!("LDH A, (a8)", 2, 12, op_ldh_a_a8),
        op!("POP AF", 1, 12, op_pop_rr),
        op!("LD A, (C)", 1, 8, op_ldh_a_c),
        op!("DI", 1, 4, op_di),
        invalid!(),
        op!("PUSH AF", 1, 16, op_push_rr),
        op!("OR A, d8", 2, 8, op_alu_d8),
        op!("RST 30H", 1, 16, op_rst),
        op!("LD HL, SP+r8", 2, 12, op_ld_hl_sp_r8),
        op!("LD SP, HL", 1, 8, op_ld_sp_hl),
        op!("LD A, (a16)", 3, 16, op_ld_a_a16),
        op!("EI", 1, 4, op_ei),
        invalid!(),
        invalid!(),
        op!("CP A, d8", 2, 8, op_alu_d8),
        op!("RST 38H", 1, 16, op_rst),
    ];

    /// CB-prefixed table (0x00-0xFF). The map is perfectly regular, so it
    /// is generated: bits 6-7 select the group, bits 3-5 the rotate/shift
    /// family or bit number, bits 0-2 the target register. Cycle counts
    /// include the prefix fetch.
    pub static ref CB_OPCODES: [Instruction; 256] = std::array::from_fn(|i| {
        let opcode = i as u8;
        let (mnemonic, execute): (&'static str, OpFn) = match opcode >> 6 {
            0 => match (opcode >> 3) & 7 {
                0 => ("RLC r", Cpu::cb_rlc as OpFn),
                1 => ("RRC r", Cpu::cb_rrc),
                2 => ("RL r", Cpu::cb_rl),
                3 => ("RR r", Cpu::cb_rr),
                4 => ("SLA r", Cpu::cb_sla),
                5 => ("SRA r", Cpu::cb_sra),
                6 => ("SWAP r", Cpu::cb_swap),
                _ => ("SRL r", Cpu::cb_srl),
            },
            1 => ("BIT b, r", Cpu::cb_bit),
            2 => ("RES b, r", Cpu::cb_res),
            _ => ("SET b, r", Cpu::cb_set),
        };
        let cycles = if opcode & 7 == 6 {
            // (HL) operand: BIT only reads, the rest read-modify-write.
            if opcode >> 6 == 1 { 12 } else { 16 }
        } else {
            8
        };
        Instruction::new(mnemonic, 2, cycles, execute)
    });
}
