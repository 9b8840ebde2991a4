// Flag positions (bit index in F register)
pub const FLAG_Z_POS: u8 = 7; // Zero
pub const FLAG_N_POS: u8 = 6; // Subtract
pub const FLAG_H_POS: u8 = 5; // Half carry
pub const FLAG_C_POS: u8 = 4; // Carry

// Flag masks for the F register
pub const FLAG_Z: u8 = 1 << FLAG_Z_POS;
pub const FLAG_N: u8 = 1 << FLAG_N_POS;
pub const FLAG_H: u8 = 1 << FLAG_H_POS;
pub const FLAG_C: u8 = 1 << FLAG_C_POS;

// Interrupt vectors, indexed by IF/IE bit number (VBlank first).
pub const INTERRUPT_VECTORS: [u16; 5] = [0x0040, 0x0048, 0x0050, 0x0058, 0x0060];

// T-cycles charged for an interrupt dispatch.
pub const INTERRUPT_DISPATCH_CYCLES: u32 = 20;
