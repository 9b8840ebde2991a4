use crate::cartridge::Cartridge;
use crate::joypad::Joypad;
use crate::memory_map::*;
use crate::ppu::Ppu;
use crate::timer::Timer;
use std::fmt;

/// Central address decoder: routes every 8-bit load/store to the owning
/// device and keeps the plain storage (WRAM, HRAM, IE/IF, serial stub).
#[derive(Clone)]
pub struct MemoryBus {
    pub cartridge: Cartridge,
    pub ppu: Ppu,
    pub timer: Timer,
    pub joypad: Joypad,

    wram: Box<[u8; WRAM_SIZE]>,
    hram: Box<[u8; HRAM_SIZE]>,
    pub interrupt_enable: u8,
    pub interrupt_flag: u8,

    // Serial stub: the two bytes are plain storage, no transfer happens.
    serial_data: u8,
    serial_control: u8,
}

impl MemoryBus {
    pub fn new(cartridge: Cartridge) -> Self {
        MemoryBus {
            cartridge,
            ppu: Ppu::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            wram: Box::new([0; WRAM_SIZE]),
            hram: Box::new([0; HRAM_SIZE]),
            interrupt_enable: 0,
            interrupt_flag: 0xE1, // post-boot value
            serial_data: 0,
            serial_control: 0,
        }
    }

    /// Sets bits in IF; `mask` uses the INT_* constants.
    pub fn request_interrupt(&mut self, mask: u8) {
        self.interrupt_flag |= mask & INT_MASK;
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            ROM_BANK_0_START..=ROM_BANK_N_END => self.cartridge.read(addr),
            VRAM_START..=VRAM_END => self.ppu.read(addr),
            EXT_RAM_START..=EXT_RAM_END => self.cartridge.read(addr),
            WRAM_START..=WRAM_END => self.wram[(addr - WRAM_START) as usize],
            // Echo RAM mirrors $C000-$DDFF.
            ECHO_RAM_START..=ECHO_RAM_END => self.wram[(addr - ECHO_RAM_START) as usize],
            OAM_START..=OAM_END => self.ppu.read(addr),
            NOT_USABLE_START..=NOT_USABLE_END => 0xFF,
            P1_JOYP_ADDR => self.joypad.read(),
            SB_ADDR => self.serial_data,
            SC_ADDR => self.serial_control,
            DIV_ADDR..=TAC_ADDR => self.timer.read(addr),
            IF_ADDR => self.interrupt_flag | 0xE0, // upper bits read as 1
            APU_STUB_START..=APU_STUB_END => 0xFF,
            LCDC_ADDR..=WX_ADDR => self.ppu.read(addr),
            HRAM_START..=HRAM_END => self.hram[(addr - HRAM_START) as usize],
            INTERRUPT_ENABLE_REGISTER => self.interrupt_enable,
            _ => 0xFF,
        }
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            ROM_BANK_0_START..=ROM_BANK_N_END => self.cartridge.write(addr, value),
            VRAM_START..=VRAM_END => self.ppu.write(addr, value),
            EXT_RAM_START..=EXT_RAM_END => self.cartridge.write(addr, value),
            WRAM_START..=WRAM_END => self.wram[(addr - WRAM_START) as usize] = value,
            ECHO_RAM_START..=ECHO_RAM_END => {
                self.wram[(addr - ECHO_RAM_START) as usize] = value
            }
            OAM_START..=OAM_END => self.ppu.write(addr, value),
            NOT_USABLE_START..=NOT_USABLE_END => {}
            P1_JOYP_ADDR => self.joypad.write(value),
            SB_ADDR => self.serial_data = value,
            SC_ADDR => self.serial_control = value,
            DIV_ADDR..=TAC_ADDR => self.timer.write(addr, value),
            IF_ADDR => self.interrupt_flag = value & INT_MASK,
            APU_STUB_START..=APU_STUB_END => {}
            DMA_ADDR => self.oam_dma(value),
            LCDC_ADDR..=WX_ADDR => self.ppu.write(addr, value),
            HRAM_START..=HRAM_END => self.hram[(addr - HRAM_START) as usize] = value,
            INTERRUPT_ENABLE_REGISTER => self.interrupt_enable = value,
            _ => {}
        }
    }

    /// Reads a 16-bit word, little-endian.
    pub fn read_word(&self, addr: u16) -> u16 {
        let low = self.read_byte(addr) as u16;
        let high = self.read_byte(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    /// Writes a 16-bit word, little-endian.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, (value & 0xFF) as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }

    // OAM DMA: copies 160 bytes from `source << 8` into OAM through the
    // normal read path.
    fn oam_dma(&mut self, source: u8) {
        let base = (source as u16) << 8;
        for i in 0..OAM_SIZE as u16 {
            let byte = self.read_byte(base.wrapping_add(i));
            self.ppu.write(OAM_START + i, byte);
        }
    }
}

impl fmt::Debug for MemoryBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBus")
            .field("IE", &format_args!("{:#04X}", self.interrupt_enable))
            .field("IF", &format_args!("{:#04X}", self.interrupt_flag))
            .field("joypad", &self.joypad)
            .finish_non_exhaustive()
    }
}
