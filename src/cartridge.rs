use crate::memory_map::*;

/// Memory bank controller wired to the cartridge, decoded from the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbcKind {
    /// No banking hardware (or an unsupported controller, treated as
    /// read-only ROM so unknown cartridges stay live).
    None,
    Mbc1,
    Mbc3,
}

impl MbcKind {
    /// Decodes the cartridge type byte at $0147.
    pub fn from_header(type_code: u8) -> Self {
        match type_code {
            0x00 | 0x08 | 0x09 => MbcKind::None,
            0x01..=0x03 => MbcKind::Mbc1,
            0x0F..=0x13 => MbcKind::Mbc3,
            _ => {
                log::warn!(
                    "Unsupported cartridge type {:#04X}; treating as read-only ROM",
                    type_code
                );
                MbcKind::None
            }
        }
    }
}

/// Owns the ROM image and battery RAM and routes the $0000-$7FFF and
/// $A000-$BFFF windows through the bank registers.
#[derive(Clone)]
pub struct Cartridge {
    rom: Vec<u8>,
    ram: Vec<u8>,
    pub mbc: MbcKind,
    rom_bank: usize,
    ram_bank: usize,
    ram_enabled: bool,
    mode: u8, // MBC1 banking mode (bit 0)
    num_rom_banks: usize,
    ram_size: usize,
    pub title: String,
}

impl Cartridge {
    pub fn new(rom: &[u8]) -> Self {
        let header = |index: usize| rom.get(index).copied().unwrap_or(0);

        let mbc = MbcKind::from_header(header(HEADER_CART_TYPE));
        // Size codes past 9 are not defined for DMG cartridges.
        let num_rom_banks = 2usize.max(2 << header(HEADER_ROM_SIZE).min(9));
        let ram_size = match header(HEADER_RAM_SIZE) {
            0x01 => 2 * 1024,
            0x02 => 8 * 1024,
            0x03 => 32 * 1024,
            0x04 => 128 * 1024,
            0x05 => 64 * 1024,
            _ => 0,
        };

        let title: String = rom
            .get(HEADER_TITLE_START..HEADER_TITLE_END.min(rom.len()))
            .unwrap_or(&[])
            .iter()
            .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '?' })
            .collect::<String>()
            .trim_matches(['\0', ' ', '?'])
            .to_string();

        log::info!(
            "Loaded ROM \"{}\": {:?}, {} ROM banks, {} bytes external RAM",
            title,
            mbc,
            num_rom_banks,
            ram_size
        );

        Cartridge {
            rom: rom.to_vec(),
            ram: vec![0; ram_size],
            mbc,
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
            mode: 0,
            num_rom_banks,
            ram_size,
            title,
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            ROM_BANK_0_START..=ROM_BANK_0_END => {
                self.rom.get(addr as usize).copied().unwrap_or(0xFF)
            }
            ROM_BANK_N_START..=ROM_BANK_N_END => {
                let bank = self.rom_bank & (self.num_rom_banks - 1);
                let offset = bank * ROM_BANK_SIZE + (addr - ROM_BANK_N_START) as usize;
                self.rom.get(offset).copied().unwrap_or(0xFF)
            }
            EXT_RAM_START..=EXT_RAM_END => {
                if !self.ram_enabled || self.ram_size == 0 {
                    return 0xFF;
                }
                let offset = self.ram_bank * EXT_RAM_BANK_SIZE + (addr - EXT_RAM_START) as usize;
                self.ram.get(offset).copied().unwrap_or(0xFF)
            }
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if self.mbc == MbcKind::None {
            return;
        }
        match addr {
            0x0000..=0x1FFF => {
                self.ram_enabled = (value & 0x0F) == 0x0A;
            }
            0x2000..=0x3FFF => {
                // Bank 0 is rewritten to 1; games rely on this when reading
                // their own header through the switchable window.
                match self.mbc {
                    MbcKind::Mbc1 => {
                        let low = match value & 0x1F {
                            0 => 1,
                            n => n,
                        };
                        self.rom_bank = (self.rom_bank & 0x60) | low as usize;
                    }
                    MbcKind::Mbc3 => {
                        self.rom_bank = match value & 0x7F {
                            0 => 1,
                            n => n as usize,
                        };
                    }
                    MbcKind::None => {}
                }
            }
            0x4000..=0x5FFF => {
                if self.mbc == MbcKind::Mbc1 {
                    if self.mode == 0 {
                        self.rom_bank = (self.rom_bank & 0x1F) | (((value & 0x03) as usize) << 5);
                    } else {
                        self.ram_bank = (value & 0x03) as usize;
                    }
                }
            }
            0x6000..=0x7FFF => {
                if self.mbc == MbcKind::Mbc1 {
                    self.mode = value & 0x01;
                }
            }
            EXT_RAM_START..=EXT_RAM_END => {
                if !self.ram_enabled || self.ram_size == 0 {
                    return;
                }
                let offset = self.ram_bank * EXT_RAM_BANK_SIZE + (addr - EXT_RAM_START) as usize;
                if let Some(byte) = self.ram.get_mut(offset) {
                    *byte = value;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mbc1_rom(banks: usize) -> Vec<u8> {
        let mut rom = vec![0u8; banks * ROM_BANK_SIZE];
        rom[HEADER_CART_TYPE] = 0x01;
        rom[HEADER_ROM_SIZE] = (banks / 2).trailing_zeros() as u8;
        // Tag the first byte of every bank with its index.
        for bank in 0..banks {
            rom[bank * ROM_BANK_SIZE] = bank as u8;
        }
        rom
    }

    #[test]
    fn truncated_header_defaults_to_plain_rom() {
        let cart = Cartridge::new(&[0x00, 0x01, 0x02]);
        assert_eq!(cart.mbc, MbcKind::None);
        assert_eq!(cart.num_rom_banks, 2);
        assert_eq!(cart.ram_size, 0);
        assert_eq!(cart.read(0x0001), 0x01);
        assert_eq!(cart.read(0x4000), 0xFF);
    }

    #[test]
    fn title_is_read_from_header() {
        let mut rom = vec![0u8; 0x8000];
        rom[HEADER_TITLE_START..HEADER_TITLE_START + 5].copy_from_slice(b"TETRA");
        let cart = Cartridge::new(&rom);
        assert_eq!(cart.title, "TETRA");
    }

    #[test]
    fn mbc1_bank_switch_and_bank_zero_rewrite() {
        let mut cart = Cartridge::new(&mbc1_rom(8)); // 128 KiB
        cart.write(0x2000, 0x02);
        assert_eq!(cart.read(0x4000), 2); // ROM[0x8000]
        cart.write(0x2000, 0x00);
        assert_eq!(cart.read(0x4000), 1); // bank 0 selects bank 1
    }

    #[test]
    fn mbc1_upper_bits_extend_the_rom_bank_in_mode_0() {
        let mut cart = Cartridge::new(&mbc1_rom(128));
        cart.write(0x2000, 0x01);
        cart.write(0x4000, 0x01); // bits 5-6
        assert_eq!(cart.read(0x4000), 0x21);
    }

    #[test]
    fn oversized_bank_index_is_masked() {
        let mut cart = Cartridge::new(&mbc1_rom(4)); // 64 KiB
        cart.write(0x2000, 0x1F);
        assert_eq!(cart.read(0x4000), 0x1F & 3);
    }

    #[test]
    fn external_ram_requires_enable() {
        let mut rom = mbc1_rom(4);
        rom[HEADER_CART_TYPE] = 0x03; // MBC1+RAM+BATTERY
        rom[HEADER_RAM_SIZE] = 0x02; // 8 KiB
        let mut cart = Cartridge::new(&rom);

        cart.write(0xA000, 0x55);
        assert_eq!(cart.read(0xA000), 0xFF);

        cart.write(0x0000, 0x0A);
        cart.write(0xA000, 0x55);
        assert_eq!(cart.read(0xA000), 0x55);

        cart.write(0x0000, 0x00);
        assert_eq!(cart.read(0xA000), 0xFF);
    }

    #[test]
    fn unsupported_mbc_is_read_only() {
        let mut rom = vec![0u8; 0x8000];
        rom[HEADER_CART_TYPE] = 0x1B; // MBC5 family, unsupported
        rom[0x4000] = 0x7E;
        let mut cart = Cartridge::new(&rom);
        cart.write(0x2000, 0x02);
        assert_eq!(cart.read(0x4000), 0x7E); // still bank 1
    }
}
