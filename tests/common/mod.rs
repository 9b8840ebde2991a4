#![allow(dead_code)]

/// Routes core diagnostics to the test output; enable with RUST_LOG.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A blank 32 KiB MBC0 image.
pub fn blank_rom() -> Vec<u8> {
    vec![0u8; 0x8000]
}

/// A 32 KiB image with `code` placed at the entry point 0x0100.
pub fn rom_with(code: &[u8]) -> Vec<u8> {
    let mut rom = blank_rom();
    rom[0x0100..0x0100 + code.len()].copy_from_slice(code);
    rom
}

/// An MBC1 image of `banks` 16 KiB banks; the first byte of every bank is
/// tagged with the bank index.
pub fn mbc1_rom(banks: usize) -> Vec<u8> {
    let mut rom = vec![0u8; banks * 0x4000];
    rom[0x0147] = 0x01; // MBC1
    rom[0x0148] = (banks / 2).trailing_zeros() as u8;
    for bank in 0..banks {
        rom[bank * 0x4000] = bank as u8;
    }
    rom
}
