mod common;

use common::{blank_rom, rom_with};
use mochi::{Ppu, System};

#[test]
fn boot_pattern_fills_screen_with_darkest_shade() {
    // Programs LCDC=0x91 and BGP=0xE4, fills tile 1 with 0xFF, points the
    // whole background map at tile 1, then halts.
    let program: &[u8] = &[
        0x3E, 0x91, // LD A, 0x91
        0xE0, 0x40, // LDH (LCDC), A
        0x3E, 0xE4, // LD A, 0xE4
        0xE0, 0x47, // LDH (BGP), A
        0x21, 0x10, 0x80, // LD HL, 0x8010 (tile 1)
        0x3E, 0xFF, // LD A, 0xFF
        0x06, 0x10, // LD B, 16
        0x22, // LD (HL+), A
        0x05, // DEC B
        0x20, 0xFC, // JR NZ, -4
        0x21, 0x00, 0x98, // LD HL, 0x9800
        0x3E, 0x01, // LD A, 1
        0x06, 0x04, // LD B, 4
        0x0E, 0x00, // LD C, 0
        0x22, // LD (HL+), A
        0x0D, // DEC C
        0x20, 0xFC, // JR NZ, -4
        0x05, // DEC B
        0x20, 0xF7, // JR NZ, -9
        0x76, // HALT
        0x18, 0xFD, // JR -3
    ];
    let mut system = System::load(&rom_with(program));
    for _ in 0..3 {
        system.run_frame();
    }
    assert!(system.frame_ready());
    for pixel in system.frame_buffer().chunks_exact(3) {
        assert_eq!(pixel, [8, 24, 32]);
    }
}

#[test]
fn an_eleventh_overlapping_sprite_never_writes_pixels() {
    let mut system = System::load(&blank_rom());
    let bus = &mut system.bus;

    bus.write_byte(0xFF40, 0x93); // LCD on, BG on, OBJ on, 8x8
    bus.write_byte(0xFF47, 0xE4); // BGP
    bus.write_byte(0xFF48, 0xE4); // OBP0

    // Tile 1: solid color index 3.
    for i in 0..16 {
        bus.write_byte(0x8010 + i, 0xFF);
    }
    // Eleven sprites covering line 0, at screen X = 0, 8, ..., 80.
    for i in 0..11u16 {
        bus.write_byte(0xFE00 + i * 4, 16); // Y
        bus.write_byte(0xFE00 + i * 4 + 1, (8 + 8 * i) as u8); // X
        bus.write_byte(0xFE00 + i * 4 + 2, 1); // tile
        bus.write_byte(0xFE00 + i * 4 + 3, 0); // attributes
    }

    // One line: OAM scan, then drawing commits the pixels.
    bus.ppu.step(80);
    bus.ppu.step(172);

    let frame = system.frame_buffer();
    // Sprites 0-9 are drawn...
    assert_eq!(&frame[0..3], [8, 24, 32]);
    assert_eq!(&frame[79 * 3..79 * 3 + 3], [8, 24, 32]);
    // ...the eleventh is not: background shade 0 shows through.
    assert_eq!(&frame[80 * 3..80 * 3 + 3], [232, 248, 208]);
}

#[test]
fn window_pixels_come_from_the_window_map() {
    let mut system = System::load(&blank_rom());
    let bus = &mut system.bus;

    // LCD+BG on, window on, window map at 0x9C00.
    bus.write_byte(0xFF40, 0x91 | 0x20 | 0x40);
    bus.write_byte(0xFF47, 0xE4);
    bus.write_byte(0xFF4A, 0); // WY
    bus.write_byte(0xFF4B, 7); // WX: window starts at screen X 0

    for i in 0..16 {
        bus.write_byte(0x8010 + i, 0xFF); // tile 1, index 3
    }
    for i in 0..20 {
        bus.write_byte(0x9C00 + i, 1); // window map row 0
    }

    bus.ppu.step(80);
    bus.ppu.step(172);

    let frame = system.frame_buffer();
    assert_eq!(&frame[0..3], [8, 24, 32]);
    assert_eq!(&frame[159 * 3..159 * 3 + 3], [8, 24, 32]);
}

#[test]
fn sprite_priority_flag_defers_to_nonzero_background() {
    let mut system = System::load(&blank_rom());
    let bus = &mut system.bus;

    bus.write_byte(0xFF40, 0x93);
    bus.write_byte(0xFF47, 0xE4);
    bus.write_byte(0xFF48, 0x1B); // OBP0 distinct from BGP

    // Background tile 0 gets color index 1 everywhere (lo plane set).
    for i in 0..8u16 {
        bus.write_byte(0x8000 + i * 2, 0xFF);
    }
    // Sprite behind the background (priority attribute set).
    bus.write_byte(0xFE00, 16);
    bus.write_byte(0xFE01, 8);
    bus.write_byte(0xFE02, 1);
    bus.write_byte(0xFE03, 0x80);
    for i in 0..16 {
        bus.write_byte(0x8010 + i, 0xFF); // sprite tile, index 3
    }

    bus.ppu.step(80);
    bus.ppu.step(172);

    // BG index 1 wins over the deprioritized sprite: shade (0xE4>>2)&3 = 1.
    let frame = system.frame_buffer();
    assert_eq!(&frame[0..3], [136, 192, 112]);
}

#[test]
fn palette_setter_recolors_the_framebuffer() {
    let mut system = System::load(&blank_rom());
    system.set_palette([[1, 2, 3], [4, 5, 6], [7, 8, 9], [10, 11, 12]]);

    let bus = &mut system.bus;
    bus.write_byte(0xFF47, 0xE4); // BGP: index 3 -> shade 3
    for i in 0..16 {
        bus.write_byte(0x8000 + i, 0xFF); // tile 0: solid index 3
    }
    bus.ppu.step(80);
    bus.ppu.step(172);

    assert_eq!(&system.frame_buffer()[0..3], [10, 11, 12]);
}

#[test]
fn mode_machine_runs_a_closed_cycle() {
    let mut ppu = Ppu::new();
    let mut last_mode = ppu.mode();
    let mut mode3_entries = 0;
    let mut vblank_entries = 0;

    for _ in 0..(70_224 * 2 / 4) {
        ppu.step(4);
        let mode = ppu.mode();
        if mode != last_mode {
            match (last_mode, mode) {
                (2, 3) => mode3_entries += 1,
                (3, 0) | (0, 2) | (1, 2) => {}
                (0, 1) => vblank_entries += 1,
                other => panic!("illegal mode transition {:?}", other),
            }
            last_mode = mode;
        }
    }
    assert_eq!(vblank_entries, 2);
    assert_eq!(mode3_entries, 2 * 144);
}

#[test]
fn lcdc_disable_is_observable_from_the_bus() {
    let mut system = System::load(&rom_with(&[0x18, 0xFE])); // JR -2
    system.run_frame();
    system.clear_frame_ready();

    system.bus.write_byte(0xFF40, 0x11); // bit 7 clear
    assert_eq!(system.bus.read_byte(0xFF44), 0);
    assert!(system.frame_ready());
    assert!(system.frame_buffer().iter().all(|&b| b == 0));
}
