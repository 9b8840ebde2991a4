#![allow(dead_code)] // Constants for definition completeness

// --- Screen Dimensions ---
pub const GB_WIDTH: usize = 160;
pub const GB_HEIGHT: usize = 144;
pub const FRAME_BUFFER_SIZE: usize = GB_WIDTH * GB_HEIGHT * 3; // RGB

// --- PPU Timing Constants (in T-cycles) ---
pub const MODE2_OAM_SCAN_DOTS: u32 = 80;
pub const MODE3_DRAWING_DOTS: u32 = 172;
pub const MODE0_HBLANK_DOTS: u32 = 204;
pub const DOTS_PER_SCANLINE: u32 = 456;
pub const SCANLINES_PER_FRAME: u8 = 154; // 144 visible + 10 VBlank

// --- PPU Modes (STAT register bits 0-1) ---
pub const HBLANK_MODE: u8 = 0;
pub const VBLANK_MODE: u8 = 1;
pub const OAM_SCAN_MODE: u8 = 2;
pub const DRAWING_MODE: u8 = 3;

// --- LCDC Flags (bit positions in 0xFF40) ---
pub const LCDC_BG_WIN_ENABLE: u8 = 0; // BG/Window display enable
pub const LCDC_OBJ_ENABLE: u8 = 1; // Sprite display enable
pub const LCDC_OBJ_SIZE: u8 = 2; // Sprite size (0=8x8, 1=8x16)
pub const LCDC_BG_MAP_AREA: u8 = 3; // BG tile map (0=9800, 1=9C00)
pub const LCDC_TILE_DATA_AREA: u8 = 4; // Tile data (0=8800 signed, 1=8000)
pub const LCDC_WINDOW_ENABLE: u8 = 5; // Window display enable
pub const LCDC_WINDOW_MAP_AREA: u8 = 6; // Window tile map (0=9800, 1=9C00)
pub const LCDC_LCD_ENABLE: u8 = 7; // LCD master enable

// --- STAT Flags (bit positions in 0xFF41) ---
pub const STAT_LYC_EQ_LY_FLAG: u8 = 2; // Coincidence flag (read only)
pub const STAT_MODE_0_HBLANK_IE: u8 = 3;
pub const STAT_MODE_1_VBLANK_IE: u8 = 4;
pub const STAT_MODE_2_OAM_IE: u8 = 5;
pub const STAT_LYC_EQ_LY_IE: u8 = 6;

// --- OAM Attribute Flags (bit positions in OAM byte 3) ---
pub const OAM_PALETTE_NUM: u8 = 4; // 0=OBP0, 1=OBP1
pub const OAM_X_FLIP: u8 = 5;
pub const OAM_Y_FLIP: u8 = 6;
pub const OAM_BG_PRIORITY: u8 = 7; // BG colors 1-3 draw over the sprite

/// DMG shades 0..3 as RGB, replaceable through `Ppu::set_palette`.
pub const DMG_PALETTE: [[u8; 3]; 4] = [
    [232, 248, 208],
    [136, 192, 112],
    [52, 104, 86],
    [8, 24, 32],
];
