use super::Ppu;
use super::constants::*;

// Relevant slice of an OAM entry for one scanline.
struct SpriteInfo {
    x: i32,
    y: i32,
    tile: u8,
    attributes: u8,
}

impl Ppu {
    /// Renders the current scanline into the framebuffer. Called once per
    /// visible line, on the mode-3 exit edge.
    pub(super) fn render_scanline(&mut self) {
        let ly = self.ly;
        if ly >= GB_HEIGHT as u8 {
            return;
        }
        let line_base = ly as usize * GB_WIDTH * 3;

        // Per-pixel background color *index* (not shade); the sprite pass
        // needs it for the BG-over-OBJ priority rule.
        let mut bg_index = [0u8; GB_WIDTH];

        if self.lcdc & (1 << LCDC_BG_WIN_ENABLE) != 0 {
            let window_on_line =
                self.lcdc & (1 << LCDC_WINDOW_ENABLE) != 0 && ly >= self.wy;
            let window_x_start = self.wx.saturating_sub(7);
            let mut window_used = false;

            for x in 0..GB_WIDTH as u8 {
                let use_window = window_on_line && x >= window_x_start;

                let (tile_id, row, col) = if use_window {
                    window_used = true;
                    let wx = x - window_x_start;
                    let wy = self.window_line;
                    let map = if self.lcdc & (1 << LCDC_WINDOW_MAP_AREA) != 0 {
                        0x1C00
                    } else {
                        0x1800
                    };
                    let id = self.vram[map + (wy as usize >> 3) * 32 + (wx as usize >> 3)];
                    (id, wy & 7, wx & 7)
                } else {
                    let sx = self.scx.wrapping_add(x);
                    let sy = self.scy.wrapping_add(ly);
                    let map = if self.lcdc & (1 << LCDC_BG_MAP_AREA) != 0 {
                        0x1C00
                    } else {
                        0x1800
                    };
                    let id = self.vram[map + (sy as usize >> 3) * 32 + (sx as usize >> 3)];
                    (id, sy & 7, sx & 7)
                };

                let tile_base = if self.lcdc & (1 << LCDC_TILE_DATA_AREA) != 0 {
                    tile_id as usize * 16
                } else {
                    // $8800 mode: tile id is signed around $9000.
                    (0x1000i32 + tile_id as i8 as i32 * 16) as usize
                };
                let row_addr = tile_base + row as usize * 2;
                if row_addr + 1 >= self.vram.len() {
                    continue;
                }

                let lo = self.vram[row_addr];
                let hi = self.vram[row_addr + 1];
                let bit = 7 - col;
                let color = ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1);

                bg_index[x as usize] = color;
                let rgb = self.palette[((self.bgp >> (color * 2)) & 0x03) as usize];
                let offset = line_base + x as usize * 3;
                self.frame_buffer[offset..offset + 3].copy_from_slice(&rgb);
            }

            if window_used {
                self.window_line = self.window_line.wrapping_add(1);
            }
        }

        if self.lcdc & (1 << LCDC_OBJ_ENABLE) != 0 {
            self.render_sprites(line_base, &bg_index);
        }
    }

    fn render_sprites(&mut self, line_base: usize, bg_index: &[u8; GB_WIDTH]) {
        let ly = self.ly as i32;
        let height = if self.lcdc & (1 << LCDC_OBJ_SIZE) != 0 {
            16
        } else {
            8
        };

        // OAM scan: the first 10 sprites covering this line, in OAM order.
        let mut sprites: Vec<SpriteInfo> = Vec::with_capacity(10);
        for i in 0..40 {
            let entry = &self.oam[i * 4..i * 4 + 4];
            let y = entry[0] as i32 - 16;
            if ly >= y && ly < y + height {
                sprites.push(SpriteInfo {
                    x: entry[1] as i32 - 8,
                    y,
                    tile: entry[2],
                    attributes: entry[3],
                });
                if sprites.len() == 10 {
                    break;
                }
            }
        }

        // Reverse draw order: the lowest OAM index lands on top.
        for sprite in sprites.iter().rev() {
            let palette_reg = if sprite.attributes & (1 << OAM_PALETTE_NUM) != 0 {
                self.obp1
            } else {
                self.obp0
            };
            let x_flip = sprite.attributes & (1 << OAM_X_FLIP) != 0;
            let y_flip = sprite.attributes & (1 << OAM_Y_FLIP) != 0;
            let behind_bg = sprite.attributes & (1 << OAM_BG_PRIORITY) != 0;

            let mut row = ly - sprite.y;
            if y_flip {
                row = (height - 1) - row;
            }
            let tile = if height == 16 {
                sprite.tile & 0xFE
            } else {
                sprite.tile
            };

            // Sprites always use the $8000 tile data area.
            let row_addr = tile as usize * 16 + row as usize * 2;
            if row_addr + 1 >= self.vram.len() {
                continue;
            }
            let lo = self.vram[row_addr];
            let hi = self.vram[row_addr + 1];

            for px in 0..8 {
                let sx = sprite.x + px;
                if !(0..GB_WIDTH as i32).contains(&sx) {
                    continue;
                }
                let bit = if x_flip { px } else { 7 - px };
                let color = ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1);
                if color == 0 {
                    continue; // index 0 is transparent
                }
                if behind_bg && bg_index[sx as usize] != 0 {
                    continue;
                }
                let rgb = self.palette[((palette_reg >> (color * 2)) & 0x03) as usize];
                let offset = line_base + sx as usize * 3;
                self.frame_buffer[offset..offset + 3].copy_from_slice(&rgb);
            }
        }
    }
}
