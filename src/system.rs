use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::joypad::JoypadState;
use crate::memory_bus::MemoryBus;
use crate::memory_map::{INT_STAT, INT_TIMER, INT_VBLANK};

/// T-cycles in one frame at ~59.7 Hz.
pub const CYCLES_PER_FRAME: u32 = 70_224;

/// The composed machine: one CPU driving one bus full of devices.
///
/// The shell's whole contract lives here: `load`, `run_frame`, the joypad
/// booleans, the framebuffer with its `frame_ready` flag, and the palette.
pub struct System {
    pub cpu: Cpu,
    pub bus: MemoryBus,
    total_cycles: u64,
}

impl System {
    /// Builds a fresh system around the given ROM image.
    pub fn load(rom: &[u8]) -> Self {
        System {
            cpu: Cpu::new(),
            bus: MemoryBus::new(Cartridge::new(rom)),
            total_cycles: 0,
        }
    }

    /// Advances emulation by one frame's worth of T-cycles. Each retired
    /// instruction's cost is fed to the PPU, then the timer, and any raised
    /// interrupts land in IF before the next instruction fetch.
    pub fn run_frame(&mut self) {
        let target = self.total_cycles + u64::from(CYCLES_PER_FRAME);
        while self.total_cycles < target {
            let spent = self.cpu.step(&mut self.bus);
            self.total_cycles += u64::from(spent);

            let (vblank, stat) = self.bus.ppu.step(spent);
            let timer = self.bus.timer.step(spent);

            if vblank {
                self.bus.request_interrupt(INT_VBLANK);
            }
            if stat {
                self.bus.request_interrupt(INT_STAT);
            }
            if timer {
                self.bus.request_interrupt(INT_TIMER);
            }
        }
    }

    /// Total T-cycles emulated since load.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// The 160x144 RGB framebuffer, quiescent while `frame_ready` is set.
    pub fn frame_buffer(&self) -> &[u8] {
        self.bus.ppu.frame_buffer()
    }

    pub fn frame_ready(&self) -> bool {
        self.bus.ppu.frame_ready
    }

    /// The shell clears the flag after snapshotting the framebuffer.
    pub fn clear_frame_ready(&mut self) {
        self.bus.ppu.frame_ready = false;
    }

    /// The eight button booleans the shell writes.
    pub fn joypad_mut(&mut self) -> &mut JoypadState {
        &mut self.bus.joypad.state
    }

    /// Replaces the four RGB shades used to colorize the DMG palettes.
    pub fn set_palette(&mut self, palette: [[u8; 3]; 4]) {
        self.bus.ppu.set_palette(palette);
    }

    /// Cartridge title from the ROM header.
    pub fn title(&self) -> &str {
        &self.bus.cartridge.title
    }
}
