//! A DMG Game Boy emulator core.
//!
//! The [`System`] is the outward surface: feed it a ROM with
//! [`System::load`], call [`System::run_frame`] at ~59.7 Hz, blit
//! [`System::frame_buffer`] when [`System::frame_ready`] reports true, and
//! poke the joypad booleans from the shell. Everything else (bus decode,
//! SM83 interpreter, PPU scanline pipeline, timer) lives behind it.

pub mod cartridge;
pub mod cpu;
pub mod joypad;
pub mod memory_bus;
pub mod memory_map;
pub mod ppu;
pub mod system;
pub mod timer;

pub use cartridge::{Cartridge, MbcKind};
pub use cpu::Cpu;
pub use joypad::{Joypad, JoypadState};
pub use memory_bus::MemoryBus;
pub use ppu::{DMG_PALETTE, Ppu};
pub use system::{CYCLES_PER_FRAME, System};
pub use timer::Timer;

pub use ppu::{GB_HEIGHT as HEIGHT, GB_WIDTH as WIDTH};
