/// Bytes of addressable memory; addresses are 12 bits wide
pub const MEMORY_SIZE: usize = 0x1000;

/// Mask applied to any address before it touches memory
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where programs are loaded and where execution starts
pub const PROGRAM_START: u16 = 0x200;

/// Number of return addresses the stack can hold
pub const STACK_SIZE: usize = 16;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry/borrow/collision flag
pub const FLAG_REGISTER: usize = 0xF;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Opcodes are two bytes wide, so the pc moves in steps of two
pub const INSTRUCTION_WIDTH: u16 = 0x2;

/// Timers are decremented at 60Hz regardless of the clock speed
pub const TIMER_HZ: u32 = 60;

/// Nanoseconds per CPU cycle (~500Hz)
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Height of a single font glyph in bytes
pub const SPRITE_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Glyphs for the hex digits 0..F, 5 bytes each, stored at the start of memory.
///
/// e.g. `0` is
/// ```text
/// 11110000
/// 10010000
/// 10010000
/// 10010000
/// 11110000
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
