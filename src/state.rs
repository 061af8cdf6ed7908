use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SPRITE_SHEET, STACK_SIZE,
};

/// The FrameBuffer holds one row per word; bit 63 is column 0 and bit 0 is column 63.
pub type FrameBuffer = [u64; DISPLAY_HEIGHT];

/// Whether execution is suspended on `Fx0A`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyWait {
    Idle,
    /// The register that receives the next resolved key
    Waiting(u8),
}

/// The mutable state an `ExecutionUnit` operates on
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register, only the low 12 bits address memory
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - only ever decremented by whoever drives the unit
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
/// - 32x64 bit frame buffer
///
/// ## Input
/// - 16-bit mask of the pressed status of keys 0..F
/// - Execution halts while `key_wait` is `Waiting`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MachineState {
    pub(crate) v: [u8; REGISTER_COUNT],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) sp: u8,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) stack: [u16; STACK_SIZE],
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) frame_buffer: FrameBuffer,
    pub(crate) draw_flag: bool,
    pub(crate) keypad: u16,
    pub(crate) key_wait: KeyWait,
}

impl MachineState {
    pub fn new() -> Self {
        // 0x000 - 0x050 holds the font sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        MachineState {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [0; DISPLAY_HEIGHT],
            draw_flag: false,
            keypad: 0,
            key_wait: KeyWait::Idle,
        }
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp as usize]
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// Whether the pixel at column `x`, row `y` is lit; out of range coordinates are unlit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT {
            (self.frame_buffer[y] >> (DISPLAY_WIDTH - 1 - x)) & 1 == 1
        } else {
            false
        }
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay_timer(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound_timer(&mut self, value: u8) {
        self.sound_timer = value;
    }

    /// Replaces the pressed status of all keys; bit `k` is key `k`.
    pub fn set_keypad(&mut self, keys: u16) {
        self.keypad = keys;
    }

    pub fn key_wait(&self) -> KeyWait {
        self.key_wait
    }

    pub fn is_waiting_for_key(&self) -> bool {
        self.key_wait != KeyWait::Idle
    }

    /// Copies `bytes` into memory starting at `address`, wrapping at the end of memory.
    pub fn write_memory(&mut self, address: u16, bytes: &[u8]) {
        for (offset, byte) in bytes.iter().enumerate() {
            self.memory[mem_addr(address.wrapping_add(offset as u16))] = *byte;
        }
    }

    pub(crate) fn is_pressed(&self, key: u8) -> bool {
        self.keypad & (1 << (key & 0xF)) != 0
    }

    pub(crate) fn read(&self, address: u16) -> u8 {
        self.memory[mem_addr(address)]
    }

    pub(crate) fn write(&mut self, address: u16, value: u8) {
        self.memory[mem_addr(address)] = value;
    }
}

impl Default for MachineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps an address into the 12-bit address space.
pub(crate) fn mem_addr(address: u16) -> usize {
    (address & ADDRESS_MASK) as usize
}
