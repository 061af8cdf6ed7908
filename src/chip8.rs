use std::io::Read;

use log::{debug, trace, warn};

use crate::constants::{KEY_COUNT, MEMORY_SIZE, PROGRAM_START};
use crate::error::{ExecutionError, LoadError};
use crate::state::{mem_addr, FrameBuffer, MachineState};
use crate::unit::{resolve_key, ExecutionUnit};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Drives an `ExecutionUnit` over its own `MachineState`:
///  - fetching the instruction at the pc
///  - ticking the timers when asked to
///  - translating key presses into keypad state and key wait resolution
///
/// Callers are expected to call `advance_cpu` at the clock speed and `advance_timers` at 60Hz.
pub struct Chip8 {
    state: MachineState,
    unit: ExecutionUnit,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_unit(ExecutionUnit::default())
    }

    pub fn with_unit(unit: ExecutionUnit) -> Self {
        Chip8 {
            state: MachineState::new(),
            unit,
        }
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Load a rom from a source
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;

        let capacity = MEMORY_SIZE - PROGRAM_START as usize;
        if rom.len() > capacity {
            return Err(LoadError::TooLarge {
                len: rom.len(),
                capacity,
            });
        }
        self.state.write_memory(PROGRAM_START, &rom);
        debug!("loaded {} byte rom at {:#05X}", rom.len(), PROGRAM_START);
        Ok(rom.len())
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether a tone should currently be playing
    pub fn is_tone_on(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Set the pressed status of key, resolving any pending key wait
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        if key as usize >= KEY_COUNT {
            warn!("ignoring press of out of range key {:#04X}", key);
            return;
        }
        self.state.keypad |= 1 << key;
        resolve_key(&mut self.state, key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        if key as usize >= KEY_COUNT {
            warn!("ignoring release of out of range key {:#04X}", key);
            return;
        }
        self.state.keypad &= !(1 << key);
    }

    /// Advances the CPU by a single cycle
    /// - idles if awaiting a keypress
    /// - gets and executes the next opcode
    pub fn advance_cpu(&mut self) -> Result<(), ExecutionError> {
        if self.state.is_waiting_for_key() {
            debug!("waiting on {:?}", self.state.key_wait);
            return Ok(());
        }
        let op = self.get_op();
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.unit.step(op, &mut self.state)
    }

    /// Decrements the delay and sound timers, stopping at 0
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> u16 {
        let pc = self.state.pc;
        let left = self.state.memory[mem_addr(pc)];
        let right = self.state.memory[mem_addr(pc.wrapping_add(1))];
        u16::from_be_bytes([left, right])
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::KeyWait;

    fn chip8_with_rom(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new();
        chip8.load_rom(&mut &rom[..]).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = chip8_with_rom(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), 0xAABB);
    }

    #[test]
    fn test_chip8_gets_op_across_end_of_memory() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0xFFF] = 0x12;
        chip8.state.pc = 0xFFF;
        assert_eq!(chip8.get_op(), 0x12F0);
    }

    #[test]
    fn test_load_rom_rejects_oversized_rom() {
        let mut chip8 = Chip8::new();
        let rom = vec![0; 0xE01];
        match chip8.load_rom(&mut &rom[..]) {
            Err(LoadError::TooLarge { len, capacity }) => {
                assert_eq!(len, 0xE01);
                assert_eq!(capacity, 0xE00);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        // cls so we don't fail on reading empty memory
        let mut chip8 = chip8_with_rom(&[0x00, 0xE0]);
        let starting_pc = chip8.state.pc;
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, starting_pc + 0x2);
    }

    #[test]
    fn test_surfaces_unknown_opcodes() {
        let mut chip8 = chip8_with_rom(&[0x00, 0x00]);
        assert_eq!(
            chip8.advance_cpu(),
            Err(ExecutionError::UnknownOpcode(0x0000))
        );
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = Chip8::new();
        chip8.state.key_wait = KeyWait::Waiting(0x1);
        chip8.key_press(0xE);
        assert_eq!(chip8.state.key_wait, KeyWait::Idle);
        assert_eq!(chip8.state.v[0x1], 0xE);
        assert_eq!(chip8.state.keypad, 1 << 0xE);
        chip8.key_release(0xE);
        assert_eq!(chip8.state.keypad, 0);
    }

    #[test]
    fn test_ignores_out_of_range_keys() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0x10);
        assert_eq!(chip8.state.keypad, 0);
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = chip8_with_rom(&[0xF1, 0x0A, 0x62, 0x42]);
        chip8.advance_cpu().unwrap();
        for _ in 0..10 {
            chip8.advance_cpu().unwrap();
        }
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x2], 0x0);

        chip8.key_press(0x7);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.v[0x1], 0x7);
        assert_eq!(chip8.state.v[0x2], 0x42);
        assert_eq!(chip8.state.pc, 0x204);
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut chip8 = Chip8::new();
        chip8.state.set_delay_timer(0x2);
        chip8.state.set_sound_timer(0x1);
        assert!(chip8.is_tone_on());
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer(), 0x1);
        assert!(!chip8.is_tone_on());
        chip8.advance_timers();
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer(), 0x0);
        assert_eq!(chip8.state.sound_timer(), 0x0);
    }

    #[test]
    fn test_frame_is_returned_once_per_draw() {
        // v0 = 0; i = glyph(v0); draw 5 rows at (v0, v0)
        let mut chip8 = chip8_with_rom(&[0x60, 0x00, 0xF0, 0x29, 0xD0, 0x05]);
        for _ in 0..3 {
            chip8.advance_cpu().unwrap();
        }
        let frame = chip8.get_frame().unwrap();
        assert_eq!(frame[0], 0xF0 << 56);
        assert_eq!(frame[1], 0x90 << 56);
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_call_ret_program() {
        // call 0x204; (unreachable); ld v3, 0x33; ret
        let mut chip8 = chip8_with_rom(&[0x22, 0x04, 0x00, 0x00, 0x63, 0x33, 0x00, 0xEE]);
        for _ in 0..3 {
            chip8.advance_cpu().unwrap();
        }
        assert_eq!(chip8.state.v[0x3], 0x33);
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.sp, 0x0);
    }
}
