use log::warn;

use crate::constants::KEY_COUNT;
use crate::error::ExecutionError;
use crate::instruction::from_op;
use crate::quirks::Quirks;
use crate::state::{KeyWait, MachineState};

fn random_byte() -> u8 {
    rand::random()
}

/// # Execution Unit
/// Decodes and executes one instruction at a time against a borrowed `MachineState`.
///
/// The unit keeps no state between steps; it only carries the quirks it was configured with and
/// the source of bytes for `Cxkk`.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionUnit {
    quirks: Quirks,
    random: fn() -> u8,
}

impl ExecutionUnit {
    pub fn new(quirks: Quirks) -> Self {
        ExecutionUnit {
            quirks,
            random: random_byte,
        }
    }

    /// Replaces the random byte source, e.g. to make `Cxkk` deterministic.
    pub fn with_random(self, random: fn() -> u8) -> Self {
        ExecutionUnit { random, ..self }
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub(crate) fn random_byte(&self) -> u8 {
        (self.random)()
    }

    /// Executes `instruction` and moves the pc past it unless it redirects control flow.
    ///
    /// Does nothing while the state is waiting on a key. On error the state is left untouched.
    pub fn step(&self, instruction: u16, state: &mut MachineState) -> Result<(), ExecutionError> {
        if state.is_waiting_for_key() {
            return Ok(());
        }
        let operation = from_op(instruction)?;
        operation(instruction, state, self)
    }
}

impl Default for ExecutionUnit {
    fn default() -> Self {
        Self::new(Quirks::default())
    }
}

/// Executes `instruction` with the default quirks.
pub fn step(instruction: u16, state: &mut MachineState) -> Result<(), ExecutionError> {
    ExecutionUnit::default().step(instruction, state)
}

/// Completes a pending `Fx0A` by writing `key` to the waiting register.
///
/// Does nothing if no key is awaited. Keys outside 0..F are ignored and leave the wait pending.
pub fn resolve_key(state: &mut MachineState, key: u8) {
    if key as usize >= KEY_COUNT {
        warn!("ignoring out of range key {:#04X}", key);
        return;
    }
    if let KeyWait::Waiting(register) = state.key_wait {
        state.v[register as usize] = key;
        state.key_wait = KeyWait::Idle;
    }
}
