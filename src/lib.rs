pub use chip8::Chip8;
pub use constants::CLOCK_SPEED;
pub use error::{ExecutionError, LoadError};
pub use quirks::{BorrowFlag, Quirks, ShiftSource};
pub use state::{FrameBuffer, KeyWait, MachineState};
pub use unit::{resolve_key, step, ExecutionUnit};

mod chip8;
pub mod constants;
mod error;
mod instruction;
pub mod opcode;
mod operations;
mod quirks;
pub mod state;
mod unit;
