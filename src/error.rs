use thiserror::Error;

/// Failures surfaced by a single execution step.
///
/// All of these are detected before the step writes anything, so the state is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
    #[error("opcode {op:#06X} cannot use V{register:X} as its destination")]
    InvalidOperand { op: u16, register: u8 },
    #[error("stack overflow calling from {pc:#05X}")]
    StackOverflow { pc: u16 },
    #[error("stack underflow returning from {pc:#05X}")]
    StackUnderflow { pc: u16 },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("program of {len} bytes does not fit in {capacity} bytes of program memory")]
    TooLarge { len: usize, capacity: usize },
}
