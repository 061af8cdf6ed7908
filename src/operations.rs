use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, INSTRUCTION_WIDTH, SPRITE_HEIGHT,
    STACK_SIZE,
};
use crate::error::ExecutionError;
use crate::opcode::Opcode;
use crate::quirks::ShiftSource;
use crate::state::{KeyWait, MachineState};
use crate::unit::ExecutionUnit;

type Outcome = Result<(), ExecutionError>;

/// Moves the pc past the current instruction
fn next(state: &mut MachineState) {
    state.pc = state.pc.wrapping_add(INSTRUCTION_WIDTH) & ADDRESS_MASK;
}

/// Moves the pc past the current instruction and, if `condition`, the one after it
fn skip_if(state: &mut MachineState, condition: bool) {
    next(state);
    if condition {
        next(state);
    }
}

/// Vx of an `8xy_` opcode, which may not be VF since VF receives the flag
fn destination(op: u16) -> Result<usize, ExecutionError> {
    match op.x() {
        FLAG_REGISTER => Err(ExecutionError::InvalidOperand {
            op,
            register: FLAG_REGISTER as u8,
        }),
        x => Ok(x),
    }
}

/// clear
pub fn clr(_op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.frame_buffer = [0; DISPLAY_HEIGHT];
    state.draw_flag = true;
    next(state);
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    if state.sp == 0 {
        return Err(ExecutionError::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC + 2); PC = addr
pub fn call(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    if state.sp as usize == STACK_SIZE {
        return Err(ExecutionError::StackOverflow { pc: state.pc });
    }
    state.stack[state.sp as usize] = state.pc.wrapping_add(INSTRUCTION_WIDTH) & ADDRESS_MASK;
    state.sp += 1;
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let condition = state.v[op.x()] == op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let condition = state.v[op.x()] != op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let condition = state.v[op.x()] == state.v[op.y()];
    skip_if(state, condition);
    Ok(())
}

/// Vx = kk
pub fn load(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.v[op.x()] = op.kk();
    next(state);
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    next(state);
    Ok(())
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    state.v[x] = state.v[op.y()];
    next(state);
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    state.v[x] |= state.v[op.y()];
    next(state);
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    state.v[x] &= state.v[op.y()];
    next(state);
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    state.v[x] ^= state.v[op.y()];
    next(state);
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    let (res, over) = state.v[x].overflowing_add(state.v[op.y()]);
    state.v[x] = res;
    state.v[FLAG_REGISTER] = over as u8;
    next(state);
    Ok(())
}

/// Vx -= Vy; VF = borrow flag of Vx - Vy
pub fn sub(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    let (vx, vy) = (state.v[x], state.v[op.y()]);
    state.v[x] = vx.wrapping_sub(vy);
    state.v[FLAG_REGISTER] = unit.quirks().borrow(vx, vy);
    next(state);
    Ok(())
}

/// Vx = Vy >> 1; VF = shifted out bit
pub fn shr(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    let source = shift_source(op, state, unit);
    state.v[x] = source >> 1;
    state.v[FLAG_REGISTER] = source & 0x1;
    next(state);
    Ok(())
}

/// Vx = Vy - Vx; VF = borrow flag of Vy - Vx
pub fn subn(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    let (vx, vy) = (state.v[x], state.v[op.y()]);
    state.v[x] = vy.wrapping_sub(vx);
    state.v[FLAG_REGISTER] = unit.quirks().borrow(vy, vx);
    next(state);
    Ok(())
}

/// Vx = Vy << 1; VF = shifted out bit
pub fn shl(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    let x = destination(op)?;
    let source = shift_source(op, state, unit);
    state.v[x] = source << 1;
    state.v[FLAG_REGISTER] = source >> 7;
    next(state);
    Ok(())
}

fn shift_source(op: u16, state: &MachineState, unit: &ExecutionUnit) -> u8 {
    match unit.quirks().shift_source {
        ShiftSource::Vy => state.v[op.y()],
        ShiftSource::Vx => state.v[op.x()],
    }
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let condition = state.v[op.x()] != state.v[op.y()];
    skip_if(state, condition);
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.i = op.addr();
    next(state);
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.pc = op.addr().wrapping_add(u16::from(state.v[0x0])) & ADDRESS_MASK;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    state.v[op.x()] = unit.random_byte() & op.kk();
    next(state);
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer, wrapping on both axes.
/// Sets VF if any pixels were erased
pub fn draw(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let x = state.v[op.x()] as usize % DISPLAY_WIDTH;
    let y = state.v[op.y()] as usize;
    // a byte placed at column 0 occupies bits 63..56
    let shift = (DISPLAY_WIDTH - 8) as i32 - x as i32;

    let mut collision: u64 = 0;
    for row in 0..op.n() as u16 {
        let byte = u64::from(state.read(state.i.wrapping_add(row)));
        let sprite = if shift >= 0 {
            byte << shift
        } else {
            // the columns past the right edge reappear on the left
            (byte >> -shift) | (byte << (DISPLAY_WIDTH as i32 + shift))
        };
        let target = (y + row as usize) % DISPLAY_HEIGHT;
        collision |= state.frame_buffer[target] & sprite;
        state.frame_buffer[target] ^= sprite;
    }

    state.v[FLAG_REGISTER] = (collision != 0) as u8;
    state.draw_flag = true;
    next(state);
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let condition = state.is_pressed(state.v[op.x()]);
    skip_if(state, condition);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let condition = !state.is_pressed(state.v[op.x()]);
    skip_if(state, condition);
    Ok(())
}

/// Vx = DT
pub fn moved(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.v[op.x()] = state.delay_timer;
    next(state);
    Ok(())
}

/// await keypress for Vx
pub fn keyd(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.key_wait = KeyWait::Waiting(op.x() as u8);
    next(state);
    Ok(())
}

/// DT = Vx
pub fn loads(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.delay_timer = state.v[op.x()];
    next(state);
    Ok(())
}

/// ST = Vx
pub fn ld(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.sound_timer = state.v[op.x()];
    next(state);
    Ok(())
}

/// I += Vx
pub fn addi(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    next(state);
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    state.i = u16::from(state.v[op.x()] & 0xF) * SPRITE_HEIGHT;
    next(state);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: u16, state: &mut MachineState, _unit: &ExecutionUnit) -> Outcome {
    let vx = state.v[op.x()];
    let i = state.i;
    state.write(i, vx / 100);
    state.write(i.wrapping_add(1), vx / 10 % 10);
    state.write(i.wrapping_add(2), vx % 10);
    next(state);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    let i = state.i;
    for register in 0..=op.x() {
        state.write(i.wrapping_add(register as u16), state.v[register]);
    }
    if unit.quirks().load_store_increments_i {
        state.i = i.wrapping_add(op.x() as u16 + 1);
    }
    next(state);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut MachineState, unit: &ExecutionUnit) -> Outcome {
    let i = state.i;
    for register in 0..=op.x() {
        state.v[register] = state.read(i.wrapping_add(register as u16));
    }
    if unit.quirks().load_store_increments_i {
        state.i = i.wrapping_add(op.x() as u16 + 1);
    }
    next(state);
    Ok(())
}
