use emu8::{step, ExecutionUnit, MachineState};
use proptest::prelude::*;

fn state_with(registers: &[(usize, u8)]) -> MachineState {
    let mut state = MachineState::new();
    for (register, value) in registers {
        let op = 0x6000 | (*register as u16) << 8 | u16::from(*value);
        step(op, &mut state).unwrap();
    }
    state
}

proptest! {
    #[test]
    fn add_immediate_wraps(x in 0usize..16, kk in any::<u8>(), kk2 in any::<u8>()) {
        let mut state = state_with(&[(x, kk)]);
        step(0x7000 | (x as u16) << 8 | u16::from(kk2), &mut state).unwrap();
        prop_assert_eq!(state.registers()[x], kk.wrapping_add(kk2));
    }

    #[test]
    fn add_registers_sets_carry(x in 0usize..15, y in 0usize..15, vx in any::<u8>(), vy in any::<u8>()) {
        prop_assume!(x != y);
        let mut state = state_with(&[(x, vx), (y, vy)]);
        step(0x8004 | (x as u16) << 8 | (y as u16) << 4, &mut state).unwrap();
        let sum = u16::from(vx) + u16::from(vy);
        prop_assert_eq!(state.registers()[x], (sum % 256) as u8);
        prop_assert_eq!(state.registers()[0xF], (sum > 255) as u8);
    }

    #[test]
    fn sub_flag_is_strictly_positive(vx in any::<u8>(), vy in any::<u8>()) {
        let mut state = state_with(&[(0x1, vx), (0x2, vy)]);
        step(0x8125, &mut state).unwrap();
        prop_assert_eq!(state.registers()[0x1], vx.wrapping_sub(vy));
        prop_assert_eq!(state.registers()[0xF], (vx > vy) as u8);
    }

    #[test]
    fn store_then_load_round_trips(values in any::<[u8; 4]>(), address in 0x300u16..0xF00) {
        let mut state = MachineState::new();
        for (register, value) in values.iter().enumerate() {
            step(0x6000 | (register as u16) << 8 | u16::from(*value), &mut state).unwrap();
        }
        step(0xA000 | address, &mut state).unwrap();
        step(0xF355, &mut state).unwrap();
        for register in 0..4u16 {
            step(0x6000 | register << 8, &mut state).unwrap();
        }
        step(0xF365, &mut state).unwrap();
        prop_assert_eq!(&state.registers()[..4], &values[..]);
        prop_assert_eq!(state.i(), address);
    }

    #[test]
    fn drawing_twice_erases(x in any::<u8>(), y in any::<u8>(), sprite in any::<u8>()) {
        prop_assume!(sprite != 0);
        let mut state = state_with(&[(0x1, x), (0x2, y)]);
        state.write_memory(0x300, &[sprite]);
        step(0xA300, &mut state).unwrap();
        step(0xD121, &mut state).unwrap();
        prop_assert_eq!(state.registers()[0xF], 0);
        prop_assert_eq!(state.frame_buffer().iter().map(|row| row.count_ones()).sum::<u32>(), sprite.count_ones());
        step(0xD121, &mut state).unwrap();
        prop_assert_eq!(state.registers()[0xF], 1);
        prop_assert!(state.frame_buffer().iter().all(|row| *row == 0));
    }

    #[test]
    fn rnd_is_masked(kk in any::<u8>()) {
        let unit = ExecutionUnit::default().with_random(|| 0xFF);
        let mut state = MachineState::new();
        unit.step(0xC500 | u16::from(kk), &mut state).unwrap();
        prop_assert_eq!(state.registers()[0x5], kk);
    }
}
