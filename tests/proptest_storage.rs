//! Property-based tests for storage invariants.

use proptest::prelude::*;
use sim6502::{FlatMemory, Storage};

fn setup_storage() -> Storage<FlatMemory> {
    Storage::new(FlatMemory::new())
}

proptest! {
    /// Any value written is stored modulo 256.
    #[test]
    fn prop_set_stores_low_byte(addr in any::<u16>(), value in any::<u16>()) {
        let mut storage = setup_storage();
        storage.set(addr, value);
        prop_assert_eq!(storage.get(addr) as u16, value % 256);
    }

    /// A push followed by a pull restores both the value and SP.
    #[test]
    fn prop_push_pull_restores_sp(sp in any::<u8>(), value in any::<u8>()) {
        let mut storage = setup_storage();
        storage.set_sp(sp);

        storage.push(value);
        prop_assert_eq!(storage.pull(), value);
        prop_assert_eq!(storage.sp(), sp);
    }

    /// A sequence of pushes comes back reversed.
    #[test]
    fn prop_stack_is_lifo(values in prop::collection::vec(any::<u8>(), 1..64)) {
        let mut storage = setup_storage();
        for &value in &values {
            storage.push(value);
        }

        let pulled: Vec<u8> = (0..values.len()).map(|_| storage.pull()).collect();
        let mut expected = values.clone();
        expected.reverse();
        prop_assert_eq!(pulled, expected);
        prop_assert_eq!(storage.sp(), 0xFF);
    }

    /// JSR then RTS lands on the PC that JSR saved.
    #[test]
    fn prop_jsr_rts_round_trip(pc in any::<u16>(), target in any::<u16>()) {
        let mut storage = setup_storage();
        storage.jump(pc);
        storage.jsr(target);
        prop_assert_eq!(storage.pc(), target);

        storage.rts();
        prop_assert_eq!(storage.pc(), pc);
        prop_assert_eq!(storage.sp(), 0xFF);
    }

    /// Loading an image places every byte at origin + i (mod 65536).
    #[test]
    fn prop_load_places_bytes(origin in any::<u16>(), image in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut storage = setup_storage();
        storage.load(&image, origin);
        for (i, &byte) in image.iter().enumerate() {
            prop_assert_eq!(storage.get(origin.wrapping_add(i as u16)), byte);
        }
    }
}
