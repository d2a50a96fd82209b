//! Fuzz target for whole programs.
//!
//! Loads an arbitrary image at the program origin and runs it for a bounded
//! number of steps against the in-memory display.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sim6502::{FrameBuffer, InputLatch, Simulator};

const MAX_STEPS: u64 = 10_000;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let (header, image) = data.split_at(2);

    let input = InputLatch::new();
    input.set(header[0]);
    let mut sim = Simulator::with_seed(FrameBuffer::new(32, 32, input), header[1] as u64);
    sim.load_program(image);

    let before = sim.steps();
    if let Ok(executed) = sim.run_for(MAX_STEPS) {
        assert!(executed <= MAX_STEPS);
        assert_eq!(sim.steps(), before + executed);
    }
    assert!(sim.device().writes() <= sim.steps());
});
