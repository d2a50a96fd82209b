//! Integration tests for the memory-mapped random source, input register and
//! display.

use std::cell::RefCell;
use std::rc::Rc;

use sim6502::{
    FrameBuffer, HostDevice, InputLatch, MemoryBus, MemoryMap, NullDevice, Simulator, NO_INPUT,
};

/// Records every pixel write it receives
#[derive(Clone, Default)]
struct RecordingDevice {
    pixels: Rc<RefCell<Vec<(u16, u16, u8)>>>,
    input: u8,
}

impl HostDevice for RecordingDevice {
    fn last_input(&self) -> u8 {
        self.input
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: u8) {
        self.pixels.borrow_mut().push((x, y, color));
    }
}

#[test]
fn test_display_write_reaches_device_once() {
    let device = RecordingDevice::default();
    let pixels = Rc::clone(&device.pixels);
    let mut map = MemoryMap::with_seed(device, 1);

    map.write(0x0200, 7);

    assert_eq!(*pixels.borrow(), vec![(0, 0, 7)]);
    assert_eq!(map.peek(0x0200), 7);
}

#[test]
fn test_display_coordinates() {
    let device = RecordingDevice::default();
    let pixels = Rc::clone(&device.pixels);
    let mut map = MemoryMap::with_seed(device, 1);

    map.write(0x0221, 1); // row 1, column 1
    map.write(0x05FF, 2); // bottom-right

    assert_eq!(*pixels.borrow(), vec![(1, 1, 1), (31, 31, 2)]);
}

#[test]
fn test_writes_outside_display_are_silent() {
    let device = RecordingDevice::default();
    let pixels = Rc::clone(&device.pixels);
    let mut map = MemoryMap::with_seed(device, 1);

    map.write(0x01FF, 1);
    map.write(0x0600, 1);
    map.write(0x0010, 1);

    assert!(pixels.borrow().is_empty());
}

#[test]
fn test_color_is_taken_modulo_palette() {
    let device = RecordingDevice::default();
    let pixels = Rc::clone(&device.pixels);
    let mut map = MemoryMap::with_seed(device, 1);

    map.write(0x0200, 0x13);

    assert_eq!(*pixels.borrow(), vec![(0, 0, 0x03)]);
    // Memory keeps the raw byte
    assert_eq!(map.peek(0x0200), 0x13);
}

#[test]
fn test_random_reads_stay_in_byte_range() {
    let map = MemoryMap::new(NullDevice);
    let mut seen = [false; 256];
    for _ in 0..4096 {
        seen[map.read(0x00FE) as usize] = true;
    }
    // 4096 draws over 256 values should hit far more than one of them
    assert!(seen.iter().filter(|&&hit| hit).count() > 1);
}

#[test]
fn test_seeded_random_is_reproducible() {
    let first = MemoryMap::with_seed(NullDevice, 42);
    let second = MemoryMap::with_seed(NullDevice, 42);

    let a: Vec<u8> = (0..16).map(|_| first.read(0x00FE)).collect();
    let b: Vec<u8> = (0..16).map(|_| second.read(0x00FE)).collect();
    assert_eq!(a, b);
}

#[test]
fn test_input_register_reads_device() {
    let device = RecordingDevice {
        input: 0x77,
        ..Default::default()
    };
    let map = MemoryMap::with_seed(device, 1);
    assert_eq!(map.read(0x00FF), 0x77);
}

#[test]
fn test_input_register_defaults_to_no_input() {
    let map = MemoryMap::with_seed(FrameBuffer::new(32, 32, InputLatch::new()), 1);
    assert_eq!(map.read(0x00FF), NO_INPUT);
}

#[test]
fn test_program_draws_and_reads_input() {
    let input = InputLatch::new();
    input.set(0x64);
    let mut sim = Simulator::with_seed(FrameBuffer::new(32, 32, input), 3);

    // LDA $FF / STA $10 / LDA #$05 / STA $0200 / LDX #$01 / STA $0200,X / BRK
    sim.load_program(&[
        0xA5, 0xFF, 0x85, 0x10, 0xA9, 0x05, 0x8D, 0x00, 0x02, 0xA2, 0x01, 0x9D, 0x00, 0x02,
        0x00,
    ]);
    sim.run().unwrap();

    assert_eq!(sim.peek(0x0010), 0x64);
    assert_eq!(sim.device().pixel(0, 0), Some(5));
    assert_eq!(sim.device().pixel(1, 0), Some(5));
    assert_eq!(sim.device().writes(), 2);
}

#[test]
fn test_program_reads_random_source() {
    let mut sim = Simulator::with_seed(NullDevice, 9);
    // LDA $FE / STA $10 / LDA $FE / STA $11 / BRK
    sim.load_program(&[0xA5, 0xFE, 0x85, 0x10, 0xA5, 0xFE, 0x85, 0x11, 0x00]);
    sim.run().unwrap();

    let mut replay = Simulator::with_seed(NullDevice, 9);
    replay.load_program(&[0xA5, 0xFE, 0x85, 0x10, 0xA5, 0xFE, 0x85, 0x11, 0x00]);
    replay.run().unwrap();

    assert_eq!(sim.peek(0x0010), replay.peek(0x0010));
    assert_eq!(sim.peek(0x0011), replay.peek(0x0011));
}
