//! WebAssembly bindings for the simulator.
//!
//! This module exposes the host interface (load, step, run, input, pixel
//! callback and inspection) to JavaScript so a browser page can act as the
//! display and keyboard.

pub mod api;

pub use api::WasmSimulator;
