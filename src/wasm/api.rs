//! WASM API for the simulator.
//!
//! The browser supplies a pixel callback `(x, y, color) => void` and forwards
//! key codes through `set_input`. Pacing stays in JavaScript: call
//! `run_for` once per animation frame.

use std::fmt;

use log::warn;
use wasm_bindgen::prelude::*;

use crate::{HostDevice, InputLatch, MemoryMap, Simulator};

/// Host device that forwards pixels to a JavaScript callback.
struct JsDisplay {
    on_pixel: js_sys::Function,
    input: InputLatch,
}

impl HostDevice for JsDisplay {
    fn last_input(&self) -> u8 {
        self.input.get()
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: u8) {
        let result = self.on_pixel.call3(
            &JsValue::NULL,
            &JsValue::from(x),
            &JsValue::from(y),
            &JsValue::from(color),
        );
        pixel_delivered(result, x, y);
    }
}

/// Logs a failed pixel callback. The store has already happened, so a
/// failing callback only loses the pixel.
fn pixel_delivered<T, E: fmt::Debug>(result: Result<T, E>, x: u16, y: u16) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            warn!("pixel callback failed at ({}, {}): {:?}", x, y, err);
            false
        }
    }
}

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// Main simulator interface for JavaScript
#[wasm_bindgen]
pub struct WasmSimulator {
    sim: Simulator<MemoryMap<JsDisplay>>,
    input: InputLatch,
}

#[wasm_bindgen]
impl WasmSimulator {
    /// Create a simulator that reports pixel writes to `on_pixel`
    #[wasm_bindgen(constructor)]
    pub fn new(on_pixel: js_sys::Function) -> Self {
        let input = InputLatch::new();
        let display = JsDisplay {
            on_pixel,
            input: input.clone(),
        };
        // Math.random gives 53 usable bits
        let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;

        WasmSimulator {
            sim: Simulator::with_seed(display, seed),
            input,
        }
    }

    /// Load a program at 0x0600 and point PC at it
    pub fn load_program(&mut self, program: &[u8]) {
        self.sim.load_program(program);
    }

    /// Record the latest key code
    pub fn set_input(&mut self, code: u8) {
        self.input.set(code);
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.sim.step().map_err(|e| JsError::new(&e.to_string()))
    }

    /// Execute up to `steps` instructions and return how many ran
    pub fn run_for(&mut self, steps: u32) -> Result<u32, JsError> {
        self.sim
            .run_for(steps as u64)
            .map(|n| n as u32)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Read memory without triggering I/O hooks
    pub fn peek(&self, addr: u16) -> u8 {
        self.sim.peek(addr)
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.sim.is_halted()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.sim.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.sim.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.sim.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.sim.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.sim.sp()
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.sim.cpu().flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.sim.cpu().flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.sim.cpu().flag_c()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_callback_is_reported() {
        assert!(pixel_delivered::<(), &str>(Ok(()), 0, 0));
        assert!(!pixel_delivered::<(), _>(Err("TypeError: draw is not a function"), 3, 4));
    }
}
