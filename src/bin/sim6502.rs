//! Headless runner: loads a flat binary, runs it against an in-memory
//! 32x32 display and prints the final machine state.
//!
//! ```text
//! sim6502 snake.bin --seed 7 --input 0x64 --max-steps 200000 --show-screen
//! RUST_LOG=sim6502=trace sim6502 program.bin
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use sim6502::{FrameBuffer, InputLatch, Simulator};

#[derive(Parser, Debug)]
#[command(name = "sim6502", about = "Run a flat 6502 binary against a headless display")]
struct Args {
    /// Program image with no header; loaded verbatim at --origin
    program: PathBuf,

    /// Load address (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0x0600", value_parser = parse_u16)]
    origin: u16,

    /// Stop after this many instructions even if no BRK was reached
    #[arg(long, default_value_t = 1_000_000)]
    max_steps: u64,

    /// Seed for the random-source register (OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Key code to place in the input register before running
    #[arg(long, value_parser = parse_u8)]
    input: Option<u8>,

    /// Print the display as text when execution stops
    #[arg(long, action = ArgAction::SetTrue)]
    show_screen: bool,
}

fn parse_u16(s: &str) -> Result<u16, String> {
    parse_number(s).and_then(|n| u16::try_from(n).map_err(|e| e.to_string()))
}

fn parse_u8(s: &str) -> Result<u8, String> {
    parse_number(s).and_then(|n| u8::try_from(n).map_err(|e| e.to_string()))
}

fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("$")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid number {s:?}: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = fs::read(&args.program)
        .with_context(|| format!("reading {}", args.program.display()))?;
    if image.is_empty() {
        bail!("{} is empty", args.program.display());
    }

    let input = InputLatch::new();
    if let Some(code) = args.input {
        input.set(code);
    }
    let display = FrameBuffer::new(32, 32, input);

    let mut sim = match args.seed {
        Some(seed) => Simulator::with_seed(display, seed),
        None => Simulator::with_device(display),
    };
    sim.load(&image, args.origin);
    info!(
        "running {} ({} bytes) at 0x{:04X}",
        args.program.display(),
        image.len(),
        args.origin
    );

    let executed = sim
        .run_for(args.max_steps)
        .with_context(|| format!("execution stopped at PC 0x{:04X}", sim.pc()))?;

    let cpu = sim.cpu();
    println!(
        "{} after {} instructions",
        if sim.is_halted() { "halted" } else { "step limit reached" },
        executed
    );
    println!(
        "PC:{:04X} SP:{:02X} A:{:02X} X:{:02X} Y:{:02X} C:{} Z:{} N:{}",
        sim.pc(),
        sim.sp(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.flag_c() as u8,
        cpu.flag_z() as u8,
        cpu.flag_n() as u8
    );
    println!("pixel writes: {}", sim.device().writes());

    if args.show_screen {
        print!("{}", sim.device().render());
    }

    Ok(())
}
