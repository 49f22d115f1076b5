//! A CHIP-8 virtual machine core. The crate interprets the instruction set against
//! host provided display and keyboard devices, the host owns the real time pacing
//! and the presentation.
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;
pub mod runner;
pub mod timer;
mod error;

// reexporting for convinience
pub use error::*;
pub use runner::{Config, FrameReport, Runner};
