//! The virtual machine and the pieces it is built from.

pub mod config;
pub mod emulator;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod output;
pub mod runner;
pub mod screen;
pub mod stack;
pub mod timers;
pub mod trace;

pub use self::config::Config;
pub use self::emulator::{Emulator, RunState};
pub use self::runner::Runner;
