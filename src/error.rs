//! Errors raised while loading a program or while running it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Startup failures. All of them are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM file {0:?} does not exist")]
    RomNotFound(PathBuf),

    #[error("could not read ROM file {0:?}: {1}")]
    RomUnreadable(PathBuf, #[source] io::Error),

    #[error("ROM is too large ({size} bytes), at most {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },
}

/// Faults raised by the executor. A fault halts the machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineFault {
    #[error("stack overflow when calling from {pc:#06x}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow when returning from {pc:#06x}")]
    StackUnderflow { pc: u16 },

    #[error("program counter {pc:#06x} is outside of memory")]
    PcOutOfBounds { pc: u16 },

    #[error("memory access at {address:#06x} is out of bounds")]
    MemoryOutOfBounds { address: usize },

    #[error("unknown opcode {opcode:#06x} at {pc:#06x}")]
    UnknownOpcode { pc: u16, opcode: u16 },

    #[error("no font glyph for digit {digit:#04x} at {pc:#06x}")]
    InvalidFontDigit { pc: u16, digit: u8 },
}

/// Reasons the frame loop stops early.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Fault(#[from] MachineFault),

    #[error("output failed: {0}")]
    Io(#[from] io::Error),
}
