//! Per-instruction tracing, off unless a sink is installed.

use super::instruction::Instruction;

/// Receives every decoded instruction before it executes.
pub trait TraceSink {
    fn trace(&mut self, pc: u16, opcode: u16, instruction: &Instruction);
}

/// Writes a disassembly line per instruction at `trace` level.
#[derive(Debug, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn trace(&mut self, pc: u16, opcode: u16, instruction: &Instruction) {
        log::trace!("{:#06x}: {:04X}  {}", pc, opcode, instruction);
    }
}

impl<F> TraceSink for F
where
    F: FnMut(u16, u16, &Instruction),
{
    fn trace(&mut self, pc: u16, opcode: u16, instruction: &Instruction) {
        self(pc, opcode, instruction)
    }
}
