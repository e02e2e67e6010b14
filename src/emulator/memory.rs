//! Flat, byte addressable memory with the font table at the bottom
//! and the program loaded at `PROGRAM_START`.

use crate::error::{LoadError, MachineFault};

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;

/// Each glyph is five bytes tall.
pub const FONT_GLYPH_SIZE: u16 = 5;
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {

    /// Create zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// The largest program that fits above `PROGRAM_START`.
    pub fn max_program_size() -> usize {
        MEM_SIZE - PROGRAM_START as usize
    }

    /// Copy a program into memory at `PROGRAM_START`.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        let max = Memory::max_program_size();
        if program.len() > max {
            return Err(LoadError::RomTooLarge { size: program.len(), max });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, MachineFault> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(MachineFault::MemoryOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MachineFault> {
        match self.bytes.get_mut(address) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(MachineFault::MemoryOutOfBounds { address }),
        }
    }

    /// Borrow `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], MachineFault> {
        if len == 0 {
            return Ok(&[]);
        }
        self.bytes
            .get(address..address + len)
            .ok_or(MachineFault::MemoryOutOfBounds { address: address + len - 1 })
    }

    /// Fetch the big-endian instruction word at `pc`.
    pub fn fetch(&self, pc: u16) -> Result<u16, MachineFault> {
        let pc_usize = pc as usize;
        if pc_usize + 1 >= MEM_SIZE {
            return Err(MachineFault::PcOutOfBounds { pc });
        }
        Ok(u16::from_be_bytes([self.bytes[pc_usize], self.bytes[pc_usize + 1]]))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_is_loaded_at_zero() {
        let memory = Memory::new();
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn program_fits_exactly() {
        let mut memory = Memory::new();
        let program = vec![0xAB; Memory::max_program_size()];
        assert!(memory.load_program(&program).is_ok());
        assert_eq!(memory.read(MEM_SIZE - 1), Ok(0xAB));
    }

    #[test]
    fn program_too_large_is_rejected() {
        let mut memory = Memory::new();
        let program = vec![0; Memory::max_program_size() + 1];
        match memory.load_program(&program) {
            Err(LoadError::RomTooLarge { size, max }) => {
                assert_eq!(size, 3585);
                assert_eq!(max, 3584);
            }
            other => panic!("expected RomTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn fetch_is_big_endian() {
        let mut memory = Memory::new();
        memory.load_program(&[0x12, 0x34]).unwrap();
        assert_eq!(memory.fetch(PROGRAM_START), Ok(0x1234));
    }

    #[test]
    fn fetch_past_the_end_faults() {
        let memory = Memory::new();
        assert_eq!(memory.fetch(0x0FFE), Ok(0));
        assert_eq!(memory.fetch(0x0FFF), Err(MachineFault::PcOutOfBounds { pc: 0x0FFF }));
        assert_eq!(memory.fetch(0x1000), Err(MachineFault::PcOutOfBounds { pc: 0x1000 }));
    }

    #[test]
    fn out_of_range_accesses_fault() {
        let mut memory = Memory::new();
        assert_eq!(memory.read(MEM_SIZE), Err(MachineFault::MemoryOutOfBounds { address: MEM_SIZE }));
        assert_eq!(memory.write(MEM_SIZE + 3, 1), Err(MachineFault::MemoryOutOfBounds { address: MEM_SIZE + 3 }));
        assert!(memory.slice(MEM_SIZE - 2, 3).is_err());
        assert_eq!(memory.slice(MEM_SIZE - 2, 2).map(|s| s.len()), Ok(2));
    }
}
