use std::fmt;

use crate::util::bit_splitter::BitSplitter;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
///
/// Every 16-bit word decodes to something; words outside the instruction set
/// become `Unknown`, which the executor treats as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg), // FX65
    Unknown(u16),
}

/// Decode a big-endian instruction word.
pub fn decode(word: u16) -> Instruction {
    Instruction::from_u16(word)
}

impl Instruction {

    pub fn from_u16(value: u16) -> Instruction {
        Instruction::decode_split(BitSplitter::from_u16(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Instruction {
        Instruction::decode_split(BitSplitter::new(left, right))
    }

    fn decode_split(opcode: BitSplitter) -> Instruction {
        let (x, y) = (Reg(opcode.x()), Reg(opcode.y()));
        let nn = Const(opcode.nn());
        let nnn = Addr(opcode.nnn());
        match opcode.as_four_u8() {
            // Only the low byte selects among the 0 opcodes
            (0, _, 0xE, 0) => Instruction::ClearScreen,
            (0, _, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(nnn),
            (2, _, _, _) => Instruction::Call(nnn),
            (3, _, _, _) => Instruction::IfRegEqConst(x, nn),
            (4, _, _, _) => Instruction::IfRegNeqConst(x, nn),
            (5, _, _, 0) => Instruction::IfRegEqReg(x, y),
            (6, _, _, _) => Instruction::SetRegToConst(x, nn),
            (7, _, _, _) => Instruction::IncRegByConst(x, nn),
            (8, _, _, 0) => Instruction::SetRegToReg(x, y),
            (8, _, _, 1) => Instruction::BitwiseOr(x, y),
            (8, _, _, 2) => Instruction::BitwiseAnd(x, y),
            (8, _, _, 3) => Instruction::BitwiseXor(x, y),
            (8, _, _, 4) => Instruction::IncRegByReg(x, y),
            (8, _, _, 5) => Instruction::DecRegByReg(x, y),
            (8, _, _, 6) => Instruction::BitshiftRight(x),
            (8, _, _, 7) => Instruction::SetVxVyMinusVx(x, y),
            (8, _, _, 0xE) => Instruction::BitshiftLeft(x),
            (9, _, _, 0) => Instruction::IfRegNeqReg(x, y),
            (0xA, _, _, _) => Instruction::SetI(nnn),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(nnn),
            (0xC, _, _, _) => Instruction::SetVxRand(x, nn),
            (0xD, _, _, n) => Instruction::Draw(x, y, Const(n)),
            (0xE, _, 9, 0xE) => Instruction::IfKeyEqVx(x),
            (0xE, _, 0xA, 1) => Instruction::IfKeyNeqVx(x),
            (0xF, _, 0, 7) => Instruction::SetRegToDelayTimer(x),
            (0xF, _, 0, 0xA) => Instruction::SetRegToGetKey(x),
            (0xF, _, 1, 5) => Instruction::SetDelayTimerToReg(x),
            (0xF, _, 1, 8) => Instruction::SetSoundTimerToReg(x),
            (0xF, _, 1, 0xE) => Instruction::AddRegToI(x),
            (0xF, _, 2, 9) => Instruction::SetIToSpriteAddrVx(x),
            (0xF, _, 3, 3) => Instruction::SetIToBcdOfReg(x),
            (0xF, _, 5, 5) => Instruction::RegDump(x),
            (0xF, _, 6, 5) => Instruction::RegLoad(x),
            _ => Instruction::Unknown(opcode.as_u16()),
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

/// Disassembly, in the usual mnemonic style.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Goto(Addr(a)) => write!(f, "JP {:#05x}", a),
            Call(Addr(a)) => write!(f, "CALL {:#05x}", a),
            IfRegEqConst(x, Const(n)) => write!(f, "SE {}, {:#04x}", x, n),
            IfRegNeqConst(x, Const(n)) => write!(f, "SNE {}, {:#04x}", x, n),
            IfRegEqReg(x, y) => write!(f, "SE {}, {}", x, y),
            SetRegToConst(x, Const(n)) => write!(f, "LD {}, {:#04x}", x, n),
            IncRegByConst(x, Const(n)) => write!(f, "ADD {}, {:#04x}", x, n),
            SetRegToReg(x, y) => write!(f, "LD {}, {}", x, y),
            BitwiseOr(x, y) => write!(f, "OR {}, {}", x, y),
            BitwiseAnd(x, y) => write!(f, "AND {}, {}", x, y),
            BitwiseXor(x, y) => write!(f, "XOR {}, {}", x, y),
            IncRegByReg(x, y) => write!(f, "ADD {}, {}", x, y),
            DecRegByReg(x, y) => write!(f, "SUB {}, {}", x, y),
            BitshiftRight(x) => write!(f, "SHR {}", x),
            SetVxVyMinusVx(x, y) => write!(f, "SUBN {}, {}", x, y),
            BitshiftLeft(x) => write!(f, "SHL {}", x),
            IfRegNeqReg(x, y) => write!(f, "SNE {}, {}", x, y),
            SetI(Addr(a)) => write!(f, "LD I, {:#05x}", a),
            SetPcToV0PlusAddr(Addr(a)) => write!(f, "JP V0, {:#05x}", a),
            SetVxRand(x, Const(n)) => write!(f, "RND {}, {:#04x}", x, n),
            Draw(x, y, Const(n)) => write!(f, "DRW {}, {}, {}", x, y, n),
            IfKeyEqVx(x) => write!(f, "SKP {}", x),
            IfKeyNeqVx(x) => write!(f, "SKNP {}", x),
            SetRegToDelayTimer(x) => write!(f, "LD {}, DT", x),
            SetRegToGetKey(x) => write!(f, "LD {}, K", x),
            SetDelayTimerToReg(x) => write!(f, "LD DT, {}", x),
            SetSoundTimerToReg(x) => write!(f, "LD ST, {}", x),
            AddRegToI(x) => write!(f, "ADD I, {}", x),
            SetIToSpriteAddrVx(x) => write!(f, "LD F, {}", x),
            SetIToBcdOfReg(x) => write!(f, "LD B, {}", x),
            RegDump(x) => write!(f, "LD [I], {}", x),
            RegLoad(x) => write!(f, "LD {}, [I]", x),
            Unknown(word) => write!(f, "DW {:#06x}", word),
        }
    }
}
