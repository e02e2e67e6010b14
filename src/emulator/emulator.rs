//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::fs;
use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emulator::config::Config;
use crate::emulator::instruction::*;
use crate::emulator::keypad::Keypad;
use crate::emulator::memory::{Memory, FONT_GLYPH_SIZE, PROGRAM_START};
use crate::emulator::screen::Screen;
use crate::emulator::stack::Stack;
use crate::emulator::timers::Timers;
use crate::emulator::trace::{LogTrace, TraceSink};
use crate::error::{LoadError, MachineFault};

const NUM_REGISTERS: usize = 16;
const FLAG: usize = 0xF;

/// Whether the machine executes instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Halted,
}

pub struct Emulator {
    // Standard fields
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack: Stack,
    timers: Timers,
    keypad: Keypad,
    screen: Screen,

    run_state: RunState,
    strict: bool,
    rng: StdRng,
    trace: Option<Box<dyn TraceSink>>,
}

impl Emulator {

    /// Create a new emulator with the default configuration
    pub fn new() -> Emulator {
        Emulator::with_config(&Config::default())
    }

    /// Create a new emulator with the font loaded and no program
    pub fn with_config(config: &Config) -> Emulator {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let trace: Option<Box<dyn TraceSink>> = if config.trace {
            Some(Box::new(LogTrace))
        } else {
            None
        };

        Emulator {
            memory: Memory::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            stack: Stack::new(),
            timers: Timers::default(),
            keypad: Keypad::new(),
            screen: Screen::new(config.width, config.height),

            run_state: RunState::Running,
            strict: config.strict,
            rng,
            trace,
        }
    }

    /// Create an emulator with `program` loaded and ready to run.
    pub fn from_rom(config: &Config, program: &[u8]) -> Result<Emulator, LoadError> {
        let mut emulator = Emulator::with_config(config);
        emulator.load(program)?;
        Ok(emulator)
    }

    /// Read a ROM file and create an emulator running it.
    pub fn from_file<P: AsRef<Path>>(config: &Config, path: P) -> Result<Emulator, LoadError> {
        let path = path.as_ref();
        let program = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::RomNotFound(path.to_path_buf()),
            _ => LoadError::RomUnreadable(path.to_path_buf(), e),
        })?;
        log::info!("Loaded {:?} ({} bytes)", path, program.len());
        Emulator::from_rom(config, &program)
    }

    /// Copy a program into memory at 0x200 and reset control flow.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.memory.load_program(program)?;
        self.program_counter = PROGRAM_START;
        self.stack.clear();
        self.run_state = RunState::Running;
        Ok(())
    }

    /// Install a sink receiving every decoded instruction.
    pub fn set_trace(&mut self, sink: Box<dyn TraceSink>) {
        self.trace = Some(sink);
    }

    /// Fetch the instruction at the program counter and execute it.
    /// Does nothing unless the machine is running.
    ///
    /// A fault halts the machine.
    pub fn step(&mut self) -> Result<(), MachineFault> {
        if self.run_state != RunState::Running {
            return Ok(());
        }
        let result = self.fetch_and_execute();
        if let Err(fault) = &result {
            log::error!("Halting: {}", fault);
            self.run_state = RunState::Halted;
        }
        result
    }

    /// Decrement the timers. Called at 60 Hz while running.
    pub fn tick(&mut self) {
        if self.run_state == RunState::Running {
            self.timers.tick();
        }
    }

    fn fetch_and_execute(&mut self) -> Result<(), MachineFault> {
        // Each opcode is two bytes
        let pc = self.program_counter;
        let opcode = self.memory.fetch(pc)?;
        let instruction = Instruction::from_u16(opcode);

        if let Some(trace) = self.trace.as_mut() {
            trace.trace(pc, opcode, &instruction);
        }

        // Jumps and skips are relative to the next instruction
        self.program_counter = pc + 2;

        self.execute_single(instruction)
    }

    /// Execute many instructions in order, stopping at the first fault
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), MachineFault> {
        instructions.iter().try_for_each(|&instruction| self.execute_single(instruction))
    }

    /// Execute a single instruction
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), MachineFault> {
        match instruction {

            // Clear the screen
            Instruction::ClearScreen => self.screen.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                self.program_counter = self
                    .stack
                    .pop()
                    .ok_or(MachineFault::StackUnderflow { pc: self.current_pc() })?;
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.stack
                    .push(self.program_counter)
                    .ok_or(MachineFault::StackOverflow { pc: self.current_pc() })?;
                self.program_counter = addr;
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(x, Const(n)) => self.skip_if(self.reg(x) == n),

            Instruction::IfRegNeqConst(x, Const(n)) => self.skip_if(self.reg(x) != n),

            Instruction::IfRegEqReg(x, y) => self.skip_if(self.reg(x) == self.reg(y)),

            Instruction::SetRegToConst(x, Const(n)) => self.set_reg(x, n),

            // Wraps around, and never touches the flag
            Instruction::IncRegByConst(x, Const(n)) => self.set_reg(x, self.reg(x).wrapping_add(n)),

            Instruction::SetRegToReg(x, y) => self.set_reg(x, self.reg(y)),

            Instruction::BitwiseOr(x, y) => self.set_reg(x, self.reg(x) | self.reg(y)),

            Instruction::BitwiseAnd(x, y) => self.set_reg(x, self.reg(x) & self.reg(y)),

            Instruction::BitwiseXor(x, y) => self.set_reg(x, self.reg(x) ^ self.reg(y)),

            // VF is 1 on carry
            Instruction::IncRegByReg(x, y) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_reg_and_flag(x, sum, carry);
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg_and_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }

            Instruction::BitshiftRight(x) => {
                let vx = self.reg(x);
                self.set_reg_and_flag(x, vx >> 1, vx & 1 == 1);
            }

            Instruction::SetVxVyMinusVx(x, y) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg_and_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }

            Instruction::BitshiftLeft(x) => {
                let vx = self.reg(x);
                self.set_reg_and_flag(x, vx << 1, vx >> 7 == 1);
            }

            Instruction::IfRegNeqReg(x, y) => self.skip_if(self.reg(x) != self.reg(y)),

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = self.registers[0] as u16 + addr;
            }

            Instruction::SetVxRand(x, Const(n)) => {
                let random: u8 = self.rng.gen();
                self.set_reg(x, random & n);
            }

            // XOR a sprite of `height` rows at I onto the screen
            Instruction::Draw(x, y, Const(height)) => {
                let (x_coord, y_coord) = (self.reg(x), self.reg(y));

                // Rows below the bottom edge are never read
                let rows = self.screen.visible_rows(y_coord, height as usize);
                let sprite = self.memory.slice(self.i as usize, rows)?;

                let collision = self.screen.draw_sprite(x_coord, y_coord, sprite);
                self.registers[FLAG] = collision as u8;
            }

            Instruction::IfKeyEqVx(x) => self.skip_if(self.keypad.is_pressed(self.reg(x))),

            Instruction::IfKeyNeqVx(x) => self.skip_if(!self.keypad.is_pressed(self.reg(x))),

            Instruction::SetRegToDelayTimer(x) => self.set_reg(x, self.timers.delay),

            // Wait for a key press by running this instruction again next step
            Instruction::SetRegToGetKey(x) => match self.keypad.first_pressed() {
                Some(key) => self.set_reg(x, key),
                None => self.program_counter = self.current_pc(),
            },

            Instruction::SetDelayTimerToReg(x) => {
                self.timers.delay = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(x) => {
                self.timers.sound = self.reg(x);
            }

            Instruction::AddRegToI(x) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
            }

            // Set i to character address. Each font element is 5 bytes tall.
            Instruction::SetIToSpriteAddrVx(x) => {
                let digit = self.reg(x);
                if digit <= 0xF {
                    self.i = FONT_GLYPH_SIZE * digit as u16;
                } else if self.strict {
                    return Err(MachineFault::InvalidFontDigit { pc: self.current_pc(), digit });
                } else {
                    log::debug!("Ignoring font lookup of {:#04x}", digit);
                }
            }

            Instruction::SetIToBcdOfReg(x) => {
                let value = self.reg(x);
                let i = self.i as usize;
                self.memory.write(i, value / 100)?;
                self.memory.write(i + 1, value / 10 % 10)?;
                self.memory.write(i + 2, value % 10)?;
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let i = self.i as usize;
                for reg_no in 0..=x as usize {
                    self.memory.write(i + reg_no, self.registers[reg_no])?;
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                let values = self.memory.slice(self.i as usize, count)?;
                self.registers[..count].copy_from_slice(values);
            }

            Instruction::Unknown(opcode) => {
                if self.strict {
                    return Err(MachineFault::UnknownOpcode { pc: self.current_pc(), opcode });
                }
                log::debug!("Ignoring unknown opcode {:#06x}", opcode);
            }
        };

        Ok(())
    }

    fn reg(&self, Reg(x): Reg) -> u8 {
        self.registers[x as usize]
    }

    fn set_reg(&mut self, Reg(x): Reg, value: u8) {
        self.registers[x as usize] = value;
    }

    /// The result is written last, so it wins when `x` is VF.
    fn set_reg_and_flag(&mut self, x: Reg, value: u8, flag: bool) {
        self.registers[FLAG] = flag as u8;
        self.set_reg(x, value);
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    /// Address of the instruction being executed.
    fn current_pc(&self) -> u16 {
        self.program_counter.wrapping_sub(2)
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The input latch, for the frontend to update.
    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Switch between running and paused. A halted machine stays halted.
    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            RunState::Halted => RunState::Halted,
        };
        log::debug!("Run state is now {:?}", self.run_state);
    }

    pub fn halt(&mut self) {
        self.run_state = RunState::Halted;
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
