/*!

A CHIP-8 interpreter as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the interpreter on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the left hand side of the keyboard (`1234`, `qwer`, `asdf`, `zxcv`),
space pauses and resumes, and escape quits.

# Library

The main way of running a program is to load it as bytes and step through it.

```rust
use chip8_vm::emulator::{Config, Emulator};

let program = [0x60, 0x05, 0x70, 0x03];
let mut emulator = Emulator::from_rom(&Config::default(), &program).unwrap();

emulator.step().unwrap(); // V0 = 5
emulator.step().unwrap(); // V0 += 3
assert_eq!(emulator.registers()[0], 8);
assert_eq!(emulator.program_counter(), 0x204);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.registers()[0xB], 35);
```

## Custom input and output

To drive the machine at 60 frames per second, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively,
and hand them to a `Runner`.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this, then do the following.

```ignore
use chip8_vm::emulator::{Config, Emulator, Runner};

let config = Config::default();
let emulator = Emulator::from_file(&config, "pong.ch8")?;
Runner::new(emulator, &config, MyInput::new(), MyOutput::new()).run()?;
```

You can then implement your own custom frontend, as done with crossterm in crossterm_frontend.
*/

pub mod cli;
pub mod emulator;
pub mod error;
pub mod util;
