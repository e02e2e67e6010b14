use std::error::Error;

use structopt::StructOpt;

use chip8_vm::emulator::{Emulator, Runner};

mod crossterm_io;
mod key_buffer;
use crossterm_io::{parse_color, CrosstermInput, CrosstermOutput, Style};

/// Play a CHIP-8 program in the terminal.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    machine: chip8_vm::cli::Opt,

    /// Colour of lit pixels, as RRGGBB
    #[structopt(long, default_value = "ffffff", parse(try_from_str = parse_color))]
    fg: crossterm::style::Color,

    /// Colour of unlit pixels, as RRGGBB
    #[structopt(long, default_value = "000000", parse(try_from_str = parse_color))]
    bg: crossterm::style::Color,

    /// Draw lit pixels as solid blocks instead of outlined cells
    #[structopt(long)]
    no_outline: bool,
}

fn main() {

    pretty_env_logger::init();

    // Get configuration and run until the user quits
    let opt = Opt::from_args();
    if let Err(e) = run(&opt) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn Error>> {
    let config = opt.machine.config();
    log::info!("Executing {:?}", &opt.machine.rom);

    // Load before touching the terminal, so load errors print normally
    let emulator = Emulator::from_file(&config, &opt.machine.rom)?;

    let style = Style {
        fg: opt.fg,
        bg: opt.bg,
        outline: !opt.no_outline,
    };
    let output = CrosstermOutput::new(config.width, config.height, style)?;

    // The terminal is restored when the runner, and with it the output, is dropped
    let mut runner = Runner::new(emulator, &config, CrosstermInput::new(), output);
    runner.run()?;
    Ok(())
}
