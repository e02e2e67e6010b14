use std::error::Error;

use structopt::StructOpt;

use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::{Emulator, Runner};

/// Run a program without a screen or keyboard and print the final screen.
#[derive(StructOpt)]
struct Opt {
    #[structopt(flatten)]
    machine: chip8_vm::cli::Opt,

    /// Number of 60 Hz frames to run
    #[structopt(long, default_value = "600")]
    frames: usize,
}

fn main() {
    env_logger::init();

    // Get configuration and run
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
    let emulator = Emulator::from_file(&config, &opt.machine.rom)?;

    let mut runner = Runner::new(emulator, &config, DummyInput, DummyOutput::new());
    runner.run_frames(opt.frames)?;

    print!("{}", runner.emulator().screen());
    Ok(())
}
