//! Command line options shared by the binaries.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::emulator::config::Config;

/// Options for the machine itself.
#[derive(StructOpt, Debug)]
pub struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    pub rom: PathBuf,

    /// Instructions executed per second
    #[structopt(long, default_value = "700")]
    pub clock: u32,

    /// Screen width in pixels
    #[structopt(long, default_value = "64", parse(try_from_str = parse_dimension))]
    pub width: usize,

    /// Screen height in pixels
    #[structopt(long, default_value = "32", parse(try_from_str = parse_dimension))]
    pub height: usize,

    /// Stop on unknown opcodes instead of skipping them
    #[structopt(long)]
    pub strict: bool,

    /// Log every executed instruction (needs RUST_LOG=trace)
    #[structopt(long)]
    pub trace: bool,

    /// Seed for the random number instruction
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl Opt {
    pub fn config(&self) -> Config {
        Config {
            width: self.width,
            height: self.height,
            clock_hz: self.clock,
            strict: self.strict,
            trace: self.trace,
            seed: self.seed,
        }
    }
}

fn parse_dimension(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) if n > 256 => Err("must be at most 256".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::config::DEFAULT_CLOCK_HZ;
    use crate::emulator::screen::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_config_defaults() {
        let opt = Opt::from_iter_safe(&["chip8", "game.ch8"]).unwrap();
        assert_eq!(opt.rom, PathBuf::from("game.ch8"));
        assert_eq!(opt.config(), Config::default());
        assert_eq!((opt.width, opt.height, opt.clock), (SCREEN_WIDTH, SCREEN_HEIGHT, DEFAULT_CLOCK_HZ));
    }

    #[test]
    fn options_reach_the_config() {
        let opt = Opt::from_iter_safe(&[
            "chip8", "--clock", "1200", "--width", "128", "--height", "64", "--strict", "--seed", "9", "pong.ch8",
        ]).unwrap();
        let config = opt.config();
        assert_eq!(config.instructions_per_frame(), 20);
        assert_eq!((config.width, config.height), (128, 64));
        assert!(config.strict);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn missing_rom_is_a_usage_error() {
        assert!(Opt::from_iter_safe(&["chip8"]).is_err());
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(Opt::from_iter_safe(&["chip8", "--width", "0", "game.ch8"]).is_err());
    }
}
