//! Settings the core depends on.

use super::screen::{SCREEN_HEIGHT, SCREEN_WIDTH};
use super::timers::TIMER_HZ;

pub const DEFAULT_CLOCK_HZ: u32 = 700;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Screen width, the wrap bound for sprite x coordinates.
    pub width: usize,
    /// Screen height, the wrap bound for sprite y coordinates.
    pub height: usize,
    /// Instructions executed per second.
    pub clock_hz: u32,
    /// Fault on unknown opcodes and font digits above `0xF` instead of ignoring them.
    pub strict: bool,
    /// Log every decoded instruction.
    pub trace: bool,
    /// Seed for `CXNN`. Random when unset.
    pub seed: Option<u64>,
}

impl Config {
    /// Instructions executed between two timer ticks.
    pub fn instructions_per_frame(&self) -> u32 {
        std::cmp::max(1, self.clock_hz / TIMER_HZ)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            clock_hz: DEFAULT_CLOCK_HZ,
            strict: false,
            trace: false,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case(700 => 11 ; "default clock")]
    #[test_case(600 => 10 ; "exact multiple")]
    #[test_case(30 => 1 ; "slower than the timers")]
    #[test_case(0 => 1 ; "zero clock still runs")]
    fn instructions_per_frame(clock_hz: u32) -> u32 {
        Config { clock_hz, ..Config::default() }.instructions_per_frame()
    }

    #[test]
    fn defaults_to_classic_resolution() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (64, 32));
        assert!(!config.strict);
    }
}
