//! Delay and sound timers, both counting down at 60 Hz.

pub const TIMER_HZ: u32 = 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrement both timers, stopping at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn delay_stops_at_zero() {
        let mut timers = Timers { delay: 5, sound: 0 };
        for _ in 0..5 {
            timers.tick();
        }
        assert_eq!(timers.delay, 0);
        timers.tick();
        assert_eq!(timers.delay, 0);
    }

    #[test]
    fn timers_are_independent() {
        let mut timers = Timers { delay: 1, sound: 3 };
        timers.tick();
        assert_eq!(timers, Timers { delay: 0, sound: 2 });
    }
}
