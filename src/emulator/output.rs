use std::io;

use super::emulator::RunState;
use super::screen::Screen;

/// Everything a presentation layer gets to see, once per frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub screen: &'a Screen,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub run_state: RunState,
}

/// Represents an output device that can be written to.
pub trait EmulatorOutput {
    fn present(&mut self, frame: &Frame<'_>) -> io::Result<()>;
}

/// A simple output device that keeps a copy of the last frame.
#[derive(Debug, Default)]
pub struct DummyOutput {
    frames: usize,
    last_screen: Option<Screen>,
    last_timers: (u8, u8),
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn last_screen(&self) -> Option<&Screen> {
        self.last_screen.as_ref()
    }

    /// `(delay, sound)` as of the last frame.
    pub fn last_timers(&self) -> (u8, u8) {
        self.last_timers
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.frames += 1;
        self.last_screen = Some(frame.screen.clone());
        self.last_timers = (frame.delay_timer, frame.sound_timer);
        Ok(())
    }
}
