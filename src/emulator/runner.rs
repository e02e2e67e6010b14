//! The frame loop tying the emulator to an input and an output device.

use std::thread;
use std::time::{Duration, Instant};

use super::config::Config;
use super::emulator::{Emulator, RunState};
use super::input::{Command, EmulatorInput};
use super::output::{EmulatorOutput, Frame};
use super::timers::TIMER_HZ;
use crate::error::RunError;

pub struct Runner<I: EmulatorInput, O: EmulatorOutput> {
    emulator: Emulator,
    input: I,
    output: O,
    instructions_per_frame: u32,
    quit: bool,
}

impl<I: EmulatorInput, O: EmulatorOutput> Runner<I, O> {

    pub fn new(emulator: Emulator, config: &Config, input: I, output: O) -> Runner<I, O> {
        Runner {
            emulator,
            input,
            output,
            instructions_per_frame: config.instructions_per_frame(),
            quit: false,
        }
    }

    /// Run one 60 Hz frame: drain input, execute a batch of instructions
    /// and tick the timers unless paused, then present the result.
    ///
    /// Returns `false` once the user has asked to quit.
    pub fn run_frame(&mut self) -> Result<bool, RunError> {
        for command in self.input.poll(self.emulator.keypad_mut()) {
            match command {
                Command::TogglePause => self.emulator.toggle_pause(),
                Command::Quit => {
                    log::info!("Quit requested");
                    self.emulator.halt();
                    self.quit = true;
                }
            }
        }

        if self.emulator.run_state() == RunState::Running {
            for _ in 0..self.instructions_per_frame {
                self.emulator.step()?;
            }
            self.emulator.tick();
        }

        self.present()?;
        Ok(!self.quit)
    }

    /// Run frames at 60 Hz until the user quits or the machine faults.
    pub fn run(&mut self) -> Result<(), RunError> {
        let frame_time = Duration::from_secs(1) / TIMER_HZ;
        let mut deadline = Instant::now();
        while self.run_frame()? {
            deadline += frame_time;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Running behind, don't try to catch up
                deadline = now;
            }
        }
        Ok(())
    }

    /// Run at most `frames` frames back to back, without pacing.
    pub fn run_frames(&mut self, frames: usize) -> Result<(), RunError> {
        for _ in 0..frames {
            if !self.run_frame()? {
                break;
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), RunError> {
        let timers = self.emulator.timers();
        let frame = Frame {
            screen: self.emulator.screen(),
            delay_timer: timers.delay,
            sound_timer: timers.sound,
            run_state: self.emulator.run_state(),
        };
        self.output.present(&frame)?;
        Ok(())
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::keypad::Keypad;
    use crate::emulator::output::DummyOutput;
    use crate::error::MachineFault;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    /// Replays one scripted action per frame.
    #[derive(Default)]
    struct ScriptedInput {
        frames: VecDeque<(Option<u8>, Vec<Command>)>,
    }

    impl ScriptedInput {
        fn then(mut self, key: Option<u8>, commands: Vec<Command>) -> Self {
            self.frames.push_back((key, commands));
            self
        }
    }

    impl EmulatorInput for ScriptedInput {
        fn poll(&mut self, keypad: &mut Keypad) -> Vec<Command> {
            keypad.release_all();
            match self.frames.pop_front() {
                Some((key, commands)) => {
                    if let Some(key) = key {
                        keypad.press(key);
                    }
                    commands
                }
                None => Vec::new(),
            }
        }
    }

    fn runner(program: &[u8], input: ScriptedInput) -> Runner<ScriptedInput, DummyOutput> {
        let config = Config { clock_hz: 600, seed: Some(1), ..Config::default() };
        let emulator = Emulator::from_rom(&config, program).unwrap();
        Runner::new(emulator, &config, input, DummyOutput::new())
    }

    // Sets the delay timer to 30, then spins forever
    const SPIN_WITH_DELAY: [u8; 6] = [0x60, 0x1E, 0xF0, 0x15, 0x12, 0x04];

    #[test]
    fn each_frame_ticks_timers_once() {
        let mut runner = runner(&SPIN_WITH_DELAY, ScriptedInput::default());
        runner.run_frames(4).unwrap();
        assert_eq!(runner.output().frames(), 4);
        assert_eq!(runner.output().last_timers(), (26, 0));
    }

    #[test]
    fn paused_frames_still_present_but_do_not_tick() {
        let input = ScriptedInput::default()
            .then(None, vec![])
            .then(None, vec![Command::TogglePause])
            .then(None, vec![])
            .then(None, vec![Command::TogglePause]);
        let mut runner = runner(&SPIN_WITH_DELAY, input);

        runner.run_frames(3).unwrap();
        assert_eq!(runner.emulator().run_state(), RunState::Paused);
        assert_eq!(runner.output().frames(), 3);
        assert_eq!(runner.output().last_timers(), (29, 0));

        runner.run_frames(1).unwrap();
        assert_eq!(runner.emulator().run_state(), RunState::Running);
        assert_eq!(runner.output().last_timers(), (28, 0));
    }

    #[test]
    fn quit_stops_the_loop() {
        let input = ScriptedInput::default()
            .then(None, vec![])
            .then(None, vec![Command::Quit]);
        let mut runner = runner(&SPIN_WITH_DELAY, input);
        runner.run().unwrap();
        assert_eq!(runner.output().frames(), 2);
        assert_eq!(runner.emulator().run_state(), RunState::Halted);
    }

    #[test]
    fn key_wait_resumes_on_a_later_frame() {
        // Wait for a key into V3, then spin
        let input = ScriptedInput::default()
            .then(None, vec![])
            .then(None, vec![])
            .then(Some(0x9), vec![]);
        let mut runner = runner(&[0xF3, 0x0A, 0x12, 0x02], input);

        runner.run_frames(2).unwrap();
        assert_eq!(runner.emulator().program_counter(), 0x200);

        runner.run_frames(1).unwrap();
        assert_eq!(runner.emulator().registers()[3], 0x9);
        assert_eq!(runner.emulator().program_counter(), 0x202);
    }

    #[test]
    fn fault_ends_the_loop() {
        let mut runner = runner(&[0x00, 0xEE], ScriptedInput::default());
        match runner.run_frames(10) {
            Err(RunError::Fault(MachineFault::StackUnderflow { pc: 0x200 })) => {}
            other => panic!("expected a stack underflow, got {:?}", other),
        }
        assert_eq!(runner.emulator().run_state(), RunState::Halted);
        assert_eq!(runner.output().frames(), 0);
    }

    #[test]
    fn presented_screen_matches_emulator() {
        // Point I at the glyph for 0 and draw it at (0, 0), then spin
        let mut runner = runner(&[0xF0, 0x29, 0xD0, 0x05, 0x12, 0x04], ScriptedInput::default());
        runner.run_frames(1).unwrap();
        let screen = runner.output().last_screen().unwrap();
        assert_eq!(screen, runner.emulator().screen());
        assert!(screen.get(0, 0) && screen.get(3, 4) && !screen.get(1, 1));
    }
}
