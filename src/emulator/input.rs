use super::keypad::Keypad;

/// Requests from the user that are not keypad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Quit,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF.
///
/// `poll` is called once at the start of every frame, paused or not. It
/// updates the keypad latch and returns any commands received since the
/// previous poll.
pub trait EmulatorInput {
    fn poll(&mut self, keypad: &mut Keypad) -> Vec<Command>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self, _: &mut Keypad) -> Vec<Command> {
        Vec::new()
    }
}
