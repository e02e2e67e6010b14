use std::time::{Duration, Instant};

use chip8_vm::emulator::keypad::{Keypad, NUM_KEYS};

/// Remembers when each key was last pressed.
/// Terminals only report presses, so a key counts as held until
/// `timeout` has passed without a new press (or an auto-repeat).
pub struct KeyBuffer {
    timeout: Duration,
    pressed_at: [Option<Instant>; NUM_KEYS],
}

impl KeyBuffer {

    /// Create a new `KeyBuffer`, forgetting keypresses that are older than `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            pressed_at: [None; NUM_KEYS],
        }
    }

    /// Record a keypress.
    pub fn push(&mut self, key: u8) {
        self.push_at(key, Instant::now());
    }

    fn push_at(&mut self, key: u8, at: Instant) {
        if let Some(slot) = self.pressed_at.get_mut(key as usize) {
            *slot = Some(at);
        }
    }

    /// Write the currently held keys to the keypad.
    pub fn fill(&self, keypad: &mut Keypad) {
        self.fill_at(keypad, Instant::now());
    }

    fn fill_at(&self, keypad: &mut Keypad, now: Instant) {
        for (key, pressed_at) in self.pressed_at.iter().enumerate() {
            let held = pressed_at.map_or(false, |at| now.duration_since(at) < self.timeout);
            keypad.set(key as u8, held);
        }
    }
}
