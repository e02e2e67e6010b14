//! The input latch: sixteen keys, written by the frontend and read by the CPU.

pub const NUM_KEYS: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    /// Keys outside `0x0..=0xF` are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = pressed;
        }
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    /// Whether `key` is held. Keys outside the keypad are never held.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lowest_key_wins() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_pressed(), None);
        keypad.press(0xC);
        keypad.press(0x3);
        assert_eq!(keypad.first_pressed(), Some(0x3));
        keypad.release(0x3);
        assert_eq!(keypad.first_pressed(), Some(0xC));
    }

    #[test]
    fn out_of_range_keys_are_ignored() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert!(!keypad.is_pressed(0x10));
        assert_eq!(keypad.first_pressed(), None);
    }
}
