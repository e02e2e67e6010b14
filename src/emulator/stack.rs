//! The call stack holding subroutine return addresses.

pub const STACK_SIZE: usize = 16;

/// A bounded LIFO of return addresses with an explicit depth.
#[derive(Debug, Clone)]
pub struct Stack {
    addresses: [u16; STACK_SIZE],
    depth: usize,
}

impl Stack {
    pub fn new() -> Stack {
        Stack {
            addresses: [0; STACK_SIZE],
            depth: 0,
        }
    }

    /// Push a return address. Returns `None` if the stack is full.
    pub fn push(&mut self, address: u16) -> Option<()> {
        let slot = self.addresses.get_mut(self.depth)?;
        *slot = address;
        self.depth += 1;
        Some(())
    }

    /// Pop the most recent return address, or `None` if empty.
    pub fn pop(&mut self) -> Option<u16> {
        self.depth = self.depth.checked_sub(1)?;
        Some(self.addresses[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }

    pub fn clear(&mut self) {
        self.depth = 0;
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_then_pop_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x404).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), Some(0x404));
        assert_eq!(stack.pop(), Some(0x202));
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_from_empty_is_none() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn push_beyond_capacity_is_none() {
        let mut stack = Stack::new();
        for i in 0..STACK_SIZE {
            assert_eq!(stack.push(i as u16), Some(()));
        }
        assert_eq!(stack.push(0xFFF), None);
        assert_eq!(stack.depth(), STACK_SIZE);
        assert_eq!(stack.pop(), Some(STACK_SIZE as u16 - 1));
    }
}
