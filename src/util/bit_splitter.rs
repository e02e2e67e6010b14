/// A structure for easily splitting an opcode into the fields
/// the instruction set addresses: the four nibbles, and the
/// `NNN`, `NN`, `N`, `X` and `Y` operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSplitter(u8, u8);

impl BitSplitter {

    pub fn from_u16(value: u16) -> BitSplitter {
        BitSplitter((value >> 8) as u8, (value & 0x00FF) as u8)
    }

    pub fn new(left: u8, right: u8) -> BitSplitter {
        BitSplitter(left, right)
    }

    /// Left-shift the first u8-component 8 bits,
    /// then take bitwise or with the second component
    /// in order to store the components in a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.0 as u16) << 8) | self.1 as u16
    }

    /// The four nibbles, most significant first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.0 >> 4, self.0 & 0x0F, self.1 >> 4, self.1 & 0x0F)
    }

    /// `NNN`, the lowest 12 bits.
    pub fn nnn(&self) -> u16 {
        self.as_u16() & 0x0FFF
    }

    /// `NN`, the lowest byte.
    pub fn nn(&self) -> u8 {
        self.1
    }

    /// `N`, the lowest nibble.
    pub fn n(&self) -> u8 {
        self.1 & 0x0F
    }

    /// `X`, the second nibble.
    pub fn x(&self) -> u8 {
        self.0 & 0x0F
    }

    /// `Y`, the third nibble.
    pub fn y(&self) -> u8 {
        self.1 >> 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn fields_of_known_opcode() {
        let opcode = BitSplitter::from_u16(0xABCD);
        assert_eq!(opcode.as_four_u8(), (0xA, 0xB, 0xC, 0xD));
        assert_eq!(opcode.nnn(), 0xBCD);
        assert_eq!(opcode.nn(), 0xCD);
        assert_eq!(opcode.n(), 0xD);
        assert_eq!(opcode.x(), 0xB);
        assert_eq!(opcode.y(), 0xC);
    }

    #[test]
    fn two_u8_equals_u16() {
        assert_eq!(BitSplitter::new(0x12, 0x34), BitSplitter::from_u16(0x1234));
        assert_eq!(BitSplitter::new(0xFF, 0x00).as_u16(), 0xFF00);
    }

    proptest! {
        #[test]
        fn fields_match_masks(word in any::<u16>()) {
            let opcode = BitSplitter::from_u16(word);
            prop_assert_eq!(opcode.as_u16(), word);
            prop_assert_eq!(opcode.nnn(), word & 0xFFF);
            prop_assert_eq!(opcode.nn() as u16, word & 0xFF);
            prop_assert_eq!(opcode.n() as u16, word & 0xF);
            prop_assert_eq!(opcode.x() as u16, (word >> 8) & 0xF);
            prop_assert_eq!(opcode.y() as u16, (word >> 4) & 0xF);
        }
    }
}
