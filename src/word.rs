//! LNAV words
use crate::{
    constants::{DATA_BITS, WORD_BITS},
    field::BitField,
    parity::{encode_word, parity, solve_reserved, ChainState},
};

const WORD_MASK: u32 = 0x3fff_ffff;

/// [Word] is a transmitted 30-bit word: 24 (possibly inverted)
/// data bits followed by D25..D30. D1 is the MSB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word(u32);

impl Word {
    /// Builds a [Word] from its 30 right justified bits
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & WORD_MASK)
    }

    /// 30 right justified bits
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Transmitted data bits d1..d24
    pub const fn data(&self) -> u32 {
        self.0 >> 6
    }

    /// D25..D30
    pub const fn parity(&self) -> u32 {
        self.0 & 0x3f
    }

    /// (D29, D30) seeding the following word
    pub const fn chain_state(&self) -> ChainState {
        ChainState::new(self.0 & 0x02 > 0, self.0 & 0x01 > 0)
    }

    /// Bit `n`, 1 being the first transmitted bit.
    pub fn bit(&self, n: usize) -> u8 {
        debug_assert!((1..=WORD_BITS).contains(&n));
        ((self.0 >> (WORD_BITS - n)) & 0x01) as u8
    }

    /// Bit iterator, first transmitted bit first
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=WORD_BITS).map(move |n| self.bit(n))
    }

    /// Logical data bits, once inversion is undone
    pub fn logical_data(&self, prev: ChainState) -> u32 {
        if prev.d30 {
            !self.data() & 0x00ff_ffff
        } else {
            self.data()
        }
    }

    /// Verifies that our parity bits are consistent with our data
    /// bits, considering given previous word state.
    pub fn check(&self, prev: ChainState) -> bool {
        parity(self.logical_data(prev), prev) == self.parity()
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:030b}", self.0)
    }
}

/// [DataWord] is the logical content of words 3 to 10,
/// prior parity encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataWord {
    /// 24 data bits
    Full(u32),
    /// 22 data bits: bits 23 and 24 are solved
    /// so that D29 and D30 come out as zero.
    Solved(u32),
}

impl DataWord {
    /// Encodes this content, chained to previous word
    pub fn encode(&self, prev: ChainState) -> Word {
        match self {
            Self::Full(data) => encode_word(*data, prev),
            Self::Solved(bits) => encode_word(bits << 2 | solve_reserved(*bits, prev), prev),
        }
    }
}

/// [Payload] packs [BitField]s, MSB first, into a [DataWord].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    raw: u32,
    len: u8,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends given field
    pub fn push(mut self, field: BitField) -> Self {
        debug_assert!(
            self.len as usize + field.bits() as usize <= DATA_BITS,
            "payload overflow"
        );
        self.raw = self.raw << field.bits() | field.raw();
        self.len += field.bits();
        self
    }

    /// Appends `bits` zeros
    pub fn zeros(self, bits: u8) -> Self {
        self.push(BitField::zeros(bits))
    }

    /// Number of bits pushed so far
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Turns a 24 bit payload into a [DataWord::Full]
    pub fn full(self) -> DataWord {
        debug_assert_eq!(self.len, 24, "full words carry 24 bits");
        DataWord::Full(self.raw)
    }

    /// Turns a 22 bit payload into a [DataWord::Solved]
    pub fn solved(self) -> DataWord {
        debug_assert_eq!(self.len, 22, "solved words carry 22 bits");
        DataWord::Solved(self.raw)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn payload_packing() {
        let data = Payload::new()
            .push(BitField::new(0b01, 2))
            .push(BitField::new(57, 6))
            .zeros(16)
            .full();
        assert_eq!(data, DataWord::Full(0b01_111001 << 16));
    }

    #[test]
    fn solved_word() {
        let data = Payload::new().zeros(22).solved();
        for prev in [ChainState::zero(), ChainState::new(true, true)] {
            let word = data.encode(prev);
            assert!(word.check(prev));
            assert_eq!(word.chain_state(), ChainState::zero());
        }
    }

    #[test]
    fn word_bits() {
        let word = Word::from_raw(0x22c0_0012);
        let bits: Vec<u8> = word.bits().collect();
        assert_eq!(bits.len(), 30);
        assert_eq!(&bits[..8], &[1, 0, 0, 0, 1, 0, 1, 1]);
        assert_eq!(&bits[24..], &[0, 1, 0, 0, 1, 0]);
        assert_eq!(word.to_string(), "100010110000000000000000010010");
        assert_eq!(word.chain_state(), ChainState::new(true, false));
    }
}
