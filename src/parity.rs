//! LNAV (32, 26) Hamming parity, data inversion and reserved bits solving.
//!
//! Data bits are numbered d1..d24, d1 being the first transmitted bit
//! (the MSB of the 24-bit data word). D29* and D30* are the last two
//! bits of the previously transmitted word.
use crate::word::Word;

/// Parity mask, from the data bit numbers taking part in the equation.
const fn mask(bits: &[u8]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < bits.len() {
        mask |= 1 << (24 - bits[i] as u32);
        i += 1;
    }
    mask
}

const D25_MASK: u32 = mask(&[1, 2, 3, 5, 6, 10, 11, 12, 13, 14, 17, 18, 20, 23]);
const D26_MASK: u32 = mask(&[2, 3, 4, 6, 7, 11, 12, 13, 14, 15, 18, 19, 21, 24]);
const D27_MASK: u32 = mask(&[1, 3, 4, 5, 7, 8, 12, 13, 14, 15, 16, 19, 20, 22]);
const D28_MASK: u32 = mask(&[2, 4, 5, 6, 8, 9, 13, 14, 15, 16, 17, 20, 21, 23]);
const D29_MASK: u32 = mask(&[1, 3, 5, 6, 7, 9, 10, 14, 15, 16, 17, 18, 21, 22, 24]);
const D30_MASK: u32 = mask(&[3, 5, 6, 8, 9, 10, 11, 13, 15, 19, 22, 23, 24]);

const DATA_MASK: u32 = 0x00ff_ffff;

/// [ChainState] is the (D29, D30) pair of the last transmitted word,
/// seeding the parity (and inversion) of the following word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainState {
    /// D29*
    pub d29: bool,
    /// D30*
    pub d30: bool,
}

impl ChainState {
    pub const fn new(d29: bool, d30: bool) -> Self {
        Self { d29, d30 }
    }

    /// Chain state of a subframe whose last word carries solved bits,
    /// and of the very first word of a message.
    pub const fn zero() -> Self {
        Self::new(false, false)
    }
}

/// XOR sum of the masked data bits
const fn xor_sum(data: u32, mask: u32) -> bool {
    (data & mask).count_ones() & 0x01 == 1
}

/// Computes D25..D30 (right justified, D30 being the LSB)
/// for 24 logical (not inverted) data bits.
pub const fn parity(data: u32, prev: ChainState) -> u32 {
    let data = data & DATA_MASK;
    let d25 = prev.d29 ^ xor_sum(data, D25_MASK);
    let d26 = prev.d30 ^ xor_sum(data, D26_MASK);
    let d27 = prev.d29 ^ xor_sum(data, D27_MASK);
    let d28 = prev.d30 ^ xor_sum(data, D28_MASK);
    let d29 = prev.d30 ^ xor_sum(data, D29_MASK);
    let d30 = prev.d29 ^ xor_sum(data, D30_MASK);
    (d25 as u32) << 5
        | (d26 as u32) << 4
        | (d27 as u32) << 3
        | (d28 as u32) << 2
        | (d29 as u32) << 1
        | d30 as u32
}

/// Encodes 24 logical data bits into a transmitted [Word].
/// Data bits are complemented when D30* is set, parity bits never are.
pub const fn encode_word(data: u32, prev: ChainState) -> Word {
    let data = data & DATA_MASK;
    let parity = parity(data, prev);
    let transmitted = if prev.d30 { !data & DATA_MASK } else { data };
    Word::from_raw(transmitted << 6 | parity)
}

/// Solves bits 23 and 24 of a word whose content is only 22 bits long,
/// so that its D29 and D30 come out as zero.
/// Returns (d23, d24) right justified.
pub const fn solve_reserved(bits_1_22: u32, prev: ChainState) -> u32 {
    let data = (bits_1_22 << 2) & DATA_MASK;
    // d24 only appears in the D29 equation with d1..d22
    let d24 = prev.d30 ^ xor_sum(data, D29_MASK);
    // d23 then cancels the D30 equation, d24 included
    let d23 = prev.d29 ^ xor_sum(data, D30_MASK) ^ d24;
    (d23 as u32) << 1 | d24 as u32
}
