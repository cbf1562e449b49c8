use crate::prelude::*;

/// 24 bit content of a [DataWord], prior parity encoding.
/// Solved bits come out as zeros.
pub fn data_word_content(word: &DataWord) -> u32 {
    match word {
        DataWord::Full(data) => *data,
        DataWord::Solved(bits) => bits << 2,
    }
}

/// Logical (not inverted) data bits of all words of a [Subframe]
pub fn logical_words(subframe: &Subframe) -> [u32; 10] {
    let mut content = [0; 10];
    let mut state = ChainState::zero();
    for (dst, word) in content.iter_mut().zip(subframe.words()) {
        *dst = word.logical_data(state);
        state = word.chain_state();
    }
    content
}

/// Panics if any word of this [NavMessage] has inconsistent parity,
/// the first word being seeded with (0, 0).
pub fn is_parity_consistent(message: &NavMessage) {
    let mut state = ChainState::zero();
    for (index, word) in message.words().enumerate() {
        if !word.check(state) {
            panic!(
                "word #{} ({}) parity is not consistent with {:?}",
                index, word, state
            );
        }
        state = word.chain_state();
    }
}

/// Decodes the 22 character special message of subframe 4 page 17
pub fn special_message(subframe: &Subframe) -> String {
    let words = logical_words(subframe);
    let mut bits: Vec<u8> = Vec::with_capacity(176);
    let mut push = |value: u32, len: usize| {
        for i in (0..len).rev() {
            bits.push(((value >> i) & 0x01) as u8);
        }
    };
    push(words[2] & 0xffff, 16);
    for word in &words[3..9] {
        push(*word, 24);
    }
    push(words[9] >> 8, 16);

    bits.chunks(8)
        .map(|byte| byte.iter().fold(0_u8, |acc, b| acc << 1 | b) as char)
        .collect()
}
