//! LNAV subframes: TLM, HOW and 8 data words
use crate::{
    constants::{PREAMBLE, SUBFRAME_BITS, WORDS},
    field::{BitField, ScaledField},
    parity::{encode_word, ChainState},
    word::{DataWord, Payload, Word},
    Error,
};

/// Telemetry word: preamble followed by a null TLM message,
/// integrity and reserved bits, encoded with a (0, 0) seed.
/// Every subframe ends with solved bits, so this seed holds
/// for every subframe of the message.
pub const TELEMETRY: Word = encode_word(PREAMBLE << 16, ChainState::zero());

/// [HandOverWord] is the second word of each subframe
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HandOverWord {
    /// Truncated time of week count (6 s units) of the next subframe start
    pub tow_count: u32,
    /// Alert flag
    pub alert: bool,
    /// Anti-spoofing flag
    pub anti_spoofing: bool,
    /// Subframe ID (1..=5)
    pub subframe_id: u8,
}

impl HandOverWord {
    /// Builds a [HandOverWord] with alert and A-S flags cleared
    pub fn new(tow_count: u32, subframe_id: u8) -> Self {
        Self {
            tow_count,
            subframe_id,
            alert: false,
            anti_spoofing: false,
        }
    }

    /// Logical content (22 bits + solved bits)
    pub fn data_word(&self) -> Result<DataWord, Error> {
        let tow = ScaledField::unsigned("how_tow", self.tow_count as f64, 17).encode()?;
        let subframe_id = ScaledField::unsigned("subframe_id", self.subframe_id as f64, 3).encode()?;
        Ok(Payload::new()
            .push(tow)
            .push(BitField::new(self.alert as u32, 1))
            .push(BitField::new(self.anti_spoofing as u32, 1))
            .push(subframe_id)
            .solved())
    }
}

/// [Subframe] is 10 transmitted words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subframe {
    words: [Word; WORDS],
}

impl Subframe {
    /// Assembles a [Subframe]: telemetry word, hand over word
    /// and given data words (words 3 to 10), chained in order.
    pub fn build(how: &HandOverWord, data: &[DataWord; 8]) -> Result<Self, Error> {
        let mut words = [TELEMETRY; WORDS];
        let mut state = TELEMETRY.chain_state();

        let how = how.data_word()?;
        for (word, content) in words[1..].iter_mut().zip(std::iter::once(&how).chain(data)) {
            *word = content.encode(state);
            state = word.chain_state();
        }

        Ok(Self { words })
    }

    /// Transmitted words
    pub fn words(&self) -> &[Word; WORDS] {
        &self.words
    }

    /// Subframe ID, as encoded in the HOW
    pub fn id(&self) -> u8 {
        let prev = self.words[0].chain_state();
        ((self.words[1].logical_data(prev) >> 2) & 0x07) as u8
    }

    /// Bit iterator, first transmitted bit first
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.words.iter().flat_map(|w| w.bits())
    }

    /// Subframe length, in bits
    pub const fn len() -> usize {
        SUBFRAME_BITS
    }

    /// Verifies parity of every word, starting from the telemetry word
    /// chained to `prev`.
    pub fn check(&self, prev: ChainState) -> bool {
        let mut state = prev;
        for word in self.words.iter() {
            if !word.check(state) {
                return false;
            }
            state = word.chain_state();
        }
        true
    }
}
