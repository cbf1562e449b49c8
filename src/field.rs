//! Fixed-point field encoding
use crate::Error;

/// Length of the special message, in characters.
pub const MESSAGE_CHARS: usize = 22;

/// [ScaledField] is a physical quantity awaiting its fixed point
/// representation: `round(value / scale)` over `bits` bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledField {
    /// Field name, reported on overflow
    pub name: &'static str,
    /// Physical value
    pub value: f64,
    /// Field width
    pub bits: u8,
    /// Scale factor (LSB weight)
    pub scale: f64,
    /// Two's complement representation
    pub signed: bool,
}

impl ScaledField {
    /// Unsigned field with unit scale factor
    pub fn unsigned(name: &'static str, value: f64, bits: u8) -> Self {
        Self {
            name,
            value,
            bits,
            scale: 1.0,
            signed: false,
        }
    }

    /// Two's complement field with unit scale factor
    pub fn signed(name: &'static str, value: f64, bits: u8) -> Self {
        Self {
            signed: true,
            ..Self::unsigned(name, value, bits)
        }
    }

    /// Copies and returns [ScaledField] with given scale factor
    pub fn with_scale(&self, scale: f64) -> Self {
        let mut s = *self;
        s.scale = scale;
        s
    }

    /// Copies and returns [ScaledField] with a `2^exponent` scale factor
    pub fn with_pow2_scale(&self, exponent: i32) -> Self {
        self.with_scale(2.0_f64.powi(exponent))
    }

    /// Smallest and largest integer this field may carry
    pub fn range(&self) -> (i64, i64) {
        if self.signed {
            (-(1_i64 << (self.bits - 1)), (1_i64 << (self.bits - 1)) - 1)
        } else {
            (0, (1_i64 << self.bits) - 1)
        }
    }

    /// Encodes this field. Rounding is half-to-even.
    pub fn encode(&self) -> Result<BitField, Error> {
        let (min, max) = self.range();
        let overflow = Error::FieldOverflow {
            field: self.name,
            value: self.value,
            bits: self.bits,
            min,
            max,
        };

        let scaled = (self.value / self.scale).round_ties_even();
        if !scaled.is_finite() || scaled < min as f64 || scaled > max as f64 {
            return Err(overflow);
        }

        Ok(BitField::from_signed(scaled as i64, self.bits))
    }
}

/// [BitField] is an encoded field: `bits` raw bits, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    raw: u32,
    bits: u8,
}

impl BitField {
    /// Builds a [BitField] from the `bits` LSBs of `raw`.
    pub fn new(raw: u32, bits: u8) -> Self {
        debug_assert!(bits <= 32, "fields are 32 bits at most");
        Self {
            raw: raw & Self::mask(bits),
            bits,
        }
    }

    /// `bits` zeros
    pub fn zeros(bits: u8) -> Self {
        Self::new(0, bits)
    }

    /// Repeats `pattern` (`width` bits) `count` times
    pub fn repeat(pattern: u32, width: u8, count: u8) -> Self {
        let raw = (0..count).fold(0, |acc, _| (acc << width) | pattern);
        Self::new(raw, width * count)
    }

    /// Two's complement of `value` over `bits` bits
    pub(crate) fn from_signed(value: i64, bits: u8) -> Self {
        Self::new(value as u32, bits)
    }

    fn mask(bits: u8) -> u32 {
        if bits >= 32 {
            u32::MAX
        } else {
            (1 << bits) - 1
        }
    }

    /// Raw bits, right justified
    pub fn raw(&self) -> u32 {
        self.raw
    }

    /// Width
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Two's complement interpretation, used to decode
    /// a field back when verifying scale factors.
    pub fn to_signed(&self) -> i64 {
        let sign = 1_i64 << (self.bits - 1);
        let raw = self.raw as i64;
        (raw ^ sign) - sign
    }

    /// `n` most significant bits
    pub fn msb(&self, n: u8) -> Self {
        debug_assert!(n <= self.bits);
        Self::new(self.raw >> (self.bits - n), n)
    }

    /// `n` least significant bits
    pub fn lsb(&self, n: u8) -> Self {
        debug_assert!(n <= self.bits);
        Self::new(self.raw, n)
    }

    /// Bit iterator, MSB first
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.bits)
            .rev()
            .map(move |i| ((self.raw >> i) & 0x01) as u8)
    }
}

/// Encodes the special message text: one byte per character,
/// truncated or space padded to 22 characters. Characters
/// that do not fit a byte are sent as `?`.
pub fn encode_text(text: &str) -> [u8; MESSAGE_CHARS] {
    let mut buf = [b' '; MESSAGE_CHARS];
    for (dst, c) in buf.iter_mut().zip(text.chars()) {
        *dst = u8::try_from(u32::from(c)).unwrap_or(b'?');
    }
    buf
}

/// Special message as bit fields, one per character.
pub fn text_fields(text: &str) -> [BitField; MESSAGE_CHARS] {
    encode_text(text).map(|c| BitField::new(c as u32, 8))
}
