//! LNAV constants

/// Value of pi to be used when converting radians to semicircles
/// (IS-GPS-200 20.3.3.4.3).
pub const GPS_PI: f64 = 3.1415926535898;

/// Number of frames in a complete message (one almanac cycle).
pub const FRAMES: usize = 25;

/// Number of subframes per frame.
pub const SUBFRAMES: usize = 5;

/// Number of words per subframe.
pub const WORDS: usize = 10;

/// Word length in bits, parity included.
pub const WORD_BITS: usize = 30;

/// Number of data bits per word.
pub const DATA_BITS: usize = 24;

/// Subframe length in bits.
pub const SUBFRAME_BITS: usize = WORDS * WORD_BITS;

/// Frame length in bits.
pub const FRAME_BITS: usize = SUBFRAMES * SUBFRAME_BITS;

/// Complete message length in bits.
pub const MESSAGE_BITS: usize = FRAMES * FRAME_BITS;

/// TLM preamble `10001011`.
pub const PREAMBLE: u32 = 0x8b;

/// Subframe 4 & 5 data id (LNAV).
pub const DATA_ID: u32 = 0b01;

/// Seconds per HOW time of week count.
pub const TOW_COUNT_PERIOD_S: f64 = 6.0;

/// Message transmitted on the special message page when
/// none is provided.
pub const DEFAULT_MESSAGE: &str = "No message sent";

/// Health reported for satellites absent from the almanac.
pub const UNKNOWN_HEALTH: u8 = 0x3f;

/// A-S configuration reported for satellites absent from the almanac.
pub const UNKNOWN_CONFIGURATION: u8 = 0x0f;

/// Highest PRN described in the almanac pages.
pub const MAX_PRN: u8 = 32;
