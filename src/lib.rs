#![doc(html_logo_url = "https://raw.githubusercontent.com/rtk-rs/.github/master/logos/logo2.jpg")]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! GPS LNAV navigation message generation.
//!
//! This crate encodes ephemeris, almanac and ionosphere/UTC parameters
//! into the legacy GPS navigation message (IS-GPS-200): 25 frames of
//! 5 subframes of 10 thirty-bit words, 37,500 bits in total,
//! with the (32, 26) Hamming parity chained from word to word.
//!
//! ```no_run
//! use lnav::prelude::*;
//! use std::str::FromStr;
//!
//! let nav = NavigationFile::from_file("brdc0830.24n").unwrap();
//! let almanac = sem::from_file("current.alm").unwrap();
//!
//! let sv = SV::from_str("G05").unwrap();
//! let epoch = Epoch::from_str("2024-03-23T02:00:00 GPST").unwrap();
//!
//! let message = Encoder::from_records(&nav.ephemerides, sv, epoch, &almanac)
//!     .unwrap()
//!     .with_ionosphere(nav.ionosphere)
//!     .with_message("hello from G05")
//!     .encode()
//!     .unwrap();
//!
//! assert_eq!(message.bits().count(), 37_500);
//! ```

extern crate gnss_rs as gnss;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub mod almanac;
pub mod constants;
pub mod encoder;
pub mod ephemeris;
pub mod error;
pub mod field;
pub mod formatting;
pub mod ionosphere;
pub mod page;
pub mod parity;
pub mod parsing;
pub mod subframe;
pub mod word;

#[cfg(test)]
mod tests;

pub use error::{Error, ParsingError};

/// Package to include all basic structures
pub mod prelude {
    pub use crate::almanac::{Almanac, AlmanacRecord};
    pub use crate::encoder::{Diagnostic, Encoder, Frame, NavMessage};
    pub use crate::ephemeris::Ephemeris;
    pub use crate::error::{Error, ParsingError};
    pub use crate::field::{BitField, ScaledField};
    pub use crate::ionosphere::IonosphereUtc;
    pub use crate::page::Page;
    pub use crate::parity::ChainState;
    pub use crate::parsing::rinex::NavigationFile;
    pub use crate::parsing::sem;
    pub use crate::subframe::{HandOverWord, Subframe};
    pub use crate::word::{DataWord, Payload, Word};
    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Epoch, TimeScale};
}
