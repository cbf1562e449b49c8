//! Navigation message encoder: frames 1 to 25
use log::{debug, warn};

use crate::{
    almanac::Almanac,
    constants::{DEFAULT_MESSAGE, FRAMES, MESSAGE_BITS, SUBFRAMES, TOW_COUNT_PERIOD_S},
    ephemeris::Ephemeris,
    field::ScaledField,
    ionosphere::IonosphereUtc,
    page::{Page, PageSource},
    subframe::{HandOverWord, Subframe},
    word::Word,
    Error,
};

use gnss::prelude::SV;
use hifitime::Epoch;

/// Recoverable conditions met while encoding.
/// They never prevent a complete message from being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// Almanac page of `prn` was replaced by a dummy page
    MissingAlmanacData { prn: u8, frame: u8, subframe: u8 },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::MissingAlmanacData {
                prn,
                frame,
                subframe,
            } => write!(
                f,
                "missing almanac data for PRN{:02} (frame {}, subframe {})",
                prn, frame, subframe
            ),
        }
    }
}

/// [Frame] is 5 subframes (1500 bits)
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Frame number (1..=25)
    pub number: u8,
    /// Subframes 1 to 5
    pub subframes: [Subframe; SUBFRAMES],
    /// Pages carried by subframes 4 and 5
    pub pages: (Page, Page),
    /// Conditions met while encoding this frame
    pub diagnostics: Vec<Diagnostic>,
}

impl Frame {
    /// Transmitted words, in order
    pub fn words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.subframes.iter().flat_map(|sf| sf.words().iter())
    }

    /// Bit iterator, first transmitted bit first
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.subframes.iter().flat_map(|sf| sf.bits())
    }
}

/// [NavMessage] is a complete message: 25 frames, 37,500 bits.
#[derive(Debug, Clone, PartialEq)]
pub struct NavMessage {
    sv: SV,
    frames: Vec<Frame>,
}

impl NavMessage {
    /// Satellite this message was generated for
    pub fn sv(&self) -> SV {
        self.sv
    }

    /// Frames 1 to 25
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Transmitted words, in order
    pub fn words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.frames.iter().flat_map(|f| f.words())
    }

    /// Bit iterator (0 or 1), first transmitted bit first
    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        self.frames.iter().flat_map(|f| f.bits())
    }

    /// Message length, in bits
    pub fn len(&self) -> usize {
        self.frames.len() * crate::constants::FRAME_BITS
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All conditions met while encoding
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.frames.iter().flat_map(|f| f.diagnostics.iter())
    }
}

/// [Encoder] builds the LNAV message of one satellite.
/// It only borrows its ephemeris and almanac.
#[derive(Debug, Clone)]
pub struct Encoder<'a> {
    ephemeris: &'a Ephemeris,
    almanac: &'a Almanac,
    ionosphere: IonosphereUtc,
    message: String,
}

impl<'a> Encoder<'a> {
    /// Builds an [Encoder] for `ephemeris.sv`, with default
    /// ionosphere/UTC parameters and special message.
    pub fn new(ephemeris: &'a Ephemeris, almanac: &'a Almanac) -> Self {
        Self {
            ephemeris,
            almanac,
            ionosphere: IonosphereUtc::default(),
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    /// Builds an [Encoder] from the record published for `sv` at `epoch`.
    pub fn from_records(
        records: &'a [Ephemeris],
        sv: SV,
        epoch: Epoch,
        almanac: &'a Almanac,
    ) -> Result<Self, Error> {
        let ephemeris = Ephemeris::select(records, sv, epoch)?;
        Ok(Self::new(ephemeris, almanac))
    }

    /// Copies and returns [Encoder] with given special message.
    /// Text is truncated or space padded to 22 characters.
    pub fn with_message(&self, message: &str) -> Self {
        let mut s = self.clone();
        s.message = message.to_string();
        s
    }

    /// Copies and returns [Encoder] with given ionosphere/UTC parameters
    pub fn with_ionosphere(&self, ionosphere: IonosphereUtc) -> Self {
        let mut s = self.clone();
        s.ionosphere = ionosphere;
        s
    }

    /// Satellite being encoded
    pub fn sv(&self) -> SV {
        self.ephemeris.sv
    }

    /// TOW count of the first subframe of the message
    fn tow_origin(&self) -> Result<u32, Error> {
        let count = (self.ephemeris.transmission_time / TOW_COUNT_PERIOD_S).round_ties_even();
        let field = ScaledField::unsigned("how_tow", count, 17).encode()?;
        Ok(field.raw())
    }

    /// Builds frame `number` (1..=25)
    pub fn build_frame(&self, number: u8) -> Result<Frame, Error> {
        if !(1..=FRAMES as u8).contains(&number) {
            return Err(Error::InvalidFrame(number));
        }

        let source = PageSource {
            almanac: self.almanac,
            ionosphere: &self.ionosphere,
            message: &self.message,
        };

        let sf4 = Page::subframe4(number)?.resolve(self.almanac);
        let sf5 = Page::subframe5(number)?.resolve(self.almanac);
        debug!("{}({}) - frame #{}: {} | {}", self.sv(), self.ephemeris.toc, number, sf4, sf5);

        let mut diagnostics = Vec::new();
        for (subframe, page) in [(4, sf4), (5, sf5)] {
            if let Page::MissingAlmanac(prn) = page {
                let diag = Diagnostic::MissingAlmanacData {
                    prn,
                    frame: number,
                    subframe,
                };
                warn!("{}: {}", self.sv(), diag);
                diagnostics.push(diag);
            }
        }

        let contents = [
            self.ephemeris.subframe1()?,
            self.ephemeris.subframe2()?,
            self.ephemeris.subframe3()?,
            sf4.data_words(&source)?,
            sf5.data_words(&source)?,
        ];

        let tow = self.tow_origin()? + (number as u32 - 1) * SUBFRAMES as u32;
        let build = |index: usize| {
            let id = index as u8 + 1;
            let how = HandOverWord::new(tow + id as u32, id);
            Subframe::build(&how, &contents[index])
        };
        let subframes = [build(0)?, build(1)?, build(2)?, build(3)?, build(4)?];

        Ok(Frame {
            number,
            subframes,
            pages: (sf4, sf5),
            diagnostics,
        })
    }

    /// Builds the complete message: frames 1 to 25.
    /// Any encoding error aborts the whole message.
    pub fn encode(&self) -> Result<NavMessage, Error> {
        let frames = (1..=FRAMES as u8)
            .map(|n| self.build_frame(n))
            .collect::<Result<Vec<_>, _>>()?;

        let message = NavMessage {
            sv: self.sv(),
            frames,
        };

        debug_assert_eq!(message.len(), MESSAGE_BITS);
        debug!(
            "{}({}) - encoded {} bits, {} diagnostic(s)",
            self.sv(),
            self.ephemeris.toc,
            message.len(),
            message.diagnostics().count()
        );
        Ok(message)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::toolkit::{g05_almanac, g05_ephemeris};

    #[test]
    fn invalid_frame_numbers() {
        let eph = g05_ephemeris();
        let almanac = g05_almanac();
        let encoder = Encoder::new(&eph, &almanac);
        for n in [0, 26] {
            match encoder.build_frame(n) {
                Err(Error::InvalidFrame(f)) => assert_eq!(f, n),
                other => panic!("frame {} should be rejected, got {:?}", n, other),
            }
        }
    }

    #[test]
    fn hand_over_word_tow() {
        let eph = g05_ephemeris();
        let almanac = g05_almanac();
        let encoder = Encoder::new(&eph, &almanac);

        // 518418 / 6 = 86403
        let frame = encoder.build_frame(3).unwrap();
        for (index, subframe) in frame.subframes.iter().enumerate() {
            let how = subframe.words()[1];
            let tow = how.data() >> 7;
            assert_eq!(tow, 86_403 + 2 * 5 + index as u32 + 1);
            assert_eq!(subframe.id() as usize, index + 1);
        }
    }

    #[test]
    fn frame_pages() {
        let eph = g05_ephemeris();
        let almanac = g05_almanac();
        let encoder = Encoder::new(&eph, &almanac);

        let frame = encoder.build_frame(5).unwrap();
        assert_eq!(frame.pages, (Page::MissingAlmanac(28), Page::Almanac(5)));
        assert_eq!(
            frame.diagnostics,
            vec![Diagnostic::MissingAlmanacData {
                prn: 28,
                frame: 5,
                subframe: 4
            }]
        );
    }

    #[test]
    fn tow_overflow() {
        let mut eph = g05_ephemeris();
        eph.transmission_time = -60.0;
        let almanac = g05_almanac();
        let encoder = Encoder::new(&eph, &almanac);
        match encoder.encode() {
            Err(Error::FieldOverflow { field, .. }) => assert_eq!(field, "how_tow"),
            other => panic!("expecting TOW overflow, got {:?}", other),
        }
    }

    #[test]
    fn diagnostic_display() {
        let diag = Diagnostic::MissingAlmanacData {
            prn: 7,
            frame: 7,
            subframe: 5,
        };
        assert_eq!(
            diag.to_string(),
            "missing almanac data for PRN07 (frame 7, subframe 5)"
        );
    }
}
