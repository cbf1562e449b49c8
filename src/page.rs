//! Subframe 4 & 5 page selection and generic page layouts
use log::warn;

use crate::{
    almanac::Almanac,
    constants::{DATA_ID, FRAMES},
    field::{text_fields, BitField},
    ionosphere::IonosphereUtc,
    word::{DataWord, Payload},
    Error,
};

/// Page ID of the NMCT page (subframe 4 page 13)
pub const CORRECTION_TABLE_ID: u8 = 52;

/// Page ID of the special message page (subframe 4 page 17)
pub const SPECIAL_MESSAGE_ID: u8 = 55;

/// [Page] is the content of subframe 4 or 5 in a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Almanac of given PRN
    Almanac(u8),
    /// Almanac page of given PRN, sent as a dummy page because
    /// this satellite is missing from the almanac
    MissingAlmanac(u8),
    /// Reserved page, with given SV (page) ID
    Reserved(u8),
    /// Navigation message correction table
    CorrectionTable,
    /// Special message
    SpecialMessage,
    /// Ionosphere model and UTC parameters
    IonosphereUtc,
    /// Subframe 4 page 25: A-S flags, SV configurations
    /// and health of PRN 25 to 32
    ConfigurationHealth,
    /// Subframe 5 page 25: almanac reference time
    /// and health of PRN 1 to 24
    AlmanacReference,
}

/// Everything a page may need to be encoded
#[derive(Debug, Clone, Copy)]
pub struct PageSource<'a> {
    pub almanac: &'a Almanac,
    pub ionosphere: &'a IonosphereUtc,
    pub message: &'a str,
}

impl Page {
    /// Page carried by subframe 4 in given frame (1..=25)
    pub fn subframe4(frame: u8) -> Result<Self, Error> {
        Self::check_frame(frame)?;
        Ok(match frame {
            1 | 6 | 11 | 16 | 21 => Self::Reserved(57),
            12 | 24 => Self::Reserved(62),
            14 => Self::Reserved(53),
            15 => Self::Reserved(54),
            19 => Self::Reserved(58),
            20 => Self::Reserved(59),
            22 => Self::Reserved(60),
            23 => Self::Reserved(61),
            13 => Self::CorrectionTable,
            17 => Self::SpecialMessage,
            18 => Self::IonosphereUtc,
            25 => Self::ConfigurationHealth,
            2..=5 => Self::Almanac(frame + 23),
            _ => Self::Almanac(frame + 22),
        })
    }

    /// Page carried by subframe 5 in given frame (1..=25)
    pub fn subframe5(frame: u8) -> Result<Self, Error> {
        Self::check_frame(frame)?;
        if frame == FRAMES as u8 {
            Ok(Self::AlmanacReference)
        } else {
            Ok(Self::Almanac(frame))
        }
    }

    fn check_frame(frame: u8) -> Result<(), Error> {
        if (1..=FRAMES as u8).contains(&frame) {
            Ok(())
        } else {
            Err(Error::InvalidFrame(frame))
        }
    }

    /// Replaces an almanac page by a dummy page,
    /// when given [Almanac] misses this PRN.
    pub fn resolve(self, almanac: &Almanac) -> Self {
        match self {
            Self::Almanac(prn) if almanac.get(prn).is_none() => Self::MissingAlmanac(prn),
            page => page,
        }
    }

    /// SV (page) ID encoded in word 3. Almanac pages carry the PRN,
    /// dummy almanac pages carry 0.
    pub fn sv_id(&self) -> u8 {
        match self {
            Self::Almanac(prn) => *prn,
            Self::MissingAlmanac(_) => 0,
            Self::Reserved(id) => *id,
            Self::CorrectionTable => CORRECTION_TABLE_ID,
            Self::SpecialMessage => SPECIAL_MESSAGE_ID,
            Self::IonosphereUtc => crate::ionosphere::PAGE_ID as u8,
            Self::ConfigurationHealth => crate::almanac::SF4_PAGE25_ID as u8,
            Self::AlmanacReference => crate::almanac::SF5_PAGE25_ID as u8,
        }
    }

    /// Encodes words 3 to 10 of this page.
    /// An almanac page for a PRN the [Almanac] does not describe
    /// comes out as a dummy page: [Page::resolve] it first to keep track of it.
    pub fn data_words(&self, source: &PageSource) -> Result<[DataWord; 8], Error> {
        match self {
            Self::Almanac(prn) => match source.almanac.page(*prn) {
                Some(words) => words,
                None => {
                    warn!("PRN{:02}: no almanac data, sending dummy page", prn);
                    Ok(Almanac::dummy_page())
                },
            },
            Self::MissingAlmanac(_) => Ok(Almanac::dummy_page()),
            Self::Reserved(id) => Ok(reserved_page(*id)),
            Self::CorrectionTable => Ok(correction_table_page()),
            Self::SpecialMessage => Ok(special_message_page(source.message)),
            Self::IonosphereUtc => source.ionosphere.data_words(),
            Self::ConfigurationHealth => source.almanac.configuration_health_page(),
            Self::AlmanacReference => source.almanac.reference_health_page(),
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Almanac(prn) => write!(f, "almanac (PRN{:02})", prn),
            Self::MissingAlmanac(prn) => write!(f, "dummy almanac (PRN{:02})", prn),
            Self::Reserved(id) => write!(f, "reserved (ID {})", id),
            Self::CorrectionTable => write!(f, "NMCT"),
            Self::SpecialMessage => write!(f, "special message"),
            Self::IonosphereUtc => write!(f, "ionosphere/UTC"),
            Self::ConfigurationHealth => write!(f, "A-S/configuration/health"),
            Self::AlmanacReference => write!(f, "almanac reference/health"),
        }
    }
}

fn header(id: u8) -> Payload {
    Payload::new()
        .push(BitField::new(DATA_ID, 2))
        .push(BitField::new(id as u32, 6))
}

/// Reserved page: data and page IDs, zeros elsewhere
fn reserved_page(id: u8) -> [DataWord; 8] {
    let zeros = Payload::new().zeros(24).full();
    [
        header(id).zeros(16).full(),
        zeros,
        zeros,
        zeros,
        zeros,
        zeros,
        zeros,
        Payload::new().zeros(22).solved(),
    ]
}

/// NMCT page: availability indicator (00, corrections available)
/// followed by null ERDs.
fn correction_table_page() -> [DataWord; 8] {
    let zeros = Payload::new().zeros(24).full();
    [
        header(CORRECTION_TABLE_ID)
            .push(BitField::new(0b00, 2))
            .zeros(14)
            .full(),
        zeros,
        zeros,
        zeros,
        zeros,
        zeros,
        zeros,
        Payload::new().zeros(22).solved(),
    ]
}

/// Special message page: 22 bytes of text
fn special_message_page(text: &str) -> [DataWord; 8] {
    let chars = text_fields(text);
    let mut words = [DataWord::Full(0); 8];
    words[0] = header(SPECIAL_MESSAGE_ID)
        .push(chars[0])
        .push(chars[1])
        .full();
    for (word, chunk) in words[1..7].iter_mut().zip(chars[2..20].chunks(3)) {
        *word = chunk
            .iter()
            .fold(Payload::new(), |payload, c| payload.push(*c))
            .full();
    }
    words[7] = Payload::new()
        .push(chars[20])
        .push(chars[21])
        .zeros(6)
        .solved();
    words
}
