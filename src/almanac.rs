//! GPS almanac and almanac related pages (subframes 4 & 5)
use std::collections::BTreeMap;

use crate::{
    constants::{DATA_ID, MAX_PRN, UNKNOWN_CONFIGURATION, UNKNOWN_HEALTH},
    field::{BitField, ScaledField},
    word::{DataWord, Payload},
    Error,
};

/// Page ID of subframe 5 page 25
pub const SF5_PAGE25_ID: u32 = 51;

/// Page ID of subframe 4 page 25
pub const SF4_PAGE25_ID: u32 = 63;

/// Per satellite almanac, as published in SEM files.
/// Angles are expressed in semicircles.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlmanacRecord {
    /// PRN number
    pub prn: u8,
    /// SV number
    pub svn: u16,
    /// Average URA number
    pub ura: u8,
    /// Eccentricity
    pub e: f64,
    /// Inclination offset to 0.3 semicircles [semicircles]
    pub delta_i: f64,
    /// Rate of right ascension [semicircles.s⁻¹]
    pub omega_dot: f64,
    /// Square root of the semi major axis [m^1/2]
    pub sqrt_a: f64,
    /// Longitude of ascending node [semicircles]
    pub omega0: f64,
    /// Argument of perigee [semicircles]
    pub omega: f64,
    /// Mean anomaly [semicircles]
    pub m0: f64,
    /// Clock bias [s]
    pub af0: f64,
    /// Clock drift [s.s⁻¹]
    pub af1: f64,
    /// 6-bit health
    pub health: u8,
    /// 4-bit A-S & SV configuration
    pub configuration: u8,
}

/// [Almanac] gathers the [AlmanacRecord]s sharing one reference time.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Almanac {
    /// Almanac reference week
    pub week: u16,
    /// Time of almanac [s of week]
    pub toa: u32,
    /// Records, indexed by PRN
    pub records: BTreeMap<u8, AlmanacRecord>,
}

impl Almanac {
    /// Builds an empty [Almanac]
    pub fn new(week: u16, toa: u32) -> Self {
        Self {
            week,
            toa,
            records: Default::default(),
        }
    }

    /// Copies and returns [Almanac] with one more [AlmanacRecord]
    pub fn with_record(&self, record: AlmanacRecord) -> Self {
        let mut s = self.clone();
        s.records.insert(record.prn, record);
        s
    }

    /// [AlmanacRecord] of given PRN, if any
    pub fn get(&self, prn: u8) -> Option<&AlmanacRecord> {
        self.records.get(&prn)
    }

    /// 6-bit health of given PRN, all ones when unknown
    pub fn health(&self, prn: u8) -> u8 {
        self.get(prn).map_or(UNKNOWN_HEALTH, |r| r.health)
    }

    /// 4-bit configuration of given PRN, all ones when unknown
    pub fn configuration(&self, prn: u8) -> u8 {
        self.get(prn)
            .map_or(UNKNOWN_CONFIGURATION, |r| r.configuration)
    }

    fn toa_field(&self) -> Result<BitField, Error> {
        ScaledField::unsigned("toa", self.toa as f64, 8)
            .with_pow2_scale(12)
            .encode()
    }

    fn health_field(&self, prn: u8) -> Result<BitField, Error> {
        ScaledField::unsigned("sv_health", self.health(prn) as f64, 6).encode()
    }

    fn configuration_field(&self, prn: u8) -> Result<BitField, Error> {
        ScaledField::unsigned("sv_config", self.configuration(prn) as f64, 4).encode()
    }

    /// Almanac page of given PRN (subframe 4 pages 2-5, 7-10,
    /// subframe 5 pages 1-24). Returns None when this PRN is missing.
    pub fn page(&self, prn: u8) -> Option<Result<[DataWord; 8], Error>> {
        self.get(prn).map(|record| record.data_words(self.toa_field()?))
    }

    /// Content sent in place of an almanac page
    /// when the almanac misses that satellite.
    pub fn dummy_page() -> [DataWord; 8] {
        let alternating = Payload::new().push(BitField::repeat(0b10, 2, 12)).full();
        [
            Payload::new()
                .push(BitField::new(DATA_ID, 2))
                .zeros(6)
                .push(BitField::repeat(0b10, 2, 8))
                .full(),
            alternating,
            alternating,
            alternating,
            alternating,
            alternating,
            alternating,
            Payload::new()
                .push(BitField::repeat(0b10, 2, 11))
                .solved(),
        ]
    }

    /// Subframe 4 page 25: A-S flags & SV configurations
    /// of PRN 1 to 32, health of PRN 25 to 32.
    pub fn configuration_health_page(&self) -> Result<[DataWord; 8], Error> {
        let mut fields = Vec::with_capacity(64);
        for prn in 1..=MAX_PRN {
            fields.push(self.configuration_field(prn)?);
        }
        // 2 reserved system bits
        fields.push(BitField::zeros(2));
        for prn in 25..=MAX_PRN {
            fields.push(self.health_field(prn)?);
        }
        // reserved
        fields.push(BitField::zeros(4));

        let header = [BitField::new(DATA_ID, 2), BitField::new(SF4_PAGE25_ID, 6)];
        Ok(pack_page(header.into_iter().chain(fields)))
    }

    /// Subframe 5 page 25: almanac reference time and
    /// health of PRN 1 to 24.
    pub fn reference_health_page(&self) -> Result<[DataWord; 8], Error> {
        let mut fields = vec![
            BitField::new(DATA_ID, 2),
            BitField::new(SF5_PAGE25_ID, 6),
            self.toa_field()?,
            BitField::new((self.week % 256) as u32, 8),
        ];
        for prn in 1..=24 {
            fields.push(self.health_field(prn)?);
        }
        // reserved
        fields.push(BitField::zeros(22));
        Ok(pack_page(fields))
    }
}

impl AlmanacRecord {
    /// Almanac page words
    fn data_words(&self, toa: BitField) -> Result<[DataWord; 8], Error> {
        let sv_id = ScaledField::unsigned("sv_id", self.prn as f64, 6).encode()?;
        let e = ScaledField::unsigned("e", self.e, 16)
            .with_pow2_scale(-21)
            .encode()?;
        let delta_i = ScaledField::signed("delta_i", self.delta_i, 16)
            .with_pow2_scale(-19)
            .encode()?;
        let omega_dot = ScaledField::signed("omega_dot", self.omega_dot, 16)
            .with_pow2_scale(-38)
            .encode()?;
        // 3 MSBs (NAV data health) are not published in SEM files
        let health = ScaledField::unsigned("sv_health", self.health as f64, 8).encode()?;
        let health = BitField::new(health.raw() & 0x1f, 8);
        let sqrt_a = ScaledField::unsigned("sqrt_a", self.sqrt_a, 24)
            .with_pow2_scale(-11)
            .encode()?;
        let omega0 = ScaledField::signed("omega0", self.omega0, 24)
            .with_pow2_scale(-23)
            .encode()?;
        let omega = ScaledField::signed("omega", self.omega, 24)
            .with_pow2_scale(-23)
            .encode()?;
        let m0 = ScaledField::signed("m0", self.m0, 24)
            .with_pow2_scale(-23)
            .encode()?;
        let af0 = ScaledField::signed("af0", self.af0, 11)
            .with_pow2_scale(-20)
            .encode()?;
        let af1 = ScaledField::signed("af1", self.af1, 11)
            .with_pow2_scale(-38)
            .encode()?;

        Ok([
            Payload::new()
                .push(BitField::new(DATA_ID, 2))
                .push(sv_id)
                .push(e)
                .full(),
            Payload::new().push(toa).push(delta_i).full(),
            Payload::new().push(omega_dot).push(health).full(),
            Payload::new().push(sqrt_a).full(),
            Payload::new().push(omega0).full(),
            Payload::new().push(omega).full(),
            Payload::new().push(m0).full(),
            Payload::new()
                .push(af0.msb(8))
                .push(af1)
                .push(af0.lsb(3))
                .solved(),
        ])
    }
}

/// Packs a contiguous stream of fields (190 bits)
/// into 7 full words and a final solved word.
/// Fields never straddle two words.
pub(crate) fn pack_page<I: IntoIterator<Item = BitField>>(fields: I) -> [DataWord; 8] {
    let mut words = [DataWord::Full(0); 8];
    let mut index = 0;
    let mut payload = Payload::new();
    for field in fields {
        if payload.len() + field.bits() > 24 {
            words[index] = payload.full();
            index += 1;
            payload = Payload::new();
        }
        payload = payload.push(field);
    }
    words[index] = payload.solved();
    debug_assert_eq!(index, 7, "page should span 8 words");
    words
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::toolkit::{data_word_content, g05_almanac};

    #[test]
    fn unknown_prn() {
        let almanac = Almanac::new(259, 405_504);
        assert_eq!(almanac.health(3), 63);
        assert_eq!(almanac.configuration(3), 15);
        assert!(almanac.page(3).is_none());
    }

    #[test]
    fn almanac_page() {
        let almanac = g05_almanac();
        let words = almanac.page(5).unwrap().unwrap();

        // data id | sv id | e
        let w3 = data_word_content(&words[0]);
        assert_eq!(w3 >> 22, 0b01);
        assert_eq!((w3 >> 16) & 0x3f, 5);

        // toa | delta_i
        let w4 = data_word_content(&words[1]);
        assert_eq!(w4 >> 16, 405_504 / 4096);

        // health 3 MSBs are cleared
        let w5 = data_word_content(&words[2]);
        assert_eq!(w5 & 0xe0, 0);

        assert!(matches!(words[7], DataWord::Solved(_)));
    }

    #[test]
    fn almanac_overflow() {
        let mut record = g05_almanac().get(5).copied().unwrap();
        record.sqrt_a = 10_000.0;
        let almanac = Almanac::new(259, 405_504).with_record(record);
        match almanac.page(5) {
            Some(Err(Error::FieldOverflow { field, .. })) => assert_eq!(field, "sqrt_a"),
            other => panic!("expecting sqrt_a overflow, got {:?}", other),
        }
    }

    #[test]
    fn dummy_page() {
        let words = Almanac::dummy_page();
        assert_eq!(words[0], DataWord::Full(0b01_000000 << 16 | 0xaaaa));
        for word in &words[1..7] {
            assert_eq!(*word, DataWord::Full(0xaaaaaa));
        }
        assert_eq!(words[7], DataWord::Solved(0x2aaaaa));
    }

    #[test]
    fn configuration_health_page() {
        let words = Almanac::default().configuration_health_page().unwrap();
        // data id | 63 | 4 configurations
        assert_eq!(words[0], DataWord::Full(0b01_111111 << 16 | 0xffff));
        for word in &words[1..5] {
            assert_eq!(*word, DataWord::Full(0xffffff));
        }
        // 4 configurations | 2 system bits | 1 health
        assert_eq!(words[5], DataWord::Full(0xffff << 8 | 0x3f));
        assert_eq!(words[6], DataWord::Full(0xffffff));
        // 3 healths | 4 reserved bits
        assert_eq!(words[7], DataWord::Solved(0x3ffff << 4));
    }

    #[test]
    fn reference_health_page() {
        let almanac = g05_almanac();
        let words = almanac.reference_health_page().unwrap();
        assert_eq!(
            words[0],
            DataWord::Full(0b01_110011 << 16 | (405_504 / 4096) << 8 | 259 % 256)
        );
        // PRN 5 is healthy, all others are unknown
        assert_eq!(words[1], DataWord::Full(0xffffff));
        assert_eq!(words[2], DataWord::Full(0x03ffff));
        assert_eq!(words[7], DataWord::Solved(0));
    }
}
