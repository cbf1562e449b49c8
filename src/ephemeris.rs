//! GPS ephemeris and subframes 1, 2 & 3
use crate::{
    constants::GPS_PI,
    field::{BitField, ScaledField},
    word::{DataWord, Payload},
    Error,
};

use gnss::prelude::{Constellation, SV};
use hifitime::{Epoch, TimeScale};

/// URA index thresholds [m], IS-GPS-200 20.3.3.3.1.3
const URA_THRESHOLDS_M: [f64; 15] = [
    2.4, 3.4, 4.85, 6.85, 9.65, 13.65, 24.0, 48.0, 96.0, 192.0, 384.0, 768.0, 1536.0, 3072.0,
    6144.0,
];

/// GPS broadcast [Ephemeris], as published in a RINEX navigation record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ephemeris {
    /// Satellite
    pub sv: SV,
    /// Clock reference epoch (toc)
    pub toc: Epoch,
    /// Clock bias af0 [s]
    pub clock_bias: f64,
    /// Clock drift af1 [s.s⁻¹]
    pub clock_drift: f64,
    /// Clock drift rate af2 [s.s⁻²]
    pub clock_drift_rate: f64,
    /// Issue of data, ephemeris
    pub iode: f64,
    /// Orbit radius sine harmonic correction [m]
    pub crs: f64,
    /// Mean motion difference [rad.s⁻¹]
    pub delta_n: f64,
    /// Mean anomaly at reference time [rad]
    pub m0: f64,
    /// Argument of latitude cosine harmonic correction [rad]
    pub cuc: f64,
    /// Eccentricity
    pub e: f64,
    /// Argument of latitude sine harmonic correction [rad]
    pub cus: f64,
    /// Square root of the semi major axis [m^1/2]
    pub sqrt_a: f64,
    /// Time of ephemeris [s of week]
    pub toe: f64,
    /// Inclination cosine harmonic correction [rad]
    pub cic: f64,
    /// Longitude of ascending node at weekly epoch [rad]
    pub omega0: f64,
    /// Inclination sine harmonic correction [rad]
    pub cis: f64,
    /// Inclination at reference time [rad]
    pub i0: f64,
    /// Orbit radius cosine harmonic correction [m]
    pub crc: f64,
    /// Argument of perigee [rad]
    pub omega: f64,
    /// Rate of right ascension [rad.s⁻¹]
    pub omega_dot: f64,
    /// Rate of inclination [rad.s⁻¹]
    pub idot: f64,
    /// Codes on L2
    pub l2_codes: f64,
    /// GPS week
    pub week: f64,
    /// L2 P data flag
    pub l2p_flag: f64,
    /// SV accuracy [m]
    pub accuracy: f64,
    /// SV health
    pub health: f64,
    /// Group delay [s]
    pub tgd: f64,
    /// Issue of data, clock
    pub iodc: f64,
    /// Transmission time of message [s of week]
    pub transmission_time: f64,
    /// Fit interval [h]
    pub fit_interval: f64,
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self {
            sv: SV::new(Constellation::GPS, 1),
            toc: Epoch::from_gpst_seconds(0.0),
            clock_bias: 0.0,
            clock_drift: 0.0,
            clock_drift_rate: 0.0,
            iode: 0.0,
            crs: 0.0,
            delta_n: 0.0,
            m0: 0.0,
            cuc: 0.0,
            e: 0.0,
            cus: 0.0,
            sqrt_a: 0.0,
            toe: 0.0,
            cic: 0.0,
            omega0: 0.0,
            cis: 0.0,
            i0: 0.0,
            crc: 0.0,
            omega: 0.0,
            omega_dot: 0.0,
            idot: 0.0,
            l2_codes: 0.0,
            week: 0.0,
            l2p_flag: 0.0,
            accuracy: 0.0,
            health: 0.0,
            tgd: 0.0,
            iodc: 0.0,
            transmission_time: 0.0,
            fit_interval: 0.0,
        }
    }
}

impl Ephemeris {
    /// Selects the [Ephemeris] published for `sv` at `epoch`.
    /// A missing record, or a record with non finite fields,
    /// is a fatal [Error::NoEphemerisForEpoch].
    pub fn select(records: &[Self], sv: SV, epoch: Epoch) -> Result<&Self, Error> {
        records
            .iter()
            .find(|eph| eph.sv == sv && eph.toc == epoch && eph.is_valid())
            .ok_or(Error::NoEphemerisForEpoch { sv, epoch })
    }

    fn fields(&self) -> [f64; 30] {
        [
            self.clock_bias,
            self.clock_drift,
            self.clock_drift_rate,
            self.iode,
            self.crs,
            self.delta_n,
            self.m0,
            self.cuc,
            self.e,
            self.cus,
            self.sqrt_a,
            self.toe,
            self.cic,
            self.omega0,
            self.cis,
            self.i0,
            self.crc,
            self.omega,
            self.omega_dot,
            self.idot,
            self.l2_codes,
            self.week,
            self.l2p_flag,
            self.accuracy,
            self.health,
            self.tgd,
            self.iodc,
            self.transmission_time,
            self.fit_interval,
            self.toc_seconds(),
        ]
    }

    /// True when all fields are finite
    pub fn is_valid(&self) -> bool {
        self.fields().iter().all(|f| f.is_finite())
    }

    /// Clock reference time, in seconds of GPS week
    pub fn toc_seconds(&self) -> f64 {
        let (_, nanos) = self.toc.to_time_scale(TimeScale::GPST).to_time_of_week();
        nanos as f64 * 1.0E-9
    }

    /// URA index, from the nominal accuracy (IS-GPS-200 20.3.3.3.1.3).
    /// Accuracies worse than 6144 m, or unknown, map to index 15.
    pub fn ura_index(&self) -> u8 {
        URA_THRESHOLDS_M
            .iter()
            .position(|max| self.accuracy <= *max)
            .unwrap_or(URA_THRESHOLDS_M.len()) as u8
    }

    /// Fit interval flag: 0 for the nominal 4 hour curve fit
    pub fn fit_flag(&self) -> bool {
        self.fit_interval > 4.0
    }

    /// Subframe 1: clock correction, health & accuracy
    pub fn subframe1(&self) -> Result<[DataWord; 8], Error> {
        let week = ScaledField::unsigned("week", self.week.rem_euclid(1024.0), 10).encode()?;
        let l2_codes = ScaledField::unsigned("l2_codes", self.l2_codes, 2).encode()?;
        let ura = BitField::new(self.ura_index() as u32, 4);
        let health = ScaledField::unsigned("health", self.health, 6).encode()?;
        let iodc = ScaledField::unsigned("iodc", self.iodc, 10).encode()?;
        let l2p = ScaledField::unsigned("l2p_flag", self.l2p_flag, 1).encode()?;
        let tgd = ScaledField::signed("tgd", self.tgd, 8)
            .with_pow2_scale(-31)
            .encode()?;
        let toc = ScaledField::unsigned("toc", self.toc_seconds(), 16)
            .with_pow2_scale(4)
            .encode()?;
        let af2 = ScaledField::signed("af2", self.clock_drift_rate, 8)
            .with_pow2_scale(-55)
            .encode()?;
        let af1 = ScaledField::signed("af1", self.clock_drift, 16)
            .with_pow2_scale(-43)
            .encode()?;
        let af0 = ScaledField::signed("af0", self.clock_bias, 22)
            .with_pow2_scale(-31)
            .encode()?;

        Ok([
            Payload::new()
                .push(week)
                .push(l2_codes)
                .push(ura)
                .push(health)
                .push(iodc.msb(2))
                .full(),
            Payload::new().push(l2p).zeros(23).full(),
            Payload::new().zeros(24).full(),
            Payload::new().zeros(24).full(),
            Payload::new().zeros(16).push(tgd).full(),
            Payload::new().push(iodc.lsb(8)).push(toc).full(),
            Payload::new().push(af2).push(af1).full(),
            Payload::new().push(af0).solved(),
        ])
    }

    /// Subframe 2: ephemeris (1/2)
    pub fn subframe2(&self) -> Result<[DataWord; 8], Error> {
        let iode = ScaledField::unsigned("iode", self.iode, 8).encode()?;
        let crs = ScaledField::signed("crs", self.crs, 16)
            .with_pow2_scale(-5)
            .encode()?;
        let delta_n = ScaledField::signed("delta_n", self.delta_n / GPS_PI, 16)
            .with_pow2_scale(-43)
            .encode()?;
        let m0 = ScaledField::signed("m0", self.m0 / GPS_PI, 32)
            .with_pow2_scale(-31)
            .encode()?;
        let cuc = ScaledField::signed("cuc", self.cuc, 16)
            .with_pow2_scale(-29)
            .encode()?;
        let e = ScaledField::unsigned("e", self.e, 32)
            .with_pow2_scale(-33)
            .encode()?;
        let cus = ScaledField::signed("cus", self.cus, 16)
            .with_pow2_scale(-29)
            .encode()?;
        let sqrt_a = ScaledField::unsigned("sqrt_a", self.sqrt_a, 32)
            .with_pow2_scale(-19)
            .encode()?;
        let toe = ScaledField::unsigned("toe", self.toe, 16)
            .with_pow2_scale(4)
            .encode()?;
        // AODO is not published in RINEX: placeholder
        let aodo = ScaledField::unsigned("aodo", 0.0, 5)
            .with_scale(900.0)
            .encode()?;

        Ok([
            Payload::new().push(iode).push(crs).full(),
            Payload::new().push(delta_n).push(m0.msb(8)).full(),
            Payload::new().push(m0.lsb(24)).full(),
            Payload::new().push(cuc).push(e.msb(8)).full(),
            Payload::new().push(e.lsb(24)).full(),
            Payload::new().push(cus).push(sqrt_a.msb(8)).full(),
            Payload::new().push(sqrt_a.lsb(24)).full(),
            Payload::new()
                .push(toe)
                .push(BitField::new(self.fit_flag() as u32, 1))
                .push(aodo)
                .solved(),
        ])
    }

    /// Subframe 3: ephemeris (2/2)
    pub fn subframe3(&self) -> Result<[DataWord; 8], Error> {
        let cic = ScaledField::signed("cic", self.cic, 16)
            .with_pow2_scale(-29)
            .encode()?;
        let omega0 = ScaledField::signed("omega0", self.omega0 / GPS_PI, 32)
            .with_pow2_scale(-31)
            .encode()?;
        let cis = ScaledField::signed("cis", self.cis, 16)
            .with_pow2_scale(-29)
            .encode()?;
        let i0 = ScaledField::signed("i0", self.i0 / GPS_PI, 32)
            .with_pow2_scale(-31)
            .encode()?;
        let crc = ScaledField::signed("crc", self.crc, 16)
            .with_pow2_scale(-5)
            .encode()?;
        let omega = ScaledField::signed("omega", self.omega / GPS_PI, 32)
            .with_pow2_scale(-31)
            .encode()?;
        let omega_dot = ScaledField::signed("omega_dot", self.omega_dot / GPS_PI, 24)
            .with_pow2_scale(-43)
            .encode()?;
        let iode = ScaledField::unsigned("iode", self.iode, 8).encode()?;
        let idot = ScaledField::signed("idot", self.idot / GPS_PI, 14)
            .with_pow2_scale(-43)
            .encode()?;

        Ok([
            Payload::new().push(cic).push(omega0.msb(8)).full(),
            Payload::new().push(omega0.lsb(24)).full(),
            Payload::new().push(cis).push(i0.msb(8)).full(),
            Payload::new().push(i0.lsb(24)).full(),
            Payload::new().push(crc).push(omega.msb(8)).full(),
            Payload::new().push(omega.lsb(24)).full(),
            Payload::new().push(omega_dot).full(),
            Payload::new().push(iode).push(idot).solved(),
        ])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::toolkit::{data_word_content, g05_ephemeris};

    #[test]
    fn ura_index() {
        let mut eph = Ephemeris::default();
        for (accuracy, index) in [
            (0.0, 0),
            (2.0, 0),
            (2.4, 0),
            (2.8, 1),
            (4.85, 2),
            (32.0, 7),
            (6144.0, 14),
            (6145.0, 15),
            (f64::NAN, 15),
        ] {
            eph.accuracy = accuracy;
            assert_eq!(eph.ura_index(), index, "accuracy={}", accuracy);
        }
    }

    #[test]
    fn toc_seconds_of_week() {
        let eph = g05_ephemeris();
        assert_eq!(eph.toc_seconds(), 525_600.0);
    }

    #[test]
    fn subframe1_layout() {
        let eph = g05_ephemeris();
        let words = eph.subframe1().unwrap();

        // week mod 1024 | L2 codes | URA | health | IODC MSBs
        let w3 = data_word_content(&words[0]);
        assert_eq!(w3 >> 14, 2307 % 1024);
        assert_eq!((w3 >> 12) & 0x03, 1);
        assert_eq!((w3 >> 8) & 0x0f, 0);
        assert_eq!((w3 >> 2) & 0x3f, 0);
        assert_eq!(w3 & 0x03, 0);

        // 16 reserved bits | TGD
        let w7 = data_word_content(&words[4]);
        assert_eq!(w7, 10);

        // IODC LSBs | toc
        let w8 = data_word_content(&words[5]);
        assert_eq!(w8 >> 16, 22);
        assert_eq!(w8 & 0xffff, 32_850);

        assert!(matches!(words[7], DataWord::Solved(_)));
    }

    #[test]
    fn subframe2_split_fields() {
        let eph = g05_ephemeris();
        let words = eph.subframe2().unwrap();

        let sqrt_a = ScaledField::unsigned("sqrt_a", eph.sqrt_a, 32)
            .with_pow2_scale(-19)
            .encode()
            .unwrap();

        let w8 = data_word_content(&words[5]);
        let w9 = data_word_content(&words[6]);
        assert_eq!((w8 & 0xff) << 24 | w9, sqrt_a.raw());

        // toe | fit flag | AODO
        match words[7] {
            DataWord::Solved(bits) => {
                assert_eq!(bits >> 6, 32_850);
                assert_eq!(bits & 0x3f, 0);
            },
            _ => panic!("subframe 2 word 10 carries solved bits"),
        }
    }

    #[test]
    fn subframe3_layout() {
        let eph = g05_ephemeris();
        let words = eph.subframe3().unwrap();
        match words[7] {
            DataWord::Solved(bits) => {
                assert_eq!(bits >> 14, 22);
            },
            _ => panic!("subframe 3 word 10 carries solved bits"),
        }
    }

    #[test]
    fn ephemeris_overflow() {
        let mut eph = g05_ephemeris();
        eph.iode = 256.0;
        match eph.subframe2() {
            Err(Error::FieldOverflow { field, .. }) => assert_eq!(field, "iode"),
            other => panic!("expecting iode overflow, got {:?}", other),
        }

        let mut eph = g05_ephemeris();
        eph.sqrt_a = -1.0;
        assert!(eph.subframe2().is_err());
    }

    #[test]
    fn selection() {
        let eph = g05_ephemeris();
        let records = vec![eph.clone()];

        let selected = Ephemeris::select(&records, eph.sv, eph.toc).unwrap();
        assert_eq!(selected, &eph);

        let later = eph.toc + hifitime::Duration::from_seconds(7200.0);
        match Ephemeris::select(&records, eph.sv, later) {
            Err(Error::NoEphemerisForEpoch { sv, .. }) => assert_eq!(sv, eph.sv),
            other => panic!("expecting missing ephemeris, got {:?}", other),
        }

        let mut nan = eph.clone();
        nan.iode = f64::NAN;
        let records = vec![nan];
        assert!(Ephemeris::select(&records, eph.sv, eph.toc).is_err());
    }
}
