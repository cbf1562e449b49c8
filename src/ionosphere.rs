//! Ionospheric (Klobuchar) model and UTC parameters (subframe 4 page 18)
use crate::{
    constants::DATA_ID,
    field::{BitField, ScaledField},
    word::{DataWord, Payload},
    Error,
};

/// Page ID of subframe 4 page 18
pub const PAGE_ID: u32 = 56;

/// Klobuchar alpha coefficients scale factors (exponents of 2)
const ALPHA_SCALES: [i32; 4] = [-30, -27, -24, -24];

/// Klobuchar beta coefficients scale factors (exponents of 2)
const BETA_SCALES: [i32; 4] = [11, 14, 16, 16];

/// [IonosphereUtc] gathers the ionospheric model coefficients and
/// GPST to UTC conversion parameters of subframe 4 page 18.
/// The [Default] implementation carries placeholder values: null
/// model and polynomial, current leap second (18 s) and no scheduled
/// leap second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonosphereUtc {
    /// Alpha coefficients
    /// ([s], [s.semi-circle⁻¹], [s.semi-circle⁻²], [s.semi-circle⁻³])
    pub alpha: [f64; 4],
    /// Beta coefficients
    /// ([s], [s.semi-circle⁻¹], [s.semi-circle⁻²], [s.semi-circle⁻³])
    pub beta: [f64; 4],
    /// GPST to UTC offset [s]
    pub a0: f64,
    /// GPST to UTC drift [s.s⁻¹]
    pub a1: f64,
    /// UTC reference time [s of week]
    pub tot: f64,
    /// UTC reference week
    pub wnt: u16,
    /// Current leap seconds
    pub delta_t_ls: i16,
    /// Week of future (or past) leap second
    pub wn_lsf: u16,
    /// Day number of future (or past) leap second
    pub dn: u8,
    /// Leap seconds, once the leap second has been applied
    pub delta_t_lsf: i16,
}

impl Default for IonosphereUtc {
    fn default() -> Self {
        Self {
            alpha: [0.0; 4],
            beta: [0.0; 4],
            a0: 0.0,
            a1: 0.0,
            tot: 0.0,
            wnt: 2149,
            delta_t_ls: 18,
            wn_lsf: 2149,
            dn: 1,
            delta_t_lsf: 18,
        }
    }
}

impl IonosphereUtc {
    /// Copies and returns [IonosphereUtc] with given Klobuchar coefficients
    pub fn with_klobuchar(&self, alpha: [f64; 4], beta: [f64; 4]) -> Self {
        let mut s = *self;
        s.alpha = alpha;
        s.beta = beta;
        s
    }

    /// Copies and returns [IonosphereUtc] with given UTC polynomial
    pub fn with_utc(&self, a0: f64, a1: f64, tot: f64, wnt: u16) -> Self {
        let mut s = *self;
        s.a0 = a0;
        s.a1 = a1;
        s.tot = tot;
        s.wnt = wnt;
        s
    }

    /// Copies and returns [IonosphereUtc] with given current leap seconds.
    /// No leap second is scheduled.
    pub fn with_leap_seconds(&self, leap: i16) -> Self {
        let mut s = *self;
        s.delta_t_ls = leap;
        s.delta_t_lsf = leap;
        s
    }

    /// Copies and returns [IonosphereUtc] with given leap second event:
    /// leap seconds after the event, week number (WN_LSF) and day number (DN).
    pub fn with_leap_second_event(&self, delta_t_lsf: i16, wn_lsf: u16, dn: u8) -> Self {
        let mut s = *self;
        s.delta_t_lsf = delta_t_lsf;
        s.wn_lsf = wn_lsf;
        s.dn = dn;
        s
    }

    /// Page 18 content
    pub fn data_words(&self) -> Result<[DataWord; 8], Error> {
        let mut alpha = [BitField::zeros(8); 4];
        for (i, (dst, scale)) in alpha.iter_mut().zip(ALPHA_SCALES).enumerate() {
            *dst = ScaledField::signed(ALPHA_NAMES[i], self.alpha[i], 8)
                .with_pow2_scale(scale)
                .encode()?;
        }
        let mut beta = [BitField::zeros(8); 4];
        for (i, (dst, scale)) in beta.iter_mut().zip(BETA_SCALES).enumerate() {
            *dst = ScaledField::signed(BETA_NAMES[i], self.beta[i], 8)
                .with_pow2_scale(scale)
                .encode()?;
        }
        let a1 = ScaledField::signed("a1", self.a1, 24)
            .with_pow2_scale(-50)
            .encode()?;
        let a0 = ScaledField::signed("a0", self.a0, 32)
            .with_pow2_scale(-30)
            .encode()?;
        let tot = ScaledField::unsigned("tot", self.tot, 8)
            .with_pow2_scale(12)
            .encode()?;
        let wnt = BitField::new((self.wnt % 256) as u32, 8);
        let delta_t_ls = ScaledField::signed("delta_t_ls", self.delta_t_ls as f64, 8).encode()?;
        let wn_lsf = BitField::new((self.wn_lsf % 256) as u32, 8);
        let dn = ScaledField::unsigned("dn", self.dn as f64, 8).encode()?;
        let delta_t_lsf =
            ScaledField::signed("delta_t_lsf", self.delta_t_lsf as f64, 8).encode()?;

        Ok([
            Payload::new()
                .push(BitField::new(DATA_ID, 2))
                .push(BitField::new(PAGE_ID, 6))
                .push(alpha[0])
                .push(alpha[1])
                .full(),
            Payload::new()
                .push(alpha[2])
                .push(alpha[3])
                .push(beta[0])
                .full(),
            Payload::new()
                .push(beta[1])
                .push(beta[2])
                .push(beta[3])
                .full(),
            Payload::new().push(a1).full(),
            Payload::new().push(a0.msb(24)).full(),
            Payload::new().push(a0.lsb(8)).push(tot).push(wnt).full(),
            Payload::new().push(delta_t_ls).push(wn_lsf).push(dn).full(),
            Payload::new().push(delta_t_lsf).zeros(14).solved(),
        ])
    }
}

const ALPHA_NAMES: [&str; 4] = ["alpha0", "alpha1", "alpha2", "alpha3"];
const BETA_NAMES: [&str; 4] = ["beta0", "beta1", "beta2", "beta3"];

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::toolkit::data_word_content;

    #[test]
    fn default_page() {
        let words = IonosphereUtc::default().data_words().unwrap();
        assert_eq!(words[0], DataWord::Full(0b01_111000 << 16));
        for word in &words[1..5] {
            assert_eq!(*word, DataWord::Full(0));
        }
        // A0 LSBs | tot | WNt
        assert_eq!(words[5], DataWord::Full(2149 % 256));
        // leap seconds | WNlsf | DN
        assert_eq!(words[6], DataWord::Full(18 << 16 | 101 << 8 | 1));
        assert_eq!(words[7], DataWord::Solved(18 << 14));
    }

    #[test]
    fn klobuchar_coefficients() {
        let iono = IonosphereUtc::default().with_klobuchar(
            [
                0.1118E-07,
                0.7451E-08,
                -0.5960E-07,
                -0.5960E-07,
            ],
            [0.9011E+05, 0.0, -0.1966E+06, -0.6554E+05],
        );
        let words = iono.data_words().unwrap();

        let w3 = data_word_content(&words[0]);
        assert_eq!((w3 >> 8) & 0xff, 12); // 0.1118E-07 * 2^30
        assert_eq!(w3 & 0xff, 1); // 0.7451E-08 * 2^27

        let w4 = data_word_content(&words[1]);
        assert_eq!(w4 >> 16, 0xff); // -1
        assert_eq!((w4 >> 8) & 0xff, 0xff); // -1
        assert_eq!(w4 & 0xff, 0x2c); // 44

        let w5 = data_word_content(&words[2]);
        assert_eq!(w5 >> 16, 0);
        assert_eq!((w5 >> 8) & 0xff, 0xfd); // -3
        assert_eq!(w5 & 0xff, 0xff); // -1
    }

    #[test]
    fn utc_parameters() {
        let iono = IonosphereUtc::default()
            .with_utc(-1.0 * 2.0_f64.powi(-30), 2.0_f64.powi(-50), 405_504.0, 2307)
            .with_leap_seconds(18);
        let words = iono.data_words().unwrap();
        assert_eq!(words[3], DataWord::Full(1));
        assert_eq!(words[4], DataWord::Full(0xffffff));
        assert_eq!(words[5], DataWord::Full(0xff << 16 | 99 << 8 | 2307 % 256));
    }

    #[test]
    fn leap_second_event() {
        let iono = IonosphereUtc::default()
            .with_leap_seconds(18)
            .with_leap_second_event(19, 2185, 7);
        let words = iono.data_words().unwrap();
        assert_eq!(words[6], DataWord::Full(18 << 16 | (2185 % 256) << 8 | 7));
        assert_eq!(words[7], DataWord::Solved(19 << 14));
    }

    #[test]
    fn overflowing_coefficient() {
        let iono = IonosphereUtc::default().with_klobuchar([1.0, 0.0, 0.0, 0.0], [0.0; 4]);
        match iono.data_words() {
            Err(Error::FieldOverflow { field, .. }) => assert_eq!(field, "alpha0"),
            other => panic!("expecting alpha0 overflow, got {:?}", other),
        }
    }
}
