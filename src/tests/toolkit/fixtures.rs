use std::str::FromStr;

use crate::prelude::*;

/// G05 record published on 2024-03-23 at 02:00:00 GPST
pub fn g05_ephemeris() -> Ephemeris {
    Ephemeris {
        sv: SV::from_str("G05").unwrap(),
        toc: Epoch::from_gregorian(2024, 3, 23, 2, 0, 0, 0, TimeScale::GPST),
        clock_bias: 4.425793886185E-04,
        clock_drift: -1.136868377216E-13,
        clock_drift_rate: 0.0,
        iode: 22.0,
        crs: -55.5625,
        delta_n: 4.054812020231E-09,
        m0: 3.044025233543E-01,
        cuc: -2.948567271233E-06,
        e: 1.176418235991E-02,
        cus: 7.800385355949E-06,
        sqrt_a: 5.153682775497E+03,
        toe: 525_600.0,
        cic: 1.098960638046E-07,
        omega0: -2.134035323815E+00,
        cis: -1.266598701477E-07,
        i0: 9.837880412563E-01,
        crc: 234.09375,
        omega: 9.218706011961E-01,
        omega_dot: -7.925687270090E-09,
        idot: 1.750073184151E-10,
        l2_codes: 1.0,
        week: 2307.0,
        l2p_flag: 0.0,
        accuracy: 2.0,
        health: 0.0,
        tgd: 4.656612873077E-09,
        iodc: 22.0,
        transmission_time: 518_418.0,
        fit_interval: 4.0,
    }
}

/// Almanac that only describes PRN 5
pub fn g05_almanac() -> Almanac {
    Almanac::new(259, 405_504).with_record(AlmanacRecord {
        prn: 5,
        svn: 50,
        ura: 0,
        e: 5.807399749756E-003,
        delta_i: 2.182006835938E-002,
        omega_dot: -2.543734439850E-009,
        sqrt_a: 5.153593750000E+003,
        omega0: 3.259491920471E-001,
        omega: 1.684942245483E-001,
        m0: 7.421517372131E-001,
        af0: 4.367828369141E-004,
        af1: 0.0,
        health: 0,
        configuration: 11,
    })
}

/// Almanac describing PRN 1 to 32, all sharing PRN 5 orbit
pub fn full_almanac() -> Almanac {
    let g05 = g05_almanac();
    let record = g05.get(5).copied().unwrap();
    (1..=32).fold(Almanac::new(259, 405_504), |almanac, prn| {
        almanac.with_record(AlmanacRecord { prn, ..record })
    })
}

/// Path to given test resource
pub fn resource(path: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_resources")
        .join(path)
}
