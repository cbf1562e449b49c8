//! RINEX navigation files (V2 GPS, V3 GPS or mixed) reader
use std::str::FromStr;

use itertools::Itertools;
use log::debug;

use crate::{
    ephemeris::Ephemeris,
    ionosphere::IonosphereUtc,
    parsing::{column, fixed_floats, parse_float, parse_int, parse_optional_float},
    Error, ParsingError,
};

use gnss::prelude::{Constellation, SV};
use hifitime::{Epoch, TimeScale};

/// Header label column
const LABEL_OFFSET: usize = 60;

/// Broadcast orbit lines per GPS record
const ORBIT_LINES: usize = 7;

/// [NavigationFile] is what we retain from a RINEX navigation file:
/// GPS ephemerides and the ionosphere/UTC header parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationFile {
    /// RINEX revision (major, minor)
    pub version: (u8, u8),
    /// Ionosphere model and UTC parameters. Fields absent from
    /// the header keep their [IonosphereUtc::default] value.
    pub ionosphere: IonosphereUtc,
    /// GPS ephemerides, in order of appearance
    pub ephemerides: Vec<Ephemeris>,
}

impl NavigationFile {
    /// Parses a RINEX navigation file content
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut lines = content.lines();
        let (version, ionosphere) = parse_header(&mut lines)?;

        let records: Vec<&str> = lines.filter(|l| !l.trim().is_empty()).collect();
        let ephemerides = match version.0 {
            2 => parse_v2_records(&records)?,
            _ => parse_v3_records(&records)?,
        };

        debug!(
            "RINEX V{}.{:02}: {} GPS ephemerides",
            version.0,
            version.1,
            ephemerides.len()
        );

        Ok(Self {
            version,
            ionosphere,
            ephemerides,
        })
    }

    /// Parses a RINEX navigation file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Satellites we have at least one ephemeris for
    pub fn sv(&self) -> impl Iterator<Item = SV> + '_ {
        self.ephemerides.iter().map(|eph| eph.sv).unique()
    }
}

fn parse_header<'a, I: Iterator<Item = &'a str>>(
    lines: &mut I,
) -> Result<((u8, u8), IonosphereUtc), ParsingError> {
    let first = lines.next().ok_or(ParsingError::MissingData)?;
    let version = parse_version(first)?;

    let mut ionosphere = IonosphereUtc::default();
    let mut alpha = None;
    let mut beta = None;

    for line in lines.by_ref() {
        let label = column(line, LABEL_OFFSET, line.len()).trim();
        match label {
            "END OF HEADER" => {
                if let (Some(alpha), Some(beta)) = (alpha, beta) {
                    ionosphere = ionosphere.with_klobuchar(alpha, beta);
                }
                return Ok((version, ionosphere));
            },
            "ION ALPHA" => alpha = Some(fixed_floats(line, 2, 12)?),
            "ION BETA" => beta = Some(fixed_floats(line, 2, 12)?),
            "IONOSPHERIC CORR" => match column(line, 0, 4) {
                "GPSA" => alpha = Some(fixed_floats(line, 5, 12)?),
                "GPSB" => beta = Some(fixed_floats(line, 5, 12)?),
                _ => {},
            },
            "DELTA-UTC: A0,A1,T,W" => {
                let a0 = parse_float(column(line, 3, 22))?;
                let a1 = parse_float(column(line, 22, 41))?;
                let tot = parse_float(column(line, 41, 50))?;
                let week = parse_int::<u16>(column(line, 50, 59))?;
                ionosphere = ionosphere.with_utc(a0, a1, tot, week);
            },
            "TIME SYSTEM CORR" => {
                if column(line, 0, 4) == "GPUT" {
                    let a0 = parse_float(column(line, 5, 22))?;
                    let a1 = parse_float(column(line, 22, 38))?;
                    let tot = parse_float(column(line, 38, 45))?;
                    let week = parse_int::<u16>(column(line, 45, 50))?;
                    ionosphere = ionosphere.with_utc(a0, a1, tot, week);
                }
            },
            "LEAP SECONDS" => {
                let leap = parse_int::<i16>(column(line, 0, 6))?;
                ionosphere = ionosphere.with_leap_seconds(leap);

                // V3 only: future leap seconds, week and day of the event
                let event = column(line, 6, 24);
                if !event.trim().is_empty() {
                    let delta_t_lsf = parse_int::<i16>(column(line, 6, 12))?;
                    let wn_lsf = parse_int::<u16>(column(line, 12, 18))?;
                    let dn = parse_int::<u8>(column(line, 18, 24))?;
                    ionosphere = ionosphere.with_leap_second_event(delta_t_lsf, wn_lsf, dn);
                }
            },
            _ => {},
        }
    }

    Err(ParsingError::MissingHeaderDelimiter)
}

fn parse_version(line: &str) -> Result<(u8, u8), ParsingError> {
    if !column(line, LABEL_OFFSET, line.len()).starts_with("RINEX VERSION / TYPE") {
        return Err(ParsingError::MissingData);
    }

    let revision = column(line, 0, 9).trim();
    let (major, minor) = revision
        .split_once('.')
        .ok_or(ParsingError::NonSupportedRevision(revision.to_string()))?;
    let major = parse_int::<u8>(major)?;
    let minor = parse_int::<u8>(minor)?;

    if !(2..=3).contains(&major) {
        return Err(ParsingError::NonSupportedRevision(revision.to_string()));
    }

    if !column(line, 20, 21).eq("N") {
        return Err(ParsingError::NotNavigationRinex);
    }

    Ok((major, minor))
}

/// Epoch from its `y m d h m s` description (GPST)
fn parse_epoch(content: &str) -> Result<Epoch, ParsingError> {
    let invalid = || ParsingError::EpochParsing(content.trim().to_string());

    let items: Vec<&str> = content.split_whitespace().collect();
    if items.len() != 6 {
        return Err(invalid());
    }

    let mut year = i32::from_str(items[0]).map_err(|_| invalid())?;
    if year < 100 {
        year += if year < 80 { 2000 } else { 1900 };
    }

    let mut fields = [0_u8; 4];
    for (field, item) in fields.iter_mut().zip(&items[1..5]) {
        *field = u8::from_str(item).map_err(|_| invalid())?;
    }

    let seconds = f64::from_str(items[5]).map_err(|_| invalid())?;
    if !(0.0..61.0).contains(&seconds) {
        return Err(invalid());
    }
    let nanos = ((seconds - seconds.trunc()) * 1.0E9).round() as u32;

    Epoch::maybe_from_gregorian(
        year,
        fields[0],
        fields[1],
        fields[2],
        fields[3],
        seconds.trunc() as u8,
        nanos,
        TimeScale::GPST,
    )
    .map_err(|_| invalid())
}

/// Builds an [Ephemeris] from its clock terms and 7 broadcast orbits.
/// Orbit values start at column `offset`, 19 characters each.
fn parse_record(
    sv: SV,
    toc: Epoch,
    clock: [f64; 3],
    orbits: &[&str],
    offset: usize,
) -> Result<Ephemeris, ParsingError> {
    if orbits.len() < ORBIT_LINES {
        return Err(ParsingError::MissingData);
    }

    let mut values = [0.0_f64; ORBIT_LINES * 4];
    for (line, chunk) in orbits.iter().zip(values.chunks_mut(4)) {
        for (i, value) in chunk.iter_mut().enumerate() {
            let start = offset + i * 19;
            *value = parse_optional_float(column(line, start, start + 19))?;
        }
    }

    Ok(Ephemeris {
        sv,
        toc,
        clock_bias: clock[0],
        clock_drift: clock[1],
        clock_drift_rate: clock[2],
        iode: values[0],
        crs: values[1],
        delta_n: values[2],
        m0: values[3],
        cuc: values[4],
        e: values[5],
        cus: values[6],
        sqrt_a: values[7],
        toe: values[8],
        cic: values[9],
        omega0: values[10],
        cis: values[11],
        i0: values[12],
        crc: values[13],
        omega: values[14],
        omega_dot: values[15],
        idot: values[16],
        l2_codes: values[17],
        week: values[18],
        l2p_flag: values[19],
        accuracy: values[20],
        health: values[21],
        tgd: values[22],
        iodc: values[23],
        transmission_time: values[24],
        fit_interval: values[25],
    })
}

/// V2 (GPS) records are 8 lines long
fn parse_v2_records(lines: &[&str]) -> Result<Vec<Ephemeris>, ParsingError> {
    let mut ephemerides = Vec::with_capacity(lines.len() / (ORBIT_LINES + 1));
    for record in lines.chunks(ORBIT_LINES + 1) {
        let first = record[0];
        let prn = parse_int::<u8>(column(first, 0, 2))
            .map_err(|_| ParsingError::SvParsing(column(first, 0, 2).trim().to_string()))?;
        let sv = SV::new(Constellation::GPS, prn);
        let toc = parse_epoch(column(first, 2, 22))?;
        let clock = fixed_floats(first, 22, 19)?;
        ephemerides.push(parse_record(sv, toc, clock, &record[1..], 3)?);
    }
    Ok(ephemerides)
}

/// V3 records start with the SV identity, orbits are indented.
/// Non GPS records are skipped.
fn parse_v3_records(lines: &[&str]) -> Result<Vec<Ephemeris>, ParsingError> {
    let mut ephemerides = Vec::new();
    let mut lines = lines.iter().copied().peekable();

    while let Some(first) = lines.next() {
        let orbits: Vec<&str> = lines
            .peeking_take_while(|line| line.starts_with(' '))
            .collect();

        if first.starts_with(' ') {
            // orphan broadcast orbit
            return Err(ParsingError::MissingData);
        }

        let sv_str = column(first, 0, 3).trim();
        let sv = SV::from_str(sv_str).map_err(|_| ParsingError::SvParsing(sv_str.to_string()))?;
        if sv.constellation != Constellation::GPS {
            continue;
        }

        let toc = parse_epoch(column(first, 4, 23))?;
        let clock = fixed_floats(first, 23, 19)?;
        ephemerides.push(parse_record(sv, toc, clock, &orbits, 4)?);
    }
    Ok(ephemerides)
}
