//! SEM almanac reader.
//!
//! A SEM file is a header section (number of records and title,
//! then almanac week and time of almanac) followed by one section per
//! satellite, sections being separated by empty lines.
use log::debug;

use crate::{
    almanac::{Almanac, AlmanacRecord},
    parsing::{parse_float, parse_int},
    Error, ParsingError,
};

/// Lines per satellite section
const RECORD_LINES: usize = 8;

/// Parses a SEM almanac content
pub fn parse(content: &str) -> Result<Almanac, Error> {
    let mut sections = sections(content);

    let header = sections.next().ok_or(ParsingError::MissingData)?;
    if header.len() < 2 {
        return Err(ParsingError::MissingData.into());
    }

    let mut items = header[1].split_whitespace();
    let week = parse_int::<u16>(items.next().ok_or(ParsingError::MissingData)?)?;
    let toa = parse_int::<u32>(items.next().ok_or(ParsingError::MissingData)?)?;

    let mut almanac = Almanac::new(week, toa);
    for section in sections {
        let record = parse_record(&section)?;
        almanac.records.insert(record.prn, record);
    }

    debug!(
        "SEM almanac week {} toa {}: {} records",
        almanac.week,
        almanac.toa,
        almanac.records.len()
    );
    Ok(almanac)
}

/// Parses a SEM almanac file
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Almanac, Error> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Groups non empty (trimmed) lines into sections
fn sections(content: &str) -> impl Iterator<Item = Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in content.lines().map(|l| l.trim()) {
        if line.is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections.into_iter()
}

/// Parses the 3 floats of an orbital line
fn triplet(line: &str) -> Result<[f64; 3], ParsingError> {
    let mut values = [0.0; 3];
    let mut items = line.split_whitespace();
    for value in values.iter_mut() {
        *value = parse_float(items.next().ok_or(ParsingError::TruncatedAlmanacEntry)?)?;
    }
    Ok(values)
}

fn parse_record(section: &[&str]) -> Result<AlmanacRecord, ParsingError> {
    if section.len() < RECORD_LINES {
        return Err(ParsingError::TruncatedAlmanacEntry);
    }

    let [e, delta_i, omega_dot] = triplet(section[3])?;
    let [sqrt_a, omega0, omega] = triplet(section[4])?;
    let [m0, af0, af1] = triplet(section[5])?;

    Ok(AlmanacRecord {
        prn: parse_int(section[0])?,
        svn: parse_int(section[1])?,
        ura: parse_int(section[2])?,
        e,
        delta_i,
        omega_dot,
        sqrt_a,
        omega0,
        omega,
        m0,
        af0,
        af1,
        health: parse_int(section[6])?,
        configuration: parse_int(section[7])?,
    })
}
