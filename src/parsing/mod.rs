//! Source records parsing: RINEX navigation files and SEM almanacs
use crate::ParsingError;
use std::str::FromStr;

pub mod rinex;
pub mod sem;

/// Returns `line[start..end]`, clamped to the line length.
/// Missing columns come out as an empty str.
pub(crate) fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        ""
    } else {
        line.get(start..end).unwrap_or("")
    }
}

/// Parses a Fortran formatted float (`D` or `E` exponents).
pub(crate) fn parse_float(content: &str) -> Result<f64, ParsingError> {
    let trimmed = content.trim();
    f64::from_str(&trimmed.replace(['D', 'd'], "E"))
        .map_err(|_| ParsingError::FloatParsing(trimmed.to_string()))
}

/// Parses an optional float: blank columns are null.
pub(crate) fn parse_optional_float(content: &str) -> Result<f64, ParsingError> {
    if content.trim().is_empty() {
        Ok(0.0)
    } else {
        parse_float(content)
    }
}

/// Parses `N` consecutive floats of `width` characters, starting at `start`
pub(crate) fn fixed_floats<const N: usize>(
    line: &str,
    start: usize,
    width: usize,
) -> Result<[f64; N], ParsingError> {
    let mut values = [0.0; N];
    for (i, value) in values.iter_mut().enumerate() {
        let offset = start + i * width;
        *value = parse_float(column(line, offset, offset + width))?;
    }
    Ok(values)
}

pub(crate) fn parse_int<T: FromStr>(content: &str) -> Result<T, ParsingError> {
    let trimmed = content.trim();
    T::from_str(trimmed).map_err(|_| ParsingError::IntegerParsing(trimmed.to_string()))
}
