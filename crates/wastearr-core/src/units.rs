use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

lazy_static! {
    static ref SIZE_RE: Regex = Regex::new(r"^(\d+(?:\.\d+)?)\s*([KMGT]?B?)$").unwrap();
}

/// Parse a human size like `12M`, `3GB`, or `500MB` into bytes. Binary
/// multipliers, case-insensitive; a bare number is bytes.
pub fn parse_size(input: &str) -> Result<u64, Error> {
    let upper = input.trim().to_uppercase();

    let captures = SIZE_RE
        .captures(&upper)
        .ok_or_else(|| Error::InvalidSize(input.to_string()))?;

    let number: f64 = captures[1]
        .parse()
        .map_err(|_| Error::InvalidSize(input.to_string()))?;

    let multiplier: u64 = match &captures[2] {
        "" | "B" => 1,
        "K" | "KB" => 1 << 10,
        "M" | "MB" => 1 << 20,
        "G" | "GB" => 1 << 30,
        "T" | "TB" => 1 << 40,
        _ => return Err(Error::InvalidSize(input.to_string())),
    };

    Ok((number * multiplier as f64) as u64)
}

/// Render bytes with one decimal and a binary-stepped unit.
pub fn format_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
