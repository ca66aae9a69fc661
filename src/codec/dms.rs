//! Latitude/longitude text parsing and formatting.
//!
//! Accepts decimal degrees, degrees + decimal minutes, and degrees + minutes
//! + decimal seconds, with `°`/`'`/`"` glyphs or colons between fields and a
//! trailing direction letter or leading minus for the sign. For example all
//! of these yield 51.50722:
//!
//! - `51° 30' 26.0"N`
//! - `51:30:26.0`
//! - `51°30.433'N`
//! - `51.50722°N`
//! - `51.50722`

use std::fmt;

/// Text does not fit any supported notation, or the value falls outside the
/// valid range for its axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DmsError {
    message: String,
}

impl DmsError {
    fn new(message: impl Into<String>) -> Self {
        DmsError {
            message: message.into(),
        }
    }
}

impl fmt::Display for DmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DmsError {}

/// Output notation for [`format_latitude`] / [`format_longitude`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmsFormat {
    /// `DDD.DDDDD°` — most common in digital mapping.
    Degrees,
    /// `DDD°MM.MMM'` — most common on navigation equipment.
    Minutes,
    /// `DDD°MM'SS.S"` — most common on maps.
    Seconds,
}

/// Splits a free-text coordinate pair and parses both halves.
///
/// The split point is the first comma when one is present, otherwise the last
/// whitespace run. The first component must parse as a latitude and the
/// second as a longitude; either failure fails the whole call.
///
/// Returns `(latitude, longitude)` in decimal degrees.
pub fn parse_lat_lon(text: &str) -> Result<(f64, f64), DmsError> {
    let trimmed = text.trim();
    let unsupported = || DmsError::new(format!("unsupported latitude / longitude format: {text}"));

    let (lat_text, lon_text) = match trimmed.find(',') {
        Some(i) => (&trimmed[..i], &trimmed[i + 1..]),
        None => {
            let (i, c) = trimmed
                .char_indices()
                .filter(|(_, c)| c.is_whitespace())
                .last()
                .ok_or_else(unsupported)?;
            (&trimmed[..i], &trimmed[i + c.len_utf8()..])
        }
    };

    let latitude = parse_latitude(lat_text.trim()).map_err(|_| unsupported())?;
    let longitude = parse_longitude(lon_text.trim()).map_err(|_| unsupported())?;
    Ok((latitude, longitude))
}

/// Parses a latitude string in any supported notation to decimal degrees.
/// A direction letter, when present, must be N or S.
pub fn parse_latitude(text: &str) -> Result<f64, DmsError> {
    check_direction(text, 'N', 'S')
        .map_err(|_| DmsError::new(format!("unsupported latitude format: {text}")))?;
    let value = convert(text)?;
    if !(-90.0..=90.0).contains(&value) {
        return Err(DmsError::new(format!("out of range -90 to 90: {text}")));
    }
    Ok(value)
}

/// Parses a longitude string in any supported notation to decimal degrees.
/// A direction letter, when present, must be E or W.
pub fn parse_longitude(text: &str) -> Result<f64, DmsError> {
    check_direction(text, 'E', 'W')
        .map_err(|_| DmsError::new(format!("unsupported longitude format: {text}")))?;
    let value = convert(text)?;
    if !(-180.0..=180.0).contains(&value) {
        return Err(DmsError::new(format!("out of range -180 to 180: {text}")));
    }
    Ok(value)
}

/// Formats a latitude with a trailing N/S letter, never a leading sign.
pub fn format_latitude(latitude: f64, format: DmsFormat) -> Result<String, DmsError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(DmsError::new(format!("out of range -90 to 90: {latitude}")));
    }
    let suffix = if latitude >= 0.0 { 'N' } else { 'S' };
    Ok(format!("{}{suffix}", to_text(latitude.abs(), format)))
}

/// Formats a longitude with a trailing E/W letter, never a leading sign.
pub fn format_longitude(longitude: f64, format: DmsFormat) -> Result<String, DmsError> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(DmsError::new(format!("out of range -180 to 180: {longitude}")));
    }
    let suffix = if longitude >= 0.0 { 'E' } else { 'W' };
    Ok(format!("{}{suffix}", to_text(longitude.abs(), format)))
}

/// Rejects text whose trailing direction letter belongs to the other axis.
/// A degree glyph with no direction letter at all is also rejected.
fn check_direction(text: &str, positive: char, negative: char) -> Result<(), ()> {
    match text.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => {
            let c = c.to_ascii_uppercase();
            if c == positive || c == negative {
                Ok(())
            } else {
                Err(())
            }
        }
        _ if text.contains('°') => Err(()),
        _ => Ok(()),
    }
}

/// Converts one coordinate string to decimal degrees.
///
/// Spaces are ignored. A trailing direction letter (optionally preceded by a
/// field glyph) fixes the sign and is mutually exclusive with a leading
/// minus. Field separators beyond the third are ignored, so `51:30:26:0`
/// reads as 51°30'26".
fn convert(text: &str) -> Result<f64, DmsError> {
    let err = || DmsError::new(format!("unsupported coordinate: {text}"));

    let mut chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Err(err());
    }

    let mut negative = false;
    let mut has_suffix = false;
    if let Some(&last) = chars.last()
        && matches!(last.to_ascii_uppercase(), 'N' | 'E' | 'S' | 'W')
    {
        has_suffix = true;
        negative = matches!(last.to_ascii_uppercase(), 'S' | 'W');
        chars.pop();
        if matches!(chars.last(), Some('°' | '\'' | '"')) {
            chars.pop();
        }
    }
    if chars.first() == Some(&'-') {
        if has_suffix {
            // "-51.5S" is ambiguous; the notations cannot be mixed
            return Err(err());
        }
        negative = true;
        chars.remove(0);
    }

    let normalized: String = chars
        .into_iter()
        .map(|c| if c == '°' || c == '\'' { ':' } else { c })
        .collect();

    let tokens: Vec<&str> = normalized.split(':').filter(|t| !t.is_empty()).collect();
    let value = match tokens.as_slice() {
        [] => return Err(err()),
        [degrees] => degrees.parse::<f64>().map_err(|_| err())?,
        rest => {
            let degrees: i64 = rest[0].parse().map_err(|_| err())?;
            let (minutes, seconds) = if rest.len() >= 3 {
                let minutes: i64 = rest[1].parse().map_err(|_| err())?;
                let seconds: f64 = rest[2].parse().map_err(|_| err())?;
                (minutes as f64, seconds)
            } else {
                (rest[1].parse::<f64>().map_err(|_| err())?, 0.0)
            };

            let is_negative_180 = negative && degrees == 180 && minutes == 0.0 && seconds == 0.0;
            if degrees < 0 || (degrees > 180 && !is_negative_180) {
                return Err(err());
            }
            if !(0.0..=59.0).contains(&minutes) || !(0.0..=59.0).contains(&seconds) {
                return Err(err());
            }

            (degrees as f64 * 3600.0 + minutes * 60.0 + seconds) / 3600.0
        }
    };

    Ok(if negative { -value } else { value })
}

fn to_text(coordinate: f64, format: DmsFormat) -> String {
    match format {
        DmsFormat::Degrees => format!("{}°", trim_decimal(coordinate, 5)),
        DmsFormat::Minutes => {
            let degrees = coordinate.floor();
            let minutes = (coordinate - degrees) * 60.0;
            format!("{}°{}'", degrees as i64, trim_decimal(minutes, 3))
        }
        DmsFormat::Seconds => {
            let degrees = coordinate.floor();
            let whole_minutes = ((coordinate - degrees) * 60.0).floor();
            let seconds = ((coordinate - degrees) * 60.0 - whole_minutes) * 60.0;
            // half-up at one decimal place
            let seconds = (seconds * 10.0).round() / 10.0;
            format!(
                "{}°{:02}'{:04.1}\"",
                degrees as i64, whole_minutes as i64, seconds
            )
        }
    }
}

/// Renders with at most `places` decimals, trailing zeros trimmed.
fn trim_decimal(value: f64, places: usize) -> String {
    let text = format!("{value:.places$}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}
