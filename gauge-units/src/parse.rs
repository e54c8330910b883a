//! Unit string parsing - parse inputs like "KB", "1.5 KB" or "5 km to mi"

use crate::unit::{AnyUnit, ConversionError};
use crate::units::UNITS;

/// Parse a unit symbol or name into a unit
pub fn parse_unit(s: &str) -> Result<AnyUnit, ConversionError> {
    let s = s.trim();
    UNITS.get(s).ok_or_else(|| ConversionError::UnknownUnit(s.to_string()))
}

/// Parse a quantity like "1.5 KB", "20°C" or "2 fl oz"
pub fn parse_quantity_string(s: &str) -> Result<(f64, AnyUnit), ConversionError> {
    let s = s.trim();
    let (number, unit) = split_number(s);

    if number.is_empty() {
        return Err(ConversionError::InvalidQuantity(format!("missing number in '{}'", s)));
    }
    if unit.is_empty() {
        return Err(ConversionError::InvalidQuantity(format!("missing unit in '{}'", s)));
    }

    let value: f64 = number.parse()
        .map_err(|_| ConversionError::InvalidQuantity(format!("bad number '{}'", number)))?;
    if !value.is_finite() {
        return Err(ConversionError::InvalidQuantity(format!("number '{}' is not finite", number)));
    }

    Ok((value, parse_unit(unit)?))
}

/// Parse a conversion request like "5 km to mi", "3 cups in ml" or
/// "1024 B -> KB"
pub fn parse_conversion(s: &str) -> Result<(f64, AnyUnit, AnyUnit), ConversionError> {
    let s = s.trim();

    let (source, target) = ["->", " to ", " in "]
        .iter()
        .find_map(|sep| s.rsplit_once(sep))
        .ok_or_else(|| ConversionError::InvalidQuantity(
            format!("expected '<value> <unit> to <unit>', got '{}'", s)
        ))?;

    let (value, from) = parse_quantity_string(source)?;
    let to = parse_unit(target)?;
    Ok((value, from, to))
}

/// Split "1.5KB" or "1.5 KB" into the numeric prefix and the rest.
///
/// An `e`/`E` only counts as an exponent marker when a digit (optionally
/// signed) follows, so "3EB" reads as three exabytes.
fn split_number(s: &str) -> (&str, &str) {
    let bytes = s.as_bytes();
    let mut end = 0;

    while end < bytes.len() {
        let c = bytes[end];
        let exponent = (c == b'e' || c == b'E') && end > 0 && {
            let mut next = end + 1;
            if next < bytes.len() && (bytes[next] == b'+' || bytes[next] == b'-') {
                next += 1;
            }
            next < bytes.len() && bytes[next].is_ascii_digit()
        };
        let sign = (c == b'+' || c == b'-')
            && (end == 0 || bytes[end - 1] == b'e' || bytes[end - 1] == b'E');

        if c.is_ascii_digit() || c == b'.' || exponent || sign {
            end += 1;
        } else {
            break;
        }
    }

    (&s[..end], s[end..].trim())
}
