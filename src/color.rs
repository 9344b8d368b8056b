//! Colour parsing and comparison for inline style overrides.
//!
//! Stored colours are `#rgb` / `#rrggbb` strings, but browsers echo inline
//! colours back as `rgb(r, g, b)`. Comparisons therefore go through parsed
//! channels so an unchanged override is recognised as unchanged.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse the `rgb(r, g, b)` form browsers use when serializing inline colours.
pub fn parse_css_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let inner = raw.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = decimal(parts.next()?)?;
    let g = decimal(parts.next()?)?;
    let b = decimal(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b))
}

/// Parse either supported colour notation.
pub fn parse_color(raw: &str) -> Option<(u8, u8, u8)> {
    parse_hex_rgb(raw).or_else(|| parse_css_rgb(raw))
}

/// Normalize a hex colour to canonical lowercase `#rrggbb`, the only form a
/// colour picker accepts.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    let (r, g, b) = parse_hex_rgb(value)?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Whether two colour strings denote the same colour.
///
/// Falls back to exact string comparison when either side is not a colour
/// this module understands (including the empty "no override" value).
pub fn same_color(a: &str, b: &str) -> bool {
    match (parse_color(a), parse_color(b)) {
        (Some(left), Some(right)) => left == right,
        _ => a == b,
    }
}

fn channel(hex: &str) -> Option<u8> {
    match u8::from_str_radix(hex, 16) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn decimal(raw: &str) -> Option<u8> {
    match raw.parse::<u8>() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}
