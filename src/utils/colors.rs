//! ARGB color parsing for item colors.

/// Parse `#RRGGBB` (alpha forced opaque) or `#AARRGGBB` into a packed ARGB
/// integer.
pub fn parse_argb(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        6 => u32::from_str_radix(hex, 16)
            .ok()
            .map(|rgb| 0xFF00_0000 | rgb),
        8 => u32::from_str_radix(hex, 16).ok(),
        _ => None,
    }
}

/// Render a packed ARGB value back to `#AARRGGBB`.
pub fn format_argb(color: u32) -> String {
    format!("#{:08X}", color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_as_opaque() {
        assert_eq!(parse_argb("#2196F3"), Some(0xFF21_96F3));
    }

    #[test]
    fn parses_full_argb() {
        assert_eq!(parse_argb("#80FF0000"), Some(0x80FF_0000));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_argb("2196F3").is_none()); // missing '#'
        assert!(parse_argb("#12345").is_none()); // wrong length
        assert!(parse_argb("#GGGGGG").is_none()); // not hex
    }

    #[test]
    fn round_trips_through_format() {
        let c = parse_argb("#80ABCDEF").unwrap();
        assert_eq!(format_argb(c), "#80ABCDEF");
    }
}
