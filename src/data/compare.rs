use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Parse a cell the way a German-formatted number is read: `.` groups
/// thousands, the first `,` is the decimal separator.
///
/// Like JavaScript's `parseFloat`, only the longest numeric prefix is used,
/// so `"12 kg"` parses as 12 while `"kg 12"` does not parse at all.
pub fn parse_localized_number(text: &str) -> Option<f64> {
    let normalized = text.replace('.', "").replacen(',', ".", 1);
    parse_float_prefix(&normalized)
}

fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    // parseFloat accepts the literal Infinity
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        mantissa_digits += fraction_end - fraction_start;
        if mantissa_digits > 0 {
            end = fraction_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Collation key for German text at base strength: case and diacritics
/// are folded, `ß` expands to `ss`.
pub fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        match c {
            'ß' | 'ẞ' => key.push_str("ss"),
            'æ' | 'Æ' => key.push_str("ae"),
            'œ' | 'Œ' => key.push_str("oe"),
            'ø' | 'Ø' => key.push('o'),
            'đ' | 'Đ' => key.push('d'),
            'ł' | 'Ł' => key.push('l'),
            _ => key.extend(c.to_lowercase()),
        }
    }
    key
}

/// Compare two locale-formatted text values.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Compare two cell values for sorting.
///
/// If both sides parse as numbers they are compared numerically, otherwise
/// both are compared as text. The choice is made per pair.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_localized_number(a), parse_localized_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => compare_text(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german_number_parsing() {
        assert_eq!(parse_localized_number("1.234,5"), Some(1234.5));
        assert_eq!(parse_localized_number("987"), Some(987.0));
        assert_eq!(parse_localized_number("-0,25"), Some(-0.25));
        assert_eq!(parse_localized_number("1.000.000"), Some(1_000_000.0));
    }

    #[test]
    fn test_parse_prefix_semantics() {
        assert_eq!(parse_localized_number("12 t"), Some(12.0));
        assert_eq!(parse_localized_number("3,5%"), Some(3.5));
        assert_eq!(parse_localized_number("1e3"), Some(1000.0));
        assert_eq!(parse_localized_number("2e"), Some(2.0));
        assert_eq!(parse_localized_number(",5"), Some(0.5));
        assert_eq!(parse_localized_number("abc"), None);
        assert_eq!(parse_localized_number(""), None);
        assert_eq!(parse_localized_number("-"), None);
        assert_eq!(parse_localized_number("t 12"), None);
    }

    #[test]
    fn test_numeric_precedence() {
        // Lexically "1.234,5" < "987", numerically it is larger
        assert_eq!(compare_cells("1.234,5", "987"), Ordering::Greater);
        assert_eq!(compare_cells("9", "10"), Ordering::Less);
    }

    #[test]
    fn test_mixed_pair_falls_back_to_text() {
        // Digits sort before letters in text order
        assert_eq!(compare_cells("abc", "12"), Ordering::Greater);
        assert_eq!(compare_cells("12", "abc"), Ordering::Less);
    }

    #[test]
    fn test_base_strength_folding() {
        assert_eq!(compare_text("Äpfel", "apfel"), Ordering::Equal);
        assert_eq!(compare_text("Straße", "STRASSE"), Ordering::Equal);
        assert_eq!(compare_text("Österreich", "Zypern"), Ordering::Less);
        assert_eq!(compare_text("éclair", "Eclair"), Ordering::Equal);
        assert_eq!(compare_text("Müller", "Mueller"), Ordering::Greater);
    }

    #[test]
    fn test_empty_sorts_first_in_text_order() {
        assert_eq!(compare_cells("", "a"), Ordering::Less);
        assert_eq!(compare_cells("", ""), Ordering::Equal);
    }
}
