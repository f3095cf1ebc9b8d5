//! Number and text formatting utilities.
//!
//! This module provides common formatting functions used across commands
//! for consistent output presentation.

/// Formats a number with comma separators for thousands.
///
/// # Examples
///
/// ```
/// use har_timing_tools::utils::format::format_number;
///
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Formats an optional float as a CSV cell. Missing and undefined (NaN)
/// values become the empty cell, matching how the original tabular output
/// represented "no value".
pub fn float_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}", v),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(1), "1");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_float_cell() {
        assert_eq!(float_cell(Some(1.5)), "1.5");
        assert_eq!(float_cell(Some(-1.0)), "-1");
        assert_eq!(float_cell(Some(f64::NAN)), "");
        assert_eq!(float_cell(None), "");
    }
}
