use std::{collections::HashSet, str::FromStr};

use anyhow::*;

/// 千分位分隔符號
pub const THOUSANDS_SEPARATOR: char = ',';

const NUMBER_ESCAPE_CHAR: &[char] = &[THOUSANDS_SEPARATOR, ' ', '"', '\n', '\u{a0}'];

/// 移除千分位逗號，例︰"1,234,567" => "1234567"
pub fn strip_thousands_separator(s: &str) -> String {
    s.replace(THOUSANDS_SEPARATOR, "")
}

/// Parses an `f64` value from a given string.
///
/// Thousands separators, spaces, quotes and line breaks are removed before
/// parsing. Additional characters may be removed through `escape_chars`.
///
/// # Example
///
/// ```
/// let v = parse_f64("1,234.5", None).unwrap();
/// assert_eq!(v, 1234.5);
/// ```
pub fn parse_f64(s: &str, escape_chars: Option<Vec<char>>) -> Result<f64> {
    let cleaned = clean_escape_chars(s, escape_chars);
    f64::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as f64 because {:?}", cleaned, why))
}

/// Removes a set of escape characters from a given string.
///
/// # Example
///
/// ```
/// let s = "Hello$Wor^ld!@#";
/// let clean_s = clean_escape_chars(s, Some(vec!['$', '^', '@', '#']));
/// assert_eq!(clean_s, "HelloWorld!");
/// ```
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}

/// 以逗號或空白分隔的股票清單，例︰"AAPL, MSFT GOOG" => ["AAPL", "MSFT", "GOOG"]
pub fn split_tickers(raw: &str) -> Vec<String> {
    raw.replace(THOUSANDS_SEPARATOR, " ")
        .split_whitespace()
        .map(|t| t.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64("1,500", None).unwrap(), 1500.0);
        assert_eq!(parse_f64(" -2,345.5 ", None).unwrap(), -2345.5);
        assert_eq!(parse_f64("$12", Some(vec!['$'])).unwrap(), 12.0);
        assert!(parse_f64("-", None).is_err());
        assert!(parse_f64("", None).is_err());
    }

    #[test]
    fn test_clean_escape_chars() {
        let result = clean_escape_chars("1, 234\n", Some(vec!['4']));
        assert_eq!(result, "123");
    }

    #[test]
    fn test_split_tickers() {
        assert_eq!(
            split_tickers(" AAPL,MSFT  goog,, BRK-B "),
            vec!["AAPL", "MSFT", "goog", "BRK-B"]
        );
        assert!(split_tickers(" , ").is_empty());
    }
}
