use crate::model::Num;

/// Parse a number written with `.` as thousands separator and `,` as
/// decimal separator (`"1.234,56"` → 1234.56).
///
/// Anything that does not parse (empty cells, dashes, text) is missing.
pub fn parse_locale_number(text: &str) -> Num {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().map_or(Num::missing(), Num::new)
}
