//! Instrument-code decoding.
//!
//! BYMA option codes pack the series into a short ticker, e.g. `GFGC2380OC`:
//!
//! ```text
//!  G F G  C  2 3 8 0  O C
//!  └─┬─┘  │  └──┬──┘  └┬┘
//!   root type strike  month
//! ```
//!
//! Strikes with a decimal place drop one month letter and move the extra
//! digit into its slot (`GFGC10577F` is strike 1057.7, February), which is
//! why both the strike and the month are read relative to the
//! second-to-last character.

use chrono::Month;
use thiserror::Error;

use crate::model::{DecodedOption, Expiration, OptionType};

const TYPE_INDEX: usize = 3;
const STRIKE_START: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("instrument code `{code}` is too short ({len} chars, need at least {needed})")]
    TooShort {
        code: String,
        len: usize,
        needed: usize,
    },

    #[error("instrument code `{code}` has no numeric strike (got `{strike}`)")]
    InvalidStrike { code: String, strike: String },
}

/// Option class tag at index 3 of the code.
pub fn decode_option_type(code: &str) -> Result<OptionType, DecodeError> {
    code.chars()
        .nth(TYPE_INDEX)
        .map(OptionType::from_tag)
        .ok_or_else(|| too_short(code, TYPE_INDEX + 1))
}

/// Strike price encoded between the type tag and the month code.
pub fn decode_strike(code: &str) -> Result<f64, DecodeError> {
    let chars: Vec<char> = code.chars().collect();
    let len = chars.len();
    let penultimate = penultimate(code, &chars)?;

    let (end, scale) = if penultimate.is_ascii_digit() {
        (len - 1, 10.0)
    } else {
        (len - 2, 1.0)
    };
    let strike: String = chars
        .get(STRIKE_START..end)
        .map(|s| s.iter().collect())
        .unwrap_or_default();

    strike
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v / scale)
        .ok_or_else(|| DecodeError::InvalidStrike {
            code: code.to_string(),
            strike,
        })
}

/// Expiration month from the trailing one or two characters.
pub fn decode_expiration(code: &str) -> Result<Expiration, DecodeError> {
    let chars: Vec<char> = code.chars().collect();
    let penultimate = penultimate(code, &chars)?;
    let last = chars[chars.len() - 1];

    let month = if penultimate.is_ascii_digit() {
        month_from_letter(last)
    } else {
        month_from_pair(penultimate, last)
    };
    Ok(month.map_or(Expiration::Unknown, Expiration::Month))
}

/// Decode type, strike and expiration in one go.
pub fn decode(code: &str) -> Result<DecodedOption, DecodeError> {
    Ok(DecodedOption {
        option_type: decode_option_type(code)?,
        strike: decode_strike(code)?,
        expiration: decode_expiration(code)?,
    })
}

fn month_from_pair(first: char, second: char) -> Option<Month> {
    let month = match (first, second) {
        ('E', 'N') => Month::January,
        ('F', 'E') => Month::February,
        ('M', 'R') => Month::March,
        ('A', 'B') => Month::April,
        ('M', 'Y') => Month::May,
        ('J', 'N') => Month::June,
        ('J', 'L') => Month::July,
        ('A', 'G') => Month::August,
        ('S', 'E') => Month::September,
        ('O', 'C') => Month::October,
        ('N', 'O') => Month::November,
        ('D', 'I') => Month::December,
        _ => return None,
    };
    Some(month)
}

/// Single-letter series only exist for the even months.
fn month_from_letter(letter: char) -> Option<Month> {
    let month = match letter {
        'F' => Month::February,
        'A' => Month::April,
        'J' => Month::June,
        'G' => Month::August,
        'O' => Month::October,
        'D' => Month::December,
        _ => return None,
    };
    Some(month)
}

fn penultimate(code: &str, chars: &[char]) -> Result<char, DecodeError> {
    match chars.len() {
        len if len >= 2 => Ok(chars[len - 2]),
        _ => Err(too_short(code, 2)),
    }
}

fn too_short(code: &str, needed: usize) -> DecodeError {
    DecodeError::TooShort {
        code: code.to_string(),
        len: code.chars().count(),
        needed,
    }
}

/// CLI entry point for the `decode` subcommand.
pub fn run(codes: &[String]) -> anyhow::Result<()> {
    let mut failures = 0;
    println!("  {:<14} {:<5} {:>10}  {}", "Code", "Type", "Strike", "Expiration");
    for code in codes {
        match decode(code) {
            Ok(d) => println!(
                "  {:<14} {:<5} {:>10}  {}",
                code,
                d.option_type.tag(),
                d.strike,
                d.expiration
            ),
            Err(e) => {
                eprintln!("  {code:<14} error: {e}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} code(s) could not be decoded", codes.len());
    }
    Ok(())
}
