use std::fmt;

use chrono::Month;
use serde::{Serialize, Serializer};

/// Option class tag carried at a fixed position of the instrument code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// `C`
    Call,
    /// `V` (venta)
    Put,
    Other(char),
}

impl OptionType {
    pub fn from_tag(tag: char) -> Self {
        match tag {
            'C' => OptionType::Call,
            'V' => OptionType::Put,
            other => OptionType::Other(other),
        }
    }

    /// The source character, unchanged.
    pub fn tag(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'V',
            OptionType::Other(c) => *c,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
            OptionType::Other(_) => "Other",
        }
    }
}

impl Serialize for OptionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.tag())
    }
}

/// Expiration month of an option series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expiration {
    Month(Month),
    Unknown,
}

impl Expiration {
    pub const UNKNOWN_LABEL: &'static str = "Unknown";

    /// Local month name, or the `Unknown` sentinel.
    pub fn label(&self) -> &'static str {
        match self {
            Expiration::Month(m) => match m {
                Month::January => "Enero",
                Month::February => "Febrero",
                Month::March => "Marzo",
                Month::April => "Abril",
                Month::May => "Mayo",
                Month::June => "Junio",
                Month::July => "Julio",
                Month::August => "Agosto",
                Month::September => "Septiembre",
                Month::October => "Octubre",
                Month::November => "Noviembre",
                Month::December => "Diciembre",
            },
            Expiration::Unknown => Self::UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl Serialize for Expiration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Fields derived from an instrument code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedOption {
    pub option_type: OptionType,
    pub strike: f64,
    pub expiration: Expiration,
}
