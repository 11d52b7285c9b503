use serde::Serialize;

use super::num::Num;
use super::option::{DecodedOption, Expiration, OptionType};

/// Number of cells in a data row of the options board.
pub const QUOTE_COLUMNS: usize = 16;

/// Header names of the board, in source order.
pub const QUOTE_HEADERS: [&str; QUOTE_COLUMNS] = [
    "Activo Subyacente",
    "Especie",
    "Cant. Nominal",
    "Compra",
    "Venta",
    "Cant. Nominal",
    "Último",
    "Variación",
    "Apertura",
    "Máx",
    "Mín",
    "Cierre Ant.",
    "Vol. Nominal",
    "Monto",
    "Cant. Ope.",
    "Hora",
];

/// One row of the options board with numeric cells normalised.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRow {
    pub underlying: String,
    pub code: String,
    pub bid_size: Num,
    pub bid: Num,
    pub ask: Num,
    pub ask_size: Num,
    pub last: Num,
    pub change: Num,
    pub open: Num,
    pub high: Num,
    pub low: Num,
    pub prev_close: Num,
    pub volume: Num,
    pub turnover: Num,
    pub trades: Num,
    pub time: String,
}

/// A quote row joined with its decoded option and the underlying spot.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRow {
    #[serde(flatten)]
    pub quote: QuoteRow,
    #[serde(flatten)]
    pub option: DecodedOption,
    pub spot: Num,
    /// `spot * spot_multiplier`; the highest strike accepted for the bought leg.
    pub spot_threshold: Num,
}

impl EnrichedRow {
    pub fn underlying(&self) -> &str {
        &self.quote.underlying
    }

    pub fn code(&self) -> &str {
        &self.quote.code
    }

    pub fn strike(&self) -> f64 {
        self.option.strike
    }

    pub fn last(&self) -> Num {
        self.quote.last
    }

    pub fn option_type(&self) -> OptionType {
        self.option.option_type
    }

    pub fn expiration(&self) -> Expiration {
        self.option.expiration
    }
}
