pub mod num;
pub mod option;
pub mod quote;

pub use num::Num;
pub use option::{DecodedOption, Expiration, OptionType};
pub use quote::{EnrichedRow, QUOTE_COLUMNS, QUOTE_HEADERS, QuoteRow};
