use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};

use crate::decode::decode;
use crate::model::{EnrichedRow, Num, QuoteRow};

/// Underlying symbols in order of first appearance.
pub fn unique_underlyings(quotes: &[QuoteRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    quotes
        .iter()
        .filter(|q| seen.insert(q.underlying.as_str()))
        .map(|q| q.underlying.clone())
        .collect()
}

/// Decode every instrument code and join the spot price of its underlying.
///
/// A code that cannot be decoded aborts the whole batch. Symbols absent from
/// `spots` get a missing spot, and so a missing threshold.
pub fn enrich(
    quotes: Vec<QuoteRow>,
    spots: &HashMap<String, Num>,
    spot_multiplier: f64,
) -> Result<Vec<EnrichedRow>> {
    quotes
        .into_iter()
        .enumerate()
        .map(|(i, quote)| {
            let option = decode(&quote.code)
                .with_context(|| format!("decoding row {} ({})", i + 1, quote.underlying))?;
            let spot = spots.get(&quote.underlying).copied().unwrap_or_default();
            Ok(EnrichedRow {
                quote,
                option,
                spot,
                spot_threshold: spot * spot_multiplier,
            })
        })
        .collect()
}
