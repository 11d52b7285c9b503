//! Bull call spread candidate selection.
//!
//! Calls are grouped by (underlying, expiration) and sorted by strike. Each
//! strike-adjacent window of two rows is a candidate: buy the lower strike,
//! sell the next one up. A candidate is kept when the bought strike is not
//! too far above spot and the sold leg is cheap relative to the strike gap.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::SpreadConfig;
use crate::model::{EnrichedRow, Num, OptionType};

/// Two strike-adjacent calls of the same series.
#[derive(Debug, Clone, Serialize)]
pub struct CandidatePair {
    /// Bought leg (lower strike).
    pub lower: EnrichedRow,
    /// Sold leg (next strike up).
    pub upper: EnrichedRow,
    pub strike_diff: f64,
    /// `upper.last / strike_diff * 100`; missing when the strikes coincide.
    pub percentage: Num,
}

impl CandidatePair {
    pub fn new(lower: EnrichedRow, upper: EnrichedRow) -> Self {
        let strike_diff = upper.strike() - lower.strike();
        let percentage = upper.last() / Num::new(strike_diff) * 100.0;
        Self {
            lower,
            upper,
            strike_diff,
            percentage,
        }
    }

    /// Both filters. Missing spot threshold or percentage never pass.
    pub fn passes(&self, config: &SpreadConfig) -> bool {
        let near_spot = Num::new(self.lower.strike()) <= self.lower.spot_threshold;
        let cheap_upper = self.percentage.le(config.max_percentage_difference);
        near_spot && cheap_upper
    }

    pub fn underlying(&self) -> &str {
        self.lower.underlying()
    }
}

/// Every strike-adjacent pair of calls, group by group.
///
/// Groups come out in (underlying, expiration label) order; pairs within a
/// group in ascending strike order. Duplicate strikes are not merged.
pub fn candidate_pairs(rows: &[EnrichedRow]) -> Vec<CandidatePair> {
    let mut groups: BTreeMap<(&str, &str), Vec<&EnrichedRow>> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.option_type() == OptionType::Call) {
        groups
            .entry((row.underlying(), row.expiration().label()))
            .or_default()
            .push(row);
    }

    let mut pairs = Vec::new();
    for ((underlying, expiration), mut group) in groups {
        group.sort_by(|a, b| a.strike().total_cmp(&b.strike()));
        tracing::debug!(underlying, expiration, calls = group.len(), "call series");
        pairs.extend(
            group
                .windows(2)
                .map(|w| CandidatePair::new(w[0].clone(), w[1].clone())),
        );
    }
    pairs
}

/// Candidates that pass both filters of `config`.
pub fn select_pairs(rows: &[EnrichedRow], config: &SpreadConfig) -> Vec<CandidatePair> {
    filter_pairs(candidate_pairs(rows), config)
}

/// Keep the candidates that pass both filters, in input order.
pub fn filter_pairs(candidates: Vec<CandidatePair>, config: &SpreadConfig) -> Vec<CandidatePair> {
    let total = candidates.len();
    let selected: Vec<CandidatePair> = candidates
        .into_iter()
        .filter(|p| p.passes(config))
        .collect();
    tracing::info!(candidates = total, selected = selected.len(), "pair selection");
    selected
}
