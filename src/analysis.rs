use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SpreadConfig;
use crate::model::{EnrichedRow, Expiration, Num};
use crate::payoff::PayoffCurve;
use crate::select::{self, CandidatePair};

pub const NO_PAIRS_NOTICE: &str = "No valid bull spread pairs found.";

#[derive(Debug, Clone, Serialize)]
pub struct Leg {
    pub code: String,
    pub strike: f64,
    pub price: Num,
}

/// One selected spread and its payoff curve.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadEntry {
    /// 1-based position in the report.
    pub number: usize,
    #[serde(skip)]
    pub pair: CandidatePair,
    pub underlying: String,
    pub expiration: Expiration,
    pub buy: Leg,
    pub sell: Leg,
    pub spot: Num,
    pub spot_threshold: Num,
    pub percentage: Num,
    /// Absent when a leg has no last price.
    pub curve: Option<PayoffCurve>,
}

impl SpreadEntry {
    fn new(number: usize, pair: CandidatePair, config: &SpreadConfig) -> Self {
        let curve = PayoffCurve::from_pair(&pair, config);
        if curve.is_none() {
            tracing::warn!(
                buy = pair.lower.code(),
                sell = pair.upper.code(),
                "leg without last price, payoff not drawn"
            );
        }
        Self {
            number,
            underlying: pair.underlying().to_string(),
            expiration: pair.lower.expiration(),
            buy: leg(&pair.lower),
            sell: leg(&pair.upper),
            spot: pair.lower.spot,
            spot_threshold: pair.lower.spot_threshold,
            percentage: pair.percentage,
            curve,
            pair,
        }
    }
}

fn leg(row: &EnrichedRow) -> Leg {
    Leg {
        code: row.code().to_string(),
        strike: row.strike(),
        price: row.last(),
    }
}

/// Result of one pass of the selector over a market snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SpreadReport {
    pub generated_at: DateTime<Utc>,
    pub config: SpreadConfig,
    pub quotes: usize,
    pub candidates: usize,
    pub spreads: Vec<SpreadEntry>,
}

impl SpreadReport {
    pub fn is_empty(&self) -> bool {
        self.spreads.is_empty()
    }

    pub fn print_table(&self) {
        println!("\n{}", "═".repeat(118));
        println!(
            "  Bull spreads: {} selected of {} candidates ({} quotes, lot {}, max {}%, spot x{})",
            self.spreads.len(),
            self.candidates,
            self.quotes,
            self.config.lot_size,
            self.config.max_percentage_difference,
            self.config.spot_multiplier,
        );
        println!("{}", "═".repeat(118));
        if self.is_empty() {
            println!("  {NO_PAIRS_NOTICE}");
            return;
        }
        println!(
            "  {:>3} {:<8} {:<11} {:<12} {:<12} {:>9} {:>9} {:>9} {:>11} {:>11} {:>9}",
            "#", "Asset", "Expiration", "Buy", "Sell", "Spot", "Cost", "Pct", "MaxProfit", "MaxLoss", "BE",
        );
        println!("  {}", "-".repeat(112));
        for e in &self.spreads {
            let (max_p, max_l, be) = match &e.curve {
                Some(c) => (
                    format!("{:+.0}", c.max_profit()),
                    format!("{:+.0}", c.max_loss()),
                    c.breakeven().map_or("-".into(), |b| format!("{b:.2}")),
                ),
                None => ("-".into(), "-".into(), "-".into()),
            };
            println!(
                "  {:>3} {:<8} {:<11} {:<12} {:<12} {:>9.2} {:>9.2} {:>8.1}% {:>11} {:>11} {:>9}",
                e.number,
                e.underlying,
                e.expiration.label(),
                e.buy.code,
                e.sell.code,
                e.spot,
                e.buy.price - e.sell.price,
                e.percentage,
                max_p,
                max_l,
                be,
            );
        }
        println!("{}", "═".repeat(118));
    }
}

/// Select pairs and compute their payoff curves.
pub fn analyze(rows: &[EnrichedRow], config: &SpreadConfig) -> SpreadReport {
    let candidates = select::candidate_pairs(rows);
    let total = candidates.len();
    let spreads: Vec<SpreadEntry> = select::filter_pairs(candidates, config)
        .into_iter()
        .enumerate()
        .map(|(i, pair)| SpreadEntry::new(i + 1, pair, config))
        .collect();

    SpreadReport {
        generated_at: Utc::now(),
        config: *config,
        quotes: rows.len(),
        candidates: total,
        spreads,
    }
}
