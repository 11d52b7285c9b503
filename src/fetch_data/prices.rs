use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SourceConfig;
use crate::model::Num;

/// Spot price lookup for an underlying symbol as listed on the board.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest close, or missing when the provider has no data for the symbol.
    async fn spot_price(&self, underlying: &str) -> Result<Num>;
}

// ── Yahoo Finance ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// One-day close from the Yahoo Finance chart API, keyed by
/// `{symbol}{suffix}` (e.g. `GGAL.BA`).
pub struct YahooPrices {
    client: reqwest::Client,
    base_url: String,
    suffix: String,
}

impl YahooPrices {
    pub fn new(client: reqwest::Client, source: &SourceConfig) -> Self {
        Self {
            client,
            base_url: source.yahoo_base_url.trim_end_matches('/').to_string(),
            suffix: source.ticker_suffix.clone(),
        }
    }

    pub fn ticker(&self, underlying: &str) -> String {
        format!("{underlying}{}", self.suffix)
    }
}

#[async_trait]
impl PriceSource for YahooPrices {
    async fn spot_price(&self, underlying: &str) -> Result<Num> {
        let ticker = self.ticker(underlying);
        let url = format!("{}/v8/finance/chart/{ticker}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .with_context(|| format!("requesting chart for {ticker}"))?;

        // Unknown tickers answer 404 with an error body.
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!(%ticker, "no chart data, spot price missing");
            return Ok(Num::missing());
        }

        let body: ChartResponse = resp
            .error_for_status()
            .with_context(|| format!("chart request for {ticker}"))?
            .json()
            .await
            .with_context(|| format!("decoding chart response for {ticker}"))?;

        Ok(last_close(&body).into())
    }
}

/// Last non-null close of the first series.
fn last_close(body: &ChartResponse) -> Option<f64> {
    body.chart
        .result
        .as_ref()?
        .first()?
        .indicators
        .quote
        .first()?
        .close
        .iter()
        .rev()
        .find_map(|c| *c)
}

// ── Static prices ────────────────────────────────────────────────────

/// Fixed spot prices, e.g. loaded from `{ "GGAL": 4520.0 }`.
#[derive(Debug, Clone, Default)]
pub struct StaticPrices {
    prices: HashMap<String, f64>,
}

impl StaticPrices {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        Self { prices }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading prices {}", path.display()))?;
        let prices = serde_json::from_str(&contents)
            .with_context(|| format!("parsing prices {}", path.display()))?;
        Ok(Self::new(prices))
    }
}

#[async_trait]
impl PriceSource for StaticPrices {
    async fn spot_price(&self, underlying: &str) -> Result<Num> {
        Ok(self.prices.get(underlying).copied().into())
    }
}

// ── Lookup ───────────────────────────────────────────────────────────

/// Look up each symbol once, one request at a time.
pub async fn lookup_spots(
    source: &dyn PriceSource,
    underlyings: &[String],
    show_progress: bool,
) -> Result<HashMap<String, Num>> {
    let pb = if show_progress {
        indicatif::ProgressBar::new(underlyings.len() as u64)
    } else {
        indicatif::ProgressBar::hidden()
    };
    pb.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("  spot prices [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut spots = HashMap::with_capacity(underlyings.len());
    for symbol in underlyings {
        pb.set_message(symbol.clone());
        let spot = source.spot_price(symbol).await?;
        tracing::debug!(%symbol, %spot, "spot price");
        spots.insert(symbol.clone(), spot);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(spots)
}
