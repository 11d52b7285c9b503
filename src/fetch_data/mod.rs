pub mod prices;
pub mod table;

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::{Settings, SourceConfig};
use crate::enrich;
use crate::model::{EnrichedRow, QuoteRow};

use prices::{PriceSource, StaticPrices, YahooPrices};

/// Where the board HTML comes from.
#[derive(Debug, Clone)]
pub enum QuoteInput {
    Url(String),
    /// A saved copy of the page.
    File(PathBuf),
}

impl QuoteInput {
    /// `--html` wins over the configured URL.
    pub fn resolve(html: Option<PathBuf>, url: Option<String>, source: &SourceConfig) -> Self {
        match (html, url) {
            (Some(path), _) => QuoteInput::File(path),
            (None, Some(url)) => QuoteInput::Url(url),
            (None, None) => QuoteInput::Url(source.quotes_url.clone()),
        }
    }
}

pub fn http_client(source: &SourceConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(source.timeout_secs))
        .user_agent(&source.user_agent)
        .build()
        .context("creating HTTP client")
}

/// Spot prices from a JSON file when given, Yahoo Finance otherwise.
pub fn price_source(
    client: &reqwest::Client,
    source: &SourceConfig,
    prices_file: Option<&std::path::Path>,
) -> Result<Box<dyn PriceSource>> {
    Ok(match prices_file {
        Some(path) => Box::new(StaticPrices::load(path)?),
        None => Box::new(YahooPrices::new(client.clone(), source)),
    })
}

pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching {url}"))?
        .text()
        .await
        .with_context(|| format!("reading body of {url}"))
}

/// Download (or read) the board and parse its quote table.
pub async fn load_quotes(
    client: &reqwest::Client,
    input: &QuoteInput,
    table_class: &str,
) -> Result<Vec<QuoteRow>> {
    let html = match input {
        QuoteInput::Url(url) => fetch_page(client, url).await?,
        QuoteInput::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
    };
    let quotes = table::parse_quote_table(&html, table_class).context("parsing quote table")?;
    tracing::info!(rows = quotes.len(), "quote table loaded");
    Ok(quotes)
}

/// Settings plus the chosen quote and price inputs, as given on the command line.
pub struct MarketSource {
    pub settings: Settings,
    pub input: QuoteInput,
    /// Static spot prices instead of Yahoo Finance.
    pub prices_file: Option<PathBuf>,
}

impl MarketSource {
    /// Run [`load_market`] to completion on a fresh runtime.
    pub fn load_blocking(&self, show_progress: bool) -> Result<Vec<EnrichedRow>> {
        self.settings.validate()?;
        let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
        rt.block_on(async {
            let client = http_client(&self.settings.source)?;
            let prices = price_source(&client, &self.settings.source, self.prices_file.as_deref())?;
            load_market(&client, &self.settings, &self.input, prices.as_ref(), show_progress).await
        })
    }
}

/// Full input side of the pipeline: quotes, decoding, spot prices.
pub async fn load_market(
    client: &reqwest::Client,
    settings: &Settings,
    input: &QuoteInput,
    prices: &dyn PriceSource,
    show_progress: bool,
) -> Result<Vec<EnrichedRow>> {
    let quotes = load_quotes(client, input, &settings.source.table_class).await?;
    let underlyings = enrich::unique_underlyings(&quotes);
    tracing::info!(underlyings = underlyings.len(), "looking up spot prices");

    let spots = prices::lookup_spots(prices, &underlyings, show_progress).await?;
    let missing: Vec<&str> = spots
        .iter()
        .filter(|(_, spot)| spot.is_missing())
        .map(|(symbol, _)| symbol.as_str())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(symbols = ?missing, "no spot price; their pairs will be excluded");
    }

    enrich::enrich(quotes, &spots, settings.spread.spot_multiplier)
}
