use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::fetch_data::MarketSource;
use crate::model::{EnrichedRow, Num};

/// Flat CSV view of an enriched row.
#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub underlying: &'a str,
    pub code: &'a str,
    pub option_type: char,
    pub strike: f64,
    pub expiration: &'static str,
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
    pub time: &'a str,
    pub spot: Num,
    pub spot_threshold: Num,
}

impl<'a> From<&'a EnrichedRow> for ExportRow<'a> {
    fn from(r: &'a EnrichedRow) -> Self {
        let q = &r.quote;
        Self {
            underlying: &q.underlying,
            code: &q.code,
            option_type: r.option_type().tag(),
            strike: r.strike(),
            expiration: r.expiration().label(),
            bid_size: q.bid_size,
            bid: q.bid,
            ask: q.ask,
            ask_size: q.ask_size,
            last: q.last,
            change: q.change,
            open: q.open,
            high: q.high,
            low: q.low,
            prev_close: q.prev_close,
            volume: q.volume,
            turnover: q.turnover,
            trades: q.trades,
            time: &q.time,
            spot: r.spot,
            spot_threshold: r.spot_threshold,
        }
    }
}

/// Serialize rows as CSV with a header line. Missing values are empty cells.
pub fn write_csv<W: Write>(writer: W, rows: &[EnrichedRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(ExportRow::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub struct ExportConfig {
    pub source: MarketSource,
    /// Stdout when absent.
    pub output: Option<PathBuf>,
}

/// Entry point for the `export` command.
pub fn run(config: &ExportConfig) -> Result<()> {
    let rows = config.source.load_blocking(false)?;

    match &config.output {
        Some(path) => write_file(path, &rows)?,
        None => write_csv(std::io::stdout().lock(), &rows)?,
    }
    tracing::info!(rows = rows.len(), "quote table exported");
    Ok(())
}

fn write_file(path: &Path, rows: &[EnrichedRow]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating CSV file {}", path.display()))?;
    write_csv(file, rows).with_context(|| format!("writing CSV file {}", path.display()))
}
