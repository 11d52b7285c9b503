use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::analysis::{self, SpreadReport};
use crate::fetch_data::MarketSource;
use crate::model::EnrichedRow;
use crate::visualize::{self, ChartLabels};

pub struct ReportConfig {
    pub source: MarketSource,
    /// Directory for one SVG chart per selected spread.
    pub output_dir: PathBuf,
    /// Also dump the report as JSON here.
    pub json: Option<PathBuf>,
    pub ascii: bool,
    pub show_quotes: bool,
}

/// Entry point for the `report` command.
pub fn run(config: &ReportConfig) -> Result<()> {
    let rows = config.source.load_blocking(true)?;

    if config.show_quotes {
        print_quotes(&rows);
    }

    let report = analysis::analyze(&rows, &config.source.settings.spread);
    if !report.is_empty() {
        let charts = write_charts(&report, config)?;
        tracing::info!(charts = charts.len(), dir = %config.output_dir.display(), "charts written");
    }
    // Prints the no-pairs notice when nothing qualified.
    report.print_table();

    if let Some(path) = &config.json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}

/// Write `bull_spread_{n}.svg` per spread and print the ASCII charts.
pub fn write_charts(report: &SpreadReport, config: &ReportConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir.display()))?;

    let mut written = Vec::new();
    for entry in &report.spreads {
        let Some(curve) = &entry.curve else {
            continue;
        };
        let labels = ChartLabels::for_pair(&entry.pair, entry.number);
        if config.ascii {
            println!("{}", visualize::render_ascii(curve, &labels));
        }
        let path = config
            .output_dir
            .join(format!("bull_spread_{}.svg", entry.number));
        std::fs::write(&path, visualize::render_svg(curve, &labels))
            .with_context(|| format!("writing chart {}", path.display()))?;
        tracing::debug!(path = %path.display(), "chart written");
        written.push(path);
    }
    Ok(written)
}

/// Every enriched row with every column.
pub fn print_quotes(rows: &[EnrichedRow]) {
    println!(
        "  {:<8} {:<12} {:>4} {:>9} {:>7} {:>10} {:>10} {:>10} {:>11} {:>9} {:>9} {:>10} {:>10} {:>8} {:>10} {:>11} {:>8} {:>6} {:>6} {:>12} {:>9}",
        "Asset", "Code", "Type", "Strike", "Exp", "BidQty", "Bid", "Ask", "AskQty", "Last", "Chg%",
        "Open", "High", "Low", "PrevClose", "Volume", "Turnover", "Trades", "Time", "Spot", "Threshold",
    );
    for r in rows {
        let q = &r.quote;
        println!(
            "  {:<8} {:<12} {:>4} {:>9.2} {:>7.7} {:>10} {:>10.2} {:>10.2} {:>11} {:>9.2} {:>9.2} {:>10.2} {:>10.2} {:>8.2} {:>10.2} {:>11} {:>8} {:>6} {:>6} {:>12.2} {:>9.2}",
            q.underlying,
            q.code,
            r.option_type().tag(),
            r.strike(),
            r.expiration().label(),
            q.bid_size,
            q.bid,
            q.ask,
            q.ask_size,
            q.last,
            q.change,
            q.open,
            q.high,
            q.low,
            q.prev_close,
            q.volume,
            q.turnover,
            q.trades,
            q.time,
            r.spot,
            r.spot_threshold,
        );
    }
}
