use clap::Parser;

use bull_spread::config::Settings;
use bull_spread::fetch_data::{MarketSource, QuoteInput};
use bull_spread::{api, decode, export, report, telemetry};

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose);

    match cli.command {
        cli::Command::Report {
            source,
            spread,
            output_dir,
            json,
            no_ascii,
            show_quotes,
        } => report::run(&report::ReportConfig {
            source: market_source(source, spread)?,
            output_dir,
            json,
            ascii: !no_ascii,
            show_quotes,
        }),
        cli::Command::Serve {
            source,
            spread,
            host,
            port,
        } => api::run(&host, port, market_source(source, spread)?),
        cli::Command::Decode { codes } => decode::run(&codes),
        cli::Command::Export {
            source,
            spread,
            output,
        } => export::run(&export::ExportConfig {
            source: market_source(source, spread)?,
            output,
        }),
    }
}

/// Config file, then CLI overrides.
fn market_source(source: cli::SourceArgs, spread: cli::SpreadArgs) -> anyhow::Result<MarketSource> {
    let mut settings = Settings::load_or_default(source.config.as_deref())?;
    settings.spread = settings.spread.merged(
        spread.lot_size,
        spread.max_percentage_difference,
        spread.spot_multiplier,
    );
    let input = QuoteInput::resolve(source.html, source.url, &settings.source);
    Ok(MarketSource {
        settings,
        input,
        prices_file: source.prices,
    })
}
