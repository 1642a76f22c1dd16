//! Command-line entry point: fetch two feeds, compare, print a report.

use std::io::{self, Write};

use clap::Parser;
use feed_diff::{
    compare_documents, CompareConfig, ComparisonReport, FeedFetcher, ProductComparison,
};

#[derive(Parser)]
#[command(name = "fdiff")]
#[command(version)]
#[command(about = "Compares two XML product catalog feeds field by field", long_about = None)]
struct Cli {
    /// URL of the live feed
    live_url: String,

    /// URL of the server-generated feed
    server_url: String,

    /// Products sampled from each key band
    #[arg(short = 'k', long, default_value_t = feed_diff::DEFAULT_SAMPLES_PER_BAND)]
    samples_per_band: usize,

    /// Field to exclude from comparison (repeatable, replaces the default set)
    #[arg(long = "ignore-field", value_name = "TAG")]
    ignore_fields: Vec<String>,

    /// Field compared by URL path and query only (repeatable, replaces the default set)
    #[arg(long = "url-field", value_name = "TAG")]
    url_fields: Vec<String>,
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CompareConfig::new(cli.live_url, cli.server_url);
    config.samples_per_band = cli.samples_per_band;
    if !cli.ignore_fields.is_empty() {
        config.ignored_fields = cli.ignore_fields.into_iter().collect();
    }
    if !cli.url_fields.is_empty() {
        config.url_fields = cli.url_fields.into_iter().collect();
    }

    let fetcher = FeedFetcher::new()?;
    eprintln!("Fetching live feed: {}", config.live_url);
    let live_xml = fetcher.fetch(&config.live_url)?;
    eprintln!("Fetching server feed: {}", config.server_url);
    let server_xml = fetcher.fetch(&config.server_url)?;

    let report = compare_documents(&live_xml, &server_xml, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    print_report(&mut out, &report, &config)?;
    Ok(())
}

fn print_report<W: Write>(
    out: &mut W,
    report: &ComparisonReport,
    config: &CompareConfig,
) -> io::Result<()> {
    writeln!(
        out,
        "Counts: live={} srv={}",
        report.live_count, report.server_count
    )?;
    writeln!(out, "Common keys: {}", report.partition.common.len())?;
    writeln!(out, "Only in live: {}", report.partition.only_live.len())?;
    writeln!(out, "Only in srv : {}", report.partition.only_server.len())?;

    writeln!(out, "\nSample keys:")?;
    for sample in &report.samples {
        writeln!(out, "- {}", sample.key)?;
    }

    for sample in &report.samples {
        writeln!(out, "\n{}", "=".repeat(90))?;
        writeln!(
            out,
            "{}  |  live_id={}  srv_id={}",
            sample.key, sample.live_id, sample.server_id
        )?;
        print_outcome(out, sample, config)?;
    }
    Ok(())
}

fn print_outcome<W: Write>(
    out: &mut W,
    sample: &ProductComparison,
    config: &CompareConfig,
) -> io::Result<()> {
    if sample.is_match() {
        let mut ignored: Vec<&str> = config.ignored_fields.iter().map(String::as_str).collect();
        ignored.sort();
        writeln!(
            out,
            " MATCH (ignoring {} + ignoring domain in URLs)",
            ignored.join("/")
        )?;
    } else {
        writeln!(out, " DIFFS ({} fields):", sample.diffs.len())?;
        for diff in &sample.diffs {
            writeln!(out, "- {}", diff.field)?;
            writeln!(out, "  live  : {}", diff.live)?;
            writeln!(out, "  server: {}", diff.server)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_diff::{DiffEntry, IdentityKey, KeyPartition};

    fn product(id: &str, diffs: Vec<DiffEntry>) -> ProductComparison {
        ProductComparison {
            key: IdentityKey::Id(id.to_string()),
            live_id: id.to_string(),
            server_id: id.to_string(),
            diffs,
        }
    }

    fn render(report: &ComparisonReport) -> String {
        let mut buf = Vec::new();
        print_report(&mut buf, report, &CompareConfig::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_layout_for_match() {
        let report = ComparisonReport {
            live_count: 2,
            server_count: 1,
            partition: KeyPartition {
                common: vec![IdentityKey::Id("1".to_string())],
                only_live: vec![IdentityKey::Id("9".to_string())],
                only_server: Vec::new(),
            },
            samples: vec![product("1", Vec::new())],
        };
        let separator = "=".repeat(90);
        let expected = [
            "Counts: live=2 srv=1",
            "Common keys: 1",
            "Only in live: 1",
            "Only in srv : 0",
            "",
            "Sample keys:",
            "- id:1",
            "",
            separator.as_str(),
            "id:1  |  live_id=1  srv_id=1",
            " MATCH (ignoring color/description/season/variations + ignoring domain in URLs)",
            "",
        ]
        .join("\n");
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn test_report_layout_for_diffs() {
        let diffs = vec![
            DiffEntry {
                field: "price".to_string(),
                live: "10.00".to_string(),
                server: "12.00".to_string(),
            },
            DiffEntry {
                field: "stock".to_string(),
                live: "4".to_string(),
                server: String::new(),
            },
        ];
        let report = ComparisonReport {
            live_count: 1,
            server_count: 1,
            partition: KeyPartition {
                common: vec![IdentityKey::Id("7".to_string())],
                only_live: Vec::new(),
                only_server: Vec::new(),
            },
            samples: vec![product("7", diffs)],
        };
        let separator = "=".repeat(90);
        let expected = [
            "Counts: live=1 srv=1",
            "Common keys: 1",
            "Only in live: 0",
            "Only in srv : 0",
            "",
            "Sample keys:",
            "- id:7",
            "",
            separator.as_str(),
            "id:7  |  live_id=7  srv_id=7",
            " DIFFS (2 fields):",
            "- price",
            "  live  : 10.00",
            "  server: 12.00",
            "- stock",
            "  live  : 4",
            "  server: ",
            "",
        ]
        .join("\n");
        assert_eq!(render(&report), expected);
    }
}
