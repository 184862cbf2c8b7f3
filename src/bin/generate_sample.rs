use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use reading_dashboard::data::{self, TextEncoding};

/// Write a synthetic reading-volume survey CSV in the layout the dashboard reads.
#[derive(Debug, Parser)]
struct Args {
    /// Output file
    #[arg(short, long, default_value = "sample_reading.csv")]
    output: PathBuf,

    /// Text encoding to write (utf-8, euc-kr, ...)
    #[arg(short, long, default_value = "utf-8")]
    encoding: TextEncoding,

    /// First survey year
    #[arg(long, default_value_t = 2013)]
    from: u32,

    /// Last survey year (inclusive)
    #[arg(long, default_value_t = 2023)]
    to: u32,
}

const AGE_GROUPS: [(&str, f64); 6] = [
    ("10대", 14.2),
    ("20대", 11.8),
    ("30대", 9.6),
    ("40대", 8.1),
    ("50대", 6.9),
    ("60대 이상", 5.2),
];

const OTHER_BREAKDOWNS: [(&str, &str, f64); 4] = [
    ("전체", "소계", 8.4),
    ("성별", "남자", 7.9),
    ("성별", "여자", 8.9),
    ("학력별", "대졸이상", 10.3),
];

/// Survey ran every other year; the rest are published as "-".
fn surveyed(year: u32) -> bool {
    year % 2 == 1
}

/// Gentle decline over time with a small deterministic wobble.
fn volume(base: f64, step: u32, salt: usize) -> f64 {
    let trend = base * (1.0 - 0.035 * step as f64);
    let wobble = ((step as f64 * 1.7 + salt as f64 * 0.9).sin()) * 0.4;
    ((trend + wobble).max(0.0) * 10.0).round() / 10.0
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    if args.to < args.from {
        bail!("--to ({}) is before --from ({})", args.to, args.from);
    }
    let years: Vec<u32> = (args.from..=args.to).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["구분별(1)".to_string(), "구분별(2)".to_string()];
    header.extend(years.iter().map(|y| y.to_string()));
    writer.write_record(&header)?;

    let rows = OTHER_BREAKDOWNS
        .iter()
        .take(1)
        .copied()
        .chain(AGE_GROUPS.iter().map(|&(group, base)| ("연령별", group, base)))
        .chain(OTHER_BREAKDOWNS.iter().skip(1).copied());

    let mut n_rows = 0;
    for (salt, (category, label, base)) in rows.enumerate() {
        let mut record = vec![category.to_string(), label.to_string()];
        record.extend(years.iter().map(|&year| {
            if surveyed(year) {
                volume(base, year - args.from, salt).to_string()
            } else {
                data::reshape::SENTINEL.to_string()
            }
        }));
        writer.write_record(&record)?;
        n_rows += 1;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV: {}", e.error()))?;
    let text = String::from_utf8(buffer)?;
    let (bytes, used, had_errors) = args.encoding.encoding().encode(&text);
    if had_errors || used != args.encoding.encoding() {
        bail!("{} cannot represent the sample text", args.encoding);
    }

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!(
        "Wrote {n_rows} rows x {} years to {} ({})",
        years.len(),
        args.output.display(),
        args.encoding
    );
    Ok(())
}
