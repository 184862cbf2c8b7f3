//! Start-up configuration: command line flags layered over an optional JSON file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::data::{TextEncoding, YearOrder};

/// Command line of the dashboard binary.
#[derive(Debug, Default, Parser)]
#[command(name = "reading-dashboard", version, about = "Age-group reading volume dashboard")]
pub struct Cli {
    /// CSV file to open at startup
    pub file: Option<PathBuf>,

    /// Text encoding of the CSV (utf-8, euc-kr, cp949, latin1, ...)
    #[arg(short, long)]
    pub encoding: Option<TextEncoding>,

    /// Year axis order: lexicographic or numeric
    #[arg(long)]
    pub year_order: Option<YearOrder>,

    /// JSON settings file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Resolved settings.
///
/// ```json
/// { "encoding": "euc-kr", "year_order": "numeric", "file": "survey.csv" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// `None` until the user picks one; nothing is assumed.
    pub encoding: Option<TextEncoding>,
    pub year_order: YearOrder,
    pub file: Option<PathBuf>,
}

impl DashboardConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("parsing settings JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Merge the settings file named by `cli` (if any) with the flags.
    pub fn resolve(cli: Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if cli.encoding.is_some() {
            config.encoding = cli.encoding;
        }
        if let Some(order) = cli.year_order {
            config.year_order = order;
        }
        if cli.file.is_some() {
            config.file = cli.file;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json() {
        let cfg =
            DashboardConfig::from_json(r#"{ "encoding": "EUC-KR", "year_order": "numeric" }"#)
                .unwrap();
        assert_eq!(cfg.encoding, Some(TextEncoding::euc_kr()));
        assert_eq!(cfg.year_order, YearOrder::Numeric);
        assert_eq!(cfg.file, None);
    }

    #[test]
    fn test_defaults_assume_no_encoding() {
        let cfg = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert!(cfg.encoding.is_none());
        assert_eq!(cfg.year_order, YearOrder::Lexicographic);
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        assert!(DashboardConfig::from_json(r#"{ "encoding": "klingon" }"#).is_err());
        assert!(DashboardConfig::from_json(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "encoding": "utf-8", "year_order": "numeric" }}"#).unwrap();

        let cli = Cli::parse_from([
            "reading-dashboard",
            "--config",
            file.path().to_str().unwrap(),
            "--encoding",
            "cp949",
            "survey.csv",
        ]);
        let cfg = DashboardConfig::resolve(cli).unwrap();
        assert_eq!(cfg.encoding, Some(TextEncoding::euc_kr()));
        assert_eq!(cfg.year_order, YearOrder::Numeric);
        assert_eq!(cfg.file, Some(PathBuf::from("survey.csv")));
    }
}
