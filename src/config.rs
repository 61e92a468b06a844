use clap::Parser;
use std::path::PathBuf;

use crate::filter::OutputPathMode;

/// Command-line options of the `rechnungsfilter` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "rechnungsfilter")]
#[command(
    about = "Sum fulfillment and shipping per customer and write the export without selected customers"
)]
pub struct CliConfig {
    /// XML export to read.
    #[arg(long)]
    pub source: PathBuf,

    /// Folder the filtered export is written to.
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Customer numbers to remove.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Table rows (0-based) to remove.
    #[arg(long, value_delimiter = ',')]
    pub exclude_row: Vec<usize>,

    #[arg(long, value_enum, default_value_t = OutputPathMode::FileName)]
    pub path_mode: OutputPathMode,

    /// Print the table without writing a filtered file.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the table as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_and_defaults() {
        let config = CliConfig::try_parse_from([
            "rechnungsfilter",
            "--source",
            "in.xml",
            "--output-dir",
            "out",
            "--exclude",
            "C1,C2",
            "--exclude-row",
            "0,3",
        ])
        .unwrap();
        assert_eq!(config.exclude, vec!["C1", "C2"]);
        assert_eq!(config.exclude_row, vec![0, 3]);
        assert_eq!(config.path_mode, OutputPathMode::FileName);
        assert!(!config.dry_run);
    }

    #[test]
    fn legacy_path_mode() {
        let config = CliConfig::try_parse_from([
            "rechnungsfilter",
            "--source",
            "in.xml",
            "--output-dir",
            "out",
            "--path-mode",
            "source-path",
        ])
        .unwrap();
        assert_eq!(config.path_mode, OutputPathMode::SourcePath);
    }

    #[test]
    fn source_is_required() {
        assert!(CliConfig::try_parse_from(["rechnungsfilter", "--output-dir", "out"]).is_err());
    }
}
