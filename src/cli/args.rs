use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_ENCODING;

#[derive(Parser)]
#[command(name = "snowman")]
#[command(about = "Regional snowfall importer and snowman-size API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Config file [default: snowman.toml if present]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "SQLite database path (overrides config)")]
    pub database: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, help = "Bind host (overrides config)")]
        host: Option<String>,

        #[arg(short, long, help = "Bind port (overrides config)")]
        port: Option<u16>,
    },

    /// Import one region's daily and monthly CSV files
    Import {
        #[arg(short, long, help = "Region name, as listed in the region code table")]
        name: String,

        #[arg(short, long, help = "Region area in square kilometres")]
        area: f64,

        #[arg(short, long, help = "Daily snow depth CSV")]
        daily: PathBuf,

        #[arg(short, long, help = "Monthly snowfall CSV")]
        monthly: PathBuf,

        #[arg(short, long, default_value = DEFAULT_ENCODING, help = "Input text encoding (e.g. shift_jis)")]
        encoding: String,
    },

    /// Import every region listed in a name,area,daily,monthly manifest CSV
    ImportBatch {
        #[arg(short, long, help = "Manifest CSV")]
        manifest: PathBuf,

        #[arg(short, long, default_value = DEFAULT_ENCODING, help = "Input text encoding (e.g. shift_jis)")]
        encoding: String,

        #[arg(short, long, help = "Hide the progress bar")]
        quiet: bool,
    },

    /// Create the database file and tables
    InitDb,

    /// List stored regions
    Regions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import() {
        let cli = Cli::try_parse_from([
            "snowman",
            "import",
            "--name",
            "大阪府",
            "--area",
            "1905",
            "--daily",
            "osaka.csv",
            "--monthly",
            "osaka-mon.csv",
        ])
        .unwrap();

        match cli.command {
            Commands::Import {
                name,
                area,
                encoding,
                ..
            } => {
                assert_eq!(name, "大阪府");
                assert_eq!(area, 1905.0);
                assert_eq!(encoding, "utf-8");
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["snowman", "serve", "--port", "9000", "--database", "x.db", "-v"])
                .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.database, Some(PathBuf::from("x.db")));
        assert!(matches!(cli.command, Commands::Serve { port: Some(9000), .. }));
    }
}
