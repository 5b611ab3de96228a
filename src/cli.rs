use std::path::{Path, PathBuf};
use serde::Deserialize;

use clap::Parser;

use riffavi::Limits;

use crate::inspect::InspectError;

#[derive(Parser)]
#[command(name = "riffscope")]
#[command(about = "Dumps the chunk structure of AVI and Open-DML files")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Entries shown per movi class or index before the rest are counted
    #[arg(long, value_name = "N")]
    pub display_limit: Option<usize>,

    /// Deepest LIST nesting walked
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// The file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

// Configuration
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display_limit: usize,
    pub hexdump_lines: usize,
    pub indent: usize,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        let limits = Limits::default();
        Config {
            display_limit: limits.display_limit,
            hexdump_lines: limits.hexdump_lines,
            indent: 2,
            max_depth: limits.max_depth,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, InspectError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The config file if any, then the command line flags over it
    pub fn from_cli(cli: &Cli) -> Result<Self, InspectError> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(limit) = cli.display_limit {
            config.display_limit = limit;
        }
        if let Some(depth) = cli.max_depth {
            config.max_depth = depth;
        }
        Ok(config)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            display_limit: self.display_limit,
            hexdump_lines: self.hexdump_lines,
            max_depth: self.max_depth,
        }
    }
}

#[cfg(test)]
mod test_config {
    use super::*;
    use std::ffi::OsString;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str("indent = 4\nmax_depth = 8").unwrap();

        assert_eq!(config.indent, 4);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.display_limit, 16);
        assert_eq!(config.hexdump_lines, 16);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("colour = true").is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "display_limit = 4\nmax_depth = 8").unwrap();

        let args: Vec<OsString> = vec![
            "riffscope".into(),
            "--config".into(),
            file.path().as_os_str().to_os_string(),
            "--max-depth".into(),
            "3".into(),
            "movie.avi".into(),
        ];
        let cli = Cli::parse_from(args);
        let config = Config::from_cli(&cli).unwrap();

        assert_eq!(config.display_limit, 4);
        assert_eq!(config.max_depth, 3);
        assert_eq!(cli.file, PathBuf::from("movie.avi"));
    }

    #[test]
    fn missing_config_file() {
        let cli = Cli::parse_from(["riffscope", "--config", "/nonexistent/riffscope.toml", "movie.avi"]);

        assert!(matches!(Config::from_cli(&cli), Err(InspectError::ConfigRead(_))));
    }
}
