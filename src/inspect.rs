use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use riffavi::{walk, Summary, WalkError};

use crate::cli::Config;
use crate::text::TextReport;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("cannot read config file: {0}")]
    ConfigRead(#[from] std::io::Error),
    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Renders the structure of the file at `path` into `out`.
///
/// Lines written before a fatal error stay written.
pub fn inspect<W: Write>(path: &Path, config: &Config, out: W) -> Result<Summary, InspectError> {
    let file = File::open(path).map_err(|source| InspectError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Inspecting {}", path.display());

    let mut report = TextReport::new(out, config.indent);
    let result = walk(BufReader::new(file), &mut report, config.limits());
    report.into_inner().flush().map_err(WalkError::from)?;

    let summary = result?;
    info!("{} segments, {} bytes walked", summary.segments, summary.consumed);
    Ok(summary)
}
