use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal failures of the front end.  The simulation itself cannot fail.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
