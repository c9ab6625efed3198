use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),

    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
