//! Logger setup for the binary
//!
//! `RUST_LOG` overrides the level passed on the command line. Logs go to
//! stderr, or to rotating files when a directory is given.

use std::path::Path;

use flexi_logger::{opt_format, Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};

/// Start logging at `level`. Keep the returned handle alive for the life of
/// the program.
pub fn setup_logging(level: &str, log_dir: Option<&Path>) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(level)?.format(opt_format);

    match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .rotate(
                Criterion::Size(10 * 1024 * 1024), // 10 MB per file
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .start(),
        None => logger.log_to_stderr().start(),
    }
}
