use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Starts logging to stderr with the given specification (`warn`, `debug`,
/// `grid_search::algorithms=trace`, ...).
///
/// The returned handle must be kept alive for as long as logging is wanted.
pub fn init(spec: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    let handle = Logger::try_with_str(spec)?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()?;
    log::debug!("logging started with spec '{}'", spec);
    Ok(handle)
}
