use std::str::FromStr;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;
use crate::errors::ConfigError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {M} - {m}{n}";

/// Sets up log4rs with a file appender and, optionally, a console appender
///
/// # Arguments
///
/// * 'log_path' - path to the log file
/// * 'log_level' - root level, e.g. info or debug
/// * 'log_to_stdout' - whether to also log to stdout
pub fn setup_logger(log_path: &str, log_level: &str, log_to_stdout: bool) -> Result<(), ConfigError> {
    let config = logger_config(log_path, log_level, log_to_stdout)?;
    let _ = log4rs::init_config(config)?;

    Ok(())
}

fn logger_config(log_path: &str, log_level: &str, log_to_stdout: bool) -> Result<Config, ConfigError> {
    let level = LevelFilter::from_str(log_level)
        .map_err(|_| ConfigError(format!("unknown log level: {}", log_level)))?;

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(log_path)?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    Ok(builder.build(root.build(level))?)
}
