use crate::AppError::ConfigError;
use clap::{Parser, ValueEnum};
use godsong::{transcode, Config, ErrorPolicy, GodsongError, OutputFormat};
use std::io::{self, BufWriter};
use std::path::PathBuf;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging, stdout is reserved for the score
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("godsong=warn"))
        .init();

    // args
    let args = CliArgs::parse();

    // read config
    let mut config = match args.config.map(PathBuf::from) {
        Some(config_path) => {
            if !config_path.exists() {
                let err = ConfigError(format!("Configuration file not found {config_path:?}"));
                return Err(err);
            }
            log::info!("Starting with configuration file {config_path:?}");
            Config::from_path(&config_path)?
        }
        None => Config::read_config()?,
    };
    if let Some(lookup_errors) = args.lookup_errors {
        config.lookup_errors = lookup_errors.into();
    }

    // go!
    let src = io::stdin().lock();
    let dst = BufWriter::new(io::stdout().lock());
    let summary = transcode(src, dst, args.format.into(), &config)?;
    log::debug!("{summary:?}");
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Output notation, the song is read from stdin and written to stdout.
    #[arg(value_enum)]
    format: Format,
    /// Optional path to a JSON configuration file.
    #[arg(long)]
    config: Option<String>,
    /// Whether grammar table misses abort the transcoding.
    ///
    /// The parser only hands table symbols to the lookups, so songs read from
    /// stdin never miss and transcode the same under both policies. Invalid
    /// note letters are always skipped with a warning.
    #[arg(long, value_enum)]
    lookup_errors: Option<LookupErrors>,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum Format {
    Pmx,
    Lilypond,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pmx => Self::Pmx,
            Format::Lilypond => Self::LilyPond,
        }
    }
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum LookupErrors {
    Fatal,
    Recoverable,
}

impl From<LookupErrors> for ErrorPolicy {
    fn from(policy: LookupErrors) -> Self {
        match policy {
            LookupErrors::Fatal => Self::Fatal,
            LookupErrors::Recoverable => Self::Recoverable,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("input error: {0}")]
    InputError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<GodsongError> for AppError {
    fn from(error: GodsongError) -> Self {
        match error {
            GodsongError::UnreadableInput(s) => Self::InputError(s),
            GodsongError::ConfigError(s) => Self::ConfigError(s),
            GodsongError::IoError(s) => Self::OtherError(s),
            parsing => Self::ParsingError(parsing.to_string()),
        }
    }
}
